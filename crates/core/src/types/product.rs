//! Product references and cart/wishlist entry types.
//!
//! A [`ProductRef`] is the value the presentation layer hands to the core
//! when the user adds to cart or toggles a wishlist heart. It is validated
//! at that boundary; everything downstream can rely on a non-empty ID and
//! a non-negative price.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;

/// Errors produced when validating a [`ProductRef`] at the UI boundary.
#[derive(thiserror::Error, Debug, Clone)]
pub enum ProductRefError {
    /// The product ID is empty.
    #[error("product id cannot be empty")]
    EmptyId,
    /// The product name is empty.
    #[error("product name cannot be empty")]
    EmptyName,
    /// The price is negative.
    #[error("product price cannot be negative: {0}")]
    NegativePrice(Decimal),
}

/// A minimal reference to a catalog item.
///
/// `id`, `name`, `price`, and `image` are required; `category`, `brand`,
/// and `color` are optional extension fields carried through persistence
/// untouched. Prices are decimal currency amounts (VND in the seed
/// catalog), never display strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRef {
    /// Stable catalog identity.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price in decimal currency.
    pub price: Decimal,
    /// Image path or URL.
    pub image: String,
    /// Optional category label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Optional brand label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    /// Optional color variant. When present it participates in cart line
    /// identity (see [`LineKey`]).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl ProductRef {
    /// Create a validated product reference.
    ///
    /// # Errors
    ///
    /// Returns [`ProductRefError`] if the ID or name is empty, or the
    /// price is negative.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        price: Decimal,
        image: impl Into<String>,
    ) -> Result<Self, ProductRefError> {
        let id = id.into();
        let name = name.into();

        if id.is_empty() {
            return Err(ProductRefError::EmptyId);
        }
        if name.is_empty() {
            return Err(ProductRefError::EmptyName);
        }
        if price.is_sign_negative() && !price.is_zero() {
            return Err(ProductRefError::NegativePrice(price));
        }

        Ok(Self {
            id,
            name,
            price,
            image: image.into(),
            category: None,
            brand: None,
            color: None,
        })
    }

    /// Set the color variant.
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Set the category label.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Set the brand label.
    #[must_use]
    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    /// Identity key for cart merging: `(id, color-if-present)`.
    #[must_use]
    pub fn line_key(&self) -> LineKey {
        LineKey {
            id: self.id.clone(),
            color: self.color.clone(),
        }
    }
}

/// A wishlist entry is a plain product reference; the wishlist keys
/// membership by `id` alone.
pub type WishlistEntry = ProductRef;

/// Cart line identity: the product ID plus the color variant when one was
/// selected. Two lines with the same ID but different colors are distinct;
/// a colorless add merges with the prior colorless line for that ID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineKey {
    /// Product identity.
    pub id: ProductId,
    /// Selected color variant, if any.
    pub color: Option<String>,
}

impl LineKey {
    /// Key for a product with no variant selection.
    #[must_use]
    pub const fn plain(id: ProductId) -> Self {
        Self { id, color: None }
    }
}

impl fmt::Display for LineKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.color {
            Some(color) => write!(f, "{}:{color}", self.id),
            None => write!(f, "{}", self.id),
        }
    }
}

/// Error parsing a [`LineKey`] from its `id[:color]` display form.
#[derive(thiserror::Error, Debug, Clone)]
pub enum LineKeyParseError {
    /// The input string is empty.
    #[error("line key cannot be empty")]
    Empty,
}

impl std::str::FromStr for LineKey {
    type Err = LineKeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(LineKeyParseError::Empty);
        }
        Ok(match s.split_once(':') {
            Some((id, color)) if !color.is_empty() => Self {
                id: ProductId::from(id),
                color: Some(color.to_owned()),
            },
            _ => Self::plain(ProductId::from(s)),
        })
    }
}

/// A cart line: a product reference plus a positive quantity.
///
/// Serializes flat (`{id, name, price, image, quantity, ...}`) to match
/// the persisted cart record layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// The referenced product.
    #[serde(flatten)]
    pub product: ProductRef,
    /// Units of this product in the cart. Always >= 1; a line whose
    /// quantity would drop to zero is removed instead.
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

const fn default_quantity() -> u32 {
    1
}

impl CartLine {
    /// Create a line for a product with the given quantity.
    #[must_use]
    pub const fn new(product: ProductRef, quantity: u32) -> Self {
        Self { product, quantity }
    }

    /// Identity key of this line.
    #[must_use]
    pub fn key(&self) -> LineKey {
        self.product.line_key()
    }

    /// Price of this line: unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn stroller() -> ProductRef {
        ProductRef::new("1", "Xe đẩy em bé", Decimal::from(7_500_000), "/stroller.png").unwrap()
    }

    #[test]
    fn test_validation_rejects_empty_id() {
        let err = ProductRef::new("", "Stroller", Decimal::ONE, "x").unwrap_err();
        assert!(matches!(err, ProductRefError::EmptyId));
    }

    #[test]
    fn test_validation_rejects_empty_name() {
        let err = ProductRef::new("1", "", Decimal::ONE, "x").unwrap_err();
        assert!(matches!(err, ProductRefError::EmptyName));
    }

    #[test]
    fn test_validation_rejects_negative_price() {
        let err = ProductRef::new("1", "Stroller", Decimal::from(-1), "x").unwrap_err();
        assert!(matches!(err, ProductRefError::NegativePrice(_)));
    }

    #[test]
    fn test_line_key_without_color() {
        let key = stroller().line_key();
        assert_eq!(key, LineKey::plain(ProductId::from("1")));
        assert_eq!(key.to_string(), "1");
    }

    #[test]
    fn test_line_key_with_color() {
        let key = stroller().with_color("Đen").line_key();
        assert_eq!(key.color.as_deref(), Some("Đen"));
        assert_eq!(key.to_string(), "1:Đen");
    }

    #[test]
    fn test_line_key_parse_roundtrip() {
        let key: LineKey = "1:Đen".parse().unwrap();
        assert_eq!(key.to_string(), "1:Đen");

        let plain: LineKey = "sp-002".parse().unwrap();
        assert_eq!(plain, LineKey::plain(ProductId::from("sp-002")));

        assert!("".parse::<LineKey>().is_err());
    }

    #[test]
    fn test_cart_line_serializes_flat() {
        let line = CartLine::new(stroller(), 2);
        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(json["id"], "1");
        assert_eq!(json["quantity"], 2);
        // Absent optional fields are omitted from the record.
        assert!(json.get("color").is_none());
    }

    #[test]
    fn test_cart_line_quantity_defaults_to_one() {
        // Legacy records written before quantities existed omit the field.
        let line: CartLine = serde_json::from_str(
            r#"{"id":"1","name":"Xe đẩy","price":"7500000","image":"/s.png"}"#,
        )
        .unwrap();
        assert_eq!(line.quantity, 1);
    }

    #[test]
    fn test_line_total() {
        let line = CartLine::new(stroller(), 2);
        assert_eq!(line.line_total(), Decimal::from(15_000_000));
    }
}
