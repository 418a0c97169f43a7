//! User profile domain types.
//!
//! Field layout matches the persisted `mombabyshop-user` record, camelCase
//! keys included, so profiles written by earlier builds of the shop load
//! unchanged.

use serde::{Deserialize, Serialize};

use super::email::Email;
use super::id::{AddressId, ProfileId};
use super::role::UserRole;

/// The current user's profile.
///
/// At most one profile is "current" per device; it is owned exclusively by
/// the auth session and persisted alongside the session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Profile identity.
    pub id: ProfileId,
    /// Login email.
    pub email: Email,
    /// Display name.
    pub name: String,
    /// Acting role.
    pub role: UserRole,
    /// Contact phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Avatar URL or embedded base64 image data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// Shipping addresses; at most one is flagged default.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub addresses: Vec<Address>,
    /// Notification and locale preferences, passed through opaquely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferences: Option<UserPreferences>,
}

impl UserProfile {
    /// The address flagged as default, if any.
    #[must_use]
    pub fn default_address(&self) -> Option<&Address> {
        self.addresses.iter().find(|a| a.is_default)
    }
}

/// A shipping address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    /// Address identity within the profile.
    pub id: AddressId,
    /// Recipient name.
    pub name: String,
    /// Recipient phone number.
    pub phone: String,
    /// Street address.
    pub address: String,
    /// City or province.
    pub city: String,
    /// District.
    pub district: String,
    /// Ward.
    pub ward: String,
    /// Whether this is the default shipping address.
    #[serde(default)]
    pub is_default: bool,
}

/// Notification and locale preferences.
///
/// Opaque to the state core; the UI reads and writes these wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    /// Newsletter subscription.
    pub newsletter: bool,
    /// Promotional email opt-in.
    pub promotions: bool,
    /// Order status notifications.
    pub order_updates: bool,
    /// UI language code (e.g., "vi").
    pub language: String,
    /// Display currency code (e.g., "VND").
    pub currency: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample_profile() -> UserProfile {
        UserProfile {
            id: ProfileId::new(1),
            email: Email::parse("customer@example.com").unwrap(),
            name: "Nguyễn Văn Khách".to_owned(),
            role: UserRole::Customer,
            phone: Some("0123456789".to_owned()),
            avatar: Some("/default-avatar.png".to_owned()),
            addresses: vec![Address {
                id: AddressId::new(1),
                name: "Nguyễn Văn Khách".to_owned(),
                phone: "0123456789".to_owned(),
                address: "123 Đường ABC".to_owned(),
                city: "Hồ Chí Minh".to_owned(),
                district: "Quận 1".to_owned(),
                ward: "Phường Bến Nghé".to_owned(),
                is_default: true,
            }],
            preferences: Some(UserPreferences {
                newsletter: true,
                promotions: true,
                order_updates: true,
                language: "vi".to_owned(),
                currency: "VND".to_owned(),
            }),
        }
    }

    #[test]
    fn test_default_address() {
        let profile = sample_profile();
        assert_eq!(
            profile.default_address().map(|a| a.id),
            Some(AddressId::new(1))
        );
    }

    #[test]
    fn test_record_uses_camel_case_keys() {
        let json = serde_json::to_value(sample_profile()).unwrap();
        assert_eq!(json["addresses"][0]["isDefault"], true);
        assert_eq!(json["preferences"]["orderUpdates"], true);
    }

    #[test]
    fn test_roundtrip() {
        let profile = sample_profile();
        let json = serde_json::to_string(&profile).unwrap();
        let back: UserProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(back, profile);
    }
}
