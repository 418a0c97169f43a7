//! Cart commands.
//!
//! # Usage
//!
//! ```bash
//! msb-cli cart add --id 1 --name "Xe đẩy em bé" --price 7500000 --image /stroller.png
//! msb-cli cart list
//! msb-cli cart set-qty 1 3
//! msb-cli cart remove 1
//! msb-cli cart clear
//! ```

use clap::Subcommand;
use rust_decimal::Decimal;

use mombabyshop_core::{CartLine, LineKey, ProductRef};
use mombabyshop_store::Cart;

use super::{CliEnv, CliError};

/// Cart subcommands.
#[derive(Subcommand)]
pub enum CartAction {
    /// Add a product (merges with an existing line of the same identity)
    Add {
        /// Product ID
        #[arg(long)]
        id: String,
        /// Display name
        #[arg(long)]
        name: String,
        /// Unit price in decimal currency
        #[arg(long)]
        price: Decimal,
        /// Image path or URL
        #[arg(long)]
        image: String,
        /// Color variant (participates in line identity)
        #[arg(long)]
        color: Option<String>,
        /// Brand label
        #[arg(long)]
        brand: Option<String>,
        /// Category label
        #[arg(long)]
        category: Option<String>,
        /// Quantity to add
        #[arg(long, default_value_t = 1)]
        qty: u32,
    },
    /// Remove a line by identity key (`id` or `id:color`)
    Remove {
        /// Line identity key
        key: LineKey,
    },
    /// Overwrite a line's quantity (0 removes the line)
    SetQty {
        /// Line identity key
        key: LineKey,
        /// New quantity
        qty: u32,
    },
    /// Print the cart lines
    List,
    /// Print the badge count (sum of quantities)
    Count,
    /// Print the cart total price
    Total,
    /// Empty the cart
    Clear,
}

/// Execute a cart subcommand.
///
/// # Errors
///
/// Returns [`CliError`] when validation or persistence fails.
pub fn run(env: &CliEnv, action: CartAction) -> Result<(), CliError> {
    let (notifier, parent_updates) = env.config().notifier_mode().build();
    let cart = Cart::new(env.hub().handle(), notifier);

    match action {
        CartAction::Add {
            id,
            name,
            price,
            image,
            color,
            brand,
            category,
            qty,
        } => {
            let mut product = ProductRef::new(id, name, price, image)?;
            if let Some(color) = color {
                product = product.with_color(color);
            }
            if let Some(brand) = brand {
                product = product.with_brand(brand);
            }
            if let Some(category) = category {
                product = product.with_category(category);
            }
            cart.add_item(product, qty)?;
            print_lines(&cart.lines());
        }
        CartAction::Remove { key } => {
            cart.remove_item(&key)?;
            print_lines(&cart.lines());
        }
        CartAction::SetQty { key, qty } => {
            cart.set_quantity(&key, qty)?;
            print_lines(&cart.lines());
        }
        CartAction::List => print_lines(&cart.lines()),
        CartAction::Count => print_value(cart.total_item_count()),
        CartAction::Total => print_value(cart.total_price()),
        CartAction::Clear => {
            cart.clear()?;
            print_lines(&cart.lines());
        }
    }

    if let Some(receiver) = parent_updates {
        super::print_parent_updates(&receiver);
    }
    Ok(())
}

#[allow(clippy::print_stdout)]
fn print_lines(lines: &[CartLine]) {
    if lines.is_empty() {
        println!("(cart is empty)");
        return;
    }
    for line in lines {
        println!(
            "{:<12} x{:<4} {:<28} {}",
            line.key().to_string(),
            line.quantity,
            line.product.name,
            line.line_total()
        );
    }
}

#[allow(clippy::print_stdout)]
fn print_value(value: impl std::fmt::Display) {
    println!("{value}");
}
