//! Wishlist commands.
//!
//! # Usage
//!
//! ```bash
//! msb-cli wishlist toggle --id 2 --name "Nôi cũi" --price 4200000 --image /crib.png
//! msb-cli wishlist list
//! msb-cli wishlist remove 2
//! msb-cli wishlist clear
//! ```

use clap::Subcommand;
use rust_decimal::Decimal;

use mombabyshop_core::{ProductId, ProductRef, WishlistEntry};
use mombabyshop_store::{ToggleAction, Wishlist};

use super::{CliEnv, CliError};

/// Wishlist subcommands.
#[derive(Subcommand)]
pub enum WishlistAction {
    /// Toggle a product: add if absent, remove if present
    Toggle {
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
    },
    /// Remove a product by ID without toggle semantics
    Remove {
        /// Product ID
        id: String,
    },
    /// Print the wishlist entries
    List,
    /// Empty the wishlist
    Clear,
}

/// Execute a wishlist subcommand.
///
/// # Errors
///
/// Returns [`CliError`] when validation or persistence fails.
pub fn run(env: &CliEnv, action: WishlistAction) -> Result<(), CliError> {
    let (notifier, parent_updates) = env.config().notifier_mode().build();
    let wishlist = Wishlist::new(env.hub().handle(), notifier);

    match action {
        WishlistAction::Toggle {
            id,
            name,
            price,
            image,
        } => {
            let product = ProductRef::new(id, name, price, image)?;
            let outcome = wishlist.toggle(product)?;
            match outcome.action {
                ToggleAction::Added => print_message("added to wishlist"),
                ToggleAction::Removed => print_message("removed from wishlist"),
            }
            print_entries(&outcome.entries);
        }
        WishlistAction::Remove { id } => {
            wishlist.remove(&ProductId::from(id))?;
            print_entries(&wishlist.entries());
        }
        WishlistAction::List => print_entries(&wishlist.entries()),
        WishlistAction::Clear => {
            wishlist.clear()?;
            print_entries(&wishlist.entries());
        }
    }

    if let Some(receiver) = parent_updates {
        super::print_parent_updates(&receiver);
    }
    Ok(())
}

#[allow(clippy::print_stdout)]
fn print_entries(entries: &[WishlistEntry]) {
    if entries.is_empty() {
        println!("(wishlist is empty)");
        return;
    }
    for entry in entries {
        println!("{:<12} {:<28} {}", entry.id.to_string(), entry.name, entry.price);
    }
}

#[allow(clippy::print_stdout)]
fn print_message(message: &str) {
    println!("{message}");
}
