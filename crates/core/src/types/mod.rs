//! Core types for MomBabyShop.
//!
//! This module provides the domain value types consumed and produced by
//! the state aggregates.

pub mod email;
pub mod id;
pub mod product;
pub mod profile;
pub mod role;

pub use email::{Email, EmailError};
pub use id::{AddressId, ProfileId, ProductId};
pub use product::{CartLine, LineKey, LineKeyParseError, ProductRef, ProductRefError, WishlistEntry};
pub use profile::{Address, UserPreferences, UserProfile};
pub use role::{RoleParseError, UserRole};
