//! MomBabyShop Core - Shared domain types.
//!
//! This crate provides the value types shared by the MomBabyShop state
//! components:
//! - `store` - Cart/wishlist/auth aggregates and their persistence
//! - `cli` - Command-line collaborator exercising the aggregates
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no
//! notification channels. This keeps it lightweight and allows it to be
//! used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Product references, cart lines, user profiles, and the
//!   validated wrappers around them

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
