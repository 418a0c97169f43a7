//! Integration tests for the MomBabyShop state core.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p mombabyshop-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cross_context` - Multiple contexts over one shared store
//! - `persistence` - File-backed records across process-like boundaries
//! - `checkout_flow` - End-to-end shopping scenario
//!
//! The helpers here build the aggregate trio the way an application
//! bootstrap would: one hub per storage medium, one handle per context,
//! notifier chosen explicitly.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use mombabyshop_store::storage::memory::MemoryBackend;
use mombabyshop_store::{AuthSession, Cart, NoopNotifier, StoreHub, Wishlist};

/// One rendering context: the aggregate trio over a single store handle's
/// context identity.
pub struct Context {
    /// The shopping cart.
    pub cart: Cart,
    /// The wishlist.
    pub wishlist: Wishlist,
    /// The auth session.
    pub auth: AuthSession,
}

impl Context {
    /// Open a fresh context on `hub` with no parent to notify.
    #[must_use]
    pub fn open(hub: &StoreHub) -> Self {
        let handle = hub.handle();
        Self {
            cart: Cart::new(handle.clone(), Arc::new(NoopNotifier)),
            wishlist: Wishlist::new(handle.clone(), Arc::new(NoopNotifier)),
            auth: AuthSession::new(handle),
        }
    }
}

/// A hub over an in-memory medium shared by however many contexts the
/// test opens.
#[must_use]
pub fn memory_hub() -> StoreHub {
    StoreHub::new(MemoryBackend::new())
}
