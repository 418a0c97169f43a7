//! MomBabyShop Store - Client-side state core.
//!
//! Owns the shopping cart, the wishlist, and the auth session, together
//! with their persistence and cross-context synchronization contract.
//! The presentation layer is an external collaborator: it hands validated
//! [`mombabyshop_core::ProductRef`] values in and re-renders from the
//! snapshots and change notifications exposed here.
//!
//! # Architecture
//!
//! - [`storage`] - Durable store adapter: named JSON records over a
//!   pluggable backend, with per-context handles and change subscriptions
//! - [`cart`] / [`wishlist`] - The two shopping aggregates
//! - [`auth`] - Auth session state machine over a demo account directory
//! - [`notifier`] - Best-effort broadcast to an embedding parent context
//! - [`config`] - Environment-driven configuration
//!
//! Aggregates are plain objects constructed once at application start and
//! passed by reference; there are no ambient singletons. Construct them
//! over [`storage::memory::MemoryBackend`] in tests and
//! [`storage::file::JsonFileBackend`] in real deployments.
//!
//! # Consistency model
//!
//! Every mutation is a read-modify-write over the aggregate's own record
//! key, performed under the aggregate's lock: serialize, persist, commit
//! the in-memory snapshot, then notify. A failed persist rolls back (the
//! snapshot is never ahead of durable state). Contexts sharing a backend
//! get last-write-wins semantics; a notified context replaces its snapshot
//! wholesale rather than merging.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod auth;
pub mod cart;
pub mod config;
pub mod notifier;
pub mod storage;
pub mod wishlist;

pub use auth::{AuthError, AuthSession, ProfileUpdate, Registration};
pub use cart::{Cart, CartError};
pub use config::{ConfigError, StoreConfig};
pub use notifier::{ContextNotifier, NoopNotifier, NotifierMode, ParentNotifier, UpdateMessage};
pub use storage::{StorageBackend, StorageError, StoreHandle, StoreHub, keys};
pub use wishlist::{ToggleAction, ToggleOutcome, Wishlist};
