//! CLI command implementations.

pub mod auth;
pub mod cart;
pub mod wishlist;

use thiserror::Error;

use mombabyshop_core::{ProductRefError, RoleParseError};
use mombabyshop_store::storage::file::JsonFileBackend;
use mombabyshop_store::{AuthError, CartError, ConfigError, StorageError, StoreConfig, StoreHub};

/// Errors surfaced to the user as a single message.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Invalid product argument.
    #[error(transparent)]
    Product(#[from] ProductRefError),

    /// Invalid role argument.
    #[error(transparent)]
    Role(#[from] RoleParseError),

    /// Cart operation failed.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// Auth operation failed.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Store operation failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Shared command environment: configuration plus the store hub over the
/// file backend.
pub struct CliEnv {
    config: StoreConfig,
    hub: StoreHub,
}

impl CliEnv {
    /// Build the environment from environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Config`] if the environment is malformed.
    pub fn from_env() -> Result<Self, CliError> {
        let config = StoreConfig::from_env()?;
        let hub = StoreHub::new(JsonFileBackend::new(config.data_dir.clone()));
        Ok(Self { config, hub })
    }

    /// The loaded configuration.
    #[must_use]
    pub const fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// The store hub for this invocation.
    #[must_use]
    pub const fn hub(&self) -> &StoreHub {
        &self.hub
    }
}

/// In embedded mode, print the envelopes the parent context received
/// during this invocation.
#[allow(clippy::print_stdout)]
pub fn print_parent_updates(receiver: &std::sync::mpsc::Receiver<String>) {
    while let Ok(envelope) = receiver.try_recv() {
        println!("parent <- {envelope}");
    }
}
