//! Store configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `MOMBABYSHOP_DATA_DIR` - Directory for persisted records
//!   (default: `.mombabyshop`)
//! - `MOMBABYSHOP_EMBEDDED` - `true`/`1` when running inside an embedding
//!   parent context that wants cart/wishlist updates (default: `false`)

use std::env;
use std::path::PathBuf;

use thiserror::Error;

use crate::notifier::NotifierMode;

const DEFAULT_DATA_DIR: &str = ".mombabyshop";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A variable was set to a value the loader cannot interpret.
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// State-core configuration.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Directory the file backend persists records under.
    pub data_dir: PathBuf,
    /// Whether this context is embedded in a parent that wants updates.
    pub embedded: bool,
}

impl StoreConfig {
    /// Load configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnvVar`] if `MOMBABYSHOP_EMBEDDED`
    /// is set to something other than a boolean.
    pub fn from_env() -> Result<Self, ConfigError> {
        let data_dir = env::var("MOMBABYSHOP_DATA_DIR")
            .map_or_else(|_| PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from);

        let embedded = match env::var("MOMBABYSHOP_EMBEDDED") {
            Ok(value) => parse_bool(&value).ok_or_else(|| {
                ConfigError::InvalidEnvVar("MOMBABYSHOP_EMBEDDED".to_owned(), value)
            })?,
            Err(_) => false,
        };

        Ok(Self { data_dir, embedded })
    }

    /// Notifier selection for this configuration.
    #[must_use]
    pub const fn notifier_mode(&self) -> NotifierMode {
        if self.embedded {
            NotifierMode::Embedded
        } else {
            NotifierMode::Standalone
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            embedded: false,
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        _ => None,
    }
}
