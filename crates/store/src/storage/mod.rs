//! Durable store adapter.
//!
//! Persistence is a set of named JSON records over a [`StorageBackend`].
//! A [`StoreHub`] wraps one backend and hands out per-context
//! [`StoreHandle`]s: each handle models one rendering context (a window,
//! a tab, an embedded frame) sharing the same underlying storage. Writes
//! through one handle notify subscribers registered through *other*
//! handles; a context never hears its own writes back.
//!
//! Reads fail soft: a missing or unparsable record is absent, never an
//! error that blocks the UI. Write failures are real errors and propagate
//! to the mutating caller.

pub mod file;
pub mod memory;

use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

/// Record keys owned by the state core.
///
/// Each aggregate owns exactly one key and never shares it.
pub mod keys {
    /// Cart record: JSON array of cart lines.
    pub const CART: &str = "mombabyshop-cart";

    /// Wishlist record: JSON array of product references.
    pub const WISHLIST: &str = "mombabyshop-wishlist";

    /// Current profile record; present together with [`TOKEN`] or not at all.
    pub const USER: &str = "mombabyshop-user";

    /// Opaque session token.
    pub const TOKEN: &str = "mombabyshop-token";
}

/// Errors from the durable store.
///
/// Corrupt records are not represented here: they are recovered as absent
/// at read time (with a diagnostic), per the adapter contract.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The underlying medium failed (quota exceeded, disabled storage,
    /// filesystem error).
    #[error("storage unavailable: {0}")]
    Unavailable(#[from] std::io::Error),

    /// A record could not be encoded to JSON before writing.
    #[error("could not encode record {key}: {source}")]
    Encode {
        /// Record key being written.
        key: String,
        /// Underlying serialization failure.
        source: serde_json::Error,
    },
}

/// Raw text storage for named records.
///
/// Implementations must make writes fully overwrite the prior value with
/// no partially written value observable to readers.
pub trait StorageBackend: Send + Sync {
    /// Fetch the raw text stored under `key`, or `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Unavailable`] if the medium cannot be read.
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Persist `value` under `key`, replacing any prior value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Unavailable`] if the medium cannot be written.
    fn store(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove the record under `key`; absent keys are a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Unavailable`] if the medium cannot be written.
    fn delete(&self, key: &str) -> Result<(), StorageError>;
}

/// Handler invoked when another context changes a subscribed key.
/// Receives the new raw record text, or `None` when the record was removed.
type ChangeHandler = Arc<dyn Fn(Option<&str>) + Send + Sync>;

struct Subscription {
    context: Uuid,
    key: String,
    handler: ChangeHandler,
}

struct HubInner {
    backend: Box<dyn StorageBackend>,
    subscriptions: Mutex<Vec<Subscription>>,
}

/// One shared storage medium plus its subscription registry.
///
/// Application code keeps a single hub per backend and derives one
/// [`StoreHandle`] per rendering context from it.
pub struct StoreHub {
    inner: Arc<HubInner>,
}

impl StoreHub {
    /// Create a hub over the given backend.
    pub fn new(backend: impl StorageBackend + 'static) -> Self {
        Self {
            inner: Arc::new(HubInner {
                backend: Box::new(backend),
                subscriptions: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Derive a handle representing a fresh context.
    #[must_use]
    pub fn handle(&self) -> StoreHandle {
        StoreHandle {
            inner: Arc::clone(&self.inner),
            context: Uuid::new_v4(),
        }
    }
}

/// A per-context view of the shared store.
///
/// Cloning a handle keeps the same context identity; derive a new handle
/// from the [`StoreHub`] to model a separate context.
#[derive(Clone)]
pub struct StoreHandle {
    inner: Arc<HubInner>,
    context: Uuid,
}

impl StoreHandle {
    /// Read and deserialize the record under `key`.
    ///
    /// Absent keys and corrupt records both come back as `Ok(None)`;
    /// corruption is logged and discarded, never surfaced to the UI.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Unavailable`] if the medium cannot be read.
    pub fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let Some(raw) = self.inner.backend.load(key)? else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(error) => {
                tracing::warn!(key, %error, "discarding corrupt record");
                Ok(None)
            }
        }
    }

    /// Serialize and persist `value` under `key`, then notify subscribers
    /// in other contexts.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Encode`] if serialization fails and
    /// [`StorageError::Unavailable`] if the medium cannot be written.
    /// Nothing is notified on failure.
    pub fn write<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let raw = serde_json::to_string(value).map_err(|source| StorageError::Encode {
            key: key.to_owned(),
            source,
        })?;
        self.inner.backend.store(key, &raw)?;
        self.notify_others(key, Some(&raw));
        Ok(())
    }

    /// Remove the record under `key`, then notify subscribers in other
    /// contexts with an absent value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Unavailable`] if the medium cannot be written.
    pub fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.inner.backend.delete(key)?;
        self.notify_others(key, None);
        Ok(())
    }

    /// Register `handler` for changes to `key` made through handles of
    /// other contexts. Writes through this handle do not loop back.
    pub fn subscribe(&self, key: &str, handler: impl Fn(Option<&str>) + Send + Sync + 'static) {
        self.inner.subscriptions.lock().push(Subscription {
            context: self.context,
            key: key.to_owned(),
            handler: Arc::new(handler),
        });
    }

    fn notify_others(&self, key: &str, raw: Option<&str>) {
        // Clone the matching handlers out so none run under the registry
        // lock; a handler may re-enter the store to read.
        let handlers: Vec<ChangeHandler> = self
            .inner
            .subscriptions
            .lock()
            .iter()
            .filter(|sub| sub.key == key && sub.context != self.context)
            .map(|sub| Arc::clone(&sub.handler))
            .collect();

        for handler in handlers {
            handler(raw);
        }
    }
}
