//! In-memory storage backend.

use std::collections::HashMap;

use parking_lot::Mutex;

use super::{StorageBackend, StorageError};

/// Backend holding records in a process-local map.
///
/// The default backend for tests and for ephemeral sessions where nothing
/// should survive a restart.
#[derive(Default)]
pub struct MemoryBackend {
    records: Mutex<HashMap<String, String>>,
}

impl MemoryBackend {
    /// Create an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryBackend {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.records.lock().get(key).cloned())
    }

    fn store(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.records.lock().insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.records.lock().remove(key);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_store_overwrites() {
        let backend = MemoryBackend::new();
        backend.store("k", "1").unwrap();
        backend.store("k", "2").unwrap();
        assert_eq!(backend.load("k").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn test_delete_absent_is_noop() {
        let backend = MemoryBackend::new();
        backend.delete("missing").unwrap();
        assert!(backend.load("missing").unwrap().is_none());
    }
}
