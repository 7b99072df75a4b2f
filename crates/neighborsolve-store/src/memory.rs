//! In-memory implementation of the PersistenceBackend trait.
//!
//! Same semantics as SQLite but keeps everything in memory with no
//! persistence across processes. Cloning an `Arc<MemoryBackend>` is how tests
//! simulate a restart against the same storage.

use std::collections::HashMap;
use std::sync::RwLock;

use bytes::Bytes;

use crate::error::{Result, StoreError};
use crate::traits::PersistenceBackend;

/// In-memory backend.
///
/// All data is lost when the backend is dropped. Thread-safe via RwLock.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: RwLock<HashMap<String, Bytes>>,
}

impl MemoryBackend {
    /// Create a new empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend pre-populated with entries.
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Bytes>,
    {
        Self {
            entries: RwLock::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    /// Sorted list of keys currently stored.
    pub fn keys(&self) -> Result<Vec<String>> {
        let entries = self.entries.read().map_err(poisoned)?;
        let mut keys: Vec<String> = entries.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }

    /// Remove a key, returning its value.
    pub fn remove(&self, key: &str) -> Result<Option<Bytes>> {
        let mut entries = self.entries.write().map_err(poisoned)?;
        Ok(entries.remove(key))
    }
}

impl PersistenceBackend for MemoryBackend {
    fn read(&self, key: &str) -> Result<Option<Bytes>> {
        let entries = self.entries.read().map_err(poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn write(&self, key: &str, value: Bytes) -> Result<()> {
        let mut entries = self.entries.write().map_err(poisoned)?;
        tracing::trace!(key, len = value.len(), "memory backend write");
        entries.insert(key.to_string(), value);
        Ok(())
    }
}

fn poisoned<E: std::fmt::Display>(e: E) -> StoreError {
    StoreError::LockPoisoned(e.to_string())
}
