//! PersistenceBackend trait: the abstract interface for durable key-value slots.
//!
//! This trait allows the issue store to be storage-agnostic. Implementations
//! include SQLite (primary) and in-memory (for tests).

use std::sync::Arc;

use bytes::Bytes;

use crate::error::{Result, StoreError};

/// A synchronous key-value store of byte strings.
///
/// # Design Notes
///
/// - **Whole-value writes**: `write` replaces whatever was stored under the key.
/// - **Missing keys**: `read` returns `Ok(None)`; an error means the backend
///   itself failed.
/// - **Shared**: implementations are `Send + Sync` and synchronize internally,
///   so one backend can serve several stores (e.g. two browser tabs).
pub trait PersistenceBackend: Send + Sync {
    /// Read the value stored under `key`.
    fn read(&self, key: &str) -> Result<Option<Bytes>>;

    /// Replace the value stored under `key`.
    fn write(&self, key: &str, value: Bytes) -> Result<()>;
}

impl<B: PersistenceBackend + ?Sized> PersistenceBackend for Arc<B> {
    fn read(&self, key: &str) -> Result<Option<Bytes>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: Bytes) -> Result<()> {
        (**self).write(key, value)
    }
}

impl<B: PersistenceBackend + ?Sized> PersistenceBackend for Box<B> {
    fn read(&self, key: &str) -> Result<Option<Bytes>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: Bytes) -> Result<()> {
        (**self).write(key, value)
    }
}

/// Extension trait for string-valued keys.
pub trait BackendExt: PersistenceBackend {
    /// Read a UTF-8 value.
    fn read_string(&self, key: &str) -> Result<Option<String>> {
        match self.read(key)? {
            Some(bytes) => String::from_utf8(bytes.to_vec())
                .map(Some)
                .map_err(|e| StoreError::InvalidData {
                    key: key.to_string(),
                    reason: e.to_string(),
                }),
            None => Ok(None),
        }
    }

    /// Write a UTF-8 value.
    fn write_str(&self, key: &str, value: &str) -> Result<()> {
        self.write(key, Bytes::copy_from_slice(value.as_bytes()))
    }
}

impl<B: PersistenceBackend + ?Sized> BackendExt for B {}
