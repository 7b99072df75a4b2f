//! # NeighborSolve Store
//!
//! Persistence backends for NeighborSolve. Provides a trait-based key-value
//! interface with SQLite and in-memory implementations.
//!
//! ## Overview
//!
//! The issue store never touches storage directly. It reads and writes whole
//! values through the [`PersistenceBackend`] trait, so the same store runs
//! against a browser-style slot, a test double, or a SQLite file. The
//! primary implementation is [`SqliteBackend`], with [`MemoryBackend`] for
//! tests and embedding.
//!
//! ## Key Types
//!
//! - [`PersistenceBackend`] - The synchronous key-value trait
//! - [`BackendExt`] - UTF-8 string helpers on top of any backend
//! - [`SqliteBackend`] - SQLite-based persistent storage
//! - [`MemoryBackend`] - In-memory storage
//!
//! ## Usage
//!
//! ```rust,no_run
//! use bytes::Bytes;
//! use neighborsolve_store::{PersistenceBackend, SqliteBackend};
//!
//! let backend = SqliteBackend::open("neighborsolve.db").unwrap();
//! backend.write("theme", Bytes::from_static(b"dark")).unwrap();
//! assert_eq!(backend.read("theme").unwrap().as_deref(), Some(&b"dark"[..]));
//! ```
//!
//! ## Design Notes
//!
//! - **Whole values**: a write replaces the value under a key; there is no append.
//! - **Absent is not an error**: reading a missing key returns `Ok(None)`.
//! - **Synchronous**: every call completes before returning.

pub mod error;
pub mod memory;
pub mod migration;
pub mod sqlite;
pub mod traits;

pub use error::{Result, StoreError};
pub use memory::MemoryBackend;
pub use sqlite::SqliteBackend;
pub use traits::{BackendExt, PersistenceBackend};
