//! # NeighborSolve
//!
//! The issue store behind NeighborSolve: citizens report municipal problems,
//! the community browses and upvotes them, and an operator triages them.
//!
//! ## Overview
//!
//! The [`IssueStore`] exclusively owns the collection of issues and mirrors it
//! to a key-value [`PersistenceBackend`](store::PersistenceBackend) after every
//! change:
//!
//! - **Reports**: validated submissions become `reported` issues with a
//!   `NS-<year>-<n>` tracking number
//! - **Feed**: filtered, insertion-ordered listings plus status counts
//! - **Community**: upvotes
//! - **Dashboard**: operator status/notes/department updates
//!
//! The first open of an empty backend seeds two demo issues.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use neighborsolve::{IssueStore, StoreConfig};
//! use neighborsolve::core::{IssueFilter, IssueInput, IssueKind, IssueStatus, Reporter, Urgency};
//! use neighborsolve::store::SqliteBackend;
//!
//! fn example() -> neighborsolve::Result<()> {
//!     let backend = SqliteBackend::open("neighborsolve.db")?;
//!     let store = IssueStore::open(backend, StoreConfig::default())?;
//!
//!     let issue = store.create(IssueInput::new(
//!         IssueKind::Pothole,
//!         "Deep pothole in the bike lane",
//!         Urgency::High,
//!         Reporter::new("Ana", "ana@example.com"),
//!     ))?;
//!     store.upvote(issue.id.as_str())?;
//!
//!     for issue in &store.list(IssueFilter::new().status(IssueStatus::Reported)) {
//!         println!("{} {}", issue.id, issue.description);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Re-exports
//!
//! - `neighborsolve::core` - Issue model, validation, filtering, snapshots
//! - `neighborsolve::store` - Persistence backends (SQLite, memory)

pub mod error;
pub mod issue_store;
pub mod map;
pub mod theme;

// Re-export component crates
pub use neighborsolve_core as core;
pub use neighborsolve_store as store;

// Re-export main types for convenience
pub use error::{IssueStoreError, Result};
pub use issue_store::{IssueStore, StoreConfig, DEFAULT_SNAPSHOT_KEY, DEFAULT_THEME_KEY};
pub use map::{Coordinates, MapWidget, PickSource};
pub use theme::Theme;

// Re-export commonly used core types
pub use neighborsolve_core::{
    Issue, IssueFilter, IssueId, IssueInput, IssueKind, IssueListing, IssuePatch, IssueStatus,
    Location, Reporter, StatusCounts, Urgency,
};
