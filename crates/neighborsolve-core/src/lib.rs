//! # NeighborSolve Core
//!
//! Pure primitives for NeighborSolve: issue records, submission validation,
//! feed filtering, and the snapshot encoding shared by every backend.
//!
//! This crate contains no I/O, no storage, no locking. It is pure computation
//! over the issue data model.
//!
//! ## Key Types
//!
//! - [`Issue`] - A single reported municipal problem
//! - [`IssueId`] - The `NS-<year>-<n>` tracking number
//! - [`IssueInput`] - A citizen submission, validated by [`validate_input`]
//! - [`IssuePatch`] - An operator update with partial-patch semantics
//! - [`IssueFilter`] / [`IssueListing`] - Feed and dashboard queries
//! - [`StatusCounts`] - Aggregate counters shown on the feed and dashboard
//!
//! ## Snapshots
//!
//! The whole collection is stored as one JSON array. See [`snapshot`].

pub mod clock;
pub mod display;
pub mod error;
pub mod filter;
pub mod issue;
pub mod snapshot;
pub mod types;
pub mod validation;

pub use clock::{Clock, FixedClock, SystemClock};
pub use display::{format_date, icon_for, status_color_for, FALLBACK_ICON, FALLBACK_STATUS_COLOR};
pub use error::{IdParseError, SnapshotError, ValidationError};
pub use filter::{IssueFilter, IssueListing, ListingIter, StatusCounts};
pub use issue::{
    Issue, IssueInput, IssueKind, IssuePatch, IssueStatus, Location, Reporter, Urgency,
    UNSPECIFIED_ADDRESS,
};
pub use snapshot::{decode_snapshot, demo_issues, encode_snapshot};
pub use types::IssueId;
pub use validation::{validate_input, validate_location, validate_submission};
