//! Error types for the issue store.

use neighborsolve_core::{SnapshotError, ValidationError};
use neighborsolve_store::StoreError;
use thiserror::Error;

/// Errors that can occur during IssueStore operations.
#[derive(Debug, Error)]
pub enum IssueStoreError {
    /// Submission rejected; names the first offending field.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// No issue with this id.
    #[error("issue not found: {id}")]
    NotFound { id: String },

    /// The persisted snapshot could not be read back.
    #[error("stored issue snapshot is corrupt: {0}")]
    CorruptState(#[source] SnapshotError),

    /// The collection could not be serialized.
    #[error("failed to encode issue snapshot: {0}")]
    Encode(#[source] SnapshotError),

    /// Persistence backend failure.
    #[error("storage error: {0}")]
    Backend(#[from] StoreError),

    /// Every tracking number for the year is taken.
    #[error("no free issue ids left for {year}")]
    IdSpaceExhausted { year: i32 },

    /// The clock's year does not fit a four-digit tracking number.
    #[error("year {year} cannot be encoded in an issue id")]
    YearOutOfRange { year: i32 },
}

impl IssueStoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, IssueStoreError::NotFound { .. })
    }

    /// The offending field, for validation errors.
    pub fn invalid_field(&self) -> Option<&'static str> {
        match self {
            IssueStoreError::Validation(e) => Some(e.field()),
            _ => None,
        }
    }
}

/// Result type for IssueStore operations.
pub type Result<T> = std::result::Result<T, IssueStoreError>;
