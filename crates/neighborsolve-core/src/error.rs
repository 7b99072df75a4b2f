//! Error types for NeighborSolve Core.

use thiserror::Error;

use crate::types::IssueId;

/// A submission that cannot become an issue.
///
/// Validation stops at the first offending field; [`ValidationError::field`]
/// names it using the persisted field path (`reporter.email`, `location.lat`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing required field: {0}")]
    Missing(&'static str),

    #[error("invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ValidationError {
    /// The field that failed validation.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::Missing(field) => field,
            ValidationError::Invalid { field, .. } => field,
        }
    }
}

/// A persisted snapshot that cannot be trusted.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("malformed snapshot: {0}")]
    Malformed(#[source] serde_json::Error),

    #[error("snapshot contains duplicate issue id {0}")]
    DuplicateId(IssueId),

    #[error("failed to encode snapshot: {0}")]
    Encode(#[source] serde_json::Error),
}

/// A string that is not an `NS-<year>-<n>` tracking number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid issue id {input:?}: {reason}")]
pub struct IdParseError {
    pub input: String,
    pub reason: &'static str,
}
