//! Snapshot encoding: the whole collection as one JSON array.
//!
//! There is no incremental format and no log. Every mutation rewrites the
//! snapshot, and loading a snapshot replaces the in-memory collection.

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::error::SnapshotError;
use crate::issue::{Issue, IssueKind, IssueStatus, Location, Reporter, Urgency};
use crate::types::IssueId;

/// Encode the collection in insertion order.
pub fn encode_snapshot(issues: &[Issue]) -> Result<Vec<u8>, SnapshotError> {
    serde_json::to_vec(issues).map_err(SnapshotError::Encode)
}

/// Decode a stored snapshot.
///
/// Fails if the bytes are not a JSON array of issues or if two records share
/// an id. Nothing is repaired or dropped.
pub fn decode_snapshot(bytes: &[u8]) -> Result<Vec<Issue>, SnapshotError> {
    let issues: Vec<Issue> = serde_json::from_slice(bytes).map_err(SnapshotError::Malformed)?;

    let mut seen = HashSet::with_capacity(issues.len());
    for issue in &issues {
        if !seen.insert(&issue.id) {
            return Err(SnapshotError::DuplicateId(issue.id.clone()));
        }
    }

    Ok(issues)
}

/// The two records a brand-new installation starts with.
pub fn demo_issues() -> Vec<Issue> {
    vec![
        Issue {
            id: IssueId::new(2024, 1),
            kind: IssueKind::Pothole,
            description: "Large pothole on Main Street causing damage to vehicles".into(),
            location: Location::new(40.7128, -74.0060, "Main Street & 1st Ave"),
            status: IssueStatus::Progress,
            urgency: Urgency::High,
            reporter: Reporter::new("John Doe", "john@example.com"),
            date_reported: demo_date(2024, 11, 25),
            upvotes: 15,
            department: Some("roads".into()),
            notes: None,
            estimated_completion: None,
            last_updated: None,
        },
        Issue {
            id: IssueId::new(2024, 2),
            kind: IssueKind::Streetlight,
            description: "Streetlight out at park entrance, safety concern".into(),
            location: Location::new(40.7580, -73.9855, "Central Park Entrance"),
            status: IssueStatus::Resolved,
            urgency: Urgency::Medium,
            reporter: Reporter::new("Jane Smith", "jane@example.com"),
            date_reported: demo_date(2024, 11, 20),
            upvotes: 8,
            department: Some("utilities".into()),
            notes: None,
            estimated_completion: None,
            last_updated: None,
        },
    ]
}

fn demo_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}
