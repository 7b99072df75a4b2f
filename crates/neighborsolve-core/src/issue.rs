//! The issue record and the inputs that create and modify it.
//!
//! Field names serialize in the camelCase shape the browser client has always
//! written (`dateReported`, `estimatedCompletion`, ...), so snapshots stay
//! readable across implementations.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::types::IssueId;
use crate::validation::validate_submission;

/// Address recorded when the citizen leaves the address field empty.
pub const UNSPECIFIED_ADDRESS: &str = "Location not specified";

/// Generates the closed-enum boilerplate shared by kind, status and urgency:
/// lowercase wire names, `ALL`, `as_str`, `FromStr` and `Display`.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident { $($variant:ident => $wire:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The persisted lowercase name.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok($name::$variant),)+
                    other => Err(format!(concat!("unknown ", stringify!($name), " {:?}"), other)),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

wire_enum! {
    /// Problem category chosen by the citizen.
    pub enum IssueKind {
        Pothole => "pothole",
        Streetlight => "streetlight",
        Water => "water",
        Garbage => "garbage",
        Safety => "safety",
        Noise => "noise",
        Traffic => "traffic",
        Vandalism => "vandalism",
        Other => "other",
    }
}

wire_enum! {
    /// Operator-assigned lifecycle state.
    ///
    /// Any status may be set from any other; there is no transition table.
    pub enum IssueStatus {
        Reported => "reported",
        Progress => "progress",
        Resolved => "resolved",
    }
}

wire_enum! {
    /// Citizen-assigned priority. Fixed after creation.
    pub enum Urgency {
        Low => "low",
        Medium => "medium",
        High => "high",
        Emergency => "emergency",
    }
}

/// Where the problem is. `address` is display text only, never geocoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
    pub address: String,
}

impl Location {
    pub fn new(lat: f64, lng: f64, address: impl Into<String>) -> Self {
        Self {
            lat,
            lng,
            address: address.into(),
        }
    }
}

/// Contact details of the submitting citizen. Write-once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reporter {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl Reporter {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: None,
        }
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }
}

/// A single reported municipal problem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub id: IssueId,
    #[serde(rename = "type")]
    pub kind: IssueKind,
    pub description: String,
    pub location: Location,
    pub status: IssueStatus,
    pub urgency: Urgency,
    pub reporter: Reporter,
    pub date_reported: NaiveDate,
    pub upvotes: u32,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_completion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<NaiveDate>,
}

impl Issue {
    /// Turn a citizen submission into a fresh `reported` issue.
    ///
    /// `default_location` is used when the submission carries no location
    /// and is validated like a submitted one in that case.
    pub fn from_submission(
        id: IssueId,
        input: IssueInput,
        today: NaiveDate,
        default_location: &Location,
    ) -> Result<Self, ValidationError> {
        let (kind, urgency) = validate_submission(&input, default_location)?;

        let mut location = input
            .location
            .unwrap_or_else(|| default_location.clone());
        if location.address.trim().is_empty() {
            location.address = UNSPECIFIED_ADDRESS.to_string();
        }

        let mut reporter = input.reporter;
        if reporter.phone.as_deref().is_some_and(|p| p.trim().is_empty()) {
            reporter.phone = None;
        }

        Ok(Self {
            id,
            kind,
            description: input.description,
            location,
            status: IssueStatus::Reported,
            urgency,
            reporter,
            date_reported: today,
            upvotes: 0,
            department: None,
            notes: None,
            estimated_completion: None,
            last_updated: None,
        })
    }

    /// Add one community upvote.
    pub fn upvote(&mut self) {
        self.upvotes = self.upvotes.saturating_add(1);
    }

    /// Apply an operator update. Omitted fields are left untouched.
    pub fn apply_patch(&mut self, patch: IssuePatch, today: NaiveDate) {
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(notes) = patch.notes {
            self.notes = Some(notes);
        }
        if let Some(estimated) = patch.estimated_completion {
            self.estimated_completion = Some(estimated);
        }
        if let Some(department) = patch.department {
            self.department = Some(department);
        }
        self.last_updated = Some(today);
    }
}

/// A citizen submission from the report form.
///
/// `kind` and `urgency` are optional here because the form can be submitted
/// without a selection; [`validate_input`](crate::validate_input) rejects that.
#[derive(Debug, Clone, PartialEq)]
pub struct IssueInput {
    pub kind: Option<IssueKind>,
    pub description: String,
    pub urgency: Option<Urgency>,
    pub location: Option<Location>,
    pub reporter: Reporter,
}

impl IssueInput {
    pub fn new(
        kind: IssueKind,
        description: impl Into<String>,
        urgency: Urgency,
        reporter: Reporter,
    ) -> Self {
        Self {
            kind: Some(kind),
            description: description.into(),
            urgency: Some(urgency),
            location: None,
            reporter,
        }
    }

    pub fn location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }
}

impl Default for IssueInput {
    fn default() -> Self {
        Self {
            kind: None,
            description: String::new(),
            urgency: None,
            location: None,
            reporter: Reporter::new("", ""),
        }
    }
}

/// An operator update from the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssuePatch {
    pub status: Option<IssueStatus>,
    pub notes: Option<String>,
    pub estimated_completion: Option<String>,
    pub department: Option<String>,
}

impl IssuePatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(mut self, status: IssueStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn estimated_completion(mut self, estimated: impl Into<String>) -> Self {
        self.estimated_completion = Some(estimated.into());
        self
    }

    pub fn department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }
}
