//! Presentation mappings for views.
//!
//! Views sometimes hold raw strings (query parameters, legacy markup) rather
//! than parsed enums. The `*_for` functions map those strings and fall back to
//! a neutral value for anything unrecognized.

use chrono::NaiveDate;

use crate::issue::{IssueKind, IssueStatus, Urgency};

/// Icon shown for an unrecognized category.
pub const FALLBACK_ICON: &str = "fas fa-exclamation-circle";

/// Badge colour for an unrecognized status.
pub const FALLBACK_STATUS_COLOR: &str = "secondary";

impl IssueKind {
    pub const fn icon(self) -> &'static str {
        match self {
            IssueKind::Pothole => "fas fa-road",
            IssueKind::Streetlight => "fas fa-lightbulb",
            IssueKind::Water => "fas fa-tint",
            IssueKind::Garbage => "fas fa-trash",
            IssueKind::Safety => "fas fa-shield-alt",
            IssueKind::Noise => "fas fa-volume-up",
            IssueKind::Traffic => "fas fa-car",
            IssueKind::Vandalism => "fas fa-hammer",
            IssueKind::Other => FALLBACK_ICON,
        }
    }

    /// Title-cased name, e.g. `Streetlight`.
    pub fn label(self) -> String {
        capitalize(self.as_str())
    }

    /// Card heading, e.g. `Pothole Issue`.
    pub fn headline(self) -> String {
        format!("{} Issue", self.label())
    }
}

impl IssueStatus {
    pub const fn badge_color(self) -> &'static str {
        match self {
            IssueStatus::Reported => "danger",
            IssueStatus::Progress => "warning",
            IssueStatus::Resolved => "success",
        }
    }

    pub fn label(self) -> String {
        capitalize(self.as_str())
    }
}

impl Urgency {
    pub const fn badge_color(self) -> &'static str {
        match self {
            Urgency::Emergency => "danger",
            Urgency::High => "warning",
            Urgency::Medium | Urgency::Low => "info",
        }
    }
}

/// Icon for a raw category string.
pub fn icon_for(raw: &str) -> &'static str {
    raw.parse::<IssueKind>()
        .map(IssueKind::icon)
        .unwrap_or(FALLBACK_ICON)
}

/// Badge colour for a raw status string.
pub fn status_color_for(raw: &str) -> &'static str {
    raw.parse::<IssueStatus>()
        .map(IssueStatus::badge_color)
        .unwrap_or(FALLBACK_STATUS_COLOR)
}

/// Human date as shown on cards: `Nov 25, 2024`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
