//! Proptest generators for property-based testing.

use proptest::prelude::*;

use neighborsolve_core::{
    IssueFilter, IssueInput, IssueKind, IssuePatch, IssueStatus, Location, Reporter, Urgency,
};

/// Generate an IssueKind.
pub fn issue_kind() -> impl Strategy<Value = IssueKind> {
    prop::sample::select(IssueKind::ALL)
}

/// Generate an IssueStatus.
pub fn issue_status() -> impl Strategy<Value = IssueStatus> {
    prop::sample::select(IssueStatus::ALL)
}

/// Generate an Urgency.
pub fn urgency() -> impl Strategy<Value = Urgency> {
    prop::sample::select(Urgency::ALL)
}

/// Generate a non-blank free-text description.
pub fn description() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9 ,.]{0,60}".prop_map(String::from)
}

/// Generate an in-range location.
pub fn location() -> impl Strategy<Value = Location> {
    (-90.0f64..=90.0, -180.0f64..=180.0, "[A-Za-z0-9 &]{0,24}")
        .prop_map(|(lat, lng, address)| Location::new(lat, lng, address))
}

/// Generate a reporter with a plausible email.
pub fn reporter() -> impl Strategy<Value = Reporter> {
    (
        "[A-Z][a-z]{1,10}",
        "[a-z]{1,8}@[a-z]{1,8}\\.(com|org|net)",
        prop::option::of("[0-9]{3}-[0-9]{4}"),
    )
        .prop_map(|(name, email, phone)| {
            let reporter = Reporter::new(name, email);
            match phone {
                Some(phone) => reporter.with_phone(phone),
                None => reporter,
            }
        })
}

/// Generate a submission that passes validation.
pub fn valid_input() -> impl Strategy<Value = IssueInput> {
    (
        issue_kind(),
        description(),
        urgency(),
        prop::option::of(location()),
        reporter(),
    )
        .prop_map(|(kind, description, urgency, location, reporter)| {
            let input = IssueInput::new(kind, description, urgency, reporter);
            match location {
                Some(location) => input.location(location),
                None => input,
            }
        })
}

/// Generate an operator update, possibly empty.
pub fn issue_patch() -> impl Strategy<Value = IssuePatch> {
    (
        prop::option::of(issue_status()),
        prop::option::of("[a-z ]{0,20}"),
        prop::option::of("20[0-9]{2}-[01][0-9]-[0-3][0-9]"),
        prop::option::of("(roads|utilities|sanitation|parks)"),
    )
        .prop_map(|(status, notes, estimated, department)| {
            let mut patch = IssuePatch::new();
            if let Some(status) = status {
                patch = patch.status(status);
            }
            if let Some(notes) = notes {
                patch = patch.notes(notes);
            }
            if let Some(estimated) = estimated {
                patch = patch.estimated_completion(estimated);
            }
            if let Some(department) = department {
                patch = patch.department(department);
            }
            patch
        })
}

/// Raw feed-filter criteria: search term, kind, status.
pub type FilterCriteria = (Option<String>, Option<IssueKind>, Option<IssueStatus>);

/// Generate filter criteria. Search terms are short so they sometimes match.
pub fn filter_criteria() -> impl Strategy<Value = FilterCriteria> {
    (
        prop::option::of("[a-eA-E ]{1,2}"),
        prop::option::of(issue_kind()),
        prop::option::of(issue_status()),
    )
}

/// Build the feed filter for a set of criteria.
pub fn filter_from(criteria: &FilterCriteria) -> IssueFilter {
    let (search, kind, status) = criteria;
    let mut filter = IssueFilter::new();
    if let Some(search) = search {
        filter = filter.search(search);
    }
    if let Some(kind) = kind {
        filter = filter.kind(*kind);
    }
    if let Some(status) = status {
        filter = filter.status(*status);
    }
    filter
}
