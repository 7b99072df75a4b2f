//! Submission validation.

use crate::error::ValidationError;
use crate::issue::{IssueInput, IssueKind, Location, Urgency};

/// Validate a citizen submission.
///
/// Checks run in form order and stop at the first failure:
/// 1. `type` selected
/// 2. `description` not blank
/// 3. `urgency` selected
/// 4. `reporter.name` not blank
/// 5. `reporter.email` not blank and contains `@`
/// 6. `location.lat` / `location.lng` finite and in range, when a location is given
///
/// Returns the selected kind and urgency.
pub fn validate_input(input: &IssueInput) -> Result<(IssueKind, Urgency), ValidationError> {
    let kind = input.kind.ok_or(ValidationError::Missing("type"))?;

    if input.description.trim().is_empty() {
        return Err(ValidationError::Missing("description"));
    }

    let urgency = input.urgency.ok_or(ValidationError::Missing("urgency"))?;

    if input.reporter.name.trim().is_empty() {
        return Err(ValidationError::Missing("reporter.name"));
    }

    let email = input.reporter.email.trim();
    if email.is_empty() {
        return Err(ValidationError::Missing("reporter.email"));
    }
    if !email.contains('@') {
        return Err(ValidationError::Invalid {
            field: "reporter.email",
            reason: "expected an address containing '@'".into(),
        });
    }

    if let Some(location) = &input.location {
        validate_location(location)?;
    }

    Ok((kind, urgency))
}

/// Validate a submission together with the location it will be filed at.
///
/// A submission without a location is filed at `default_location`, which
/// must then pass the same coordinate checks.
pub fn validate_submission(
    input: &IssueInput,
    default_location: &Location,
) -> Result<(IssueKind, Urgency), ValidationError> {
    let selected = validate_input(input)?;
    if input.location.is_none() {
        validate_location(default_location)?;
    }
    Ok(selected)
}

/// Check that both coordinates are finite and in range.
pub fn validate_location(location: &Location) -> Result<(), ValidationError> {
    check_coordinate("location.lat", location.lat, 90.0)?;
    check_coordinate("location.lng", location.lng, 180.0)
}

fn check_coordinate(field: &'static str, value: f64, bound: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::Invalid {
            field,
            reason: "not a finite number".into(),
        });
    }
    if value.abs() > bound {
        return Err(ValidationError::Invalid {
            field,
            reason: format!("{value} is outside [-{bound}, {bound}]"),
        });
    }
    Ok(())
}
