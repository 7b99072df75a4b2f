//! Strong type definitions for NeighborSolve.
//!
//! Tracking numbers are newtypes so an arbitrary string can never reach the
//! collection as an id without passing [`IssueId::parse`].

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::error::IdParseError;

const PREFIX: &str = "NS-";

/// Exclusive upper bound of the numeric part of a generated id.
pub const ID_NUMBER_SPACE: u32 = 10_000;

/// Years that fit the four-digit year field of a tracking number.
pub const ID_YEAR_RANGE: RangeInclusive<i32> = 1000..=9999;

/// A tracking number of the form `NS-<year>-<n>`.
///
/// `n` is zero-padded to at least three digits, so `NS-2024-007` and
/// `NS-2024-4821` are both valid.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IssueId(String);

impl IssueId {
    /// Build an id from its parts.
    pub fn new(year: i32, number: u32) -> Self {
        Self(format!("{PREFIX}{year}-{number:03}"))
    }

    /// Draw a random id for the given year.
    pub fn generate<R: Rng + ?Sized>(year: i32, rng: &mut R) -> Self {
        Self::new(year, rng.gen_range(0..ID_NUMBER_SPACE))
    }

    /// Parse and validate a tracking number.
    pub fn parse(s: &str) -> Result<Self, IdParseError> {
        let fail = |reason| IdParseError {
            input: s.to_string(),
            reason,
        };

        let rest = s.strip_prefix(PREFIX).ok_or_else(|| fail("missing NS- prefix"))?;
        let (year, number) = rest
            .split_once('-')
            .ok_or_else(|| fail("missing year separator"))?;

        if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
            return Err(fail("year must be four digits"));
        }
        if number.len() < 3 || !number.bytes().all(|b| b.is_ascii_digit()) {
            return Err(fail("number must be at least three digits"));
        }

        Ok(Self(s.to_string()))
    }

    /// The string form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The year component.
    pub fn year(&self) -> i32 {
        self.parts().0
    }

    /// The numeric component.
    pub fn number(&self) -> u32 {
        self.parts().1
    }

    // Only constructed through `new` or `parse`, both of which guarantee the shape.
    fn parts(&self) -> (i32, u32) {
        let rest = &self.0[PREFIX.len()..];
        let (year, number) = rest.split_once('-').unwrap_or((rest, "0"));
        (year.parse().unwrap_or(0), number.parse().unwrap_or(0))
    }
}

impl fmt::Debug for IssueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IssueId({})", self.0)
    }
}

impl fmt::Display for IssueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for IssueId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for IssueId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for IssueId {
    type Error = IdParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<IssueId> for String {
    fn from(id: IssueId) -> Self {
        id.0
    }
}

impl PartialEq<str> for IssueId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for IssueId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_issue_id_padding() {
        assert_eq!(IssueId::new(2024, 1).as_str(), "NS-2024-001");
        assert_eq!(IssueId::new(2024, 42).as_str(), "NS-2024-042");
        assert_eq!(IssueId::new(2025, 4821).as_str(), "NS-2025-4821");
    }

    #[test]
    fn test_issue_id_parts() {
        let id = IssueId::parse("NS-2024-015").unwrap();
        assert_eq!(id.year(), 2024);
        assert_eq!(id.number(), 15);
    }

    #[test]
    fn test_issue_id_rejects_malformed() {
        for bad in ["", "NS-", "XX-2024-001", "NS-24-001", "NS-2024-01", "NS-2024-0a1", "NS-2024"] {
            assert!(IssueId::parse(bad).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn test_generated_ids_parse() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let id = IssueId::generate(2026, &mut rng);
            let reparsed = IssueId::parse(id.as_str()).unwrap();
            assert_eq!(reparsed, id);
            assert!(id.number() < ID_NUMBER_SPACE);
        }
    }

    #[test]
    fn test_issue_id_serde_rejects_malformed() {
        let ok: IssueId = serde_json::from_str("\"NS-2024-001\"").unwrap();
        assert_eq!(ok, "NS-2024-001");
        assert!(serde_json::from_str::<IssueId>("\"ticket-1\"").is_err());
    }

    proptest! {
        #[test]
        fn test_issue_id_parts_survive_formatting(year in ID_YEAR_RANGE, n in 0u32..ID_NUMBER_SPACE) {
            let id = IssueId::new(year, n);
            let parsed: IssueId = id.as_str().parse().unwrap();
            prop_assert_eq!(parsed.year(), year);
            prop_assert_eq!(parsed.number(), n);
            prop_assert!(id.as_str().len() >= "NS-0000-000".len());
        }
    }
}
