//! Calendar source for report and update dates.

use chrono::{Datelike, NaiveDate, Utc};

/// Supplies "today" at day precision.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;

    /// The year used in newly generated tracking numbers.
    fn year(&self) -> i32 {
        self.today().year()
    }
}

/// Wall-clock date in UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// A clock pinned to one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl FixedClock {
    /// Pin to a calendar date. Returns `None` for impossible dates.
    pub fn ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock() {
        let clock = FixedClock::ymd(2025, 3, 9).unwrap();
        assert_eq!(clock.today().to_string(), "2025-03-09");
        assert_eq!(clock.year(), 2025);
        assert!(FixedClock::ymd(2025, 2, 30).is_none());
    }
}
