//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use std::sync::Arc;

use neighborsolve::{IssueStore, Result, StoreConfig};
use neighborsolve_core::{FixedClock, IssueInput, IssueKind, Location, Reporter, Urgency};
use neighborsolve_store::MemoryBackend;

/// Seed used for id generation in fixtures.
pub const FIXTURE_ID_SEED: u64 = 0x5eed;

/// A shared memory backend plus a pinned clock.
///
/// Every store opened from the same fixture sees the same storage, which is
/// how tests model a page reload or a second tab.
pub struct TestFixture {
    pub backend: Arc<MemoryBackend>,
    pub clock: FixedClock,
    pub config: StoreConfig,
}

impl TestFixture {
    /// Fixture pinned to 2025-01-15 with demo seeding on.
    pub fn new() -> Self {
        Self::on(2025, 1, 15)
    }

    /// Fixture pinned to a given date.
    ///
    /// # Panics
    ///
    /// Panics on an impossible calendar date.
    pub fn on(year: i32, month: u32, day: u32) -> Self {
        Self {
            backend: Arc::new(MemoryBackend::new()),
            clock: FixedClock::ymd(year, month, day).expect("valid fixture date"),
            config: StoreConfig::default().with_id_seed(FIXTURE_ID_SEED),
        }
    }

    /// Start with an empty collection instead of the demo issues.
    pub fn without_demo_data(mut self) -> Self {
        self.config = self.config.with_demo_data(false);
        self
    }

    /// Open a store over the fixture's backend.
    pub fn open(&self) -> Result<IssueStore<Arc<MemoryBackend>>> {
        IssueStore::open_with_clock(Arc::clone(&self.backend), self.config.clone(), self.clock)
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// A valid submission of the given kind.
pub fn sample_input(kind: IssueKind, description: &str) -> IssueInput {
    IssueInput::new(
        kind,
        description,
        Urgency::Medium,
        Reporter::new("Test Reporter", "reporter@example.com").with_phone("555-0100"),
    )
    .location(Location::new(40.7306, -73.9866, "E 14th St & 1st Ave"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_reopen_shares_storage() {
        let fixture = TestFixture::new();
        let store = fixture.open().unwrap();
        let issue = store
            .create(sample_input(IssueKind::Streetlight, "Flickering lamp"))
            .unwrap();

        let reopened = fixture.open().unwrap();
        assert_eq!(reopened.find_by_id(issue.id.as_str()), Some(issue));
    }

    #[test]
    fn test_fixture_dates_issues() {
        let fixture = TestFixture::on(2026, 2, 28).without_demo_data();
        let store = fixture.open().unwrap();
        let issue = store.create(sample_input(IssueKind::Other, "Loose manhole")).unwrap();

        assert_eq!(issue.id.year(), 2026);
        assert_eq!(issue.date_reported, fixture.clock.0);
        assert_eq!(store.len(), 1);
    }
}
