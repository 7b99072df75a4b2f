//! The IssueStore: exclusive owner of the issue collection.
//!
//! The store keeps the collection in memory and mirrors it to a
//! [`PersistenceBackend`] as one snapshot. Every mutation builds the next
//! collection, persists it, and only then makes it visible, so a failed
//! write leaves the store exactly as it was.

use std::collections::HashSet;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use bytes::Bytes;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use neighborsolve_core::types::{ID_NUMBER_SPACE, ID_YEAR_RANGE};
use neighborsolve_core::{
    decode_snapshot, demo_issues, encode_snapshot, validate_location, validate_submission, Clock,
    Issue, IssueFilter, IssueId, IssueInput, IssueListing, IssuePatch, Location, StatusCounts,
    SystemClock, UNSPECIFIED_ADDRESS,
};
use neighborsolve_store::PersistenceBackend;

use crate::error::{IssueStoreError, Result};

/// Backend key holding the issue snapshot.
pub const DEFAULT_SNAPSHOT_KEY: &str = "neighborsolve_issues";

/// Backend key holding the theme preference.
pub const DEFAULT_THEME_KEY: &str = "theme";

/// Configuration for the IssueStore.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Key under which the snapshot is stored.
    pub snapshot_key: String,
    /// Key under which the theme preference is stored.
    pub theme_key: String,
    /// Seed the two demo issues when the backend has no snapshot.
    pub seed_demo_data: bool,
    /// Location recorded for submissions that carry none.
    pub default_location: Location,
    /// Fixed seed for id generation. `None` seeds from the OS.
    pub id_seed: Option<u64>,
    /// Random draws tried before scanning for a free id.
    pub max_id_attempts: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            snapshot_key: DEFAULT_SNAPSHOT_KEY.to_string(),
            theme_key: DEFAULT_THEME_KEY.to_string(),
            seed_demo_data: true,
            default_location: Location::new(40.7128, -74.0060, UNSPECIFIED_ADDRESS),
            id_seed: None,
            max_id_attempts: 64,
        }
    }
}

impl StoreConfig {
    pub fn with_snapshot_key(mut self, key: impl Into<String>) -> Self {
        self.snapshot_key = key.into();
        self
    }

    pub fn with_theme_key(mut self, key: impl Into<String>) -> Self {
        self.theme_key = key.into();
        self
    }

    pub fn with_demo_data(mut self, seed: bool) -> Self {
        self.seed_demo_data = seed;
        self
    }

    pub fn with_default_location(mut self, location: Location) -> Self {
        self.default_location = location;
        self
    }

    pub fn with_id_seed(mut self, seed: u64) -> Self {
        self.id_seed = Some(seed);
        self
    }

    pub fn with_max_id_attempts(mut self, attempts: u32) -> Self {
        self.max_id_attempts = attempts;
        self
    }
}

/// The issue store.
///
/// Provides:
/// - Loading (and first-run seeding) of the snapshot
/// - Citizen submissions
/// - Feed and dashboard queries
/// - Upvotes and operator updates
///
/// All operations are synchronous. The store is `Sync`; mutations serialize
/// on one write lock that is held across the backend write, so concurrent
/// upvotes never lose an increment.
pub struct IssueStore<B: PersistenceBackend> {
    pub(crate) backend: B,
    pub(crate) config: StoreConfig,
    clock: Box<dyn Clock>,
    state: RwLock<State>,
}

struct State {
    issues: Arc<Vec<Issue>>,
    rng: StdRng,
}

impl<B: PersistenceBackend> IssueStore<B> {
    /// Open a store on `backend` and load its snapshot.
    pub fn open(backend: B, config: StoreConfig) -> Result<Self> {
        Self::open_with_clock(backend, config, SystemClock)
    }

    /// Open a store with an explicit clock.
    ///
    /// Fails with `Validation` before touching the backend when the
    /// configured default location is not a usable coordinate pair.
    pub fn open_with_clock(
        backend: B,
        config: StoreConfig,
        clock: impl Clock + 'static,
    ) -> Result<Self> {
        validate_location(&config.default_location)?;

        let rng = match config.id_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let store = Self {
            backend,
            config,
            clock: Box::new(clock),
            state: RwLock::new(State {
                issues: Arc::new(Vec::new()),
                rng,
            }),
        };
        store.load()?;
        Ok(store)
    }

    /// The storage backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Loading
    // ─────────────────────────────────────────────────────────────────────────

    /// (Re)load the collection from the backend.
    ///
    /// An absent snapshot seeds the demo issues (when configured) and persists
    /// them. A snapshot that does not decode fails with `CorruptState` and
    /// leaves the in-memory collection untouched. Returns the issue count.
    pub fn load(&self) -> Result<usize> {
        let mut state = self.write_state();

        let issues = match self.backend.read(&self.config.snapshot_key)? {
            Some(bytes) => {
                let issues = decode_snapshot(&bytes).map_err(IssueStoreError::CorruptState)?;
                info!(count = issues.len(), key = %self.config.snapshot_key, "loaded issue snapshot");
                issues
            }
            None if self.config.seed_demo_data => {
                let demo = demo_issues();
                self.persist(&demo)?;
                info!(count = demo.len(), "seeded demo issues");
                demo
            }
            None => {
                debug!(key = %self.config.snapshot_key, "no snapshot, starting empty");
                Vec::new()
            }
        };

        let count = issues.len();
        state.issues = Arc::new(issues);
        Ok(count)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Submissions
    // ─────────────────────────────────────────────────────────────────────────

    /// File a citizen report.
    ///
    /// The new issue is `reported` with zero upvotes, no department, and
    /// today's date. Its tracking number carries the clock's year. A
    /// rejected submission draws no id.
    pub fn create(&self, input: IssueInput) -> Result<Issue> {
        validate_submission(&input, &self.config.default_location)?;

        let mut state = self.write_state();
        let today = self.clock.today();

        let id = self.next_id(&mut state, self.clock.year())?;
        let issue = Issue::from_submission(id, input, today, &self.config.default_location)?;

        let mut next = Vec::clone(&state.issues);
        next.push(issue.clone());
        self.persist(&next)?;
        state.issues = Arc::new(next);

        info!(id = %issue.id, kind = %issue.kind, urgency = %issue.urgency, "issue reported");
        Ok(issue)
    }

    fn next_id(&self, state: &mut State, year: i32) -> Result<IssueId> {
        if !ID_YEAR_RANGE.contains(&year) {
            return Err(IssueStoreError::YearOutOfRange { year });
        }

        let taken: HashSet<&IssueId> = state.issues.iter().map(|issue| &issue.id).collect();

        for attempt in 1..=self.config.max_id_attempts {
            let id = IssueId::generate(year, &mut state.rng);
            if !taken.contains(&id) {
                return Ok(id);
            }
            warn!(%id, attempt, "generated issue id already taken, retrying");
        }

        (0..ID_NUMBER_SPACE)
            .map(|n| IssueId::new(year, n))
            .find(|id| !taken.contains(id))
            .ok_or(IssueStoreError::IdSpaceExhausted { year })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────

    /// Look up an issue by its tracking number.
    pub fn find_by_id(&self, id: &str) -> Option<Issue> {
        self.read_state()
            .issues
            .iter()
            .find(|issue| issue.id.as_str() == id)
            .cloned()
    }

    /// Issues matching `filter`, in insertion order.
    ///
    /// The listing is taken from the current snapshot and is unaffected by
    /// later mutations.
    pub fn list(&self, filter: IssueFilter) -> IssueListing {
        IssueListing::new(Arc::clone(&self.read_state().issues), filter)
    }

    /// Every issue, in insertion order.
    pub fn list_all(&self) -> IssueListing {
        self.list(IssueFilter::new())
    }

    /// Totals per status over the whole collection.
    pub fn aggregate_counts(&self) -> StatusCounts {
        StatusCounts::tally(self.read_state().issues.iter())
    }

    pub fn len(&self) -> usize {
        self.read_state().issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Add one community upvote.
    pub fn upvote(&self, id: &str) -> Result<Issue> {
        let issue = self.mutate(id, Issue::upvote)?;
        debug!(id = %issue.id, upvotes = issue.upvotes, "issue upvoted");
        Ok(issue)
    }

    /// Apply an operator update and stamp `lastUpdated` with today's date.
    ///
    /// Any status may be set from any other.
    pub fn update(&self, id: &str, patch: IssuePatch) -> Result<Issue> {
        let today = self.clock.today();
        let issue = self.mutate(id, move |issue| issue.apply_patch(patch, today))?;
        info!(id = %issue.id, status = %issue.status, "issue updated");
        Ok(issue)
    }

    fn mutate(&self, id: &str, op: impl FnOnce(&mut Issue)) -> Result<Issue> {
        let mut state = self.write_state();

        let index = state
            .issues
            .iter()
            .position(|issue| issue.id.as_str() == id)
            .ok_or_else(|| IssueStoreError::NotFound { id: id.to_string() })?;

        let mut next = Vec::clone(&state.issues);
        op(&mut next[index]);
        let updated = next[index].clone();

        self.persist(&next)?;
        state.issues = Arc::new(next);
        Ok(updated)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Persistence
    // ─────────────────────────────────────────────────────────────────────────

    fn persist(&self, issues: &[Issue]) -> Result<()> {
        let bytes = encode_snapshot(issues).map_err(IssueStoreError::Encode)?;
        let len = bytes.len();
        self.backend
            .write(&self.config.snapshot_key, Bytes::from(bytes))?;
        debug!(key = %self.config.snapshot_key, issues = issues.len(), bytes = len, "persisted snapshot");
        Ok(())
    }

    // State is only ever replaced wholesale after a successful write, so a
    // guard recovered from a poisoned lock still holds a consistent snapshot.
    fn read_state(&self) -> RwLockReadGuard<'_, State> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, State> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}
