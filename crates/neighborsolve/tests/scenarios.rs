//! End-to-end scenarios against the public IssueStore API.

use std::sync::Arc;

use anyhow::Result;
use bytes::Bytes;
use neighborsolve::core::{FixedClock, IssueId};
use neighborsolve::store::{MemoryBackend, PersistenceBackend, SqliteBackend};
use neighborsolve::{
    IssueFilter, IssueInput, IssueKind, IssuePatch, IssueStatus, IssueStore, IssueStoreError,
    Location, Reporter, StatusCounts, StoreConfig, Theme, Urgency, DEFAULT_SNAPSHOT_KEY,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

fn clock() -> FixedClock {
    FixedClock::ymd(2025, 3, 9).expect("valid date")
}

fn config() -> StoreConfig {
    StoreConfig::default().with_id_seed(7)
}

fn report(kind: IssueKind, description: &str) -> IssueInput {
    IssueInput::new(
        kind,
        description,
        Urgency::Medium,
        Reporter::new("Sam", "sam@example.org"),
    )
    .location(Location::new(40.73, -73.99, "Bleecker St"))
}

#[test]
fn first_open_seeds_demo_issues() -> Result<()> {
    init_tracing();
    let store = IssueStore::open_with_clock(MemoryBackend::new(), config(), clock())?;

    assert_eq!(
        store.aggregate_counts(),
        StatusCounts {
            total: 2,
            reported: 0,
            progress: 1,
            resolved: 1,
        }
    );
    let ids: Vec<IssueId> = store.list_all().iter().map(|i| i.id.clone()).collect();
    assert_eq!(ids, ["NS-2024-001", "NS-2024-002"]);
    Ok(())
}

#[test]
fn submit_then_look_up() -> Result<()> {
    init_tracing();
    let store = IssueStore::open_with_clock(MemoryBackend::new(), config(), clock())?;

    let issue = store.create(report(IssueKind::Water, "Hydrant leaking since Monday"))?;
    assert!(issue.id.as_str().starts_with("NS-2025-"));
    assert_eq!(issue.status, IssueStatus::Reported);
    assert_eq!(issue.upvotes, 0);
    assert_eq!(issue.department, None);
    assert_eq!(issue.date_reported.to_string(), "2025-03-09");

    assert_eq!(store.find_by_id(issue.id.as_str()), Some(issue));
    assert_eq!(store.find_by_id("NS-2025-99999"), None);
    assert_eq!(store.aggregate_counts().reported, 1);
    Ok(())
}

#[test]
fn submission_without_location_uses_default() -> Result<()> {
    init_tracing();
    let store = IssueStore::open_with_clock(MemoryBackend::new(), config(), clock())?;

    let input = IssueInput::new(
        IssueKind::Noise,
        "Construction at 3am",
        Urgency::Low,
        Reporter::new("Lee", "lee@example.org").with_phone(""),
    );
    let issue = store.create(input)?;

    assert_eq!(issue.location.lat, 40.7128);
    assert_eq!(issue.location.lng, -74.0060);
    assert_eq!(issue.location.address, "Location not specified");
    assert_eq!(issue.reporter.phone, None);
    Ok(())
}

#[test]
fn rejected_submission_names_field() -> Result<()> {
    init_tracing();
    let store = IssueStore::open_with_clock(MemoryBackend::new(), config(), clock())?;

    let mut input = report(IssueKind::Other, "   ");
    input.reporter.name.clear();
    let err = store.create(input).unwrap_err();

    assert_eq!(err.invalid_field(), Some("description"));
    assert_eq!(store.len(), 2);
    Ok(())
}

#[test]
fn upvotes_accumulate() -> Result<()> {
    init_tracing();
    let store = IssueStore::open_with_clock(MemoryBackend::new(), config(), clock())?;

    for _ in 0..5 {
        store.upvote("NS-2024-002")?;
    }
    assert_eq!(store.find_by_id("NS-2024-002").map(|i| i.upvotes), Some(13));

    let before = store.list_all().to_vec();
    assert!(store.upvote("NS-2024-404").unwrap_err().is_not_found());
    assert_eq!(store.list_all().to_vec(), before);
    Ok(())
}

#[test]
fn update_touches_only_patched_fields() -> Result<()> {
    init_tracing();
    let store = IssueStore::open_with_clock(MemoryBackend::new(), config(), clock())?;
    let before = store.find_by_id("NS-2024-002").expect("demo issue");

    let after = store.update(
        "NS-2024-002",
        IssuePatch::new().status(IssueStatus::Reported),
    )?;

    assert_eq!(after.status, IssueStatus::Reported);
    assert_eq!(after.last_updated, Some(clock().0));

    let mut expected = before;
    expected.status = IssueStatus::Reported;
    expected.last_updated = Some(clock().0);
    assert_eq!(after, expected);
    Ok(())
}

#[test]
fn listing_filters_keep_insertion_order() -> Result<()> {
    init_tracing();
    let store = IssueStore::open_with_clock(
        MemoryBackend::new(),
        config().with_demo_data(false),
        clock(),
    )?;

    let a = store.create(report(IssueKind::Garbage, "Overflowing bins on Elm"))?;
    let b = store.create(report(IssueKind::Pothole, "Crater on Elm"))?;
    let c = store.create(report(IssueKind::Garbage, "Dumped mattress"))?;
    store.update(b.id.as_str(), IssuePatch::new().status(IssueStatus::Resolved))?;

    let reported: Vec<_> = store
        .list(IssueFilter::new().status(IssueStatus::Reported))
        .iter()
        .map(|i| i.id.clone())
        .collect();
    assert_eq!(reported, vec![a.id.clone(), c.id.clone()]);

    let elm = store.list(IssueFilter::new().search("ELM"));
    assert_eq!(elm.count(), 2);

    let garbage_on_elm = store.list(IssueFilter::new().search("elm").kind(IssueKind::Garbage));
    assert_eq!(garbage_on_elm.to_vec(), vec![store.find_by_id(a.id.as_str()).expect("a")]);

    assert!(store
        .list(IssueFilter::new().kind(IssueKind::Traffic))
        .is_empty());
    Ok(())
}

#[test]
fn restart_restores_collection() -> Result<()> {
    init_tracing();
    let backend = Arc::new(MemoryBackend::new());

    let (created, id) = {
        let store = IssueStore::open_with_clock(Arc::clone(&backend), config(), clock())?;
        let issue = store.create(report(IssueKind::Safety, "Broken railing"))?;
        store.upvote(issue.id.as_str())?;
        store.update(
            issue.id.as_str(),
            IssuePatch::new()
                .status(IssueStatus::Resolved)
                .notes("Railing welded back")
                .estimated_completion("2025-03-12")
                .department("parks"),
        )?;
        store.update("NS-2024-001", IssuePatch::new().status(IssueStatus::Reported))?;
        (store.list_all().to_vec(), issue.id)
    };

    let reopened = IssueStore::open_with_clock(Arc::clone(&backend), config(), clock())?;
    assert_eq!(reopened.list_all().to_vec(), created);

    let restored = reopened.find_by_id(id.as_str()).expect("restored issue");
    assert_eq!(restored.upvotes, 1);
    assert_eq!(restored.status, IssueStatus::Resolved);
    assert_eq!(restored.notes.as_deref(), Some("Railing welded back"));
    assert_eq!(restored.estimated_completion.as_deref(), Some("2025-03-12"));
    assert_eq!(restored.department.as_deref(), Some("parks"));
    assert_eq!(restored.last_updated, Some(clock().0));

    let demo = reopened.find_by_id("NS-2024-001").expect("demo issue");
    assert_eq!(demo.status, IssueStatus::Reported);
    assert_eq!(demo.department.as_deref(), Some("roads"));
    assert_eq!(reopened.aggregate_counts().resolved, 2);
    Ok(())
}

#[test]
fn reload_picks_up_writes_from_another_store() -> Result<()> {
    init_tracing();
    let backend = Arc::new(MemoryBackend::new());
    let first = IssueStore::open_with_clock(Arc::clone(&backend), config(), clock())?;
    let second = IssueStore::open_with_clock(Arc::clone(&backend), config(), clock())?;

    second.create(report(IssueKind::Traffic, "Signal stuck on red"))?;
    assert_eq!(first.len(), 2);

    assert_eq!(first.load()?, 3);
    assert_eq!(first.len(), 3);
    Ok(())
}

#[test]
fn sqlite_backend_round_trip() -> Result<()> {
    init_tracing();
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("neighborsolve.db");

    let id = {
        let store = IssueStore::open_with_clock(SqliteBackend::open(&path)?, config(), clock())?;
        store.set_theme(Theme::Dark)?;
        store.create(report(IssueKind::Vandalism, "Graffiti on the library"))?.id
    };

    let store = IssueStore::open_with_clock(SqliteBackend::open(&path)?, config(), clock())?;
    assert_eq!(store.len(), 3);
    assert_eq!(
        store.find_by_id(id.as_str()).map(|i| i.kind),
        Some(IssueKind::Vandalism)
    );
    assert_eq!(store.theme()?, Theme::Dark);
    Ok(())
}

#[test]
fn corrupt_snapshot_is_reported() {
    init_tracing();
    let backend = MemoryBackend::with_entries([(DEFAULT_SNAPSHOT_KEY, "not json")]);

    let result = IssueStore::open_with_clock(backend, config(), clock());
    assert!(matches!(result, Err(IssueStoreError::CorruptState(_))));
}

#[test]
fn duplicate_ids_in_snapshot_are_corrupt() -> Result<()> {
    init_tracing();
    let backend = Arc::new(MemoryBackend::new());
    {
        let store = IssueStore::open_with_clock(Arc::clone(&backend), config(), clock())?;
        let mut issues = store.list_all().to_vec();
        issues.push(issues[0].clone());
        backend.write(
            DEFAULT_SNAPSHOT_KEY,
            Bytes::from(neighborsolve::core::encode_snapshot(&issues)?),
        )?;
    }

    let result = IssueStore::open_with_clock(backend, config(), clock());
    assert!(matches!(result, Err(IssueStoreError::CorruptState(_))));
    Ok(())
}

#[test]
fn empty_store_without_demo_data_writes_nothing() -> Result<()> {
    init_tracing();
    let backend = Arc::new(MemoryBackend::new());
    let store =
        IssueStore::open_with_clock(Arc::clone(&backend), config().with_demo_data(false), clock())?;

    assert!(store.is_empty());
    assert!(backend.keys()?.is_empty());
    Ok(())
}

#[test]
fn custom_keys_are_honored() -> Result<()> {
    init_tracing();
    let backend = Arc::new(MemoryBackend::new());
    let store = IssueStore::open_with_clock(
        Arc::clone(&backend),
        config().with_snapshot_key("issues_v2").with_theme_key("ui_theme"),
        clock(),
    )?;
    store.toggle_theme()?;

    assert_eq!(backend.keys()?, vec!["issues_v2", "ui_theme"]);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_upvotes_are_not_lost() -> Result<()> {
    init_tracing();
    let store = Arc::new(IssueStore::open_with_clock(
        MemoryBackend::new(),
        config(),
        clock(),
    )?);

    let tasks: Vec<_> = (0..8)
        .map(|_| {
            let store = Arc::clone(&store);
            tokio::task::spawn_blocking(move || -> neighborsolve::Result<()> {
                for _ in 0..25 {
                    store.upvote("NS-2024-001")?;
                }
                Ok(())
            })
        })
        .collect();

    for task in tasks {
        task.await??;
    }

    assert_eq!(store.find_by_id("NS-2024-001").map(|i| i.upvotes), Some(15 + 200));
    Ok(())
}
