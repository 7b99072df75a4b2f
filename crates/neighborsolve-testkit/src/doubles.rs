//! Test doubles for the store's collaborators.

use std::io;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use bytes::Bytes;

use neighborsolve::map::{Coordinates, MapWidget};
use neighborsolve_store::{MemoryBackend, PersistenceBackend, Result, StoreError};

/// Memory backend that counts reads and writes.
#[derive(Debug, Default)]
pub struct CountingBackend {
    inner: MemoryBackend,
    reads: AtomicUsize,
    writes: AtomicUsize,
}

impl CountingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn inner(&self) -> &MemoryBackend {
        &self.inner
    }
}

impl PersistenceBackend for CountingBackend {
    fn read(&self, key: &str) -> Result<Option<Bytes>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.inner.read(key)
    }

    fn write(&self, key: &str, value: Bytes) -> Result<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.write(key, value)
    }
}

/// Memory backend whose writes can be switched to fail, like a full quota.
#[derive(Debug, Default)]
pub struct FailingBackend {
    inner: MemoryBackend,
    failing: AtomicBool,
}

impl FailingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write fail (or succeed again).
    pub fn fail_writes(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn inner(&self) -> &MemoryBackend {
        &self.inner
    }
}

impl PersistenceBackend for FailingBackend {
    fn read(&self, key: &str) -> Result<Option<Bytes>> {
        self.inner.read(key)
    }

    fn write(&self, key: &str, value: Bytes) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Io(io::Error::other("storage quota exceeded")));
        }
        self.inner.write(key, value)
    }
}

/// One call made against a [`RecordingMap`].
#[derive(Debug, Clone, PartialEq)]
pub enum MapCall {
    Create { center: Coordinates, zoom: u8 },
    SetView { map: usize, center: Coordinates, zoom: u8 },
    AddMarker { map: usize, at: Coordinates, popup: Option<String> },
    OnClick { map: usize },
    RemoveAllMarkers { map: usize },
}

type ClickHandler = Box<dyn FnMut(Coordinates) + Send>;

/// A [`MapWidget`] that records every call and lets tests fire clicks.
///
/// Maps and markers are plain indices.
#[derive(Default)]
pub struct RecordingMap {
    pub calls: Vec<MapCall>,
    maps: usize,
    markers: Vec<(usize, Coordinates)>,
    handlers: Vec<(usize, ClickHandler)>,
}

impl RecordingMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Markers currently on `map`.
    pub fn markers_on(&self, map: usize) -> Vec<Coordinates> {
        self.markers
            .iter()
            .filter(|(m, _)| *m == map)
            .map(|(_, at)| *at)
            .collect()
    }

    /// Deliver a click to every handler registered on `map`.
    pub fn click(&mut self, map: usize, at: Coordinates) {
        for (m, handler) in &mut self.handlers {
            if *m == map {
                handler(at);
            }
        }
    }
}

impl MapWidget for RecordingMap {
    type Map = usize;
    type Marker = usize;

    fn create(&mut self, center: Coordinates, zoom: u8) -> usize {
        self.calls.push(MapCall::Create { center, zoom });
        self.maps += 1;
        self.maps - 1
    }

    fn set_view(&mut self, map: &usize, center: Coordinates, zoom: u8) {
        self.calls.push(MapCall::SetView {
            map: *map,
            center,
            zoom,
        });
    }

    fn add_marker(&mut self, map: &usize, at: Coordinates, popup: Option<&str>) -> usize {
        self.calls.push(MapCall::AddMarker {
            map: *map,
            at,
            popup: popup.map(str::to_string),
        });
        self.markers.push((*map, at));
        self.markers.len() - 1
    }

    fn on_click(&mut self, map: &usize, handler: ClickHandler) {
        self.calls.push(MapCall::OnClick { map: *map });
        self.handlers.push((*map, handler));
    }

    fn remove_all_markers(&mut self, map: &usize) {
        self.calls.push(MapCall::RemoveAllMarkers { map: *map });
        self.markers.retain(|(m, _)| m != map);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::sample_input;
    use neighborsolve::map::{pick_location, plot_issues, PickSource, DEFAULT_CENTER};
    use neighborsolve::{IssueStore, IssueStoreError, StoreConfig, DEFAULT_SNAPSHOT_KEY};
    use neighborsolve_core::{decode_snapshot, demo_issues, IssueKind, IssuePatch, IssueStatus};
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_counting_backend_sees_one_write_per_mutation() {
        let store = IssueStore::open(CountingBackend::new(), StoreConfig::default()).unwrap();
        assert_eq!(store.backend().writes(), 1);
        assert_eq!(store.backend().reads(), 1);

        let issue = store.create(sample_input(IssueKind::Pothole, "Deep pothole")).unwrap();
        assert_eq!(store.backend().writes(), 2);

        store.upvote(issue.id.as_str()).unwrap();
        assert_eq!(store.backend().writes(), 3);

        store
            .update(issue.id.as_str(), IssuePatch::new().status(IssueStatus::Progress))
            .unwrap();
        assert_eq!(store.backend().writes(), 4);

        store.find_by_id(issue.id.as_str());
        store.list_all().count();
        store.aggregate_counts();
        assert_eq!(store.backend().writes(), 4);
        assert_eq!(store.backend().reads(), 1);

        let stored = store.backend().inner().read(DEFAULT_SNAPSHOT_KEY).unwrap().unwrap();
        assert_eq!(decode_snapshot(&stored).unwrap(), store.list_all().to_vec());
    }

    #[test]
    fn test_rejected_and_missing_writes_nothing() {
        let store = IssueStore::open(CountingBackend::new(), StoreConfig::default()).unwrap();

        let mut input = sample_input(IssueKind::Noise, "Leaf blowers at dawn");
        input.reporter.email.clear();
        assert!(store.create(input).is_err());
        assert!(store.upvote("NS-1999-999").unwrap_err().is_not_found());

        assert_eq!(store.backend().writes(), 1);
    }

    #[test]
    fn test_failing_backend_leaves_store_unchanged() {
        let store = IssueStore::open(FailingBackend::new(), StoreConfig::default()).unwrap();
        let before = store.backend().inner().read(DEFAULT_SNAPSHOT_KEY).unwrap();
        store.backend().fail_writes(true);

        let err = store.upvote("NS-2024-001").unwrap_err();
        assert!(matches!(err, IssueStoreError::Backend(StoreError::Io(_))));
        assert!(matches!(
            store.create(sample_input(IssueKind::Water, "Main break")),
            Err(IssueStoreError::Backend(_))
        ));
        assert_eq!(store.len(), 2);
        assert_eq!(store.find_by_id("NS-2024-001").unwrap().upvotes, 15);
        assert_eq!(store.backend().inner().read(DEFAULT_SNAPSHOT_KEY).unwrap(), before);

        store.backend().fail_writes(false);
        assert_eq!(store.upvote("NS-2024-001").unwrap().upvotes, 16);
    }

    #[test]
    fn test_failing_backend_blocks_first_seed() {
        let backend = Arc::new(FailingBackend::new());
        backend.fail_writes(true);
        assert!(IssueStore::open(Arc::clone(&backend), StoreConfig::default()).is_err());
        assert!(backend.inner().keys().unwrap().is_empty());
    }

    #[test]
    fn test_recording_map_replots() {
        let mut widget = RecordingMap::new();
        let map = widget.create(DEFAULT_CENTER, 13);
        let issues = demo_issues();

        plot_issues(&mut widget, &map, &issues);
        plot_issues(&mut widget, &map, &issues);
        assert_eq!(widget.markers_on(map).len(), 2);

        let clears = widget
            .calls
            .iter()
            .filter(|call| matches!(call, MapCall::RemoveAllMarkers { map: 0 }))
            .count();
        assert_eq!(clears, 2);
        assert_eq!(widget.calls[0], MapCall::Create { center: DEFAULT_CENTER, zoom: 13 });
        assert!(matches!(
            widget.calls.last(),
            Some(MapCall::AddMarker { map: 0, popup: Some(_), .. })
        ));
    }

    #[test]
    fn test_click_handler_drives_pick() {
        let mut widget = RecordingMap::new();
        let map = widget.create(DEFAULT_CENTER, 13);

        let picked = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&picked);
        widget.on_click(
            &map,
            Box::new(move |at| sink.lock().unwrap().push(at)),
        );

        let at = Coordinates::new(40.7, -74.01);
        widget.click(map, at);
        let clicked = picked.lock().unwrap()[0];
        let location = pick_location(&mut widget, &map, PickSource::Click, clicked);

        assert_eq!(location.address, "40.700000, -74.010000");
        assert_eq!(widget.markers_on(map), vec![at]);
        assert_eq!(widget.calls[1], MapCall::OnClick { map });
    }
}
