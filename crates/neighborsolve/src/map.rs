//! Map capability consumed by the reporting, feed and detail views.
//!
//! The store never talks to a map. Views drive a [`MapWidget`] with the
//! helpers here, which fix the default viewport, popup text and the address
//! recorded for a picked location.

use std::fmt;

use neighborsolve_core::{Issue, Location};

/// A point on the map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<&Location> for Coordinates {
    fn from(location: &Location) -> Self {
        Self::new(location.lat, location.lng)
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.lat, self.lng)
    }
}

/// Initial viewport center (New York City).
pub const DEFAULT_CENTER: Coordinates = Coordinates::new(40.7128, -74.0060);

/// Initial zoom level.
pub const DEFAULT_ZOOM: u8 = 13;

/// Zoom level after centering on the device's position.
pub const LOCATE_ZOOM: u8 = 15;

/// Popup shown on a freshly clicked location.
pub const CLICK_POPUP: &str = "Selected location";

/// Popup shown on the device's position.
pub const GEOLOCATION_POPUP: &str = "Your current location";

/// A slippy map that can hold markers and report clicks.
///
/// Handles are opaque to the caller; implementations decide what a map or a
/// marker is.
pub trait MapWidget {
    type Map;
    type Marker;

    /// Create a map centered on `center`.
    fn create(&mut self, center: Coordinates, zoom: u8) -> Self::Map;

    /// Move an existing map's viewport.
    fn set_view(&mut self, map: &Self::Map, center: Coordinates, zoom: u8);

    /// Place a marker, optionally with popup text.
    fn add_marker(
        &mut self,
        map: &Self::Map,
        at: Coordinates,
        popup: Option<&str>,
    ) -> Self::Marker;

    /// Register a click handler.
    fn on_click(&mut self, map: &Self::Map, handler: Box<dyn FnMut(Coordinates) + Send>);

    fn remove_all_markers(&mut self, map: &Self::Map);
}

/// Open a map on the default viewport.
pub fn open_default<W: MapWidget>(widget: &mut W) -> W::Map {
    widget.create(DEFAULT_CENTER, DEFAULT_ZOOM)
}

/// Popup text for an issue on the feed map: kind, description, status.
pub fn issue_popup(issue: &Issue) -> String {
    format!(
        "{}\n{}\n{}",
        issue.kind.label(),
        issue.description,
        issue.status
    )
}

/// Replace every marker on `map` with one marker per issue.
pub fn plot_issues<'a, W: MapWidget>(
    widget: &mut W,
    map: &W::Map,
    issues: impl IntoIterator<Item = &'a Issue>,
) -> Vec<W::Marker> {
    widget.remove_all_markers(map);
    issues
        .into_iter()
        .map(|issue| {
            let popup = issue_popup(issue);
            widget.add_marker(map, Coordinates::from(&issue.location), Some(popup.as_str()))
        })
        .collect()
}

/// How the reporter chose a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickSource {
    /// Clicked on the map.
    Click,
    /// Asked the device for its position.
    Geolocation,
}

impl PickSource {
    fn popup(self) -> &'static str {
        match self {
            PickSource::Click => CLICK_POPUP,
            PickSource::Geolocation => GEOLOCATION_POPUP,
        }
    }
}

/// The submission location for a picked point.
pub fn picked_location(source: PickSource, at: Coordinates) -> Location {
    let address = match source {
        PickSource::Click => at.to_string(),
        PickSource::Geolocation => format!("Current Location: {at}"),
    };
    Location::new(at.lat, at.lng, address)
}

/// Mark a picked point on the report map and return its location.
///
/// Geolocation also recenters the map at [`LOCATE_ZOOM`]. Any previous pick
/// is cleared first so the map shows one marker.
pub fn pick_location<W: MapWidget>(
    widget: &mut W,
    map: &W::Map,
    source: PickSource,
    at: Coordinates,
) -> Location {
    if source == PickSource::Geolocation {
        widget.set_view(map, at, LOCATE_ZOOM);
    }
    widget.remove_all_markers(map);
    widget.add_marker(map, at, Some(source.popup()));
    picked_location(source, at)
}

/// Open a detail map centered on one issue with a single marker.
pub fn show_issue<W: MapWidget>(widget: &mut W, issue: &Issue) -> (W::Map, W::Marker) {
    let at = Coordinates::from(&issue.location);
    let map = widget.create(at, DEFAULT_ZOOM);
    let marker = widget.add_marker(&map, at, Some(issue.description.as_str()));
    (map, marker)
}
