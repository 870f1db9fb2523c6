//! Geocoding search result and popup types.
//!
//! A [`SearchResult`] is the projection of one geocoder resource that the
//! search box keeps for its autocomplete list. A [`SearchPopup`] is the
//! marker intent emitted when the user confirms one of those results.

use serde::{Deserialize, Serialize};

/// A `[latitude, longitude]` pair in degrees.
pub type LatLng = [f64; 2];

/// Point geometry of a geocoder resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// `[latitude, longitude]` of the resolved place.
    pub coordinates: LatLng,
}

/// One place returned by the geocoder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Display name, also used as the autocomplete option value.
    pub name: String,
    /// Bounding box as `[south, west, north, east]` in the geocoder's order.
    pub bbox: [f64; 4],
    /// Representative point of the place.
    pub point: GeoPoint,
}

impl SearchResult {
    /// Coordinates a marker for this result is placed at.
    #[must_use]
    pub const fn coords(&self) -> LatLng {
        self.point.coordinates
    }
}

/// A popup the map shows after a search selection is confirmed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchPopup {
    /// Where the popup is anchored.
    pub coords: LatLng,
    /// Text shown inside the popup (the confirmed selection).
    pub content: String,
}

/// Resolves the coordinates for a confirmed selection.
///
/// Looks for a result whose name equals `selection` exactly (case-sensitive,
/// no normalization); without a match the first result wins. Returns `None`
/// only when `results` is empty.
#[must_use]
pub fn resolve_selection(results: &[SearchResult], selection: &str) -> Option<LatLng> {
    results
        .iter()
        .find(|result| result.name == selection)
        .or_else(|| results.first())
        .map(SearchResult::coords)
}
