//! Map view initialisation settings and base tile constants.

use super::search::LatLng;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Base tile URL template, CARTO dark basemap without labels.
pub const TILE_URL_TEMPLATE: &str = "https://{s}.basemaps.cartocdn.com/dark_nolabels/{z}/{x}/{y}{r}.png";

/// Attribution shown with the base tiles.
pub const TILE_ATTRIBUTION: &str =
    "<a href='https://www.antievictionmap.com/' target='_blank'>Anti-Eviction Mapping Project</a>";

/// Smallest zoom level the view can be zoomed out to.
pub const DEFAULT_MIN_ZOOM: u8 = 3;

/// The `[map]` configuration section.
///
/// ```toml
/// [map]
/// lat = 37.77
/// lng = -122.42
/// z = 10
/// bounds = [[-85.0, -180.0], [85.0, 180.0]]
///
/// [map.overlays]
/// actions = true
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Initial center latitude.
    pub lat: f64,
    /// Initial center longitude.
    pub lng: f64,
    /// Initial zoom level.
    pub z: u8,
    /// Minimum zoom level.
    pub min_zoom: u8,
    /// Maximum bounds as `[south_west, north_east]`; `None` leaves the view
    /// unbounded.
    pub bounds: Option<[LatLng; 2]>,
    /// Initial checked state of each overlay, by layer key. Layers not listed
    /// start unchecked.
    pub overlays: BTreeMap<String, bool>,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            lat: 39.83,
            lng: -98.58,
            z: 4,
            min_zoom: DEFAULT_MIN_ZOOM,
            bounds: Some([[-85.0, -180.0], [85.0, 180.0]]),
            overlays: BTreeMap::new(),
        }
    }
}

impl MapConfig {
    /// Initial view center.
    #[must_use]
    pub const fn center(&self) -> LatLng {
        [self.lat, self.lng]
    }

    /// Whether the overlay with `key` starts checked.
    #[must_use]
    pub fn overlay_enabled(&self, key: &str) -> bool {
        self.overlays.get(key).copied() == Some(true)
    }
}
