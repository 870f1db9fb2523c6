//! View model types representing a renderable map scene.
//!
//! A [`MapScene`] is what a mapping library would be handed: view
//! initialisation, the base tile layer, and (once data has loaded) the
//! route-dependent content. It is computed by
//! [`AppState::compute_viewmodel`](crate::app::AppState::compute_viewmodel)
//! and holds no behaviour of its own.

use crate::domain::{LatLng, LayerStyle, PointSymbol};

/// Complete scene for one render.
#[derive(Debug, Clone, PartialEq)]
pub struct MapScene {
    /// Current route path.
    pub route: String,
    /// Initial view center.
    pub center: LatLng,
    /// Initial zoom level.
    pub zoom: u8,
    /// Minimum zoom level.
    pub min_zoom: u8,
    /// Maximum view bounds.
    pub max_bounds: Option<[LatLng; 2]>,
    /// Base tile layer, always present.
    pub tiles: TileLayerView,
    /// Everything drawn over the tiles. `None` until every layer slot has
    /// resolved.
    pub content: Option<MapContent>,
}

/// Base tile layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileLayerView {
    /// Tile URL template.
    pub url_template: &'static str,
    /// Attribution markup.
    pub attribution: &'static str,
}

/// Corner a map control is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlPosition {
    /// Top-right corner.
    TopRight,
    /// Bottom-right corner.
    BottomRight,
}

/// Content drawn once data has loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct MapContent {
    /// Route-dependent sub-view.
    pub view: Option<RouteView>,
    /// Zoom control position. The control is always shown.
    pub zoom_control: ControlPosition,
    /// Search box, on the search route only.
    pub search_box: Option<SearchBoxView>,
    /// Popup for the last confirmed search.
    pub popup: Option<PopupView>,
}

/// Route-dependent sub-view.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteView {
    /// One marker per interview.
    OralHistories {
        /// Markers in interview order.
        markers: Vec<MarkerView>,
    },
    /// Overlay toggle control with its layers.
    DataLayers {
        /// The layers control.
        control: LayersControlView,
    },
}

/// An interview marker.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerView {
    /// Interview id, the marker key.
    pub id: String,
    /// Marker position.
    pub position: LatLng,
    /// Whether this interview is the selected one.
    pub selected: bool,
}

/// The overlay toggle control.
#[derive(Debug, Clone, PartialEq)]
pub struct LayersControlView {
    /// Anchor corner.
    pub position: ControlPosition,
    /// Whether the control starts collapsed.
    pub collapsed: bool,
    /// One entry per layer, in slot order.
    pub overlays: Vec<OverlayView>,
}

/// One overlay in the layers control.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayView {
    /// Layer key.
    pub key: String,
    /// Translated display name.
    pub name: String,
    /// Whether the overlay is checked, and so drawn.
    pub checked: bool,
    /// Pane the geometry draws into.
    pub pane: String,
    /// Pane z-index.
    pub z_index: i32,
    /// Path styling.
    pub style: LayerStyle,
    /// Point symbolizer, passed through as configured.
    pub point_symbol: Option<PointSymbol>,
    /// Number of features in the layer.
    pub feature_count: usize,
    /// Whether point features are grouped into clusters.
    pub clustered: bool,
    /// Clusters at the current zoom, for checked clustered overlays.
    pub clusters: Vec<ClusterView>,
}

/// A group of nearby point features.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterView {
    /// Mean position of the grouped points.
    pub center: LatLng,
    /// Number of points in the group.
    pub count: usize,
}

/// The search input with its autocomplete list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBoxView {
    /// Current input text.
    pub term: String,
    /// Placeholder for an empty input.
    pub placeholder: &'static str,
    /// Autocomplete options, in result order.
    pub options: Vec<SearchOptionView>,
}

/// One autocomplete option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptionView {
    /// Option value, the result name.
    pub name: String,
    /// Character ranges matching the typed term, `(start, end)` exclusive.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// The search popup.
#[derive(Debug, Clone, PartialEq)]
pub struct PopupView {
    /// Anchor position.
    pub position: LatLng,
    /// Popup text.
    pub content: String,
}
