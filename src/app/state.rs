//! Application state and view model computation.
//!
//! [`AppState`] is the store: loaded data, UI state, the current route and
//! the static view configuration. It is only mutated through
//! [`reduce`](crate::app::store::reduce); [`AppState::compute_viewmodel`]
//! turns a snapshot into a [`MapScene`].

use crate::app::route::{MapMode, RouteMatch, RouteTable};
use crate::domain::map::{TILE_ATTRIBUTION, TILE_URL_TEMPLATE};
use crate::domain::{InfoWindow, Interview, Layer, MapConfig, SearchPopup, SearchResult};
use crate::ui::cluster;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    ControlPosition, LayersControlView, MapContent, MapScene, MarkerView, OverlayView, PopupView,
    RouteView, SearchBoxView, SearchOptionView, TileLayerView,
};
use fuzzy_matcher::skim::SkimMatcherV2;
use std::collections::BTreeMap;

/// Loaded data.
#[derive(Debug, Clone, Default)]
pub struct DataState {
    /// Layer slots; `None` while loading.
    pub layers: Vec<Option<Layer>>,
    /// Interview records.
    pub interviews: Vec<Interview>,
    /// Popup placed by the last confirmed search.
    pub search_popup: Option<SearchPopup>,
}

/// Interaction state.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Search input text.
    pub search_term: String,
    /// Autocomplete list; never `Some` of an empty list.
    pub search_results: Option<Vec<SearchResult>>,
    /// Last clicked interview.
    pub selected_interview: Option<Interview>,
    /// Payload of the last clicked feature.
    pub info_window: Option<InfoWindow>,
    /// Overlay checks made at runtime, overriding the map configuration.
    pub overlays: BTreeMap<String, bool>,
}

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Loaded data.
    pub data: DataState,
    /// Interaction state.
    pub ui: UiState,
    /// Current navigation path.
    pub route: String,
    /// View initialisation and overlay defaults.
    pub map: MapConfig,
    /// Route patterns.
    pub routes: RouteTable,
    /// Translation table for layer names.
    pub translations: BTreeMap<String, String>,
    /// Color scheme for the terminal renderer.
    pub theme: Theme,
    /// Whether the data fetch has been requested.
    pub mounted: bool,
    /// Id of the latest geocode lookup issued. Responses with any other id
    /// are stale.
    pub search_seq: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(MapConfig::default(), RouteTable::default(), Theme::default())
    }
}

impl AppState {
    /// Creates a state on the default route with nothing loaded.
    #[must_use]
    pub fn new(map: MapConfig, routes: RouteTable, theme: Theme) -> Self {
        Self {
            data: DataState::default(),
            ui: UiState::default(),
            route: routes.default_path.clone(),
            map,
            routes,
            translations: BTreeMap::new(),
            theme,
            mounted: false,
            search_seq: 0,
        }
    }

    /// Replaces the translation table.
    #[must_use]
    pub fn with_translations(mut self, translations: BTreeMap<String, String>) -> Self {
        self.translations = translations;
        self
    }

    /// What the current route shows.
    #[must_use]
    pub fn route_match(&self) -> RouteMatch {
        self.routes.resolve(&self.route)
    }

    /// Whether the layer list is non-empty and every slot has loaded.
    #[must_use]
    pub fn layers_resolved(&self) -> bool {
        !self.data.layers.is_empty() && self.data.layers.iter().all(Option::is_some)
    }

    /// Resolved layers, in slot order.
    pub fn layers(&self) -> impl Iterator<Item = &Layer> {
        self.data.layers.iter().flatten()
    }

    /// The resolved layer with `key`.
    #[must_use]
    pub fn layer(&self, key: &str) -> Option<&Layer> {
        self.layers().find(|layer| layer.key == key)
    }

    /// Whether the overlay with `key` is checked.
    ///
    /// A runtime toggle wins over the configured default.
    #[must_use]
    pub fn overlay_checked(&self, key: &str) -> bool {
        self.ui
            .overlays
            .get(key)
            .copied()
            .unwrap_or_else(|| self.map.overlay_enabled(key))
    }

    /// Builds the scene for the current state.
    ///
    /// The base tiles and view initialisation are always present. Everything
    /// else waits for the layer list to resolve completely, whatever the
    /// route.
    #[must_use]
    pub fn compute_viewmodel(&self) -> MapScene {
        let content = if self.layers_resolved() {
            Some(self.compute_content())
        } else {
            tracing::trace!(
                slot_count = self.data.layers.len(),
                resolved = self.layers().count(),
                "layers unresolved, no map content"
            );
            None
        };

        MapScene {
            route: self.route.clone(),
            center: self.map.center(),
            zoom: self.map.z,
            min_zoom: self.map.min_zoom,
            max_bounds: self.map.bounds,
            tiles: TileLayerView {
                url_template: TILE_URL_TEMPLATE,
                attribution: TILE_ATTRIBUTION,
            },
            content,
        }
    }

    fn compute_content(&self) -> MapContent {
        let matched = self.route_match();

        let view = matched.mode.map(|mode| match mode {
            MapMode::OralHistories => RouteView::OralHistories {
                markers: self.compute_markers(),
            },
            MapMode::DataLayers => RouteView::DataLayers {
                control: self.compute_layers_control(),
            },
        });

        MapContent {
            view,
            zoom_control: ControlPosition::BottomRight,
            search_box: matched.search.then(|| self.compute_search_box()),
            popup: self.data.search_popup.as_ref().map(|popup| PopupView {
                position: popup.coords,
                content: popup.content.clone(),
            }),
        }
    }

    fn compute_markers(&self) -> Vec<MarkerView> {
        let selected_id = self.ui.selected_interview.as_ref().map(|i| i.id.as_str());

        self.data
            .interviews
            .iter()
            .filter_map(|interview| {
                let Some(position) = interview.position() else {
                    tracing::debug!(interview_id = %interview.id, "interview has no position, skipping marker");
                    return None;
                };
                Some(MarkerView {
                    id: interview.id.clone(),
                    position,
                    selected: selected_id == Some(interview.id.as_str()),
                })
            })
            .collect()
    }

    fn compute_layers_control(&self) -> LayersControlView {
        let overlays = self
            .layers()
            .map(|layer| {
                let checked = self.overlay_checked(&layer.key);
                let clustered = layer.config.is_clustered();
                let clusters = if clustered && checked {
                    cluster::cluster_points(&cluster::feature_points(&layer.data), self.map.z)
                } else {
                    Vec::new()
                };

                OverlayView {
                    key: layer.key.clone(),
                    name: layer.config.display_name(&self.translations),
                    checked,
                    pane: layer.key.clone(),
                    z_index: layer.config.pane_z_index(),
                    style: layer.config.style.clone(),
                    point_symbol: layer.config.point_to_layer.clone(),
                    feature_count: layer.data.features.len(),
                    clustered,
                    clusters,
                }
            })
            .collect();

        LayersControlView {
            position: ControlPosition::TopRight,
            collapsed: false,
            overlays,
        }
    }

    fn compute_search_box(&self) -> SearchBoxView {
        let matcher = SkimMatcherV2::default();
        let term = self.ui.search_term.trim();

        let options = self
            .ui
            .search_results
            .iter()
            .flatten()
            .map(|result| SearchOptionView {
                name: result.name.clone(),
                highlight_ranges: if term.is_empty() {
                    Vec::new()
                } else {
                    Self::compute_highlight_ranges(&result.name, term, &matcher)
                },
            })
            .collect();

        SearchBoxView {
            term: self.ui.search_term.clone(),
            placeholder: crate::app::search::PLACEHOLDER,
            options,
        }
    }

    /// Character ranges of `text` matched by `query`, coalesced into runs.
    fn compute_highlight_ranges(text: &str, query: &str, matcher: &SkimMatcherV2) -> Vec<(usize, usize)> {
        use fuzzy_matcher::FuzzyMatcher;

        let Some((_score, indices)) = matcher.fuzzy_indices(text, query) else {
            return Vec::new();
        };

        let mut ranges: Vec<(usize, usize)> = Vec::new();
        for idx in indices {
            match ranges.last_mut() {
                Some((_, end)) if *end == idx => *end = idx + 1,
                _ => ranges.push((idx, idx + 1)),
            }
        }
        ranges
    }
}
