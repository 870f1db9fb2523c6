//! Store events and the reducer that applies them.
//!
//! Every mutation of [`AppState`] is expressed as a [`Dispatch`] and applied
//! by [`reduce`], one at a time. Views and handlers read state and produce
//! dispatches; they never write state fields directly.

use crate::app::AppState;
use crate::domain::{InfoWindow, Interview, Layer, SearchPopup, SearchResult};

/// A named state mutation.
#[derive(Debug, Clone)]
pub enum Dispatch {
    /// `ui:search:term:set`: replace the search input text.
    SearchTermSet(String),
    /// `ui:search:results:set`: replace the autocomplete list; `None` closes it.
    SearchResultsSet(Option<Vec<SearchResult>>),
    /// `data:marker`: show the search popup.
    Marker(SearchPopup),
    /// `ui:interview:selected`: an interview marker was clicked.
    InterviewSelected(Interview),
    /// `ui:info-window:show`: a layer feature was clicked.
    InfoWindowShow(InfoWindow),
    /// `data:layers:pending`: reset the layer list to `count` unresolved slots.
    LayersPending(usize),
    /// `data:layers:resolved`: fill one layer slot.
    LayerResolved {
        /// Slot index.
        index: usize,
        /// The loaded layer.
        layer: Layer,
    },
    /// `data:interviews:set`: replace the interview list.
    InterviewsSet(Vec<Interview>),
    /// `ui:route:set`: navigate to a path.
    RouteSet(String),
    /// `ui:overlay:set`: check or uncheck an overlay in the layers control.
    OverlaySet {
        /// Layer key.
        key: String,
        /// New checked state.
        visible: bool,
    },
}

impl Dispatch {
    /// The event name, as used in logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::SearchTermSet(_) => "ui:search:term:set",
            Self::SearchResultsSet(_) => "ui:search:results:set",
            Self::Marker(_) => "data:marker",
            Self::InterviewSelected(_) => "ui:interview:selected",
            Self::InfoWindowShow(_) => "ui:info-window:show",
            Self::LayersPending(_) => "data:layers:pending",
            Self::LayerResolved { .. } => "data:layers:resolved",
            Self::InterviewsSet(_) => "data:interviews:set",
            Self::RouteSet(_) => "ui:route:set",
            Self::OverlaySet { .. } => "ui:overlay:set",
        }
    }
}

/// Applies one dispatch to `state`. Returns whether anything changed.
///
/// An empty result list is stored as `None`, so a present list is never
/// empty. A resolved layer for a slot that does not exist is dropped.
pub fn reduce(state: &mut AppState, dispatch: Dispatch) -> bool {
    tracing::debug!(kind = dispatch.kind(), "reduce");

    match dispatch {
        Dispatch::SearchTermSet(term) => replace(&mut state.ui.search_term, term),
        Dispatch::SearchResultsSet(results) => {
            let results = results.filter(|r| !r.is_empty());
            replace(&mut state.ui.search_results, results)
        }
        Dispatch::Marker(popup) => replace(&mut state.data.search_popup, Some(popup)),
        Dispatch::InterviewSelected(interview) => {
            replace(&mut state.ui.selected_interview, Some(interview))
        }
        Dispatch::InfoWindowShow(info) => replace(&mut state.ui.info_window, Some(info)),
        Dispatch::LayersPending(count) => {
            state.data.layers = vec![None; count];
            true
        }
        Dispatch::LayerResolved { index, layer } => match state.data.layers.get_mut(index) {
            Some(slot) => {
                *slot = Some(layer);
                true
            }
            None => {
                tracing::warn!(
                    index = index,
                    slot_count = state.data.layers.len(),
                    "resolved layer has no slot, dropping"
                );
                false
            }
        },
        Dispatch::InterviewsSet(interviews) => replace(&mut state.data.interviews, interviews),
        Dispatch::RouteSet(path) => replace(&mut state.route, path),
        Dispatch::OverlaySet { key, visible } => {
            state.ui.overlays.insert(key, visible) != Some(visible)
        }
    }
}

/// Applies dispatches in order. Returns whether any of them changed state.
pub fn reduce_all(state: &mut AppState, dispatches: impl IntoIterator<Item = Dispatch>) -> bool {
    dispatches
        .into_iter()
        .fold(false, |changed, dispatch| reduce(state, dispatch) || changed)
}

fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        false
    } else {
        *slot = value;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{GeoPoint, LayerConfig};
    use geojson::FeatureCollection;

    fn layer(key: &str) -> Layer {
        Layer {
            key: key.to_string(),
            data: FeatureCollection {
                bbox: None,
                features: vec![],
                foreign_members: None,
            },
            config: LayerConfig::default(),
        }
    }

    fn oakland() -> SearchResult {
        SearchResult {
            name: "Oakland, CA".to_string(),
            bbox: [37.63, -122.36, 37.89, -122.11],
            point: GeoPoint {
                coordinates: [37.8, -122.27],
            },
        }
    }

    #[test]
    fn kinds_use_store_event_names() {
        assert_eq!(Dispatch::SearchTermSet(String::new()).kind(), "ui:search:term:set");
        assert_eq!(Dispatch::SearchResultsSet(None).kind(), "ui:search:results:set");
        assert_eq!(
            Dispatch::Marker(SearchPopup {
                coords: [0.0, 0.0],
                content: String::new(),
            })
            .kind(),
            "data:marker"
        );
    }

    #[test]
    fn empty_results_are_stored_as_none() {
        let mut state = AppState::default();
        state.ui.search_results = Some(vec![oakland()]);

        assert!(reduce(&mut state, Dispatch::SearchResultsSet(Some(vec![]))));
        assert_eq!(state.ui.search_results, None);
    }

    #[test]
    fn pending_then_resolved_fills_slots() {
        let mut state = AppState::default();

        reduce(&mut state, Dispatch::LayersPending(2));
        assert_eq!(state.data.layers.len(), 2);
        assert!(!state.layers_resolved());

        reduce(&mut state, Dispatch::LayerResolved { index: 1, layer: layer("b") });
        assert!(!state.layers_resolved());

        reduce(&mut state, Dispatch::LayerResolved { index: 0, layer: layer("a") });
        assert!(state.layers_resolved());
    }

    #[test]
    fn out_of_range_layer_is_dropped() {
        let mut state = AppState::default();
        reduce(&mut state, Dispatch::LayersPending(1));

        assert!(!reduce(&mut state, Dispatch::LayerResolved { index: 3, layer: layer("x") }));
        assert_eq!(state.data.layers.len(), 1);
    }

    #[test]
    fn unchanged_values_report_no_change() {
        let mut state = AppState::default();

        assert!(reduce(&mut state, Dispatch::SearchTermSet("Oak".to_string())));
        assert!(!reduce(&mut state, Dispatch::SearchTermSet("Oak".to_string())));
        assert!(reduce(&mut state, Dispatch::OverlaySet { key: "a".to_string(), visible: true }));
        assert!(!reduce(&mut state, Dispatch::OverlaySet { key: "a".to_string(), visible: true }));
    }
}
