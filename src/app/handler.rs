//! Event handling and state transition logic.
//!
//! [`handle_event`] is the only entry point that changes [`AppState`]. It
//! translates user gestures and worker responses into store dispatches,
//! applies them serially, and returns the side effects the session must run.
//!
//! # Event Types
//!
//! - **Lifecycle**: `Mount`, `Navigate`
//! - **Search box**: `SearchInput`, `SearchSettled`, `SearchConfirm`
//! - **Map**: `MarkerClicked`, `FeatureClicked`, `ToggleOverlay`
//! - **Worker**: `WorkerResponse` with typed message variants

use crate::app::route::MapMode;
use crate::app::search::{self, Settled};
use crate::app::store::{reduce, reduce_all, Dispatch};
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::worker::{WorkerMessage, WorkerResponse};

/// Events triggered by user input, timers, or worker responses.
#[derive(Debug, Clone)]
pub enum Event {
    /// The map view was mounted. Only the first mount fetches data.
    Mount,

    /// The navigation path changed.
    Navigate(String),

    /// The search input text changed.
    SearchInput(String),

    /// The search input has been quiet for the debounce period.
    SearchSettled(String),

    /// Enter pressed in the search input, with the input's current text.
    SearchConfirm(String),

    /// An interview marker was clicked.
    MarkerClicked(String),

    /// A feature of an overlay layer was clicked.
    FeatureClicked {
        /// Key of the layer the feature belongs to.
        layer_key: String,
        /// Index of the feature within the layer's collection.
        feature_index: usize,
    },

    /// An overlay was checked or unchecked in the layers control.
    ToggleOverlay {
        /// Layer key.
        layer_key: String,
        /// New checked state.
        visible: bool,
    },

    /// Wraps a response from a background worker task.
    WorkerResponse(WorkerResponse),
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// Returns `(should_render, actions)`. Events that do not apply to the
/// current route (search input off the search route, clicks on markers or
/// features that are not displayed) are ignored.
///
/// # Errors
///
/// Currently infallible; the `Result` leaves room for handlers that need to
/// fail without panicking.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::Mount => {
            if state.mounted {
                tracing::debug!("already mounted, not refetching");
                return Ok((false, vec![]));
            }
            state.mounted = true;
            tracing::debug!("map mounted, fetching data");
            Ok((false, vec![Action::PostToWorker(WorkerMessage::fetch_data())]))
        }
        Event::Navigate(path) => {
            let changed = reduce(state, Dispatch::RouteSet(path.clone()));
            tracing::debug!(route = %path, matched = ?state.route_match(), "navigated");
            Ok((changed, vec![]))
        }
        Event::SearchInput(text) => {
            if !search_shown(state) {
                tracing::debug!("search box not displayed, ignoring input");
                return Ok((false, vec![]));
            }
            let changed = reduce(state, search::on_input(text));
            Ok((changed, vec![Action::DebounceGeocode { term: text.clone() }]))
        }
        Event::SearchSettled(text) => handle_search_settled(state, text),
        Event::SearchConfirm(selection) => {
            if !search_shown(state) {
                return Ok((false, vec![]));
            }

            let dispatches = search::on_confirm(state.ui.search_results.as_deref(), selection);
            if dispatches.is_empty() {
                tracing::debug!("enter without results, nothing to confirm");
                return Ok((false, vec![]));
            }

            tracing::debug!(selection = %selection, "search selection confirmed");
            state.search_seq += 1;
            reduce_all(state, dispatches);
            Ok((true, vec![Action::CancelDebounce]))
        }
        Event::MarkerClicked(id) => {
            if !content_shows(state, MapMode::OralHistories) {
                return Ok((false, vec![]));
            }

            let Some(interview) = state.data.interviews.iter().find(|i| &i.id == id).cloned() else {
                tracing::warn!(interview_id = %id, "click on unknown interview marker");
                return Ok((false, vec![]));
            };

            let changed = reduce(state, Dispatch::InterviewSelected(interview));
            Ok((changed, vec![]))
        }
        Event::FeatureClicked { layer_key, feature_index } => {
            handle_feature_click(state, layer_key, *feature_index)
        }
        Event::ToggleOverlay { layer_key, visible } => {
            if !content_shows(state, MapMode::DataLayers) || state.layer(layer_key).is_none() {
                tracing::debug!(layer_key = %layer_key, "toggle for overlay not displayed, ignoring");
                return Ok((false, vec![]));
            }

            let changed = reduce(
                state,
                Dispatch::OverlaySet {
                    key: layer_key.clone(),
                    visible: *visible,
                },
            );
            Ok((changed, vec![]))
        }
        Event::WorkerResponse(response) => Ok(handle_worker_response(state, response)),
    }
}

/// Whether the search box is up: the layers have resolved and the route
/// shows it.
fn search_shown(state: &AppState) -> bool {
    state.layers_resolved() && state.route_match().search
}

/// Whether the map content is up and showing `mode`.
fn content_shows(state: &AppState, mode: MapMode) -> bool {
    state.layers_resolved() && state.route_match().mode == Some(mode)
}

fn handle_search_settled(state: &mut AppState, text: &str) -> Result<(bool, Vec<Action>)> {
    if !search_shown(state) {
        tracing::debug!("search box gone before the lookup was due, dropping");
        return Ok((false, vec![]));
    }

    // Any lookup still in flight is now stale.
    state.search_seq += 1;

    match search::on_settled(text) {
        Settled::Clear => {
            let changed = reduce(state, Dispatch::SearchResultsSet(None));
            Ok((changed, vec![]))
        }
        Settled::Lookup(term) => {
            tracing::debug!(request_id = state.search_seq, term = %term, "issuing geocode lookup");
            Ok((
                false,
                vec![Action::PostToWorker(WorkerMessage::geocode(state.search_seq, term))],
            ))
        }
    }
}

fn handle_feature_click(state: &mut AppState, layer_key: &str, feature_index: usize) -> Result<(bool, Vec<Action>)> {
    if !content_shows(state, MapMode::DataLayers) || !state.overlay_checked(layer_key) {
        tracing::debug!(layer_key = %layer_key, "click on overlay not displayed, ignoring");
        return Ok((false, vec![]));
    }

    let Some(layer) = state.layer(layer_key) else {
        tracing::warn!(layer_key = %layer_key, "click on unknown layer");
        return Ok((false, vec![]));
    };
    let Some(feature) = layer.feature(feature_index) else {
        tracing::warn!(layer_key = %layer_key, feature_index = feature_index, "click on unknown feature");
        return Ok((false, vec![]));
    };

    let info = layer.config.props.project(&layer.key, feature);
    let has_hook = layer.config.on_each_feature.is_some();

    let changed = reduce(state, Dispatch::InfoWindowShow(info));

    let actions = if has_hook {
        vec![Action::RunFeatureHook {
            layer_key: layer_key.to_string(),
            feature_index,
        }]
    } else {
        vec![]
    };
    Ok((changed, actions))
}

fn handle_worker_response(state: &mut AppState, response: &WorkerResponse) -> (bool, Vec<Action>) {
    match response {
        WorkerResponse::LayersPending { count } => {
            tracing::debug!(count = count, "layer slots pending");
            (reduce(state, Dispatch::LayersPending(*count)), vec![])
        }
        WorkerResponse::LayerResolved { index, layer } => {
            let changed = reduce(
                state,
                Dispatch::LayerResolved {
                    index: *index,
                    layer: layer.clone(),
                },
            );
            if state.layers_resolved() {
                tracing::info!(layer_count = state.data.layers.len(), "all layers resolved");
            }
            (changed, vec![])
        }
        WorkerResponse::InterviewsLoaded { interviews } => {
            (reduce(state, Dispatch::InterviewsSet(interviews.clone())), vec![])
        }
        WorkerResponse::DataFailed { message } => {
            tracing::error!("data fetch failed: {}", message);
            (false, vec![])
        }
        WorkerResponse::GeocodeResolved { request_id, results } => {
            if *request_id != state.search_seq {
                tracing::debug!(
                    request_id = request_id,
                    latest = state.search_seq,
                    "discarding stale geocode response"
                );
                return (false, vec![]);
            }
            (reduce(state, search::on_results(results.clone())), vec![])
        }
        WorkerResponse::GeocodeFailed { request_id, message } => {
            tracing::error!(request_id = request_id, "{}", message);
            (false, vec![])
        }
    }
}
