//! Runtime host wiring the store to the worker and the debounce timer.
//!
//! A [`MapSession`] owns the [`AppState`] and everything that produces
//! events asynchronously:
//!
//! ```text
//! ┌──────────────────────────────┐
//! │        MapSession            │
//! │  ┌────────────────────────┐  │
//! │  │ AppState (store)       │  │  ← handle_event / reduce
//! │  └────────────────────────┘  │
//! │      │ PostToWorker   ▲      │
//! │      ▼                │      │
//! │  ┌──────────────┐  responses │  ← one tokio task per message
//! │  │  MapWorker   │─────┘      │
//! │  └──────────────┘            │
//! │  ┌──────────────┐  settled   │  ← trailing-edge search debounce
//! │  │  Debouncer   │─────┘      │
//! │  └──────────────┘            │
//! └──────────────────────────────┘
//! ```
//!
//! Events are handled one at a time on the caller's task, so dispatches are
//! applied serially even though worker results arrive in any order.

use crate::app::{handle_event, Action, AppState, Event};
use crate::data::DataSource;
use crate::geocode::AsyncHttpClient;
use crate::ui::viewmodel::MapScene;
use crate::worker::{Debouncer, MapWorker, WorkerMessage, WorkerResponse};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Store plus the asynchronous machinery feeding it.
pub struct MapSession<C, D>
where
    C: AsyncHttpClient + 'static,
    D: DataSource + 'static,
{
    state: AppState,
    worker: Arc<MapWorker<C, D>>,
    responses_tx: UnboundedSender<WorkerResponse>,
    responses_rx: UnboundedReceiver<WorkerResponse>,
    settled_rx: UnboundedReceiver<(u64, String)>,
    debouncer: Debouncer<String>,
}

impl<C, D> MapSession<C, D>
where
    C: AsyncHttpClient + 'static,
    D: DataSource + 'static,
{
    /// Creates a session debouncing search input by `debounce`.
    #[must_use]
    pub fn new(state: AppState, worker: MapWorker<C, D>, debounce: Duration) -> Self {
        let (responses_tx, responses_rx) = mpsc::unbounded_channel();
        let (settled_tx, settled_rx) = mpsc::unbounded_channel();

        Self {
            state,
            worker: Arc::new(worker),
            responses_tx,
            responses_rx,
            settled_rx,
            debouncer: Debouncer::new(debounce, settled_tx),
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    /// Scene for the current state.
    #[must_use]
    pub fn scene(&self) -> MapScene {
        self.state.compute_viewmodel()
    }

    /// Terminal rendering of the current state, `cols` wide.
    #[must_use]
    pub fn render(&self, cols: usize) -> String {
        crate::ui::render_to_string(&self.state, cols)
    }

    /// Handles `event` and executes the resulting actions.
    ///
    /// Returns whether the state changed in a way that needs a re-render.
    /// Must be called from within a tokio runtime.
    pub fn dispatch(&mut self, event: &Event) -> bool {
        match handle_event(&mut self.state, event) {
            Ok((should_render, actions)) => {
                tracing::debug!(
                    action_count = actions.len(),
                    should_render = should_render,
                    "event handled successfully"
                );
                for action in actions {
                    self.execute_action(action);
                }
                should_render
            }
            Err(e) => {
                tracing::error!(error = %e, "error handling event");
                false
            }
        }
    }

    /// Waits for the next asynchronous event: a worker response or a search
    /// term whose quiet period has elapsed.
    ///
    /// Never resolves while nothing is in flight.
    pub async fn next_event(&mut self) -> Event {
        loop {
            tokio::select! {
                Some(response) = self.responses_rx.recv() => return Event::WorkerResponse(response),
                Some((generation, term)) = self.settled_rx.recv() => {
                    if let Some(event) = self.settled_event(generation, term) {
                        return event;
                    }
                }
                else => {
                    tracing::warn!("event channels closed");
                    std::future::pending::<()>().await;
                }
            }
        }
    }

    /// Waits for one asynchronous event and handles it.
    ///
    /// Returns whether a re-render is needed.
    pub async fn pump(&mut self) -> bool {
        let event = self.next_event().await;
        self.dispatch(&event)
    }

    /// Handles every asynchronous event that is already available, without
    /// waiting.
    ///
    /// Returns whether any of them needs a re-render.
    pub fn try_pump(&mut self) -> bool {
        let mut should_render = false;
        loop {
            let event = if let Ok(response) = self.responses_rx.try_recv() {
                Event::WorkerResponse(response)
            } else if let Ok((generation, term)) = self.settled_rx.try_recv() {
                match self.settled_event(generation, term) {
                    Some(event) => event,
                    None => continue,
                }
            } else {
                return should_render;
            };
            should_render |= self.dispatch(&event);
        }
    }

    /// Turns a debounced term into an event, unless a later input or a
    /// confirmation superseded it while it sat in the channel.
    fn settled_event(&self, generation: u64, term: String) -> Option<Event> {
        if self.debouncer.is_current(generation) {
            Some(Event::SearchSettled(term))
        } else {
            tracing::debug!(term = %term, "dropping superseded search term");
            None
        }
    }

    /// Whether a search term is waiting for its quiet period.
    #[must_use]
    pub fn search_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&mut self, action: Action) {
        match action {
            Action::PostToWorker(message) => self.post_worker_message(message),
            Action::DebounceGeocode { term } => {
                tracing::trace!(delay_ms = self.debouncer.delay().as_millis(), "restarting search debounce");
                self.debouncer.call(term);
            }
            Action::CancelDebounce => self.debouncer.cancel(),
            Action::RunFeatureHook { layer_key, feature_index } => {
                let Some(layer) = self.state.layer(&layer_key) else {
                    tracing::warn!(layer_key = %layer_key, "feature hook for unknown layer");
                    return;
                };
                if let (Some(hook), Some(feature)) = (&layer.config.on_each_feature, layer.feature(feature_index)) {
                    hook(feature);
                }
            }
        }
    }

    /// Spawns a worker task for `message`.
    fn post_worker_message(&self, message: WorkerMessage) {
        tracing::debug!(message = ?message, "posting message to worker");
        let worker = Arc::clone(&self.worker);
        let tx = self.responses_tx.clone();
        tokio::spawn(async move {
            worker.handle_message(message, &tx).await;
        });
    }
}
