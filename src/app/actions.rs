//! Side effects requested by the event handler.
//!
//! [`handle_event`](crate::app::handle_event) only mutates state; anything
//! involving timers, tasks or caller-supplied code is returned as an
//! [`Action`] and executed by the session.

use crate::worker::WorkerMessage;

/// Commands for the session to execute after an event has been handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Spawns a worker task for the message.
    PostToWorker(WorkerMessage),

    /// Restarts the search debounce timer with the latest input.
    ///
    /// When the timer elapses the session feeds the term back as
    /// `Event::SearchSettled`.
    DebounceGeocode {
        /// Input text at the time of the keystroke.
        term: String,
    },

    /// Drops any input still waiting for the debounce timer.
    CancelDebounce,

    /// Invokes the clicked layer's custom feature hook.
    ///
    /// Emitted after the `ui:info-window:show` dispatch for the same click.
    RunFeatureHook {
        /// Key of the clicked layer.
        layer_key: String,
        /// Index of the clicked feature within the layer.
        feature_index: usize,
    },
}
