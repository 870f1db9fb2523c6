//! Worker task message types.
//!
//! Requests posted from the session's event loop to background tasks, and
//! the responses those tasks report back. Requests carry the poster's trace
//! context so worker spans join the trace that caused them.

use crate::domain::{Interview, Layer, SearchResult};
use serde::{Deserialize, Serialize};

/// Distributed tracing context for cross-task span propagation.
///
/// Captures the current trace and span IDs from OpenTelemetry to maintain
/// trace continuity when handing work to a spawned task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Parent span ID for linking spans across tasks.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Creates a trace context from the current tracing span.
    ///
    /// Returns `None` if the current span context is invalid or not sampled,
    /// which is always the case when no OpenTelemetry layer is installed.
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let span = tracing::Span::current();

        let otel_context = span.context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if span_context.is_valid() {
            let trace_id = format!("{:032x}", span_context.trace_id());
            let parent_span_id = format!("{:016x}", span_context.span_id());

            tracing::trace!(
                trace_id = %trace_id,
                parent_span_id = %parent_span_id,
                "capturing trace context"
            );

            Some(Self {
                trace_id,
                parent_span_id,
            })
        } else {
            None
        }
    }
}

/// Generates constructors for `WorkerMessage` variants that attach the
/// current trace context.
macro_rules! worker_message_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl WorkerMessage {
            $(
                #[doc = concat!("Create a ", stringify!($variant), " message with current trace context")]
                #[must_use]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant {
                        $($field,)*
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

worker_message_builders! {
    fetch_data(FetchData {}),
    geocode(Geocode { request_id: u64, term: String }),
}

/// Requests handled by background worker tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerMessage {
    /// Load every layer slot and the interview list from the data source.
    FetchData {
        /// Trace context for linking spans across tasks.
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Look up a search term with the geocoder.
    Geocode {
        /// Sequence number of this lookup; responses echo it back.
        request_id: u64,

        /// Text to look up.
        term: String,

        /// Trace context for linking spans across tasks.
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
}

impl WorkerMessage {
    /// The trace context attached when the message was built.
    #[must_use]
    pub const fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::FetchData { trace_context } | Self::Geocode { trace_context, .. } => {
                trace_context.as_ref()
            }
        }
    }
}

/// Responses reported by worker tasks.
///
/// A data fetch reports `LayersPending` first, then one `LayerResolved` per
/// slot in completion order, then `InterviewsLoaded`. Any failure is reported
/// as `DataFailed` and leaves its slot unresolved.
#[derive(Debug, Clone)]
pub enum WorkerResponse {
    /// The data source has `count` layer slots, none of them loaded yet.
    LayersPending {
        /// Number of layer slots.
        count: usize,
    },

    /// The layer in slot `index` finished loading.
    LayerResolved {
        /// Slot index.
        index: usize,

        /// The loaded layer.
        layer: Layer,
    },

    /// Interview records finished loading.
    InterviewsLoaded {
        /// All interview records.
        interviews: Vec<Interview>,
    },

    /// Part of the data fetch failed.
    DataFailed {
        /// Human-readable error message.
        message: String,
    },

    /// A geocode lookup succeeded.
    GeocodeResolved {
        /// Sequence number of the lookup.
        request_id: u64,

        /// Matching places in response order, possibly empty.
        results: Vec<SearchResult>,
    },

    /// A geocode lookup failed.
    GeocodeFailed {
        /// Sequence number of the lookup.
        request_id: u64,

        /// Human-readable error message.
        message: String,
    },
}
