//! Background task handling for data fetches and geocode lookups.
//!
//! The [`MapWorker`] owns the two network-facing collaborators, the geocoder
//! and the data source. The session spawns one task per [`WorkerMessage`];
//! each task reports back over an unbounded channel so the event loop never
//! waits on I/O.

use crate::data::DataSource;
use crate::geocode::{AsyncHttpClient, Geocoder};
use crate::worker::{WorkerMessage, WorkerResponse};
use futures_util::stream::{FuturesUnordered, StreamExt};
use tokio::sync::mpsc::UnboundedSender;
use tracing::Instrument;

/// Executes worker messages against a geocoder and a data source.
#[derive(Debug)]
pub struct MapWorker<C: AsyncHttpClient, D: DataSource> {
    geocoder: Geocoder<C>,
    data: D,
}

impl<C: AsyncHttpClient, D: DataSource> MapWorker<C, D> {
    /// Creates a worker from its collaborators.
    pub const fn new(geocoder: Geocoder<C>, data: D) -> Self {
        Self { geocoder, data }
    }

    /// Sends a response, ignoring a closed channel.
    ///
    /// The receiver only disappears when the session is shutting down, at
    /// which point late results have nowhere to go.
    fn reply(tx: &UnboundedSender<WorkerResponse>, response: WorkerResponse) {
        if tx.send(response).is_err() {
            tracing::debug!("session gone, dropping worker response");
        }
    }

    /// Loads every layer slot concurrently, then the interviews.
    ///
    /// Layers are reported in completion order, each carrying its slot index.
    async fn handle_fetch_data(&self, tx: &UnboundedSender<WorkerResponse>) {
        let count = self.data.layer_count();
        tracing::debug!(layer_count = count, "fetching map data");
        Self::reply(tx, WorkerResponse::LayersPending { count });

        let mut pending: FuturesUnordered<_> = (0..count)
            .map(|index| async move { (index, self.data.load_layer(index).await) })
            .collect();

        while let Some((index, result)) = pending.next().await {
            match result {
                Ok(layer) => {
                    tracing::debug!(index = index, layer_key = %layer.key, "layer resolved");
                    Self::reply(tx, WorkerResponse::LayerResolved { index, layer });
                }
                Err(e) => {
                    tracing::warn!(index = index, error = %e, "layer failed to load");
                    Self::reply(
                        tx,
                        WorkerResponse::DataFailed {
                            message: format!("load layer {index}: {e}"),
                        },
                    );
                }
            }
        }

        match self.data.load_interviews().await {
            Ok(interviews) => {
                tracing::debug!(interview_count = interviews.len(), "interviews resolved");
                Self::reply(tx, WorkerResponse::InterviewsLoaded { interviews });
            }
            Err(e) => {
                tracing::warn!(error = %e, "interviews failed to load");
                Self::reply(
                    tx,
                    WorkerResponse::DataFailed {
                        message: format!("load interviews: {e}"),
                    },
                );
            }
        }
    }

    async fn handle_geocode(&self, request_id: u64, term: &str, tx: &UnboundedSender<WorkerResponse>) {
        let response = match self.geocoder.geocode(term).await {
            Ok(results) => WorkerResponse::GeocodeResolved { request_id, results },
            Err(e) => WorkerResponse::GeocodeFailed {
                request_id,
                message: e.to_string(),
            },
        };
        Self::reply(tx, response);
    }

    /// Rebuilds the OpenTelemetry context of the span that posted `message`.
    fn parent_trace_context(message: &WorkerMessage) -> Option<opentelemetry::Context> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_context = message.trace_context()?;

        let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
        let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        Some(opentelemetry::Context::new().with_remote_span_context(span_context))
    }

    /// Processes one message, sending every response over `tx`.
    ///
    /// Runs inside a `worker_handle_message` span parented to the poster's
    /// trace context when one was captured.
    pub async fn handle_message(&self, message: WorkerMessage, tx: &UnboundedSender<WorkerResponse>) {
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let span = tracing::debug_span!("worker_handle_message", message_type = ?message);
        if let Some(parent) = Self::parent_trace_context(&message) {
            span.set_parent(parent);
        }

        async move {
            match message {
                WorkerMessage::FetchData { .. } => self.handle_fetch_data(tx).await,
                WorkerMessage::Geocode { request_id, term, .. } => {
                    self.handle_geocode(request_id, &term, tx).await;
                }
            }
        }
        .instrument(span)
        .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::MemoryDataSource;
    use crate::domain::{Layer, LayerConfig, MapError, Result};
    use crate::geocode::GeocodeConfig;
    use geojson::FeatureCollection;
    use tokio::sync::mpsc;

    struct FixedClient(Option<&'static str>);

    impl AsyncHttpClient for FixedClient {
        async fn get(&self, _url: &str) -> Result<Vec<u8>> {
            self.0
                .map(|body| body.as_bytes().to_vec())
                .ok_or_else(|| MapError::Http("HTTP 500 Internal Server Error".to_string()))
        }
    }

    fn layer(key: &str) -> Layer {
        Layer {
            key: key.to_string(),
            data: FeatureCollection {
                bbox: None,
                features: vec![],
                foreign_members: None,
            },
            config: LayerConfig {
                name: key.to_uppercase(),
                ..LayerConfig::default()
            },
        }
    }

    fn worker(body: Option<&'static str>, layers: Vec<Layer>) -> MapWorker<FixedClient, MemoryDataSource> {
        let config = GeocodeConfig {
            api_key: "k".to_string(),
            locale: None,
            ..GeocodeConfig::default()
        };
        MapWorker::new(Geocoder::new(FixedClient(body), config), MemoryDataSource::new(layers))
    }

    fn drain(rx: &mut mpsc::UnboundedReceiver<WorkerResponse>) -> Vec<WorkerResponse> {
        let mut out = Vec::new();
        while let Ok(response) = rx.try_recv() {
            out.push(response);
        }
        out
    }

    #[tokio::test]
    async fn fetch_reports_pending_then_each_layer_then_interviews() {
        let worker = worker(None, vec![layer("a"), layer("b")]);
        let (tx, mut rx) = mpsc::unbounded_channel();

        worker.handle_message(WorkerMessage::fetch_data(), &tx).await;
        let responses = drain(&mut rx);

        assert_eq!(responses.len(), 4);
        assert!(matches!(responses[0], WorkerResponse::LayersPending { count: 2 }));
        let mut resolved: Vec<usize> = responses[1..3]
            .iter()
            .map(|r| match r {
                WorkerResponse::LayerResolved { index, .. } => *index,
                other => panic!("unexpected response {other:?}"),
            })
            .collect();
        resolved.sort_unstable();
        assert_eq!(resolved, vec![0, 1]);
        assert!(matches!(responses[3], WorkerResponse::InterviewsLoaded { .. }));
    }

    #[tokio::test]
    async fn geocode_echoes_request_id() {
        let body = r#"{"resourceSets":[{"resources":[{"name":"Oakland, CA","bbox":[37.6,-122.4,37.9,-122.1],"point":{"coordinates":[37.8,-122.27]}}]}]}"#;
        let worker = worker(Some(body), vec![]);
        let (tx, mut rx) = mpsc::unbounded_channel();

        worker.handle_message(WorkerMessage::geocode(7, "Oakland".to_string()), &tx).await;

        match drain(&mut rx).as_slice() {
            [WorkerResponse::GeocodeResolved { request_id, results }] => {
                assert_eq!(*request_id, 7);
                assert_eq!(results[0].name, "Oakland, CA");
            }
            other => panic!("unexpected responses {other:?}"),
        }
    }

    #[tokio::test]
    async fn geocode_failure_is_reported_with_message() {
        let worker = worker(None, vec![]);
        let (tx, mut rx) = mpsc::unbounded_channel();

        worker.handle_message(WorkerMessage::geocode(1, "Oakland".to_string()), &tx).await;

        match drain(&mut rx).as_slice() {
            [WorkerResponse::GeocodeFailed { request_id: 1, message }] => {
                assert!(message.contains("fetching geocode data failed"));
            }
            other => panic!("unexpected responses {other:?}"),
        }
    }
}
