//! OpenTelemetry-based observability with file-based trace export.
//!
//! ```text
//! tracing-opentelemetry → OpenTelemetry SDK → FileSpanExporter → JSON lines
//! ```
//!
//! - Spans are written to `<data dir>/aemap-otlp.jsonl`, one OTLP document
//!   per exported batch
//! - Files rotate at 10 MB with three backups kept
//! - The filter comes from `RUST_LOG`, then `trace_level` in the
//!   configuration, then `info`
//!
//! Worker tasks re-parent their spans onto the poster's trace context, so a
//! settled search term and the geocoder request it triggers share one trace.
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - [`tracer`]: Tracer provider with file export
//! - [`span_formatter`]: OTLP JSON span serialization
//! - [`file_writer`]: Rotating file writer

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::{init_tracing, SERVICE_NAME, TRACE_FILE_NAME};
