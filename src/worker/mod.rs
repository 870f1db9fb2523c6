//! Background tasks for network and file I/O.
//!
//! Geocode lookups and data fetches run as spawned tokio tasks so the event
//! loop never blocks. Results come back as [`WorkerResponse`] values over a
//! channel and enter the store like any other event.
//!
//! # Architecture
//!
//! - `messages`: Request/response protocol types with trace context propagation
//! - `handler`: Worker implementation and message processing logic
//! - `debounce`: Trailing-edge debouncer feeding settled search terms

pub mod debounce;
pub mod handler;
pub mod messages;

pub use debounce::Debouncer;
pub use handler::MapWorker;
pub use messages::{TraceContext, WorkerMessage, WorkerResponse};
