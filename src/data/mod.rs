//! Sources of overlay geometry and interview records.
//!
//! The map never fetches data itself: the worker asks a [`DataSource`] for
//! each layer slot and for the interview list, and reports every result back
//! to the store as it arrives.
//!
//! - [`file`]: TOML manifest plus GeoJSON/JSON files on disk
//! - [`memory`]: preloaded values, for embedding and tests

pub mod file;
pub mod memory;

use crate::domain::{Interview, Layer, Result};
use std::future::Future;

pub use file::FileDataSource;
pub use memory::MemoryDataSource;

/// Provider of layer geometry and interview records.
pub trait DataSource: Send + Sync {
    /// Number of layer slots, fixed for the lifetime of the source.
    fn layer_count(&self) -> usize;

    /// Loads the layer in slot `index`.
    ///
    /// Implementations must fail with [`MapError::Data`](crate::MapError::Data)
    /// for an index outside `0..layer_count()`.
    fn load_layer(&self, index: usize) -> impl Future<Output = Result<Layer>> + Send;

    /// Loads the oral-history interviews. Sources without interviews return
    /// an empty list.
    fn load_interviews(&self) -> impl Future<Output = Result<Vec<Interview>>> + Send;
}
