//! In-memory data source.

use super::DataSource;
use crate::domain::{Interview, Layer, MapError, Result};

/// Serves layers and interviews that are already in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryDataSource {
    layers: Vec<Layer>,
    interviews: Vec<Interview>,
}

impl MemoryDataSource {
    /// Creates a source serving `layers` in slot order.
    #[must_use]
    pub const fn new(layers: Vec<Layer>) -> Self {
        Self {
            layers,
            interviews: Vec::new(),
        }
    }

    /// Adds interview records.
    #[must_use]
    pub fn with_interviews(mut self, interviews: Vec<Interview>) -> Self {
        self.interviews = interviews;
        self
    }
}

impl DataSource for MemoryDataSource {
    fn layer_count(&self) -> usize {
        self.layers.len()
    }

    async fn load_layer(&self, index: usize) -> Result<Layer> {
        self.layers
            .get(index)
            .cloned()
            .ok_or_else(|| MapError::Data(format!("no layer in slot {index}")))
    }

    async fn load_interviews(&self) -> Result<Vec<Interview>> {
        Ok(self.interviews.clone())
    }
}
