//! Domain layer for the map widget.
//!
//! Core data types shared by the store, the worker and the view model,
//! independent of any rendering or transport concern.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`layer`]: Overlay layers and their display configuration
//! - [`interview`]: Oral-history interview records
//! - [`map`]: View initialisation settings and tile constants
//! - [`search`]: Geocoder results and the search popup

pub mod error;
pub mod interview;
pub mod layer;
pub mod map;
pub mod search;

pub use error::{MapError, Result};
pub use interview::Interview;
pub use layer::{InfoWindow, Layer, LayerConfig, LayerStyle, PointSymbol, PropsProjection};
pub use map::MapConfig;
pub use search::{GeoPoint, LatLng, SearchPopup, SearchResult};
