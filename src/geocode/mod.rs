//! Geocoding: turning typed place names into coordinates.
//!
//! - [`http`]: transport abstraction with a reqwest implementation
//! - [`client`]: URL construction and the lookup operation
//! - [`response`]: response body parsing

pub mod client;
pub mod http;
pub mod response;

pub use client::{GeocodeConfig, Geocoder, DEFAULT_DEBOUNCE_MS, DEFAULT_ENDPOINT};
pub use http::{AsyncHttpClient, ReqwestClient};
pub use response::parse_locations;
