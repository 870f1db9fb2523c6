//! Locations API response parsing.
//!
//! The geocoder nests its results as
//! `{ resourceSets: [ { resources: [ { name, bbox, point: { coordinates } } ] } ] }`.
//! Only the first resource set is read, and only the three fields the search
//! box needs are kept.

use crate::domain::{GeoPoint, MapError, Result, SearchResult};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LocationsResponse {
    resource_sets: Vec<ResourceSet>,
}

#[derive(Debug, Deserialize)]
struct ResourceSet {
    #[serde(default)]
    resources: Vec<Resource>,
}

#[derive(Debug, Deserialize)]
struct Resource {
    name: String,
    bbox: [f64; 4],
    point: GeoPoint,
}

/// Parses a Locations API body into search results, in response order.
///
/// # Errors
///
/// Returns [`MapError::Json`] if the body is not the expected shape and
/// [`MapError::Data`] if it carries no resource set at all.
pub fn parse_locations(body: &[u8]) -> Result<Vec<SearchResult>> {
    let response: LocationsResponse = serde_json::from_slice(body)?;

    let set = response
        .resource_sets
        .into_iter()
        .next()
        .ok_or_else(|| MapError::Data("response has no resource sets".to_string()))?;

    Ok(set
        .resources
        .into_iter()
        .map(|Resource { name, bbox, point }| SearchResult { name, bbox, point })
        .collect())
}
