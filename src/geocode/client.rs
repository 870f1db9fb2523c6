//! Geocoding client for the search box.

use super::http::AsyncHttpClient;
use super::response::parse_locations;
use crate::domain::{MapError, Result, SearchResult};
use reqwest::Url;
use serde::Deserialize;

/// Default Locations API endpoint.
pub const DEFAULT_ENDPOINT: &str = "http://dev.virtualearth.net/REST/v1/Locations";

/// Default quiet period before a lookup is issued, in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u64 = 200;

/// Geocoder settings from the `[geocode]` configuration section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GeocodeConfig {
    /// Locations API endpoint.
    pub endpoint: String,
    /// API key sent as the `key` parameter. Empty means unset.
    pub api_key: String,
    /// Culture hint sent as the `culture` parameter.
    ///
    /// Defaults to the system language; `None` omits the parameter.
    pub locale: Option<String>,
    /// Debounce quiet period in milliseconds.
    pub debounce_ms: u64,
}

impl Default for GeocodeConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: String::new(),
            locale: crate::infrastructure::system_locale(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

/// Resolves free-text place names through the Locations API.
#[derive(Debug, Clone)]
pub struct Geocoder<C: AsyncHttpClient> {
    client: C,
    config: GeocodeConfig,
}

impl<C: AsyncHttpClient> Geocoder<C> {
    /// Creates a geocoder using `client` for transport.
    pub const fn new(client: C, config: GeocodeConfig) -> Self {
        Self { client, config }
    }

    /// Builds the lookup URL for `term`.
    ///
    /// The term is trimmed and URL-escaped; the culture parameter is only
    /// present when a locale is configured.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::Config`] if the configured endpoint is not a URL.
    pub fn request_url(&self, term: &str) -> Result<Url> {
        let mut url = Url::parse(&self.config.endpoint)
            .map_err(|e| MapError::Config(format!("invalid geocode endpoint: {e}")))?;

        {
            let mut query = url.query_pairs_mut();
            query.append_pair("q", term.trim());
            if let Some(locale) = self.config.locale.as_deref().filter(|l| !l.is_empty()) {
                query.append_pair("culture", locale);
            }
            query.append_pair("key", &self.config.api_key);
        }

        Ok(url)
    }

    /// Looks up `term` and returns the matching places in response order.
    ///
    /// An empty term resolves to no results without issuing a request.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::Geocode`] wrapping the underlying cause when the
    /// request fails, the status is not successful, or the body is malformed.
    pub async fn geocode(&self, term: &str) -> Result<Vec<SearchResult>> {
        if term.is_empty() {
            return Ok(Vec::new());
        }

        if self.config.api_key.is_empty() {
            tracing::warn!("geocoding without an API key, the endpoint will likely reject the request");
        }

        let url = self.request_url(term).map_err(MapError::geocode)?;
        let body = self.client.get(url.as_str()).await.map_err(MapError::geocode)?;
        let results = parse_locations(&body).map_err(MapError::geocode)?;

        tracing::debug!(term = %term, result_count = results.len(), "geocode lookup complete");
        Ok(results)
    }
}
