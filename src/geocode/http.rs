//! HTTP client abstraction for testability.

use crate::domain::{MapError, Result};
use std::future::Future;
use tracing::{debug, trace, warn};

/// User-Agent sent with geocoding requests.
const USER_AGENT: &str = concat!("aemap/", env!("CARGO_PKG_VERSION"));

/// Trait for asynchronous HTTP GET requests.
///
/// Allows the geocoder to be driven by a mock client in tests.
pub trait AsyncHttpClient: Send + Sync {
    /// Performs an HTTP GET request and returns the response body.
    ///
    /// Implementations must fail with [`MapError::Http`] on transport errors
    /// and on non-success statuses.
    fn get(&self, url: &str) -> impl Future<Output = Result<Vec<u8>>> + Send;
}

/// HTTP client implementation using reqwest.
#[derive(Clone, Debug)]
pub struct ReqwestClient {
    client: reqwest::Client,
}

impl ReqwestClient {
    /// Creates a client without a request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialised.
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| MapError::Http(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }
}

impl AsyncHttpClient for ReqwestClient {
    async fn get(&self, url: &str) -> Result<Vec<u8>> {
        trace!(url = url, "HTTP GET request starting");

        let response = match self.client.get(url).send().await {
            Ok(resp) => {
                debug!(status = resp.status().as_u16(), "HTTP response received");
                resp
            }
            Err(e) => {
                warn!(
                    error = %e,
                    is_connect = e.is_connect(),
                    is_timeout = e.is_timeout(),
                    "HTTP request failed"
                );
                return Err(MapError::Http(format!("Request failed: {e}")));
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "HTTP error status");
            return Err(MapError::Http(format!("HTTP {status}")));
        }

        response
            .bytes()
            .await
            .map(|b| b.to_vec())
            .map_err(|e| MapError::Http(format!("Failed to read response: {e}")))
    }
}
