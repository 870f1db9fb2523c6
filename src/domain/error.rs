//! Error types for the map widget.
//!
//! This module defines the centralized error type [`MapError`] and a type alias
//! [`Result`] for convenient error handling throughout the crate. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.

use thiserror::Error;

/// The main error type for map and search operations.
///
/// Geocoding failures are surfaced as values (never panics) so that the event
/// handler can decide whether to log, surface, or ignore them.
///
/// # Examples
///
/// ```
/// use aemap::MapError;
///
/// let err = MapError::geocode("HTTP 401 Unauthorized");
/// assert!(err.to_string().starts_with("fetching geocode data failed"));
/// ```
#[derive(Debug, Error)]
pub enum MapError {
    /// The geocoding lookup failed.
    ///
    /// Wraps transport failures, non-success statuses and malformed bodies
    /// behind a single message. A missing or invalid API key usually shows up
    /// here as an HTTP status error.
    #[error("fetching geocode data failed: {cause}. Check that the geocoding API key is set and valid")]
    Geocode {
        /// Description of the underlying failure.
        cause: String,
    },

    /// An HTTP request could not be completed or returned a non-success status.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Layer or interview data could not be loaded or parsed.
    #[error("Data error: {0}")]
    Data(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl MapError {
    /// Wraps any displayable failure as a [`MapError::Geocode`].
    pub fn geocode(cause: impl std::fmt::Display) -> Self {
        Self::Geocode {
            cause: cause.to_string(),
        }
    }
}

/// A specialized `Result` type for map operations.
pub type Result<T> = std::result::Result<T, MapError>;
