//! aemap: an interactive overlay map with a debounced geocoding search box.
//!
//! The crate provides:
//! - A map view model with toggleable GeoJSON overlay layers, interview
//!   markers and a search popup, conditioned on the current route
//! - A search box that debounces input, geocodes it in the background and
//!   publishes an autocomplete list
//! - One explicit store that every interaction goes through as a named
//!   dispatch
//! - A terminal host rendering the view model as ANSI text

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Terminal host (main.rs) / MapSession (session.rs)  │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← Store
//! │  - Event handling                                   │
//! │  - Named dispatches and reducer                     │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Data Layer    │   │ Worker Layer  │
//! │ (ui/)         │   │ (data/)       │   │ (worker/)     │
//! │ - Scene types │   │ - Manifest    │   │ - Task per msg│
//! │ - Rendering   │   │ - GeoJSON I/O │   │ - Debounce    │
//! │ - Theming     │   │ - In-memory   │   │ - Geocoding   │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure, Geocoding & Domain Layers          │
//! │  - Platform paths, locale (infrastructure/)         │
//! │  - Locations API client (geocode/)                  │
//! │  - Layers, interviews, results, errors (domain/)    │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional
//! │  - OpenTelemetry tracing                            │
//! │  - File-based OTLP export                           │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```toml
//! # ~/.config/aemap/config.toml
//! theme = "dark-matter"
//! trace_level = "info"
//!
//! [map]
//! lat = 37.77
//! lng = -122.42
//! z = 10
//!
//! [map.overlays]
//! actions = true
//!
//! [geocode]
//! api_key = "..."
//!
//! [data]
//! manifest = "~/maps/layers.toml"
//!
//! [translations]
//! "layers.actions" = "Housing Justice Actions"
//! ```
//!
//! `key=value` pairs on the command line override the file, and
//! `AEMAP_GEOCODE_KEY` overrides the API key.
//!
//! # Example
//!
//! ```rust
//! use aemap::{handle_event, initialize, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//! let (_render, actions) = handle_event(&mut state, &Event::Mount)?;
//! assert_eq!(actions.len(), 1);
//! # Ok::<(), aemap::MapError>(())
//! ```

pub mod app;
pub mod data;
pub mod domain;
pub mod geocode;
pub mod infrastructure;
pub mod session;
pub mod worker;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event};
pub use domain::{MapError, Result};
pub use session::MapSession;
pub use ui::Theme;

use crate::app::RouteTable;
use crate::domain::MapConfig;
use crate::geocode::GeocodeConfig;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable overriding the geocoding API key.
pub const API_KEY_ENV: &str = "AEMAP_GEOCODE_KEY";

/// The `[data]` configuration section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Layer manifest read by [`FileDataSource`](crate::data::FileDataSource).
    ///
    /// Relative paths are resolved against the configuration file's
    /// directory; `~` expands to the home directory.
    pub manifest: Option<PathBuf>,
}

/// Application configuration.
///
/// Every field has a default, so an empty file (or no file) is valid.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// View initialisation and overlay defaults.
    pub map: MapConfig,

    /// Geocoder endpoint, key, locale and debounce period.
    pub geocode: GeocodeConfig,

    /// Route patterns.
    pub routes: RouteTable,

    /// Where layer data comes from.
    pub data: DataConfig,

    /// Flat translation table used for layer names.
    pub translations: BTreeMap<String, String>,

    /// Built-in theme name: `dark-matter` or `positron`. Ignored if
    /// `theme_file` is set.
    pub theme: Option<String>,

    /// Path to a custom TOML theme file. Takes precedence over `theme`.
    pub theme_file: Option<String>,

    /// Tracing filter, e.g. `debug` or `aemap=trace`. Default: `"info"`.
    pub trace_level: Option<String>,
}

impl Config {
    /// Reads a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::Io`] if the file cannot be read and
    /// [`MapError::Config`] if it is not valid configuration.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&contents)
            .map_err(|e| MapError::Config(format!("{}: {e}", path.display())))?;

        if let Some(manifest) = config.data.manifest.take() {
            let manifest = infrastructure::expand_tilde(&manifest.to_string_lossy());
            config.data.manifest = Some(match path.parent() {
                Some(dir) if manifest.is_relative() => dir.join(manifest),
                _ => manifest,
            });
        }

        tracing::debug!(path = %path.display(), "loaded configuration file");
        Ok(config)
    }

    /// Loads the configuration for the host.
    ///
    /// Reads `path` if given, else the default configuration file if it
    /// exists, else starts from defaults. The API key environment variable is
    /// applied last.
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file exists but cannot be read or
    /// parsed.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = infrastructure::get_config_file();
                if default_path.is_file() {
                    Self::from_file(&default_path)?
                } else {
                    Self::default()
                }
            }
        };
        config.apply_api_key(std::env::var(API_KEY_ENV).ok());
        Ok(config)
    }

    /// Builds a configuration from `key=value` pairs over the defaults.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use aemap::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("zoom".to_string(), "10".to_string());
    /// map.insert("layers".to_string(), "actions,rent".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.map.z, 10);
    /// assert!(config.map.overlay_enabled("rent"));
    /// ```
    #[must_use]
    pub fn from_map(overrides: &BTreeMap<String, String>) -> Self {
        let mut config = Self::default();
        config.apply_overrides(overrides);
        config
    }

    /// Applies `key=value` overrides.
    ///
    /// # Parsing Rules
    ///
    /// - `lat`, `lng`: `f64`; `zoom`: `u8`. Unparseable values are ignored
    ///   with a warning.
    /// - `api_key`, `theme`, `theme_file`, `trace_level`: taken as is
    /// - `locale`: taken as is; an empty value omits the culture parameter
    /// - `route`: the path the session starts on
    /// - `layers`: comma-separated layer keys to check initially
    ///
    /// Unknown keys are ignored.
    pub fn apply_overrides(&mut self, overrides: &BTreeMap<String, String>) {
        for (key, value) in overrides {
            let value = value.trim();
            match key.as_str() {
                "lat" => Self::parse_into(key, value, &mut self.map.lat),
                "lng" => Self::parse_into(key, value, &mut self.map.lng),
                "zoom" => Self::parse_into(key, value, &mut self.map.z),
                "api_key" => self.geocode.api_key = value.to_string(),
                "locale" => self.geocode.locale = Some(value).filter(|v| !v.is_empty()).map(String::from),
                "route" => self.routes.default_path = value.to_string(),
                "theme" => self.theme = Some(value.to_string()),
                "theme_file" => self.theme_file = Some(value.to_string()),
                "trace_level" => self.trace_level = Some(value.to_string()),
                "layers" => {
                    for layer in value.split(',').map(str::trim).filter(|l| !l.is_empty()) {
                        self.map.overlays.insert(layer.to_string(), true);
                    }
                }
                _ => tracing::debug!(key = %key, "ignoring unknown configuration key"),
            }
        }
    }

    /// Replaces the API key with `key` when it is set and non-empty.
    pub fn apply_api_key(&mut self, key: Option<String>) {
        if let Some(key) = key.filter(|k| !k.trim().is_empty()) {
            self.geocode.api_key = key;
        }
    }

    /// Search debounce quiet period.
    #[must_use]
    pub const fn debounce(&self) -> Duration {
        Duration::from_millis(self.geocode.debounce_ms)
    }

    fn parse_into<T: std::str::FromStr>(key: &str, value: &str, target: &mut T) {
        match value.parse() {
            Ok(parsed) => *target = parsed,
            Err(_) => tracing::warn!(key = %key, value = %value, "invalid configuration value, keeping previous"),
        }
    }
}

/// Creates the initial [`AppState`] for `config`.
///
/// The theme comes from `theme_file`, then `theme`, then the default; a
/// theme that fails to load falls back to the default with a log entry.
/// The state starts on the configured default route with nothing loaded.
///
/// # Example
///
/// ```rust
/// use aemap::{initialize, Config};
///
/// let state = initialize(&Config::default());
/// assert_eq!(state.route, "/maps/covid-19");
/// assert!(state.data.layers.is_empty());
/// ```
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!("initializing map state");

    let theme = config.theme_file.as_ref().map_or_else(
        || {
            config.theme.as_ref().map_or_else(Theme::default, |theme_name| {
                Theme::from_name(theme_name).unwrap_or_else(|| {
                    tracing::warn!(theme_name = %theme_name, "unknown theme, using default");
                    Theme::default()
                })
            })
        },
        |theme_file| {
            Theme::from_file(infrastructure::expand_tilde(theme_file)).unwrap_or_else(|e| {
                tracing::warn!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
                Theme::default()
            })
        },
    );

    AppState::new(config.map.clone(), config.routes.clone(), theme).with_translations(config.translations.clone())
}
