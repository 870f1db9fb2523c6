//! Infrastructure layer for filesystem and environment interactions.
//!
//! - [`paths`]: configuration and data directory resolution
//! - [`locale`]: system language detection

pub mod locale;
pub mod paths;

pub use locale::{normalize_locale, system_locale};
pub use paths::{expand_tilde, get_config_file, get_data_dir};
