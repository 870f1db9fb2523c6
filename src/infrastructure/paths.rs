//! Filesystem locations for configuration and trace output.
//!
//! Follows the XDG base directory convention, falling back to the usual
//! dot-directories under `$HOME`.

use std::env;
use std::path::PathBuf;

const APP_DIR: &str = "aemap";

fn home_dir() -> Option<PathBuf> {
    env::var_os("HOME").filter(|h| !h.is_empty()).map(PathBuf::from)
}

/// Returns the data directory, where trace files are written.
///
/// `$XDG_DATA_HOME/aemap`, else `~/.local/share/aemap`, else `./.aemap`.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    env::var_os("XDG_DATA_HOME")
        .filter(|d| !d.is_empty())
        .map(PathBuf::from)
        .or_else(|| home_dir().map(|h| h.join(".local").join("share")))
        .map_or_else(|| PathBuf::from(".aemap"), |base| base.join(APP_DIR))
}

/// Returns the default configuration file path.
///
/// `$XDG_CONFIG_HOME/aemap/config.toml`, else `~/.config/aemap/config.toml`.
#[must_use]
pub fn get_config_file() -> PathBuf {
    env::var_os("XDG_CONFIG_HOME")
        .filter(|d| !d.is_empty())
        .map(PathBuf::from)
        .or_else(|| home_dir().map(|h| h.join(".config")))
        .map_or_else(|| PathBuf::from("aemap.toml"), |base| base.join(APP_DIR).join("config.toml"))
}

/// Expands a leading `~` to the home directory.
///
/// Paths without a leading tilde, or with no `HOME` set, come back unchanged.
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    let Some(home) = home_dir() else {
        return PathBuf::from(path);
    };

    if path == "~" {
        home
    } else if let Some(rest) = path.strip_prefix("~/") {
        home.join(rest)
    } else {
        PathBuf::from(path)
    }
}
