//! Theme management and ANSI escape sequence generation.
//!
//! Built-in themes are named after the basemap styles they pair with and are
//! embedded at compile time; custom themes are loaded from TOML files.
//!
//! # Built-in Themes
//!
//! - `dark-matter`: Light text on dark, for the dark basemap (default)
//! - `positron`: Dark text on light
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#e0e0e0"
//! text_normal = "#cfcfcf"
//! text_dim = "#7a7a7a"
//! border = "#3a3a3a"
//! search_bar_border = "#f06292"
//! match_highlight_fg = "#111111"
//! match_highlight_bg = "#ffd54f"
//! empty_state_fg = "#64b5f6"
//! checked_fg = "#81c784"
//! selected_fg = "#ffb74d"
//! popup_fg = "#f06292"
//! ```
//!
//! # Example
//!
//! ```rust
//! use aemap::ui::theme::Theme;
//!
//! let theme = Theme::default();
//! let line = format!("{}Layers{}", Theme::fg(&theme.colors.header_fg), Theme::reset());
//! assert!(line.ends_with("\u{1b}[0m"));
//! ```

use crate::domain::{MapError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the theme used when none is configured.
pub const DEFAULT_THEME: &str = "dark-matter";

/// Color scheme for terminal rendering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    /// Human-readable theme name.
    pub name: String,
    /// Color palette for all UI elements.
    pub colors: ThemeColors,
}

/// Color definitions, as hex strings (e.g. `"#e0e0e0"`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    /// Header text color.
    pub header_fg: String,
    /// Optional header background color.
    #[serde(default)]
    pub header_bg: Option<String>,

    /// Normal text color.
    pub text_normal: String,
    /// Dimmed text color (footer, unchecked overlays).
    pub text_dim: String,

    /// Border and separator line color.
    pub border: String,

    /// Search box border color.
    pub search_bar_border: String,
    /// Matched-term highlight foreground.
    pub match_highlight_fg: String,
    /// Matched-term highlight background.
    pub match_highlight_bg: String,

    /// Loading and empty state message color.
    pub empty_state_fg: String,

    /// Checked overlay indicator color.
    pub checked_fg: String,
    /// Selected interview marker color.
    pub selected_fg: String,
    /// Search popup and info window color.
    pub popup_fg: String,
}

impl Theme {
    /// Loads a built-in theme by name, `None` if the name is unknown.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "dark-matter" => include_str!("../../themes/dark-matter.toml"),
            "positron" => include_str!("../../themes/positron.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::Io`] if the file cannot be read and
    /// [`MapError::Config`] if it does not parse as a theme.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;

        toml::from_str(&contents).map_err(|e| MapError::Config(format!("Failed to parse theme TOML: {e}")))
    }

    /// Plain white-on-terminal palette, used when no built-in theme parses.
    #[must_use]
    pub fn monochrome() -> Self {
        let white = || "#ffffff".to_string();
        let grey = || "#808080".to_string();
        Self {
            name: "monochrome".to_string(),
            colors: ThemeColors {
                header_fg: white(),
                header_bg: None,
                text_normal: white(),
                text_dim: grey(),
                border: grey(),
                search_bar_border: white(),
                match_highlight_fg: "#000000".to_string(),
                match_highlight_bg: white(),
                empty_state_fg: white(),
                checked_fg: white(),
                selected_fg: white(),
                popup_fg: white(),
            },
        }
    }

    /// Converts a hex color to RGB. Unparseable colors become white.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim_start_matches('#').trim();

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

        (r, g, b)
    }

    /// ANSI 24-bit foreground escape for `hex`.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// ANSI 24-bit background escape for `hex`.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    /// Returns the ANSI bold escape sequence (`\x1b[1m`).
    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    /// Returns the ANSI dim escape sequence (`\x1b[2m`).
    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    /// Returns the ANSI reset escape sequence (`\x1b[0m`).
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// The `dark-matter` theme.
    fn default() -> Self {
        Self::from_name(DEFAULT_THEME).unwrap_or_else(|| {
            tracing::warn!(theme_name = DEFAULT_THEME, "built-in theme failed to parse, using monochrome");
            Self::monochrome()
        })
    }
}
