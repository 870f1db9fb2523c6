//! Top-level rendering coordinator.
//!
//! Computes the scene for the current state and lays the components out
//! into one ANSI-styled string. Until every layer slot has resolved only the
//! loading message is drawn between header and footer.
//!
//! # Example
//!
//! ```rust
//! use aemap::app::AppState;
//! use aemap::ui::render_to_string;
//!
//! let state = AppState::default();
//! let frame = render_to_string(&state, 80);
//! assert!(frame.contains("No data layers"));
//! ```

use crate::app::AppState;
use crate::ui::components;
use crate::ui::viewmodel::MapScene;
use std::io::{self, Write};

/// Renders the current state to a string, `cols` columns wide.
#[must_use]
pub fn render_to_string(state: &AppState, cols: usize) -> String {
    let scene = state.compute_viewmodel();
    render_scene(state, &scene, cols)
}

/// Clears the terminal and writes the current state to stdout.
///
/// # Errors
///
/// Returns an error if stdout cannot be written.
pub fn render(state: &AppState, cols: usize) -> io::Result<()> {
    let frame = render_to_string(state, cols);
    let mut stdout = io::stdout().lock();
    write!(stdout, "\u{1b}[2J\u{1b}[H{frame}")?;
    stdout.flush()
}

fn render_scene(state: &AppState, scene: &MapScene, cols: usize) -> String {
    let theme = &state.theme;
    let mut out = String::new();

    components::render_top(&mut out, scene, theme, cols);

    if let Some(content) = &scene.content {
        components::render_content(&mut out, content, state.ui.info_window.as_ref(), theme, cols);
    } else {
        let total = state.data.layers.len();
        let (message, subtitle) = if total == 0 {
            ("No data layers".to_string(), "waiting for the layer list".to_string())
        } else {
            (
                "Loading map data".to_string(),
                format!("{} of {total} layers loaded", state.layers().count()),
            )
        };
        components::render_empty_state(&mut out, &message, &subtitle, theme, cols);
    }

    components::render_bottom(&mut out, scene, theme, cols);
    out
}
