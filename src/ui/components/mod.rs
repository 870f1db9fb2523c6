//! Composable UI component renderers.
//!
//! Each component appends complete lines to a `String` buffer.
//!
//! # Components
//!
//! - [`header`]: Title bar with the current route
//! - [`footer`]: Command hints and tile attribution
//! - [`search`]: Search box and autocomplete options
//! - [`layers`]: Overlay rows of the layers control
//! - [`markers`]: Interview markers
//! - [`popup`]: Search popup and feature info window
//! - [`empty`]: Loading message before the map content is up
//!
//! # Layout
//!
//! ```text
//! [Header]
//! [Border]
//! [Search box + options]      ← search route only
//! [Markers | Layers control]  ← depends on the route
//! [Popup]
//! [Info window]
//! [Border]
//! [Footer]
//! ```

mod empty;
mod footer;
mod header;
mod layers;
mod markers;
mod popup;
mod search;

pub use empty::render_empty_state;
pub use footer::COMMAND_HINTS;

use crate::domain::InfoWindow;
use crate::ui::helpers::push_border;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{MapContent, MapScene, RouteView};

use footer::render_footer;
use header::render_header;
use layers::render_layers_control;
use markers::render_markers;
use popup::{render_info_window, render_popup};
use search::render_search_box;

/// Appends the header and its separator.
pub fn render_top(out: &mut String, scene: &MapScene, theme: &Theme, cols: usize) {
    render_header(out, &scene.route, theme, cols);
    push_border(out, &theme.colors.border, cols);
}

/// Appends the separator and the footer.
pub fn render_bottom(out: &mut String, scene: &MapScene, theme: &Theme, cols: usize) {
    push_border(out, &theme.colors.border, cols);
    render_footer(out, &scene.tiles, theme, cols);
}

/// Appends the loaded map content.
///
/// `info_window` is the payload of the last feature click, drawn below the
/// layers it belongs to.
pub fn render_content(out: &mut String, content: &MapContent, info_window: Option<&InfoWindow>, theme: &Theme, cols: usize) {
    if let Some(search) = &content.search_box {
        render_search_box(out, search, theme, cols);
        out.push('\n');
    }

    match &content.view {
        Some(RouteView::OralHistories { markers }) => render_markers(out, markers, theme),
        Some(RouteView::DataLayers { control }) => {
            render_layers_control(out, control, theme, cols);
            if let Some(info) = info_window {
                out.push('\n');
                render_info_window(out, info, theme);
            }
        }
        None => {}
    }

    if let Some(popup) = &content.popup {
        out.push('\n');
        render_popup(out, popup, theme);
    }
}
