//! Footer component renderer.
//!
//! Renders the command hints and the tile attribution, both centered and
//! dimmed.

use crate::ui::helpers::{push_centered, strip_tags};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::TileLayerView;

/// Command hints shown on every screen.
pub const COMMAND_HINTS: &str =
    ":go <path> | :enter [text] | :marker <id> | :feature <layer> <n> | :toggle <layer> on|off | :quit";

/// Appends the hint line and the attribution line.
///
/// Text wider than the terminal is truncated to keep the layout intact.
pub fn render_footer(out: &mut String, tiles: &TileLayerView, theme: &Theme, cols: usize) {
    out.push_str(&Theme::fg(&theme.colors.text_dim));
    push_centered(out, COMMAND_HINTS, cols);
    out.push_str(Theme::reset());
    out.push('\n');

    out.push_str(Theme::dim());
    out.push_str(&Theme::fg(&theme.colors.text_dim));
    push_centered(out, &format!("© {}", strip_tags(tiles.attribution)), cols);
    out.push_str(Theme::reset());
    out.push('\n');
}
