//! Layers control component renderer.
//!
//! Renders one row per overlay, in slot order, with its checkbox, pane and
//! feature summary. Checked clustered overlays list their clusters below.

use crate::ui::helpers::{text_width, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{LayersControlView, OverlayView};

/// Width of the overlay name column.
const NAME_WIDTH: usize = 32;

/// Clusters listed per overlay before the rest are summarised.
const MAX_CLUSTER_ROWS: usize = 5;

/// Appends the column headers and every overlay row.
pub fn render_layers_control(out: &mut String, control: &LayersControlView, theme: &Theme, cols: usize) {
    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(&theme.colors.header_fg));
    out.push_str(&format!("    {:<width$} {:<10} {}", "LAYER", "Z-INDEX", "FEATURES", width = NAME_WIDTH));
    out.push_str(Theme::reset());
    out.push('\n');

    for overlay in &control.overlays {
        render_overlay_row(out, overlay, theme, cols);
    }
}

fn render_overlay_row(out: &mut String, overlay: &OverlayView, theme: &Theme, cols: usize) {
    if overlay.checked {
        out.push_str(&Theme::fg(&theme.colors.checked_fg));
        out.push_str("[x] ");
        out.push_str(&Theme::fg(&theme.colors.text_normal));
    } else {
        out.push_str(&Theme::fg(&theme.colors.text_dim));
        out.push_str("[ ] ");
    }

    let name = truncate(&overlay.name, NAME_WIDTH);
    let row = format!(
        "{name}{} z={:<8} {}{}",
        " ".repeat(NAME_WIDTH.saturating_sub(text_width(&name)) + 1),
        overlay.z_index,
        overlay.feature_count,
        if overlay.clustered { " (clustered)" } else { "" }
    );
    out.push_str(&row);
    out.push_str(&" ".repeat(cols.saturating_sub(4 + text_width(&row))));
    out.push_str(Theme::reset());
    out.push('\n');

    if !overlay.checked {
        return;
    }

    out.push_str(&Theme::fg(&theme.colors.text_dim));
    for cluster in overlay.clusters.iter().take(MAX_CLUSTER_ROWS) {
        out.push_str(&format!(
            "      ◎ {:>4} near {:.3}, {:.3}\n",
            cluster.count, cluster.center[0], cluster.center[1]
        ));
    }
    if overlay.clusters.len() > MAX_CLUSTER_ROWS {
        out.push_str(&format!("      … {} more clusters\n", overlay.clusters.len() - MAX_CLUSTER_ROWS));
    }
    out.push_str(Theme::reset());
}
