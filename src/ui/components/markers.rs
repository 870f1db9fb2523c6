//! Interview marker list renderer.

use crate::ui::theme::Theme;
use crate::ui::viewmodel::MarkerView;

/// Appends one line per interview marker. The selected marker is filled and
/// drawn in the selection color.
pub fn render_markers(out: &mut String, markers: &[MarkerView], theme: &Theme) {
    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(&theme.colors.header_fg));
    out.push_str(&format!("Oral histories ({})", markers.len()));
    out.push_str(Theme::reset());
    out.push('\n');

    for marker in markers {
        if marker.selected {
            out.push_str(&Theme::fg(&theme.colors.selected_fg));
            out.push_str("  ◉ ");
        } else {
            out.push_str(&Theme::fg(&theme.colors.text_normal));
            out.push_str("  ○ ");
        }
        out.push_str(&format!("{}  {:.4}, {:.4}", marker.id, marker.position[0], marker.position[1]));
        out.push_str(Theme::reset());
        out.push('\n');
    }
}
