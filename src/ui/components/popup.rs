//! Search popup and info window renderers.

use crate::domain::InfoWindow;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::PopupView;
use serde_json::Value;

/// Appends the search popup line.
pub fn render_popup(out: &mut String, popup: &PopupView, theme: &Theme) {
    out.push_str(&Theme::fg(&theme.colors.popup_fg));
    out.push_str(&format!(
        "⌖ {}  ({:.4}, {:.4})",
        popup.content, popup.position[0], popup.position[1]
    ));
    out.push_str(Theme::reset());
    out.push('\n');
}

/// Appends the last clicked feature's info window: its title, then one
/// `label: value` line per property.
pub fn render_info_window(out: &mut String, info: &InfoWindow, theme: &Theme) {
    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(&theme.colors.popup_fg));
    out.push_str(info.title.as_deref().unwrap_or(&info.layer));
    out.push_str(Theme::reset());
    out.push('\n');

    out.push_str(&Theme::fg(&theme.colors.text_normal));
    for (label, value) in &info.properties {
        let value = match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        out.push_str(&format!("  {label}: {value}\n"));
    }
    out.push_str(Theme::reset());
}
