//! Header component renderer.
//!
//! Renders the title bar with centered text, theme-aware colors, and
//! optional background styling.

use crate::ui::helpers::push_centered;
use crate::ui::theme::Theme;

/// Appends the header line for the map at `route`.
///
/// # Layout
///
/// ```text
/// [left padding] aemap  /maps/covid-19 [right padding]
/// ```
pub fn render_header(out: &mut String, route: &str, theme: &Theme, cols: usize) {
    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        out.push_str(&Theme::bg(bg));
    }

    push_centered(out, &format!("aemap  {route}"), cols);

    out.push_str(Theme::reset());
    out.push('\n');
}
