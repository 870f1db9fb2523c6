//! Loading state component renderer.

use crate::ui::helpers::push_centered;
use crate::ui::theme::Theme;

/// Appends the centered two-line message shown while there is no map
/// content: a headline and a dimmed progress subtitle.
pub fn render_empty_state(out: &mut String, message: &str, subtitle: &str, theme: &Theme, cols: usize) {
    out.push('\n');

    out.push_str(&Theme::fg(&theme.colors.empty_state_fg));
    push_centered(out, message, cols);
    out.push_str(Theme::reset());
    out.push('\n');

    out.push_str(Theme::dim());
    out.push_str(&Theme::fg(&theme.colors.text_dim));
    push_centered(out, subtitle, cols);
    out.push_str(Theme::reset());
    out.push('\n');
}
