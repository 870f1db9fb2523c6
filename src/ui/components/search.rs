//! Search box component renderer.
//!
//! Renders the input as a bordered frame followed by the autocomplete
//! options, with the typed term highlighted in each option.

use crate::ui::helpers::{render_highlighted_text, text_width, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBoxView;

/// Horizontal margin for the search box (spaces on left and right).
const SEARCH_BOX_MARGIN: usize = 5;

/// Appends the search box and its options.
///
/// # Layout
///
/// ```text
/// [margin] ┌──────────────────────┐ [margin]
/// [margin] │ Search: Oak          │ [margin]
/// [margin] └──────────────────────┘ [margin]
/// [margin]   › Oakland, CA
/// ```
///
/// An empty input shows the placeholder, dimmed.
pub fn render_search_box(out: &mut String, search: &SearchBoxView, theme: &Theme, cols: usize) {
    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let margin = " ".repeat(SEARCH_BOX_MARGIN);
    let border = Theme::fg(&theme.colors.search_bar_border);

    out.push_str(&margin);
    out.push_str(&border);
    out.push_str(&format!("┌{}┐", "─".repeat(inner_width)));
    out.push_str(Theme::reset());
    out.push('\n');

    let (text, color) = if search.term.is_empty() {
        (format!(" {}", search.placeholder), &theme.colors.text_dim)
    } else {
        (format!(" Search: {}", search.term), &theme.colors.text_normal)
    };
    let text = truncate(&text, inner_width);

    out.push_str(&margin);
    out.push_str(&border);
    out.push('│');
    out.push_str(&Theme::fg(color));
    out.push_str(&text);
    out.push_str(&" ".repeat(inner_width.saturating_sub(text_width(&text))));
    out.push_str(&border);
    out.push('│');
    out.push_str(Theme::reset());
    out.push('\n');

    out.push_str(&margin);
    out.push_str(&border);
    out.push_str(&format!("└{}┘", "─".repeat(inner_width)));
    out.push_str(Theme::reset());
    out.push('\n');

    for option in &search.options {
        out.push_str(&margin);
        out.push_str(&Theme::fg(&theme.colors.text_normal));
        out.push_str("  › ");
        render_highlighted_text(out, &option.name, &option.highlight_ranges, theme);
        out.push_str(Theme::reset());
        out.push('\n');
    }
}
