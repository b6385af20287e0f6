//! Empty state component renderer.
//!
//! Shown in place of the table rows while loading, when the device has no
//! keywords, or when the filters hide all of them.

use crate::ui::helpers::{center, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Renders a centered two-line message starting at `row`.
pub fn render_empty_state(row: usize, empty: &EmptyState, theme: &Theme, cols: usize) {
    position_cursor(row, 1);
    print!("{}", Theme::fg(&theme.colors.empty_state_fg));
    print!("{}", center(&empty.message, cols));
    print!("{}", Theme::reset());

    if empty.subtitle.is_empty() {
        return;
    }

    position_cursor(row + 1, 1);
    print!("{}", Theme::dim());
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", center(&empty.subtitle, cols));
    print!("{}", Theme::reset());
}
