//! Footer component renderer.
//!
//! Two rows: the latest notice (or a separator line when there is none) and
//! the centered keybinding hints for the current mode.

use crate::ui::helpers::{center, fit, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;

/// Renders the footer starting at `row`; it occupies `row` and `row + 1`.
pub fn render_footer(row: usize, footer: &FooterInfo, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    match &footer.notice {
        Some(notice) => {
            let color = if notice.is_error {
                &theme.colors.error_fg
            } else {
                &theme.colors.success_fg
            };
            print!("{}", Theme::fg(color));
            print!("{}", fit(&format!(" {}", notice.text), cols));
        }
        None => {
            print!("{}", Theme::fg(&theme.colors.border));
            print!("{}", "─".repeat(cols));
        }
    }
    print!("{}", Theme::reset());

    position_cursor(row + 1, 1);
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", center(&footer.keybindings, cols));
    print!("{}", Theme::reset());
    row + 2
}
