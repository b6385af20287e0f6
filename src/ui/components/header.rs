//! Header component renderer: title bar and device tabs.

use crate::ui::helpers::{center, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the centered title bar.
///
/// Returns the next available row.
pub fn render_header(row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }
    print!("{}", center(&header.title, cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders one tab per device with its keyword count, plus the view count on
/// the right.
///
/// ```text
///  Desktop (12)   Mobile (3)                                   12 shown
/// ```
pub fn render_device_tabs(row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    let mut used = 0;

    for tab in &header.tabs {
        let label = format!(" {} ({}) ", tab.label, tab.count);
        if tab.active {
            print!("{}", Theme::bold());
            print!("{}", Theme::fg(&theme.colors.tab_active_fg));
            print!("{}", Theme::bg(&theme.colors.tab_active_bg));
        } else {
            print!("{}", Theme::fg(&theme.colors.text_dim));
        }
        print!("{label}");
        print!("{}", Theme::reset());
        print!(" ");
        used += label.chars().count() + 1;
    }

    let shown = format!("{} shown ", header.view_count);
    let gap = cols.saturating_sub(used + shown.chars().count());
    print!("{}", " ".repeat(gap));
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{shown}");
    print!("{}", Theme::reset());
    row + 1
}
