//! Keyword table renderer.
//!
//! Columns, left to right: checkbox, favorite star, keyword, position with
//! change, seven-day history, url, time since update. Keyword and url share
//! whatever width the fixed columns leave.

use crate::ui::helpers::{self, fit, format_change, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{DisplayItem, TableHeaderInfo};

const CHECK_WIDTH: usize = 4;
const STAR_WIDTH: usize = 2;
const POSITION_WIDTH: usize = 10;
const HISTORY_WIDTH: usize = 22;
const UPDATED_WIDTH: usize = 10;
const GAPS: usize = 4;

/// Widths of the two flexible columns for a terminal width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnWidths {
    pub keyword: usize,
    pub url: usize,
}

impl ColumnWidths {
    /// Keyword gets 55% of the flexible space, url the rest.
    #[must_use]
    pub fn for_cols(cols: usize) -> Self {
        let fixed = CHECK_WIDTH + STAR_WIDTH + POSITION_WIDTH + HISTORY_WIDTH + UPDATED_WIDTH + GAPS;
        let flexible = cols.saturating_sub(fixed);
        let keyword = flexible * 55 / 100;
        Self {
            keyword,
            url: flexible - keyword,
        }
    }
}

/// Renders the column headings, including the select-all checkbox when the
/// view is not empty.
pub fn render_table_headers(row: usize, info: &TableHeaderInfo, theme: &Theme, cols: usize) -> usize {
    let widths = ColumnWidths::for_cols(cols);
    let check = match (info.show_toggle_all, info.all_selected) {
        (false, _) => "    ",
        (true, true) => "[x] ",
        (true, false) => "[ ] ",
    };

    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    print!(
        "{check}{}{} {} {} {} {}",
        " ".repeat(STAR_WIDTH),
        fit("KEYWORD", widths.keyword),
        fit("POSITION", POSITION_WIDTH),
        fit("HISTORY (7d)", HISTORY_WIDTH),
        fit("URL", widths.url),
        fit("UPDATED", UPDATED_WIDTH),
    );
    print!("{}", Theme::reset());
    row + 1
}

/// Renders every row and returns the next available row.
pub fn render_table_rows(row: usize, items: &[DisplayItem], theme: &Theme, cols: usize) -> usize {
    let widths = ColumnWidths::for_cols(cols);
    let mut current_row = row;
    for item in items {
        current_row = render_table_row(current_row, item, widths, theme);
    }
    current_row
}

/// Renders one keyword.
///
/// The cursor row gets the cursor colors across the whole line; otherwise
/// secondary columns are dimmed and the star and change arrows use their
/// accent colors.
fn render_table_row(row: usize, item: &DisplayItem, widths: ColumnWidths, theme: &Theme) -> usize {
    let base = if item.is_cursor {
        format!(
            "{}{}",
            Theme::fg(&theme.colors.cursor_fg),
            Theme::bg(&theme.colors.cursor_bg)
        )
    } else {
        Theme::fg(&theme.colors.text_normal)
    };
    let accent = |hex: &str| if item.is_cursor { String::new() } else { Theme::fg(hex) };
    let dim = accent(&theme.colors.text_dim);

    position_cursor(row, 1);
    print!("{base}");

    print!("{}", if item.checked { "[x] " } else { "[ ] " });

    if item.favorite {
        print!("{}★ {base}", accent(&theme.colors.favorite_fg));
    } else {
        print!("  ");
    }

    let keyword = helpers::truncate(&item.keyword, widths.keyword);
    helpers::render_highlighted_text(&keyword, &item.highlight_ranges, theme, &base);
    let keyword_len = keyword.chars().count();
    print!("{} ", " ".repeat(widths.keyword.saturating_sub(keyword_len)));

    let position = if item.updating { "…".to_string() } else { item.position.clone() };
    let change = format_change(item.change);
    let change_color = match item.change {
        Some(c) if c > 0 => accent(&theme.colors.rank_up_fg),
        Some(c) if c < 0 => accent(&theme.colors.rank_down_fg),
        _ => String::new(),
    };
    let position_len = position.chars().count() + 1 + change.chars().count();
    print!("{position} {change_color}{change}{base}");
    print!("{} ", " ".repeat(POSITION_WIDTH.saturating_sub(position_len)));

    print!("{dim}{} ", fit(&item.history, HISTORY_WIDTH));
    print!("{} ", fit(&item.url, widths.url));
    print!("{base}{}", fit(&item.updated, UPDATED_WIDTH));

    print!("{}", Theme::reset());
    row + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flexible_columns_share_remaining_width() {
        let widths = ColumnWidths::for_cols(152);
        assert_eq!(widths.keyword + widths.url, 100);
        assert_eq!(widths.keyword, 55);
    }

    #[test]
    fn narrow_terminal_collapses_flexible_columns() {
        assert_eq!(ColumnWidths::for_cols(20), ColumnWidths { keyword: 0, url: 0 });
    }
}
