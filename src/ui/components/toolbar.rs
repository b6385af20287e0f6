//! Toolbar component renderer.
//!
//! The toolbar row shows the active filters and sort while nothing is
//! selected, and turns into the bulk action bar as soon as one keyword is.

use crate::ui::helpers::{fit, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{BulkBarInfo, FilterBarInfo, Toolbar};

/// Renders the toolbar row and returns the next available row.
pub fn render_toolbar(row: usize, toolbar: &Toolbar, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    match toolbar {
        Toolbar::Filters(filters) => render_filter_bar(filters, theme, cols),
        Toolbar::Bulk(bulk) => render_bulk_bar(bulk, theme, cols),
    }
    print!("{}", Theme::reset());
    row + 1
}

fn render_filter_bar(filters: &FilterBarInfo, theme: &Theme, cols: usize) {
    let cursor = if filters.search_active { "▏" } else { "" };
    let search = format!(" / {}{cursor}", filters.search);

    let mut chips = String::new();
    if !filters.tags.is_empty() {
        chips.push_str(&format!("  tags: {}", filters.tags.join(", ")));
    }
    if !filters.countries.is_empty() {
        chips.push_str(&format!("  country: {}", filters.countries.join(", ")));
    }

    let sort = format!("sort: {} ", filters.sort_label);
    let left_width = cols.saturating_sub(sort.chars().count());
    let search_width = search.chars().count().min(left_width);

    if filters.search_active || !filters.search.is_empty() {
        print!("{}", Theme::fg(&theme.colors.toolbar_accent));
    } else {
        print!("{}", Theme::fg(&theme.colors.text_dim));
    }
    print!("{}", fit(&search, search_width));

    print!("{}", Theme::fg(&theme.colors.toolbar_accent));
    print!("{}", fit(&chips, left_width - search_width));

    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", fit(&sort, cols.saturating_sub(left_width)));
}

fn render_bulk_bar(bulk: &BulkBarInfo, theme: &Theme, cols: usize) {
    let noun = if bulk.selected == 1 { "keyword" } else { "keywords" };
    let text = format!(
        " {} {noun} selected   r: refresh   x: remove   Esc: clear",
        bulk.selected
    );
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.bulk_bar_fg));
    print!("{}", Theme::bg(&theme.colors.bulk_bar_bg));
    print!("{}", fit(&text, cols));
}
