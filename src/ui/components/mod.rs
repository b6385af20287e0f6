//! Composable UI component renderers.
//!
//! # Components
//!
//! - [`header`]: Title bar and device tabs
//! - [`toolbar`]: Filter/sort bar, or bulk action bar while keywords are selected
//! - [`table`]: Keyword table with column headings
//! - [`empty`]: Empty state message
//! - [`modal`]: Confirmation, details, tag manager and filter picker overlays
//! - [`footer`]: Notice line and keybinding hints
//!
//! # Layout
//!
//! ```text
//! [Header]
//! [Device tabs]
//! [Toolbar]
//! [Column headings]
//! [Rows / empty state]
//! [Blank padding to fill screen]
//! [Notice or border]
//! [Keybindings]
//! ```
//!
//! A modal, if any, is drawn over the table afterwards.

mod empty;
mod footer;
mod header;
pub mod modal;
pub mod table;
mod toolbar;

use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

use empty::render_empty_state;
use footer::render_footer;
use header::{render_device_tabs, render_header};
use modal::render_modal;
use table::{render_table_headers, render_table_rows};
use toolbar::render_toolbar;

/// Rows of the footer block (notice line and keybindings).
const FOOTER_ROWS: usize = 2;

/// Renders the full layout described in the module docs.
pub fn render_layout(vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) {
    let mut current_row = 1;

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_device_tabs(current_row, &vm.header, theme, cols);
    current_row = render_toolbar(current_row, &vm.toolbar, theme, cols);
    current_row = render_table_headers(current_row, &vm.table_header, theme, cols);

    if let Some(empty) = &vm.empty_state {
        render_empty_state(current_row + 2, empty, theme, cols);
    } else {
        render_table_rows(current_row, &vm.display_items, theme, cols);
    }

    let footer_start = rows.saturating_sub(FOOTER_ROWS) + 1;
    render_footer(footer_start, &vm.footer, theme, cols);

    if let Some(modal) = &vm.modal {
        render_modal(modal, theme, rows, cols);
    }
}
