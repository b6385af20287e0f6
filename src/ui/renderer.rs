//! Top-level rendering coordinator.
//!
//! Rendering is a two-step process: compute the view model from `AppState`,
//! then hand it to the component layout.

use crate::app::AppState;
use crate::ui::components;

/// Renders the plugin UI to stdout.
///
/// `now` is the current unix time, used for the relative "updated" column.
/// Output is ANSI-styled and cursor-addressed; the screen is not cleared.
pub fn render(state: &AppState, rows: usize, cols: usize, now: i64) {
    let _span = tracing::trace_span!("render", rows, cols).entered();
    let viewmodel = state.compute_viewmodel(rows, now);
    components::render_layout(&viewmodel, &state.theme, rows, cols);
}
