//! View model types representing renderable UI state.
//!
//! View models are computed by `AppState::compute_viewmodel()` and consumed by
//! the renderer. They contain no business logic, only display-ready data:
//! formatted ranks, relative times, highlight ranges and selection marks.

/// Complete UI view model for rendering.
#[derive(Debug, Clone)]
pub struct UIViewModel {
    /// Title and device tabs.
    pub header: HeaderInfo,

    /// Filter bar, or bulk bar while something is selected.
    pub toolbar: Toolbar,

    /// State of the column heading row.
    pub table_header: TableHeaderInfo,

    /// Rows inside the visible window.
    pub display_items: Vec<DisplayItem>,

    /// Index of the cursor row within `display_items`.
    pub selected_index: usize,

    /// Shown instead of the table when there is nothing to list.
    pub empty_state: Option<EmptyState>,

    /// Overlay drawn on top of the table.
    pub modal: Option<ModalInfo>,

    /// Keybinding hints and the latest notice.
    pub footer: FooterInfo,
}

/// One keyword row.
#[derive(Debug, Clone)]
pub struct DisplayItem {
    pub keyword: String,

    /// Search matches in `keyword`, as `(start, end)` character indices.
    pub highlight_ranges: Vec<(usize, usize)>,

    /// Selected for bulk actions.
    pub checked: bool,

    /// Favorite (sticky) keyword.
    pub favorite: bool,

    /// Under the cursor.
    pub is_cursor: bool,

    /// A refresh is in flight on the external side.
    pub updating: bool,

    /// Current rank, `-` when unranked.
    pub position: String,

    /// Rank change versus the previous history entry; positive is an improvement.
    pub change: Option<i64>,

    /// Last seven ranks, oldest first.
    pub history: String,

    pub url: String,

    /// Relative time since the last update.
    pub updated: String,
}

/// Header display information.
#[derive(Debug, Clone)]
pub struct HeaderInfo {
    pub title: String,
    pub tabs: Vec<DeviceTab>,
    /// Keywords in the current view.
    pub view_count: usize,
}

/// A device tab with the device's keyword count.
#[derive(Debug, Clone)]
pub struct DeviceTab {
    pub label: String,
    pub count: usize,
    pub active: bool,
}

/// The row between header and table.
#[derive(Debug, Clone)]
pub enum Toolbar {
    Filters(FilterBarInfo),
    Bulk(BulkBarInfo),
}

/// Active filters and sort.
#[derive(Debug, Clone)]
pub struct FilterBarInfo {
    pub search: String,
    /// The search field is receiving input.
    pub search_active: bool,
    pub tags: Vec<String>,
    pub countries: Vec<String>,
    pub sort_label: String,
}

/// Bulk actions over the selection.
#[derive(Debug, Clone)]
pub struct BulkBarInfo {
    pub selected: usize,
}

/// Column heading row.
#[derive(Debug, Clone)]
pub struct TableHeaderInfo {
    /// Whether the select-all checkbox is drawn at all.
    pub show_toggle_all: bool,
    pub all_selected: bool,
}

/// Footer display information.
#[derive(Debug, Clone)]
pub struct FooterInfo {
    /// Keybinding help text for the current mode.
    pub keybindings: String,
    pub notice: Option<NoticeInfo>,
}

/// A notice line above the keybindings.
#[derive(Debug, Clone)]
pub struct NoticeInfo {
    pub text: String,
    pub is_error: bool,
}

/// Empty state message display information.
#[derive(Debug, Clone)]
pub struct EmptyState {
    /// Primary message (e.g., "Loading Keywords...").
    pub message: String,

    /// Secondary hint, possibly empty.
    pub subtitle: String,
}

/// Overlay contents.
#[derive(Debug, Clone)]
pub enum ModalInfo {
    /// Removal confirmation for the current selection.
    ConfirmRemoval {
        message: String,
        keywords: Vec<String>,
    },
    Details(DetailsInfo),
    TagManager(TagManagerInfo),
    FilterPicker {
        entries: Vec<PickerEntry>,
    },
    AddKeywords(AddKeywordsInfo),
}

/// Keyword details with full history.
#[derive(Debug, Clone)]
pub struct DetailsInfo {
    pub keyword: String,
    /// Label/value pairs.
    pub fields: Vec<(String, String)>,
    /// Date/rank pairs, newest first.
    pub history: Vec<(String, String)>,
}

/// Tag manager contents.
#[derive(Debug, Clone)]
pub struct TagManagerInfo {
    pub keyword: String,
    pub tags: Vec<String>,
    pub input: String,
    pub suggestions: Vec<String>,
}

/// One filter picker line.
#[derive(Debug, Clone)]
pub struct PickerEntry {
    pub label: String,
    pub active: bool,
    pub is_cursor: bool,
}

/// Add-keywords modal contents.
#[derive(Debug, Clone)]
pub struct AddKeywordsInfo {
    pub device: String,
    pub country: String,
    /// Committed lines, in typed order.
    pub lines: Vec<DraftLine>,
    /// Line being typed.
    pub input: String,
    /// Typing goes to the country field instead of the keyword line.
    pub country_focused: bool,
}

/// A committed add-keywords line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftLine {
    pub text: String,
    /// Already tracked on the chosen device; it will be skipped.
    pub tracked: bool,
}
