//! Application state management and view model computation.
//!
//! [`AppState`] is the single source of truth for the plugin: the raw keyword
//! collection, the user's filter/sort/device choices, the selection, overlay
//! state and the latest notice. The processed view is derived from these
//! through a memoized [`KeywordPipeline`] and is never edited directly.
//!
//! # Derived State
//!
//! Every method that changes a pipeline input ends with
//! [`AppState::refresh_view`], which recomputes the view (or reuses the cached
//! one), reconciles the selection against the visible identifiers and clamps
//! the cursor. Outside of that method the selection is therefore always a
//! subset of what the table shows, and the removal confirmation is never open
//! over an empty selection.
//!
//! # Example
//!
//! ```rust
//! use serpdeck::app::{AppState, ViewDefaults};
//! use serpdeck::domain::{Device, Keyword};
//! use serpdeck::ui::theme::Theme;
//!
//! let mut state = AppState::new("example.com", Theme::default(), ViewDefaults::default());
//! state.replace_keywords(vec![Keyword::new(1, "rust", Device::Desktop)]);
//! assert_eq!(state.visible().len(), 1);
//! let viewmodel = state.compute_viewmodel(24, 0);
//! assert_eq!(viewmodel.display_items.len(), 1);
//! ```

use super::bulk::BulkCoordinator;
use super::modes::{DraftField, FilterDimension, FilterOption, InputMode, KeywordDraft, TagEditor};
use super::selection::{Selection, SelectionEvent};
use crate::domain::{Device, Keyword, KeywordId};
use crate::pipeline::{all_countries, all_tags, DeviceGroups, FilterParams, KeywordPipeline, SortKey};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    AddKeywordsInfo, BulkBarInfo, DetailsInfo, DraftLine, DeviceTab, DisplayItem, EmptyState, FilterBarInfo, FooterInfo,
    HeaderInfo, ModalInfo, NoticeInfo, PickerEntry, TableHeaderInfo, TagManagerInfo, Toolbar,
    UIViewModel,
};
use std::sync::Arc;

/// Rows taken by header, tabs, toolbar, column headings and footer.
const CHROME_ROWS: usize = 6;

/// Days of history shown in the table.
const HISTORY_DAYS: usize = 7;

/// Initial device and sort, restored on domain switch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewDefaults {
    pub device: Device,
    pub sort: SortKey,
}

/// Severity of a [`Notice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A message for the user, shown in the footer until replaced or dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    #[must_use]
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            text: text.into(),
        }
    }
}

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Domain whose keywords are shown.
    pub domain: String,

    /// Raw keyword collection, replaced wholesale by the keyword source.
    keywords: Vec<Keyword>,

    /// Bumped every time `keywords` is replaced.
    revision: u64,

    /// True from load/reload/domain switch until the source answers.
    pub loading: bool,

    device: Device,
    filter: FilterParams,
    sort: SortKey,

    /// Selected keyword identifiers, always a subset of the visible ones.
    pub selection: Selection,

    /// Removal confirmation gate and mutation request construction.
    pub bulk: BulkCoordinator,

    pipeline: KeywordPipeline,
    view: Arc<DeviceGroups>,

    /// Zero-based cursor row within the visible keywords.
    pub cursor: usize,

    /// Current input handling mode.
    pub input_mode: InputMode,

    /// Cursor within the filter picker options.
    pub picker_cursor: usize,

    /// Tag manager working state, present in `InputMode::TagManager`.
    pub tag_editor: Option<TagEditor>,

    /// Keyword shown by the details modal.
    pub details: Option<KeywordId>,

    /// Add-keywords working state, present in `InputMode::AddKeywords`.
    pub draft: Option<KeywordDraft>,

    /// Latest mutation or source notice.
    pub notice: Option<Notice>,

    /// Color scheme for UI rendering.
    pub theme: Theme,

    defaults: ViewDefaults,
}

impl AppState {
    /// Creates a state waiting for its first keyword load.
    #[must_use]
    pub fn new(domain: impl Into<String>, theme: Theme, defaults: ViewDefaults) -> Self {
        let mut pipeline = KeywordPipeline::new();
        let filter = FilterParams::default();
        let view = pipeline.view(&[], 0, &filter, defaults.sort, defaults.device);

        Self {
            domain: domain.into(),
            keywords: Vec::new(),
            revision: 0,
            loading: true,
            device: defaults.device,
            filter,
            sort: defaults.sort,
            selection: Selection::new(),
            bulk: BulkCoordinator::new(),
            pipeline,
            view,
            cursor: 0,
            input_mode: InputMode::Normal,
            picker_cursor: 0,
            tag_editor: None,
            details: None,
            draft: None,
            notice: None,
            theme,
            defaults,
        }
    }

    #[must_use]
    pub fn keywords(&self) -> &[Keyword] {
        &self.keywords
    }

    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    #[must_use]
    pub const fn device(&self) -> Device {
        self.device
    }

    #[must_use]
    pub const fn sort(&self) -> SortKey {
        self.sort
    }

    #[must_use]
    pub const fn filter(&self) -> &FilterParams {
        &self.filter
    }

    /// The processed view for the active device.
    #[must_use]
    pub fn view(&self) -> &DeviceGroups {
        &self.view
    }

    /// Keywords visible in the table, in display order.
    #[must_use]
    pub fn visible(&self) -> &[Keyword] {
        self.view.active()
    }

    /// Looks a keyword up in the raw collection.
    #[must_use]
    pub fn keyword(&self, id: KeywordId) -> Option<&Keyword> {
        self.keywords.iter().find(|k| k.id == id)
    }

    /// The keyword under the cursor, if any.
    #[must_use]
    pub fn cursor_keyword(&self) -> Option<&Keyword> {
        self.visible().get(self.cursor)
    }

    /// Recomputes the view and keeps selection and cursor consistent with it.
    pub fn refresh_view(&mut self) {
        self.view = self.pipeline.view(
            &self.keywords,
            self.revision,
            &self.filter,
            self.sort,
            self.device,
        );

        let visible = self.view.visible_ids();
        let dropped = self.selection.reconcile(&visible);
        if dropped > 0 {
            tracing::debug!(dropped, remaining = self.selection.len(), "selection reconciled");
        }

        if self.bulk.is_awaiting_confirmation() && self.selection.is_empty() {
            tracing::debug!("nothing left to remove, closing confirmation");
            self.bulk.reset();
            self.input_mode = InputMode::Normal;
        }

        if visible.is_empty() {
            self.cursor = 0;
        } else {
            self.cursor = self.cursor.min(visible.len() - 1);
        }
    }

    /// Replaces the keyword collection with a fresh source answer.
    pub fn replace_keywords(&mut self, keywords: Vec<Keyword>) {
        self.keywords = keywords;
        self.revision += 1;
        self.loading = false;

        if let Some(id) = self.details {
            if self.keyword(id).is_none() {
                self.details = None;
                if self.input_mode == InputMode::Details {
                    self.input_mode = InputMode::Normal;
                }
            }
        }

        self.refresh_view();
    }

    /// Switches the viewed device. The selection never survives a switch.
    ///
    /// Returns `false` if `device` was already active.
    pub fn set_device(&mut self, device: Device) -> bool {
        if self.device == device {
            return false;
        }
        tracing::debug!(from = %self.device, to = %device, "switching device");
        self.device = device;
        self.selection.apply(SelectionEvent::ClearAll);
        self.cursor = 0;
        self.refresh_view();
        true
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.sort = sort;
        self.refresh_view();
    }

    pub fn toggle_tag_filter(&mut self, tag: &str) {
        self.filter.toggle_tag(tag);
        self.refresh_view();
    }

    pub fn toggle_country_filter(&mut self, country: &str) {
        self.filter.toggle_country(country);
        self.refresh_view();
    }

    /// Clears tag and country filters. The search query is kept.
    pub fn clear_filters(&mut self) {
        self.filter.tags.clear();
        self.filter.countries.clear();
        self.refresh_view();
    }

    pub fn push_search(&mut self, c: char) {
        self.filter.search.push(c);
        self.refresh_view();
    }

    pub fn pop_search(&mut self) {
        self.filter.search.pop();
        self.refresh_view();
    }

    pub fn clear_search(&mut self) {
        self.filter.search.clear();
        self.refresh_view();
    }

    /// Moves the cursor down by one row, wrapping to the top.
    pub fn move_cursor_down(&mut self) {
        let len = self.visible().len();
        if len == 0 {
            return;
        }
        self.cursor = (self.cursor + 1) % len;
    }

    /// Moves the cursor up by one row, wrapping to the bottom.
    pub fn move_cursor_up(&mut self) {
        let len = self.visible().len();
        if len == 0 {
            return;
        }
        self.cursor = if self.cursor == 0 { len - 1 } else { self.cursor - 1 };
    }

    /// Tags first (first-seen order), then countries (sorted).
    #[must_use]
    pub fn filter_options(&self) -> Vec<FilterOption> {
        let tags = all_tags(&self.keywords).into_iter().map(|tag| FilterOption {
            active: self.filter.tags.contains(&tag),
            dimension: FilterDimension::Tag,
            value: tag,
        });
        let countries = all_countries(&self.keywords)
            .into_iter()
            .map(|country| FilterOption {
                active: self.filter.countries.contains(&country),
                dimension: FilterDimension::Country,
                value: country,
            });
        tags.chain(countries).collect()
    }

    pub fn move_picker_down(&mut self) {
        let len = self.filter_options().len();
        if len > 0 {
            self.picker_cursor = (self.picker_cursor + 1) % len;
        }
    }

    pub fn move_picker_up(&mut self) {
        let len = self.filter_options().len();
        if len > 0 {
            self.picker_cursor = if self.picker_cursor == 0 { len - 1 } else { self.picker_cursor - 1 };
        }
    }

    /// Toggles the filter option under the picker cursor.
    pub fn toggle_picker_option(&mut self) {
        let Some(option) = self.filter_options().into_iter().nth(self.picker_cursor) else {
            return;
        };
        match option.dimension {
            FilterDimension::Tag => self.toggle_tag_filter(&option.value),
            FilterDimension::Country => self.toggle_country_filter(&option.value),
        }
    }

    /// Closes whatever overlay is open and returns to normal mode.
    ///
    /// An open removal confirmation is cancelled, which clears the selection.
    pub fn close_overlay(&mut self) {
        if self.bulk.is_awaiting_confirmation() {
            self.bulk.cancel_removal(&mut self.selection);
        }
        self.tag_editor = None;
        self.details = None;
        self.draft = None;
        self.input_mode = InputMode::Normal;
    }

    /// Resets every per-domain piece of state and starts loading `domain`.
    pub fn reset_for_domain(&mut self, domain: &str) {
        self.domain = domain.to_string();
        self.keywords.clear();
        self.revision += 1;
        self.loading = true;
        self.device = self.defaults.device;
        self.sort = self.defaults.sort;
        self.filter = FilterParams::default();
        self.selection.apply(SelectionEvent::ClearAll);
        self.bulk.reset();
        self.cursor = 0;
        self.picker_cursor = 0;
        self.tag_editor = None;
        self.details = None;
        self.draft = None;
        self.notice = None;
        self.input_mode = InputMode::Normal;
        self.refresh_view();
    }

    /// Number of keywords per device in the raw collection.
    #[must_use]
    pub fn device_counts(&self) -> Vec<(Device, usize)> {
        Device::ALL
            .iter()
            .map(|device| {
                (*device, self.keywords.iter().filter(|k| k.device == *device).count())
            })
            .collect()
    }

    /// Computes a renderable view model for a terminal of `rows` lines.
    ///
    /// The visible window is centered on the cursor, then shifted so that it
    /// stays full near the end of the list. `now` (unix seconds) drives the
    /// relative "updated" column.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, now: i64) -> UIViewModel {
        let visible = self.visible();
        let available_rows = rows.saturating_sub(CHROME_ROWS).max(1);

        let mut visible_start = self.cursor.saturating_sub(available_rows / 2);
        let visible_end = (visible_start + available_rows).min(visible.len());
        if visible_end - visible_start < available_rows && visible.len() >= available_rows {
            visible_start = visible_end.saturating_sub(available_rows);
        }

        let display_items = visible
            .get(visible_start..visible_end)
            .unwrap_or_default()
            .iter()
            .enumerate()
            .map(|(relative_idx, keyword)| {
                self.compute_display_item(keyword, visible_start + relative_idx, now)
            })
            .collect();

        let ids = self.view.visible_ids();

        UIViewModel {
            header: self.compute_header(),
            toolbar: self.compute_toolbar(),
            table_header: TableHeaderInfo {
                show_toggle_all: !ids.is_empty(),
                all_selected: !ids.is_empty() && self.selection.is_all_selected(&ids),
            },
            display_items,
            selected_index: self.cursor.saturating_sub(visible_start),
            empty_state: self.compute_empty_state(),
            modal: self.compute_modal(now),
            footer: self.compute_footer(),
        }
    }

    fn compute_display_item(&self, keyword: &Keyword, absolute_idx: usize, now: i64) -> DisplayItem {
        let history = keyword
            .recent_history(HISTORY_DAYS)
            .iter()
            .map(|(_, rank)| format_rank(*rank))
            .collect::<Vec<_>>()
            .join(" ");

        DisplayItem {
            keyword: keyword.keyword.clone(),
            highlight_ranges: match_ranges(&keyword.keyword, &self.filter.search),
            checked: self.selection.contains(keyword.id),
            favorite: keyword.sticky,
            is_cursor: absolute_idx == self.cursor,
            updating: keyword.updating,
            position: format_rank(keyword.position),
            change: keyword.position_change(),
            history,
            url: keyword.url.clone(),
            updated: keyword.updated_ago(now),
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        let tabs = self
            .device_counts()
            .into_iter()
            .map(|(device, count)| DeviceTab {
                label: device.label().to_string(),
                count,
                active: device == self.device,
            })
            .collect();

        let title = if self.domain.is_empty() {
            " serpdeck ".to_string()
        } else {
            format!(" serpdeck · {} ", self.domain)
        };

        HeaderInfo {
            title,
            tabs,
            view_count: self.visible().len(),
        }
    }

    fn compute_toolbar(&self) -> Toolbar {
        if self.selection.is_empty() {
            Toolbar::Filters(FilterBarInfo {
                search: self.filter.search.clone(),
                search_active: self.input_mode == InputMode::Search,
                tags: self.filter.tags.iter().cloned().collect(),
                countries: self.filter.countries.iter().cloned().collect(),
                sort_label: self.sort.label().to_string(),
            })
        } else {
            Toolbar::Bulk(BulkBarInfo {
                selected: self.selection.len(),
            })
        }
    }

    fn compute_empty_state(&self) -> Option<EmptyState> {
        if !self.visible().is_empty() {
            return None;
        }
        if self.loading {
            return Some(EmptyState {
                message: "Loading Keywords...".to_string(),
                subtitle: String::new(),
            });
        }

        let on_device = self.keywords.iter().any(|k| k.device == self.device);
        if on_device && !self.filter.is_empty() {
            Some(EmptyState {
                message: "No keywords match the active filters.".to_string(),
                subtitle: "Press c to clear tag and country filters, / to edit the search".to_string(),
            })
        } else {
            Some(EmptyState {
                message: "No Keywords Added for this Device Type.".to_string(),
                subtitle: "Press Tab to switch device".to_string(),
            })
        }
    }

    fn compute_modal(&self, now: i64) -> Option<ModalInfo> {
        match self.input_mode {
            InputMode::Normal | InputMode::Search => None,
            InputMode::ConfirmRemoval => {
                let count = self.selection.len();
                let keywords = self
                    .selection
                    .ids()
                    .into_iter()
                    .filter_map(|id| self.keyword(id).map(|k| k.keyword.clone()))
                    .collect();
                let message = if count == 1 {
                    "Remove this keyword?".to_string()
                } else {
                    format!("Remove these {count} keywords?")
                };
                Some(ModalInfo::ConfirmRemoval { message, keywords })
            }
            InputMode::Details => {
                let keyword = self.details.and_then(|id| self.keyword(id))?;
                Some(ModalInfo::Details(details_info(keyword, now)))
            }
            InputMode::TagManager => {
                let editor = self.tag_editor.as_ref()?;
                let keyword = self
                    .keyword(editor.keyword_id)
                    .map(|k| k.keyword.clone())
                    .unwrap_or_default();
                Some(ModalInfo::TagManager(TagManagerInfo {
                    keyword,
                    tags: editor.tags.clone(),
                    input: editor.input.clone(),
                    suggestions: editor.suggestions(&all_tags(&self.keywords)),
                }))
            }
            InputMode::FilterPicker => {
                let entries = self
                    .filter_options()
                    .into_iter()
                    .enumerate()
                    .map(|(idx, option)| PickerEntry {
                        label: match option.dimension {
                            FilterDimension::Tag => format!("tag: {}", option.value),
                            FilterDimension::Country => format!("country: {}", option.value),
                        },
                        active: option.active,
                        is_cursor: idx == self.picker_cursor,
                    })
                    .collect();
                Some(ModalInfo::FilterPicker { entries })
            }
            InputMode::AddKeywords => {
                let draft = self.draft.as_ref()?;
                let lines = draft
                    .lines
                    .iter()
                    .map(|line| DraftLine {
                        text: line.clone(),
                        tracked: draft.is_tracked(&self.keywords, line),
                    })
                    .collect();
                Some(ModalInfo::AddKeywords(AddKeywordsInfo {
                    device: draft.device.label().to_string(),
                    country: draft.country.clone(),
                    lines,
                    input: draft.input.clone(),
                    country_focused: draft.focus == DraftField::Country,
                }))
            }
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match self.input_mode {
            InputMode::Normal if self.selection.is_empty() => {
                "j/k: move  space: select  a: all  Tab: device  s: sort  /: search  f: filters  n: add  r: refresh  x: remove  *: favorite  t: tags  Enter: details  R: reload  q: quit"
            }
            InputMode::Normal => {
                "space: toggle  a: all  r: refresh selected  x: remove selected  Esc: clear selection  q: quit"
            }
            InputMode::Search => "Type to search  Enter: keep query  Esc: clear query",
            InputMode::FilterPicker => "j/k: move  space: toggle  c: clear filters  Esc: close",
            InputMode::ConfirmRemoval => "y/Enter: remove  n/Esc: cancel",
            InputMode::TagManager => {
                "Type a tag  Enter: add (empty input saves)  Tab: complete  Backspace: delete  Esc: cancel"
            }
            InputMode::Details => "Esc: close",
            InputMode::AddKeywords => {
                "Type a keyword  Enter: next line (empty line adds)  Tab: keyword/country  ←/→: device  Esc: cancel"
            }
        };

        FooterInfo {
            keybindings: keybindings.to_string(),
            notice: self.notice.as_ref().map(|notice| NoticeInfo {
                text: notice.text.clone(),
                is_error: notice.level == NoticeLevel::Error,
            }),
        }
    }
}

fn format_rank(rank: u32) -> String {
    if rank == 0 {
        "-".to_string()
    } else {
        rank.to_string()
    }
}

fn details_info(keyword: &Keyword, now: i64) -> DetailsInfo {
    let change = keyword
        .position_change()
        .map_or_else(|| "-".to_string(), |c| format!("{c:+}"));
    let tags = if keyword.tags.is_empty() {
        "-".to_string()
    } else {
        keyword.tags.join(", ")
    };

    let fields = vec![
        ("Device".to_string(), keyword.device.label().to_string()),
        ("Country".to_string(), keyword.country.clone()),
        ("Position".to_string(), format_rank(keyword.position)),
        ("Change".to_string(), change),
        ("Tags".to_string(), tags),
        ("URL".to_string(), keyword.url.clone()),
        ("Updated".to_string(), keyword.updated_ago(now)),
        ("Favorite".to_string(), if keyword.sticky { "yes" } else { "no" }.to_string()),
    ];

    let history = keyword
        .dated_history()
        .into_iter()
        .rev()
        .map(|(date, rank)| (date.format("%Y-%m-%d").to_string(), format_rank(rank)))
        .collect();

    DetailsInfo {
        keyword: keyword.keyword.clone(),
        fields,
        history,
    }
}

/// Character ranges of every case-insensitive occurrence of `query` in `text`.
///
/// Ranges are `(start, end)` character indices with an exclusive end and never
/// overlap.
#[must_use]
pub fn match_ranges(text: &str, query: &str) -> Vec<(usize, usize)> {
    let fold = |c: char| c.to_lowercase().next().unwrap_or(c);
    let haystack: Vec<char> = text.chars().map(fold).collect();
    let needle: Vec<char> = query.chars().map(fold).collect();

    if needle.is_empty() || needle.len() > haystack.len() {
        return vec![];
    }

    let mut ranges = Vec::new();
    let mut idx = 0;
    while idx + needle.len() <= haystack.len() {
        if haystack[idx..idx + needle.len()] == needle[..] {
            ranges.push((idx, idx + needle.len()));
            idx += needle.len();
        } else {
            idx += 1;
        }
    }
    ranges
}
