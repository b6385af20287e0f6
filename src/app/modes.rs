//! Input modes and overlay state.
//!
//! The application is always in exactly one [`InputMode`]. Modes other than
//! `Normal` correspond to an overlay (search input, filter picker, modal) that
//! captures keyboard input until it is closed.
//!
//! # State Machine
//!
//! ```text
//!            '/'                 'f'
//! Search ◄────────── Normal ──────────► FilterPicker
//!                    │ │ │ │
//!                    │ │ │ └ 'n' ───► AddKeywords
//!                    │ │ └── Enter ─► Details
//!                    │ └──── 't' ───► TagManager
//!                'x' ▼
//!             ConfirmRemoval
//! ```
//!
//! Every overlay returns to `Normal` on Esc. `ConfirmRemoval` also returns
//! on its own once the selection it asks about is empty.

use crate::domain::{Device, Keyword, KeywordId};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

/// Current input handling mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputMode {
    /// Row navigation, selection and action keys.
    #[default]
    Normal,

    /// Typing into the search filter.
    Search,

    /// Toggling tag and country filters.
    FilterPicker,

    /// The removal confirmation modal is open.
    ConfirmRemoval,

    /// Editing the tags of one keyword.
    TagManager,

    /// Showing the details of one keyword.
    Details,

    /// Typing new keywords to track.
    AddKeywords,
}

impl InputMode {
    /// Whether printable characters should be treated as text input.
    #[must_use]
    pub const fn captures_text(self) -> bool {
        matches!(self, Self::Search | Self::TagManager | Self::AddKeywords)
    }
}

/// Which filter dimension a picker option toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterDimension {
    Tag,
    Country,
}

/// One toggleable entry of the filter picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOption {
    pub dimension: FilterDimension,
    pub value: String,
    pub active: bool,
}

/// Maximum number of tag suggestions offered by the tag manager.
pub const MAX_TAG_SUGGESTIONS: usize = 5;

/// Working state of the tag manager for one keyword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagEditor {
    /// The keyword being edited.
    pub keyword_id: KeywordId,
    /// Tags as they will be saved.
    pub tags: Vec<String>,
    /// Partially typed tag.
    pub input: String,
}

impl TagEditor {
    #[must_use]
    pub fn new(keyword_id: KeywordId, tags: Vec<String>) -> Self {
        Self {
            keyword_id,
            tags,
            input: String::new(),
        }
    }

    /// Adds the typed tag, or the given fallback, if not already present.
    ///
    /// Returns `false` when there was nothing to add.
    pub fn commit_input(&mut self) -> bool {
        let tag = self.input.trim().to_string();
        self.input.clear();
        if tag.is_empty() || self.tags.contains(&tag) {
            return false;
        }
        self.tags.push(tag);
        true
    }

    /// Backspace: edits the input, or drops the last tag when input is empty.
    pub fn backspace(&mut self) {
        if self.input.pop().is_none() {
            self.tags.pop();
        }
    }

    /// Existing domain tags not yet on the keyword, best fuzzy match first.
    ///
    /// With no input every candidate is offered in its original order.
    #[must_use]
    pub fn suggestions(&self, all_tags: &[String]) -> Vec<String> {
        let candidates = all_tags.iter().filter(|tag| !self.tags.contains(tag));

        if self.input.is_empty() {
            return candidates.take(MAX_TAG_SUGGESTIONS).cloned().collect();
        }

        let matcher = SkimMatcherV2::default();
        let mut scored: Vec<(i64, usize, &String)> = candidates
            .enumerate()
            .filter_map(|(idx, tag)| {
                matcher
                    .fuzzy_match(tag, &self.input)
                    .map(|score| (score, idx, tag))
            })
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
        scored
            .into_iter()
            .take(MAX_TAG_SUGGESTIONS)
            .map(|(_, _, tag)| tag.clone())
            .collect()
    }

    /// Replaces the input with the best suggestion, if any.
    pub fn complete(&mut self, all_tags: &[String]) {
        if let Some(best) = self.suggestions(all_tags).into_iter().next() {
            self.input = best;
        }
    }
}

/// Country preselected for new keywords.
pub const DEFAULT_COUNTRY: &str = "US";

/// Which add-keywords field receives typed characters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DraftField {
    #[default]
    Keywords,
    Country,
}

/// Outcome of checking a draft against the tracked collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftBatch {
    /// Keywords to send, in typed order.
    pub fresh: Vec<String>,
    /// Keywords already tracked for the draft's device.
    pub tracked: Vec<String>,
}

/// Working state of the add-keywords modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordDraft {
    /// One keyword per committed line.
    pub lines: Vec<String>,
    /// Line being typed.
    pub input: String,
    pub device: Device,
    pub country: String,
    pub focus: DraftField,
}

impl KeywordDraft {
    #[must_use]
    pub fn new(device: Device) -> Self {
        Self {
            lines: Vec::new(),
            input: String::new(),
            device,
            country: DEFAULT_COUNTRY.to_string(),
            focus: DraftField::Keywords,
        }
    }

    pub fn push_char(&mut self, c: char) {
        match self.focus {
            DraftField::Keywords => self.input.push(c),
            DraftField::Country => self.country.push(c),
        }
    }

    /// Backspace: edits the focused field. An empty keyword line drops the
    /// previous line.
    pub fn backspace(&mut self) {
        match self.focus {
            DraftField::Keywords => {
                if self.input.pop().is_none() {
                    self.lines.pop();
                }
            }
            DraftField::Country => {
                self.country.pop();
            }
        }
    }

    /// Moves the typed line into `lines` unless it is blank or already listed.
    ///
    /// Returns `false` when nothing was added.
    pub fn commit_input(&mut self) -> bool {
        let line = self.input.trim().to_string();
        self.input.clear();
        if line.is_empty() || self.lines.iter().any(|l| same_keyword(l, &line)) {
            return false;
        }
        self.lines.push(line);
        true
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            DraftField::Keywords => DraftField::Country,
            DraftField::Country => DraftField::Keywords,
        };
    }

    pub fn toggle_device(&mut self) {
        self.device = self.device.toggled();
    }

    /// Upper-cased country code, empty if none was typed.
    #[must_use]
    pub fn country_code(&self) -> String {
        self.country.trim().to_uppercase()
    }

    /// Whether `text` is already tracked for the draft's device.
    #[must_use]
    pub fn is_tracked(&self, existing: &[Keyword], text: &str) -> bool {
        existing
            .iter()
            .any(|k| k.device == self.device && same_keyword(&k.keyword, text))
    }

    /// Splits the committed lines into keywords to add and keywords the
    /// collection already tracks on this device.
    #[must_use]
    pub fn batch(&self, existing: &[Keyword]) -> DraftBatch {
        let (tracked, fresh): (Vec<String>, Vec<String>) = self
            .lines
            .iter()
            .cloned()
            .partition(|line| self.is_tracked(existing, line));
        DraftBatch { fresh, tracked }
    }
}

fn same_keyword(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn commit_ignores_blank_and_duplicate() {
        let mut editor = TagEditor::new(1, tags(&["seo"]));
        editor.input = "  ".to_string();
        assert!(!editor.commit_input());
        editor.input = "seo".to_string();
        assert!(!editor.commit_input());
        editor.input = " blog ".to_string();
        assert!(editor.commit_input());
        assert_eq!(editor.tags, tags(&["seo", "blog"]));
        assert!(editor.input.is_empty());
    }

    #[test]
    fn backspace_falls_through_to_tags() {
        let mut editor = TagEditor::new(1, tags(&["a", "b"]));
        editor.input = "x".to_string();
        editor.backspace();
        assert!(editor.input.is_empty());
        editor.backspace();
        assert_eq!(editor.tags, tags(&["a"]));
    }

    #[test]
    fn suggestions_skip_existing_and_rank_matches() {
        let all = tags(&["product", "blog", "pricing", "docs"]);
        let mut editor = TagEditor::new(1, tags(&["blog"]));
        assert_eq!(editor.suggestions(&all), tags(&["product", "pricing", "docs"]));

        editor.input = "pri".to_string();
        let ranked = editor.suggestions(&all);
        assert_eq!(ranked.first().map(String::as_str), Some("pricing"));
        assert!(!ranked.contains(&"docs".to_string()));

        editor.complete(&all);
        assert_eq!(editor.input, "pricing");
    }

    #[test]
    fn text_capturing_modes() {
        assert!(InputMode::Search.captures_text());
        assert!(InputMode::TagManager.captures_text());
        assert!(InputMode::AddKeywords.captures_text());
        assert!(!InputMode::Normal.captures_text());
        assert!(!InputMode::ConfirmRemoval.captures_text());
    }

    #[test]
    fn draft_lines_are_trimmed_and_unique() {
        let mut draft = KeywordDraft::new(Device::Desktop);
        for line in ["  rust book ", "Rust Book", "", "cargo"] {
            draft.input = line.to_string();
            draft.commit_input();
        }
        assert_eq!(draft.lines, tags(&["rust book", "cargo"]));

        draft.backspace();
        assert_eq!(draft.lines, tags(&["rust book"]));
    }

    #[test]
    fn draft_focus_routes_typing() {
        let mut draft = KeywordDraft::new(Device::Mobile);
        draft.push_char('a');
        draft.toggle_focus();
        draft.backspace();
        draft.backspace();
        draft.push_char('d');
        draft.push_char('e');
        assert_eq!(draft.input, "a");
        assert_eq!(draft.country_code(), "DE");
    }

    #[test]
    fn batch_skips_keywords_tracked_on_the_same_device() {
        let existing = vec![
            Keyword::new(1, "rust book", Device::Desktop),
            Keyword::new(2, "cargo", Device::Mobile),
        ];
        let mut draft = KeywordDraft::new(Device::Desktop);
        draft.lines = tags(&["Rust Book", "cargo", "clippy"]);

        let batch = draft.batch(&existing);
        assert_eq!(batch.fresh, tags(&["cargo", "clippy"]));
        assert_eq!(batch.tracked, tags(&["Rust Book"]));

        draft.toggle_device();
        assert_eq!(draft.batch(&existing).tracked, tags(&["cargo"]));
    }
}
