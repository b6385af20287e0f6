//! Multi-selection of keyword rows.
//!
//! [`Selection`] is a set of keyword identifiers scoped to the current view.
//! It is reconciled against the visible identifiers every time the view is
//! recomputed, and cleared whenever the device changes, so a selection made on
//! one device never leaks into another.

use crate::domain::KeywordId;
use std::collections::BTreeSet;

/// A single selection transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionEvent {
    Select(KeywordId),
    Deselect(KeywordId),
    Toggle(KeywordId),
    /// Replace the selection with exactly these identifiers.
    SelectAllVisible(Vec<KeywordId>),
    /// Clear if everything visible is selected, select all visible otherwise.
    ToggleAll(Vec<KeywordId>),
    /// Drop identifiers that are no longer visible.
    Reconcile(Vec<KeywordId>),
    ClearAll,
}

/// Set of selected keyword identifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: BTreeSet<KeywordId>,
}

impl Selection {
    /// Creates an empty selection.
    #[must_use]
    pub const fn new() -> Self {
        Self { ids: BTreeSet::new() }
    }

    /// Applies one transition.
    pub fn apply(&mut self, event: SelectionEvent) {
        match event {
            SelectionEvent::Select(id) => self.select(id),
            SelectionEvent::Deselect(id) => self.deselect(id),
            SelectionEvent::Toggle(id) => self.toggle(id),
            SelectionEvent::SelectAllVisible(visible) => self.select_all_visible(&visible),
            SelectionEvent::ToggleAll(visible) => self.toggle_all(&visible),
            SelectionEvent::Reconcile(visible) => {
                self.reconcile(&visible);
            }
            SelectionEvent::ClearAll => self.clear_all(),
        }
    }

    pub fn select(&mut self, id: KeywordId) {
        self.ids.insert(id);
    }

    pub fn deselect(&mut self, id: KeywordId) {
        self.ids.remove(&id);
    }

    /// Selects the id if absent, deselects it if present.
    pub fn toggle(&mut self, id: KeywordId) {
        if !self.ids.remove(&id) {
            self.ids.insert(id);
        }
    }

    /// Replaces the selection with exactly `visible`.
    pub fn select_all_visible(&mut self, visible: &[KeywordId]) {
        self.ids = visible.iter().copied().collect();
    }

    /// The "select all" control: clears when everything visible is already
    /// selected, otherwise selects everything visible.
    pub fn toggle_all(&mut self, visible: &[KeywordId]) {
        if self.is_all_selected(visible) {
            self.clear_all();
        } else {
            self.select_all_visible(visible);
        }
    }

    pub fn clear_all(&mut self) {
        self.ids.clear();
    }

    /// Keeps only identifiers that are still visible.
    ///
    /// Returns how many identifiers were dropped.
    pub fn reconcile(&mut self, visible: &[KeywordId]) -> usize {
        let before = self.ids.len();
        let visible: BTreeSet<KeywordId> = visible.iter().copied().collect();
        self.ids.retain(|id| visible.contains(id));
        before - self.ids.len()
    }

    /// True iff the selection equals `visible` exactly.
    #[must_use]
    pub fn is_all_selected(&self, visible: &[KeywordId]) -> bool {
        let visible: BTreeSet<KeywordId> = visible.iter().copied().collect();
        self.ids == visible
    }

    #[must_use]
    pub fn contains(&self, id: KeywordId) -> bool {
        self.ids.contains(&id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Selected identifiers in ascending order.
    #[must_use]
    pub fn ids(&self) -> Vec<KeywordId> {
        self.ids.iter().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        let selection = Selection::new();
        assert!(selection.is_empty());
        assert_eq!(selection.len(), 0);
    }

    #[test]
    fn select_and_deselect_are_idempotent() {
        let mut selection = Selection::new();
        selection.select(4);
        selection.select(4);
        assert_eq!(selection.ids(), vec![4]);
        selection.deselect(4);
        selection.deselect(4);
        assert!(selection.is_empty());
    }

    #[test]
    fn toggle_flips_membership() {
        let mut selection = Selection::new();
        selection.apply(SelectionEvent::Toggle(1));
        assert!(selection.contains(1));
        selection.apply(SelectionEvent::Toggle(1));
        assert!(!selection.contains(1));
    }

    #[test]
    fn select_all_then_toggle_member_breaks_all_selected() {
        let visible = vec![1, 2, 3];
        let mut selection = Selection::new();
        selection.apply(SelectionEvent::SelectAllVisible(visible.clone()));
        assert!(selection.is_all_selected(&visible));

        for id in &visible {
            let mut toggled = selection.clone();
            toggled.toggle(*id);
            assert!(!toggled.is_all_selected(&visible));
        }
    }

    #[test]
    fn all_selected_requires_exact_membership() {
        let mut selection = Selection::new();
        selection.select_all_visible(&[1, 2]);
        assert!(!selection.is_all_selected(&[1, 3]));
        assert!(!selection.is_all_selected(&[1, 2, 3]));
        selection.select(9);
        assert!(!selection.is_all_selected(&[1, 2]));
    }

    #[test]
    fn toggle_all_alternates() {
        let visible = vec![5, 6];
        let mut selection = Selection::new();
        selection.select(5);
        selection.apply(SelectionEvent::ToggleAll(visible.clone()));
        assert_eq!(selection.ids(), vec![5, 6]);
        selection.apply(SelectionEvent::ToggleAll(visible));
        assert!(selection.is_empty());
    }

    #[test]
    fn reconcile_drops_hidden_ids() {
        let mut selection = Selection::new();
        selection.select_all_visible(&[1, 2, 3]);
        assert_eq!(selection.reconcile(&[2, 3, 4]), 1);
        assert_eq!(selection.ids(), vec![2, 3]);
        selection.apply(SelectionEvent::Reconcile(vec![]));
        assert!(selection.is_empty());
    }

    #[test]
    fn clear_all_empties() {
        let mut selection = Selection::new();
        selection.select_all_visible(&[1, 2]);
        selection.apply(SelectionEvent::ClearAll);
        assert!(selection.is_empty());
    }
}
