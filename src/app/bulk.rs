//! Bulk action coordination.
//!
//! [`BulkCoordinator`] turns refresh/remove intent over the current selection
//! into batch [`MutationRequest`]s, and per-row favorite/tag intent into single
//! keyword requests. New keywords go out as one add batch per device. Removal goes through a confirmation gate; refresh does not.
//!
//! Selection is cleared as soon as a batch request is dispatched, before the
//! external mutation reports back. A failed mutation is surfaced through its
//! own notice and is never retried here.

use crate::app::modes::KeywordDraft;
use crate::app::selection::{Selection, SelectionEvent};
use crate::domain::{Keyword, KeywordId};
use crate::mutation::MutationRequest;

/// State of the removal confirmation gate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RemovalGate {
    #[default]
    Closed,
    /// The confirmation modal is showing for the current selection.
    AwaitingConfirmation,
}

/// Coordinates bulk and per-row keyword actions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkCoordinator {
    gate: RemovalGate,
}

impl BulkCoordinator {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            gate: RemovalGate::Closed,
        }
    }

    #[must_use]
    pub const fn gate(&self) -> RemovalGate {
        self.gate
    }

    #[must_use]
    pub fn is_awaiting_confirmation(&self) -> bool {
        self.gate == RemovalGate::AwaitingConfirmation
    }

    /// Refreshes every selected keyword in one batch and clears the selection.
    ///
    /// Returns `None` when nothing is selected.
    pub fn refresh_selected(&mut self, selection: &mut Selection) -> Option<MutationRequest> {
        if selection.is_empty() {
            tracing::debug!("refresh requested with empty selection");
            return None;
        }
        let ids = selection.ids();
        tracing::debug!(count = ids.len(), "dispatching batch refresh");
        selection.apply(SelectionEvent::ClearAll);
        Some(MutationRequest::refresh(ids))
    }

    /// Opens the confirmation gate for the current selection.
    ///
    /// Returns `false`, leaving the gate closed, when nothing is selected.
    pub fn request_removal(&mut self, selection: &Selection) -> bool {
        if selection.is_empty() {
            tracing::debug!("removal requested with empty selection");
            return false;
        }
        tracing::debug!(count = selection.len(), "awaiting removal confirmation");
        self.gate = RemovalGate::AwaitingConfirmation;
        true
    }

    /// Row-level remove: the selection becomes exactly this keyword and the
    /// confirmation gate opens.
    pub fn request_row_removal(&mut self, selection: &mut Selection, id: KeywordId) {
        selection.apply(SelectionEvent::SelectAllVisible(vec![id]));
        self.gate = RemovalGate::AwaitingConfirmation;
        tracing::debug!(keyword_id = id, "awaiting single keyword removal confirmation");
    }

    /// Confirms removal: deletes the whole selection in one batch, closes the
    /// gate and clears the selection.
    ///
    /// Returns `None` if the gate was not open or the selection emptied while
    /// the modal was showing.
    pub fn confirm_removal(&mut self, selection: &mut Selection) -> Option<MutationRequest> {
        if !self.is_awaiting_confirmation() {
            return None;
        }
        self.gate = RemovalGate::Closed;
        if selection.is_empty() {
            tracing::debug!("removal confirmed but selection is empty");
            return None;
        }
        let ids = selection.ids();
        tracing::debug!(count = ids.len(), "dispatching batch delete");
        selection.apply(SelectionEvent::ClearAll);
        Some(MutationRequest::delete(ids))
    }

    /// Dismisses the confirmation gate; nothing is dispatched and the selection
    /// is cleared.
    pub fn cancel_removal(&mut self, selection: &mut Selection) {
        if self.is_awaiting_confirmation() {
            tracing::debug!("removal cancelled");
        }
        self.gate = RemovalGate::Closed;
        selection.apply(SelectionEvent::ClearAll);
    }

    /// Closes the gate without touching the selection (domain switch, reload).
    pub fn reset(&mut self) {
        self.gate = RemovalGate::Closed;
    }

    /// Refreshes a single row. The selection is left alone.
    #[must_use]
    pub fn refresh_row(id: KeywordId) -> MutationRequest {
        MutationRequest::refresh(vec![id])
    }

    /// Flips the favorite flag of a keyword.
    #[must_use]
    pub fn toggle_favorite(keyword: &Keyword) -> MutationRequest {
        MutationRequest::favorite(keyword.id, !keyword.sticky)
    }

    /// Replaces a keyword's tags.
    ///
    /// Tags are trimmed; empty and repeated tags are dropped, first occurrence
    /// wins.
    #[must_use]
    pub fn update_tags(id: KeywordId, tags: &[String]) -> MutationRequest {
        let mut cleaned: Vec<String> = Vec::with_capacity(tags.len());
        for tag in tags.iter().map(|t| t.trim()).filter(|t| !t.is_empty()) {
            if !cleaned.iter().any(|existing| existing == tag) {
                cleaned.push(tag.to_string());
            }
        }
        MutationRequest::update_tags(id, cleaned)
    }

    /// Adds the draft's keywords that `existing` does not already track on the
    /// draft's device.
    ///
    /// Returns `None` when every line is blank or already tracked.
    #[must_use]
    pub fn add_keywords(draft: &KeywordDraft, existing: &[Keyword]) -> Option<MutationRequest> {
        let batch = draft.batch(existing);
        if !batch.tracked.is_empty() {
            tracing::debug!(skipped = ?batch.tracked, device = %draft.device, "skipping tracked keywords");
        }
        if batch.fresh.is_empty() {
            return None;
        }
        tracing::debug!(count = batch.fresh.len(), device = %draft.device, "dispatching keyword add");
        Some(MutationRequest::add(batch.fresh, draft.device, draft.country_code()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Device;

    fn selected(ids: &[KeywordId]) -> Selection {
        let mut selection = Selection::new();
        selection.select_all_visible(ids);
        selection
    }

    #[test]
    fn refresh_dispatches_one_batch_and_clears() {
        let mut bulk = BulkCoordinator::new();
        let mut selection = selected(&[3, 1]);
        let request = bulk.refresh_selected(&mut selection).unwrap();
        assert!(matches!(request, MutationRequest::Refresh { ref ids, .. } if ids == &vec![1, 3]));
        assert!(selection.is_empty());
    }

    #[test]
    fn refresh_with_empty_selection_is_noop() {
        let mut bulk = BulkCoordinator::new();
        let mut selection = Selection::new();
        assert!(bulk.refresh_selected(&mut selection).is_none());
    }

    #[test]
    fn removal_requires_confirmation() {
        let mut bulk = BulkCoordinator::new();
        let mut selection = selected(&[1, 2]);

        assert!(bulk.confirm_removal(&mut selection).is_none());
        assert_eq!(selection.len(), 2);

        assert!(bulk.request_removal(&selection));
        assert_eq!(bulk.gate(), RemovalGate::AwaitingConfirmation);

        let request = bulk.confirm_removal(&mut selection).unwrap();
        assert!(matches!(request, MutationRequest::Delete { ref ids, .. } if ids == &vec![1, 2]));
        assert!(selection.is_empty());
        assert_eq!(bulk.gate(), RemovalGate::Closed);
    }

    #[test]
    fn cancel_clears_selection_without_dispatch() {
        let mut bulk = BulkCoordinator::new();
        let mut selection = selected(&[1]);
        assert!(bulk.request_removal(&selection));
        bulk.cancel_removal(&mut selection);
        assert!(selection.is_empty());
        assert!(!bulk.is_awaiting_confirmation());
    }

    #[test]
    fn empty_selection_never_opens_gate() {
        let mut bulk = BulkCoordinator::new();
        assert!(!bulk.request_removal(&Selection::new()));
        assert_eq!(bulk.gate(), RemovalGate::Closed);
    }

    #[test]
    fn row_removal_replaces_selection() {
        let mut bulk = BulkCoordinator::new();
        let mut selection = selected(&[1, 2]);
        bulk.request_row_removal(&mut selection, 7);
        assert_eq!(selection.ids(), vec![7]);
        let request = bulk.confirm_removal(&mut selection).unwrap();
        assert_eq!(request.ids(), vec![7]);
    }

    #[test]
    fn per_row_requests() {
        let keyword = Keyword {
            sticky: true,
            ..Keyword::new(4, "a", Device::Desktop)
        };
        assert!(matches!(
            BulkCoordinator::toggle_favorite(&keyword),
            MutationRequest::Favorite { id: 4, sticky: false, .. }
        ));
        assert_eq!(BulkCoordinator::refresh_row(4).ids(), vec![4]);

        let tags = vec![" seo ".to_string(), String::new(), "seo".to_string(), "blog".to_string()];
        assert!(matches!(
            BulkCoordinator::update_tags(4, &tags),
            MutationRequest::UpdateTags { id: 4, ref tags, .. } if tags == &vec!["seo".to_string(), "blog".to_string()]
        ));
    }

    #[test]
    fn add_sends_only_untracked_keywords() {
        let existing = vec![Keyword::new(1, "rust book", Device::Desktop)];
        let mut draft = KeywordDraft::new(Device::Desktop);
        draft.lines = vec!["rust book".to_string(), "cargo".to_string()];
        draft.country = " de ".to_string();

        let request = BulkCoordinator::add_keywords(&draft, &existing).unwrap();
        assert_eq!(
            request,
            MutationRequest::Add {
                keywords: vec!["cargo".to_string()],
                device: Device::Desktop,
                country: "DE".to_string(),
                trace_context: None,
            }
        );

        draft.lines.truncate(1);
        assert!(BulkCoordinator::add_keywords(&draft, &existing).is_none());
    }
}
