//! Event handling and state transition logic.
//!
//! [`handle_event`] is the only place that mutates [`AppState`]. It receives
//! events translated from Zellij input by the plugin shim (keys are mapped to
//! intent per input mode there) as well as results of the keyword source and
//! mutation commands, and answers with whether to re-render plus the actions
//! the shim should execute.
//!
//! # Event Types
//!
//! - **Navigation**: `KeyDown`, `KeyUp`, `SwitchDevice`, `SetDevice`, `CycleSort`, `SetSort`
//! - **Selection**: `ToggleRow`, `ToggleAll`
//! - **Input**: `SearchMode`, `Char`, `Backspace`, `Submit`, `Complete`, `Escape`
//! - **Filters**: `OpenFilterPicker`, `ClearFilters`
//! - **Keyword actions**: `Refresh`, `Remove`, `ConfirmRemoval`, `CancelRemoval`,
//!   `ToggleFavorite`, `ManageTags`, `ShowDetails`, `AddKeywords`
//! - **System**: `KeywordsLoaded`, `SourceFailed`, `MutationFinished`,
//!   `DomainChanged`, `Reload`, `CloseFocus`
//!
//! # Example
//!
//! ```rust
//! use serpdeck::app::{handle_event, AppState, Event, ViewDefaults};
//! use serpdeck::ui::theme::Theme;
//!
//! let mut state = AppState::new("example.com", Theme::default(), ViewDefaults::default());
//! let payload = r#"[{"ID": 1, "keyword": "rust", "device": "desktop"}]"#.to_string();
//! let (render, actions) = handle_event(&mut state, &Event::KeywordsLoaded { payload })?;
//! assert!(render && actions.is_empty());
//! # Ok::<(), serpdeck::domain::SerpdeckError>(())
//! ```

use crate::app::bulk::BulkCoordinator;
use crate::app::modes::{DraftField, InputMode, KeywordDraft, TagEditor};
use crate::app::selection::SelectionEvent;
use crate::app::state::Notice;
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::domain::{parse_keywords, Device};
use crate::mutation::{MutationKind, MutationOutcome};
use crate::pipeline::{all_tags, SortKey};

/// Events triggered by user input or by the external commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Moves the cursor (or the filter picker cursor) down, wrapping.
    KeyDown,
    /// Moves the cursor (or the filter picker cursor) up, wrapping.
    KeyUp,
    /// Toggles the cursor row's selection, or the picker option under the cursor.
    ToggleRow,
    /// The select-all checkbox.
    ToggleAll,
    /// Switches to the other device, or the add-keywords device while that
    /// modal is open.
    SwitchDevice,
    SetDevice(Device),
    /// Advances to the next sort key.
    CycleSort,
    SetSort(SortKey),

    /// Focuses the search field.
    SearchMode,
    /// Text input for the search field or the tag manager.
    Char(char),
    Backspace,
    /// Enter. Its meaning depends on the input mode.
    Submit,
    /// Tab: take the best tag suggestion, or move between add-keywords fields.
    Complete,
    /// Leaves the current mode; in normal mode clears the selection or notice.
    Escape,

    OpenFilterPicker,
    /// Drops tag and country filters.
    ClearFilters,

    /// Refreshes the selection, or the cursor row when nothing is selected.
    Refresh,
    /// Asks to remove the selection, or the cursor row when nothing is selected.
    Remove,
    ConfirmRemoval,
    CancelRemoval,
    ToggleFavorite,
    /// Opens the tag manager for the cursor row.
    ManageTags,
    /// Opens the details modal for the cursor row.
    ShowDetails,
    /// Opens the add-keywords modal for the active device.
    AddKeywords,

    /// Re-runs the keyword source.
    Reload,
    /// Closes the floating pane and hides the plugin UI.
    CloseFocus,

    /// Raw output of the keyword source.
    KeywordsLoaded {
        payload: String,
    },

    /// The keyword source could not be run or exited with an error.
    SourceFailed {
        error: String,
    },

    /// A mutation command finished.
    MutationFinished(MutationOutcome),

    /// The plugin was pointed at another domain.
    DomainChanged {
        domain: String,
    },
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// Returns `(should_render, actions)`. Events that do not apply to the current
/// input mode are ignored and request no render.
///
/// # Errors
///
/// Reserved for failures while building actions; source and mutation problems
/// are reported to the user as notices instead.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!(
        "handle_event",
        event_type = ?event,
        mode = ?state.input_mode
    )
    .entered();

    let mode = state.input_mode;

    match event {
        Event::KeyDown => match mode {
            InputMode::Normal => {
                state.move_cursor_down();
                Ok((true, vec![]))
            }
            InputMode::FilterPicker => {
                state.move_picker_down();
                Ok((true, vec![]))
            }
            _ => Ok((false, vec![])),
        },
        Event::KeyUp => match mode {
            InputMode::Normal => {
                state.move_cursor_up();
                Ok((true, vec![]))
            }
            InputMode::FilterPicker => {
                state.move_picker_up();
                Ok((true, vec![]))
            }
            _ => Ok((false, vec![])),
        },
        Event::ToggleRow => match mode {
            InputMode::Normal => {
                let Some(id) = state.cursor_keyword().map(|k| k.id) else {
                    return Ok((false, vec![]));
                };
                state.selection.apply(SelectionEvent::Toggle(id));
                tracing::debug!(keyword_id = id, selected = state.selection.len(), "row toggled");
                Ok((true, vec![]))
            }
            InputMode::FilterPicker => {
                state.toggle_picker_option();
                Ok((true, vec![]))
            }
            _ => Ok((false, vec![])),
        },
        Event::ToggleAll => {
            if mode != InputMode::Normal {
                return Ok((false, vec![]));
            }
            let visible = state.view().visible_ids();
            if visible.is_empty() {
                return Ok((false, vec![]));
            }
            state.selection.apply(SelectionEvent::ToggleAll(visible));
            Ok((true, vec![]))
        }
        Event::SwitchDevice => match mode {
            InputMode::Normal => {
                let next = state.device().toggled();
                Ok((state.set_device(next), vec![]))
            }
            InputMode::AddKeywords => {
                if let Some(draft) = state.draft.as_mut() {
                    draft.toggle_device();
                }
                Ok((true, vec![]))
            }
            _ => Ok((false, vec![])),
        },
        Event::SetDevice(device) => Ok((state.set_device(*device), vec![])),
        Event::CycleSort => {
            if mode != InputMode::Normal {
                return Ok((false, vec![]));
            }
            let next = state.sort().next();
            tracing::debug!(sort = %next, "sort changed");
            state.set_sort(next);
            Ok((true, vec![]))
        }
        Event::SetSort(sort) => {
            state.set_sort(*sort);
            Ok((true, vec![]))
        }
        Event::SearchMode => {
            if mode != InputMode::Normal || !state.selection.is_empty() {
                return Ok((false, vec![]));
            }
            state.input_mode = InputMode::Search;
            Ok((true, vec![]))
        }
        Event::Char(c) => match mode {
            InputMode::Search => {
                state.push_search(*c);
                tracing::trace!(query = %state.filter().search, "search query updated");
                Ok((true, vec![]))
            }
            InputMode::TagManager => {
                if let Some(editor) = state.tag_editor.as_mut() {
                    editor.input.push(*c);
                }
                Ok((true, vec![]))
            }
            InputMode::AddKeywords => {
                if let Some(draft) = state.draft.as_mut() {
                    draft.push_char(*c);
                }
                Ok((true, vec![]))
            }
            _ => Ok((false, vec![])),
        },
        Event::Backspace => match mode {
            InputMode::Search => {
                state.pop_search();
                Ok((true, vec![]))
            }
            InputMode::TagManager => {
                if let Some(editor) = state.tag_editor.as_mut() {
                    editor.backspace();
                }
                Ok((true, vec![]))
            }
            InputMode::AddKeywords => {
                if let Some(draft) = state.draft.as_mut() {
                    draft.backspace();
                }
                Ok((true, vec![]))
            }
            _ => Ok((false, vec![])),
        },
        Event::Submit => match mode {
            InputMode::Normal => open_details(state),
            InputMode::Search => {
                state.input_mode = InputMode::Normal;
                Ok((true, vec![]))
            }
            InputMode::TagManager => submit_tags(state),
            InputMode::ConfirmRemoval => confirm_removal(state),
            InputMode::AddKeywords => submit_draft(state),
            InputMode::FilterPicker | InputMode::Details => {
                state.close_overlay();
                Ok((true, vec![]))
            }
        },
        Event::Complete => match mode {
            InputMode::TagManager => {
                let tags = all_tags(state.keywords());
                if let Some(editor) = state.tag_editor.as_mut() {
                    editor.complete(&tags);
                }
                Ok((true, vec![]))
            }
            InputMode::AddKeywords => {
                if let Some(draft) = state.draft.as_mut() {
                    draft.toggle_focus();
                }
                Ok((true, vec![]))
            }
            _ => Ok((false, vec![])),
        },
        Event::Escape => match mode {
            InputMode::Normal => {
                if !state.selection.is_empty() {
                    state.selection.apply(SelectionEvent::ClearAll);
                    Ok((true, vec![]))
                } else if state.notice.take().is_some() {
                    Ok((true, vec![]))
                } else {
                    Ok((false, vec![]))
                }
            }
            InputMode::Search => {
                state.clear_search();
                state.input_mode = InputMode::Normal;
                Ok((true, vec![]))
            }
            _ => {
                state.close_overlay();
                Ok((true, vec![]))
            }
        },
        Event::OpenFilterPicker => {
            if mode != InputMode::Normal || !state.selection.is_empty() {
                return Ok((false, vec![]));
            }
            state.picker_cursor = 0;
            state.input_mode = InputMode::FilterPicker;
            Ok((true, vec![]))
        }
        Event::ClearFilters => {
            if !matches!(mode, InputMode::Normal | InputMode::FilterPicker) {
                return Ok((false, vec![]));
            }
            state.clear_filters();
            Ok((true, vec![]))
        }
        Event::Refresh => {
            if mode != InputMode::Normal {
                return Ok((false, vec![]));
            }
            if !state.selection.is_empty() {
                let request = state.bulk.refresh_selected(&mut state.selection);
                return Ok((true, request.into_iter().map(Action::Mutate).collect()));
            }
            Ok(state.cursor_keyword().map_or((false, vec![]), |keyword| {
                tracing::debug!(keyword_id = keyword.id, "refreshing row");
                (false, vec![Action::Mutate(BulkCoordinator::refresh_row(keyword.id))])
            }))
        }
        Event::Remove => {
            if mode != InputMode::Normal {
                return Ok((false, vec![]));
            }
            if state.selection.is_empty() {
                let Some(id) = state.cursor_keyword().map(|k| k.id) else {
                    return Ok((false, vec![]));
                };
                state.bulk.request_row_removal(&mut state.selection, id);
            } else if !state.bulk.request_removal(&state.selection) {
                return Ok((false, vec![]));
            }
            state.input_mode = InputMode::ConfirmRemoval;
            Ok((true, vec![]))
        }
        Event::ConfirmRemoval => {
            if mode != InputMode::ConfirmRemoval {
                return Ok((false, vec![]));
            }
            confirm_removal(state)
        }
        Event::CancelRemoval => {
            if mode != InputMode::ConfirmRemoval {
                return Ok((false, vec![]));
            }
            state.close_overlay();
            Ok((true, vec![]))
        }
        Event::ToggleFavorite => {
            if mode != InputMode::Normal {
                return Ok((false, vec![]));
            }
            Ok(state.cursor_keyword().map_or((false, vec![]), |keyword| {
                (false, vec![Action::Mutate(BulkCoordinator::toggle_favorite(keyword))])
            }))
        }
        Event::ManageTags => {
            if mode != InputMode::Normal {
                return Ok((false, vec![]));
            }
            let Some(editor) = state
                .cursor_keyword()
                .map(|k| TagEditor::new(k.id, k.tags.clone()))
            else {
                return Ok((false, vec![]));
            };
            tracing::debug!(keyword_id = editor.keyword_id, "opening tag manager");
            state.tag_editor = Some(editor);
            state.input_mode = InputMode::TagManager;
            Ok((true, vec![]))
        }
        Event::ShowDetails => {
            if mode != InputMode::Normal {
                return Ok((false, vec![]));
            }
            open_details(state)
        }
        Event::AddKeywords => {
            if mode != InputMode::Normal {
                return Ok((false, vec![]));
            }
            tracing::debug!(device = %state.device(), "opening add keywords");
            state.draft = Some(KeywordDraft::new(state.device()));
            state.input_mode = InputMode::AddKeywords;
            Ok((true, vec![]))
        }
        Event::Reload => {
            state.loading = true;
            Ok((true, vec![Action::LoadKeywords {
                domain: state.domain.clone(),
            }]))
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::KeywordsLoaded { payload } => match parse_keywords(payload) {
            Ok(keywords) => {
                tracing::debug!(count = keywords.len(), "keywords loaded");
                state.replace_keywords(keywords);
                Ok((true, vec![]))
            }
            Err(err) => {
                tracing::warn!(error = %err, "keyword source returned unusable output");
                state.loading = false;
                state.notice = Some(Notice::error(format!("Could not load keywords: {err}")));
                Ok((true, vec![]))
            }
        },
        Event::SourceFailed { error } => {
            tracing::warn!(error = %error, "keyword source failed");
            state.loading = false;
            state.notice = Some(Notice::error(format!("Could not load keywords: {error}")));
            Ok((true, vec![]))
        }
        Event::MutationFinished(outcome) => {
            tracing::debug!(
                kind = %outcome.kind,
                success = outcome.success,
                "mutation finished"
            );
            state.notice = Some(outcome_notice(outcome));
            if outcome.success {
                Ok((true, vec![Action::LoadKeywords {
                    domain: state.domain.clone(),
                }]))
            } else {
                Ok((true, vec![]))
            }
        }
        Event::DomainChanged { domain } => {
            tracing::info!(domain = %domain, "domain changed");
            state.reset_for_domain(domain);
            Ok((true, vec![Action::LoadKeywords {
                domain: domain.clone(),
            }]))
        }
    }
}

fn open_details(state: &mut AppState) -> Result<(bool, Vec<Action>)> {
    let Some(id) = state.cursor_keyword().map(|k| k.id) else {
        return Ok((false, vec![]));
    };
    state.details = Some(id);
    state.input_mode = InputMode::Details;
    Ok((true, vec![]))
}

/// Enter in the tag manager adds the typed tag; with empty input it saves.
fn submit_tags(state: &mut AppState) -> Result<(bool, Vec<Action>)> {
    let Some(editor) = state.tag_editor.as_mut() else {
        state.close_overlay();
        return Ok((true, vec![]));
    };

    if !editor.input.trim().is_empty() {
        editor.commit_input();
        return Ok((true, vec![]));
    }

    let request = BulkCoordinator::update_tags(editor.keyword_id, &editor.tags);
    tracing::debug!(keyword_id = editor.keyword_id, tags = editor.tags.len(), "saving tags");
    state.close_overlay();
    Ok((true, vec![Action::Mutate(request)]))
}

/// Enter in the add-keywords modal. In the country field it returns to the
/// keyword line; a typed line is committed; an empty line sends the batch.
fn submit_draft(state: &mut AppState) -> Result<(bool, Vec<Action>)> {
    let Some(draft) = state.draft.as_mut() else {
        state.close_overlay();
        return Ok((true, vec![]));
    };

    if draft.focus == DraftField::Country {
        draft.focus = DraftField::Keywords;
        return Ok((true, vec![]));
    }
    if !draft.input.trim().is_empty() {
        draft.commit_input();
        return Ok((true, vec![]));
    }
    if draft.lines.is_empty() {
        return Ok((false, vec![]));
    }
    if draft.country_code().is_empty() {
        state.notice = Some(Notice::error("Choose a country before adding keywords"));
        return Ok((true, vec![]));
    }

    let device = draft.device;
    let request = state
        .draft
        .as_ref()
        .and_then(|draft| BulkCoordinator::add_keywords(draft, state.keywords()));
    state.close_overlay();
    match request {
        Some(request) => Ok((true, vec![Action::Mutate(request)])),
        None => {
            state.notice = Some(Notice::error(format!(
                "All keywords are already tracked for {}",
                device.label()
            )));
            Ok((true, vec![]))
        }
    }
}

fn confirm_removal(state: &mut AppState) -> Result<(bool, Vec<Action>)> {
    let request = state.bulk.confirm_removal(&mut state.selection);
    state.input_mode = InputMode::Normal;
    Ok((true, request.into_iter().map(Action::Mutate).collect()))
}

fn outcome_notice(outcome: &MutationOutcome) -> Notice {
    let message = outcome.message.trim();
    if outcome.success {
        let text = if message.is_empty() {
            match outcome.kind {
                MutationKind::Refresh => "Keywords queued for refresh",
                MutationKind::Delete => "Keywords removed",
                MutationKind::Favorite => "Favorite updated",
                MutationKind::Tags => "Tags updated",
                MutationKind::Add => "Keywords added",
            }
            .to_string()
        } else {
            message.to_string()
        };
        Notice::success(text)
    } else if message.is_empty() {
        Notice::error(format!("{} failed", outcome.kind))
    } else {
        Notice::error(format!("{} failed: {message}", outcome.kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::{NoticeLevel, ViewDefaults};
    use crate::mutation::MutationRequest;
    use crate::ui::theme::Theme;

    const PAYLOAD: &str = r#"[
        {"ID": 1, "keyword": "rust tutorial", "device": "desktop", "tags": ["a"], "country": "US", "position": 3},
        {"ID": 2, "keyword": "rust book", "device": "desktop", "tags": ["b"], "country": "US", "position": 0},
        {"ID": 3, "keyword": "rust mobile", "device": "mobile", "tags": ["a"], "country": "DE", "position": 7}
    ]"#;

    fn loaded() -> AppState {
        let mut state = AppState::new("example.com", Theme::default(), ViewDefaults::default());
        handle_event(
            &mut state,
            &Event::KeywordsLoaded {
                payload: PAYLOAD.to_string(),
            },
        )
        .unwrap();
        state
    }

    fn send(state: &mut AppState, events: &[Event]) -> Vec<Action> {
        events
            .iter()
            .flat_map(|event| handle_event(state, event).unwrap().1)
            .collect()
    }

    #[test]
    fn source_payload_replaces_collection() {
        let state = loaded();
        assert!(!state.loading);
        assert_eq!(state.view().visible_ids(), vec![1, 2]);
    }

    #[test]
    fn malformed_source_keeps_previous_collection() {
        let mut state = loaded();
        send(
            &mut state,
            &[
                Event::Reload,
                Event::KeywordsLoaded {
                    payload: "not json".to_string(),
                },
            ],
        );
        assert!(!state.loading);
        assert_eq!(state.keywords().len(), 3);
        assert_eq!(state.notice.as_ref().map(|n| n.level), Some(NoticeLevel::Error));
    }

    #[test]
    fn bulk_refresh_is_one_batch() {
        let mut state = loaded();
        let actions = send(&mut state, &[Event::ToggleAll, Event::Refresh]);
        assert_eq!(actions.len(), 1);
        assert!(matches!(
            &actions[0],
            Action::Mutate(MutationRequest::Refresh { ids, .. }) if ids == &vec![1, 2]
        ));
        assert!(state.selection.is_empty());
    }

    #[test]
    fn refresh_without_selection_targets_cursor_row() {
        let mut state = loaded();
        let actions = send(&mut state, &[Event::KeyDown, Event::Refresh]);
        assert_eq!(actions, vec![Action::Mutate(MutationRequest::refresh(vec![2]))]);
    }

    #[test]
    fn remove_waits_for_confirmation() {
        let mut state = loaded();
        let actions = send(&mut state, &[Event::ToggleAll, Event::Remove]);
        assert!(actions.is_empty());
        assert_eq!(state.input_mode, InputMode::ConfirmRemoval);

        let actions = send(&mut state, &[Event::ConfirmRemoval]);
        assert!(matches!(
            actions.as_slice(),
            [Action::Mutate(MutationRequest::Delete { ids, .. })] if ids == &vec![1, 2]
        ));
        assert!(state.selection.is_empty());
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn cancel_removal_dispatches_nothing() {
        let mut state = loaded();
        let actions = send(&mut state, &[Event::ToggleRow, Event::Remove, Event::Escape]);
        assert!(actions.is_empty());
        assert!(state.selection.is_empty());
        assert!(!state.bulk.is_awaiting_confirmation());
    }

    #[test]
    fn row_remove_selects_only_that_row() {
        let mut state = loaded();
        send(&mut state, &[Event::KeyDown, Event::Remove]);
        assert_eq!(state.selection.ids(), vec![2]);
        let actions = send(&mut state, &[Event::Submit]);
        assert_eq!(actions.len(), 1);
        assert!(matches!(&actions[0], Action::Mutate(request) if request.ids() == vec![2]));
    }

    #[test]
    fn device_switch_clears_selection() {
        let mut state = loaded();
        send(&mut state, &[Event::ToggleAll, Event::SwitchDevice]);
        assert_eq!(state.device(), Device::Mobile);
        assert!(state.selection.is_empty());
        assert_eq!(state.view().visible_ids(), vec![3]);
    }

    #[test]
    fn search_escape_clears_query() {
        let mut state = loaded();
        send(&mut state, &[Event::SearchMode, Event::Char('b'), Event::Char('o')]);
        assert_eq!(state.view().visible_ids(), vec![2]);
        send(&mut state, &[Event::Escape]);
        assert_eq!(state.input_mode, InputMode::Normal);
        assert_eq!(state.view().visible_ids(), vec![1, 2]);
    }

    #[test]
    fn characters_outside_text_modes_are_ignored() {
        let mut state = loaded();
        let (render, actions) = handle_event(&mut state, &Event::Char('x')).unwrap();
        assert!(!render);
        assert!(actions.is_empty());
        assert!(state.filter().search.is_empty());
    }

    #[test]
    fn filter_picker_toggles_tag() {
        let mut state = loaded();
        send(&mut state, &[Event::OpenFilterPicker, Event::ToggleRow, Event::Escape]);
        assert!(state.filter().tags.contains("a"));
        assert_eq!(state.view().visible_ids(), vec![1]);
        send(&mut state, &[Event::ClearFilters]);
        assert_eq!(state.view().visible_ids(), vec![1, 2]);
    }

    #[test]
    fn tag_manager_adds_then_saves() {
        let mut state = loaded();
        let actions = send(
            &mut state,
            &[
                Event::ManageTags,
                Event::Char('s'),
                Event::Char('e'),
                Event::Char('o'),
                Event::Submit,
                Event::Submit,
            ],
        );
        assert!(matches!(
            actions.as_slice(),
            [Action::Mutate(MutationRequest::UpdateTags { id: 1, tags, .. })]
                if tags == &vec!["a".to_string(), "seo".to_string()]
        ));
        assert_eq!(state.input_mode, InputMode::Normal);
        assert!(state.tag_editor.is_none());
    }

    #[test]
    fn favorite_flips_sticky() {
        let mut state = loaded();
        let actions = send(&mut state, &[Event::ToggleFavorite]);
        assert_eq!(actions, vec![Action::Mutate(MutationRequest::favorite(1, true))]);
    }

    #[test]
    fn successful_mutation_reloads() {
        let mut state = loaded();
        let outcome = MutationOutcome {
            kind: MutationKind::Delete,
            success: true,
            message: String::new(),
        };
        let actions = send(&mut state, &[Event::MutationFinished(outcome)]);
        assert_eq!(
            actions,
            vec![Action::LoadKeywords {
                domain: "example.com".to_string()
            }]
        );
        assert_eq!(
            state.notice,
            Some(Notice::success("Keywords removed"))
        );
    }

    #[test]
    fn failed_mutation_only_notifies() {
        let mut state = loaded();
        let outcome = MutationOutcome {
            kind: MutationKind::Refresh,
            success: false,
            message: "quota exceeded\n".to_string(),
        };
        let actions = send(&mut state, &[Event::MutationFinished(outcome)]);
        assert!(actions.is_empty());
        assert_eq!(state.notice, Some(Notice::error("refresh failed: quota exceeded")));
    }

    #[test]
    fn domain_change_resets_and_loads() {
        let mut state = loaded();
        let actions = send(
            &mut state,
            &[
                Event::ToggleAll,
                Event::DomainChanged {
                    domain: "other.org".to_string(),
                },
            ],
        );
        assert_eq!(
            actions,
            vec![Action::LoadKeywords {
                domain: "other.org".to_string()
            }]
        );
        assert!(state.loading);
        assert!(state.selection.is_empty());
        assert!(state.keywords().is_empty());
    }

    #[test]
    fn details_open_on_enter_and_close_on_escape() {
        let mut state = loaded();
        send(&mut state, &[Event::Submit]);
        assert_eq!(state.input_mode, InputMode::Details);
        assert_eq!(state.details, Some(1));
        send(&mut state, &[Event::Escape]);
        assert_eq!(state.input_mode, InputMode::Normal);
        assert!(state.details.is_none());
    }

    fn typed(text: &str) -> Vec<Event> {
        text.chars().map(Event::Char).collect()
    }

    fn add_request(actions: &[Action]) -> Option<(&[String], Device, &str)> {
        match actions {
            [Action::Mutate(MutationRequest::Add {
                keywords,
                device,
                country,
                ..
            })] => Some((keywords.as_slice(), *device, country.as_str())),
            _ => None,
        }
    }

    #[test]
    fn removal_prompt_closes_when_device_pipe_empties_selection() {
        let mut state = loaded();
        send(&mut state, &[Event::ToggleRow, Event::Remove]);
        assert_eq!(state.input_mode, InputMode::ConfirmRemoval);

        send(&mut state, &[Event::SetDevice(Device::Mobile)]);

        assert!(state.selection.is_empty());
        assert_eq!(state.input_mode, InputMode::Normal);
        assert!(!state.bulk.is_awaiting_confirmation());
        assert!(state.compute_viewmodel(24, 0).modal.is_none());
        assert!(send(&mut state, &[Event::ConfirmRemoval]).is_empty());
    }

    #[test]
    fn removal_prompt_closes_when_reload_drops_selection() {
        let mut state = loaded();
        send(&mut state, &[Event::ToggleRow, Event::Remove]);

        send(
            &mut state,
            &[Event::KeywordsLoaded {
                payload: r#"[{"ID": 2, "keyword": "rust book", "device": "desktop"}]"#.to_string(),
            }],
        );

        assert!(state.selection.is_empty());
        assert_eq!(state.input_mode, InputMode::Normal);
        assert!(state.compute_viewmodel(24, 0).modal.is_none());
    }

    #[test]
    fn removal_prompt_survives_partial_reload() {
        let mut state = loaded();
        send(&mut state, &[Event::ToggleAll, Event::Remove]);

        send(
            &mut state,
            &[Event::KeywordsLoaded {
                payload: r#"[{"ID": 2, "keyword": "rust book", "device": "desktop"}]"#.to_string(),
            }],
        );

        assert_eq!(state.input_mode, InputMode::ConfirmRemoval);
        let actions = send(&mut state, &[Event::ConfirmRemoval]);
        assert_eq!(actions.len(), 1);
        assert!(matches!(&actions[0], Action::Mutate(request) if request.ids() == vec![2]));
    }

    #[test]
    fn search_and_filters_wait_for_empty_selection() {
        let mut state = loaded();
        send(&mut state, &[Event::ToggleRow, Event::SearchMode, Event::OpenFilterPicker]);
        assert_eq!(state.input_mode, InputMode::Normal);

        send(&mut state, &[Event::Escape, Event::SearchMode]);
        assert_eq!(state.input_mode, InputMode::Search);
    }

    #[test]
    fn add_keywords_skips_tracked_and_sends_one_batch() {
        let mut state = loaded();
        let mut events = vec![Event::AddKeywords];
        events.extend(typed("Rust Book"));
        events.push(Event::Submit);
        events.extend(typed("cargo"));
        events.extend([Event::Submit, Event::Submit]);

        let actions = send(&mut state, &events);

        let expected = vec!["cargo".to_string()];
        assert_eq!(
            add_request(&actions),
            Some((expected.as_slice(), Device::Desktop, "US"))
        );
        assert_eq!(state.input_mode, InputMode::Normal);
        assert!(state.draft.is_none());
    }

    #[test]
    fn add_keywords_uses_chosen_device_and_country() {
        let mut state = loaded();
        let mut events = vec![
            Event::AddKeywords,
            Event::SwitchDevice,
            Event::Complete,
            Event::Backspace,
            Event::Backspace,
        ];
        events.extend(typed("de"));
        events.push(Event::Submit);
        events.extend(typed("rust book"));
        events.extend([Event::Submit, Event::Submit]);

        let actions = send(&mut state, &events);

        let expected = vec!["rust book".to_string()];
        assert_eq!(
            add_request(&actions),
            Some((expected.as_slice(), Device::Mobile, "DE"))
        );
        assert_eq!(state.device(), Device::Desktop);
    }

    #[test]
    fn add_keywords_already_tracked_only_notifies() {
        let mut state = loaded();
        let mut events = vec![Event::AddKeywords];
        events.extend(typed("rust tutorial"));
        events.extend([Event::Submit, Event::Submit]);

        let actions = send(&mut state, &events);

        assert!(actions.is_empty());
        assert_eq!(state.input_mode, InputMode::Normal);
        assert_eq!(
            state.notice,
            Some(Notice::error("All keywords are already tracked for Desktop"))
        );
    }
}
