use serpdeck::app::NoticeLevel;
use serpdeck::ui::{ModalInfo, Toolbar};
use serpdeck::{
    handle_event, initialize, Action, AppState, Config, Device, Event, InputMode, KeywordId,
    MutationKind, MutationOutcome, MutationRequest, SortKey,
};

const PAYLOAD: &str = r#"{"keywords": [
    {"ID": 1, "keyword": "rust tutorial", "device": "desktop", "tags": ["a"], "country": "US",
     "position": 3, "history": {"2024-05-01": 5, "2024-05-02": 3}, "lastUpdated": 1714600000},
    {"ID": 2, "keyword": "learn rust", "device": "mobile", "tags": ["b"], "country": "DE",
     "position": 9},
    {"ID": 3, "keyword": "rust book", "device": "desktop", "tags": ["b"], "country": "DE",
     "position": 1, "sticky": true},
    {"ID": 4, "keyword": "cargo", "device": "desktop", "tags": [], "country": "US",
     "position": 0}
]}"#;

fn state() -> AppState {
    let mut state = initialize(&Config {
        domain: "example.com".to_string(),
        sort: SortKey::Insertion,
        ..Config::default()
    });
    send(
        &mut state,
        &[Event::KeywordsLoaded {
            payload: PAYLOAD.to_string(),
        }],
    );
    state
}

fn send(state: &mut AppState, events: &[Event]) -> Vec<Action> {
    events
        .iter()
        .flat_map(|event| handle_event(state, event).unwrap().1)
        .collect()
}

fn visible(state: &AppState) -> Vec<KeywordId> {
    state.view().visible_ids()
}

#[test]
fn tag_filter_restricts_desktop_view() {
    let mut state = state();
    state.toggle_tag_filter("a");
    assert_eq!(state.device(), Device::Desktop);
    assert_eq!(visible(&state), vec![1]);
}

#[test]
fn confirmed_bulk_removal_sends_one_delete() {
    let mut state = state();
    send(&mut state, &[Event::ToggleRow, Event::KeyDown, Event::ToggleRow]);
    assert_eq!(state.selection.len(), 2);

    let actions = send(&mut state, &[Event::Remove, Event::ConfirmRemoval]);

    let deletes: Vec<&MutationRequest> = actions
        .iter()
        .filter_map(|a| match a {
            Action::Mutate(request) if request.kind() == MutationKind::Delete => Some(request),
            _ => None,
        })
        .collect();
    assert_eq!(deletes.len(), 1);
    assert_eq!(deletes[0].ids(), vec![1, 3]);
    assert!(state.selection.is_empty());
}

#[test]
fn device_switch_drops_desktop_selection() {
    let mut state = state();
    send(&mut state, &[Event::ToggleRow]);
    assert!(state.selection.contains(1));

    send(&mut state, &[Event::SwitchDevice]);

    assert_eq!(state.device(), Device::Mobile);
    assert!(state.selection.is_empty());
    let vm = state.compute_viewmodel(24, 1_714_600_000);
    assert!(vm.display_items.iter().all(|item| !item.checked));
    assert!(matches!(vm.toolbar, Toolbar::Filters(_)));
}

#[test]
fn search_hides_selected_row_and_reconciles() {
    let mut state = state();
    send(&mut state, &[Event::ToggleAll]);
    assert_eq!(state.selection.len(), 3);

    send(
        &mut state,
        &[Event::SearchMode, Event::Char('b'), Event::Char('o'), Event::Submit],
    );

    assert_eq!(visible(&state), vec![3]);
    assert_eq!(state.selection.ids(), vec![3]);
    assert_eq!(state.input_mode, InputMode::Normal);

    let vm = state.compute_viewmodel(24, 0);
    assert_eq!(vm.display_items[0].highlight_ranges, vec![(5, 7)]);
}

#[test]
fn sort_by_position_puts_unranked_last() {
    let mut state = state();
    send(&mut state, &[Event::SetSort(SortKey::PosAsc)]);
    assert_eq!(visible(&state), vec![3, 1, 4]);
}

#[test]
fn viewmodel_shows_bulk_bar_while_selecting() {
    let mut state = state();
    send(&mut state, &[Event::ToggleRow]);

    let vm = state.compute_viewmodel(24, 1_714_600_060);
    match vm.toolbar {
        Toolbar::Bulk(info) => assert_eq!(info.selected, 1),
        Toolbar::Filters(_) => panic!("expected bulk bar"),
    }
    let first = &vm.display_items[0];
    assert!(first.checked && first.is_cursor);
    assert_eq!(first.change, Some(2));
    assert_eq!(first.updated, "1m ago");
}

#[test]
fn filters_hiding_everything_show_filter_message() {
    let mut state = state();
    state.toggle_country_filter("FR");
    let vm = state.compute_viewmodel(24, 0);
    let empty = vm.empty_state.expect("empty state");
    assert_eq!(empty.message, "No keywords match the active filters.");
}

#[test]
fn mutation_round_trip_reloads_source() {
    let mut state = state();
    let actions = send(&mut state, &[Event::ToggleFavorite]);
    assert!(matches!(
        actions.as_slice(),
        [Action::Mutate(MutationRequest::Favorite { id: 1, sticky: true, .. })]
    ));

    let actions = send(
        &mut state,
        &[Event::MutationFinished(MutationOutcome {
            kind: MutationKind::Favorite,
            success: true,
            message: String::new(),
        })],
    );
    assert_eq!(
        actions,
        vec![Action::LoadKeywords {
            domain: "example.com".to_string()
        }]
    );
    assert_eq!(state.notice.as_ref().map(|n| n.level), Some(NoticeLevel::Success));
}

#[test]
fn domain_change_starts_over() {
    let mut state = state();
    send(&mut state, &[Event::ToggleAll, Event::SwitchDevice]);

    let actions = send(
        &mut state,
        &[Event::DomainChanged {
            domain: "other.org".to_string(),
        }],
    );

    assert_eq!(
        actions,
        vec![Action::LoadKeywords {
            domain: "other.org".to_string()
        }]
    );
    assert!(state.loading);
    assert!(state.keywords().is_empty());
    assert_eq!(state.device(), Device::Desktop);
    let vm = state.compute_viewmodel(24, 0);
    assert_eq!(vm.empty_state.map(|e| e.message).as_deref(), Some("Loading Keywords..."));
}

#[test]
fn add_modal_flags_keywords_tracked_on_its_device() {
    let mut state = state();
    let mut events = vec![Event::AddKeywords];
    events.extend("cargo".chars().map(Event::Char));
    events.push(Event::Submit);
    events.extend("learn rust".chars().map(Event::Char));
    events.push(Event::Submit);
    send(&mut state, &events);

    let tracked = |state: &AppState| match state.compute_viewmodel(24, 0).modal {
        Some(ModalInfo::AddKeywords(add)) => {
            add.lines.iter().map(|line| line.tracked).collect::<Vec<_>>()
        }
        other => panic!("expected add modal, got {other:?}"),
    };
    assert_eq!(tracked(&state), vec![true, false]);

    send(&mut state, &[Event::SwitchDevice]);
    assert_eq!(tracked(&state), vec![false, true]);
    assert_eq!(state.device(), Device::Desktop);

    let actions = send(&mut state, &[Event::Submit]);
    assert!(matches!(
        actions.as_slice(),
        [Action::Mutate(MutationRequest::Add { keywords, device: Device::Mobile, .. })]
            if keywords == &vec!["cargo".to_string()]
    ));
}
