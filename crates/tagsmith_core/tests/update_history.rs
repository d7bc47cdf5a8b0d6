use tagsmith_core::{update, AppState, Effect, HistoryItem, InputKind, Msg, Screen};

fn item(id: i64, title: &str) -> HistoryItem {
    HistoryItem {
        id,
        title: title.to_string(),
        date_str: "5 August 2026".to_string(),
        full_input: "https://example.com".to_string(),
        output: "meta tags".to_string(),
        kind: InputKind::Url,
    }
}

fn seeded(items: Vec<HistoryItem>) -> AppState {
    let (state, _) = update(AppState::new(), Msg::HistoryFetched(items));
    state
}

#[test]
fn selecting_an_item_loads_it_for_viewing() {
    let state = seeded(vec![item(1, "First"), item(2, "Second")]);
    let (state, effects) = update(state, Msg::ItemSelected { id: 2 });
    assert!(effects.is_empty());

    let view = state.view();
    assert_eq!(view.screen, Screen::Result);
    assert_eq!(view.result.unwrap().title, "Second");
}

#[test]
fn selecting_an_unknown_item_is_ignored() {
    let state = seeded(vec![item(1, "First")]);
    let (state, effects) = update(state, Msg::ItemSelected { id: 42 });
    assert!(effects.is_empty());
    assert_eq!(state.view().screen, Screen::Input);
}

#[test]
fn confirmed_delete_emits_effect_only_for_known_items() {
    let state = seeded(vec![item(1, "First")]);
    let (state, effects) = update(state, Msg::DeleteConfirmed { id: 1 });
    assert_eq!(effects, vec![Effect::DeleteItem { id: 1 }]);

    let (_, effects) = update(state, Msg::DeleteConfirmed { id: 42 });
    assert!(effects.is_empty());
}

#[test]
fn deleting_the_displayed_item_resets_the_view() {
    let state = seeded(vec![item(1, "First"), item(2, "Second")]);
    let (state, _) = update(state, Msg::ItemSelected { id: 1 });
    let (state, _) = update(state, Msg::ItemDeleted { id: 1 });

    let view = state.view();
    assert_eq!(view.screen, Screen::Input);
    assert!(view.result.is_none());
    assert_eq!(view.history.len(), 1);
}

#[test]
fn deleting_another_item_keeps_the_view() {
    let state = seeded(vec![item(1, "First"), item(2, "Second")]);
    let (state, _) = update(state, Msg::ItemSelected { id: 1 });
    let (state, _) = update(state, Msg::ItemDeleted { id: 2 });

    let view = state.view();
    assert_eq!(view.screen, Screen::Result);
    assert_eq!(view.result.unwrap().title, "First");
    assert_eq!(view.history.len(), 1);
}

#[test]
fn delete_failure_leaves_history_unchanged() {
    let state = seeded(vec![item(1, "First")]);
    let (state, _) = update(
        state,
        Msg::DeleteFailed {
            id: 1,
            message: "server said no".to_string(),
        },
    );
    let view = state.view();
    assert_eq!(view.history.len(), 1);
    assert!(view.status.unwrap().contains("server said no"));
}

#[test]
fn title_edit_requires_a_changed_non_empty_title() {
    let state = seeded(vec![item(1, "First")]);

    let (state, effects) = update(
        state,
        Msg::TitleSubmitted {
            id: 1,
            title: "  ".to_string(),
        },
    );
    assert!(effects.is_empty());

    let (state, effects) = update(
        state,
        Msg::TitleSubmitted {
            id: 1,
            title: "First".to_string(),
        },
    );
    assert!(effects.is_empty());

    let (_, effects) = update(
        state,
        Msg::TitleSubmitted {
            id: 1,
            title: " Renamed ".to_string(),
        },
    );
    assert_eq!(
        effects,
        vec![Effect::UpdateTitle {
            id: 1,
            title: "Renamed".to_string(),
        }]
    );
}

#[test]
fn title_mutates_only_on_acknowledgement() {
    let state = seeded(vec![item(1, "First")]);

    // A failed PUT leaves the in-memory title unchanged.
    let (state, _) = update(
        state,
        Msg::TitleUpdateFailed {
            id: 1,
            message: "timeout".to_string(),
        },
    );
    assert_eq!(state.view().history[0].title, "First");

    let (state, _) = update(
        state,
        Msg::TitleUpdated {
            id: 1,
            title: "Renamed".to_string(),
        },
    );
    assert_eq!(state.view().history[0].title, "Renamed");
}

#[test]
fn renaming_the_displayed_item_updates_the_result_header() {
    let state = seeded(vec![item(1, "First")]);
    let (state, _) = update(state, Msg::ItemSelected { id: 1 });
    let (state, _) = update(
        state,
        Msg::TitleUpdated {
            id: 1,
            title: "Renamed".to_string(),
        },
    );
    assert_eq!(state.view().result.unwrap().title, "Renamed");
}

#[test]
fn refresh_that_drops_the_loaded_item_resets_the_view() {
    let state = seeded(vec![item(1, "First")]);
    let (state, _) = update(state, Msg::ItemSelected { id: 1 });
    let (state, _) = update(state, Msg::HistoryFetched(vec![item(2, "Second")]));

    let view = state.view();
    assert_eq!(view.screen, Screen::Input);
    assert!(view.result.is_none());
}

#[test]
fn refresh_click_emits_fetch_effect() {
    let (_, effects) = update(AppState::new(), Msg::RefreshHistoryClicked);
    assert_eq!(effects, vec![Effect::FetchHistory]);
}
