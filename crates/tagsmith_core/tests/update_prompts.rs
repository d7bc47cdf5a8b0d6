use tagsmith_core::{
    update, AppState, Effect, HistoryItem, InputKind, Msg, PromptField, PromptsConfig, Screen,
};

fn config() -> PromptsConfig {
    PromptsConfig {
        openai_system: "analyze".to_string(),
        openai_user: "here is the text".to_string(),
        anthropic_system: "generate".to_string(),
        anthropic_user: "use the analysis".to_string(),
    }
}

#[test]
fn prompts_request_emits_fetch_effect() {
    let (_, effects) = update(AppState::new(), Msg::PromptsRequested);
    assert_eq!(effects, vec![Effect::FetchPrompts]);
}

#[test]
fn fetched_prompts_populate_the_draft() {
    let (state, _) = update(AppState::new(), Msg::PromptsFetched(config()));
    assert_eq!(state.view().prompts, Some(config()));
}

#[test]
fn editing_before_fetch_is_ignored() {
    let (state, effects) = update(
        AppState::new(),
        Msg::PromptFieldEdited {
            field: PromptField::OpenAiSystem,
            value: "new".to_string(),
        },
    );
    assert!(effects.is_empty());
    assert!(state.view().prompts.is_none());

    // With no draft there is nothing to save either.
    let (_, effects) = update(state, Msg::PromptsSaveClicked);
    assert!(effects.is_empty());
}

#[test]
fn edited_draft_is_submitted_on_save() {
    let (state, _) = update(AppState::new(), Msg::PromptsFetched(config()));
    let (state, _) = update(
        state,
        Msg::PromptFieldEdited {
            field: PromptField::AnthropicUser,
            value: "rewritten".to_string(),
        },
    );
    let (_, effects) = update(state, Msg::PromptsSaveClicked);

    let expected = PromptsConfig {
        anthropic_user: "rewritten".to_string(),
        ..config()
    };
    assert_eq!(effects, vec![Effect::SavePrompts(expected)]);
}

#[test]
fn save_outcome_surfaces_as_status_only() {
    let (state, _) = update(AppState::new(), Msg::PromptsFetched(config()));
    let (state, _) = update(state, Msg::PromptsSaved);
    assert_eq!(state.view().status.as_deref(), Some("Prompts saved."));

    let (state, _) = update(state, Msg::PromptsSaveFailed("disk full".to_string()));
    assert!(state.view().status.unwrap().contains("disk full"));
}

#[test]
fn export_works_only_from_the_result_screen() {
    let (_, effects) = update(AppState::new(), Msg::ExportClicked);
    assert!(effects.is_empty());

    let item = HistoryItem {
        id: 1,
        title: "example.com".to_string(),
        date_str: "5 August 2026".to_string(),
        full_input: "https://example.com".to_string(),
        output: "meta tags".to_string(),
        kind: InputKind::Url,
    };
    let (state, _) = update(AppState::new(), Msg::HistoryFetched(vec![item]));
    let (state, _) = update(state, Msg::ItemSelected { id: 1 });
    assert_eq!(state.view().screen, Screen::Result);

    let (_, effects) = update(state, Msg::ExportClicked);
    match effects.as_slice() {
        [Effect::ExportItem(draft)] => {
            assert_eq!(draft.title, "example.com");
            assert_eq!(draft.output, "meta tags");
        }
        other => panic!("expected export effect, got {other:?}"),
    }
}
