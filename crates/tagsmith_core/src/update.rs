use crate::title::derive_title;
use crate::{AppState, Effect, Msg, ResultDraft, Screen};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::ModeSelected(kind) => {
            state.set_input_kind(kind);
            Vec::new()
        }
        Msg::InputChanged(text) => {
            state.set_input(text);
            Vec::new()
        }
        Msg::SubmitClicked => {
            // One exchange at a time; a second submit while streaming is dropped.
            if state.in_flight() {
                return (state, Vec::new());
            }
            let content = state.input().trim().to_string();
            if content.is_empty() {
                state.set_status("Nothing to process: enter a URL or some text first.");
                return (state, Vec::new());
            }
            let kind = state.input_kind();
            state.begin_processing(kind, content.clone());
            state.set_status("Starting up...");
            vec![Effect::StartProcess { kind, content }]
        }
        Msg::NewClicked => {
            if state.in_flight() {
                return (state, Vec::new());
            }
            state.reset_to_input();
            Vec::new()
        }
        Msg::RefreshHistoryClicked => vec![Effect::FetchHistory],
        Msg::HistoryFetched(items) => {
            state.replace_history(items);
            Vec::new()
        }
        Msg::HistoryFetchFailed(message) => {
            state.set_status(format!("Could not load history: {message}"));
            Vec::new()
        }
        Msg::ProcessProgress { message } => {
            state.set_status(message);
            Vec::new()
        }
        Msg::ProcessCompleted { output } => {
            let Some((kind, full_input)) = state.finish_processing() else {
                // Completion without a pending request; nothing to save.
                return (state, Vec::new());
            };
            let title = derive_title(kind, &full_input, state.history_titles());
            let draft = ResultDraft {
                kind,
                title,
                full_input,
                output,
            };
            state.set_unsaved(draft.clone());
            state.set_status("Saving result...");
            vec![Effect::SaveItem(draft)]
        }
        Msg::ProcessFailed { message } => {
            state.finish_processing();
            state.back_to_input();
            state.set_status(message);
            Vec::new()
        }
        Msg::ItemSaved(item) => {
            let id = item.id;
            state.insert_front(item);
            state.load_item(id);
            state.clear_status();
            Vec::new()
        }
        Msg::SaveFailed(message) => {
            // The result is still worth showing; it just never reached the store.
            state.show_unsaved_result();
            state.set_status(format!("Could not save to history: {message}"));
            Vec::new()
        }
        Msg::ItemSelected { id } => {
            if state.contains_item(id) {
                state.load_item(id);
                state.clear_status();
            }
            Vec::new()
        }
        Msg::DeleteConfirmed { id } => {
            if state.contains_item(id) {
                vec![Effect::DeleteItem { id }]
            } else {
                Vec::new()
            }
        }
        Msg::ItemDeleted { id } => {
            state.remove_item(id);
            Vec::new()
        }
        Msg::DeleteFailed { id, message } => {
            state.set_status(format!("Could not delete item {id}: {message}"));
            Vec::new()
        }
        Msg::TitleSubmitted { id, title } => {
            let title = title.trim().to_string();
            let current = state.item(id).map(|item| item.title.clone());
            match current {
                Some(current) if !title.is_empty() && current != title => {
                    vec![Effect::UpdateTitle { id, title }]
                }
                _ => Vec::new(),
            }
        }
        Msg::TitleUpdated { id, title } => {
            state.set_title(id, title);
            Vec::new()
        }
        Msg::TitleUpdateFailed { id, message } => {
            state.set_status(format!("Could not rename item {id}: {message}"));
            Vec::new()
        }
        Msg::PromptsRequested => vec![Effect::FetchPrompts],
        Msg::PromptsFetched(prompts) => {
            state.set_prompts(prompts);
            Vec::new()
        }
        Msg::PromptsFetchFailed(message) => {
            state.set_status(format!("Could not load prompts: {message}"));
            Vec::new()
        }
        Msg::PromptFieldEdited { field, value } => {
            state.edit_prompt(field, value);
            Vec::new()
        }
        Msg::PromptsSaveClicked => match state.prompts_draft() {
            Some(draft) => vec![Effect::SavePrompts(draft.clone())],
            None => Vec::new(),
        },
        Msg::PromptsSaved => {
            state.set_status("Prompts saved.");
            Vec::new()
        }
        Msg::PromptsSaveFailed(message) => {
            state.set_status(format!("Could not save prompts: {message}"));
            Vec::new()
        }
        Msg::ExportClicked => {
            if state.screen() != Screen::Result {
                return (state, Vec::new());
            }
            let draft = state
                .loaded_item()
                .map(|item| ResultDraft {
                    kind: item.kind,
                    title: item.title.clone(),
                    full_input: item.full_input.clone(),
                    output: item.output.clone(),
                })
                .or_else(|| state.unsaved().cloned());
            match draft {
                Some(draft) => vec![Effect::ExportItem(draft)],
                None => Vec::new(),
            }
        }
        Msg::ExportCompleted { path } => {
            state.set_status(format!("Exported to {path}"));
            Vec::new()
        }
        Msg::ExportFailed(message) => {
            state.set_status(format!("Could not export: {message}"));
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
