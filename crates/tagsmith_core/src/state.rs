use crate::view_model::{AppViewModel, HistoryRowView, ResultView};

pub type ItemId = i64;

/// Which backend pipeline processes the submitted content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputKind {
    #[default]
    Url,
    Text,
}

/// Which part of the interface is in front of the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Input,
    Processing,
    Result,
}

/// One persisted record of a past processing run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryItem {
    pub id: ItemId,
    pub title: String,
    pub date_str: String,
    pub full_input: String,
    pub output: String,
    pub kind: InputKind,
}

/// Prompt templates used by the backend's language-model providers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PromptsConfig {
    pub openai_system: String,
    pub openai_user: String,
    pub anthropic_system: String,
    pub anthropic_user: String,
}

/// Addresses one field of [`PromptsConfig`] for draft edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptField {
    OpenAiSystem,
    OpenAiUser,
    AnthropicSystem,
    AnthropicUser,
}

/// A completed result that has not been persisted (yet, or at all).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultDraft {
    pub kind: InputKind,
    pub title: String,
    pub full_input: String,
    pub output: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    history: Vec<HistoryItem>,
    loaded: Option<ItemId>,
    input_kind: InputKind,
    input: String,
    screen: Screen,
    status: Option<String>,
    in_flight: bool,
    pending: Option<(InputKind, String)>,
    unsaved: Option<ResultDraft>,
    prompts: Option<PromptsConfig>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        let result = match self.loaded_item() {
            Some(item) => Some(ResultView {
                title: item.title.clone(),
                output: item.output.clone(),
                saved: true,
            }),
            None => self.unsaved.as_ref().map(|draft| ResultView {
                title: draft.title.clone(),
                output: draft.output.clone(),
                saved: false,
            }),
        };
        AppViewModel {
            screen: self.screen,
            input_kind: self.input_kind,
            input: self.input.clone(),
            status: self.status.clone(),
            busy: self.in_flight,
            history: self
                .history
                .iter()
                .map(|item| HistoryRowView {
                    id: item.id,
                    title: item.title.clone(),
                    date_str: item.date_str.clone(),
                    kind: item.kind,
                })
                .collect(),
            result,
            prompts: self.prompts.clone(),
        }
    }

    /// Returns whether the view changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn history_titles(&self) -> impl Iterator<Item = &str> {
        self.history.iter().map(|item| item.title.as_str())
    }

    pub(crate) fn contains_item(&self, id: ItemId) -> bool {
        self.history.iter().any(|item| item.id == id)
    }

    pub(crate) fn item(&self, id: ItemId) -> Option<&HistoryItem> {
        self.history.iter().find(|item| item.id == id)
    }

    pub(crate) fn loaded_item(&self) -> Option<&HistoryItem> {
        self.loaded.and_then(|id| self.item(id))
    }

    pub(crate) fn screen(&self) -> Screen {
        self.screen
    }

    pub(crate) fn input_kind(&self) -> InputKind {
        self.input_kind
    }

    pub(crate) fn input(&self) -> &str {
        &self.input
    }

    pub(crate) fn in_flight(&self) -> bool {
        self.in_flight
    }

    pub(crate) fn unsaved(&self) -> Option<&ResultDraft> {
        self.unsaved.as_ref()
    }

    pub(crate) fn prompts_draft(&self) -> Option<&PromptsConfig> {
        self.prompts.as_ref()
    }

    pub(crate) fn set_input_kind(&mut self, kind: InputKind) {
        if self.input_kind != kind {
            self.input_kind = kind;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_input(&mut self, text: String) {
        if self.input != text {
            self.input = text;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_status(&mut self, status: impl Into<String>) {
        self.status = Some(status.into());
        self.mark_dirty();
    }

    pub(crate) fn clear_status(&mut self) {
        if self.status.take().is_some() {
            self.mark_dirty();
        }
    }

    /// Remembers the request being streamed so completion uses the submitted
    /// content even if the input box changes meanwhile.
    pub(crate) fn begin_processing(&mut self, kind: InputKind, content: String) {
        self.in_flight = true;
        self.pending = Some((kind, content));
        self.screen = Screen::Processing;
        self.mark_dirty();
    }

    pub(crate) fn finish_processing(&mut self) -> Option<(InputKind, String)> {
        self.in_flight = false;
        self.mark_dirty();
        self.pending.take()
    }

    pub(crate) fn set_unsaved(&mut self, draft: ResultDraft) {
        self.unsaved = Some(draft);
        self.mark_dirty();
    }

    pub(crate) fn show_unsaved_result(&mut self) {
        self.loaded = None;
        self.screen = Screen::Result;
        self.mark_dirty();
    }

    pub(crate) fn replace_history(&mut self, items: Vec<HistoryItem>) {
        self.history = items;
        // A refresh can drop the item currently on screen.
        if let Some(id) = self.loaded {
            if !self.contains_item(id) {
                self.loaded = None;
                if self.screen == Screen::Result {
                    self.screen = Screen::Input;
                }
            }
        }
        self.mark_dirty();
    }

    pub(crate) fn insert_front(&mut self, item: HistoryItem) {
        self.history.insert(0, item);
        self.mark_dirty();
    }

    pub(crate) fn load_item(&mut self, id: ItemId) {
        self.loaded = Some(id);
        self.unsaved = None;
        self.screen = Screen::Result;
        self.mark_dirty();
    }

    pub(crate) fn remove_item(&mut self, id: ItemId) {
        self.history.retain(|item| item.id != id);
        if self.loaded == Some(id) {
            self.reset_to_input();
        }
        self.mark_dirty();
    }

    pub(crate) fn set_title(&mut self, id: ItemId, title: String) {
        if let Some(item) = self.history.iter_mut().find(|item| item.id == id) {
            item.title = title;
            self.mark_dirty();
        }
    }

    pub(crate) fn reset_to_input(&mut self) {
        self.loaded = None;
        self.unsaved = None;
        self.screen = Screen::Input;
        self.input.clear();
        self.input_kind = InputKind::Url;
        self.status = None;
        self.mark_dirty();
    }

    pub(crate) fn back_to_input(&mut self) {
        self.screen = Screen::Input;
        self.mark_dirty();
    }

    pub(crate) fn set_prompts(&mut self, prompts: PromptsConfig) {
        self.prompts = Some(prompts);
        self.mark_dirty();
    }

    pub(crate) fn edit_prompt(&mut self, field: PromptField, value: String) {
        if let Some(draft) = self.prompts.as_mut() {
            let slot = match field {
                PromptField::OpenAiSystem => &mut draft.openai_system,
                PromptField::OpenAiUser => &mut draft.openai_user,
                PromptField::AnthropicSystem => &mut draft.anthropic_system,
                PromptField::AnthropicUser => &mut draft.anthropic_user,
            };
            *slot = value;
            self.mark_dirty();
        }
    }
}
