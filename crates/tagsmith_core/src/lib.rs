//! Tagsmith core: pure controller state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod title;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use state::{
    AppState, HistoryItem, InputKind, ItemId, PromptField, PromptsConfig, ResultDraft, Screen,
};
pub use title::derive_title;
pub use update::update;
pub use view_model::{AppViewModel, HistoryRowView, ResultView};
