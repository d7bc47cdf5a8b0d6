use crate::{InputKind, ItemId, PromptsConfig, Screen};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub screen: Screen,
    pub input_kind: InputKind,
    pub input: String,
    pub status: Option<String>,
    pub busy: bool,
    pub history: Vec<HistoryRowView>,
    pub result: Option<ResultView>,
    pub prompts: Option<PromptsConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRowView {
    pub id: ItemId,
    pub title: String,
    pub date_str: String,
    pub kind: InputKind,
}

/// The result pane: either a loaded history item or a completed run the
/// store refused to accept (`saved == false`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultView {
    pub title: String,
    pub output: String,
    pub saved: bool,
}
