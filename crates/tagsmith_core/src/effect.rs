use crate::{InputKind, ItemId, PromptsConfig, ResultDraft};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchHistory,
    StartProcess { kind: InputKind, content: String },
    SaveItem(ResultDraft),
    DeleteItem { id: ItemId },
    UpdateTitle { id: ItemId, title: String },
    FetchPrompts,
    SavePrompts(PromptsConfig),
    ExportItem(ResultDraft),
}
