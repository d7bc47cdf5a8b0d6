use crate::{HistoryItem, InputKind, ItemId, PromptField, PromptsConfig};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User switched between URL and raw-text input.
    ModeSelected(InputKind),
    /// User edited the input box.
    InputChanged(String),
    /// User submitted the current input for processing.
    SubmitClicked,
    /// User asked for a fresh document (reset to the input screen).
    NewClicked,
    /// User asked to refetch the history list.
    RefreshHistoryClicked,
    /// History list arrived from the store.
    HistoryFetched(Vec<HistoryItem>),
    /// History list could not be fetched.
    HistoryFetchFailed(String),
    /// Stream progress notification for the running exchange.
    ProcessProgress { message: String },
    /// The stream delivered its final payload.
    ProcessCompleted { output: String },
    /// The exchange failed (validation, transport, remote or connection).
    ProcessFailed { message: String },
    /// The store acknowledged the save with the created item.
    ItemSaved(HistoryItem),
    /// The save call failed; the result stays visible but unsaved.
    SaveFailed(String),
    /// User picked a history item to view.
    ItemSelected { id: ItemId },
    /// User confirmed deletion of an item.
    DeleteConfirmed { id: ItemId },
    /// The store acknowledged the deletion.
    ItemDeleted { id: ItemId },
    /// The delete call failed; local state is untouched.
    DeleteFailed { id: ItemId, message: String },
    /// User submitted an edited title for an item.
    TitleSubmitted { id: ItemId, title: String },
    /// The store acknowledged the title change.
    TitleUpdated { id: ItemId, title: String },
    /// The title update failed; the in-memory title is untouched.
    TitleUpdateFailed { id: ItemId, message: String },
    /// User opened the prompt settings.
    PromptsRequested,
    /// Prompt configuration arrived from the store.
    PromptsFetched(PromptsConfig),
    /// Prompt configuration could not be fetched.
    PromptsFetchFailed(String),
    /// User edited one field of the prompts draft.
    PromptFieldEdited { field: PromptField, value: String },
    /// User submitted the prompts draft.
    PromptsSaveClicked,
    /// The store acknowledged the prompts save.
    PromptsSaved,
    /// The prompts save failed.
    PromptsSaveFailed(String),
    /// User asked to export the result on screen to disk.
    ExportClicked,
    /// The export finished; `path` is where the document landed.
    ExportCompleted { path: String },
    /// The export failed.
    ExportFailed(String),
    /// Fallback for placeholder wiring.
    NoOp,
}
