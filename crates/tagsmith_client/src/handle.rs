use std::path::PathBuf;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;

use tokio_util::sync::CancellationToken;

use crate::api::{ApiClient, ApiSettings};
use crate::export::{export_result, ExportError, ExportRequest};
use crate::stream::ProgressSink;
use crate::{
    HistoryDraft, HistoryItem, ItemId, ProcessError, ProcessRequest, PromptsConfig, RequestKind,
    StoreError,
};

/// Clock closure injected by the shell so the client never reads wall time
/// on its own.
pub type Stamp = Arc<dyn Fn() -> String + Send + Sync>;

#[derive(Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub settings: ApiSettings,
    pub export_dir: PathBuf,
    /// Human-readable date written into new history items.
    pub date_stamp: Stamp,
    /// RFC 3339 timestamp written into export headers.
    pub utc_stamp: Stamp,
}

#[derive(Debug)]
pub enum ClientCommand {
    FetchHistory,
    Process(ProcessRequest),
    SaveItem {
        kind: RequestKind,
        title: String,
        full_input: String,
        output: String,
    },
    DeleteItem {
        id: ItemId,
    },
    UpdateTitle {
        id: ItemId,
        title: String,
    },
    FetchPrompts,
    SavePrompts(PromptsConfig),
    ExportItem(ExportRequest),
}

#[derive(Debug)]
pub enum ClientEvent {
    HistoryFetched(Result<Vec<HistoryItem>, StoreError>),
    ProcessProgress { message: String },
    ProcessFinished(Result<String, ProcessError>),
    ItemSaved(Result<HistoryItem, StoreError>),
    ItemDeleted {
        id: ItemId,
        result: Result<(), StoreError>,
    },
    TitleUpdated {
        id: ItemId,
        title: String,
        result: Result<(), StoreError>,
    },
    PromptsFetched(Result<PromptsConfig, StoreError>),
    PromptsSaved(Result<(), StoreError>),
    ItemExported(Result<PathBuf, ExportError>),
}

/// Commands in, events out: a dedicated thread owns the tokio runtime so
/// synchronous shells can drive the async client.
#[derive(Clone)]
pub struct ClientHandle {
    cmd_tx: mpsc::Sender<ClientCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<ClientEvent>>>,
    active: Arc<Mutex<Option<CancellationToken>>>,
}

impl ClientHandle {
    pub fn new(config: ClientConfig) -> Result<Self, StoreError> {
        let api = ApiClient::new(&config.base_url, config.settings.clone())?;
        let (cmd_tx, cmd_rx) = mpsc::channel::<ClientCommand>();
        let (event_tx, event_rx) = mpsc::channel();
        let active: Arc<Mutex<Option<CancellationToken>>> = Arc::default();
        let active_worker = active.clone();

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            while let Ok(command) = cmd_rx.recv() {
                // Each processing exchange gets a fresh token; the slot
                // always holds the one for the latest exchange.
                let cancel = match &command {
                    ClientCommand::Process(_) => {
                        let token = CancellationToken::new();
                        *active_worker.lock().expect("lock cancel slot") = Some(token.clone());
                        Some(token)
                    }
                    _ => None,
                };
                let api = api.clone();
                let config = config.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(&api, &config, command, cancel, event_tx).await;
                });
            }
        });

        Ok(Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
            active,
        })
    }

    pub fn send(&self, command: ClientCommand) {
        let _ = self.cmd_tx.send(command);
    }

    /// Cancels the exchange currently streaming, if any.
    pub fn cancel_process(&self) {
        if let Some(token) = self.active.lock().expect("lock cancel slot").as_ref() {
            token.cancel();
        }
    }

    pub fn try_recv(&self) -> Option<ClientEvent> {
        self.event_rx
            .lock()
            .expect("lock event receiver")
            .try_recv()
            .ok()
    }
}

struct ChannelProgressSink {
    tx: mpsc::Sender<ClientEvent>,
}

impl ProgressSink for ChannelProgressSink {
    fn emit(&self, message: &str) {
        let _ = self.tx.send(ClientEvent::ProcessProgress {
            message: message.to_string(),
        });
    }
}

async fn handle_command(
    api: &ApiClient,
    config: &ClientConfig,
    command: ClientCommand,
    cancel: Option<CancellationToken>,
    event_tx: mpsc::Sender<ClientEvent>,
) {
    match command {
        ClientCommand::FetchHistory => {
            let result = api.fetch_history().await;
            let _ = event_tx.send(ClientEvent::HistoryFetched(result));
        }
        ClientCommand::Process(request) => {
            let sink = ChannelProgressSink {
                tx: event_tx.clone(),
            };
            let cancel = cancel.unwrap_or_default();
            let result = api.process(&request, &sink, &cancel).await;
            let _ = event_tx.send(ClientEvent::ProcessFinished(result));
        }
        ClientCommand::SaveItem {
            kind,
            title,
            full_input,
            output,
        } => {
            let draft = HistoryDraft {
                title,
                date_str: (config.date_stamp)(),
                full_input,
                output,
                kind,
            };
            let result = api.save_history(&draft).await;
            let _ = event_tx.send(ClientEvent::ItemSaved(result));
        }
        ClientCommand::DeleteItem { id } => {
            let result = api.delete_item(id).await;
            let _ = event_tx.send(ClientEvent::ItemDeleted { id, result });
        }
        ClientCommand::UpdateTitle { id, title } => {
            let result = api.update_title(id, &title).await;
            let _ = event_tx.send(ClientEvent::TitleUpdated { id, title, result });
        }
        ClientCommand::FetchPrompts => {
            let result = api.fetch_prompts().await;
            let _ = event_tx.send(ClientEvent::PromptsFetched(result));
        }
        ClientCommand::SavePrompts(prompts) => {
            let result = api.save_prompts(&prompts).await;
            let _ = event_tx.send(ClientEvent::PromptsSaved(result));
        }
        ClientCommand::ExportItem(request) => {
            let stamp = (config.utc_stamp)();
            let result: Result<PathBuf, ExportError> =
                export_result(&config.export_dir, &request, &stamp);
            let _ = event_tx.send(ClientEvent::ItemExported(result));
        }
    }
}
