use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use chrono::{Local, Utc};
use client_logging::{client_info, client_warn};
use tagsmith_client::{
    ClientCommand, ClientConfig, ClientEvent, ClientHandle, ExportRequest, ProcessRequest,
    RequestKind,
};
use tagsmith_core::{Effect, HistoryItem, InputKind, Msg, PromptsConfig};

use crate::command::Input;
use crate::config::AppConfig;

/// Bridges the pure core to the client: effects go out as commands, client
/// events come back as messages on the shell's input channel.
pub struct EffectRunner {
    client: ClientHandle,
}

impl EffectRunner {
    pub fn new(config: &AppConfig, input_tx: mpsc::Sender<Input>) -> anyhow::Result<Self> {
        let client_config = ClientConfig {
            base_url: config.api_base_url.clone(),
            settings: config.api_settings(),
            export_dir: config.export_dir.clone(),
            date_stamp: Arc::new(|| Local::now().format("%-d %B %Y").to_string()),
            utc_stamp: Arc::new(|| Utc::now().to_rfc3339()),
        };
        let client = ClientHandle::new(client_config)?;
        let runner = Self { client };
        runner.spawn_event_loop(input_tx);
        Ok(runner)
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchHistory => self.client.send(ClientCommand::FetchHistory),
                Effect::StartProcess { kind, content } => {
                    client_info!(
                        "StartProcess kind={} content_len={}",
                        wire_kind(kind).as_str(),
                        content.len()
                    );
                    self.client.send(ClientCommand::Process(ProcessRequest {
                        kind: wire_kind(kind),
                        content,
                    }));
                }
                Effect::SaveItem(draft) => self.client.send(ClientCommand::SaveItem {
                    kind: wire_kind(draft.kind),
                    title: draft.title,
                    full_input: draft.full_input,
                    output: draft.output,
                }),
                Effect::DeleteItem { id } => self.client.send(ClientCommand::DeleteItem { id }),
                Effect::UpdateTitle { id, title } => {
                    self.client.send(ClientCommand::UpdateTitle { id, title })
                }
                Effect::FetchPrompts => self.client.send(ClientCommand::FetchPrompts),
                Effect::SavePrompts(prompts) => self
                    .client
                    .send(ClientCommand::SavePrompts(wire_prompts(prompts))),
                Effect::ExportItem(draft) => {
                    self.client.send(ClientCommand::ExportItem(ExportRequest {
                        title: draft.title,
                        full_input: draft.full_input,
                        output: draft.output,
                        kind: wire_kind(draft.kind),
                    }))
                }
            }
        }
    }

    /// Cancels the running exchange, if any.
    pub fn cancel_process(&self) {
        self.client.cancel_process();
    }

    fn spawn_event_loop(&self, input_tx: mpsc::Sender<Input>) {
        let client = self.client.clone();
        thread::spawn(move || loop {
            if let Some(event) = client.try_recv() {
                if input_tx.send(Input::Core(map_event(event))).is_err() {
                    break;
                }
            } else {
                thread::sleep(Duration::from_millis(20));
            }
        });
    }
}

fn map_event(event: ClientEvent) -> Msg {
    match event {
        ClientEvent::HistoryFetched(Ok(items)) => {
            Msg::HistoryFetched(items.into_iter().map(core_item).collect())
        }
        ClientEvent::HistoryFetched(Err(err)) => {
            client_warn!("History fetch failed: {}", err);
            Msg::HistoryFetchFailed(err.to_string())
        }
        ClientEvent::ProcessProgress { message } => Msg::ProcessProgress { message },
        ClientEvent::ProcessFinished(Ok(output)) => Msg::ProcessCompleted { output },
        ClientEvent::ProcessFinished(Err(err)) => {
            client_warn!("Processing failed: {}: {}", err.kind, err.message);
            Msg::ProcessFailed {
                message: format!("{}: {}", err.kind, err.message),
            }
        }
        ClientEvent::ItemSaved(Ok(item)) => Msg::ItemSaved(core_item(item)),
        ClientEvent::ItemSaved(Err(err)) => {
            client_warn!("Save failed: {}", err);
            Msg::SaveFailed(err.to_string())
        }
        ClientEvent::ItemDeleted { id, result: Ok(()) } => Msg::ItemDeleted { id },
        ClientEvent::ItemDeleted {
            id,
            result: Err(err),
        } => Msg::DeleteFailed {
            id,
            message: err.to_string(),
        },
        ClientEvent::TitleUpdated {
            id,
            title,
            result: Ok(()),
        } => Msg::TitleUpdated { id, title },
        ClientEvent::TitleUpdated {
            id,
            result: Err(err),
            ..
        } => Msg::TitleUpdateFailed {
            id,
            message: err.to_string(),
        },
        ClientEvent::PromptsFetched(Ok(prompts)) => Msg::PromptsFetched(core_prompts(prompts)),
        ClientEvent::PromptsFetched(Err(err)) => Msg::PromptsFetchFailed(err.to_string()),
        ClientEvent::PromptsSaved(Ok(())) => Msg::PromptsSaved,
        ClientEvent::PromptsSaved(Err(err)) => Msg::PromptsSaveFailed(err.to_string()),
        ClientEvent::ItemExported(Ok(path)) => Msg::ExportCompleted {
            path: path.display().to_string(),
        },
        ClientEvent::ItemExported(Err(err)) => Msg::ExportFailed(err.to_string()),
    }
}

fn wire_kind(kind: InputKind) -> RequestKind {
    match kind {
        InputKind::Url => RequestKind::Url,
        InputKind::Text => RequestKind::Text,
    }
}

fn core_kind(kind: RequestKind) -> InputKind {
    match kind {
        RequestKind::Url => InputKind::Url,
        RequestKind::Text => InputKind::Text,
    }
}

fn core_item(item: tagsmith_client::HistoryItem) -> HistoryItem {
    HistoryItem {
        id: item.id,
        title: item.title,
        date_str: item.date_str,
        full_input: item.full_input,
        output: item.output,
        kind: core_kind(item.kind),
    }
}

fn core_prompts(prompts: tagsmith_client::PromptsConfig) -> PromptsConfig {
    PromptsConfig {
        openai_system: prompts.openai_system,
        openai_user: prompts.openai_user,
        anthropic_system: prompts.anthropic_system,
        anthropic_user: prompts.anthropic_user,
    }
}

fn wire_prompts(prompts: PromptsConfig) -> tagsmith_client::PromptsConfig {
    tagsmith_client::PromptsConfig {
        openai_system: prompts.openai_system,
        openai_user: prompts.openai_user,
        anthropic_system: prompts.anthropic_system,
        anthropic_user: prompts.anthropic_user,
    }
}
