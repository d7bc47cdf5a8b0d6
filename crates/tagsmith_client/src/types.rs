use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type ItemId = i64;

/// Which backend pipeline handles the submission; serialized as the wire
/// `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestKind {
    Url,
    Text,
}

impl RequestKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestKind::Url => "url",
            RequestKind::Text => "text",
        }
    }
}

/// Body of `POST /api/process`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessRequest {
    #[serde(rename = "type")]
    pub kind: RequestKind,
    pub content: String,
}

/// A history record as the store returns it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HistoryItem {
    pub id: ItemId,
    pub title: String,
    pub date_str: String,
    pub full_input: String,
    pub output: String,
    #[serde(rename = "type")]
    pub kind: RequestKind,
    /// Server-assigned; carried but never interpreted on this side.
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Body of `POST /api/history`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryDraft {
    pub title: String,
    pub date_str: String,
    pub full_input: String,
    pub output: String,
    #[serde(rename = "type")]
    pub kind: RequestKind,
}

/// Body of `PUT /api/history/{id}`; only the title is updatable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TitlePatch {
    pub title: String,
}

/// Prompt templates for the backend's language-model providers.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PromptsConfig {
    pub openai_system: String,
    pub openai_user: String,
    pub anthropic_system: String,
    pub anthropic_user: String,
}

/// Acknowledgement body of `POST /api/prompts`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SaveAck {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// One line of the newline-delimited processing stream. Every field is
/// optional on the wire; `data` is meaningful only alongside `complete`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StreamEvent {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub status: Option<StreamStatus>,
    #[serde(default)]
    pub data: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamStatus {
    Info,
    Success,
    Progress,
    Complete,
    Error,
    /// Any status value this client does not know; treated as progress.
    #[serde(other)]
    Unknown,
}

/// Failure of a processing exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessError {
    pub kind: ProcessFailureKind,
    pub message: String,
}

impl ProcessError {
    pub(crate) fn new(kind: ProcessFailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessFailureKind {
    /// Content was empty after trimming; no request was issued.
    EmptyInput,
    /// The server answered with a non-success status before streaming.
    HttpStatus(u16),
    /// Network failure mid-stream, or the stream ended without completion.
    Connection,
    /// The stream carried an explicit error event.
    Remote,
    /// The exchange was cancelled on this side.
    Cancelled,
}

impl fmt::Display for ProcessFailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessFailureKind::EmptyInput => write!(f, "empty input"),
            ProcessFailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            ProcessFailureKind::Connection => write!(f, "connection failed"),
            ProcessFailureKind::Remote => write!(f, "processing failed"),
            ProcessFailureKind::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Failure of a history or prompts store call.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid base url: {0}")]
    BaseUrl(String),
    #[error("http status {0}")]
    Status(u16),
    #[error("network error: {0}")]
    Network(String),
    #[error("malformed response: {0}")]
    Decode(String),
    #[error("rejected by server: {0}")]
    Rejected(String),
}
