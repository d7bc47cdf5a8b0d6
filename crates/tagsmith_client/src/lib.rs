//! Tagsmith client: typed HTTP glue over the processing backend.
mod api;
mod export;
mod handle;
mod persist;
mod stream;
mod types;

pub use api::{ApiClient, ApiSettings};
pub use export::{build_export_document, export_filename, export_result, ExportError, ExportRequest};
pub use handle::{ClientCommand, ClientConfig, ClientEvent, ClientHandle, Stamp};
pub use persist::{ensure_export_dir, AtomicFileWriter, PersistError};
pub use stream::{consume_process_stream, LineSplitter, ProgressSink};
pub use types::{
    HistoryDraft, HistoryItem, ItemId, ProcessError, ProcessFailureKind, ProcessRequest,
    PromptsConfig, RequestKind, SaveAck, StoreError, StreamEvent, StreamStatus, TitlePatch,
};
