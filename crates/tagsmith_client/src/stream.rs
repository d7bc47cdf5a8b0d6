use client_logging::client_warn;
use futures_util::StreamExt;
use tokio_util::sync::CancellationToken;

use crate::{ProcessError, ProcessFailureKind, StreamEvent, StreamStatus};

/// Receives progress text while a processing stream is being consumed.
pub trait ProgressSink: Send + Sync {
    fn emit(&self, message: &str);
}

/// Reassembles newline-delimited records from arbitrarily chunked bytes.
///
/// Chunk boundaries are not line boundaries: a record may arrive split
/// across reads, so a trailing fragment is carried over until its
/// terminator shows up.
#[derive(Debug, Default)]
pub struct LineSplitter {
    carry: Vec<u8>,
}

impl LineSplitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a chunk and drains every complete line, lossily decoded.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.carry.extend_from_slice(chunk);
        let mut lines = Vec::new();
        while let Some(pos) = self.carry.iter().position(|&b| b == b'\n') {
            let rest = self.carry.split_off(pos + 1);
            let mut line = std::mem::replace(&mut self.carry, rest);
            line.pop();
            if line.last() == Some(&b'\r') {
                line.pop();
            }
            lines.push(String::from_utf8_lossy(&line).into_owned());
        }
        lines
    }

    /// Hands back an unterminated tail at end of stream, if any.
    pub fn finish(self) -> Option<String> {
        if self.carry.is_empty() {
            None
        } else {
            Some(String::from_utf8_lossy(&self.carry).into_owned())
        }
    }
}

/// Consumes a newline-delimited JSON event stream until a terminal event.
///
/// Progress messages go to `sink` as they arrive. The first `complete`
/// event is terminal: its `data` is returned and any further lines are left
/// unread. An `error` event, a transport failure, cancellation, or end of
/// stream without completion all fail the exchange.
pub async fn consume_process_stream(
    response: reqwest::Response,
    sink: &dyn ProgressSink,
    cancel: &CancellationToken,
) -> Result<String, ProcessError> {
    let mut splitter = LineSplitter::new();
    let mut stream = response.bytes_stream();

    loop {
        // Checked up front so an already-cancelled token never races the
        // readiness of the next chunk.
        if cancel.is_cancelled() {
            return Err(ProcessError::new(
                ProcessFailureKind::Cancelled,
                "cancelled before completion",
            ));
        }
        let chunk = tokio::select! {
            _ = cancel.cancelled() => {
                return Err(ProcessError::new(
                    ProcessFailureKind::Cancelled,
                    "cancelled before completion",
                ));
            }
            chunk = stream.next() => chunk,
        };
        let Some(chunk) = chunk else {
            break;
        };
        let chunk =
            chunk.map_err(|err| ProcessError::new(ProcessFailureKind::Connection, err.to_string()))?;
        for line in splitter.push(&chunk) {
            if let Some(data) = apply_line(&line, sink)? {
                return Ok(data);
            }
        }
    }

    // Servers terminate every record, but a final unterminated line still counts.
    if let Some(tail) = splitter.finish() {
        if let Some(data) = apply_line(&tail, sink)? {
            return Ok(data);
        }
    }

    Err(ProcessError::new(
        ProcessFailureKind::Connection,
        "stream ended before a completion event",
    ))
}

/// Applies one stream line; returns the final payload on completion.
fn apply_line(line: &str, sink: &dyn ProgressSink) -> Result<Option<String>, ProcessError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let event: StreamEvent = match serde_json::from_str(line) {
        Ok(event) => event,
        Err(err) => {
            // Malformed lines are skipped, never fatal.
            client_warn!("Skipping malformed stream line: {}", err);
            return Ok(None);
        }
    };

    if let Some(message) = event.message.as_deref() {
        sink.emit(message);
    }

    match event.status {
        Some(StreamStatus::Complete) => match event.data {
            Some(data) => Ok(Some(data)),
            None => Err(ProcessError::new(
                ProcessFailureKind::Remote,
                "completion event carried no data",
            )),
        },
        Some(StreamStatus::Error) => Err(ProcessError::new(
            ProcessFailureKind::Remote,
            event
                .message
                .unwrap_or_else(|| "unspecified server error".to_string()),
        )),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::LineSplitter;

    #[test]
    fn splits_complete_lines() {
        let mut splitter = LineSplitter::new();
        let lines = splitter.push(b"one\ntwo\n");
        assert_eq!(lines, vec!["one", "two"]);
        assert!(splitter.finish().is_none());
    }

    #[test]
    fn carries_a_fragment_across_chunks() {
        let mut splitter = LineSplitter::new();
        assert!(splitter.push(b"{\"status\":\"comp").is_empty());
        let lines = splitter.push(b"lete\"}\n");
        assert_eq!(lines, vec!["{\"status\":\"complete\"}"]);
    }

    #[test]
    fn strips_carriage_returns() {
        let mut splitter = LineSplitter::new();
        let lines = splitter.push(b"one\r\ntwo\r\n");
        assert_eq!(lines, vec!["one", "two"]);
    }

    #[test]
    fn finish_returns_the_unterminated_tail() {
        let mut splitter = LineSplitter::new();
        assert!(splitter.push(b"partial").is_empty());
        assert_eq!(splitter.finish().as_deref(), Some("partial"));
    }

    #[test]
    fn handles_multiple_lines_in_one_chunk_with_tail() {
        let mut splitter = LineSplitter::new();
        let lines = splitter.push(b"a\nb\nc");
        assert_eq!(lines, vec!["a", "b"]);
        assert_eq!(splitter.finish().as_deref(), Some("c"));
    }
}
