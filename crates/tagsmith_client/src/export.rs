use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::persist::{AtomicFileWriter, PersistError};
use crate::RequestKind;

/// Snapshot of a result to write to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRequest {
    pub title: String,
    pub full_input: String,
    pub output: String,
    pub kind: RequestKind,
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("nothing to export: the result is empty")]
    EmptyOutput,
    #[error("persist error: {0}")]
    Persist(#[from] PersistError),
}

/// Writes one result as a Markdown document under `dir` and returns its path.
pub fn export_result(
    dir: &Path,
    request: &ExportRequest,
    exported_utc: &str,
) -> Result<PathBuf, ExportError> {
    if request.output.trim().is_empty() {
        return Err(ExportError::EmptyOutput);
    }
    let filename = export_filename(&request.title, &request.full_input);
    let document = build_export_document(request, exported_utc);
    let writer = AtomicFileWriter::new(dir.to_path_buf());
    Ok(writer.write(&filename, &document)?)
}

/// Header block plus the output body.
pub fn build_export_document(request: &ExportRequest, exported_utc: &str) -> String {
    format!(
        "---\ntitle: {title}\nsource: {source}\nkind: {kind}\nexported_utc: {exported_utc}\n---\n\n{body}\n",
        title = request.title,
        source = request.full_input,
        kind = request.kind.as_str(),
        exported_utc = exported_utc,
        body = request.output.trim_end(),
    )
}

/// Windows-safe, deterministic filename: `{sanitized_title}--{short_hash(input)}.md`
pub fn export_filename(title: &str, full_input: &str) -> String {
    let sanitized = sanitize_title(title);
    let hash = short_hash(full_input);
    format!("{sanitized}--{hash}.md")
}

fn sanitize_title(input: &str) -> String {
    let cleaned: String = input
        .chars()
        .map(|c| if is_forbidden(c) { '_' } else { c })
        .collect();
    let cleaned = cleaned.trim_matches(&['_', ' ', '.'][..]);

    // Collapse runs of underscores left by the replacement above.
    let mut compacted = String::with_capacity(cleaned.len());
    let mut prev_underscore = false;
    for c in cleaned.chars() {
        if c == '_' {
            if !prev_underscore {
                compacted.push(c);
            }
            prev_underscore = true;
        } else {
            compacted.push(c);
            prev_underscore = false;
        }
    }

    if compacted.is_empty() {
        compacted = "untitled".to_string();
    }
    if compacted.len() > 80 {
        let cut = (0..=80)
            .rev()
            .find(|&i| compacted.is_char_boundary(i))
            .unwrap_or(0);
        compacted.truncate(cut);
    }
    if is_reserved_windows_name(&compacted) {
        compacted.push('_');
    }
    compacted
}

fn is_forbidden(c: char) -> bool {
    matches!(c,
        '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0'..='\u{1F}'
    )
}

fn is_reserved_windows_name(name: &str) -> bool {
    const RESERVED: &[&str] = &[
        "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
        "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
    ];
    RESERVED.iter().any(|r| r.eq_ignore_ascii_case(name))
}

fn short_hash(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    let digest = hasher.finalize();
    let mut hex = String::with_capacity(8);
    for byte in digest.iter().take(4) {
        use std::fmt::Write;
        let _ = write!(&mut hex, "{byte:02x}");
    }
    hex
}
