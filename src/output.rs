//! Output formatting for snapshots.
//!
//! Provides functions to format a [`Snapshot`] as a bare tree, Markdown, or
//! JSON. The rendered tree is always emitted byte for byte.

use crate::{RepotreeError, Snapshot};
use std::fs;
use std::path::Path;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Tree,
    Markdown,
    Json,
}

impl OutputFormat {
    /// Returns the conventional file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Tree => "txt",
            OutputFormat::Markdown => "md",
            OutputFormat::Json => "json",
        }
    }
}

/// Formats the snapshot into a string.
pub fn format_snapshot(
    snapshot: &Snapshot,
    format: OutputFormat,
    pretty: bool,
) -> Result<String, RepotreeError> {
    match format {
        OutputFormat::Tree => Ok(format_tree(snapshot)),
        OutputFormat::Markdown => Ok(format_markdown(snapshot)),
        OutputFormat::Json => format_json(snapshot, pretty),
    }
}

/// Writes the formatted snapshot to a file.
pub fn write_snapshot_to_file(
    snapshot: &Snapshot,
    format: OutputFormat,
    path: impl AsRef<Path>,
    pretty: bool,
) -> Result<(), RepotreeError> {
    let content = format_snapshot(snapshot, format, pretty)?;
    fs::write(&path, content).map_err(|e| RepotreeError::io(path.as_ref(), e))?;
    Ok(())
}

// ----------------------- Internal formatting -----------------------

fn format_tree(snapshot: &Snapshot) -> String {
    let mut out = snapshot.rendered.clone();
    if !out.is_empty() { out.push('\n'); }
    out
}

fn format_markdown(snapshot: &Snapshot) -> String {
    let mut out = String::with_capacity(1024);
    out.push_str("```text\n");
    out.push_str(&snapshot.rendered);
    if !snapshot.rendered.is_empty() { out.push('\n'); }
    out.push_str("```\n\n");

    for file in &snapshot.key_files {
        let ext = file.path.rsplit_once('.').map(|(_, ext)| ext).unwrap_or("");
        let lang = language_from_extension(ext);

        out.push_str(&format!("## {}\n\n```{}\n", file.path, lang));
        out.push_str(&file.content);
        if !file.content.ends_with('\n') { out.push('\n'); }
        out.push_str("```\n\n");
    }
    out
}

fn format_json(snapshot: &Snapshot, pretty: bool) -> Result<String, RepotreeError> {
    if pretty {
        serde_json::to_string_pretty(snapshot)
    } else {
        serde_json::to_string(snapshot)
    }
    .map_err(RepotreeError::Serialize)
}

fn language_from_extension(ext: &str) -> &'static str {
    match ext {
        "json" => "json", "txt" => "text", "toml" => "toml", "xml" => "xml",
        "mod" => "go-mod", "js" => "javascript", "py" => "python",
        "go" => "go", "java" => "java",
        _ => "",
    }
}
