// LogViewer - core/model.rs
//
// Core data model types: the wire vocabulary shared between the backend
// client, the controller and the renderer. Pure data, no I/O.

use crate::util::constants;
use crate::util::error::QueryError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

// =============================================================================
// Source tag
// =============================================================================

/// Identifier of the backend log stream to query (e.g. `v3`).
///
/// The tag becomes a URL path segment without escaping, so construction
/// rejects anything outside `[A-Za-z0-9_.-]`. `.` and `..` are rejected too.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceTag(String);

impl SourceTag {
    /// Validate and wrap a tag.
    pub fn new(tag: impl Into<String>) -> Result<Self, QueryError> {
        let tag = tag.into();
        if tag == "." || tag == ".." || !source_tag_regex().is_match(&tag) {
            return Err(QueryError::InvalidSource { tag });
        }
        Ok(Self(tag))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The tags offered as buttons, in display order.
    pub fn known() -> Vec<SourceTag> {
        constants::KNOWN_SOURCES
            .iter()
            .map(|t| SourceTag((*t).to_string()))
            .collect()
    }
}

impl Default for SourceTag {
    fn default() -> Self {
        Self(constants::DEFAULT_SOURCE.to_string())
    }
}

impl fmt::Display for SourceTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for SourceTag {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

fn source_tag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(constants::SOURCE_TAG_PATTERN).expect("source tag regex"))
}

// =============================================================================
// Log lines
// =============================================================================

/// One matched log entry, handed through verbatim.
///
/// The backend sends strings; any other JSON value is kept as its compact
/// JSON text so nothing is silently dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "serde_json::Value", into = "String")]
pub struct LogLine(String);

impl LogLine {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The line without its trailing newline; the backend keeps the raw
    /// line terminator from the file.
    pub fn display_text(&self) -> &str {
        self.0.trim_end_matches(['\r', '\n'])
    }
}

impl From<serde_json::Value> for LogLine {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(s) => Self(s),
            other => Self(other.to_string()),
        }
    }
}

impl From<LogLine> for String {
    fn from(line: LogLine) -> Self {
        line.0
    }
}

impl From<&str> for LogLine {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

// =============================================================================
// File listing
// =============================================================================

/// Opaque identifier of a browsable file; meaning is defined by the backend.
pub type FileListEntry = String;

/// Body of the file listing endpoint.
///
/// Current servers return a bare array; some deployments wrap it in `data`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FileListBody {
    Bare(Vec<FileListEntry>),
    Wrapped { data: Vec<FileListEntry> },
}

impl FileListBody {
    pub fn into_entries(self) -> Vec<FileListEntry> {
        match self {
            Self::Bare(entries) | Self::Wrapped { data: entries } => entries,
        }
    }
}

/// Kind of an item in the detailed listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    File,
    Folder,
}

impl FileKind {
    pub fn label(&self) -> &'static str {
        match self {
            FileKind::File => "file",
            FileKind::Folder => "folder",
        }
    }
}

/// One row of the detailed listing (`/fs/list_all`).
///
/// Folders carry only `name` and `byte_size`; files add the human-readable
/// size, extension and read access flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileDetail {
    #[serde(rename = "type")]
    pub kind: FileKind,
    pub name: String,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub byte_size: u64,
    #[serde(default)]
    pub extension: Option<String>,
    #[serde(default)]
    pub read_access: Option<bool>,
}

impl FileDetail {
    /// Only readable plain files can be searched.
    pub fn is_searchable(&self) -> bool {
        self.kind == FileKind::File && self.read_access.unwrap_or(true)
    }
}

// =============================================================================
// Search response
// =============================================================================

/// Decoded body of the search endpoint.
///
/// A transport-level success may still carry an application error:
/// `err_code != 0` with a human-readable `message`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchResponse {
    pub err_code: i64,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Vec<LogLine>,
}

impl SearchResponse {
    pub fn is_success(&self) -> bool {
        self.err_code == constants::ERR_CODE_OK
    }

    /// Message to show for an application error.
    pub fn error_message(&self) -> String {
        match self.message.as_deref() {
            Some(m) if !m.trim().is_empty() => m.to_string(),
            _ => format!("Request failed (err_code {}).", self.err_code),
        }
    }
}
