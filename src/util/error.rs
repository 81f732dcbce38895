// LogViewer - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// All errors preserve the causal chain for diagnostic logging; only the
// notice layer decides how much of it a user gets to see.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all LogViewer operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum LogViewerError {
    /// A request to the log backend failed.
    Backend(BackendError),

    /// The search payload could not be turned into a request.
    Query(QueryError),

    /// Export operation failed.
    Export(ExportError),

    /// Configuration loading or validation failed.
    Config(ConfigError),
}

impl fmt::Display for LogViewerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Backend(e) => write!(f, "Backend error: {e}"),
            Self::Query(e) => write!(f, "Query error: {e}"),
            Self::Export(e) => write!(f, "Export error: {e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
        }
    }
}

impl std::error::Error for LogViewerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Backend(e) => Some(e),
            Self::Query(e) => Some(e),
            Self::Export(e) => Some(e),
            Self::Config(e) => Some(e),
        }
    }
}

// ---------------------------------------------------------------------------
// Backend errors
// ---------------------------------------------------------------------------

/// Transport-level failures talking to the log backend.
///
/// Application-level failures (`err_code != 0`) are NOT errors at this layer:
/// they arrive as a successfully decoded response.
#[derive(Debug)]
pub enum BackendError {
    /// The configured base URL cannot be used to build request URLs.
    InvalidBaseUrl { url: String, reason: String },

    /// The HTTP client could not be constructed.
    ClientBuild { source: reqwest::Error },

    /// Network failure, refused connection, or timeout.
    Transport { url: String, source: reqwest::Error },

    /// The server answered with a non-success HTTP status.
    Status { url: String, status: u16 },

    /// The response body was not the expected JSON shape.
    Decode {
        url: String,
        source: serde_json::Error,
    },
}

impl BackendError {
    /// True when the failure was a request timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport { source, .. } if source.is_timeout())
    }
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidBaseUrl { url, reason } => {
                write!(f, "Invalid backend URL '{url}': {reason}")
            }
            Self::ClientBuild { source } => write!(f, "Cannot build HTTP client: {source}"),
            Self::Transport { url, source } => write!(f, "Request to '{url}' failed: {source}"),
            Self::Status { url, status } => {
                write!(f, "Request to '{url}' returned HTTP {status}")
            }
            Self::Decode { url, source } => {
                write!(f, "Malformed response from '{url}': {source}")
            }
        }
    }
}

impl std::error::Error for BackendError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ClientBuild { source } => Some(source),
            Self::Transport { source, .. } => Some(source),
            Self::Decode { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<BackendError> for LogViewerError {
    fn from(e: BackendError) -> Self {
        Self::Backend(e)
    }
}

// ---------------------------------------------------------------------------
// Query errors
// ---------------------------------------------------------------------------

/// Precondition failures building a search request. Never retryable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// No file has been chosen.
    MissingFilename,

    /// The source tag contains characters that are unsafe in a URL path.
    InvalidSource { tag: String },
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingFilename => write!(f, "File name is mandatory"),
            Self::InvalidSource { tag } => write!(
                f,
                "Source tag '{tag}' may only contain letters, digits, '.', '_' and '-'"
            ),
        }
    }
}

impl std::error::Error for QueryError {}

impl From<QueryError> for LogViewerError {
    fn from(e: QueryError) -> Self {
        Self::Query(e)
    }
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Errors related to saving results to disk.
#[derive(Debug)]
pub enum ExportError {
    /// I/O error writing the export file.
    Io { path: PathBuf, source: io::Error },

    /// CSV serialisation error.
    Csv { path: PathBuf, source: csv::Error },

    /// JSON serialisation error.
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "Export I/O error '{}': {source}", path.display())
            }
            Self::Csv { path, source } => {
                write!(f, "CSV export error '{}': {source}", path.display())
            }
            Self::Json { path, source } => {
                write!(f, "JSON export error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
        }
    }
}

impl From<ExportError> for LogViewerError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A config value is out of the allowed range.
    ValueOutOfRange {
        field: String,
        value: String,
        expected: String,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Failed to parse config file '{}': {source}", path.display())
            }
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "Config '{field}' = '{value}' is out of range. Expected: {expected}"
            ),
            Self::Io { path, source } => {
                write!(f, "Could not read config file '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ConfigError> for LogViewerError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Convenience type alias for LogViewer results.
pub type Result<T> = std::result::Result<T, LogViewerError>;
