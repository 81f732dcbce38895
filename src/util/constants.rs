// LogViewer - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "Log Viewer";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "LogViewer";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Backend endpoints
// =============================================================================

/// Base URL of the log backend when neither config nor CLI override it.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Path listing plain files in the backend's search directory.
pub const LIST_FILES_PATH: &str = "/fs/ls/files_only";

/// Older servers expose the same listing under this path.
pub const LEGACY_LIST_FILES_PATH: &str = "/fs/ls_files";

/// Path listing files and folders with size/access metadata.
pub const LIST_DETAILS_PATH: &str = "/fs/list_all";

/// Prefix of the search endpoint; the source tag is appended as a path segment.
pub const SEARCH_PATH_PREFIX: &str = "/search/search_log";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Smallest accepted request timeout (seconds).
pub const MIN_TIMEOUT_SECS: u64 = 1;

/// Largest accepted request timeout (seconds).
pub const MAX_TIMEOUT_SECS: u64 = 600;

// =============================================================================
// Search payload defaults
// =============================================================================

/// Source tag selected at startup.
pub const DEFAULT_SOURCE: &str = "v3";

/// Source tags offered as buttons in the UI, in display order.
pub const KNOWN_SOURCES: &[&str] = &["v1", "v2", "v3"];

/// Pattern a source tag must match. Tags are interpolated into the URL path
/// unescaped, so only path-safe characters are allowed.
pub const SOURCE_TAG_PATTERN: &str = r"^[A-Za-z0-9_.-]+$";

/// Number of most recent matches requested by default.
pub const DEFAULT_COUNT: u32 = 10;

/// `count` value meaning "no limit"; never transmitted.
pub const COUNT_UNSET: u32 = 0;

/// Upper bound for the count spinner in the search form.
pub const MAX_COUNT: u32 = 100_000;

/// Lines per response page. Fixed; there is no pagination cursor.
pub const DEFAULT_CHUNK_SIZE: u32 = 100;

/// `err_code` value the backend uses for success.
pub const ERR_CODE_OK: i64 = 0;

// =============================================================================
// UI defaults
// =============================================================================

/// Default UI body font size in points.
pub const DEFAULT_FONT_SIZE: f32 = 14.5;

/// Minimum user-configurable UI font size (points).
pub const MIN_FONT_SIZE: f32 = 10.0;

/// Maximum user-configurable UI font size (points).
pub const MAX_FONT_SIZE: f32 = 24.0;

/// Repaint interval while a request is in flight, so results appear promptly.
pub const LOADING_REPAINT_MS: u64 = 100;

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Maximum length of a log line included in debug output.
pub const DEBUG_MAX_LINE_PREVIEW: usize = 200;

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";
