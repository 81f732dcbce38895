// LogViewer - app/state.rs
//
// UI state: everything the renderer displays. Owned and mutated only by the
// `QueryController`; the renderer receives `&UiState`.

use crate::core::model::{FileDetail, FileListEntry, LogLine, SourceTag};
use crate::util::error::QueryError;
use chrono::{DateTime, Local};
use std::collections::VecDeque;

/// A user-visible, dismissable message (the modal "alert").
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Search pressed with no file chosen. No request was made.
    FilenameRequired,

    /// The backend answered with `err_code != 0`; its message, verbatim.
    Application { message: String },

    /// Network failure, timeout, HTTP error status, or malformed body.
    TransportFailure,

    /// The file list could not be fetched.
    FileListUnavailable,

    /// Saving results to disk failed.
    ExportFailed { detail: String },

    /// A source tag that cannot be used in a request URL.
    InvalidSource { tag: String },
}

impl Notice {
    /// Window title for the notice dialog.
    pub fn title(&self) -> &'static str {
        match self {
            Notice::FilenameRequired => "File required",
            Notice::Application { .. } => "Search failed",
            Notice::TransportFailure => "Something went wrong",
            Notice::FileListUnavailable => "File list unavailable",
            Notice::ExportFailed { .. } => "Export failed",
            Notice::InvalidSource { .. } => "Invalid source",
        }
    }

    /// Body text for the notice dialog.
    pub fn text(&self) -> String {
        match self {
            Notice::FilenameRequired => "File name is Mandatory!".to_string(),
            Notice::Application { message } => message.clone(),
            Notice::TransportFailure => {
                "Something went wrong while contacting the log server. Please try again."
                    .to_string()
            }
            Notice::FileListUnavailable => {
                "Could not load the list of files from the log server.".to_string()
            }
            Notice::ExportFailed { detail } => detail.clone(),
            Notice::InvalidSource { tag } => format!("'{tag}' is not a valid log source."),
        }
    }
}

impl From<QueryError> for Notice {
    fn from(e: QueryError) -> Self {
        match e {
            QueryError::MissingFilename => Notice::FilenameRequired,
            QueryError::InvalidSource { tag } => Notice::InvalidSource { tag },
        }
    }
}

/// Summary of the most recent search that returned data.
#[derive(Debug, Clone)]
pub struct CompletedSearch {
    pub source: SourceTag,
    pub filename: String,
    pub keyword: Option<String>,
    pub lines: usize,
    pub finished_at: DateTime<Local>,
}

/// Everything the renderer needs to draw a frame.
#[derive(Debug)]
pub struct UiState {
    /// A search has been attempted; switches the results pane out of its
    /// initial empty state.
    pub search_performed: bool,

    /// The latest search is in flight.
    pub is_loading: bool,

    /// A file list refresh is in flight.
    pub files_loading: bool,

    /// A file details refresh is in flight.
    pub details_loading: bool,

    /// Files available for searching.
    pub file_list: Vec<FileListEntry>,

    /// Files and folders with metadata, for the details window.
    pub file_details: Vec<FileDetail>,

    /// Lines returned by the latest successful search.
    pub log_data: Vec<LogLine>,

    /// Pending notices, oldest first. The renderer shows the front one.
    pub notices: VecDeque<Notice>,

    /// Status message for the status bar.
    pub status_message: String,

    /// Details of the latest successful search.
    pub last_search: Option<CompletedSearch>,
}

impl UiState {
    pub fn new() -> Self {
        Self {
            search_performed: false,
            is_loading: false,
            files_loading: false,
            details_loading: false,
            file_list: Vec::new(),
            file_details: Vec::new(),
            log_data: Vec::new(),
            notices: VecDeque::new(),
            status_message: "Ready. Choose a file and press Search.".to_string(),
            last_search: None,
        }
    }

    /// The notice currently shown, if any.
    pub fn current_notice(&self) -> Option<&Notice> {
        self.notices.front()
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}
