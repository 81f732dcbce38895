// LogViewer - app/controller.rs
//
// Query builder and UI state controller.
//
// Owns the search payload, the active source tag and the UI state. User
// actions arrive as method calls (or `Action`s from the renderer); backend
// results arrive as `BackendEvent`s and are reconciled here.
//
// Reconciliation rules:
//   - Each search is tagged with a generation. Only the latest search's
//     result may touch `log_data` / `is_loading`; older ones are dropped.
//   - The same applies to file list and file detail refreshes.
//   - No retries. Every failure ends its attempt and becomes a notice.

use crate::app::request::{BackendEvent, Generation, RequestManager};
use crate::app::state::{CompletedSearch, Notice, UiState};
use crate::core::export::{self, ExportFormat};
use crate::core::model::{FileDetail, FileListEntry, SearchResponse, SourceTag};
use crate::core::query::{SearchPayload, SearchQuery};
use crate::platform::backend::LogBackend;
use crate::util::constants;
use crate::util::error::{BackendError, ExportError, QueryError};
use crate::util::logging::preview;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// A change requested by the renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetFilename(Option<String>),
    SetKeyword(String),
    SetCount(u32),
    SelectSource(SourceTag),
    Search,
    RefreshFiles,
    RefreshDetails,
    DismissNotice,
    ExportResults(PathBuf),
}

/// Owns the payload and UI state; mediates between the user and the backend.
pub struct QueryController {
    payload: SearchPayload,
    source: SourceTag,
    state: UiState,
    requests: RequestManager,
    default_count: u32,

    /// Generation of the search whose result is still wanted.
    latest_search: Option<Generation>,
    latest_file_list: Option<Generation>,
    latest_details: Option<Generation>,

    /// One-shot request to move keyboard focus to the keyword field.
    focus_requested: bool,
}

impl QueryController {
    /// Controller with the stock defaults (source `v3`, count 10).
    pub fn new(backend: Arc<dyn LogBackend>) -> Self {
        Self::with_defaults(backend, SourceTag::default(), constants::DEFAULT_COUNT)
    }

    /// Controller with configured startup source and count.
    pub fn with_defaults(
        backend: Arc<dyn LogBackend>,
        source: SourceTag,
        default_count: u32,
    ) -> Self {
        let mut controller = Self {
            payload: SearchPayload::default(),
            source,
            state: UiState::new(),
            requests: RequestManager::new(backend),
            default_count,
            latest_search: None,
            latest_file_list: None,
            latest_details: None,
            focus_requested: false,
        };
        controller.init_payload();
        controller
    }

    // -------------------------------------------------------------------------
    // Read-only views for the renderer
    // -------------------------------------------------------------------------

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn payload(&self) -> &SearchPayload {
        &self.payload
    }

    pub fn source(&self) -> &SourceTag {
        &self.source
    }

    /// True while any backend call is outstanding.
    pub fn is_busy(&self) -> bool {
        self.requests.in_flight() > 0
    }

    /// Consume the pending focus request, if any.
    pub fn take_focus_request(&mut self) -> bool {
        std::mem::take(&mut self.focus_requested)
    }

    // -------------------------------------------------------------------------
    // Operations
    // -------------------------------------------------------------------------

    /// Reset the payload to its defaults and clear `search_performed`.
    pub fn init_payload(&mut self) {
        self.payload = SearchPayload {
            count: self.default_count,
            ..SearchPayload::default()
        };
        self.state.search_performed = false;
    }

    /// Make `tag` the active source and ask the renderer to focus the
    /// keyword field.
    pub fn select_source(&mut self, tag: SourceTag) {
        if tag != self.source {
            tracing::debug!(from = %self.source, to = %tag, "Source selected");
        }
        self.source = tag;
        self.focus_requested = true;
    }

    /// Like `select_source`, from unvalidated text (CLI, config).
    pub fn select_source_str(&mut self, tag: &str) -> Result<(), QueryError> {
        match SourceTag::new(tag) {
            Ok(tag) => {
                self.select_source(tag);
                Ok(())
            }
            Err(e) => {
                tracing::debug!(tag, "Rejected source tag");
                self.push_notice(Notice::InvalidSource {
                    tag: tag.to_string(),
                });
                Err(e)
            }
        }
    }

    pub fn set_filename(&mut self, filename: Option<String>) {
        self.payload.filename = filename;
    }

    pub fn set_keyword(&mut self, keyword: String) {
        self.payload.keyword = keyword;
    }

    pub fn set_count(&mut self, count: u32) {
        self.payload.count = count.min(constants::MAX_COUNT);
    }

    /// Fetch the file list. Replaces `file_list` on success.
    pub fn refresh_file_list(&mut self) {
        self.state.files_loading = true;
        self.latest_file_list = Some(self.requests.request_file_list());
    }

    /// Fetch the detailed listing. Replaces `file_details` on success.
    pub fn refresh_file_details(&mut self) {
        self.state.details_loading = true;
        self.latest_details = Some(self.requests.request_file_details());
    }

    /// Submit the current payload.
    ///
    /// Returns the generation of the dispatched request, or `None` when the
    /// filename precondition failed and nothing was sent.
    pub fn search(&mut self) -> Option<Generation> {
        let query = match self.payload.to_query() {
            Ok(q) => q,
            Err(e) => {
                tracing::debug!(error = %e, "Search blocked");
                self.push_notice(Notice::from(e));
                return None;
            }
        };

        self.state.search_performed = true;
        self.state.is_loading = true;
        self.state.log_data.clear();
        self.state.status_message = format!("Searching {}...", query.filename);

        let generation = self.requests.request_search(self.source.clone(), query);
        self.latest_search = Some(generation);
        Some(generation)
    }

    /// Write the current results to `path`; the format follows the extension.
    pub fn export_results(&mut self, path: &Path) {
        match self.write_export(path) {
            Ok(n) => {
                tracing::info!(path = %path.display(), lines = n, "Results exported");
                self.state.status_message = format!("Exported {n} lines to {}.", path.display());
            }
            Err(e) => {
                tracing::warn!(error = %e, "Export failed");
                self.push_notice(Notice::ExportFailed {
                    detail: e.to_string(),
                });
            }
        }
    }

    fn write_export(&self, path: &Path) -> crate::util::error::Result<usize> {
        let file = std::fs::File::create(path).map_err(|source| ExportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let n = export::export(ExportFormat::from_path(path), &self.state.log_data, file, path)?;
        Ok(n)
    }

    /// Remove the notice currently shown.
    pub fn dismiss_notice(&mut self) {
        self.state.notices.pop_front();
    }

    /// Apply a renderer action.
    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::SetFilename(f) => self.set_filename(f),
            Action::SetKeyword(k) => self.set_keyword(k),
            Action::SetCount(c) => self.set_count(c),
            Action::SelectSource(tag) => self.select_source(tag),
            Action::Search => {
                self.search();
            }
            Action::RefreshFiles => self.refresh_file_list(),
            Action::RefreshDetails => self.refresh_file_details(),
            Action::DismissNotice => self.dismiss_notice(),
            Action::ExportResults(path) => self.export_results(&path),
        }
    }

    // -------------------------------------------------------------------------
    // Reconciliation
    // -------------------------------------------------------------------------

    /// Apply every backend result that has arrived. Returns how many.
    pub fn poll(&mut self) -> usize {
        let events = self.requests.poll();
        let n = events.len();
        for event in events {
            self.handle_event(event);
        }
        n
    }

    /// Block until no call is outstanding or `timeout` elapses.
    /// Returns true when idle.
    pub fn wait_idle(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while self.requests.in_flight() > 0 {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return false;
            }
            if let Some(event) = self.requests.recv_timeout(remaining) {
                self.handle_event(event);
            }
        }
        true
    }

    /// Merge one backend result into the UI state.
    pub fn handle_event(&mut self, event: BackendEvent) {
        match event {
            BackendEvent::FilesListed { generation, result } => {
                self.on_files_listed(generation, result)
            }
            BackendEvent::DetailsListed { generation, result } => {
                self.on_details_listed(generation, result)
            }
            BackendEvent::SearchCompleted {
                generation,
                source,
                query,
                result,
            } => self.on_search_completed(generation, source, query, result),
        }
    }

    fn on_files_listed(
        &mut self,
        generation: Generation,
        result: Result<Vec<FileListEntry>, BackendError>,
    ) {
        if self.latest_file_list != Some(generation) {
            tracing::debug!(generation, "Discarding stale file list");
            return;
        }
        self.latest_file_list = None;
        self.state.files_loading = false;

        match result {
            Ok(files) => {
                tracing::info!(files = files.len(), "File list loaded");
                self.state.file_list = files;
            }
            Err(e) => {
                tracing::warn!(error = %e, timeout = e.is_timeout(), "File list request failed");
                self.push_notice(Notice::FileListUnavailable);
            }
        }
    }

    fn on_details_listed(
        &mut self,
        generation: Generation,
        result: Result<Vec<FileDetail>, BackendError>,
    ) {
        if self.latest_details != Some(generation) {
            tracing::debug!(generation, "Discarding stale file details");
            return;
        }
        self.latest_details = None;
        self.state.details_loading = false;

        match result {
            Ok(details) => {
                tracing::info!(entries = details.len(), "File details loaded");
                self.state.file_details = details;
            }
            Err(e) => {
                tracing::warn!(error = %e, timeout = e.is_timeout(), "File details request failed");
                self.push_notice(Notice::FileListUnavailable);
            }
        }
    }

    fn on_search_completed(
        &mut self,
        generation: Generation,
        source: SourceTag,
        query: SearchQuery,
        result: Result<SearchResponse, BackendError>,
    ) {
        if self.latest_search != Some(generation) {
            tracing::debug!(
                generation,
                latest = ?self.latest_search,
                "Discarding stale search response"
            );
            return;
        }
        self.latest_search = None;
        self.state.is_loading = false;

        match result {
            Ok(response) if response.is_success() => {
                let lines = response.data.len();
                if let Some(first) = response.data.first() {
                    tracing::debug!(first = preview(first.as_str()), "First matched line");
                }
                tracing::info!(generation, source = %source, lines, "Search completed");
                self.state.log_data = response.data;
                self.state.status_message = format!(
                    "{lines} line(s) from {} ({source}).",
                    query.filename
                );
                self.state.last_search = Some(CompletedSearch {
                    source,
                    filename: query.filename,
                    keyword: query.keyword,
                    lines,
                    finished_at: chrono::Local::now(),
                });
            }
            Ok(response) => {
                tracing::info!(
                    generation,
                    err_code = response.err_code,
                    "Search rejected by server"
                );
                self.state.status_message = "Search failed.".to_string();
                self.push_notice(Notice::Application {
                    message: response.error_message(),
                });
            }
            Err(e) => {
                tracing::warn!(
                    generation,
                    error = %e,
                    timeout = e.is_timeout(),
                    "Search request failed"
                );
                self.state.status_message = "Search failed.".to_string();
                self.push_notice(Notice::TransportFailure);
            }
        }
    }

    fn push_notice(&mut self, notice: Notice) {
        self.state.notices.push_back(notice);
    }
}
