// LogViewer - platform/backend.rs
//
// HTTP client for the log backend. Stateless: every call is an independent
// GET with no retries and no caching. Connection reuse is whatever the
// reqwest client provides.
//
// The `LogBackend` trait is the seam the controller depends on; tests swap
// in scripted implementations.

use crate::core::model::{FileDetail, FileListBody, FileListEntry, SearchResponse, SourceTag};
use crate::core::query::SearchQuery;
use crate::util::constants;
use crate::util::error::BackendError;
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::time::Duration;

/// The three logical backend operations.
///
/// Implementations must be callable from worker threads.
pub trait LogBackend: Send + Sync {
    /// Names of the files available for searching.
    fn list_files(&self) -> Result<Vec<FileListEntry>, BackendError>;

    /// Files and folders with size and access metadata.
    fn list_details(&self) -> Result<Vec<FileDetail>, BackendError>;

    /// Search one file on the given source stream.
    fn search_logs(
        &self,
        source: &SourceTag,
        query: &SearchQuery,
    ) -> Result<SearchResponse, BackendError>;
}

/// Connection settings for [`HttpBackend`].
#[derive(Debug, Clone)]
pub struct BackendSettings {
    /// Scheme, host and optional port, e.g. `http://localhost:5000`.
    pub base_url: String,
    /// Use the older `/fs/ls_files` listing path.
    pub legacy_listing: bool,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: constants::DEFAULT_BASE_URL.to_string(),
            legacy_listing: false,
            timeout: Duration::from_secs(constants::DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// `LogBackend` over HTTP GET.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
    list_files_path: &'static str,
}

impl HttpBackend {
    pub fn new(settings: &BackendSettings) -> Result<Self, BackendError> {
        let base_url = normalise_base_url(&settings.base_url)?;
        let client = Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|source| BackendError::ClientBuild { source })?;

        let list_files_path = if settings.legacy_listing {
            constants::LEGACY_LIST_FILES_PATH
        } else {
            constants::LIST_FILES_PATH
        };

        tracing::debug!(
            base_url = %base_url,
            list_path = list_files_path,
            timeout_secs = settings.timeout.as_secs(),
            "HTTP backend configured"
        );

        Ok(Self {
            client,
            base_url,
            list_files_path,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn list_files_url(&self) -> String {
        format!("{}{}", self.base_url, self.list_files_path)
    }

    pub fn list_details_url(&self) -> String {
        format!("{}{}", self.base_url, constants::LIST_DETAILS_PATH)
    }

    /// The source tag is interpolated as-is; `SourceTag` guarantees it is
    /// a single safe path segment.
    pub fn search_url(&self, source: &SourceTag) -> String {
        format!(
            "{}{}/{}",
            self.base_url,
            constants::SEARCH_PATH_PREFIX,
            source.as_str()
        )
    }

    fn get_json<T: DeserializeOwned>(
        &self,
        url: String,
        params: Option<&BTreeMap<String, String>>,
    ) -> Result<T, BackendError> {
        let mut request = self.client.get(&url);
        if let Some(params) = params {
            request = request.query(params);
        }

        let response = match request.send() {
            Ok(r) => r,
            Err(source) => return Err(BackendError::Transport { url, source }),
        };

        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body = match response.bytes() {
            Ok(b) => b,
            Err(source) => return Err(BackendError::Transport { url, source }),
        };

        serde_json::from_slice(&body).map_err(|source| BackendError::Decode { url, source })
    }
}

impl LogBackend for HttpBackend {
    fn list_files(&self) -> Result<Vec<FileListEntry>, BackendError> {
        let body: FileListBody = self.get_json(self.list_files_url(), None)?;
        Ok(body.into_entries())
    }

    fn list_details(&self) -> Result<Vec<FileDetail>, BackendError> {
        self.get_json(self.list_details_url(), None)
    }

    fn search_logs(
        &self,
        source: &SourceTag,
        query: &SearchQuery,
    ) -> Result<SearchResponse, BackendError> {
        let params = query.to_query_params();
        tracing::debug!(source = %source, params = ?params, "Searching logs");
        self.get_json(self.search_url(source), Some(&params))
    }
}

/// Trim whitespace and trailing slashes; require an http(s) scheme and host.
pub(crate) fn normalise_base_url(raw: &str) -> Result<String, BackendError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let rest = trimmed
        .strip_prefix("http://")
        .or_else(|| trimmed.strip_prefix("https://"));

    match rest {
        Some(host) if !host.is_empty() && !host.contains(['?', '#']) => Ok(trimmed.to_string()),
        Some(_) => Err(BackendError::InvalidBaseUrl {
            url: raw.to_string(),
            reason: "missing host, or contains a query/fragment".to_string(),
        }),
        None => Err(BackendError::InvalidBaseUrl {
            url: raw.to_string(),
            reason: "must start with http:// or https://".to_string(),
        }),
    }
}
