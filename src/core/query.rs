// LogViewer - core/query.rs
//
// Search payload and its normalisation into an outgoing query.
// Core layer: pure logic, no I/O or UI dependencies.
//
// The backend tells "unset" apart from "zero"/"empty" only by the key being
// absent, so every sentinel value is stripped here before transmission.

use crate::util::constants;
use crate::util::error::QueryError;
use std::collections::BTreeMap;

/// The editable search form. Owned by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPayload {
    /// File to search. Required at search time; no default.
    pub filename: Option<String>,

    /// Substring to match. Empty means "every line".
    pub keyword: String,

    /// Number of most recent matches to return. 0 means "all".
    pub count: u32,

    /// Lines per response page.
    pub chunk_size: u32,
}

impl Default for SearchPayload {
    fn default() -> Self {
        Self {
            filename: None,
            keyword: String::new(),
            count: constants::DEFAULT_COUNT,
            chunk_size: constants::DEFAULT_CHUNK_SIZE,
        }
    }
}

impl SearchPayload {
    /// The chosen filename, treating a blank string as unset.
    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref().filter(|f| !f.trim().is_empty())
    }

    /// Build the outgoing query, dropping sentinel-valued fields.
    ///
    /// Fails only when no filename is set.
    pub fn to_query(&self) -> Result<SearchQuery, QueryError> {
        let filename = self.filename().ok_or(QueryError::MissingFilename)?;
        Ok(SearchQuery {
            filename: filename.to_string(),
            keyword: (!self.keyword.is_empty()).then(|| self.keyword.clone()),
            count: (self.count != constants::COUNT_UNSET).then_some(self.count),
            chunk_size: self.chunk_size,
        })
    }
}

/// A normalised search request: absent fields are not transmitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub filename: String,
    pub keyword: Option<String>,
    pub count: Option<u32>,
    pub chunk_size: u32,
}

impl SearchQuery {
    /// URL query parameters for this request. Only present keys appear.
    pub fn to_query_params(&self) -> BTreeMap<String, String> {
        let mut params = BTreeMap::new();
        params.insert("filename".to_string(), self.filename.clone());
        if let Some(ref keyword) = self.keyword {
            params.insert("keyword".to_string(), keyword.clone());
        }
        if let Some(count) = self.count {
            params.insert("count".to_string(), count.to_string());
        }
        params.insert("chunk_size".to_string(), self.chunk_size.to_string());
        params
    }
}
