// LogViewer - app/request.rs
//
// Runs backend calls off the UI thread.
//
// Architecture:
//   - `RequestManager` lives on the UI thread; each call runs on its own
//     short-lived background thread.
//   - Every dispatched call is tagged with a generation number and sends
//     exactly one `BackendEvent` back over an mpsc channel.
//   - The UI polls without blocking once per frame. Deciding which
//     generations are still wanted is the controller's job.

use crate::core::model::{FileDetail, FileListEntry, SearchResponse, SourceTag};
use crate::core::query::SearchQuery;
use crate::platform::backend::LogBackend;
use crate::util::error::BackendError;
use std::sync::{mpsc, Arc};
use std::time::Duration;

/// Monotonically increasing tag attached to every dispatched request.
pub type Generation = u64;

/// Result of one backend call, delivered to the UI thread.
#[derive(Debug)]
pub enum BackendEvent {
    FilesListed {
        generation: Generation,
        result: Result<Vec<FileListEntry>, BackendError>,
    },
    DetailsListed {
        generation: Generation,
        result: Result<Vec<FileDetail>, BackendError>,
    },
    SearchCompleted {
        generation: Generation,
        source: SourceTag,
        query: SearchQuery,
        result: Result<SearchResponse, BackendError>,
    },
}

impl BackendEvent {
    pub fn generation(&self) -> Generation {
        match self {
            Self::FilesListed { generation, .. }
            | Self::DetailsListed { generation, .. }
            | Self::SearchCompleted { generation, .. } => *generation,
        }
    }
}

/// Dispatches backend calls onto worker threads and collects their results.
pub struct RequestManager {
    backend: Arc<dyn LogBackend>,
    tx: mpsc::Sender<BackendEvent>,
    rx: mpsc::Receiver<BackendEvent>,
    next_generation: Generation,
    in_flight: usize,
}

impl RequestManager {
    pub fn new(backend: Arc<dyn LogBackend>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            backend,
            tx,
            rx,
            next_generation: 1,
            in_flight: 0,
        }
    }

    /// Number of dispatched calls whose result has not been collected yet.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// List the searchable files. Returns the request's generation.
    pub fn request_file_list(&mut self) -> Generation {
        let generation = self.allocate();
        let backend = Arc::clone(&self.backend);
        let tx = self.tx.clone();
        std::thread::spawn(move || {
            let result = backend.list_files();
            // Receiver dropped means the UI closed; nothing left to do.
            let _ = tx.send(BackendEvent::FilesListed { generation, result });
        });
        tracing::debug!(generation, "File list requested");
        generation
    }

    /// List files and folders with metadata.
    pub fn request_file_details(&mut self) -> Generation {
        let generation = self.allocate();
        let backend = Arc::clone(&self.backend);
        let tx = self.tx.clone();
        std::thread::spawn(move || {
            let result = backend.list_details();
            let _ = tx.send(BackendEvent::DetailsListed { generation, result });
        });
        tracing::debug!(generation, "File details requested");
        generation
    }

    /// Search `query.filename` on the `source` stream.
    pub fn request_search(&mut self, source: SourceTag, query: SearchQuery) -> Generation {
        let generation = self.allocate();
        let backend = Arc::clone(&self.backend);
        let tx = self.tx.clone();
        tracing::info!(
            generation,
            source = %source,
            file = %query.filename,
            "Search dispatched"
        );
        std::thread::spawn(move || {
            let result = backend.search_logs(&source, &query);
            let _ = tx.send(BackendEvent::SearchCompleted {
                generation,
                source,
                query,
                result,
            });
        });
        generation
    }

    /// Collect every result that has arrived, without blocking.
    pub fn poll(&mut self) -> Vec<BackendEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.rx.try_recv() {
            events.push(event);
        }
        self.in_flight = self.in_flight.saturating_sub(events.len());
        events
    }

    /// Block for at most `timeout` waiting for the next result.
    pub fn recv_timeout(&mut self, timeout: Duration) -> Option<BackendEvent> {
        let event = self.rx.recv_timeout(timeout).ok()?;
        self.in_flight = self.in_flight.saturating_sub(1);
        Some(event)
    }

    fn allocate(&mut self) -> Generation {
        let generation = self.next_generation;
        self.next_generation += 1;
        self.in_flight += 1;
        generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::LogLine;
    use std::time::Instant;

    struct EchoBackend;

    impl LogBackend for EchoBackend {
        fn list_files(&self) -> Result<Vec<FileListEntry>, BackendError> {
            Ok(vec!["a.log".to_string()])
        }

        fn list_details(&self) -> Result<Vec<FileDetail>, BackendError> {
            Ok(Vec::new())
        }

        fn search_logs(
            &self,
            _source: &SourceTag,
            query: &SearchQuery,
        ) -> Result<SearchResponse, BackendError> {
            Ok(SearchResponse {
                err_code: 0,
                message: None,
                data: vec![LogLine::new(query.filename.clone())],
            })
        }
    }

    fn drain(manager: &mut RequestManager, expected: usize) -> Vec<BackendEvent> {
        let deadline = Instant::now() + Duration::from_secs(5);
        let mut events = Vec::new();
        while events.len() < expected && Instant::now() < deadline {
            if let Some(e) = manager.recv_timeout(Duration::from_millis(50)) {
                events.push(e);
            }
        }
        events
    }

    #[test]
    fn test_generations_are_unique_and_increasing() {
        let mut manager = RequestManager::new(Arc::new(EchoBackend));
        let g1 = manager.request_file_list();
        let g2 = manager.request_file_details();
        let g3 = manager.request_search(
            SourceTag::default(),
            SearchQuery {
                filename: "x.log".to_string(),
                keyword: None,
                count: None,
                chunk_size: 100,
            },
        );
        assert!(g1 < g2 && g2 < g3);
        assert_eq!(manager.in_flight(), 3);

        let events = drain(&mut manager, 3);
        assert_eq!(events.len(), 3);
        assert_eq!(manager.in_flight(), 0);

        let mut generations: Vec<_> = events.iter().map(BackendEvent::generation).collect();
        generations.sort_unstable();
        assert_eq!(generations, vec![g1, g2, g3]);
    }

    #[test]
    fn test_poll_never_blocks_when_idle() {
        let mut manager = RequestManager::new(Arc::new(EchoBackend));
        assert!(manager.poll().is_empty());
        assert_eq!(manager.in_flight(), 0);
    }
}
