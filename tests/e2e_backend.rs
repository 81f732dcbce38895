// LogViewer - tests/e2e_backend.rs
//
// End-to-end tests for the HTTP backend, the query controller and the
// headless runner.
//
// A small axum server stands in for the log server. It serves the listing
// endpoints, filters a fixed set of lines for searches, and records every
// query string it receives so tests can assert on exactly what went over
// the wire.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use log_viewer::app::controller::QueryController;
use log_viewer::app::headless;
use log_viewer::app::state::Notice;
use log_viewer::core::model::{FileKind, SourceTag};
use log_viewer::core::query::SearchPayload;
use log_viewer::platform::backend::{BackendSettings, HttpBackend, LogBackend};
use log_viewer::util::error::BackendError;
use serde_json::json;
use std::collections::HashMap;
use std::sync::{mpsc, Arc, Mutex};
use std::time::Duration;

// =============================================================================
// Fixture server
// =============================================================================

const LINES: &[&str] = &[
    "2024-05-01 10:00:00 INFO service started",
    "2024-05-01 10:00:05 ERROR disk full on /var",
    "2024-05-01 10:01:00 INFO request ok",
    "2024-05-01 10:02:00 ERROR upstream timeout",
    "2024-05-01 10:03:00 INFO service stopped",
];

type Seen = Arc<Mutex<Vec<(String, HashMap<String, String>)>>>;

struct Fixture {
    base_url: String,
    seen: Seen,
}

impl Fixture {
    /// Search requests received so far, as (source, query params).
    fn seen(&self) -> Vec<(String, HashMap<String, String>)> {
        self.seen.lock().unwrap().clone()
    }

    fn backend(&self, legacy_listing: bool, timeout: Duration) -> HttpBackend {
        HttpBackend::new(&BackendSettings {
            base_url: self.base_url.clone(),
            legacy_listing,
            timeout,
        })
        .expect("fixture base url is valid")
    }

    fn controller(&self) -> QueryController {
        let backend: Arc<dyn LogBackend> = Arc::new(self.backend(false, Duration::from_secs(5)));
        QueryController::new(backend)
    }
}

async fn files_only() -> Json<serde_json::Value> {
    Json(json!(["app.log", "db.log"]))
}

async fn legacy_files() -> Json<serde_json::Value> {
    Json(json!({ "data": ["legacy.log"] }))
}

async fn list_all() -> Json<serde_json::Value> {
    Json(json!([
        {
            "type": "file",
            "name": "app.log",
            "size": "1.2 KB",
            "byte_size": 1234,
            "extension": ".log",
            "read_access": true
        },
        {
            "type": "folder",
            "name": "archive",
            "byte_size": 0,
            "read_access": true
        }
    ]))
}

async fn search(
    State(seen): State<Seen>,
    Path(source): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    seen.lock().unwrap().push((source, params.clone()));

    match params.get("filename").map(String::as_str) {
        Some("missing.log") => Json(json!({
            "err_code": -1,
            "message": "File does not exist.",
            "data": []
        }))
        .into_response(),
        Some("boom.log") => (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response(),
        Some("garbage.log") => (StatusCode::OK, "<html>not json</html>").into_response(),
        Some("slow.log") => {
            tokio::time::sleep(Duration::from_secs(3)).await;
            Json(json!({ "err_code": 0, "data": [] })).into_response()
        }
        _ => {
            let keyword = params.get("keyword").cloned().unwrap_or_default();
            let mut matched: Vec<&str> = LINES
                .iter()
                .copied()
                .filter(|l| l.contains(&keyword))
                .collect();
            if let Some(count) = params.get("count").and_then(|c| c.parse::<usize>().ok()) {
                let skip = matched.len().saturating_sub(count);
                matched.drain(..skip);
            }
            Json(json!({
                "err_code": 0,
                "message": "Data successfully fetched",
                "data": matched
            }))
            .into_response()
        }
    }
}

/// Start the fixture server on its own runtime thread.
fn start_fixture() -> Fixture {
    let seen: Seen = Arc::default();
    let state = Arc::clone(&seen);
    let (tx, rx) = mpsc::channel();

    std::thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .expect("fixture runtime");
        runtime.block_on(async move {
            let router = Router::new()
                .route("/fs/ls/files_only", get(files_only))
                .route("/fs/ls_files", get(legacy_files))
                .route("/fs/list_all", get(list_all))
                .route("/search/search_log/{source}", get(search))
                .with_state(state);
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                .await
                .expect("bind fixture");
            tx.send(listener.local_addr().expect("fixture addr"))
                .expect("report fixture addr");
            axum::serve(listener, router).await.expect("fixture server");
        });
    });

    let addr = rx
        .recv_timeout(Duration::from_secs(10))
        .expect("fixture server started");
    Fixture {
        base_url: format!("http://{addr}"),
        seen,
    }
}

/// A base URL nothing is listening on.
fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

const WAIT: Duration = Duration::from_secs(10);

// =============================================================================
// Backend client
// =============================================================================

#[test]
fn e2e_lists_files() {
    let fx = start_fixture();
    let files = fx
        .backend(false, Duration::from_secs(5))
        .list_files()
        .expect("listing succeeds");
    assert_eq!(files, vec!["app.log", "db.log"]);
}

#[test]
fn e2e_legacy_listing_accepts_wrapped_body() {
    let fx = start_fixture();
    let files = fx
        .backend(true, Duration::from_secs(5))
        .list_files()
        .expect("legacy listing succeeds");
    assert_eq!(files, vec!["legacy.log"]);
}

#[test]
fn e2e_lists_file_details() {
    let fx = start_fixture();
    let details = fx
        .backend(false, Duration::from_secs(5))
        .list_details()
        .expect("details succeed");

    assert_eq!(details.len(), 2);
    assert_eq!(details[0].kind, FileKind::File);
    assert_eq!(details[0].byte_size, 1234);
    assert!(details[0].is_searchable());
    assert_eq!(details[1].kind, FileKind::Folder);
    assert!(details[1].size.is_none());
    assert!(!details[1].is_searchable());
}

#[test]
fn e2e_search_sends_full_query() {
    let fx = start_fixture();
    let payload = SearchPayload {
        filename: Some("app.log".to_string()),
        keyword: "ERROR".to_string(),
        count: 1,
        chunk_size: 100,
    };
    let response = fx
        .backend(false, Duration::from_secs(5))
        .search_logs(&SourceTag::new("v2").unwrap(), &payload.to_query().unwrap())
        .expect("search succeeds");

    assert!(response.is_success());
    assert_eq!(response.data.len(), 1);
    assert_eq!(response.data[0].as_str(), LINES[3]);

    let seen = fx.seen();
    let (source, params) = &seen[0];
    assert_eq!(source, "v2");
    assert_eq!(params["filename"], "app.log");
    assert_eq!(params["keyword"], "ERROR");
    assert_eq!(params["count"], "1");
    assert_eq!(params["chunk_size"], "100");
}

#[test]
fn e2e_http_status_error_is_reported() {
    let fx = start_fixture();
    let payload = SearchPayload {
        filename: Some("boom.log".to_string()),
        ..SearchPayload::default()
    };
    let err = fx
        .backend(false, Duration::from_secs(5))
        .search_logs(&SourceTag::default(), &payload.to_query().unwrap())
        .unwrap_err();
    assert!(
        matches!(err, BackendError::Status { status: 500, .. }),
        "got: {err}"
    );
}

#[test]
fn e2e_slow_server_times_out() {
    let fx = start_fixture();
    let payload = SearchPayload {
        filename: Some("slow.log".to_string()),
        ..SearchPayload::default()
    };
    let err = fx
        .backend(false, Duration::from_secs(1))
        .search_logs(&SourceTag::default(), &payload.to_query().unwrap())
        .unwrap_err();
    assert!(err.is_timeout(), "expected a timeout, got: {err}");
}

// =============================================================================
// Controller over HTTP
// =============================================================================

#[test]
fn e2e_unset_keyword_and_count_are_not_sent() {
    let fx = start_fixture();
    let mut c = fx.controller();
    c.select_source(SourceTag::new("v1").unwrap());
    c.set_filename(Some("app.log".to_string()));
    c.set_keyword(String::new());
    c.set_count(0);

    assert!(c.search().is_some());
    assert!(c.wait_idle(WAIT));

    assert_eq!(c.state().log_data.len(), LINES.len());
    assert!(c.state().current_notice().is_none());

    let seen = fx.seen();
    let (source, params) = &seen[0];
    assert_eq!(source, "v1");
    assert!(!params.contains_key("keyword"), "params: {params:?}");
    assert!(!params.contains_key("count"), "params: {params:?}");
    assert_eq!(params["filename"], "app.log");
    assert_eq!(params["chunk_size"], "100");
}

#[test]
fn e2e_default_count_is_sent() {
    let fx = start_fixture();
    let mut c = fx.controller();
    c.set_filename(Some("app.log".to_string()));
    c.set_keyword("ERROR".to_string());
    c.search();
    assert!(c.wait_idle(WAIT));

    let lines: Vec<&str> = c.state().log_data.iter().map(|l| l.as_str()).collect();
    assert_eq!(lines, vec![LINES[1], LINES[3]]);
    assert_eq!(fx.seen()[0].1["count"], "10");
    assert_eq!(fx.seen()[0].0, "v3");
}

#[test]
fn e2e_application_error_becomes_notice() {
    let fx = start_fixture();
    let mut c = fx.controller();
    c.set_filename(Some("missing.log".to_string()));
    c.search();
    assert!(c.wait_idle(WAIT));

    assert!(!c.state().is_loading);
    assert_eq!(
        c.state().current_notice(),
        Some(&Notice::Application {
            message: "File does not exist.".to_string()
        })
    );
}

#[test]
fn e2e_malformed_body_is_transport_failure() {
    let fx = start_fixture();
    let mut c = fx.controller();
    c.set_filename(Some("garbage.log".to_string()));
    c.search();
    assert!(c.wait_idle(WAIT));

    assert!(!c.state().is_loading);
    assert_eq!(c.state().current_notice(), Some(&Notice::TransportFailure));
}

#[test]
fn e2e_unreachable_server_surfaces_notices() {
    let backend: Arc<dyn LogBackend> = Arc::new(
        HttpBackend::new(&BackendSettings {
            base_url: closed_port_url(),
            legacy_listing: false,
            timeout: Duration::from_secs(5),
        })
        .unwrap(),
    );
    let mut c = QueryController::new(backend);

    c.refresh_file_list();
    assert!(c.wait_idle(WAIT));
    assert!(c.state().file_list.is_empty());
    assert!(!c.state().files_loading);
    assert_eq!(c.state().current_notice(), Some(&Notice::FileListUnavailable));
    c.dismiss_notice();

    c.set_filename(Some("app.log".to_string()));
    c.search();
    assert!(c.wait_idle(WAIT));
    assert!(!c.state().is_loading);
    assert_eq!(c.state().current_notice(), Some(&Notice::TransportFailure));
}

// =============================================================================
// Headless runs
// =============================================================================

#[test]
fn e2e_headless_list_prints_files() {
    let fx = start_fixture();
    let mut c = fx.controller();
    let (mut out, mut err) = (Vec::new(), Vec::new());

    let ok = headless::run_list(&mut c, &mut out, &mut err, WAIT).unwrap();

    assert!(ok);
    assert_eq!(String::from_utf8(out).unwrap(), "app.log\ndb.log\n");
    assert!(err.is_empty());
}

#[test]
fn e2e_headless_search_prints_lines() {
    let fx = start_fixture();
    let mut c = fx.controller();
    c.set_filename(Some("app.log".to_string()));
    c.set_keyword("INFO".to_string());
    c.set_count(2);
    let (mut out, mut err) = (Vec::new(), Vec::new());

    let ok = headless::run_search(&mut c, &mut out, &mut err, WAIT).unwrap();

    assert!(ok);
    assert_eq!(
        String::from_utf8(out).unwrap(),
        format!("{}\n{}\n", LINES[2], LINES[4])
    );
}

#[test]
fn e2e_headless_search_without_file_fails() {
    let fx = start_fixture();
    let mut c = fx.controller();
    let (mut out, mut err) = (Vec::new(), Vec::new());

    let ok = headless::run_search(&mut c, &mut out, &mut err, WAIT).unwrap();

    assert!(!ok);
    assert!(out.is_empty());
    assert!(String::from_utf8(err)
        .unwrap()
        .contains("File name is Mandatory!"));
    assert!(fx.seen().is_empty(), "nothing should reach the server");
}
