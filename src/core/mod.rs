// LogViewer - core/mod.rs
//
// Core logic layer: wire types, payload normalisation, export.
// Must NOT depend on: ui, platform, app, or the HTTP client.

pub mod export;
pub mod model;
pub mod query;
