// LogViewer - app/mod.rs
//
// Application layer: the query controller, UI state, and request dispatch.
// Dependencies: core, platform::backend (through the `LogBackend` trait).
// Must NOT depend on: ui.

pub mod controller;
pub mod headless;
pub mod request;
pub mod state;
