// LogViewer - platform/mod.rs
//
// Platform abstraction layer: config directories and the HTTP backend.
// Dependencies: core models, directories, reqwest.
// Must NOT depend on: app, ui.

pub mod backend;
pub mod config;
