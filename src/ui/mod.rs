// LogViewer - ui/mod.rs
//
// UI layer: presentation only.
// Dependencies: app (controller, read-only state), core models, egui.
// Must NOT depend on: platform, direct I/O.

pub mod panels;
pub mod theme;
