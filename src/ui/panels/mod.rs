// LogViewer - ui/panels/mod.rs

pub mod about;
pub mod file_details;
pub mod notice;
pub mod results;
pub mod search_form;
pub mod sources;
