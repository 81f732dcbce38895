// LogViewer - ui/theme.rs
//
// Colour scheme, visuals and layout constants.
// No dependencies on app state or business logic.

use egui::{Color32, FontId, TextStyle};

/// Apply dark/light visuals and the configured body font size.
pub fn apply(ctx: &egui::Context, dark_mode: bool, font_size: f32) {
    ctx.set_visuals(if dark_mode {
        egui::Visuals::dark()
    } else {
        egui::Visuals::light()
    });
    ctx.style_mut(|style| {
        style
            .text_styles
            .insert(TextStyle::Body, FontId::proportional(font_size));
        style
            .text_styles
            .insert(TextStyle::Button, FontId::proportional(font_size));
        style
            .text_styles
            .insert(TextStyle::Monospace, FontId::monospace(font_size - 1.5));
    });
}

/// Foreground colour for result rows: white in dark mode, near-black in light.
pub fn row_text_colour(dark_mode: bool) -> Color32 {
    if dark_mode {
        Color32::from_rgb(243, 244, 246) // Gray 100
    } else {
        Color32::from_rgb(17, 24, 39) // Gray 900
    }
}

/// Line-number gutter colour.
pub fn gutter_colour(dark_mode: bool) -> Color32 {
    if dark_mode {
        Color32::from_rgb(107, 114, 128) // Gray 500
    } else {
        Color32::from_rgb(156, 163, 175) // Gray 400
    }
}

/// Background behind keyword matches inside a result row.
pub fn match_bg_colour(dark_mode: bool) -> Color32 {
    if dark_mode {
        Color32::from_rgba_premultiplied(217, 119, 6, 90) // Amber 600
    } else {
        Color32::from_rgb(253, 230, 138) // Amber 200
    }
}

/// Accent for the active source button.
pub const ACTIVE_SOURCE: Color32 = Color32::from_rgb(37, 99, 235); // Blue 600

/// Notice dialog text.
pub const NOTICE_ERROR: Color32 = Color32::from_rgb(248, 113, 113); // Red 400

/// Layout constants.
pub const SIDEBAR_WIDTH: f32 = 280.0;
pub const ROW_HEIGHT: f32 = 18.0;
pub const RESULT_FONT_SIZE: f32 = 12.5;
