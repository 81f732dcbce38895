// LogViewer - ui/panels/results.rs
//
// Virtual-scrolling list of matched lines.
//
// Uses egui's `ScrollArea::show_rows`, which lays out only the visible rows,
// so rendering cost does not grow with the result size. Occurrences of the
// keyword used for the displayed results are highlighted. The backend matches
// keywords case-sensitively, and so does the highlighter.

use crate::app::controller::QueryController;
use crate::ui::theme;
use egui::text::{LayoutJob, TextFormat};

/// Render the results panel (central area).
pub fn render(ui: &mut egui::Ui, controller: &QueryController, dark_mode: bool) {
    let state = controller.state();

    if state.is_loading {
        ui.centered_and_justified(|ui| {
            ui.spinner();
        });
        return;
    }

    if state.log_data.is_empty() {
        ui.centered_and_justified(|ui| {
            if state.search_performed {
                ui.label("No matching lines.");
            } else {
                ui.label("Choose a file, optionally a keyword, and press Search.");
            }
        });
        return;
    }

    let keyword = state
        .last_search
        .as_ref()
        .and_then(|s| s.keyword.as_deref())
        .unwrap_or("");
    let gutter_width = state.log_data.len().to_string().len();
    let font = egui::FontId::monospace(theme::RESULT_FONT_SIZE);

    egui::ScrollArea::both()
        .auto_shrink([false; 2])
        .show_rows(ui, theme::ROW_HEIGHT, state.log_data.len(), |ui, row_range| {
            for idx in row_range {
                let Some(line) = state.log_data.get(idx) else {
                    continue;
                };

                let mut job = LayoutJob::default();
                job.append(
                    &format!("{:>width$}  ", idx + 1, width = gutter_width),
                    0.0,
                    TextFormat {
                        font_id: font.clone(),
                        color: theme::gutter_colour(dark_mode),
                        ..Default::default()
                    },
                );
                append_highlighted(&mut job, line.display_text(), keyword, &font, dark_mode);

                ui.add(egui::Label::new(job).extend());
            }
        });
}

/// Append `text` to `job`, giving every occurrence of `keyword` a highlight
/// background.
fn append_highlighted(
    job: &mut LayoutJob,
    text: &str,
    keyword: &str,
    font: &egui::FontId,
    dark_mode: bool,
) {
    let plain = TextFormat {
        font_id: font.clone(),
        color: theme::row_text_colour(dark_mode),
        ..Default::default()
    };
    let highlighted = TextFormat {
        background: theme::match_bg_colour(dark_mode),
        ..plain.clone()
    };

    for (segment, is_match) in split_matches(text, keyword) {
        let format = if is_match { &highlighted } else { &plain };
        job.append(segment, 0.0, format.clone());
    }
}

/// Split `text` into alternating plain and matching segments.
fn split_matches<'a>(text: &'a str, keyword: &str) -> Vec<(&'a str, bool)> {
    if keyword.is_empty() {
        return vec![(text, false)];
    }
    let mut segments = Vec::new();
    let mut rest_start = 0;
    for (start, matched) in text.match_indices(keyword) {
        if start > rest_start {
            segments.push((&text[rest_start..start], false));
        }
        segments.push((matched, true));
        rest_start = start + matched.len();
    }
    if rest_start < text.len() {
        segments.push((&text[rest_start..], false));
    }
    segments
}
