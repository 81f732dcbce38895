// LogViewer - ui/panels/file_details.rs
//
// File details window: every file and folder in the backend's search
// directory with size and access flags. Clicking a searchable file chooses it.

use crate::app::controller::{Action, QueryController};

/// Render the details window while `open` is true.
pub fn render(
    ctx: &egui::Context,
    controller: &QueryController,
    open: &mut bool,
    actions: &mut Vec<Action>,
) {
    if !*open {
        return;
    }

    let state = controller.state();
    let details = &state.file_details;

    egui::Window::new("File Details")
        .open(open)
        .collapsible(false)
        .resizable(true)
        .min_width(420.0)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                if state.details_loading {
                    ui.spinner();
                } else if ui.button("Reload").clicked() {
                    actions.push(Action::RefreshDetails);
                }
                ui.weak(format!("{} item(s)", details.len()));
            });
            ui.separator();

            if details.is_empty() && state.details_loading {
                ui.label("Loading\u{2026}");
                return;
            }
            if details.is_empty() {
                ui.label("Nothing listed yet.");
                return;
            }

            egui::ScrollArea::vertical()
                .id_salt("file_details_table")
                .max_height(360.0)
                .show(ui, |ui| {
                    egui::Grid::new("file_details_grid")
                        .num_columns(4)
                        .striped(true)
                        .spacing([12.0, 3.0])
                        .show(ui, |ui| {
                            ui.strong("Name");
                            ui.strong("Type");
                            ui.strong("Size");
                            ui.strong("Readable");
                            ui.end_row();

                            for detail in details {
                                let name = egui::RichText::new(&detail.name).monospace();
                                if detail.is_searchable() {
                                    if ui.link(name).on_hover_text("Search this file").clicked() {
                                        actions.push(Action::SetFilename(Some(detail.name.clone())));
                                    }
                                } else {
                                    ui.label(name.weak());
                                }
                                ui.label(detail.kind.label());
                                ui.label(detail.size.as_deref().unwrap_or("--"));
                                ui.label(match detail.read_access {
                                    Some(true) => "yes",
                                    Some(false) => "no",
                                    None => "--",
                                });
                                ui.end_row();
                            }
                        });
                });
        });
}
