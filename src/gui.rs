// LogViewer - gui.rs
//
// Top-level eframe::App implementation.
// Polls backend results into the controller, renders the panels, and feeds
// the actions they produce back to the controller.

use crate::app::controller::{Action, QueryController};
use crate::ui;
use crate::util::constants;
use std::time::Duration;

/// The Log Viewer application.
pub struct LogViewerApp {
    controller: QueryController,
    dark_mode: bool,
    base_url: String,
    show_details: bool,
    show_about: bool,
}

impl LogViewerApp {
    /// Wrap a configured controller and start loading the file list.
    pub fn new(mut controller: QueryController, dark_mode: bool, base_url: String) -> Self {
        controller.refresh_file_list();
        Self {
            controller,
            dark_mode,
            base_url,
            show_details: false,
            show_about: false,
        }
    }
}

impl eframe::App for LogViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.controller.poll() > 0 {
            ctx.request_repaint();
        }
        // Keep repainting while a request is out so its result shows promptly.
        if self.controller.is_busy() {
            ctx.request_repaint_after(Duration::from_millis(constants::LOADING_REPAINT_MS));
        }

        let focus_keyword = self.controller.take_focus_request();
        let mut actions: Vec<Action> = Vec::new();

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Reload File List").clicked() {
                        actions.push(Action::RefreshFiles);
                        ui.close_menu();
                    }
                    let has_results = !self.controller.state().log_data.is_empty();
                    ui.add_enabled_ui(has_results, |ui| {
                        if ui.button("Save Results\u{2026}").clicked() {
                            if let Some(dest) = rfd::FileDialog::new()
                                .add_filter("Text", &["txt", "log"])
                                .add_filter("CSV", &["csv"])
                                .add_filter("JSON", &["json"])
                                .set_file_name("results.txt")
                                .save_file()
                            {
                                actions.push(Action::ExportResults(dest));
                            }
                            ui.close_menu();
                        }
                    });
                    ui.separator();
                    if ui.button("Exit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
                ui.menu_button("View", |ui| {
                    if ui.button("File Details").clicked() {
                        self.show_details = true;
                        actions.push(Action::RefreshDetails);
                        ui.close_menu();
                    }
                    let has_results = !self.controller.state().log_data.is_empty();
                    ui.add_enabled_ui(has_results, |ui| {
                        let n = self.controller.state().log_data.len();
                        if ui.button(format!("Copy Results ({n} lines)")).clicked() {
                            let text: String = self
                                .controller
                                .state()
                                .log_data
                                .iter()
                                .map(|l| format!("{}\n", l.display_text()))
                                .collect();
                            ctx.copy_text(text);
                            ui.close_menu();
                        }
                    });
                });
                ui.menu_button("Help", |ui| {
                    if ui.button("About").clicked() {
                        self.show_about = true;
                        ui.close_menu();
                    }
                });
            });
        });

        // Status bar
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let state = self.controller.state();
                ui.label(&state.status_message);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.weak(&self.base_url);
                    if let Some(ref last) = state.last_search {
                        ui.separator();
                        ui.label(format!(
                            "{} lines \u{00b7} {}",
                            last.lines,
                            last.finished_at.format("%H:%M:%S")
                        ));
                    }
                });
            });
        });

        // Left sidebar: source selector and search form.
        egui::SidePanel::left("sidebar")
            .default_width(ui::theme::SIDEBAR_WIDTH)
            .resizable(true)
            .show(ctx, |ui| {
                ui.add_space(6.0);
                ui.heading("Search");
                ui.separator();
                ui::panels::sources::render(ui, &self.controller, &mut actions);
                ui.add_space(8.0);
                ui::panels::search_form::render(ui, &self.controller, focus_keyword, &mut actions);
            });

        // Central panel (results)
        egui::CentralPanel::default().show(ctx, |ui| {
            ui::panels::results::render(ui, &self.controller, self.dark_mode);
        });

        // Dialogs
        ui::panels::file_details::render(ctx, &self.controller, &mut self.show_details, &mut actions);
        ui::panels::about::render(ctx, &mut self.show_about, &self.base_url);
        ui::panels::notice::render(ctx, &self.controller, &mut actions);

        for action in actions {
            self.controller.dispatch(action);
        }
    }
}
