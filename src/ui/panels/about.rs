// LogViewer - ui/panels/about.rs
//
// About dialog, rendered as a centred, non-resizable window.

use crate::util::constants;

/// Render the About dialog while `open` is true.
pub fn render(ctx: &egui::Context, open: &mut bool, base_url: &str) {
    if !*open {
        return;
    }

    egui::Window::new(format!("About {}", constants::APP_NAME))
        .open(open)
        .collapsible(false)
        .resizable(false)
        .min_width(340.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.add_space(8.0);
            ui.vertical_centered(|ui| {
                ui.label(egui::RichText::new(constants::APP_NAME).size(26.0).strong());
                ui.add_space(4.0);
                ui.label(
                    egui::RichText::new(format!("v{}", constants::APP_VERSION))
                        .size(14.0)
                        .weak(),
                );
            });

            ui.add_space(10.0);
            ui.separator();
            ui.add_space(6.0);

            ui.vertical_centered(|ui| {
                ui.label("Browse and search log files on a remote log server.");
                ui.add_space(4.0);
                ui.label(egui::RichText::new(format!("Server: {base_url}")).monospace());
            });

            ui.add_space(8.0);
            ui.separator();
            ui.vertical_centered(|ui| {
                ui.label(egui::RichText::new("Built with Rust & egui").small().weak());
            });
            ui.add_space(6.0);
        });
}
