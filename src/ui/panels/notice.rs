// LogViewer - ui/panels/notice.rs
//
// Modal notice dialog: the oldest pending notice, centred, with an OK button.

use crate::app::controller::{Action, QueryController};
use crate::ui::theme;

/// Render the current notice, if any.
pub fn render(ctx: &egui::Context, controller: &QueryController, actions: &mut Vec<Action>) {
    let Some(notice) = controller.state().current_notice() else {
        return;
    };

    let mut open = true;
    egui::Window::new(notice.title())
        .id(egui::Id::new("notice_dialog"))
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .min_width(320.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.add_space(4.0);
            ui.label(egui::RichText::new(notice.text()).color(theme::NOTICE_ERROR));
            ui.add_space(8.0);
            ui.vertical_centered(|ui| {
                let ok = ui.button("OK");
                if ok.clicked() || ui.input(|i| i.key_pressed(egui::Key::Escape)) {
                    actions.push(Action::DismissNotice);
                }
            });
        });

    if !open {
        actions.push(Action::DismissNotice);
    }
}
