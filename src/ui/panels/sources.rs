// LogViewer - ui/panels/sources.rs
//
// Row of source buttons (v1, v2, v3...). The active one is highlighted;
// clicking another selects it and moves focus to the keyword field.

use crate::app::controller::{Action, QueryController};
use crate::core::model::SourceTag;
use crate::ui::theme;

/// Render the source selector.
pub fn render(ui: &mut egui::Ui, controller: &QueryController, actions: &mut Vec<Action>) {
    ui.label("Log version:");
    ui.horizontal_wrapped(|ui| {
        let active = controller.source();
        let mut tags = SourceTag::known();
        // A configured or CLI-supplied tag outside the known set still gets a button.
        if !tags.contains(active) {
            tags.push(active.clone());
        }
        for tag in tags {
            let is_active = &tag == active;
            let text = if is_active {
                egui::RichText::new(tag.as_str())
                    .strong()
                    .color(theme::ACTIVE_SOURCE)
            } else {
                egui::RichText::new(tag.as_str())
            };
            if ui.selectable_label(is_active, text).clicked() {
                actions.push(Action::SelectSource(tag));
            }
        }
    });
}
