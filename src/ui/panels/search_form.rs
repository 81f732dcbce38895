// LogViewer - ui/panels/search_form.rs
//
// File picker, keyword and count inputs, and the Search button.
// Edits are made on per-frame copies and reported back as actions; the
// payload itself is only changed by the controller.

use crate::app::controller::{Action, QueryController};
use crate::util::constants;

/// Render the search form. `focus_keyword` moves keyboard focus to the
/// keyword field for this frame.
pub fn render(
    ui: &mut egui::Ui,
    controller: &QueryController,
    focus_keyword: bool,
    actions: &mut Vec<Action>,
) {
    let payload = controller.payload();
    let state = controller.state();

    // -- File --
    ui.horizontal(|ui| {
        ui.label("File:");
        if state.files_loading {
            ui.spinner();
        } else if ui
            .small_button("\u{21bb}")
            .on_hover_text("Reload the file list")
            .clicked()
        {
            actions.push(Action::RefreshFiles);
        }
    });

    let mut selected = payload.filename.clone();
    let selected_text = selected.as_deref().unwrap_or("Choose a file\u{2026}");
    egui::ComboBox::from_id_salt("file_picker")
        .selected_text(selected_text)
        .width(ui.available_width())
        .show_ui(ui, |ui| {
            if state.file_list.is_empty() {
                ui.weak("No files available");
            }
            for file in &state.file_list {
                ui.selectable_value(&mut selected, Some(file.clone()), file);
            }
        });
    if selected != payload.filename {
        actions.push(Action::SetFilename(selected));
    }

    ui.add_space(6.0);

    // -- Keyword --
    ui.label("Keyword:");
    let mut keyword = payload.keyword.clone();
    let keyword_response = ui.add(
        egui::TextEdit::singleline(&mut keyword)
            .hint_text("all lines")
            .desired_width(f32::INFINITY),
    );
    if focus_keyword {
        keyword_response.request_focus();
    }
    if keyword_response.changed() {
        actions.push(Action::SetKeyword(keyword));
    }
    let submitted_with_enter =
        keyword_response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

    ui.add_space(6.0);

    // -- Count --
    ui.horizontal(|ui| {
        ui.label("Latest");
        let mut count = payload.count;
        let response = ui
            .add(egui::DragValue::new(&mut count).range(0..=constants::MAX_COUNT))
            .on_hover_text("0 returns every matching line");
        if response.changed() {
            actions.push(Action::SetCount(count));
        }
        ui.label("lines");
    });

    ui.add_space(10.0);

    ui.horizontal(|ui| {
        let clicked = ui
            .add_sized([90.0, 24.0], egui::Button::new("Search"))
            .clicked();
        if clicked || submitted_with_enter {
            actions.push(Action::Search);
        }
        if state.is_loading {
            ui.spinner();
            ui.weak("Loading\u{2026}");
        }
    });
}
