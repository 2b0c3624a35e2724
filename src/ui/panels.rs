use std::collections::BTreeSet;

use eframe::egui::{self, Color32, RichText, Ui};

use crate::state::AppState;

/// Label of the "no constraint" entry in both filter boxes.
const ALL: &str = "All";

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let dataset = match &state.dataset {
        Some(ds) => ds.clone(),
        None => {
            ui.label("No dataset loaded.");
            return;
        }
    };

    ui.strong("Select Major Group");
    if let Some(choice) = category_combo(
        ui,
        "major_group",
        state.filters.major_group.as_deref(),
        dataset.major_groups(),
    ) {
        state.set_major_group(choice);
    }

    ui.add_space(8.0);

    ui.strong("Select Exposure Level");
    if let Some(choice) = category_combo(
        ui,
        "exposure_level",
        state.filters.exposure_level.as_deref(),
        dataset.exposure_levels(),
    ) {
        state.set_exposure_level(choice);
    }

    ui.add_space(8.0);
    if ui.button("Reset filters").clicked() {
        state.reset_filters();
    }

    ui.separator();
    ui.label(format!(
        "{} of {} job titles shown",
        state.visible_indices.len(),
        dataset.len()
    ));
    if dataset.dropped_rows() > 0 {
        ui.weak(format!(
            "{} rows skipped (missing or non-numeric scores)",
            dataset.dropped_rows()
        ));
    }
}

/// "All" followed by the column's sorted distinct values. Returns the new
/// selection when the user picked a different entry.
fn category_combo(
    ui: &mut Ui,
    id: &str,
    current: Option<&str>,
    values: &BTreeSet<String>,
) -> Option<Option<String>> {
    let mut picked = None;
    egui::ComboBox::from_id_salt(id)
        .width(ui.available_width())
        .selected_text(current.unwrap_or(ALL))
        .show_ui(ui, |ui: &mut Ui| {
            if ui.selectable_label(current.is_none(), ALL).clicked() {
                picked = Some(None);
            }
            for value in values {
                if ui
                    .selectable_label(current == Some(value.as_str()), value.as_str())
                    .clicked()
                {
                    picked = Some(Some(value.clone()));
                }
            }
        });
    picked.filter(|p: &Option<String>| p.as_deref() != current)
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            let source = state
                .source_path
                .as_ref()
                .and_then(|p| p.file_name())
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            ui.label(format!(
                "{source}: {} job titles loaded, {} visible",
                ds.len(),
                state.visible_indices.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open job exposure data")
        .add_filter("Delimited text", &["csv", "tsv", "txt"])
        .pick_file();

    if let Some(path) = file {
        state.open_path(&path);
    }
}
