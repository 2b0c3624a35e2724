use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::state::AppState;

/// Rows of the filtered view as a plain table.
pub fn records_table(ui: &mut Ui, state: &AppState) {
    let Some(dataset) = &state.dataset else {
        return;
    };
    let records = dataset.records();
    let rows = &state.visible_indices;

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .max_scroll_height(300.0)
        .column(Column::initial(260.0).at_least(80.0))
        .column(Column::initial(220.0).at_least(80.0))
        .column(Column::initial(260.0).at_least(80.0))
        .column(Column::auto())
        .column(Column::remainder())
        .header(20.0, |mut header| {
            for title in [
                "Job title",
                "Major group",
                "Exposure level",
                "Average score",
                "Std. deviation",
            ] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, rows.len(), |mut row| {
                let r = &records[rows[row.index()]];
                row.col(|ui| {
                    ui.label(r.job_title.as_str());
                });
                row.col(|ui| {
                    ui.label(r.major_group.as_str());
                });
                row.col(|ui| {
                    ui.label(r.mean_exposure_level.as_str());
                });
                row.col(|ui| {
                    ui.label(format!("{:.3}", r.average_score));
                });
                row.col(|ui| {
                    ui.label(format!("{:.3}", r.standard_deviation));
                });
            });
        });
}
