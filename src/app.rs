use eframe::egui::{self, Ui};

use crate::state::AppState;
use crate::ui::{chat, panels, plot, table};

const INTERESTING_FACT: &str = "Surprisingly, Clerical Support Workers like Data Entry \
Clerks and Typists dominate the highest exposure levels (gradient 4), with average scores above \
0.6. This suggests that routine, low-variability tasks are most at risk of automation, even \
compared to some professional roles like Financial Analysts.";

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct ExposureDashApp {
    pub state: AppState,
}

impl ExposureDashApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for ExposureDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: charts and chat ----
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| dashboard(ui, &mut self.state));
        });
    }
}

fn dashboard(ui: &mut Ui, state: &mut AppState) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading("Job Exposure Analysis Dashboard");
        ui.label("Explore job titles by automation exposure and variability");
    });
    ui.add_space(12.0);

    if state.dataset.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a file to view job exposure data  (File → Open…)");
        });
        return;
    }

    ui.columns(2, |columns| {
        columns[0].strong(format!("Top {} Job Titles by Average Score", state.config.top_n));
        plot::top_chart(&mut columns[0], state);

        columns[1].strong("Exposure Level Distribution");
        plot::distribution_chart(&mut columns[1], state);
    });

    ui.add_space(12.0);
    ui.strong("Average Score vs Standard Deviation by Exposure Level");
    plot::scatter_chart(ui, state);

    ui.add_space(12.0);
    egui::CollapsingHeader::new("Filtered records")
        .default_open(false)
        .show(ui, |ui: &mut Ui| table::records_table(ui, state));

    ui.add_space(12.0);
    ui.strong("Interesting Fact");
    ui.label(INTERESTING_FACT);

    ui.add_space(12.0);
    chat::chat_panel(ui, state);
}
