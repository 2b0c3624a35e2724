use eframe::egui::{self, Key, RichText, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Question box and transcript
// ---------------------------------------------------------------------------

/// Render the question box and the history, newest turn first.
pub fn chat_panel(ui: &mut Ui, state: &mut AppState) {
    let service = state.service_name().to_string();
    ui.heading(format!("Ask {service} About the Data"));

    ui.horizontal(|ui: &mut Ui| {
        let response = ui.add(
            egui::TextEdit::singleline(&mut state.query_input)
                .hint_text("Enter your question about the job exposure data")
                .desired_width(ui.available_width() - 60.0),
        );
        let entered = response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter));
        if ui.button("Ask").clicked() || entered {
            // Blocks until the service answers or fails.
            state.submit_query();
        }
    });

    if state.session.is_empty() {
        return;
    }

    ui.add_space(8.0);
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.weak(format!("{} questions asked", state.session.len()));
        for turn in state.session.recent_first() {
            ui.push_id(turn.id(), |ui: &mut Ui| {
                ui.label(RichText::new("You:").strong());
                ui.label(turn.query());
                ui.label(RichText::new(format!("{service}:")).strong());
                ui.label(turn.answer());
            });
            ui.separator();
        }
    });
}
