mod app;
mod chat;
mod color;
mod config;
mod data;
mod state;
mod ui;

use app::ExposureDashApp;
use chat::answer::{Answerer, UnavailableAnswerer};
use chat::client::ChatCompletionsClient;
use config::AppConfig;
use eframe::egui;
use state::AppState;

fn main() -> eframe::Result {
    env_logger::init();

    let config = AppConfig::load();

    let answerer: Box<dyn Answerer> = match ChatCompletionsClient::new(&config.answering) {
        Ok(client) => Box::new(client),
        Err(e) => {
            log::error!("Answering client unavailable: {e}");
            Box::new(UnavailableAnswerer::new(
                config.answering.service_name.clone(),
                e.to_string(),
            ))
        }
    };

    let data_path = config.data_path.clone();
    let mut state = AppState::new(config, answerer);
    if data_path.exists() {
        state.open_path(&data_path);
    } else {
        log::info!("{} not found; waiting for File → Open", data_path.display());
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 900.0])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Job Exposure Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(ExposureDashApp::new(state)))),
    )
}
