mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use app::BricsDashboardApp;
use eframe::egui;
use state::AppState;

fn main() -> eframe::Result {
    env_logger::init();

    // One load per session; filter changes only re-run the pipeline.
    let state = AppState::load();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Dashboard BRICS",
        options,
        Box::new(|_cc| Ok(Box::new(BricsDashboardApp::new(state)))),
    )
}
