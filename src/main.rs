mod app;
mod color;
mod config;
mod cosmology;
mod data;
mod figure;
mod pipeline;
mod render;
mod state;
mod ui;
mod units;

use anyhow::Result;
use app::DistancesApp;
use config::RunConfig;
use eframe::egui;
use state::AppState;

fn main() -> Result<()> {
    env_logger::init();

    let config = RunConfig::default();
    let tables = pipeline::run(&config)?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Distances in Cosmology",
        options,
        Box::new(|_cc| Ok(Box::new(DistancesApp::new(AppState::new(config, tables))))),
    )
    .map_err(|e| anyhow::anyhow!("display window failed: {e}"))
}
