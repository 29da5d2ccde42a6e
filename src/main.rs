mod app;
mod state;
mod ui;

use anyhow::{anyhow, Context, Result};
use app::RustyFalloutApp;
use eframe::egui;
use rusty_fallout::config::Settings;
use rusty_fallout::data;

fn main() -> Result<()> {
    env_logger::init();

    let mut settings = Settings::from_env()?;
    let path = match settings.dataset_path.take() {
        Some(path) => path,
        None => ui::panels::pick_dataset_file().context("no dataset file selected")?,
    };

    // No fallback data source: a dataset that will not load ends the program.
    let dataset = data::load_file(&path)
        .with_context(|| format!("loading dataset {}", path.display()))?;
    settings.dataset_path = Some(path);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 820.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Rusty Fallout – Nuclear Explosions Explorer",
        options,
        Box::new(move |_cc| Ok(Box::new(RustyFalloutApp::new(dataset, settings)))),
    )
    .map_err(|e| anyhow!("running UI: {e}"))
}
