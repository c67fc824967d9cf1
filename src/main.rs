mod app;
mod chart;
mod color;
mod data;
mod state;
mod ui;

use std::path::PathBuf;

use anyhow::anyhow;
use app::LaunchDashApp;
use eframe::egui;

/// Used when no path is given on the command line.
const DEFAULT_DATASET: &str = "spacex_launch_dash.csv";

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATASET));

    // The dashboard cannot start without its data.
    let dataset = match data::loader::load_dataset(&path) {
        Ok(ds) => ds,
        Err(e) => {
            log::error!("Failed to load dataset: {e:#}");
            return Err(e);
        }
    };
    log::info!(
        "Loaded {} launches from {} ({} sites, {} booster categories)",
        dataset.len(),
        path.display(),
        dataset.sites().len(),
        dataset.booster_categories().len()
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 900.0])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "SpaceX Launch Records Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(LaunchDashApp::new(dataset)))),
    )
    .map_err(|e| anyhow!("running the dashboard window: {e}"))
}
