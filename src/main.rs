mod app;
mod chart;
mod color;
mod config;
mod data;
mod error;
mod layout;
mod state;
mod ui;
mod wiring;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use eframe::egui;

use app::LaunchDashApp;
use config::DashboardConfig;

/// Interactive launch records dashboard.
#[derive(Debug, Parser)]
#[command(name = "launch-dash", version, about)]
struct Cli {
    /// Launch dataset (.csv, .json or .parquet). Overrides the config file.
    #[arg(env = "LAUNCH_DASH_DATASET")]
    dataset: Option<PathBuf>,

    /// JSON configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = DashboardConfig::resolve(cli.config.as_deref())?;
    if let Some(path) = cli.dataset {
        config.dataset_path = path;
    }

    // A dataset that cannot be loaded is fatal: there is nothing to show.
    let dataset = data::loader::load_file(&config.dataset_path)?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window.width, config.window.height])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    let title = config.title.clone();
    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| Ok(Box::new(LaunchDashApp::new(config, dataset)))),
    )
    .map_err(|e| anyhow::anyhow!("dashboard window failed: {e}"))
}
