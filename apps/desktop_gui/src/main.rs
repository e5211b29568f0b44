mod config;
mod controller;
mod ui;

use clap::Parser;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::config::{load_settings, AppPaths, Args, Settings};
use crate::ui::StepEditorApp;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let (mut settings, settings_error) = match load_settings(&args.config) {
        Ok(settings) => (settings, None),
        Err(err) => (Settings::default(), Some(err)),
    };
    settings.apply_args(&args);

    let filter = EnvFilter::try_new(&settings.log_filter).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    if let Some(err) = settings_error {
        tracing::warn!("ignoring settings file: {err:#}");
    }

    let paths = AppPaths::from_settings(&settings)?;
    tracing::info!(
        data_root = %paths.data_root.display(),
        path = %paths.sequence_path.display(),
        "opening step sequence"
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Step Editor")
            .with_inner_size([560.0, 480.0])
            .with_min_inner_size([420.0, 240.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Step Editor",
        options,
        Box::new(move |_cc| Ok(Box::new(StepEditorApp::new(paths)))),
    )
    .map_err(|err| anyhow::anyhow!("step editor window failed: {err}"))?;

    Ok(())
}
