//! FinSafe Fraud Detector - Main Entry Point
//!
//! Launches the transaction form; artifacts load lazily on the first check.

use anyhow::Result;
use eframe::egui;
use finsafe::app::DetectorApp;
use finsafe::config::{AppConfig, LoggingConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Using default configuration: {err:#}");
            AppConfig::default()
        }
    };

    init_logging(&config.logging);

    info!("Starting FinSafe fraud detector");
    info!(
        model = %config.artifacts.model_path.display(),
        encoders = %config.artifacts.encoders_path.display(),
        "Artifact paths configured"
    );

    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([980.0, 760.0])
        .with_min_inner_size([640.0, 480.0]);
    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "FinSafe Fraud Detector",
        native_options,
        Box::new(move |_cc| Ok(Box::new(DetectorApp::new(config)))),
    )
    .map_err(|err| anyhow::anyhow!("Failed to run UI: {err}"))?;

    Ok(())
}

fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("finsafe={}", config.level)));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
