//! Sales Lens - CSV Sales Analysis & Chart Viewer
//!
//! Desktop entry point: logging, configuration, then the eframe window.

use anyhow::{anyhow, Context, Result};
use eframe::egui;
use sales_lens::config::AppConfig;
use sales_lens::data::DataLoader;
use sales_lens::gui::SalesApp;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,sales_lens=debug"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let config_path = AppConfig::resolve_path();
    let config = AppConfig::load_or_default(&config_path);
    info!(path = %config_path.display(), "startup");

    let loader = DataLoader::new(&config).context("failed to build HTTP client")?;

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 850.0])
            .with_min_inner_size([900.0, 600.0])
            .with_title("Sales Lens"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Sales Lens",
        options,
        Box::new(move |cc| Ok(Box::new(SalesApp::new(cc, loader, config, config_path)))),
    )
    .map_err(|e| anyhow!("window error: {}", e))
}
