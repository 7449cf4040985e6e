//! Breathe - guided box breathing
//!
//! Main entry point for the Breathe application.

use anyhow::Result;
use breathe::config::BreatheConfig;
use breathe::scenario::Scenario;
use breathe::ui::BreatheApp;
use eframe::egui;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "breathe=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Breathe");

    let config = BreatheConfig::load().unwrap_or_else(|e| {
        e.log();
        BreatheConfig::default()
    });

    let scenario = Scenario::from_env().unwrap_or_else(|e| {
        e.log();
        warn!("[SCENARIO] Running without a scenario");
        None
    });

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([520.0, 760.0])
            .with_min_inner_size([420.0, 640.0])
            .with_title("Respira"),
        ..Default::default()
    };

    eframe::run_native(
        "Breathe",
        options,
        Box::new(|cc| Ok(Box::new(BreatheApp::new(cc, config, scenario)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}
