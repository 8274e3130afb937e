//! Apex Payouts Analytics - Interactive payout dashboard
//!
//! Loads the configured payout CSV and shows country/month aggregations
//! with sidebar year filtering. Also exposes a loopback HTML snapshot
//! endpoint for the gateway to probe and proxy.

use apex_payouts::{config, gui::PayoutsApp, server};
use eframe::egui;
use std::env;
use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> eframe::Result<()> {
    let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(log_level.parse().unwrap_or(Level::INFO.into())),
        )
        .init();

    server::spawn_background(config::csv_path());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 760.0])
            .with_min_inner_size([960.0, 600.0])
            .with_title("Apex Payouts Analytics"),
        ..Default::default()
    };

    eframe::run_native(
        "Apex Payouts Analytics",
        options,
        Box::new(|cc| Ok(Box::new(PayoutsApp::new(cc)))),
    )
}
