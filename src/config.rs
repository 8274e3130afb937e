//! Ports, environment lookups and default paths.

use std::env;
use std::path::PathBuf;

/// Loopback port the dashboard's snapshot endpoint listens on.
pub const DASHBOARD_PORT: u16 = 8501;

/// Default port for the gateway listener when `PORT` is unset.
pub const DEFAULT_GATEWAY_PORT: u16 = 8080;

/// Gateway listener port from the `PORT` environment variable.
pub fn gateway_port() -> u16 {
    env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_GATEWAY_PORT)
}

/// Source CSV path, overridable via `PAYOUTS_CSV`.
pub fn csv_path() -> PathBuf {
    env::var("PAYOUTS_CSV")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("payouts.csv"))
}

/// Dashboard binary the gateway spawns, overridable via `APEX_DASHBOARD_BIN`.
pub fn dashboard_bin() -> String {
    env::var("APEX_DASHBOARD_BIN").unwrap_or_else(|_| "apex-payouts".to_string())
}
