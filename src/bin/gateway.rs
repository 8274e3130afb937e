//! Gateway binary
//! Launches the dashboard as a child process, waits for its snapshot
//! endpoint to come up, then proxies `GET /` to it. While the dashboard
//! is unavailable the client gets a static page that retries on its own.

use anyhow::Result;
use serde::Serialize;
use std::env;
use std::time::Duration;
use tokio::process::Command;
use tracing::{info, warn, Level};
use tracing_subscriber::{fmt, EnvFilter};
use warp::Filter;

use apex_payouts::config;

/// Readiness poll schedule: exponential backoff from `BACKOFF_BASE`,
/// capped at `BACKOFF_CAP`, for at most `READINESS_ATTEMPTS` probes.
const READINESS_ATTEMPTS: u32 = 8;
const BACKOFF_BASE: Duration = Duration::from_millis(250);
const BACKOFF_CAP: Duration = Duration::from_secs(4);

/// Per-request timeout when proxying to the dashboard.
const PROXY_TIMEOUT: Duration = Duration::from_secs(5);

/// Shown when the dashboard is not reachable; reloads itself client-side.
const FALLBACK_PAGE: &str = r#"<html>
<head><title>Apex Payouts Analytics</title></head>
<body>
    <h1>Apex Payouts Analytics</h1>
    <p>Starting dashboard...</p>
    <p>If this page doesn't load, please check the logs.</p>
    <script>
        setTimeout(() => location.reload(), 3000);
    </script>
</body>
</html>
"#;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

/// Delay before the given retry attempt.
fn backoff_delay(attempt: u32) -> Duration {
    BACKOFF_BASE
        .checked_mul(2u32.saturating_pow(attempt))
        .map(|d| d.min(BACKOFF_CAP))
        .unwrap_or(BACKOFF_CAP)
}

fn dashboard_url() -> String {
    format!("http://127.0.0.1:{}/", config::DASHBOARD_PORT)
}

/// Poll the dashboard health endpoint until it answers or the attempt
/// budget runs out. Not being ready yet is not fatal; the fallback page
/// covers the gap.
async fn wait_until_ready(client: &reqwest::Client) -> bool {
    let url = format!("http://127.0.0.1:{}/health", config::DASHBOARD_PORT);
    for attempt in 0..READINESS_ATTEMPTS {
        match client.get(&url).send().await {
            Ok(resp) if resp.status().is_success() => {
                info!("dashboard ready after {} probe(s)", attempt + 1);
                return true;
            }
            Ok(resp) => warn!("dashboard health returned {}", resp.status()),
            Err(_) => {}
        }
        tokio::time::sleep(backoff_delay(attempt)).await;
    }
    warn!("dashboard not ready after {} probes", READINESS_ATTEMPTS);
    false
}

/// Proxy `GET /`. Connection failures and timeouts degrade to the
/// fallback page, never to a hard error for the caller.
async fn proxy_home(client: reqwest::Client) -> Result<impl warp::Reply, warp::Rejection> {
    match client.get(dashboard_url()).send().await {
        Ok(resp) => match resp.text().await {
            Ok(body) => Ok(warp::reply::html(body)),
            Err(e) => {
                warn!("dashboard response unreadable: {}", e);
                Ok(warp::reply::html(FALLBACK_PAGE.to_string()))
            }
        },
        Err(e) => {
            warn!("dashboard unreachable: {}", e);
            Ok(warp::reply::html(FALLBACK_PAGE.to_string()))
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(log_level.parse().unwrap_or(Level::INFO.into())),
        )
        .init();

    // Start the dashboard child. A failed spawn is logged, not fatal:
    // the fallback page keeps the outer surface alive either way.
    let bin = config::dashboard_bin();
    let child = Command::new(&bin).spawn();
    let _child = match child {
        Ok(child) => {
            info!("spawned dashboard process: {}", bin);
            Some(child)
        }
        Err(e) => {
            warn!("failed to spawn dashboard '{}': {}", bin, e);
            None
        }
    };

    let client = reqwest::Client::builder().timeout(PROXY_TIMEOUT).build()?;
    wait_until_ready(&client).await;

    let proxy_client = client.clone();
    let home = warp::path::end()
        .and(warp::get())
        .and(warp::any().map(move || proxy_client.clone()))
        .and_then(proxy_home);

    let health = warp::path("health")
        .and(warp::get())
        .map(|| warp::reply::json(&HealthResponse { status: "ok" }));

    let routes = home.or(health);

    let port = config::gateway_port();
    info!("gateway listening on port {}", port);
    warp::serve(routes).run(([0, 0, 0, 0], port)).await;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_doubles_then_caps() {
        assert_eq!(backoff_delay(0), Duration::from_millis(250));
        assert_eq!(backoff_delay(1), Duration::from_millis(500));
        assert_eq!(backoff_delay(2), Duration::from_secs(1));
        assert_eq!(backoff_delay(4), BACKOFF_CAP);
        assert_eq!(backoff_delay(30), BACKOFF_CAP);
    }

    #[test]
    fn test_fallback_page_self_reloads() {
        assert!(FALLBACK_PAGE.contains("location.reload()"));
    }
}
