//! Snapshot Server
//! Serves a read-only HTML snapshot of the dashboard on a loopback port
//! so the gateway process has something to probe and proxy. Uses the
//! same cached loader and aggregation views as the GUI.

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::thread;

use tracing::{error, info};
use warp::http::StatusCode;
use warp::Filter;

use crate::agg::Aggregator;
use crate::config;
use crate::data::{DataStore, LoaderError, PayoutRecord};

/// Start the snapshot server on a background thread with its own
/// runtime, leaving the main thread to the GUI event loop.
pub fn spawn_background(csv_path: PathBuf) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(rt) => rt,
            Err(e) => {
                error!("failed to start snapshot server runtime: {}", e);
                return;
            }
        };
        runtime.block_on(serve(csv_path, config::DASHBOARD_PORT));
    });
}

/// Serve `GET /` and `GET /health` until the process exits.
pub async fn serve(csv_path: PathBuf, port: u16) {
    let store = Arc::new(Mutex::new(DataStore::new()));

    let health = warp::path("health")
        .and(warp::get())
        .map(|| warp::reply::json(&serde_json::json!({ "status": "ok" })));

    let snapshot = warp::path::end()
        .and(warp::get())
        .and(warp::query::<HashMap<String, String>>())
        .map(move |query: HashMap<String, String>| {
            let years = query
                .get("years")
                .map(|raw| parse_years_param(raw))
                .unwrap_or_default();
            snapshot_reply(&store, &csv_path, &years)
        });

    let routes = health.or(snapshot);

    info!("snapshot server listening on 127.0.0.1:{}", port);
    warp::serve(routes).run(([127, 0, 0, 1], port)).await;
}

/// Parse a `?years=2023,2024` value. Malformed entries are skipped; an
/// empty result means no filtering, matching the sidebar policy.
pub fn parse_years_param(raw: &str) -> HashSet<i32> {
    raw.split(',')
        .filter_map(|part| part.trim().parse::<i32>().ok())
        .collect()
}

fn snapshot_reply(
    store: &Arc<Mutex<DataStore>>,
    csv_path: &PathBuf,
    years: &HashSet<i32>,
) -> warp::reply::WithStatus<warp::reply::Html<String>> {
    let loaded = {
        // A poisoned lock only means a previous request panicked; the
        // cache itself is still usable.
        let mut store = store.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        store.load(csv_path)
    };

    match loaded {
        Ok(records) => {
            let html = render_snapshot(&records, years);
            warp::reply::with_status(warp::reply::html(html), StatusCode::OK)
        }
        Err(e @ LoaderError::SourceNotFound(_)) => {
            warp::reply::with_status(warp::reply::html(render_error(&e)), StatusCode::NOT_FOUND)
        }
        Err(e) => {
            error!("snapshot load failed: {}", e);
            warp::reply::with_status(
                warp::reply::html(render_error(&e)),
                StatusCode::INTERNAL_SERVER_ERROR,
            )
        }
    }
}

/// Render the metrics and both aggregation tables as a static page.
pub fn render_snapshot(records: &[PayoutRecord], years: &HashSet<i32>) -> String {
    let filtered = Aggregator::filter_by_years(records, years);
    let summary = Aggregator::summary(&filtered);
    let by_country = Aggregator::sum_by_country(&filtered);
    let by_month = Aggregator::sum_by_month(&filtered);

    let mut page = String::from(
        "<!DOCTYPE html><html><head><title>Apex Payouts Analytics</title></head><body>\n\
         <h1>Apex Payouts Analytics</h1>\n",
    );
    page.push_str(&format!(
        "<p>Total Payout: <b>${:.0}</b> &middot; Total Records: <b>{}</b></p>\n",
        summary.total_payout, summary.total_records
    ));
    page.push_str(&agg_table("Payout by Country", "Country", &by_country));
    page.push_str(&agg_table("Payout by Month", "YearMonth", &by_month));
    page.push_str("</body></html>\n");
    page
}

fn render_error(error: &LoaderError) -> String {
    format!(
        "<!DOCTYPE html><html><head><title>Apex Payouts Analytics</title></head><body>\n\
         <h1>Apex Payouts Analytics</h1><p>Error: {}</p></body></html>\n",
        html_escape(&error.to_string())
    )
}

fn agg_table(title: &str, key_header: &str, rows: &[(String, f64)]) -> String {
    let mut out = format!(
        "<h2>{}</h2>\n<table border=\"1\"><tr><th>{}</th><th>PayoutValue</th></tr>\n",
        title, key_header
    );
    for (key, sum) in rows {
        out.push_str(&format!(
            "<tr><td>{}</td><td>{:.2}</td></tr>\n",
            html_escape(key),
            sum
        ));
    }
    out.push_str("</table>\n");
    out
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}
