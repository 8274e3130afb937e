//! Apex Payouts Analytics
//!
//! Loads a CSV of payout records, normalizes dates/currency/locations and
//! serves the result as an interactive dashboard with country and month
//! aggregations. A separate `gateway` binary supervises the dashboard
//! process and proxies HTTP to it.

pub mod agg;
pub mod charts;
pub mod config;
pub mod data;
pub mod gui;
pub mod server;
