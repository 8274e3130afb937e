//! Aggregation module - year filtering and grouped payout sums

pub mod aggregator;

pub use aggregator::{Aggregator, Summary};
