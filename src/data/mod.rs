//! Data module - CSV loading, field parsing and the normalized table

pub mod loader;
pub mod parse;
pub mod record;
pub mod store;

pub use loader::{load, LoaderError};
pub use record::PayoutRecord;
pub use store::DataStore;
