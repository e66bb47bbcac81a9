//! tsgrid-core
//!
//! Table model and pure pipeline stages shared by the tsgrid normalizer.
//!
//! - `types`: raw, time-indexed, and resampled tables.
//! - `ingest`: UTF-8 decoding and delimited-table reading.
//! - `timeseries`: timestamp recognition, duplicate collapse, bucket
//!   averaging, and grid reindexing.
//! - `export`: delimited-text rendering of resampled tables.
//!
//! Every stage is a plain function of its inputs: there is no global state
//! and nothing here touches the filesystem or network.
#![warn(missing_docs)]

/// Delimited-text rendering of resampled tables.
pub mod export;
/// UTF-8 decoding and delimited-table reading.
pub mod ingest;
mod pretty;
/// Time-series utilities for keying, resampling, and gap-filling.
pub mod timeseries;
pub mod types;

pub use export::{format_value, to_csv};
pub use ingest::{decode, read_table};
pub use timeseries::grid::{grid_len, reindex_to_grid};
pub use timeseries::index::{Indexed, index_by_time, parse_value};
pub use timeseries::parse::TimestampParser;
pub use timeseries::resample::{bucket_start, resample_mean, resample_to_daily, resample_to_hourly};
pub use types::*;
