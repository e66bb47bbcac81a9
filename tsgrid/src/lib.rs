//! tsgrid turns timestamped CSV uploads into gap-filled hourly and daily
//! averages.
//!
//! Overview
//! - Column 0 is always the timestamp column, whatever its header says; every
//!   other column is a numeric channel.
//! - Rows sharing a timestamp collapse to the first one seen.
//! - Channels are averaged into hourly and daily buckets (truncated to the
//!   start of the hour/day), ignoring missing values.
//! - Both results are reindexed onto a complete grid from the first to the
//!   last bucket; absent points become rows of missing values, rendered as
//!   empty CSV fields.
//! - Any of the four input failures (undecodable bytes, malformed table,
//!   unparseable timestamp, no data rows) aborts the whole file. Batches keep
//!   going with the next file.
//!
//! Examples
//! Normalizing a single upload:
//! ```
//! use tsgrid::TimeSeriesNormalizer;
//!
//! let csv = "Time,Temp\n2024-01-01 00:15,10\n2024-01-01 00:45,20\n2024-01-01 01:10,30\n";
//! let out = TimeSeriesNormalizer::new().normalize(csv.as_bytes(), "temps.csv")?;
//!
//! assert_eq!(out.hourly.file_name, "temps.csv_Hourly_Averages.csv");
//! assert_eq!(
//!     out.hourly.csv,
//!     "Time,Temp\n2024-01-01 00:00:00,15.0\n2024-01-01 01:00:00,30.0\n"
//! );
//! assert_eq!(out.daily.csv, "Time,Temp\n2024-01-01,20.0\n");
//! # Ok::<(), tsgrid::TsGridError>(())
//! ```
//!
//! Processing a batch where one file is bad:
//! ```
//! use tsgrid::{TimeSeriesNormalizer, TsGridError};
//!
//! let normalizer = TimeSeriesNormalizer::builder().preview_rows(5).build()?;
//! let report = normalizer
//!     .batch()
//!     .file("good.csv", "Time,v\n2024-01-01 00:00,1\n")?
//!     .file("bad.csv", "Time,v\n")?
//!     .run()?;
//!
//! assert_eq!(report.outputs.len(), 1);
//! assert_eq!(report.failed_files().collect::<Vec<_>>(), vec!["bad.csv"]);
//! assert!(matches!(report.warnings[0], TsGridError::EmptyData { .. }));
//! # Ok::<(), TsGridError>(())
//! ```
#![warn(missing_docs)]

mod batch;
pub(crate) mod core;
mod output;

pub use batch::BatchBuilder;
pub use core::{TimeSeriesNormalizer, TimeSeriesNormalizerBuilder};
pub use output::{Normalized, Preview, ResampledOutput};

// Re-export shared types for convenience
pub use tsgrid_core::{RawTable, ResampledTable, Sample, TimeIndexedTable};
pub use tsgrid_types::{
    ArtifactNaming, BatchReport, Frequency, IngestStats, NormalizeConfig, TsGridError,
};
