//! Error, configuration, and report types shared across the tsgrid workspace.
#![warn(missing_docs)]

mod config;
mod error;
mod reports;

pub use config::{ArtifactNaming, Frequency, NormalizeConfig};
pub use error::TsGridError;
pub use reports::{BatchReport, IngestStats};
