//! Report envelopes produced by the normalizer.

use serde::{Deserialize, Serialize};

use crate::error::TsGridError;

/// Counters gathered while normalizing a single file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IngestStats {
    /// Data rows read after the header (blank lines excluded).
    pub rows_read: usize,
    /// Distinct timestamps kept after duplicate collapse.
    pub distinct_timestamps: usize,
    /// Rows discarded because an earlier row had the same timestamp.
    pub duplicates_dropped: usize,
    /// Length of the hourly grid.
    pub hourly_points: usize,
    /// Length of the daily grid.
    pub daily_points: usize,
    /// Hourly grid points with no contributing rows.
    pub empty_hourly_buckets: usize,
}

/// Summary of a batch run.
///
/// Successful outputs are kept in input order; every file that failed is
/// recorded in `warnings` and did not affect its siblings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport<T> {
    /// Outputs of the files that normalized successfully.
    pub outputs: Vec<T>,
    /// Per-file failures, each attributed to its file name.
    pub warnings: Vec<TsGridError>,
}

impl<T> Default for BatchReport<T> {
    fn default() -> Self {
        Self {
            outputs: Vec::new(),
            warnings: Vec::new(),
        }
    }
}

impl<T> BatchReport<T> {
    /// True when at least one file failed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Names of the files that failed, in processing order.
    pub fn failed_files(&self) -> impl Iterator<Item = &str> {
        self.warnings.iter().filter_map(TsGridError::file)
    }

    /// Convert into the successful outputs.
    ///
    /// # Errors
    /// Returns `TsGridError::AllFilesFailed` when no file succeeded but at
    /// least one failed.
    pub fn into_result(self) -> Result<Vec<T>, TsGridError> {
        if self.outputs.is_empty() && !self.warnings.is_empty() {
            return Err(TsGridError::AllFilesFailed(self.warnings));
        }
        Ok(self.outputs)
    }
}
