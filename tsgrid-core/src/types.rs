//! Table types flowing through the normalization pipeline.
//!
//! `RawTable` -> `TimeIndexedTable` -> `ResampledTable`. All three are built
//! fresh for each file and hold no references to their inputs.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub use tsgrid_types::{
    ArtifactNaming, BatchReport, Frequency, IngestStats, NormalizeConfig, TsGridError,
};

/// One data row of a delimited table, before any typing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    /// 1-based input line the record started on.
    pub line: u64,
    /// Cell text, one entry per header column (short rows are padded with "").
    pub cells: Vec<String>,
}

/// Untyped delimited text: a header row plus data rows.
///
/// Column 0 is the timestamp column whatever its label; every other column is
/// a measurement channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTable {
    /// Header labels as read, including the timestamp column.
    pub headers: Vec<String>,
    /// Data rows in input order.
    pub rows: Vec<RawRow>,
}

impl RawTable {
    /// Label of the timestamp column (column 0).
    #[must_use]
    pub fn time_column(&self) -> &str {
        self.headers.first().map_or("", String::as_str)
    }

    /// Channel labels (columns 1..), with repeated labels made unique as
    /// `name.1`, `name.2`, ...
    #[must_use]
    pub fn channel_names(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::with_capacity(self.headers.len().saturating_sub(1));
        for label in self.headers.iter().skip(1) {
            let mut candidate = label.clone();
            let mut n = 1usize;
            while out.contains(&candidate) {
                candidate = format!("{label}.{n}");
                n += 1;
            }
            out.push(candidate);
        }
        out
    }
}

/// A single timestamped row of channel values. `None` marks a missing value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Row key.
    pub ts: NaiveDateTime,
    /// One entry per channel, in channel order.
    pub values: Vec<Option<f64>>,
}

impl Sample {
    /// A row where every channel is missing.
    #[must_use]
    pub fn missing(ts: NaiveDateTime, channels: usize) -> Self {
        Self {
            ts,
            values: vec![None; channels],
        }
    }

    /// True when no channel has a value.
    #[must_use]
    pub fn is_all_missing(&self) -> bool {
        self.values.iter().all(Option::is_none)
    }
}

/// Rows keyed by a parsed timestamp.
///
/// Invariant: keys are strictly increasing (unique and sorted).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeIndexedTable {
    /// Label of the source timestamp column.
    pub time_column: String,
    /// Channel labels.
    pub channels: Vec<String>,
    /// Rows in ascending key order.
    pub rows: Vec<Sample>,
}

impl TimeIndexedTable {
    /// First and last key, or `None` for an empty table.
    #[must_use]
    pub fn range(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        Some((self.rows.first()?.ts, self.rows.last()?.ts))
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when there are no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A table re-keyed onto a complete, evenly spaced grid.
///
/// Invariant: `rows[k].ts == rows[0].ts + k * frequency.step_seconds()`, and
/// every row present in the grid is kept even when all its values are missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResampledTable {
    /// Grid cadence.
    pub frequency: Frequency,
    /// Channel labels.
    pub channels: Vec<String>,
    /// One row per grid point.
    pub rows: Vec<Sample>,
}

impl ResampledTable {
    /// Number of grid points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True for an empty grid.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// First grid point.
    #[must_use]
    pub fn start(&self) -> Option<NaiveDateTime> {
        self.rows.first().map(|r| r.ts)
    }

    /// Last grid point.
    #[must_use]
    pub fn end(&self) -> Option<NaiveDateTime> {
        self.rows.last().map(|r| r.ts)
    }

    /// The first `n` rows.
    #[must_use]
    pub fn head(&self, n: usize) -> &[Sample] {
        &self.rows[..n.min(self.rows.len())]
    }

    /// Grid timestamps in order.
    pub fn timestamps(&self) -> impl Iterator<Item = NaiveDateTime> + '_ {
        self.rows.iter().map(|r| r.ts)
    }

    /// Values of one channel down the grid, by label.
    #[must_use]
    pub fn column(&self, channel: &str) -> Option<Vec<Option<f64>>> {
        let idx = self.channels.iter().position(|c| c == channel)?;
        Some(self.rows.iter().map(|r| r.values[idx]).collect())
    }

    /// Grid points with no contributing source rows.
    #[must_use]
    pub fn empty_buckets(&self) -> usize {
        self.rows.iter().filter(|r| r.is_all_missing()).count()
    }
}
