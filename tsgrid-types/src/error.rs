use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::Frequency;

/// Unified error type for the tsgrid workspace.
///
/// The first four variants are the fatal per-file input conditions. Each one
/// names the file it came from so a batch caller can report it and move on to
/// the next file.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TsGridError {
    /// The uploaded bytes are not valid UTF-8 text.
    #[error("{file}: content is not valid UTF-8 (valid up to byte {valid_up_to})")]
    Decode {
        /// Logical name of the offending file.
        file: String,
        /// Length of the longest valid UTF-8 prefix.
        valid_up_to: usize,
    },

    /// The decoded text is not a well-formed delimited table.
    #[error("{file}: malformed table{}: {message}", at_line(.line))]
    Parse {
        /// Logical name of the offending file.
        file: String,
        /// 1-based input line, when the reader could attribute the failure.
        line: Option<u64>,
        /// Human-readable description from the reader.
        message: String,
    },

    /// A timestamp cell could not be interpreted as a date/time.
    #[error("{file}: unparseable timestamp {value:?} in column '{column}' at line {line}")]
    Timestamp {
        /// Logical name of the offending file.
        file: String,
        /// 1-based input line of the row.
        line: u64,
        /// Header label of the timestamp column.
        column: String,
        /// Raw cell text.
        value: String,
    },

    /// The table has a header but no data rows (or no content at all).
    #[error("{file}: no data rows after header")]
    EmptyData {
        /// Logical name of the offending file.
        file: String,
    },

    /// The configured grid cap would be exceeded.
    #[error("{file}: {frequency} grid of {points} points exceeds limit of {limit}")]
    GridTooLarge {
        /// Logical name of the offending file.
        file: String,
        /// Cadence of the grid that overflowed.
        frequency: Frequency,
        /// Number of grid points the input would produce.
        points: u64,
        /// Configured maximum.
        limit: usize,
    },

    /// Serializing a resampled table to delimited text failed.
    #[error("{file}: export failed: {message}")]
    Export {
        /// Logical name of the file being exported.
        file: String,
        /// Human-readable description from the writer.
        message: String,
    },

    /// Invalid input argument (configuration or batch composition).
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// A batch in which every file failed; contains the individual failures.
    #[error("all files failed: {0:?}")]
    AllFilesFailed(Vec<TsGridError>),
}

fn at_line(line: &Option<u64>) -> String {
    line.map(|l| format!(" at line {l}")).unwrap_or_default()
}

impl TsGridError {
    /// Helper: build a `Parse` error without line attribution.
    pub fn parse(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            file: file.into(),
            line: None,
            message: message.into(),
        }
    }

    /// Helper: build an `EmptyData` error for a file.
    pub fn empty_data(file: impl Into<String>) -> Self {
        Self::EmptyData { file: file.into() }
    }

    /// Name of the file the error is attributed to, if any.
    #[must_use]
    pub fn file(&self) -> Option<&str> {
        match self {
            Self::Decode { file, .. }
            | Self::Parse { file, .. }
            | Self::Timestamp { file, .. }
            | Self::EmptyData { file }
            | Self::GridTooLarge { file, .. }
            | Self::Export { file, .. } => Some(file),
            Self::InvalidArg(_) | Self::AllFilesFailed(_) => None,
        }
    }

    /// Returns true for the four fatal input conditions: decode, parse,
    /// timestamp, and empty data.
    #[must_use]
    pub const fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::Decode { .. } | Self::Parse { .. } | Self::Timestamp { .. } | Self::EmptyData { .. }
        )
    }

    /// Flatten nested `AllFilesFailed` structures into a plain vector.
    #[must_use]
    pub fn flatten(self) -> Vec<Self> {
        match self {
            Self::AllFilesFailed(list) => list.into_iter().flat_map(Self::flatten).collect(),
            other => vec![other],
        }
    }
}
