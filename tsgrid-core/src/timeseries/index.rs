use std::collections::{BTreeMap, btree_map::Entry};

use chrono::NaiveDateTime;

use super::parse::TimestampParser;
use crate::types::{RawTable, Sample, TimeIndexedTable, TsGridError};

/// Result of keying a raw table by timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct Indexed {
    /// Unique, ascending rows.
    pub table: TimeIndexedTable,
    /// Rows dropped because an earlier row carried the same timestamp.
    pub duplicates_dropped: usize,
}

/// Parse a measurement cell. Empty, non-numeric, and `NaN` cells are missing.
#[must_use]
pub fn parse_value(cell: &str) -> Option<f64> {
    let s = cell.trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<f64>().ok().filter(|v| !v.is_nan())
}

/// Key every row of `raw` by its parsed column-0 timestamp.
///
/// - The first row seen for a timestamp wins; later duplicates are dropped.
/// - Rows are returned sorted by timestamp.
/// - Channel cells that do not parse as numbers become missing.
///
/// # Errors
/// Returns `TsGridError::Timestamp` for the first row whose timestamp cell
/// cannot be parsed, and `TsGridError::EmptyData` for a table without rows.
pub fn index_by_time(
    raw: &RawTable,
    parser: &mut TimestampParser,
    file: &str,
) -> Result<Indexed, TsGridError> {
    if raw.rows.is_empty() {
        return Err(TsGridError::empty_data(file));
    }

    let channels = raw.channel_names();
    let mut map: BTreeMap<NaiveDateTime, Vec<Option<f64>>> = BTreeMap::new();
    let mut duplicates_dropped = 0usize;

    for row in &raw.rows {
        let cell = row.cells.first().map_or("", String::as_str);
        let ts = parser.parse(cell).ok_or_else(|| TsGridError::Timestamp {
            file: file.to_string(),
            line: row.line,
            column: raw.time_column().to_string(),
            value: cell.to_string(),
        })?;
        match map.entry(ts) {
            Entry::Vacant(v) => {
                let values = (1..=channels.len())
                    .map(|i| row.cells.get(i).and_then(|c| parse_value(c)))
                    .collect();
                v.insert(values);
            }
            Entry::Occupied(_) => duplicates_dropped += 1,
        }
    }

    #[cfg(feature = "tracing")]
    {
        if duplicates_dropped > 0 {
            tracing::debug!(
                file,
                duplicates_dropped,
                kept = map.len(),
                "collapsed duplicate timestamps (first wins)"
            );
        }
    }

    let rows = map
        .into_iter()
        .map(|(ts, values)| Sample { ts, values })
        .collect();
    Ok(Indexed {
        table: TimeIndexedTable {
            time_column: raw.time_column().to_string(),
            channels,
            rows,
        },
        duplicates_dropped,
    })
}
