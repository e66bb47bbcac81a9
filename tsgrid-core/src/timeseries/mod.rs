//! Time-series stages of the normalization pipeline.
//!
//! Modules include:
//! - `parse`: recognize timestamp cells in common textual layouts
//! - `index`: key rows by timestamp, collapsing duplicates (first wins)
//! - `resample`: average rows into hourly/daily buckets
//! - `grid`: reindex buckets onto a complete, gap-free grid
/// Reindexing onto complete grids.
pub mod grid;
/// Timestamp keying and duplicate collapse.
pub mod index;
/// Timestamp recognition.
pub mod parse;
/// Bucket averaging.
pub mod resample;
