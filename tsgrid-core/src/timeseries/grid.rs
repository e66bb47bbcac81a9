use chrono::{NaiveDateTime, TimeDelta};

use crate::types::{Frequency, ResampledTable, Sample};

/// Number of points in the grid `[start, end]` at `frequency`, inclusive.
///
/// Both ends are expected to be bucket starts; returns 0 if `end < start`.
#[must_use]
pub fn grid_len(start: NaiveDateTime, end: NaiveDateTime, frequency: Frequency) -> u64 {
    let span = (end - start).num_seconds();
    if span < 0 {
        return 0;
    }
    u64::try_from(span / frequency.step_seconds()).map_or(0, |k| k + 1)
}

/// Re-key aggregated buckets onto the complete grid from the first to the last
/// bucket.
///
/// Buckets keep their values; grid points with no bucket get an all-missing
/// row. `buckets` must be sorted, unique, and aligned to `frequency`, as
/// produced by [`resample_mean`](super::resample::resample_mean).
#[must_use]
pub fn reindex_to_grid(
    buckets: Vec<Sample>,
    channels: Vec<String>,
    frequency: Frequency,
) -> ResampledTable {
    let (Some(start), Some(end)) = (buckets.first().map(|b| b.ts), buckets.last().map(|b| b.ts))
    else {
        return ResampledTable {
            frequency,
            channels,
            rows: Vec::new(),
        };
    };

    let step = TimeDelta::seconds(frequency.step_seconds());
    let width = channels.len();
    let capacity = usize::try_from(grid_len(start, end, frequency)).unwrap_or(0);
    let mut rows: Vec<Sample> = Vec::with_capacity(capacity);
    let mut pending = buckets.into_iter().peekable();

    let mut ts = start;
    while ts <= end {
        match pending.next_if(|b| b.ts == ts) {
            Some(bucket) => rows.push(bucket),
            None => rows.push(Sample::missing(ts, width)),
        }
        match ts.checked_add_signed(step) {
            Some(next) => ts = next,
            None => break,
        }
    }

    ResampledTable {
        frequency,
        channels,
        rows,
    }
}
