use chrono::{DateTime, NaiveDateTime};

use crate::types::{Frequency, Sample, TimeIndexedTable};

const HOUR: i64 = 3_600;
const DAY: i64 = 86_400;

/// Truncate `ts` to the start of its bucket of `step` seconds.
///
/// Buckets are aligned to the Unix epoch, so hourly buckets start on the hour
/// and daily buckets at midnight. Returns `None` only at the edges of the
/// representable range.
#[must_use]
pub fn bucket_start(ts: NaiveDateTime, step: i64) -> Option<NaiveDateTime> {
    let secs = ts.and_utc().timestamp();
    let bucket = secs - secs.rem_euclid(step);
    DateTime::from_timestamp(bucket, 0).map(|dt| dt.naive_utc())
}

/// Running per-channel sums over one bucket.
struct BucketAgg {
    sums: Vec<f64>,
    counts: Vec<u32>,
}

impl BucketAgg {
    fn new(channels: usize) -> Self {
        Self {
            sums: vec![0.0; channels],
            counts: vec![0; channels],
        }
    }

    fn add(&mut self, values: &[Option<f64>]) {
        for (i, v) in values.iter().enumerate() {
            if let Some(v) = v {
                self.sums[i] += v;
                self.counts[i] += 1;
            }
        }
    }

    fn finish(self, ts: NaiveDateTime) -> Sample {
        let values = self
            .sums
            .into_iter()
            .zip(self.counts)
            .map(|(sum, n)| {
                (n > 0)
                    .then(|| sum / f64::from(n))
                    .filter(|mean| !mean.is_nan())
            })
            .collect();
        Sample { ts, values }
    }
}

/// Group sorted rows by a bucket function and average each channel.
///
/// Missing values are ignored; a channel with no values in a bucket stays
/// missing, as does one whose mean is undefined (`inf` plus `-inf`). Only buckets with at least one source row are emitted.
fn resample_by<F>(table: &TimeIndexedTable, bucket_of: F) -> Vec<Sample>
where
    F: Fn(NaiveDateTime) -> Option<NaiveDateTime>,
{
    let channels = table.channels.len();
    let mut out: Vec<Sample> = Vec::new();

    let mut iter = table.rows.iter();
    let Some((mut cur_bucket, first)) = iter.find_map(|r| bucket_of(r.ts).map(|b| (b, r))) else {
        return out;
    };
    let mut agg = BucketAgg::new(channels);
    agg.add(&first.values);

    for row in iter {
        let Some(bucket) = bucket_of(row.ts) else {
            continue;
        };
        if bucket != cur_bucket {
            let done = std::mem::replace(&mut agg, BucketAgg::new(channels));
            out.push(done.finish(cur_bucket));
            cur_bucket = bucket;
        }
        agg.add(&row.values);
    }
    out.push(agg.finish(cur_bucket));
    out
}

/// Average rows into hourly buckets (start of the containing hour).
///
/// ```
/// use tsgrid_core::{Sample, TimeIndexedTable, resample_to_hourly};
/// use chrono::NaiveDate;
/// let at = |h: u32, m: u32| NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(h, m, 0).unwrap();
/// let table = TimeIndexedTable {
///     time_column: "Time".into(),
///     channels: vec!["v".into()],
///     rows: vec![
///         Sample { ts: at(10, 0), values: vec![Some(2.0)] },
///         Sample { ts: at(10, 20), values: vec![Some(4.0)] },
///         Sample { ts: at(10, 40), values: vec![Some(6.0)] },
///     ],
/// };
/// let hourly = resample_to_hourly(&table);
/// assert_eq!(hourly.len(), 1);
/// assert_eq!(hourly[0].ts, at(10, 0));
/// assert_eq!(hourly[0].values, vec![Some(4.0)]);
/// ```
#[must_use]
pub fn resample_to_hourly(table: &TimeIndexedTable) -> Vec<Sample> {
    resample_by(table, |ts| bucket_start(ts, HOUR))
}

/// Average rows into daily buckets (midnight of the containing day).
#[must_use]
pub fn resample_to_daily(table: &TimeIndexedTable) -> Vec<Sample> {
    resample_by(table, |ts| bucket_start(ts, DAY))
}

/// Average rows into buckets of the given cadence.
#[must_use]
pub fn resample_mean(table: &TimeIndexedTable, frequency: Frequency) -> Vec<Sample> {
    match frequency {
        Frequency::Hourly => resample_to_hourly(table),
        Frequency::Daily => resample_to_daily(table),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(d: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, d)
            .and_then(|x| x.and_hms_opt(h, m, 0))
            .unwrap()
    }

    fn table(rows: Vec<(NaiveDateTime, Vec<Option<f64>>)>) -> TimeIndexedTable {
        let channels = rows.first().map_or(0, |r| r.1.len());
        TimeIndexedTable {
            time_column: "Time".into(),
            channels: (0..channels).map(|i| format!("c{i}")).collect(),
            rows: rows
                .into_iter()
                .map(|(ts, values)| Sample { ts, values })
                .collect(),
        }
    }

    #[test]
    fn bucket_start_truncates_towards_past() {
        let ts = at(1, 10, 59) + chrono::TimeDelta::milliseconds(999);
        assert_eq!(bucket_start(ts, HOUR), Some(at(1, 10, 0)));
        assert_eq!(bucket_start(ts, DAY), Some(at(1, 0, 0)));
        let before_epoch = NaiveDate::from_ymd_opt(1969, 12, 31)
            .and_then(|d| d.and_hms_opt(23, 30, 0))
            .unwrap();
        let expected = NaiveDate::from_ymd_opt(1969, 12, 31)
            .and_then(|d| d.and_hms_opt(23, 0, 0))
            .unwrap();
        assert_eq!(bucket_start(before_epoch, HOUR), Some(expected));
    }

    #[test]
    fn hourly_mean_ignores_missing_per_channel() {
        let t = table(vec![
            (at(1, 0, 15), vec![Some(10.0), None]),
            (at(1, 0, 45), vec![Some(20.0), None]),
            (at(1, 1, 10), vec![Some(30.0), Some(1.0)]),
        ]);
        let out = resample_to_hourly(&t);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].ts, at(1, 0, 0));
        assert_eq!(out[0].values, vec![Some(15.0), None]);
        assert_eq!(out[1].values, vec![Some(30.0), Some(1.0)]);
    }

    #[test]
    fn daily_mean_spans_hours() {
        let t = table(vec![
            (at(1, 0, 15), vec![Some(10.0)]),
            (at(1, 0, 45), vec![Some(20.0)]),
            (at(1, 1, 10), vec![Some(30.0)]),
            (at(3, 8, 0), vec![Some(5.0)]),
        ]);
        let out = resample_mean(&t, Frequency::Daily);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].ts, at(1, 0, 0));
        assert_eq!(out[0].values, vec![Some(20.0)]);
        assert_eq!(out[1].ts, at(3, 0, 0));
    }

    #[test]
    fn opposite_infinities_average_to_missing() {
        let t = table(vec![
            (at(1, 0, 10), vec![Some(f64::INFINITY), Some(1.0)]),
            (at(1, 0, 20), vec![Some(f64::NEG_INFINITY), Some(3.0)]),
            (at(1, 1, 0), vec![Some(f64::INFINITY), None]),
        ]);
        let out = resample_to_hourly(&t);
        assert_eq!(out[0].values, vec![None, Some(2.0)]);
        assert_eq!(out[1].values, vec![Some(f64::INFINITY), None]);
    }

    #[test]
    fn empty_table_yields_no_buckets() {
        let t = table(vec![]);
        assert!(resample_to_hourly(&t).is_empty());
    }
}
