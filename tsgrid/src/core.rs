use tsgrid_core::{
    ArtifactNaming, Frequency, IngestStats, NormalizeConfig, TimeIndexedTable, TimestampParser,
    TsGridError, decode, grid_len, index_by_time, read_table, reindex_to_grid, resample_mean,
    to_csv,
};

use crate::output::{Normalized, Preview, ResampledOutput};

/// Turns timestamped delimited text into gap-filled hourly and daily averages.
///
/// A normalizer holds only its configuration. Each call to
/// [`normalize`](Self::normalize) builds and discards its own tables, so one
/// instance can serve any number of files.
#[derive(Debug, Clone, Default)]
pub struct TimeSeriesNormalizer {
    pub(crate) cfg: NormalizeConfig,
}

/// Builder for constructing a `TimeSeriesNormalizer` with custom configuration.
#[derive(Debug, Clone, Default)]
pub struct TimeSeriesNormalizerBuilder {
    cfg: NormalizeConfig,
}

impl TimeSeriesNormalizerBuilder {
    /// Create a new builder with defaults: comma delimiter, `Time` header,
    /// built-in timestamp layouts only, 10 preview rows, no grid cap, and
    /// artifact names that keep the input's extension.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cfg: NormalizeConfig::default(),
        }
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, cfg: NormalizeConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Field delimiter for input and output tables.
    #[must_use]
    pub const fn delimiter(mut self, delimiter: u8) -> Self {
        self.cfg.delimiter = delimiter;
        self
    }

    /// Label of the leading timestamp column in output tables.
    #[must_use]
    pub fn time_header(mut self, header: impl Into<String>) -> Self {
        self.cfg.time_header = header.into();
        self
    }

    /// Add a `chrono` format tried before the built-in timestamp layouts.
    ///
    /// Formats are tried in the order they were added.
    #[must_use]
    pub fn timestamp_format(mut self, format: impl Into<String>) -> Self {
        self.cfg.timestamp_formats.push(format.into());
        self
    }

    /// Number of rows returned by [`TimeSeriesNormalizer::preview`].
    #[must_use]
    pub const fn preview_rows(mut self, rows: usize) -> Self {
        self.cfg.preview_rows = rows;
        self
    }

    /// Reject files whose hourly or daily grid would exceed `points`.
    ///
    /// A file spanning decades produces hundreds of thousands of hourly rows;
    /// the cap turns that into an error instead of a large allocation.
    #[must_use]
    pub const fn max_grid_points(mut self, points: usize) -> Self {
        self.cfg.max_grid_points = Some(points);
        self
    }

    /// Naming rule for output artifacts.
    #[must_use]
    pub const fn artifact_naming(mut self, naming: ArtifactNaming) -> Self {
        self.cfg.artifact_naming = naming;
        self
    }

    /// Validate the configuration and build the normalizer.
    ///
    /// # Errors
    /// Returns `TsGridError::InvalidArg` if the delimiter is a quote or line
    /// break, the time header is empty, a custom timestamp format is invalid,
    /// or the grid cap is zero.
    pub fn build(self) -> Result<TimeSeriesNormalizer, TsGridError> {
        let cfg = self.cfg;
        if matches!(cfg.delimiter, b'"' | b'\n' | b'\r') {
            return Err(TsGridError::InvalidArg(format!(
                "unusable delimiter {:?}",
                char::from(cfg.delimiter)
            )));
        }
        if cfg.time_header.trim().is_empty() {
            return Err(TsGridError::InvalidArg("time header must not be empty".into()));
        }
        if cfg.max_grid_points == Some(0) {
            return Err(TsGridError::InvalidArg(
                "max_grid_points must be greater than zero".into(),
            ));
        }
        TimestampParser::new(&cfg.timestamp_formats)?;
        Ok(TimeSeriesNormalizer { cfg })
    }
}

impl TimeSeriesNormalizer {
    /// Start building a new normalizer.
    #[must_use]
    pub fn builder() -> TimeSeriesNormalizerBuilder {
        TimeSeriesNormalizerBuilder::new()
    }

    /// A normalizer with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &NormalizeConfig {
        &self.cfg
    }

    /// Normalize one uploaded file.
    ///
    /// Steps, each over the whole file:
    /// 1. decode the bytes as UTF-8 and read a header plus data rows;
    /// 2. parse column 0 of every row as a timestamp;
    /// 3. keep the first row for each distinct timestamp, sorted ascending;
    /// 4. average every channel into hourly and daily buckets, ignoring
    ///    missing values;
    /// 5. reindex each set of buckets onto the complete grid between its
    ///    first and last bucket, filling absent points with missing rows;
    /// 6. serialize both grids.
    ///
    /// The result depends only on `bytes`, `name`, and the configuration.
    ///
    /// # Errors
    /// - `TsGridError::Decode` if the bytes are not UTF-8.
    /// - `TsGridError::Parse` if the text is not a well-formed table.
    /// - `TsGridError::Timestamp` if any timestamp cell fails to parse.
    /// - `TsGridError::EmptyData` if there are no data rows.
    /// - `TsGridError::GridTooLarge` if a configured grid cap is exceeded.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "tsgrid::core::normalize",
            skip(self, bytes),
            fields(file = name, bytes = bytes.len()),
        )
    )]
    pub fn normalize(&self, bytes: &[u8], name: &str) -> Result<Normalized, TsGridError> {
        let text = decode(bytes, name)?;
        self.normalize_str(text, name)
    }

    /// Normalize already-decoded text. See [`normalize`](Self::normalize).
    ///
    /// # Errors
    /// Same as [`normalize`](Self::normalize), minus `Decode`.
    pub fn normalize_str(&self, text: &str, name: &str) -> Result<Normalized, TsGridError> {
        let raw = read_table(text, self.cfg.delimiter, name)?;
        let mut parser = TimestampParser::new(&self.cfg.timestamp_formats)?;
        let indexed = index_by_time(&raw, &mut parser, name)?;

        let hourly = self.resample(&indexed.table, Frequency::Hourly, name)?;
        let daily = self.resample(&indexed.table, Frequency::Daily, name)?;

        let stats = IngestStats {
            rows_read: raw.rows.len(),
            distinct_timestamps: indexed.table.len(),
            duplicates_dropped: indexed.duplicates_dropped,
            hourly_points: hourly.table.len(),
            daily_points: daily.table.len(),
            empty_hourly_buckets: hourly.table.empty_buckets(),
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(
            file = name,
            rows_read = stats.rows_read,
            distinct = stats.distinct_timestamps,
            duplicates = stats.duplicates_dropped,
            hourly_points = stats.hourly_points,
            daily_points = stats.daily_points,
            empty_hourly = stats.empty_hourly_buckets,
            "normalized file"
        );

        Ok(Normalized {
            name: name.to_string(),
            hourly,
            daily,
            stats,
        })
    }

    /// The first `preview_rows` rows of each grid of `out`.
    #[must_use]
    pub fn preview<'a>(&self, out: &'a Normalized) -> Preview<'a> {
        out.preview(self.cfg.preview_rows)
    }

    fn resample(
        &self,
        table: &TimeIndexedTable,
        frequency: Frequency,
        name: &str,
    ) -> Result<ResampledOutput, TsGridError> {
        let buckets = resample_mean(table, frequency);
        let (Some(first), Some(last)) = (buckets.first(), buckets.last()) else {
            return Err(TsGridError::empty_data(name));
        };
        if let Some(limit) = self.cfg.max_grid_points {
            let points = grid_len(first.ts, last.ts, frequency);
            if points > u64::try_from(limit).unwrap_or(u64::MAX) {
                return Err(TsGridError::GridTooLarge {
                    file: name.to_string(),
                    frequency,
                    points,
                    limit,
                });
            }
        }

        let grid = reindex_to_grid(buckets, table.channels.clone(), frequency);
        let csv = to_csv(&grid, &self.cfg.time_header, self.cfg.delimiter, name)?;
        Ok(ResampledOutput {
            file_name: self.cfg.artifact_naming.artifact_name(name, frequency),
            csv,
            table: grid,
        })
    }
}
