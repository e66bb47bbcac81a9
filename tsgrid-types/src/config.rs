//! Configuration types shared by the normalizer and its pipeline stages.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Resampling cadence of an output grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Frequency {
    /// One bucket per wall-clock hour.
    Hourly,
    /// One bucket per calendar day.
    Daily,
}

impl Frequency {
    /// Both cadences, in the order outputs are produced.
    pub const ALL: [Self; 2] = [Self::Hourly, Self::Daily];

    /// Bucket width in seconds.
    #[must_use]
    pub const fn step_seconds(self) -> i64 {
        match self {
            Self::Hourly => 3_600,
            Self::Daily => 86_400,
        }
    }

    /// Label used in artifact names (`_Hourly_Averages.csv`).
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Hourly => "Hourly",
            Self::Daily => "Daily",
        }
    }

    /// `chrono` format used when rendering grid timestamps.
    #[must_use]
    pub const fn time_format(self) -> &'static str {
        match self {
            Self::Hourly => "%Y-%m-%d %H:%M:%S",
            Self::Daily => "%Y-%m-%d",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hourly => f.write_str("hourly"),
            Self::Daily => f.write_str("daily"),
        }
    }
}

/// How output artifact names are derived from the input's logical name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ArtifactNaming {
    /// Append the suffix to the full name: `data.csv` -> `data.csv_Hourly_Averages.csv`.
    #[default]
    KeepExtension,
    /// Drop a trailing extension first: `data.csv` -> `data_Hourly_Averages.csv`.
    StripExtension,
}

impl ArtifactNaming {
    /// Build the artifact file name for `name` at the given cadence.
    #[must_use]
    pub fn artifact_name(self, name: &str, frequency: Frequency) -> String {
        let stem = match self {
            Self::KeepExtension => name,
            Self::StripExtension => match name.rsplit_once('.') {
                Some((stem, _)) if !stem.is_empty() => stem,
                _ => name,
            },
        };
        format!("{stem}_{}_Averages.csv", frequency.label())
    }
}

/// Configuration for a `TimeSeriesNormalizer`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeConfig {
    /// Field delimiter for both input and output tables.
    pub delimiter: u8,
    /// Header label of the leading timestamp column in output tables.
    pub time_header: String,
    /// Additional `chrono` formats tried, in order, before the built-in
    /// timestamp recognizers.
    pub timestamp_formats: Vec<String>,
    /// Number of rows returned by previews.
    pub preview_rows: usize,
    /// Optional cap on the number of points in any single output grid.
    pub max_grid_points: Option<usize>,
    /// Naming rule for output artifacts.
    pub artifact_naming: ArtifactNaming,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            time_header: "Time".to_string(),
            timestamp_formats: Vec::new(),
            preview_rows: 10,
            max_grid_points: None,
            artifact_naming: ArtifactNaming::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artifact_names_follow_naming_rule() {
        assert_eq!(
            ArtifactNaming::KeepExtension.artifact_name("river.csv", Frequency::Hourly),
            "river.csv_Hourly_Averages.csv"
        );
        assert_eq!(
            ArtifactNaming::StripExtension.artifact_name("river.csv", Frequency::Daily),
            "river_Daily_Averages.csv"
        );
        // Hidden-file style names keep their only dot.
        assert_eq!(
            ArtifactNaming::StripExtension.artifact_name(".csv", Frequency::Daily),
            ".csv_Daily_Averages.csv"
        );
    }

    #[test]
    fn frequency_steps() {
        assert_eq!(Frequency::Hourly.step_seconds() * 24, Frequency::Daily.step_seconds());
    }
}
