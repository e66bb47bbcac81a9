use serde::{Deserialize, Serialize};
use tsgrid_core::{Frequency, IngestStats, ResampledTable, Sample};

/// One derived dataset: the grid plus its serialized artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResampledOutput {
    /// Artifact file name, e.g. `river.csv_Hourly_Averages.csv`.
    pub file_name: String,
    /// Delimited text of `table`.
    pub csv: String,
    /// The gap-filled grid.
    pub table: ResampledTable,
}

/// Everything produced for one input file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Normalized {
    /// Logical name of the input.
    pub name: String,
    /// Hourly averages on a complete hourly grid.
    pub hourly: ResampledOutput,
    /// Daily averages on a complete daily grid.
    pub daily: ResampledOutput,
    /// Counters gathered along the way.
    pub stats: IngestStats,
}

/// Leading rows of both grids, for human inspection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Preview<'a> {
    /// First hourly rows.
    pub hourly: &'a [Sample],
    /// First daily rows.
    pub daily: &'a [Sample],
}

impl Normalized {
    /// The output for one cadence.
    #[must_use]
    pub const fn output(&self, frequency: Frequency) -> &ResampledOutput {
        match frequency {
            Frequency::Hourly => &self.hourly,
            Frequency::Daily => &self.daily,
        }
    }

    /// `(file_name, csv)` pairs for both artifacts, hourly first.
    #[must_use]
    pub fn artifacts(&self) -> [(&str, &str); 2] {
        [
            (self.hourly.file_name.as_str(), self.hourly.csv.as_str()),
            (self.daily.file_name.as_str(), self.daily.csv.as_str()),
        ]
    }

    /// The first `rows` rows of each grid.
    #[must_use]
    pub fn preview(&self, rows: usize) -> Preview<'_> {
        Preview {
            hourly: self.hourly.table.head(rows),
            daily: self.daily.table.head(rows),
        }
    }
}
