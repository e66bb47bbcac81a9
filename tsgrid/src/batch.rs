use tsgrid_core::{BatchReport, TsGridError};

use crate::TimeSeriesNormalizer;
use crate::output::Normalized;

/// Builder to normalize several named files in one pass.
pub struct BatchBuilder<'a> {
    normalizer: &'a TimeSeriesNormalizer,
    files: Vec<(String, Vec<u8>)>,
}

impl<'a> BatchBuilder<'a> {
    /// Create a new builder bound to a `TimeSeriesNormalizer`.
    #[must_use]
    pub const fn new(normalizer: &'a TimeSeriesNormalizer) -> Self {
        Self {
            normalizer,
            files: Vec::new(),
        }
    }

    /// Add one named file.
    ///
    /// # Errors
    /// Returns an error if a file with the same name was already added, since
    /// both would produce identically named artifacts.
    pub fn file(
        mut self,
        name: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Result<Self, TsGridError> {
        let name = name.into();
        if self.files.iter().any(|(existing, _)| *existing == name) {
            return Err(TsGridError::InvalidArg(format!(
                "duplicate file name '{name}' in batch"
            )));
        }
        self.files.push((name, bytes.into()));
        Ok(self)
    }

    /// Add several named files, in order.
    ///
    /// # Errors
    /// Returns an error on the first duplicate name.
    pub fn files<I, N, B>(mut self, files: I) -> Result<Self, TsGridError>
    where
        I: IntoIterator<Item = (N, B)>,
        N: Into<String>,
        B: Into<Vec<u8>>,
    {
        for (name, bytes) in files {
            self = self.file(name, bytes)?;
        }
        Ok(self)
    }

    /// Normalize every file, one after another.
    ///
    /// A file that fails is recorded in the report's `warnings` and the run
    /// continues with the next one. Successful outputs keep input order.
    ///
    /// # Errors
    /// Returns an error only if no files were added.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "tsgrid::batch::run",
            skip(self),
            fields(files = self.files.len()),
        )
    )]
    pub fn run(self) -> Result<BatchReport<Normalized>, TsGridError> {
        if self.files.is_empty() {
            return Err(TsGridError::InvalidArg("no files specified for batch".into()));
        }

        let mut report = BatchReport::default();
        for (name, bytes) in &self.files {
            match self.normalizer.normalize(bytes, name) {
                Ok(out) => report.outputs.push(out),
                Err(e) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(file = %name, error = %e, "file skipped");
                    report.warnings.push(e);
                }
            }
        }
        Ok(report)
    }
}

impl TimeSeriesNormalizer {
    /// Begin building a batch of files.
    ///
    /// Typical usage: chain `file`/`files` then call `run()`.
    #[must_use]
    pub const fn batch(&'_ self) -> BatchBuilder<'_> {
        BatchBuilder::new(self)
    }
}
