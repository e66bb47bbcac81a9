//! Plain-text previews of resampled tables.

use crate::export::format_value;
use crate::types::ResampledTable;

impl ResampledTable {
    /// Render the first `n` rows as a left-aligned text table, headed by
    /// `time_header` and the channel labels.
    ///
    /// Missing values show as `-`. Purely informational.
    #[must_use]
    pub fn render_preview(&self, time_header: &str, n: usize) -> String {
        let time_format = self.frequency.time_format();
        let mut grid: Vec<Vec<String>> = Vec::with_capacity(n.min(self.len()) + 1);
        let mut header = vec![time_header.to_string()];
        header.extend(self.channels.iter().cloned());
        grid.push(header);
        for row in self.head(n) {
            let mut line = vec![row.ts.format(time_format).to_string()];
            line.extend(row.values.iter().map(|v| match v {
                Some(_) => format_value(*v),
                None => "-".to_string(),
            }));
            grid.push(line);
        }

        let cols = self.channels.len() + 1;
        let widths: Vec<usize> = (0..cols)
            .map(|c| grid.iter().map(|r| r[c].chars().count()).max().unwrap_or(0))
            .collect();

        let mut out = String::new();
        for row in &grid {
            let cells: Vec<String> = row
                .iter()
                .zip(&widths)
                .map(|(cell, w)| format!("{cell:<w$}"))
                .collect();
            out.push_str(cells.join("  ").trim_end());
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use crate::types::{Frequency, ResampledTable, Sample};
    use chrono::NaiveDate;

    #[test]
    fn preview_aligns_columns_and_truncates() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let table = ResampledTable {
            frequency: Frequency::Daily,
            channels: vec!["Temperature".into()],
            rows: vec![
                Sample {
                    ts: day.and_hms_opt(0, 0, 0).unwrap(),
                    values: vec![Some(20.0)],
                },
                Sample {
                    ts: day.succ_opt().unwrap().and_hms_opt(0, 0, 0).unwrap(),
                    values: vec![None],
                },
                Sample {
                    ts: day
                        .succ_opt()
                        .and_then(|d| d.succ_opt())
                        .unwrap()
                        .and_hms_opt(0, 0, 0)
                        .unwrap(),
                    values: vec![Some(1.5)],
                },
            ],
        };
        let text = table.render_preview("Time", 2);
        assert_eq!(
            text,
            "Time        Temperature\n2024-01-01  20.0\n2024-01-02  -\n"
        );
        let text = table.render_preview("Day", 1);
        assert_eq!(text, "Day         Temperature\n2024-01-01  20.0\n");
    }
}
