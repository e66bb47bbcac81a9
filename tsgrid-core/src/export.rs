//! Delimited-text rendering of resampled tables.

use csv::{Terminator, WriterBuilder};

use crate::types::{ResampledTable, TsGridError};

/// Render a channel value.
///
/// Finite whole numbers keep one decimal (`15.0`); everything else uses the
/// shortest representation that round-trips. Missing values render empty.
#[must_use]
pub fn format_value(value: Option<f64>) -> String {
    match value {
        None => String::new(),
        Some(v) if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e16 => format!("{v:.1}"),
        Some(v) => v.to_string(),
    }
}

/// Serialize a grid to delimited text.
///
/// The header row is `time_header` followed by the channel labels; each grid
/// point becomes one record led by its timestamp in the cadence's format.
///
/// # Errors
/// Returns `TsGridError::Export` if the writer fails.
pub fn to_csv(
    table: &ResampledTable,
    time_header: &str,
    delimiter: u8,
    file: &str,
) -> Result<String, TsGridError> {
    let export_err = |message: String| TsGridError::Export {
        file: file.to_string(),
        message,
    };

    let mut wtr = WriterBuilder::new()
        .delimiter(delimiter)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    let mut header: Vec<&str> = Vec::with_capacity(table.channels.len() + 1);
    header.push(time_header);
    header.extend(table.channels.iter().map(String::as_str));
    wtr.write_record(&header)
        .map_err(|e| export_err(e.to_string()))?;

    let time_format = table.frequency.time_format();
    let mut record: Vec<String> = Vec::with_capacity(table.channels.len() + 1);
    for row in &table.rows {
        record.clear();
        record.push(row.ts.format(time_format).to_string());
        record.extend(row.values.iter().copied().map(format_value));
        wtr.write_record(&record)
            .map_err(|e| export_err(e.to_string()))?;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| export_err(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| export_err(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Frequency, Sample};
    use chrono::NaiveDate;

    #[test]
    fn values_render_like_generic_csv_tooling() {
        assert_eq!(format_value(None), "");
        assert_eq!(format_value(Some(15.0)), "15.0");
        assert_eq!(format_value(Some(-2.0)), "-2.0");
        assert_eq!(format_value(Some(0.1 + 0.2)), "0.30000000000000004");
        assert_eq!(format_value(Some(2.5)), "2.5");
        assert_eq!(format_value(Some(f64::INFINITY)), "inf");
    }

    #[test]
    fn writes_header_rows_and_empty_missing_cells() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let table = ResampledTable {
            frequency: Frequency::Hourly,
            channels: vec!["Temp".into(), "Rain, mm".into()],
            rows: vec![
                Sample {
                    ts: day.and_hms_opt(0, 0, 0).unwrap(),
                    values: vec![Some(15.0), None],
                },
                Sample {
                    ts: day.and_hms_opt(1, 0, 0).unwrap(),
                    values: vec![None, None],
                },
            ],
        };
        let text = to_csv(&table, "Time", b',', "t.csv").unwrap();
        assert_eq!(
            text,
            "Time,Temp,\"Rain, mm\"\n2024-01-01 00:00:00,15.0,\n2024-01-01 01:00:00,,\n"
        );
    }

    #[test]
    fn daily_rows_render_dates_only() {
        let table = ResampledTable {
            frequency: Frequency::Daily,
            channels: vec!["v".into()],
            rows: vec![Sample {
                ts: NaiveDate::from_ymd_opt(2024, 1, 1)
                    .unwrap()
                    .and_hms_opt(0, 0, 0)
                    .unwrap(),
                values: vec![Some(20.0)],
            }],
        };
        assert_eq!(
            to_csv(&table, "Time", b';', "d.csv").unwrap(),
            "Time;v\n2024-01-01;20.0\n"
        );
    }
}
