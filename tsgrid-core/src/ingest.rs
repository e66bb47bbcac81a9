//! Text decoding and delimited-table reading.

use csv::{ReaderBuilder, StringRecord};

use crate::types::{RawRow, RawTable, TsGridError};

const BOM: char = '\u{feff}';

/// Decode uploaded bytes as UTF-8.
///
/// # Errors
/// Returns `TsGridError::Decode` with the length of the valid prefix when the
/// bytes are not UTF-8.
pub fn decode<'a>(bytes: &'a [u8], file: &str) -> Result<&'a str, TsGridError> {
    std::str::from_utf8(bytes).map_err(|e| TsGridError::Decode {
        file: file.to_string(),
        valid_up_to: e.valid_up_to(),
    })
}

/// Read decoded text into a header plus data rows.
///
/// - A leading byte order mark is dropped.
/// - Blank lines are skipped.
/// - A row shorter than the header is padded with empty cells.
/// - A row longer than the header is rejected.
///
/// # Errors
/// - `TsGridError::EmptyData` when there is no header or no data row.
/// - `TsGridError::Parse` for malformed records (bad quoting, extra fields).
pub fn read_table(text: &str, delimiter: u8, file: &str) -> Result<RawTable, TsGridError> {
    let text = text.strip_prefix(BOM).unwrap_or(text);
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = rdr
        .headers()
        .map_err(|e| csv_error(file, &e))?
        .iter()
        .map(str::to_string)
        .collect();
    if headers.is_empty() || headers.iter().all(String::is_empty) {
        return Err(TsGridError::empty_data(file));
    }

    let width = headers.len();
    let mut rows: Vec<RawRow> = Vec::new();
    let mut record = StringRecord::new();
    loop {
        match rdr.read_record(&mut record) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => return Err(csv_error(file, &e)),
        }
        let line = record.position().map_or(0, csv::Position::line);
        if record.len() > width {
            return Err(TsGridError::Parse {
                file: file.to_string(),
                line: Some(line),
                message: format!("expected {width} fields, found {}", record.len()),
            });
        }
        let mut cells: Vec<String> = record.iter().map(str::to_string).collect();
        cells.resize(width, String::new());
        rows.push(RawRow { line, cells });
    }

    if rows.is_empty() {
        return Err(TsGridError::empty_data(file));
    }
    Ok(RawTable { headers, rows })
}

fn csv_error(file: &str, err: &csv::Error) -> TsGridError {
    TsGridError::Parse {
        file: file.to_string(),
        line: err.position().map(csv::Position::line),
        message: err.to_string(),
    }
}
