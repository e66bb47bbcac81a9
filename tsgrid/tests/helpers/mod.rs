// Shared fixtures so tests can `use helpers::*;`
#![allow(dead_code)]

use tsgrid::{Normalized, TimeSeriesNormalizer, TsGridError};

/// Three readings over two hours on 2024-01-01.
pub const TEMPS: &str = "Time,Temp\n\
2024-01-01 00:15,10\n\
2024-01-01 00:45,20\n\
2024-01-01 01:10,30\n";

/// Two channels, one of which never holds a number.
pub const MIXED: &str = "Time,Level,Note\n\
2024-03-10 06:00,1.5,dry\n\
2024-03-10 07:30,2.5,wet\n";

/// Build a CSV body from `(timestamp, value)` pairs under a `Time,v` header.
pub fn csv_of(rows: &[(&str, &str)]) -> String {
    let mut out = String::from("Time,v\n");
    for (ts, v) in rows {
        out.push_str(ts);
        out.push(',');
        out.push_str(v);
        out.push('\n');
    }
    out
}

/// Normalize `text` with the default configuration.
pub fn normalize(text: &str, name: &str) -> Result<Normalized, TsGridError> {
    TimeSeriesNormalizer::new().normalize(text.as_bytes(), name)
}
