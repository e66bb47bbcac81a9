use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::types::TsGridError;

/// Date+time layouts without an offset, most common first.
const NAIVE_LAYOUTS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S%.f",
    "%m/%d/%Y %H:%M",
    "%d.%m.%Y %H:%M:%S%.f",
    "%d.%m.%Y %H:%M",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
    "%Y-%m-%d %I:%M:%S %p",
    "%Y-%m-%d %I:%M %p",
];

/// Layouts carrying a UTC offset; parsed instants keep their local wall clock.
const OFFSET_LAYOUTS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M%:z",
    "%Y-%m-%dT%H:%M%:z",
];

const DATE_LAYOUTS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d.%m.%Y"];

#[derive(Debug, Clone, PartialEq, Eq)]
enum Layout {
    Custom(String),
    Rfc3339,
    Offset(&'static str),
    Naive(&'static str),
    Date(&'static str),
}

impl Layout {
    fn parse(&self, s: &str) -> Option<NaiveDateTime> {
        match self {
            Self::Custom(fmt) => NaiveDateTime::parse_from_str(s, fmt)
                .ok()
                .or_else(|| DateTime::parse_from_str(s, fmt).ok().map(|dt| dt.naive_local()))
                .or_else(|| midnight(NaiveDate::parse_from_str(s, fmt).ok()?)),
            Self::Rfc3339 => DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.naive_local()),
            Self::Offset(fmt) => DateTime::parse_from_str(s, fmt).ok().map(|dt| dt.naive_local()),
            Self::Naive(fmt) => NaiveDateTime::parse_from_str(s, fmt).ok(),
            Self::Date(fmt) => midnight(NaiveDate::parse_from_str(s, fmt).ok()?),
        }
    }
}

fn midnight(date: NaiveDate) -> Option<NaiveDateTime> {
    date.and_hms_opt(0, 0, 0)
}

/// Recognizes timestamp cells in the textual forms found in sensor exports.
///
/// Custom formats are tried first, then RFC 3339, offset-bearing ISO forms,
/// naive date+time forms, and finally date-only forms (midnight). An offset is
/// dropped after parsing, so the key is the wall-clock time as written and
/// bucketing follows the local hour and day of the input.
///
/// Built-in layouts never match the same text, so the one that matched last
/// is tried first on the next cell. Custom formats always keep precedence.
#[derive(Debug, Clone)]
pub struct TimestampParser {
    layouts: Vec<Layout>,
    custom: usize,
    last_hit: Option<usize>,
}

impl Default for TimestampParser {
    fn default() -> Self {
        Self::builtin(Vec::new())
    }
}

impl TimestampParser {
    /// Build a parser that tries `custom` formats before the built-in layouts.
    ///
    /// # Errors
    /// Returns `TsGridError::InvalidArg` if a custom format is empty or
    /// contains an invalid `chrono` specifier.
    pub fn new(custom: &[String]) -> Result<Self, TsGridError> {
        let mut layouts = Vec::with_capacity(custom.len());
        for fmt in custom {
            if fmt.trim().is_empty()
                || StrftimeItems::new(fmt).any(|item| matches!(item, Item::Error))
            {
                return Err(TsGridError::InvalidArg(format!(
                    "invalid timestamp format {fmt:?}"
                )));
            }
            layouts.push(Layout::Custom(fmt.clone()));
        }
        Ok(Self::builtin(layouts))
    }

    fn builtin(mut layouts: Vec<Layout>) -> Self {
        let custom = layouts.len();
        layouts.push(Layout::Rfc3339);
        layouts.extend(OFFSET_LAYOUTS.iter().copied().map(Layout::Offset));
        layouts.extend(NAIVE_LAYOUTS.iter().copied().map(Layout::Naive));
        layouts.extend(DATE_LAYOUTS.iter().copied().map(Layout::Date));
        Self {
            layouts,
            custom,
            last_hit: None,
        }
    }

    /// Parse one cell. Surrounding whitespace is ignored; an empty cell never
    /// parses.
    pub fn parse(&mut self, raw: &str) -> Option<NaiveDateTime> {
        let s = raw.trim();
        if s.is_empty() {
            return None;
        }
        if let Some(ts) = self.layouts[..self.custom].iter().find_map(|l| l.parse(s)) {
            return Some(ts);
        }
        if let Some(i) = self.last_hit {
            if let Some(ts) = self.layouts[i].parse(s) {
                return Some(ts);
            }
        }
        for i in self.custom..self.layouts.len() {
            if Some(i) == self.last_hit {
                continue;
            }
            if let Some(ts) = self.layouts[i].parse(s) {
                self.last_hit = Some(i);
                return Some(ts);
            }
        }
        None
    }
}
