use std::collections::HashMap;

use proptest::prelude::*;
use tsgrid_core::{RawRow, RawTable, TimestampParser, index_by_time, parse_value};

fn arb_rows() -> impl Strategy<Value = Vec<(u32, i32)>> {
    // Few distinct minutes so duplicates are common
    proptest::collection::vec((0u32..30, -500i32..500), 1..120)
}

fn raw_table(rows: &[(u32, i32)]) -> RawTable {
    RawTable {
        headers: vec!["Time".into(), "v".into()],
        rows: rows
            .iter()
            .enumerate()
            .map(|(i, (minute, v))| RawRow {
                line: i as u64 + 2,
                cells: vec![format!("2024-02-01 10:{minute:02}"), v.to_string()],
            })
            .collect(),
    }
}

proptest! {
    #[test]
    fn first_row_per_timestamp_wins(rows in arb_rows()) {
        let raw = raw_table(&rows);
        let out = index_by_time(&raw, &mut TimestampParser::default(), "p.csv").unwrap();

        let mut first: HashMap<u32, i32> = HashMap::new();
        for (m, v) in &rows {
            first.entry(*m).or_insert(*v);
        }
        prop_assert_eq!(out.table.len(), first.len());
        prop_assert_eq!(out.duplicates_dropped, rows.len() - first.len());
        for r in &out.table.rows {
            let minute = chrono::Timelike::minute(&r.ts);
            prop_assert_eq!(r.values[0], Some(f64::from(first[&minute])));
        }
    }

    #[test]
    fn keys_are_strictly_increasing(rows in arb_rows()) {
        let out = index_by_time(&raw_table(&rows), &mut TimestampParser::default(), "p.csv").unwrap();
        prop_assert!(out.table.rows.windows(2).all(|w| w[0].ts < w[1].ts));
    }

    #[test]
    fn integer_cells_parse_exactly(v in any::<i32>()) {
        prop_assert_eq!(parse_value(&v.to_string()), Some(f64::from(v)));
    }
}
