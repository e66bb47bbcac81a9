use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use tsgrid::TimeSeriesNormalizer;

// Rows within a four-day window, with some cells left blank or non-numeric.
fn arb_csv() -> impl Strategy<Value = String> {
    let cell = prop_oneof![
        6 => (-5_000i32..5_000).prop_map(|v| v.to_string()),
        1 => Just(String::new()),
        1 => Just("n/a".to_string()),
    ];
    proptest::collection::vec((0i64..4 * 24 * 60, cell.clone(), cell), 1..120).prop_map(|rows| {
        let origin = NaiveDate::from_ymd_opt(2024, 2, 27)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .unwrap();
        let mut text = String::from("Time,a,b\n");
        for (minute, a, b) in rows {
            let ts = origin + Duration::minutes(minute);
            text.push_str(&format!("{},{a},{b}\n", ts.format("%Y-%m-%d %H:%M")));
        }
        text
    })
}

proptest! {
    #[test]
    fn outputs_are_fixed_points(text in arb_csv()) {
        let n = TimeSeriesNormalizer::new();
        let first = n.normalize(text.as_bytes(), "in.csv").unwrap();

        let hourly = n.normalize(first.hourly.csv.as_bytes(), "h.csv").unwrap();
        prop_assert_eq!(&hourly.hourly.csv, &first.hourly.csv);

        let daily = n.normalize(first.daily.csv.as_bytes(), "d.csv").unwrap();
        prop_assert_eq!(&daily.daily.csv, &first.daily.csv);
    }

    #[test]
    fn grids_cover_first_to_last_bucket(text in arb_csv()) {
        let out = TimeSeriesNormalizer::new().normalize(text.as_bytes(), "in.csv").unwrap();
        for table in [&out.hourly.table, &out.daily.table] {
            let step = Duration::seconds(table.frequency.step_seconds());
            let ts: Vec<_> = table.timestamps().collect();
            prop_assert!(ts.windows(2).all(|w| w[1] - w[0] == step));
        }
        // header plus one line per grid point
        prop_assert_eq!(out.hourly.csv.lines().count(), out.hourly.table.len() + 1);
        prop_assert_eq!(out.daily.csv.lines().count(), out.daily.table.len() + 1);
    }

    #[test]
    fn batch_matches_individual_runs(a in arb_csv(), b in arb_csv()) {
        let n = TimeSeriesNormalizer::new();
        let report = n
            .batch()
            .file("a.csv", a.clone())
            .unwrap()
            .file("bad.csv", "Time,v\n")
            .unwrap()
            .file("b.csv", b.clone())
            .unwrap()
            .run()
            .unwrap();
        prop_assert_eq!(report.outputs.len(), 2);
        prop_assert_eq!(&report.outputs[0], &n.normalize(a.as_bytes(), "a.csv").unwrap());
        prop_assert_eq!(&report.outputs[1], &n.normalize(b.as_bytes(), "b.csv").unwrap());
    }
}
