//! Normalize the CSV files named on the command line and write the hourly and
//! daily artifacts next to each input.
//!
//! `RUST_LOG=tsgrid=debug cargo run -p tsgrid --features tracing --example normalize_files -- data/*.csv`
use std::path::{Path, PathBuf};

use tsgrid::TimeSeriesNormalizer;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tsgrid=info".into()),
        )
        .init();

    let paths: Vec<PathBuf> = std::env::args_os().skip(1).map(PathBuf::from).collect();
    if paths.is_empty() {
        eprintln!("usage: normalize_files <file.csv>...");
        std::process::exit(2);
    }

    let normalizer = TimeSeriesNormalizer::builder().preview_rows(5).build()?;
    let mut batch = normalizer.batch();
    for path in &paths {
        batch = batch.file(path.to_string_lossy(), std::fs::read(path)?)?;
    }
    let report = batch.run()?;

    for out in &report.outputs {
        let dir = Path::new(&out.name).parent().unwrap_or_else(|| Path::new(""));
        for freq in tsgrid::Frequency::ALL {
            let output = out.output(freq);
            let target = dir.join(Path::new(&output.file_name).file_name().unwrap_or_default());
            std::fs::write(&target, &output.csv)?;
            println!(
                "{} -> {} ({} rows)",
                out.name,
                target.display(),
                output.table.len()
            );
            let cfg = normalizer.config();
            print!("{}", output.table.render_preview(&cfg.time_header, cfg.preview_rows));
        }
        println!(
            "  {} rows read, {} duplicates dropped, {} empty hours",
            out.stats.rows_read, out.stats.duplicates_dropped, out.stats.empty_hourly_buckets
        );
    }

    if !report.warnings.is_empty() {
        eprintln!("warnings:");
        for w in &report.warnings {
            eprintln!("- {w}");
        }
    }

    Ok(())
}
