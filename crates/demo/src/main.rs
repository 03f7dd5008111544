// File: crates/demo/src/main.rs
// Summary: Demo loads pressure readings from CSV (or synthesizes them), sizes a threshold from a
// viewport width, downsamples with LTTB and writes the reduced `ms,pressure` series.

use anyhow::{Context, Result};
use chart_downsample::{downsample_measurements, DownsampleConfig, FixedWidth, Measurement};
use chrono::{DateTime, Duration, TimeZone, Utc};
use clap::Parser;
use serde::Serialize;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Width assumed when neither `--threshold` nor `--width` is given.
const DEFAULT_VIEWPORT_WIDTH: u32 = 1024;
const DEFAULT_SYNTHETIC_POINTS: usize = 100_000;

#[derive(Parser, Debug)]
#[command(name = "downsample-demo", about = "Downsample a pressure time series for charting (LTTB)")]
struct Args {
    /// CSV with a timestamp column and a pressure column. Omit to synthesize readings.
    #[arg(short, long, value_name = "PATH")]
    input: Option<PathBuf>,
    /// Output CSV [default: target/out/<input stem>_downsampled.csv].
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,
    /// Target point count; overrides the viewport-derived threshold.
    #[arg(short, long, conflicts_with = "width")]
    threshold: Option<usize>,
    /// Viewport width in pixels used to pick the threshold.
    #[arg(short, long, value_name = "PX")]
    width: Option<u32>,
    /// TOML file overriding the width breakpoints (`[[breakpoints]] min_width = .. threshold = ..`).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Number of synthetic readings when no input is given.
    #[arg(long, value_name = "N", default_value_t = DEFAULT_SYNTHETIC_POINTS)]
    synthetic: usize,
}

#[derive(Serialize)]
struct SampleRow {
    ms: i64,
    pressure: f64,
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path).with_context(|| format!("failed to load config '{}'", path.display()))?,
        None => DownsampleConfig::default(),
    };

    let records = match &args.input {
        Some(path) => load_measurements_csv(path)
            .with_context(|| format!("failed to load CSV '{}'", path.display()))?,
        None => {
            info!(points = args.synthetic, "no input given; synthesizing readings");
            synthesize(args.synthetic)?
        }
    };
    if records.is_empty() {
        anyhow::bail!("no measurements loaded; check the timestamp/pressure headers");
    }

    let threshold = match args.threshold {
        Some(t) => t,
        None => config.optimal_threshold(args.width, &FixedWidth(DEFAULT_VIEWPORT_WIDTH)),
    };
    info!(records = records.len(), threshold, "downsampling");

    let out = downsample_measurements(&records, threshold)?;
    let stats = out.stats;
    info!(
        original = stats.original_count,
        downsampled = stats.downsampled_count,
        reduction = %format!("{:.2}%", stats.reduction_percent),
        elapsed_ms = %format!("{:.3}", stats.execution_time_ms()),
        downsampled_run = stats.was_downsampled,
        "done"
    );

    let out_path = args
        .output
        .clone()
        .unwrap_or_else(|| out_name_for(args.input.as_deref()));
    write_samples_csv(&out_path, &out.data)
        .with_context(|| format!("failed to write '{}'", out_path.display()))?;
    info!(path = %out_path.display(), "wrote downsampled series");
    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("downsample_demo=info,chart_downsample=warn"));
    let ansi = std::io::stderr().is_terminal();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(ansi)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn load_config(path: &Path) -> Result<DownsampleConfig> {
    let raw = std::fs::read_to_string(path)?;
    let config: DownsampleConfig = toml::from_str(&raw)?;
    config.validate()?;
    Ok(config)
}

/// Produce output file name like target/out/<stem>_downsampled.csv
fn out_name_for(input: Option<&Path>) -> PathBuf {
    let stem = input
        .and_then(|p| p.file_stem())
        .and_then(|s| s.to_str())
        .unwrap_or("synthetic");
    PathBuf::from("target/out").join(format!("{stem}_downsampled.csv"))
}

/// Load `timestamp,pressure`-like CSV into measurements. Header names are matched
/// case-insensitively; rows with unparseable cells are skipped.
fn load_measurements_csv(path: &Path) -> Result<Vec<Measurement>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let headers = rdr
        .headers()?
        .iter()
        .map(|h| h.to_lowercase())
        .collect::<Vec<_>>();
    let idx = |names: &[&str]| headers.iter().position(|h| names.contains(&h.as_str()));

    let i_time = idx(&["timestamp", "time", "datetime", "date", "ts"])
        .with_context(|| format!("no timestamp column in {headers:?}"))?;
    let i_pressure = idx(&["pressure", "value", "p"])
        .with_context(|| format!("no pressure column in {headers:?}"))?;

    let mut out = Vec::new();
    let mut skipped = 0usize;
    for rec in rdr.records() {
        let rec = rec?;
        let timestamp = rec.get(i_time).and_then(parse_timestamp);
        let pressure = rec.get(i_pressure).and_then(|s| s.parse::<f64>().ok());
        match (timestamp, pressure) {
            (Some(timestamp), Some(pressure)) => out.push(Measurement::new(timestamp, pressure)),
            _ => skipped += 1,
        }
    }
    if skipped > 0 {
        warn!(skipped, "rows with unparseable timestamp or pressure were skipped");
    }
    // LTTB expects x in order; CSV exports are not always sorted.
    out.sort_by_key(|m| m.timestamp);
    Ok(out)
}

/// RFC 3339, or integer epoch (milliseconds above 10^12, seconds otherwise).
fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    let n = s.parse::<i64>().ok()?;
    if n > 10_i64.pow(12) {
        DateTime::<Utc>::from_timestamp_millis(n)
    } else {
        DateTime::<Utc>::from_timestamp(n, 0)
    }
}

fn write_samples_csv(path: &Path, samples: &[(f64, f64)]) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }
    let mut wtr = csv::Writer::from_path(path)?;
    for &(ms, pressure) in samples {
        wtr.serialize(SampleRow { ms: ms as i64, pressure })?;
    }
    wtr.flush()?;
    Ok(())
}

/// Slow drift plus a faster oscillation and a deterministic ripple, one reading per second.
fn synthesize(n: usize) -> Result<Vec<Measurement>> {
    let start = Utc
        .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .context("invalid synthetic start time")?;
    Ok((0..n)
        .map(|i| {
            let t = i as f64;
            let ripple = ((i * 7919) % 97) as f64 / 97.0 - 0.5;
            let pressure = 1013.25 + (t * 0.0005).sin() * 6.0 + (t * 0.09).sin() * 0.8 + ripple * 0.3;
            Measurement::new(start + Duration::seconds(i as i64), pressure)
        })
        .collect())
}
