//! sparecast - fleet spare-parts & maintenance analytics CLI
//!
//! Offline batch tools over the analytics core: clean a raw inventory
//! export into a normalized master table, compute per-component MTBF from
//! the maintenance job log, and forecast monthly maintenance activity for
//! one component.
//!
//! # Usage
//!
//! ```bash
//! # Clean an inventory export (BARANG column) into a master table
//! sparecast classify --input pivot_master_barang.csv --output master.csv
//!
//! # Per-component MTBF from the job-report log
//! sparecast reliability --input jobs.csv --output mtbf.csv
//!
//! # Forecast one component's monthly activity (add --json for machine use)
//! sparecast forecast --input jobs.csv --component "Seawater Pump" --horizon 6
//! ```
//!
//! # Environment Variables
//!
//! - `SPARECAST_CONFIG`: Path to a TOML config overriding the built-in
//!   registries and forecast settings
//! - `RUST_LOG`: Logging level (default: info)

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;

use sparecast::{
    component_activity, compute_reliability, parse_events, Classifier, Config, Forecaster,
    RawJobRow,
};

#[derive(Parser)]
#[command(name = "sparecast", version, about = "Fleet spare-parts & maintenance analytics")]
struct Cli {
    /// Path to a TOML config file (defaults to ./sparecast.toml if present)
    #[arg(long, env = "SPARECAST_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Clean a raw inventory export into a normalized master table
    Classify {
        /// Input CSV with a BARANG description column
        #[arg(long)]
        input: PathBuf,
        /// Output CSV for the normalized master table
        #[arg(long)]
        output: PathBuf,
    },
    /// Compute per-component MTBF from the maintenance job log
    Reliability {
        /// Input CSV with VESSELID, COMPNAME, JOBREPORT_DATE columns
        #[arg(long)]
        input: PathBuf,
        /// Output CSV for the MTBF table
        #[arg(long)]
        output: PathBuf,
    },
    /// Forecast monthly maintenance activity for one component
    Forecast {
        /// Input CSV with VESSELID, COMPNAME, JOBREPORT_DATE columns
        #[arg(long)]
        input: PathBuf,
        /// Component name to forecast (exact match on COMPNAME)
        #[arg(long)]
        component: String,
        /// Forecast horizon in months
        #[arg(long, default_value_t = 3)]
        horizon: usize,
        /// Emit the full forecast as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Print the per-component yearly activity summary
    Summary {
        /// Input CSV with VESSELID, COMPNAME, JOBREPORT_DATE columns
        #[arg(long)]
        input: PathBuf,
        /// Emit the summary as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };

    match cli.command {
        Command::Classify { input, output } => run_classify(&config, &input, &output),
        Command::Reliability { input, output } => run_reliability(&input, &output),
        Command::Forecast {
            input,
            component,
            horizon,
            json,
        } => run_forecast(&config, &input, &component, horizon, json),
        Command::Summary { input, json } => run_summary(&input, json),
    }
}

/// Column the inventory export keeps raw descriptions in.
const DESCRIPTION_COLUMN: &str = "BARANG";

fn run_classify(config: &Config, input: &Path, output: &Path) -> Result<()> {
    let classifier = Classifier::from_config(config).context("compiling pattern registries")?;

    let mut reader = csv::Reader::from_path(input)
        .with_context(|| format!("opening input {}", input.display()))?;
    let headers = reader.headers().context("reading header row")?.clone();
    let description_idx = headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(DESCRIPTION_COLUMN))
        .with_context(|| format!("input has no {DESCRIPTION_COLUMN} column"))?;

    let mut writer = csv::Writer::from_path(output)
        .with_context(|| format!("creating output {}", output.display()))?;
    writer.write_record([
        "BARANG",
        "NAMA_BARANG_RAPIH",
        "KATEGORI",
        "MEREK",
        "SPESIFIKASI",
        "PART_NO",
    ])?;

    let mut rows = 0usize;
    for record in reader.records() {
        let record = record.context("reading input row")?;
        let description = record.get(description_idx).unwrap_or("");
        let item = classifier.classify(description);
        writer.write_record([
            description,
            item.canonical_name.as_str(),
            item.category.as_str(),
            item.brand.as_str(),
            item.specification.as_str(),
            item.part_number.as_str(),
        ])?;
        rows += 1;
    }
    writer.flush()?;

    info!(rows = rows, output = %output.display(), "master table written");
    Ok(())
}

fn run_reliability(input: &Path, output: &Path) -> Result<()> {
    let rows = read_job_rows(input)?;
    let parsed = parse_events(&rows);
    if parsed.rejected > 0 {
        info!(
            rejected = parsed.rejected,
            "rows excluded for unparseable report dates"
        );
    }

    let records = compute_reliability(&parsed.events);

    let mut writer = csv::Writer::from_path(output)
        .with_context(|| format!("creating output {}", output.display()))?;
    writer.write_record(["COMPNAME", "MTBF_HARI", "TOTAL_KEJADIAN_MTBF"])?;
    for record in records.values() {
        let mtbf = record
            .mean_interval_days
            .map(|d| format!("{d:.1}"))
            .unwrap_or_else(|| "-".to_string());
        let count = record.sample_count.to_string();
        writer.write_record([record.component_name.as_str(), mtbf.as_str(), count.as_str()])?;
    }
    writer.flush()?;

    info!(components = records.len(), output = %output.display(), "MTBF table written");
    Ok(())
}

fn run_forecast(
    config: &Config,
    input: &Path,
    component: &str,
    horizon: usize,
    json: bool,
) -> Result<()> {
    let max_horizon = config.forecast.max_horizon_months;
    if horizon == 0 || horizon > max_horizon {
        bail!("horizon must be between 1 and {max_horizon} months");
    }

    let rows = read_job_rows(input)?;
    let parsed = parse_events(&rows);

    let forecaster = Forecaster::from_config(config);
    let series = forecaster
        .forecast_component(component, &parsed.events, horizon)
        .with_context(|| format!("forecasting component {component:?}"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&series)?);
        return Ok(());
    }

    println!("Component: {}", series.component_name);
    println!(
        "History: {} months ({} to {})",
        series.history.len(),
        series.history.first().map(|c| c.month.format("%Y-%m").to_string()).unwrap_or_default(),
        series.history.last().map(|c| c.month.format("%Y-%m").to_string()).unwrap_or_default(),
    );
    println!(
        "Backtest: MAE={:.2} RMSE={:.2} normalized={}",
        series.backtest.mean_absolute_error,
        series.backtest.root_mean_squared_error,
        series
            .backtest
            .normalized_mae
            .map(|v| format!("{v:.2}"))
            .unwrap_or_else(|| "n/a".to_string()),
    );
    println!("Accuracy: {}", series.accuracy);
    println!();
    println!("{:<6} | {:>9} | {:>9} | {:>9}", "STEP", "FORECAST", "LOWER", "UPPER");
    for i in 0..series.predicted_counts.len() {
        println!(
            "{:<6} | {:>9.1} | {:>9.1} | {:>9.1}",
            i + 1,
            series.predicted_counts[i],
            series.lower_bound[i],
            series.upper_bound[i]
        );
    }
    Ok(())
}

fn run_summary(input: &Path, json: bool) -> Result<()> {
    let rows = read_job_rows(input)?;
    let parsed = parse_events(&rows);
    let activities = component_activity(&parsed.events);

    if json {
        println!("{}", serde_json::to_string_pretty(&activities)?);
        return Ok(());
    }

    println!("{:<40} | {:>7} | {:>7} | TREND", "COMPONENT", "TOTAL", "DELTA");
    for activity in &activities {
        println!(
            "{:<40} | {:>7} | {:>+7} | {}",
            truncate(&activity.component_name, 40),
            activity.total,
            activity.trend_delta,
            activity.trend,
        );
    }
    Ok(())
}

/// Read the job-report export. Column names match the fleet's maintenance
/// system export and are part of the round-trip contract.
fn read_job_rows(input: &Path) -> Result<Vec<RawJobRow>> {
    let mut reader = csv::Reader::from_path(input)
        .with_context(|| format!("opening input {}", input.display()))?;
    let headers = reader.headers().context("reading header row")?.clone();

    let find = |name: &str| -> Result<usize> {
        headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
            .with_context(|| format!("input has no {name} column"))
    };
    let vessel_idx = find("VESSELID")?;
    let comp_idx = find("COMPNAME")?;
    let date_idx = find("JOBREPORT_DATE")?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.context("reading input row")?;
        rows.push(RawJobRow {
            asset_id: record.get(vessel_idx).unwrap_or("").to_string(),
            component_name: record.get(comp_idx).unwrap_or("").to_string(),
            report_date: record.get(date_idx).unwrap_or("").to_string(),
        });
    }
    Ok(rows)
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
