//! `gmpe-hazard`: computes a hazard curve from a TOML run file.
//!
//! **Usage:**
//! ```text
//! gmpe-hazard <CONFIG> [--json] [-v]
//! ```
//!
//! Prints one `IML  P(exceed)` line per level, or a JSON document with
//! `--json`.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use gmpe::config::HazardConfig;

/// Compute a single-site hazard curve.
#[derive(Parser)]
#[command(name = "gmpe-hazard", about = "Compute a hazard curve from a TOML run file")]
struct Args {
    /// Run file.
    config: PathBuf,

    /// Emit JSON instead of a table.
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt().with_env_filter(log_level).init();

    let config = HazardConfig::from_path(&args.config)
        .with_context(|| format!("Failed to load run file: {}", args.config.display()))?;
    let site = config.build_site();
    let forecast = config.build_forecast().context("Invalid source definition")?;
    let mut imr = config.build_imr().context("Invalid relationship selection")?;
    let calculator = config.build_calculator()?;
    tracing::info!(
        sources = forecast.sources().len(),
        ruptures = forecast.num_ruptures(),
        "forecast built"
    );

    let curve = calculator
        .compute(&config.curve_imls(), &site, &forecast, &mut imr)
        .context("Hazard calculation failed")?;

    if args.json {
        let doc = serde_json::json!({
            "imr": imr.info().short_name,
            "intensity_measure": imr.intensity_measure().to_string(),
            "units": imr.intensity_measure().units(),
            "site": { "lat": config.site.lat, "lon": config.site.lon, "name": config.site.name },
            "duration_years": forecast.duration_years(),
            "curve": curve,
        });
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }

    println!(
        "{} {} ({}), {} years",
        imr.info().short_name,
        imr.intensity_measure(),
        imr.intensity_measure().units(),
        forecast.duration_years()
    );
    println!("{:>12}  {:>12}", "IML", "P(exceed)");
    for (iml, p) in curve.points() {
        println!("{iml:>12.5}  {p:>12.5e}");
    }
    Ok(())
}
