//! `gmpe-eval`: lists the registered relationships or evaluates one.
//!
//! **Usage:**
//! ```text
//! gmpe-eval list
//! gmpe-eval eval --model BJF_1997 --im SA --period 1.0 --mag 6.5 --distance 10 [--vs30 760]
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use gmpe::imr::{registry, Distance, GmInput, ImType, IntensityMeasure, SiteType, StdDevType};

/// Query attenuation relationships directly.
#[derive(Parser)]
#[command(name = "gmpe-eval", about = "List or evaluate attenuation relationships")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every registered family with its measures and distance metric.
    List,

    /// Evaluate one family for explicit inputs.
    Eval {
        /// Family short name.
        #[arg(long)]
        model: String,

        /// Intensity measure (PGA, PGV, SA, IA).
        #[arg(long, default_value = "PGA")]
        im: String,

        /// SA period in seconds.
        #[arg(long)]
        period: Option<f64>,

        /// Moment magnitude.
        #[arg(long)]
        mag: f64,

        /// Distance in km, in the family's own metric.
        #[arg(long)]
        distance: f64,

        /// Vs30 in m/s.
        #[arg(long, default_value_t = 760.0)]
        vs30: f64,

        /// Rake in degrees.
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        rake: f64,

        /// Hypocentral depth in km.
        #[arg(long, default_value_t = 10.0)]
        depth: f64,

        /// Categorical site type.
        #[arg(long)]
        site_type: Option<String>,

        /// Std-dev type (Total, Inter-Event, Intra-Event, "None (zero)").
        #[arg(long, default_value = "Total")]
        std_dev_type: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt().with_env_filter(log_level).init();

    match cli.command {
        Commands::List => list(),
        Commands::Eval {
            model,
            im,
            period,
            mag,
            distance,
            vs30,
            rake,
            depth,
            site_type,
            std_dev_type,
        } => {
            let model = registry::model_by_short_name(&model)?;
            let info = model.info();
            let im = parse_measure(&im, period)?;
            let kind = StdDevType::from_name(&std_dev_type)
                .ok_or_else(|| anyhow!("unknown std-dev type: {std_dev_type}"))?;

            let mut input = GmInput::new(mag, Distance::new(info.distance_metric, distance))
                .with_vs30(vs30)
                .with_rake(rake)
                .with_depth(depth);
            if let Some(&tectonic) = info.tectonic_regions.first() {
                input = input.with_tectonic(tectonic);
            }
            if let Some(name) = site_type {
                let t = SiteType::from_name(&name).ok_or_else(|| anyhow!("unknown site type: {name}"))?;
                input = input.with_site_type(t);
            }

            let mean = model
                .mean(im, &input)
                .with_context(|| format!("{} rejected {im}", info.short_name))?;
            let sigma = model.std_dev(im, &input, kind)?;
            println!("{} {im}, {} {distance} km", info.short_name, info.distance_metric);
            println!("  ln mean  {mean:.6}");
            println!("  median   {:.6e} {}", mean.exp(), im.units());
            println!("  sigma    {sigma:.6} ({})", kind.name());
            Ok(())
        }
    }
}

fn list() -> Result<()> {
    for model in registry::all_models() {
        let info = model.info();
        let measures: Vec<&str> = info.measures.iter().map(|m| m.name()).collect();
        println!("{:<14} {:<34} {:<22} {}", info.short_name, info.name, info.distance_metric.name(), measures.join(","));
        let periods = model.supported_periods();
        if !periods.is_empty() {
            let periods: Vec<String> = periods.iter().map(f64::to_string).collect();
            println!("{:<14} SA periods: {}", "", periods.join(" "));
        }
    }
    Ok(())
}

fn parse_measure(name: &str, period: Option<f64>) -> Result<IntensityMeasure> {
    match (ImType::from_name(name), period) {
        (Some(ImType::Pga), _) => Ok(IntensityMeasure::Pga),
        (Some(ImType::Pgv), _) => Ok(IntensityMeasure::Pgv),
        (Some(ImType::AriasIntensity), _) => Ok(IntensityMeasure::AriasIntensity),
        (Some(ImType::Sa), Some(p)) => Ok(IntensityMeasure::Sa(p)),
        (Some(ImType::Sa), None) => Err(anyhow!("SA requires --period")),
        _ => Err(anyhow!("no family predicts {name}")),
    }
}
