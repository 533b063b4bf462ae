//! `gmpe-conformance`: runs the GMPE conformance suite.
//!
//! Checks every registered attenuation relationship for interface
//! uniformity, sigma consistency, agreement with the regression tables and
//! sane hazard curves.
//!
//! **Usage:**
//! ```text
//! gmpe-conformance [--tables <path>] [-v]
//! ```
//!
//! Exits non-zero if any conformance check fails.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use gmpe_conformance::{run_all, ConformancePaths, Severity};

/// Run the GMPE conformance suite.
#[derive(Parser)]
#[command(name = "gmpe-conformance", about = "Validate every registered attenuation relationship")]
struct Args {
    /// Directory of `<SHORT_NAME>.txt` regression tables.
    #[arg(long, default_value = "conformance/tables")]
    tables: PathBuf,

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

    let paths = ConformancePaths { tables: args.tables };
    let report = run_all(&paths).context("Failed to run conformance suite")?;

    println!("GMPE Conformance Report");
    println!("=======================");
    println!();

    for result in &report.results {
        println!("{} {} — {}", result.severity, result.validator, result.message);
        for detail in &result.details {
            println!("       {detail}");
        }
    }

    let failed = report.count(Severity::Failure);
    println!();
    println!(
        "Summary: {} passed, {} warnings, {} failed",
        report.count(Severity::Pass),
        report.count(Severity::Warning),
        failed
    );

    if failed > 0 {
        eprintln!("Conformance FAILED: {failed} check(s) did not pass.");
        process::exit(1);
    }

    println!("Conformance PASSED.");
    Ok(())
}
