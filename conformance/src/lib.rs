//! GMPE conformance suite.
//!
//! Runs every registered attenuation relationship through the checks a
//! hazard code relies on and collects the outcomes in a
//! [`ConformanceReport`].
//!
//! # Conformance Scope
//!
//! | Validator | Checks |
//! |-----------|--------|
//! | `imr/interface` | Stateful and stateless calls agree, foreign distance metrics and untabulated periods are rejected |
//! | `imr/sigma` | Total sigma equals `sqrt(inter² + intra²)` where derived, and is positive |
//! | `imr/tables` | Medians and sigmas reproduce the regression tables under `tables/` |
//! | `calc/hazard` | Every family yields a monotonic hazard curve |
//!
//! # Entry Point
//!
//! ```no_run
//! use gmpe_conformance::{run_all, ConformancePaths};
//! use std::path::PathBuf;
//!
//! let paths = ConformancePaths {
//!     tables: PathBuf::from("conformance/tables"),
//! };
//! let report = run_all(&paths).expect("conformance run");
//! assert!(report.all_passed());
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

pub mod report;
pub mod validators;

pub use report::{ConformanceReport, Severity, TestResult};

use std::path::PathBuf;

/// Inputs the conformance runner reads from disk.
#[derive(Debug, Clone)]
pub struct ConformancePaths {
    /// Directory of `<SHORT_NAME>.txt` regression tables.
    pub tables: PathBuf,
}

/// Runs all validators and returns the aggregated report.
///
/// Validators run in this order:
/// 1. Interface uniformity
/// 2. Sigma decomposition
/// 3. Regression tables
/// 4. Hazard-curve monotonicity
///
/// # Errors
///
/// Returns an error only if a table file cannot be read. Malformed tables
/// and mismatching values are reported as failures.
pub fn run_all(paths: &ConformancePaths) -> anyhow::Result<ConformanceReport> {
    let mut report = ConformanceReport::new();

    report.extend(validators::interface::validate());
    report.extend(validators::sigma::validate());
    report.extend(validators::tables::validate(&paths.tables)?);
    report.extend(validators::hazard::validate());

    tracing::info!(
        results = report.results.len(),
        failures = report.failure_count(),
        "conformance run finished"
    );
    Ok(report)
}

#[cfg(test)]
mod tests_unit {
    use super::*;

    fn failures(report: &ConformanceReport) -> Vec<&TestResult> {
        report.results.iter().filter(|r| r.is_failure()).collect()
    }

    #[test]
    fn interface_passes() {
        let report = validators::interface::validate();
        assert!(failures(&report).is_empty(), "{:#?}", failures(&report));
    }

    #[test]
    fn sigma_passes() {
        let report = validators::sigma::validate();
        assert!(failures(&report).is_empty(), "{:#?}", failures(&report));
    }

    #[test]
    fn bundled_tables_pass() {
        let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tables");
        let report = validators::tables::validate(&dir).unwrap();
        assert!(failures(&report).is_empty(), "{:#?}", failures(&report));
        assert_eq!(report.count(Severity::Pass), gmpe::imr::registry::all_models().len());
    }

    #[test]
    fn hazard_passes() {
        let report = validators::hazard::validate();
        assert!(failures(&report).is_empty(), "{:#?}", failures(&report));
    }
}
