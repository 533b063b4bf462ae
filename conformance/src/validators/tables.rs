//! Regression tables.
//!
//! A table is a whitespace-delimited text file named `<SHORT_NAME>.txt`.
//! Lines starting with `#` are comments and a line whose first field is
//! `IM` is a header. Every other line holds eleven fields:
//!
//! ```text
//! IM PERIOD MAG DIST VS30 RAKE DEPTH REGION SITE MEDIAN SIGMA
//! ```
//!
//! `DIST` is in the family's own distance metric, `PERIOD` is read only for
//! `SA` and `RAKE` may be `NaN` for an unspecified mechanism. `REGION` is one
//! of `crust`, `stable`, `interface`, `slab` or `volcanic`. `REGION` and
//! `SITE` are `-` for the family default. `MEDIAN` is `exp(mean)` in the
//! measure's native units and `SIGMA` is the total standard deviation.
//!
//! Every registered family must have a table.

use std::path::Path;

use anyhow::{Context, Result};
use gmpe::imr::{
    registry, Distance, GmInput, GroundMotionModel, ImType, IntensityMeasure, SiteType, StdDevType,
};
use gmpe::rupture::TectonicRegion;
use thiserror::Error;
use walkdir::WalkDir;

use crate::report::{ConformanceReport, TestResult};

const VALIDATOR: &str = "imr/tables";

/// Relative tolerance on medians.
pub const MEDIAN_RTOL: f64 = 1e-4;
/// Absolute tolerance on sigmas.
pub const SIGMA_ATOL: f64 = 1e-5;

const COLUMNS: [&str; 11] = [
    "IM", "PERIOD", "MAG", "DIST", "VS30", "RAKE", "DEPTH", "REGION", "SITE", "MEDIAN", "SIGMA",
];

/// A malformed table line.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TableError {
    /// Wrong number of fields.
    #[error("line {line}: expected {} fields, found {found}", COLUMNS.len())]
    Columns {
        /// 1-based line number.
        line: usize,
        /// Fields present.
        found: usize,
    },
    /// A numeric field did not parse.
    #[error("line {line}: {column} is not a number: {text:?}")]
    Number {
        /// 1-based line number.
        line: usize,
        /// Column name.
        column: &'static str,
        /// Offending text.
        text: String,
    },
    /// Unknown intensity-measure name.
    #[error("line {line}: unknown intensity measure {name:?}")]
    Measure {
        /// 1-based line number.
        line: usize,
        /// Offending name.
        name: String,
    },
    /// Unknown site-type name.
    #[error("line {line}: unknown site type {name:?}")]
    SiteType {
        /// 1-based line number.
        line: usize,
        /// Offending name.
        name: String,
    },
    /// Unknown tectonic-region code.
    #[error("line {line}: unknown tectonic region {code:?}")]
    Region {
        /// 1-based line number.
        line: usize,
        /// Offending code.
        code: String,
    },
}

/// One expected evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    /// 1-based line number in the source file.
    pub line: usize,
    /// Measure to evaluate.
    pub im: IntensityMeasure,
    /// Moment magnitude.
    pub magnitude: f64,
    /// Distance in km, in the family's metric.
    pub distance_km: f64,
    /// Vs30 in m/s.
    pub vs30: f64,
    /// Rake in degrees.
    pub rake: f64,
    /// Hypocentral depth in km.
    pub depth: f64,
    /// Tectonic region, `None` for the family's first.
    pub tectonic: Option<TectonicRegion>,
    /// Categorical site type, `None` for the default.
    pub site_type: Option<SiteType>,
    /// Expected `exp(mean)`.
    pub median: f64,
    /// Expected total sigma.
    pub sigma: f64,
}

impl TableRow {
    fn input(&self, model: &dyn GroundMotionModel) -> GmInput {
        let info = model.info();
        let mut input = GmInput::new(self.magnitude, Distance::new(info.distance_metric, self.distance_km))
            .with_vs30(self.vs30)
            .with_rake(self.rake)
            .with_depth(self.depth);
        if let Some(t) = self.site_type {
            input = input.with_site_type(t);
        }
        if let Some(tectonic) = self.tectonic.or_else(|| info.tectonic_regions.first().copied()) {
            input = input.with_tectonic(tectonic);
        }
        input
    }
}

fn region_from_code(code: &str) -> Option<TectonicRegion> {
    match code {
        "crust" => Some(TectonicRegion::ActiveShallow),
        "stable" => Some(TectonicRegion::StableShallow),
        "interface" => Some(TectonicRegion::SubductionInterface),
        "slab" => Some(TectonicRegion::SubductionSlab),
        "volcanic" => Some(TectonicRegion::Volcanic),
        _ => None,
    }
}

/// Parses a table.
///
/// # Errors
///
/// Returns the first [`TableError`] in file order.
pub fn parse_table(text: &str) -> Result<Vec<TableRow>, TableError> {
    let mut rows = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let fields: Vec<&str> = trimmed.split_whitespace().collect();
        if fields[0] == COLUMNS[0] {
            continue;
        }
        if fields.len() != COLUMNS.len() {
            return Err(TableError::Columns {
                line,
                found: fields.len(),
            });
        }
        let number = |i: usize| -> Result<f64, TableError> {
            fields[i].parse().map_err(|_| TableError::Number {
                line,
                column: COLUMNS[i],
                text: fields[i].to_string(),
            })
        };
        let period = number(1)?;
        let im = match ImType::from_name(fields[0]) {
            Some(ImType::Pga) => IntensityMeasure::Pga,
            Some(ImType::Pgv) => IntensityMeasure::Pgv,
            Some(ImType::AriasIntensity) => IntensityMeasure::AriasIntensity,
            Some(ImType::Sa) => IntensityMeasure::Sa(period),
            Some(ImType::Mmi) | None => {
                return Err(TableError::Measure {
                    line,
                    name: fields[0].to_string(),
                })
            }
        };
        let tectonic = match fields[7] {
            "-" => None,
            code => Some(region_from_code(code).ok_or_else(|| TableError::Region {
                line,
                code: code.to_string(),
            })?),
        };
        let site_type = match fields[8] {
            "-" => None,
            name => Some(SiteType::from_name(name).ok_or_else(|| TableError::SiteType {
                line,
                name: name.to_string(),
            })?),
        };
        rows.push(TableRow {
            line,
            im,
            magnitude: number(2)?,
            distance_km: number(3)?,
            vs30: number(4)?,
            rake: number(5)?,
            depth: number(6)?,
            tectonic,
            site_type,
            median: number(9)?,
            sigma: number(10)?,
        });
    }
    Ok(rows)
}

/// Rows `model` fails to reproduce, one description each.
#[must_use]
pub fn mismatches(model: &dyn GroundMotionModel, rows: &[TableRow]) -> Vec<String> {
    let mut out = Vec::new();
    for row in rows {
        let input = row.input(model);
        let got = model.mean(row.im, &input).and_then(|mean| {
            model
                .std_dev(row.im, &input, StdDevType::Total)
                .map(|sigma| (mean.exp(), sigma))
        });
        match got {
            Ok((median, sigma)) => {
                if ((median - row.median) / row.median).abs() > MEDIAN_RTOL {
                    out.push(format!("line {}: median {median:.6e}, expected {:.6e}", row.line, row.median));
                }
                if (sigma - row.sigma).abs() > SIGMA_ATOL {
                    out.push(format!("line {}: sigma {sigma:.6}, expected {:.6}", row.line, row.sigma));
                }
            }
            Err(e) => out.push(format!("line {}: {e}", row.line)),
        }
    }
    out
}

/// Checks the table `text` for the family registered as `short_name`.
#[must_use]
pub fn check_table(short_name: &str, text: &str) -> TestResult {
    let Ok(model) = registry::model_by_short_name(short_name) else {
        return TestResult::warn(VALIDATOR, format!("{short_name}: no registered family, table skipped"));
    };
    let rows = match parse_table(text) {
        Ok(rows) => rows,
        Err(e) => return TestResult::fail(VALIDATOR, format!("{short_name}: {e}")),
    };
    if rows.is_empty() {
        return TestResult::warn(VALIDATOR, format!("{short_name}: table has no rows"));
    }
    TestResult::from_failures(
        VALIDATOR,
        format!("{short_name}: {} rows reproduced", rows.len()),
        format!("{short_name}: regression table mismatch"),
        mismatches(model.as_ref(), &rows),
    )
}

/// Checks every `*.txt` table directly under `dir`, in file-name order,
/// then fails once for each registered family without a table.
///
/// # Errors
///
/// Returns an error if a table file cannot be read.
pub fn validate(dir: &Path) -> Result<ConformanceReport> {
    let mut report = ConformanceReport::new();
    if !dir.is_dir() {
        report.push(TestResult::warn(
            VALIDATOR,
            format!("Table directory {} not found", dir.display()),
        ));
        return Ok(report);
    }

    let mut covered = Vec::new();
    for entry in WalkDir::new(dir)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && e.path().extension().is_some_and(|x| x == "txt"))
    {
        let path = entry.path();
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        tracing::debug!(table = %path.display(), "checking regression table");
        report.push(check_table(stem, &text));
        covered.push(stem.to_string());
    }

    if report.results.is_empty() {
        report.push(TestResult::warn(
            VALIDATOR,
            format!("No tables under {}", dir.display()),
        ));
    }
    let missing: Vec<String> = registry::all_models()
        .iter()
        .map(|m| m.info().short_name)
        .filter(|name| !covered.iter().any(|c| c == name))
        .map(|name| format!("{name}: no {name}.txt under {}", dir.display()))
        .collect();
    if !missing.is_empty() {
        report.push(TestResult::fail_with_details(
            VALIDATOR,
            "Registered families without a regression table",
            missing,
        ));
    }
    Ok(report)
}
