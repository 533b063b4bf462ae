//! Coefficient-table rows and exact-period lookup.
//!
//! Families never interpolate between periods. A request for SA must name a
//! tabulated period to within [`PERIOD_TOLERANCE`]; callers that want to snap
//! an arbitrary period use [`nearest_period`] first.

use super::{ImrError, IntensityMeasure};

/// Maximum difference, in seconds, for an SA period to match a table row.
pub const PERIOD_TOLERANCE: f64 = 1e-6;

/// One coefficient row, keyed by the measure it predicts.
#[derive(Debug, Clone, Copy)]
pub struct Row<C> {
    /// Measure this row applies to.
    pub im: IntensityMeasure,
    /// Coefficients.
    pub c: C,
}

impl<C> Row<C> {
    fn matches(&self, im: IntensityMeasure) -> bool {
        match (self.im, im) {
            (IntensityMeasure::Sa(a), IntensityMeasure::Sa(b)) => (a - b).abs() <= PERIOD_TOLERANCE,
            (a, b) => a == b,
        }
    }
}

/// Finds the row for `im`.
///
/// # Errors
///
/// Returns [`ImrError::UnsupportedSelection`] if no row matches.
pub fn lookup<C>(family: &'static str, rows: &'static [Row<C>], im: IntensityMeasure) -> Result<&'static C, ImrError> {
    rows.iter()
        .find(|r| r.matches(im))
        .map(|r| &r.c)
        .ok_or_else(|| ImrError::unsupported(family, "intensity measure", im))
}

/// Tabulated SA periods in ascending order.
#[must_use]
pub fn sa_periods<C>(rows: &[Row<C>]) -> Vec<f64> {
    let mut periods: Vec<f64> = rows.iter().filter_map(|r| r.im.period()).collect();
    periods.sort_by(f64::total_cmp);
    periods
}

/// The tabulated period closest to `target`; ties go to the shorter period.
#[must_use]
pub fn nearest_period(periods: &[f64], target: f64) -> Option<f64> {
    if target.is_nan() {
        return None;
    }
    periods
        .iter()
        .copied()
        .min_by(|a, b| (a - target).abs().total_cmp(&(b - target).abs()).then(a.total_cmp(b)))
}

#[cfg(test)]
mod tests {
    use super::*;

    static ROWS: [Row<u8>; 3] = [
        Row { im: IntensityMeasure::Pga, c: 0 },
        Row { im: IntensityMeasure::Sa(1.0), c: 2 },
        Row { im: IntensityMeasure::Sa(0.2), c: 1 },
    ];

    #[test]
    fn exact_lookup() {
        assert_eq!(*lookup("T", &ROWS, IntensityMeasure::Pga).unwrap(), 0);
        assert_eq!(*lookup("T", &ROWS, IntensityMeasure::Sa(0.2 + 1e-9)).unwrap(), 1);
        assert!(lookup("T", &ROWS, IntensityMeasure::Sa(0.3)).is_err());
        assert!(lookup("T", &ROWS, IntensityMeasure::Pgv).is_err());
    }

    #[test]
    fn periods_sorted() {
        assert_eq!(sa_periods(&ROWS), vec![0.2, 1.0]);
    }

    #[test]
    fn nearest() {
        let p = [0.1, 0.2, 0.5, 1.0];
        assert_eq!(nearest_period(&p, 0.31), Some(0.2));
        assert_eq!(nearest_period(&p, 0.4), Some(0.5));
        assert_eq!(nearest_period(&p, 0.15), Some(0.1));
        assert_eq!(nearest_period(&p, 7.0), Some(1.0));
        assert_eq!(nearest_period(&[], 1.0), None);
        assert_eq!(nearest_period(&p, f64::NAN), None);
    }
}
