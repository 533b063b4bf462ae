//! Probability of exceedance under a (possibly truncated) lognormal.

use core::f64::consts::FRAC_1_SQRT_2;

use super::ImrError;

/// Truncation of the residual distribution, in units of sigma.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SigmaTruncation {
    /// No truncation.
    #[default]
    None,
    /// Residuals above `+level` σ are impossible.
    Upper(f64),
    /// Residuals outside `±level` σ are impossible.
    TwoSided(f64),
}

impl SigmaTruncation {
    /// Rejects a non-positive or NaN level.
    ///
    /// # Errors
    ///
    /// Returns [`ImrError::InvalidParameterValue`].
    pub fn validate(self) -> Result<Self, ImrError> {
        match self {
            Self::Upper(level) | Self::TwoSided(level) if level.is_nan() || level <= 0.0 => {
                Err(ImrError::InvalidParameterValue {
                    name: "Truncation Level",
                    value: level,
                    reason: "must be positive".to_string(),
                })
            }
            ok => Ok(ok),
        }
    }
}

/// Upper-tail probability of the standard normal, `1 − Φ(z)`.
#[inline]
#[must_use]
pub fn normal_survival(z: f64) -> f64 {
    0.5 * libm::erfc(z * FRAC_1_SQRT_2)
}

/// Standard normal CDF `Φ(z)`.
#[inline]
#[must_use]
pub fn normal_cdf(z: f64) -> f64 {
    0.5 * libm::erfc(-z * FRAC_1_SQRT_2)
}

/// Rejects intensity levels whose logarithm is outside
/// `[ln(f64::MIN_POSITIVE), ln(f64::MAX)]`.
///
/// # Errors
///
/// Returns [`ImrError::InvalidParameterValue`].
pub fn check_iml(iml: f64) -> Result<f64, ImrError> {
    if iml.is_nan() || iml < f64::MIN_POSITIVE || iml > f64::MAX {
        return Err(ImrError::InvalidParameterValue {
            name: "Intensity Measure Level",
            value: iml,
            reason: "ln(iml) must lie in [ln(f64::MIN_POSITIVE), ln(f64::MAX)]".to_string(),
        });
    }
    Ok(iml.ln())
}

/// `P(ln Y > ln_iml)` for `ln Y ~ N(mean, sigma²)` truncated as requested.
///
/// A zero sigma gives a step: `1` below the mean, `0` at or above it.
#[must_use]
pub fn exceedance_probability(mean: f64, sigma: f64, ln_iml: f64, truncation: SigmaTruncation) -> f64 {
    if sigma == 0.0 {
        return if ln_iml < mean { 1.0 } else { 0.0 };
    }
    let z = (ln_iml - mean) / sigma;
    match truncation {
        SigmaTruncation::None => normal_survival(z),
        SigmaTruncation::Upper(n) => {
            if z >= n {
                return 0.0;
            }
            let tail = normal_survival(n);
            ((normal_survival(z) - tail) / (1.0 - tail)).clamp(0.0, 1.0)
        }
        SigmaTruncation::TwoSided(n) => {
            if z >= n {
                return 0.0;
            }
            if z <= -n {
                return 1.0;
            }
            let tail = normal_survival(n);
            ((normal_survival(z) - tail) / (1.0 - 2.0 * tail)).clamp(0.0, 1.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_normal_values() {
        assert!((normal_cdf(0.0) - 0.5).abs() < 1e-15);
        assert!((normal_cdf(1.0) - 0.841_344_746_068_542_9).abs() < 1e-12);
        assert!((normal_survival(1.959_963_984_540_054) - 0.025).abs() < 1e-12);
    }

    #[test]
    fn median_is_half() {
        let p = exceedance_probability(-1.0, 0.5, -1.0, SigmaTruncation::None);
        assert!((p - 0.5).abs() < 1e-15);
    }

    #[test]
    fn truncation_zeroes_tails() {
        let upper = SigmaTruncation::Upper(3.0);
        assert_eq!(exceedance_probability(0.0, 1.0, 3.0, upper), 0.0);
        assert!(exceedance_probability(0.0, 1.0, 2.9, upper) > 0.0);
        let two = SigmaTruncation::TwoSided(2.0);
        assert_eq!(exceedance_probability(0.0, 1.0, -2.5, two), 1.0);
        assert!((exceedance_probability(0.0, 1.0, 0.0, two) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn zero_sigma_is_a_step() {
        assert_eq!(exceedance_probability(0.0, 0.0, -0.1, SigmaTruncation::None), 1.0);
        assert_eq!(exceedance_probability(0.0, 0.0, 0.0, SigmaTruncation::None), 0.0);
    }

    #[test]
    fn iml_bounds() {
        assert!(check_iml(0.0).is_err());
        assert!(check_iml(f64::INFINITY).is_err());
        assert!(check_iml(f64::NAN).is_err());
        assert!(check_iml(f64::MIN_POSITIVE).is_ok());
        assert_eq!(check_iml(1.0), Ok(0.0));
    }

    #[test]
    fn truncation_levels() {
        assert!(SigmaTruncation::Upper(0.0).validate().is_err());
        assert!(SigmaTruncation::TwoSided(f64::NAN).validate().is_err());
        assert_eq!(SigmaTruncation::Upper(3.0).validate(), Ok(SigmaTruncation::Upper(3.0)));
    }
}
