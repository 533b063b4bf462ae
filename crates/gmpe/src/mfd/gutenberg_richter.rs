//! Truncated, discretised Gutenberg-Richter distribution.
//!
//! Bin `i` sits at `m_i = mag_lower + i·delta` for `i ∈ [0, num_bins)` and
//! carries the rate `10^(a − b·m_i)`. The rate and moment normalisations are
//! geometric series and are evaluated in closed form.
//!
//! The conserved quantity is the **total moment rate**. Operations that
//! change the magnitude range (`increment_mag_upper`, `set_mag_upper`) keep
//! `b`, `delta` and the moment rate fixed and let the cumulative rate and
//! a-value follow. Because a-value and TCR are pure functions of the stored
//! state, undoing a range change reproduces them bit for bit.
//!
//! ```
//! use gmpe::mfd::GutenbergRichterMfd;
//!
//! let mut gr = GutenbergRichterMfd::new(2.0, 123.0, 10.0, 20.0, 11).unwrap();
//! let a = gr.a_value();
//! gr.increment_mag_upper(2.4).unwrap();
//! assert_eq!(gr.num_bins(), 13);
//! gr.increment_mag_upper(-1.55).unwrap();
//! assert_eq!(gr.num_bins(), 11);
//! assert_eq!(gr.a_value(), a);
//! ```

use core::f64::consts::LN_10;

use super::{MfdError, MAX_BINS, MOMENT_INTERCEPT, MOMENT_SLOPE};

/// Gutenberg-Richter magnitude-frequency distribution.
#[derive(Debug, Clone, PartialEq)]
pub struct GutenbergRichterMfd {
    b_value: f64,
    mag_lower: f64,
    delta: f64,
    num_bins: usize,
    moment_rate: f64,
}

impl GutenbergRichterMfd {
    /// Creates a distribution from its total cumulative rate.
    ///
    /// # Errors
    ///
    /// Returns [`MfdError`] if `num_bins < 2`, the range is empty, or the
    /// rate is negative or not finite.
    pub fn new(
        b_value: f64,
        total_cumulative_rate: f64,
        mag_lower: f64,
        mag_upper: f64,
        num_bins: usize,
    ) -> Result<Self, MfdError> {
        let mut gr = Self::with_moment_rate(b_value, 0.0, mag_lower, mag_upper, num_bins)?;
        gr.set_total_cumulative_rate(total_cumulative_rate)?;
        Ok(gr)
    }

    /// Creates a distribution from its total moment rate (N·m/yr).
    ///
    /// # Errors
    ///
    /// Same conditions as [`GutenbergRichterMfd::new`], plus
    /// [`MfdError::TooManyBins`] above [`MAX_BINS`].
    pub fn with_moment_rate(
        b_value: f64,
        moment_rate: f64,
        mag_lower: f64,
        mag_upper: f64,
        num_bins: usize,
    ) -> Result<Self, MfdError> {
        if num_bins < 2 {
            return Err(MfdError::TooFewBins { num_bins });
        }
        if num_bins > MAX_BINS {
            return Err(MfdError::TooManyBins {
                num_bins: num_bins as f64,
            });
        }
        if mag_upper.is_nan() || mag_lower.is_nan() || mag_upper <= mag_lower {
            return Err(MfdError::InvalidRange {
                lower: mag_lower,
                upper: mag_upper,
            });
        }
        if !b_value.is_finite() {
            return Err(MfdError::InvalidValue {
                name: "b-value",
                value: b_value,
            });
        }
        check_rate("total moment rate", moment_rate)?;
        Ok(Self {
            b_value,
            mag_lower,
            delta: (mag_upper - mag_lower) / (num_bins - 1) as f64,
            num_bins,
            moment_rate,
        })
    }

    /// b-value.
    #[must_use]
    pub fn b_value(&self) -> f64 {
        self.b_value
    }

    /// Magnitude of the first bin.
    #[must_use]
    pub fn mag_lower(&self) -> f64 {
        self.mag_lower
    }

    /// Magnitude of the last bin.
    #[must_use]
    pub fn mag_upper(&self) -> f64 {
        self.mag_lower + (self.num_bins - 1) as f64 * self.delta
    }

    /// Bin width.
    #[must_use]
    pub fn delta(&self) -> f64 {
        self.delta
    }

    /// Number of bins.
    #[must_use]
    pub fn num_bins(&self) -> usize {
        self.num_bins
    }

    /// Magnitude of bin `i`.
    #[must_use]
    pub fn magnitude(&self, i: usize) -> f64 {
        self.mag_lower + i as f64 * self.delta
    }

    /// Total moment rate in N·m/yr.
    #[must_use]
    pub fn total_moment_rate(&self) -> f64 {
        self.moment_rate
    }

    /// Sum of all bin rates.
    #[must_use]
    pub fn total_cumulative_rate(&self) -> f64 {
        self.moment_rate / self.moment_per_unit_rate()
    }

    /// a-value such that bin `i` has rate `10^(a − b·m_i)`.
    #[must_use]
    pub fn a_value(&self) -> f64 {
        self.total_cumulative_rate().log10() - self.power_sum(-self.b_value).log10()
    }

    /// Annual rate of bin `i`.
    #[must_use]
    pub fn rate(&self, i: usize) -> f64 {
        let m = self.magnitude(i);
        self.total_cumulative_rate() * 10f64.powf(-self.b_value * m) / self.power_sum(-self.b_value)
    }

    /// Rate of events with magnitude at or above bin `i`.
    #[must_use]
    pub fn cumulative_rate(&self, i: usize) -> f64 {
        (i..self.num_bins).map(|k| self.rate(k)).sum()
    }

    /// `(magnitude, annual rate)` for every bin, in ascending magnitude.
    #[must_use]
    pub fn points(&self) -> Vec<(f64, f64)> {
        (0..self.num_bins)
            .map(|i| (self.magnitude(i), self.rate(i)))
            .collect()
    }

    /// Rescales the distribution to a new total cumulative rate.
    ///
    /// # Errors
    ///
    /// Returns [`MfdError::InvalidValue`] for a negative or non-finite rate.
    pub fn set_total_cumulative_rate(&mut self, rate: f64) -> Result<(), MfdError> {
        check_rate("total cumulative rate", rate)?;
        self.moment_rate = rate * self.moment_per_unit_rate();
        Ok(())
    }

    /// Rescales the distribution to a new total moment rate.
    ///
    /// # Errors
    ///
    /// Returns [`MfdError::InvalidValue`] for a negative or non-finite rate.
    pub fn set_total_moment_rate(&mut self, moment_rate: f64) -> Result<(), MfdError> {
        check_rate("total moment rate", moment_rate)?;
        self.moment_rate = moment_rate;
        Ok(())
    }

    /// Overrides a- and b-values, leaving the magnitude range and delta alone.
    ///
    /// # Errors
    ///
    /// Returns [`MfdError::InvalidValue`] if either value is not finite.
    pub fn set_ab(&mut self, a_value: f64, b_value: f64) -> Result<(), MfdError> {
        if !a_value.is_finite() {
            return Err(MfdError::InvalidValue {
                name: "a-value",
                value: a_value,
            });
        }
        if !b_value.is_finite() {
            return Err(MfdError::InvalidValue {
                name: "b-value",
                value: b_value,
            });
        }
        self.b_value = b_value;
        let tcr = 10f64.powf(a_value) * self.power_sum(-b_value);
        self.moment_rate = tcr * self.moment_per_unit_rate();
        Ok(())
    }

    /// Moves the upper magnitude by `delta_mag`, rounded to whole bins.
    ///
    /// b-value, bin width and total moment rate are preserved.
    ///
    /// # Errors
    ///
    /// Returns [`MfdError::InvalidValue`] for a non-finite `delta_mag`,
    /// [`MfdError::TooFewBins`] if fewer than two bins would remain and
    /// [`MfdError::TooManyBins`] above [`MAX_BINS`] or
    /// [`MfdError::InvalidValue`] once the moment of the top bin overflows.
    /// The distribution is unchanged on error.
    pub fn increment_mag_upper(&mut self, delta_mag: f64) -> Result<(), MfdError> {
        if !delta_mag.is_finite() {
            return Err(MfdError::InvalidValue {
                name: "magnitude increment",
                value: delta_mag,
            });
        }
        self.resize(self.num_bins as f64 + (delta_mag / self.delta).round())
    }

    /// Sets the upper magnitude, snapped to the existing bin grid.
    ///
    /// b-value, bin width and total moment rate are preserved.
    ///
    /// # Errors
    ///
    /// Same conditions as [`GutenbergRichterMfd::increment_mag_upper`], with
    /// [`MfdError::InvalidValue`] for a non-finite `mag_upper`.
    pub fn set_mag_upper(&mut self, mag_upper: f64) -> Result<(), MfdError> {
        if !mag_upper.is_finite() {
            return Err(MfdError::InvalidValue {
                name: "upper magnitude",
                value: mag_upper,
            });
        }
        self.resize(((mag_upper - self.mag_lower) / self.delta).round() + 1.0)
    }

    /// `bins` is a finite whole number, possibly out of range.
    fn resize(&mut self, bins: f64) -> Result<(), MfdError> {
        if bins < 2.0 {
            return Err(MfdError::TooFewBins {
                num_bins: bins.max(0.0) as usize,
            });
        }
        if bins > MAX_BINS as f64 {
            return Err(MfdError::TooManyBins { num_bins: bins });
        }
        let previous = self.num_bins;
        self.num_bins = bins as usize;
        let per_rate = self.moment_per_unit_rate();
        if !per_rate.is_finite() || per_rate <= 0.0 {
            self.num_bins = previous;
            return Err(MfdError::InvalidValue {
                name: "moment per unit rate",
                value: per_rate,
            });
        }
        Ok(())
    }

    /// `Σ 10^(c·m_i)` over all bins.
    fn power_sum(&self, c: f64) -> f64 {
        let first = 10f64.powf(c * self.mag_lower);
        let step = c * self.delta;
        if step == 0.0 {
            return first * self.num_bins as f64;
        }
        let n = self.num_bins as f64;
        first * (step * n * LN_10).exp_m1() / (step * LN_10).exp_m1()
    }

    /// Moment rate carried per unit of cumulative rate.
    fn moment_per_unit_rate(&self) -> f64 {
        10f64.powf(MOMENT_INTERCEPT) * self.power_sum(MOMENT_SLOPE - self.b_value)
            / self.power_sum(-self.b_value)
    }
}

fn check_rate(name: &'static str, value: f64) -> Result<(), MfdError> {
    if !value.is_finite() || value < 0.0 {
        return Err(MfdError::InvalidValue { name, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mfd::mag_to_moment;

    #[test]
    fn delta_and_bins() {
        let gr = GutenbergRichterMfd::new(1.0, 1.0, 5.0, 8.0, 31).unwrap();
        assert!((gr.delta() - 0.1).abs() < 1e-12);
        assert!((gr.mag_upper() - 8.0).abs() < 1e-12);
        assert_eq!(gr.points().len(), 31);
    }

    #[test]
    fn rates_sum_to_tcr() {
        let gr = GutenbergRichterMfd::new(0.9, 0.05, 5.0, 7.5, 26).unwrap();
        let sum: f64 = gr.points().iter().map(|p| p.1).sum();
        assert!((sum - 0.05).abs() < 1e-12);
        assert!((gr.cumulative_rate(0) - 0.05).abs() < 1e-12);
    }

    #[test]
    fn closed_form_moment_matches_bin_sum() {
        let gr = GutenbergRichterMfd::new(1.1, 0.2, 5.05, 7.95, 30).unwrap();
        let summed: f64 = gr.points().iter().map(|&(m, r)| r * mag_to_moment(m)).sum();
        let rel = (summed - gr.total_moment_rate()).abs() / summed;
        assert!(rel < 1e-10, "relative error {rel}");
    }

    #[test]
    fn a_value_reproduces_rates() {
        let gr = GutenbergRichterMfd::new(1.0, 3.0, 5.0, 7.0, 21).unwrap();
        let a = gr.a_value();
        for (i, (m, r)) in gr.points().into_iter().enumerate() {
            let expected = 10f64.powf(a - m);
            assert!((r - expected).abs() / expected < 1e-10, "bin {i}");
        }
    }

    #[test]
    fn set_ab_keeps_range() {
        let mut gr = GutenbergRichterMfd::new(1.0, 3.0, 5.0, 7.0, 21).unwrap();
        gr.set_ab(4.0, 0.8).unwrap();
        assert!((gr.a_value() - 4.0).abs() < 1e-10);
        assert_eq!(gr.b_value(), 0.8);
        assert_eq!(gr.num_bins(), 21);
        assert!((gr.mag_upper() - 7.0).abs() < 1e-12);
    }

    #[test]
    fn invalid_inputs() {
        assert!(GutenbergRichterMfd::new(1.0, 1.0, 5.0, 8.0, 1).is_err());
        assert!(GutenbergRichterMfd::new(1.0, 1.0, 8.0, 5.0, 10).is_err());
        assert!(GutenbergRichterMfd::new(1.0, -1.0, 5.0, 8.0, 10).is_err());
        let mut gr = GutenbergRichterMfd::new(1.0, 1.0, 5.0, 6.0, 11).unwrap();
        assert!(gr.increment_mag_upper(-5.0).is_err());
        assert_eq!(gr.num_bins(), 11);
    }
}
