//! Magnitude-frequency distributions: ordered `(magnitude, annual rate)` bins.
//!
//! The attenuation core never reads these; sources turn them into ruptures.

mod gutenberg_richter;

pub use gutenberg_richter::GutenbergRichterMfd;

use thiserror::Error;

/// Slope of the Hanks & Kanamori moment-magnitude relation.
pub const MOMENT_SLOPE: f64 = 1.5;

/// Intercept of the moment-magnitude relation for N·m.
pub const MOMENT_INTERCEPT: f64 = 9.05;

/// Largest bin count a discretised distribution may hold.
pub const MAX_BINS: usize = 10_000;

/// Seismic moment (N·m) of a magnitude.
#[inline]
#[must_use]
pub fn mag_to_moment(magnitude: f64) -> f64 {
    10f64.powf(MOMENT_SLOPE * magnitude + MOMENT_INTERCEPT)
}

/// Moment magnitude of a seismic moment (N·m).
#[inline]
#[must_use]
pub fn moment_to_mag(moment: f64) -> f64 {
    (moment.log10() - MOMENT_INTERCEPT) / MOMENT_SLOPE
}

/// Errors from constructing or reshaping a distribution.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MfdError {
    /// Fewer bins than the distribution can be defined on.
    #[error("a distribution needs at least 2 bins, got {num_bins}")]
    TooFewBins {
        /// Requested bin count.
        num_bins: usize,
    },
    /// More bins than [`MAX_BINS`].
    #[error("a distribution holds at most {} bins, got {num_bins}", MAX_BINS)]
    TooManyBins {
        /// Requested bin count.
        num_bins: f64,
    },
    /// Lower bound not strictly below the upper bound.
    #[error("magnitude range [{lower}, {upper}] is empty")]
    InvalidRange {
        /// Lower magnitude.
        lower: f64,
        /// Upper magnitude.
        upper: f64,
    },
    /// A rate, a- or b-value outside its domain.
    #[error("invalid {name}: {value}")]
    InvalidValue {
        /// Quantity name.
        name: &'static str,
        /// Offending value.
        value: f64,
    },
    /// Explicit bins not in strictly ascending magnitude order.
    #[error("bin magnitudes must be strictly ascending (bin {index})")]
    Unordered {
        /// First out-of-order bin.
        index: usize,
    },
}

/// A single magnitude with one annual rate (characteristic events).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SingleMagFreqDist {
    magnitude: f64,
    rate: f64,
}

impl SingleMagFreqDist {
    /// Creates the distribution.
    ///
    /// # Errors
    ///
    /// Returns [`MfdError::InvalidValue`] for a negative or non-finite rate.
    pub fn new(magnitude: f64, rate: f64) -> Result<Self, MfdError> {
        if !rate.is_finite() || rate < 0.0 {
            return Err(MfdError::InvalidValue { name: "rate", value: rate });
        }
        Ok(Self { magnitude, rate })
    }

    /// The magnitude.
    #[must_use]
    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    /// The annual rate.
    #[must_use]
    pub fn rate(&self) -> f64 {
        self.rate
    }
}

/// Explicit bins.
#[derive(Debug, Clone, PartialEq)]
pub struct IncrementalMfd {
    points: Vec<(f64, f64)>,
}

impl IncrementalMfd {
    /// Creates a distribution from `(magnitude, rate)` bins.
    ///
    /// # Errors
    ///
    /// Returns [`MfdError`] if magnitudes are not strictly ascending or any
    /// rate is negative.
    pub fn new(points: Vec<(f64, f64)>) -> Result<Self, MfdError> {
        for (i, &(_, r)) in points.iter().enumerate() {
            if !r.is_finite() || r < 0.0 {
                return Err(MfdError::InvalidValue { name: "rate", value: r });
            }
            if i > 0 && points[i - 1].0 >= points[i].0 {
                return Err(MfdError::Unordered { index: i });
            }
        }
        Ok(Self { points })
    }
}

/// The magnitude-frequency distributions a source can carry.
///
/// Equality is structural: two distributions are equal when their
/// discretisation and rates are equal, regardless of where they live.
#[derive(Debug, Clone, PartialEq)]
pub enum MagFreqDist {
    /// Truncated Gutenberg-Richter.
    GutenbergRichter(GutenbergRichterMfd),
    /// One magnitude.
    Single(SingleMagFreqDist),
    /// Explicit bins.
    Incremental(IncrementalMfd),
}

impl MagFreqDist {
    /// `(magnitude, annual rate)` pairs in ascending magnitude.
    #[must_use]
    pub fn points(&self) -> Vec<(f64, f64)> {
        match self {
            Self::GutenbergRichter(gr) => gr.points(),
            Self::Single(s) => vec![(s.magnitude, s.rate)],
            Self::Incremental(inc) => inc.points.clone(),
        }
    }

    /// Sum of all bin rates.
    #[must_use]
    pub fn total_rate(&self) -> f64 {
        match self {
            Self::GutenbergRichter(gr) => gr.total_cumulative_rate(),
            _ => self.points().iter().map(|p| p.1).sum(),
        }
    }

    /// Total moment rate in N·m/yr.
    #[must_use]
    pub fn total_moment_rate(&self) -> f64 {
        match self {
            Self::GutenbergRichter(gr) => gr.total_moment_rate(),
            _ => self
                .points()
                .iter()
                .map(|&(m, r)| r * mag_to_moment(m))
                .sum(),
        }
    }

    /// Largest magnitude with a bin.
    #[must_use]
    pub fn max_magnitude(&self) -> Option<f64> {
        self.points().last().map(|p| p.0)
    }
}

impl From<GutenbergRichterMfd> for MagFreqDist {
    fn from(gr: GutenbergRichterMfd) -> Self {
        Self::GutenbergRichter(gr)
    }
}

impl From<SingleMagFreqDist> for MagFreqDist {
    fn from(s: SingleMagFreqDist) -> Self {
        Self::Single(s)
    }
}

impl From<IncrementalMfd> for MagFreqDist {
    fn from(inc: IncrementalMfd) -> Self {
        Self::Incremental(inc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moment_round_trip() {
        assert!((moment_to_mag(mag_to_moment(6.5)) - 6.5).abs() < 1e-12);
        assert!((mag_to_moment(6.0) - 10f64.powf(18.05)).abs() / 10f64.powf(18.05) < 1e-12);
    }

    #[test]
    fn incremental_ordering_enforced() {
        assert!(IncrementalMfd::new(vec![(5.0, 0.1), (5.0, 0.1)]).is_err());
        assert!(IncrementalMfd::new(vec![(5.0, 0.1), (5.5, -0.1)]).is_err());
        let inc = IncrementalMfd::new(vec![(5.0, 0.1), (5.5, 0.05)]).unwrap();
        let mfd = MagFreqDist::from(inc);
        assert!((mfd.total_rate() - 0.15).abs() < 1e-15);
        assert_eq!(mfd.max_magnitude(), Some(5.5));
    }

    #[test]
    fn structural_equality() {
        let a = MagFreqDist::from(GutenbergRichterMfd::new(1.0, 0.1, 5.0, 7.0, 21).unwrap());
        let b = MagFreqDist::from(GutenbergRichterMfd::new(1.0, 0.1, 5.0, 7.0, 21).unwrap());
        let c = MagFreqDist::from(GutenbergRichterMfd::new(1.0, 0.1, 5.0, 7.1, 22).unwrap());
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
