//! Time-dependent view of a set of sources.

use super::{SeismicSource, SourceError};
use crate::rupture::{poisson_probability, ProbEqkRupture};

/// Sources plus the time span over which rupture probabilities are taken.
#[derive(Debug, Clone, PartialEq)]
pub struct EqkRuptureForecast {
    sources: Vec<SeismicSource>,
    duration_years: f64,
}

impl EqkRuptureForecast {
    /// Creates a forecast.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::InvalidDuration`] unless the duration is
    /// positive and finite.
    pub fn new(sources: Vec<SeismicSource>, duration_years: f64) -> Result<Self, SourceError> {
        if !duration_years.is_finite() || duration_years <= 0.0 {
            return Err(SourceError::InvalidDuration {
                years: duration_years,
            });
        }
        Ok(Self {
            sources,
            duration_years,
        })
    }

    /// The sources in insertion order.
    #[must_use]
    pub fn sources(&self) -> &[SeismicSource] {
        &self.sources
    }

    /// Time span in years.
    #[must_use]
    pub fn duration_years(&self) -> f64 {
        self.duration_years
    }

    /// Ruptures of source `index` with their Poisson probability over the
    /// time span. Out-of-range indices yield nothing.
    #[must_use]
    pub fn ruptures_for(&self, index: usize) -> Vec<ProbEqkRupture> {
        self.sources.get(index).map_or_else(Vec::new, |s| {
            s.ruptures()
                .into_iter()
                .map(|(rupture, rate)| ProbEqkRupture {
                    rupture,
                    probability: poisson_probability(rate, self.duration_years),
                })
                .collect()
        })
    }

    /// Total number of ruptures across all sources.
    #[must_use]
    pub fn num_ruptures(&self) -> usize {
        self.sources.iter().map(|s| s.ruptures().len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::Region;
    use crate::mfd::SingleMagFreqDist;
    use crate::rupture::TectonicRegion;
    use crate::source::AreaSource;

    fn forecast(years: f64) -> Result<EqkRuptureForecast, SourceError> {
        let region = Region::rectangle(0.0, 0.2, 0.0, 0.2)?;
        let mfd = SingleMagFreqDist::new(6.0, 0.04)?.into();
        let area = AreaSource::new("a", region, mfd, 5.0, 0.0, TectonicRegion::ActiveShallow, 0.1)?;
        EqkRuptureForecast::new(vec![area.into()], years)
    }

    #[test]
    fn probabilities_follow_poisson() {
        let f = forecast(50.0).unwrap();
        let ruptures = f.ruptures_for(0);
        assert_eq!(ruptures.len(), 4);
        assert_eq!(f.num_ruptures(), 4);
        let expected = 1.0 - (-0.01f64 * 50.0).exp();
        for r in &ruptures {
            assert!((r.probability - expected).abs() < 1e-12);
        }
        assert!(f.ruptures_for(1).is_empty());
    }

    #[test]
    fn duration_must_be_positive() {
        assert!(matches!(forecast(0.0), Err(SourceError::InvalidDuration { .. })));
        assert!(forecast(f64::NAN).is_err());
    }
}
