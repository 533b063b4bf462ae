//! Probabilistic hazard curves for a single site.
//!
//! For a forecast of ruptures `k` with time-span probabilities `q_k`, the
//! probability that a level `x` is exceeded at least once is
//! `1 − ∏ (1 − q_k · P(Y > x | k))`.

use tracing::{debug, info};

use super::HazardError;
use crate::imr::AttenuationRelationship;
use crate::site::Site;
use crate::source::EqkRuptureForecast;

/// Sources farther than this from the site are skipped by default.
pub const DEFAULT_MAX_DISTANCE_KM: f64 = 200.0;

/// Intensity levels paired with their exceedance probabilities.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(serde::Serialize))]
pub struct HazardCurve {
    imls: Vec<f64>,
    probabilities: Vec<f64>,
}

impl HazardCurve {
    /// Intensity levels in ascending order.
    #[must_use]
    pub fn imls(&self) -> &[f64] {
        &self.imls
    }

    /// Exceedance probability at each level.
    #[must_use]
    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }

    /// `(iml, probability)` pairs.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.imls.iter().copied().zip(self.probabilities.iter().copied())
    }

    /// Number of levels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.imls.len()
    }

    /// Whether the curve has no levels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.imls.is_empty()
    }

    /// Levels strictly increase, probabilities never increase and all lie
    /// in `[0, 1]`.
    #[must_use]
    pub fn is_monotonic(&self) -> bool {
        self.imls.windows(2).all(|w| w[0] < w[1])
            && self.probabilities.windows(2).all(|w| w[1] <= w[0])
            && self.probabilities.iter().all(|p| (0.0..=1.0).contains(p))
    }
}

/// Integrates a forecast against one attenuation relationship.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HazardCurveCalculator {
    max_distance_km: f64,
}

impl Default for HazardCurveCalculator {
    fn default() -> Self {
        Self {
            max_distance_km: DEFAULT_MAX_DISTANCE_KM,
        }
    }
}

impl HazardCurveCalculator {
    /// Creates a calculator with a source cut-off distance.
    ///
    /// # Errors
    ///
    /// Returns [`HazardError::InvalidMaxDistance`] unless the distance is
    /// positive (infinity disables the cut-off).
    pub fn new(max_distance_km: f64) -> Result<Self, HazardError> {
        if max_distance_km.is_nan() || max_distance_km <= 0.0 {
            return Err(HazardError::InvalidMaxDistance { km: max_distance_km });
        }
        Ok(Self { max_distance_km })
    }

    /// Source cut-off distance in km.
    #[must_use]
    pub const fn max_distance_km(&self) -> f64 {
        self.max_distance_km
    }

    /// Computes the exceedance curve at `site`.
    ///
    /// `imr` is configured with the site and then with every rupture of
    /// every source within the cut-off; its intensity measure, component,
    /// std-dev type and truncation are used as already set.
    ///
    /// # Errors
    ///
    /// Returns [`HazardError::InvalidLevels`] for bad levels, and
    /// [`HazardError::Imr`] if the relationship rejects the site or any
    /// rupture.
    pub fn compute(
        &self,
        imls: &[f64],
        site: &Site,
        forecast: &EqkRuptureForecast,
        imr: &mut AttenuationRelationship,
    ) -> Result<HazardCurve, HazardError> {
        check_levels(imls)?;
        imr.set_site(site)?;

        let mut non_exceedance = vec![1.0; imls.len()];
        let mut used = 0usize;
        for (index, source) in forecast.sources().iter().enumerate() {
            let distance = source.min_distance(site.location());
            if distance > self.max_distance_km {
                debug!(source = source.name(), distance, "skipping distant source");
                continue;
            }
            let ruptures = forecast.ruptures_for(index);
            for r in &ruptures {
                imr.set_rupture(&r.rupture)?;
                let exceed = imr.exceed_probabilities(imls)?;
                for (ne, p) in non_exceedance.iter_mut().zip(exceed) {
                    *ne *= 1.0 - r.probability * p;
                }
            }
            used += 1;
            debug!(source = source.name(), ruptures = ruptures.len(), distance, "integrated source");
        }

        let probabilities: Vec<f64> = non_exceedance.iter().map(|ne| (1.0 - ne).clamp(0.0, 1.0)).collect();
        info!(
            imr = imr.info().short_name,
            im = %imr.intensity_measure(),
            sources = used,
            skipped = forecast.sources().len() - used,
            "hazard curve computed"
        );
        Ok(HazardCurve {
            imls: imls.to_vec(),
            probabilities,
        })
    }
}

fn check_levels(imls: &[f64]) -> Result<(), HazardError> {
    if imls.is_empty() {
        return Err(HazardError::InvalidLevels {
            index: 0,
            value: f64::NAN,
        });
    }
    for (index, &value) in imls.iter().enumerate() {
        let ascending = index == 0 || imls[index - 1] < value;
        if !(value > 0.0 && value.is_finite() && ascending) {
            return Err(HazardError::InvalidLevels { index, value });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::{Location, Region};
    use crate::imr::registry;
    use crate::mfd::{GutenbergRichterMfd, SingleMagFreqDist};
    use crate::rupture::TectonicRegion;
    use crate::source::{AreaSource, SeismicSource};

    fn area(lat: f64, lon: f64, rate: f64) -> SeismicSource {
        let region = Region::rectangle(lat, lat + 0.2, lon, lon + 0.2).unwrap();
        let mfd = GutenbergRichterMfd::new(1.0, rate, 5.0, 7.0, 5).unwrap().into();
        AreaSource::new("zone", region, mfd, 8.0, 0.0, TectonicRegion::ActiveShallow, 0.1)
            .unwrap()
            .into()
    }

    fn imr() -> AttenuationRelationship {
        AttenuationRelationship::new(registry::model_by_short_name("BJF_1997").unwrap())
    }

    const LEVELS: [f64; 6] = [0.01, 0.05, 0.1, 0.2, 0.4, 0.8];

    #[test]
    fn curve_is_monotonic() {
        let forecast = EqkRuptureForecast::new(vec![area(34.0, -118.0, 0.1)], 50.0).unwrap();
        let site = Site::new(Location::surface(34.1, -118.1));
        let curve = HazardCurveCalculator::default()
            .compute(&LEVELS, &site, &forecast, &mut imr())
            .unwrap();
        assert_eq!(curve.len(), LEVELS.len());
        assert!(curve.is_monotonic(), "{:?}", curve.probabilities());
        assert!(curve.probabilities()[0] > curve.probabilities()[5]);
    }

    #[test]
    fn single_rupture_matches_direct_probability() {
        let region = Region::rectangle(34.0, 34.1, -118.0, -117.9).unwrap();
        let mfd = SingleMagFreqDist::new(6.5, 0.01).unwrap().into();
        let src = AreaSource::new("one", region, mfd, 8.0, 0.0, TectonicRegion::ActiveShallow, 0.1).unwrap();
        let rupture = src.ruptures()[0].0.clone();
        let forecast = EqkRuptureForecast::new(vec![src.into()], 1.0).unwrap();
        let site = Site::new(Location::surface(34.2, -118.0));

        let mut relationship = imr();
        let curve = HazardCurveCalculator::default()
            .compute(&[0.1], &site, &forecast, &mut relationship)
            .unwrap();
        relationship.set_rupture(&rupture).unwrap();
        let q = 1.0 - (-0.01f64).exp();
        let expected = q * relationship.exceed_probability(0.1).unwrap();
        assert!((curve.probabilities()[0] - expected).abs() < 1e-15);
    }

    #[test]
    fn distant_sources_are_skipped() {
        let forecast = EqkRuptureForecast::new(vec![area(40.0, -118.0, 0.1)], 50.0).unwrap();
        let site = Site::new(Location::surface(34.0, -118.0));
        let curve = HazardCurveCalculator::default()
            .compute(&LEVELS, &site, &forecast, &mut imr())
            .unwrap();
        assert!(curve.probabilities().iter().all(|&p| p == 0.0));
    }

    #[test]
    fn levels_are_validated() {
        let forecast = EqkRuptureForecast::new(vec![area(34.0, -118.0, 0.1)], 50.0).unwrap();
        let site = Site::new(Location::surface(34.0, -118.0));
        let calc = HazardCurveCalculator::default();
        let mut relationship = imr();
        let bad_levels: [&[f64]; 4] = [&[], &[0.1, 0.1], &[0.0, 0.1], &[0.2, 0.1]];
        for bad in bad_levels {
            assert!(matches!(
                calc.compute(bad, &site, &forecast, &mut relationship),
                Err(HazardError::InvalidLevels { .. })
            ));
        }
        assert!(HazardCurveCalculator::new(0.0).is_err());
    }
}
