//! Cornell, Banon & Shakal (1979): PGA against hypocentral distance.
//!
//! `ln PGA(gal) = 6.74 + 0.859 M − 1.80 ln(R + 25)` with a constant
//! `σ = 0.57`. The mean is returned in g.

use super::{
    Component, DistanceMetric, GmInput, GroundMotionModel, ImType, ImrError, IntensityMeasure,
    ModelInfo, ParamRange, StdDevType,
};
use crate::rupture::TectonicRegion;

/// Standard gravity in gal.
const GAL_PER_G: f64 = 980.665;
const SIGMA: f64 = 0.57;

/// Static description.
pub static INFO: ModelInfo = ModelInfo {
    name: "Cornell, Banon & Shakal (1979)",
    short_name: "Cornell_1979",
    distance_metric: DistanceMetric::Hypocentral,
    measures: &[ImType::Pga],
    components: &[Component::AverageHorizontal],
    std_dev_types: &[StdDevType::Total, StdDevType::None],
    site_types: &[],
    tectonic_regions: &TectonicRegion::ALL,
    sigma_derived: false,
    magnitude: ParamRange::new(3.0, 9.0, 4.0, 7.5, 5.5),
    distance: ParamRange::new(0.0, 1000.0, 0.0, 300.0, 10.0),
    vs30: ParamRange::new(1.0, 5000.0, 1.0, 5000.0, 760.0),
    depth: ParamRange::new(0.0, 700.0, 0.0, 40.0, 10.0),
};

/// Cornell, Banon & Shakal (1979).
#[derive(Debug, Clone, Copy, Default)]
pub struct Cornell1979;

impl Cornell1979 {
    fn check(im: IntensityMeasure, input: &GmInput) -> Result<f64, ImrError> {
        if im != IntensityMeasure::Pga {
            return Err(ImrError::unsupported(INFO.short_name, "intensity measure", im));
        }
        INFO.check_input(input)
    }
}

impl GroundMotionModel for Cornell1979 {
    fn info(&self) -> &'static ModelInfo {
        &INFO
    }

    fn supported_periods(&self) -> Vec<f64> {
        Vec::new()
    }

    fn mean(&self, im: IntensityMeasure, input: &GmInput) -> Result<f64, ImrError> {
        let r = Self::check(im, input)?;
        Ok(6.74 + 0.859 * input.magnitude - 1.80 * (r + 25.0).ln() - GAL_PER_G.ln())
    }

    fn std_dev(&self, im: IntensityMeasure, input: &GmInput, kind: StdDevType) -> Result<f64, ImrError> {
        INFO.check_std_dev_type(kind)?;
        Self::check(im, input)?;
        Ok(if kind == StdDevType::None { 0.0 } else { SIGMA })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imr::Distance;

    #[test]
    fn gal_to_g() {
        let input = GmInput::new(6.0, Distance::hypocentral(25.0));
        let pga = Cornell1979.mean(IntensityMeasure::Pga, &input).unwrap().exp();
        assert!((pga / 0.130_566_5 - 1.0).abs() < 1e-6, "PGA {pga}");
    }

    #[test]
    fn deep_events_allowed() {
        let input = GmInput::new(6.0, Distance::hypocentral(100.0))
            .with_depth(100.0)
            .with_tectonic(TectonicRegion::SubductionSlab);
        assert!(Cornell1979.mean(IntensityMeasure::Pga, &input).is_ok());
        assert_eq!(Cornell1979.std_dev(IntensityMeasure::Pga, &input, StdDevType::Total), Ok(0.57));
        assert!(Cornell1979.std_dev(IntensityMeasure::Pga, &input, StdDevType::IntraEvent).is_err());
    }
}
