//! Campbell (1997): horizontal PGA from worldwide crustal earthquakes.
//!
//! ```text
//! ln A = −3.512 + 0.904 M − 1.328 ln sqrt(R² + (0.149 e^(0.647 M))²)
//!        + (1.125 − 0.112 ln R − 0.0957 M) F
//!        + (0.440 − 0.171 ln R) S_SR + (0.405 − 0.222 ln R) S_HR
//! ```
//!
//! `R` is seismogenic distance, `F = 1` for reverse faulting, and the site
//! indicators select soft or hard rock over firm soil. Sigma depends on the
//! predicted PGA `A`:
//!
//! | A (g)              | σ                  |
//! |--------------------|--------------------|
//! | `A < 0.068`        | 0.55               |
//! | `0.068 ≤ A ≤ 0.21` | 0.173 − 0.140 ln A |
//! | `A > 0.21`         | 0.39               |

use super::classify::{classify_rake, FaultStyle};
use super::{
    Component, DistanceMetric, GmInput, GroundMotionModel, ImType, ImrError, IntensityMeasure,
    ModelInfo, ParamRange, SiteType, StdDevType,
};
use crate::rupture::TectonicRegion;

/// Static description.
pub static INFO: ModelInfo = ModelInfo {
    name: "Campbell (1997)",
    short_name: "Campbell_1997",
    distance_metric: DistanceMetric::Seismogenic,
    measures: &[ImType::Pga],
    components: &[Component::AverageHorizontal],
    std_dev_types: &[StdDevType::Total, StdDevType::None],
    site_types: &[SiteType::FirmSoil, SiteType::SoftRock, SiteType::HardRock],
    tectonic_regions: &[TectonicRegion::ActiveShallow],
    sigma_derived: false,
    magnitude: ParamRange::new(4.0, 9.0, 5.0, 8.0, 5.5),
    distance: ParamRange::new(3.0, 1000.0, 3.0, 60.0, 3.0),
    vs30: ParamRange::new(1.0, 5000.0, 1.0, 5000.0, 760.0),
    depth: ParamRange::new(0.0, 40.0, 0.0, 40.0, 10.0),
};

/// Campbell (1997).
#[derive(Debug, Clone, Copy, Default)]
pub struct Campbell1997;

fn ln_pga(m: f64, r: f64, reverse: bool, site: Option<SiteType>) -> f64 {
    let ln_r = r.ln();
    let near = 0.149 * (0.647 * m).exp();
    let f = if reverse { 1.0 } else { 0.0 };
    let (s_sr, s_hr) = match site {
        Some(SiteType::SoftRock) => (1.0, 0.0),
        Some(SiteType::HardRock) => (0.0, 1.0),
        _ => (0.0, 0.0),
    };
    -3.512 + 0.904 * m - 1.328 * r.hypot(near).ln()
        + (1.125 - 0.112 * ln_r - 0.0957 * m) * f
        + (0.440 - 0.171 * ln_r) * s_sr
        + (0.405 - 0.222 * ln_r) * s_hr
}

/// Sigma as a function of predicted PGA in g.
fn sigma_for_pga(pga: f64) -> f64 {
    if pga < 0.068 {
        0.55
    } else if pga <= 0.21 {
        0.173 - 0.140 * pga.ln()
    } else {
        0.39
    }
}

impl Campbell1997 {
    fn evaluate(im: IntensityMeasure, input: &GmInput) -> Result<f64, ImrError> {
        if im != IntensityMeasure::Pga {
            return Err(ImrError::unsupported(INFO.short_name, "intensity measure", im));
        }
        let r = INFO.check_input(input)?;
        let site = INFO.site_type(input.site_type)?;
        let reverse = classify_rake(input.rake) == FaultStyle::Reverse;
        Ok(ln_pga(input.magnitude, r, reverse, site))
    }
}

impl GroundMotionModel for Campbell1997 {
    fn info(&self) -> &'static ModelInfo {
        &INFO
    }

    fn supported_periods(&self) -> Vec<f64> {
        Vec::new()
    }

    fn mean(&self, im: IntensityMeasure, input: &GmInput) -> Result<f64, ImrError> {
        Self::evaluate(im, input)
    }

    fn std_dev(&self, im: IntensityMeasure, input: &GmInput, kind: StdDevType) -> Result<f64, ImrError> {
        INFO.check_std_dev_type(kind)?;
        let mean = Self::evaluate(im, input)?;
        Ok(match kind {
            StdDevType::None => 0.0,
            _ => sigma_for_pga(mean.exp()),
        })
    }
}
