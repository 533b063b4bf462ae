//! Spudich, Joyner, Lindh, Boore, Margaris & Fletcher (1999): earthquakes in
//! extensional tectonic regimes.
//!
//! The published form is base-10:
//!
//! ```text
//! log10 Y = b1 + b2 (M − 6) + b3 (M − 6)² + b5 log10 D + b6 Γ
//! D       = sqrt(rJB² + h²)
//! ```
//!
//! with `Γ = 1` on soil. Means and sigmas are converted to natural log here
//! so they compose with every other family.
//!
//! Sigma is derived. `σ1` is intra-event, `σ2` inter-event, and `σ3` the
//! extra scatter of a randomly oriented component over the geometric mean,
//! added to the intra-event term for [`Component::RandomHorizontal`].

use core::f64::consts::LN_10;

use super::table::{self, Row};
use super::{
    Component, DistanceMetric, GmInput, GroundMotionModel, ImType, ImrError, IntensityMeasure,
    ModelInfo, ParamRange, SiteType, StdDevType,
};
use crate::rupture::TectonicRegion;

#[derive(Debug, Clone, Copy)]
struct Coeffs {
    b1: f64,
    b2: f64,
    b3: f64,
    b5: f64,
    b6: f64,
    h: f64,
    sigma1: f64,
    sigma2: f64,
    sigma3: f64,
}

#[rustfmt::skip]
static TABLE: [Row<Coeffs>; 1] = [
    Row {
        im: IntensityMeasure::Pga,
        c: Coeffs {
            b1: 0.299, b2: 0.229, b3: 0.000, b5: -1.052, b6: 0.112, h: 7.27,
            sigma1: 0.172, sigma2: 0.108, sigma3: 0.094,
        },
    },
];

/// Static description.
pub static INFO: ModelInfo = ModelInfo {
    name: "Spudich et al. (1999)",
    short_name: "SEA_1999",
    distance_metric: DistanceMetric::JoynerBoore,
    measures: &[ImType::Pga],
    components: &[Component::RandomHorizontal, Component::AverageHorizontal],
    std_dev_types: &[
        StdDevType::Total,
        StdDevType::InterEvent,
        StdDevType::IntraEvent,
        StdDevType::None,
    ],
    site_types: &[SiteType::Rock, SiteType::Soil],
    tectonic_regions: &[TectonicRegion::ActiveShallow],
    sigma_derived: true,
    magnitude: ParamRange::new(4.0, 9.0, 5.0, 7.7, 5.5),
    distance: ParamRange::new(0.0, 1000.0, 0.0, 100.0, 0.0),
    vs30: ParamRange::new(1.0, 5000.0, 1.0, 5000.0, 760.0),
    depth: ParamRange::new(0.0, 40.0, 0.0, 40.0, 10.0),
};

/// Spudich et al. (1999).
#[derive(Debug, Clone, Copy, Default)]
pub struct Spudich1999;

impl Spudich1999 {
    fn coeffs(im: IntensityMeasure) -> Result<&'static Coeffs, ImrError> {
        table::lookup(INFO.short_name, &TABLE, im)
    }
}

impl GroundMotionModel for Spudich1999 {
    fn info(&self) -> &'static ModelInfo {
        &INFO
    }

    fn supported_periods(&self) -> Vec<f64> {
        table::sa_periods(&TABLE)
    }

    fn mean(&self, im: IntensityMeasure, input: &GmInput) -> Result<f64, ImrError> {
        let c = Self::coeffs(im)?;
        let r_jb = INFO.check_input(input)?;
        let soil = if INFO.site_type(input.site_type)? == Some(SiteType::Soil) { 1.0 } else { 0.0 };
        let dm = input.magnitude - 6.0;
        let log10_y = c.b1 + c.b2 * dm + c.b3 * dm * dm + c.b5 * r_jb.hypot(c.h).log10() + c.b6 * soil;
        Ok(log10_y * LN_10)
    }

    fn std_dev(&self, im: IntensityMeasure, input: &GmInput, kind: StdDevType) -> Result<f64, ImrError> {
        INFO.check_std_dev_type(kind)?;
        let c = Self::coeffs(im)?;
        INFO.check_input(input)?;
        INFO.site_type(input.site_type)?;
        let intra = match INFO.component(input.component)? {
            Some(Component::AverageHorizontal) => c.sigma1,
            _ => c.sigma1.hypot(c.sigma3),
        };
        let log10_sigma = match kind {
            StdDevType::Total => intra.hypot(c.sigma2),
            StdDevType::InterEvent => c.sigma2,
            StdDevType::IntraEvent => intra,
            StdDevType::None => 0.0,
        };
        Ok(log10_sigma * LN_10)
    }
}
