//! Youngs, Chiou, Silva & Humphrey (1997): subduction-zone interface and
//! intraslab earthquakes.
//!
//! ```text
//! rock: ln Y =  0.2418 + 1.414 M + C1 + C2 (10 − M)³ + C3 ln(r + 1.7818 e^(0.554 M)) + 0.00607 H + 0.3846 Zt
//! soil: ln Y = −0.6687 + 1.438 M + C1 + C2 (10 − M)³ + C3 ln(r + 1.097 e^(0.617 M))  + 0.00648 H + 0.3643 Zt
//! ```
//!
//! `H` is focal depth in km and `Zt` is 0 for interface and 1 for intraslab
//! events, taken from the tectonic region. Sigma is `C4 + C5 · min(M, 8)`.

use super::table::{self, Row};
use super::{
    Component, DistanceMetric, GmInput, GroundMotionModel, ImType, ImrError, IntensityMeasure,
    ModelInfo, ParamRange, SiteType, StdDevType,
};
use crate::rupture::TectonicRegion;

#[derive(Debug, Clone, Copy)]
struct Coeffs {
    c1: f64,
    c2: f64,
    c3: f64,
    c4: f64,
    c5: f64,
}

const fn row(im: IntensityMeasure, c1: f64, c2: f64, c3: f64, c4: f64, c5: f64) -> Row<Coeffs> {
    Row {
        im,
        c: Coeffs { c1, c2, c3, c4, c5 },
    }
}

use IntensityMeasure::{Pga, Sa};

#[rustfmt::skip]
static ROCK: [Row<Coeffs>; 12] = [
    //  im         C1      C2       C3      C4    C5
    row(Pga,       0.000,  0.0000, -2.552, 1.45, -0.1),
    row(Sa(0.075), 1.275,  0.0000, -2.707, 1.45, -0.1),
    row(Sa(0.1),   1.188, -0.0011, -2.655, 1.45, -0.1),
    row(Sa(0.2),   0.722, -0.0027, -2.528, 1.45, -0.1),
    row(Sa(0.3),   0.246, -0.0036, -2.454, 1.45, -0.1),
    row(Sa(0.4),  -0.115, -0.0043, -2.401, 1.45, -0.1),
    row(Sa(0.5),  -0.400, -0.0048, -2.360, 1.45, -0.1),
    row(Sa(0.75), -1.149, -0.0057, -2.286, 1.45, -0.1),
    row(Sa(1.0),  -1.736, -0.0064, -2.234, 1.45, -0.1),
    row(Sa(1.5),  -2.634, -0.0073, -2.160, 1.50, -0.1),
    row(Sa(2.0),  -3.328, -0.0080, -2.107, 1.55, -0.1),
    row(Sa(3.0),  -4.511, -0.0089, -2.033, 1.65, -0.1),
];

#[rustfmt::skip]
static SOIL: [Row<Coeffs>; 12] = [
    //  im         C1      C2       C3      C4    C5
    row(Pga,       0.000,  0.0000, -2.329, 1.45, -0.1),
    row(Sa(0.075), 2.400, -0.0019, -2.697, 1.45, -0.1),
    row(Sa(0.1),   2.516, -0.0019, -2.697, 1.45, -0.1),
    row(Sa(0.2),   1.549, -0.0019, -2.464, 1.45, -0.1),
    row(Sa(0.3),   0.793, -0.0020, -2.327, 1.45, -0.1),
    row(Sa(0.4),   0.144, -0.0020, -2.230, 1.45, -0.1),
    row(Sa(0.5),  -0.438, -0.0035, -2.140, 1.45, -0.1),
    row(Sa(0.75), -1.704, -0.0048, -1.952, 1.45, -0.1),
    row(Sa(1.0),  -2.870, -0.0066, -1.785, 1.45, -0.1),
    row(Sa(1.5),  -5.101, -0.0114, -1.470, 1.50, -0.1),
    row(Sa(2.0),  -6.433, -0.0164, -1.290, 1.55, -0.1),
    row(Sa(3.0),  -6.672, -0.0221, -1.347, 1.65, -0.1),
];

const SIGMA_MAG_CAP: f64 = 8.0;

/// Static description.
pub static INFO: ModelInfo = ModelInfo {
    name: "Youngs et al. (1997)",
    short_name: "Youngs_1997",
    distance_metric: DistanceMetric::Rupture,
    measures: &[ImType::Pga, ImType::Sa],
    components: &[Component::AverageHorizontal],
    std_dev_types: &[StdDevType::Total, StdDevType::None],
    site_types: &[SiteType::Rock, SiteType::DeepSoil],
    tectonic_regions: &[TectonicRegion::SubductionInterface, TectonicRegion::SubductionSlab],
    sigma_derived: false,
    magnitude: ParamRange::new(4.0, 9.5, 5.0, 8.2, 6.5),
    distance: ParamRange::new(0.0, 1000.0, 10.0, 500.0, 100.0),
    vs30: ParamRange::new(1.0, 5000.0, 1.0, 5000.0, 760.0),
    depth: ParamRange::new(0.0, 250.0, 10.0, 229.0, 20.0),
};

/// Youngs et al. (1997).
#[derive(Debug, Clone, Copy, Default)]
pub struct Youngs1997;

struct Resolved {
    c: &'static Coeffs,
    soil: bool,
    slab: f64,
    r: f64,
}

impl Youngs1997 {
    fn resolve(im: IntensityMeasure, input: &GmInput) -> Result<Resolved, ImrError> {
        let r = INFO.check_input(input)?;
        let soil = INFO.site_type(input.site_type)? == Some(SiteType::DeepSoil);
        let rows: &'static [Row<Coeffs>] = if soil { &SOIL } else { &ROCK };
        let c = table::lookup(INFO.short_name, rows, im)?;
        let slab = if input.tectonic == TectonicRegion::SubductionSlab { 1.0 } else { 0.0 };
        Ok(Resolved { c, soil, slab, r })
    }
}

impl GroundMotionModel for Youngs1997 {
    fn info(&self) -> &'static ModelInfo {
        &INFO
    }

    fn supported_periods(&self) -> Vec<f64> {
        table::sa_periods(&ROCK)
    }

    fn mean(&self, im: IntensityMeasure, input: &GmInput) -> Result<f64, ImrError> {
        let Resolved { c, soil, slab, r } = Self::resolve(im, input)?;
        let m = input.magnitude;
        let h = input.depth;
        let shared = c.c1 + c.c2 * (10.0 - m).powi(3);
        Ok(if soil {
            -0.6687 + 1.438 * m + shared + c.c3 * (r + 1.097 * (0.617 * m).exp()).ln()
                + 0.00648 * h
                + 0.3643 * slab
        } else {
            0.2418 + 1.414 * m + shared + c.c3 * (r + 1.7818 * (0.554 * m).exp()).ln()
                + 0.00607 * h
                + 0.3846 * slab
        })
    }

    fn std_dev(&self, im: IntensityMeasure, input: &GmInput, kind: StdDevType) -> Result<f64, ImrError> {
        INFO.check_std_dev_type(kind)?;
        let Resolved { c, .. } = Self::resolve(im, input)?;
        Ok(match kind {
            StdDevType::None => 0.0,
            _ => c.c4 + c.c5 * input.magnitude.min(SIGMA_MAG_CAP),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imr::Distance;

    fn interface(m: f64, r: f64) -> GmInput {
        GmInput::new(m, Distance::rupture(r)).with_tectonic(TectonicRegion::SubductionInterface)
    }

    #[test]
    fn rock_pga_hand_value() {
        let input = interface(8.0, 50.0).with_depth(20.0);
        let pga = Youngs1997.mean(Pga, &input).unwrap().exp();
        assert!((pga / 0.158_156_4 - 1.0).abs() < 1e-6, "PGA {pga}");
    }

    #[test]
    fn intraslab_is_stronger() {
        let i = interface(7.0, 80.0).with_depth(50.0);
        let s = i.with_tectonic(TectonicRegion::SubductionSlab);
        let d = Youngs1997.mean(Sa(1.0), &s).unwrap() - Youngs1997.mean(Sa(1.0), &i).unwrap();
        assert!((d - 0.3846).abs() < 1e-12);
    }

    #[test]
    fn crustal_events_are_rejected() {
        let input = GmInput::new(7.0, Distance::rupture(80.0));
        assert!(matches!(
            Youngs1997.mean(Pga, &input),
            Err(ImrError::UnsupportedSelection { kind: "tectonic region", .. })
        ));
    }

    #[test]
    fn sigma_caps_at_magnitude_eight() {
        let s = |m| Youngs1997.std_dev(Pga, &interface(m, 100.0), StdDevType::Total).unwrap();
        assert!((s(7.0) - 0.75).abs() < 1e-12);
        assert!((s(8.5) - s(8.0)).abs() < 1e-12);
    }

    #[test]
    fn soil_table_has_same_periods() {
        assert_eq!(table::sa_periods(&SOIL), Youngs1997.supported_periods());
    }
}
