//! Sadigh, Chang, Egan, Makdisi & Youngs (1997): crustal earthquakes, rock
//! and deep-soil sites.
//!
//! Rock:
//!
//! ```text
//! ln Y = C1 + C2 M + C3 (8.5 − M)^2.5 + C4 ln(r + exp(C5 + C6 M)) + C7 ln(r + 2)
//! ```
//!
//! with one coefficient set for `M ≤ 6.5` and another above it. The
//! large-magnitude set differs only in `C1 − 0.65`, `C2 = 1.1` and the
//! saturation constants, which keeps the prediction continuous at 6.5.
//! Reverse ruptures on rock are 1.2 × strike-slip.
//!
//! Deep soil:
//!
//! ```text
//! ln Y = C1 + M − 1.70 ln(r + C4 exp(C5 M)) + C6 + C7 (8.5 − M)^2.5
//! ```
//!
//! with `C1 = −2.17` (strike-slip) or `−1.92` (reverse).
//!
//! Sigma is total only and falls linearly with magnitude to a floor.

use super::classify::{classify_rake, FaultStyle};
use super::table::{self, Row};
use super::{
    Component, DistanceMetric, GmInput, GroundMotionModel, ImType, ImrError, IntensityMeasure,
    ModelInfo, ParamRange, SiteType, StdDevType,
};
use crate::rupture::TectonicRegion;

#[derive(Debug, Clone, Copy)]
struct Coeffs {
    // rock
    c1: f64,
    c3: f64,
    c4: f64,
    c7: f64,
    sigma0: f64,
    // deep soil
    soil_c6: f64,
    soil_c7: f64,
    soil_sigma0: f64,
}

#[allow(clippy::too_many_arguments)]
const fn row(
    im: IntensityMeasure,
    c1: f64,
    c3: f64,
    c4: f64,
    c7: f64,
    sigma0: f64,
    soil_c6: f64,
    soil_c7: f64,
    soil_sigma0: f64,
) -> Row<Coeffs> {
    Row {
        im,
        c: Coeffs {
            c1,
            c3,
            c4,
            c7,
            sigma0,
            soil_c6,
            soil_c7,
            soil_sigma0,
        },
    }
}

use IntensityMeasure::{Pga, Sa};

#[rustfmt::skip]
static TABLE: [Row<Coeffs>; 7] = [
    //  im        C1      C3      C4      C7      σ0    soil C6  soil C7 soil σ0
    row(Pga,     -0.624,  0.000, -2.100,  0.000, 1.39,  0.0000,  0.000, 1.52),
    row(Sa(0.1),  0.275,  0.006, -2.148, -0.041, 1.41,  0.6395,  0.005, 1.54),
    row(Sa(0.2),  0.153, -0.004, -2.080,  0.000, 1.43,  0.9187, -0.004, 1.565),
    row(Sa(0.3), -0.057, -0.017, -2.028,  0.000, 1.45,  0.9547, -0.014, 1.58),
    row(Sa(0.5), -0.588, -0.040, -1.945,  0.000, 1.50,  0.8494, -0.033, 1.61),
    row(Sa(1.0), -1.705, -0.055, -1.800,  0.000, 1.53,  0.5665, -0.065, 1.66),
    row(Sa(2.0), -2.945, -0.070, -1.670,  0.000, 1.53,  0.1001, -0.108, 1.70),
];

const HINGE_MAGNITUDE: f64 = 6.5;
const ROCK_SIGMA_SLOPE: f64 = 0.14;
const ROCK_SIGMA_MAG_CAP: f64 = 7.21;
const SOIL_SIGMA_SLOPE: f64 = 0.16;
const SOIL_SIGMA_MAG_CAP: f64 = 7.0;
const ROCK_REVERSE_FACTOR_LN: f64 = 0.182_321_556_793_954_6; // ln 1.2

/// Static description.
pub static INFO: ModelInfo = ModelInfo {
    name: "Sadigh et al. (1997)",
    short_name: "Sadigh_1997",
    distance_metric: DistanceMetric::Rupture,
    measures: &[ImType::Pga, ImType::Sa],
    components: &[Component::AverageHorizontal],
    std_dev_types: &[StdDevType::Total, StdDevType::None],
    site_types: &[SiteType::Rock, SiteType::DeepSoil],
    tectonic_regions: &[TectonicRegion::ActiveShallow],
    sigma_derived: false,
    magnitude: ParamRange::new(4.0, 9.0, 4.0, 8.0, 5.5),
    distance: ParamRange::new(0.0, 1000.0, 0.0, 100.0, 0.0),
    vs30: ParamRange::new(1.0, 5000.0, 1.0, 5000.0, 760.0),
    depth: ParamRange::new(0.0, 40.0, 0.0, 40.0, 10.0),
};

/// Sadigh et al. (1997).
#[derive(Debug, Clone, Copy, Default)]
pub struct Sadigh1997;

impl Sadigh1997 {
    fn coeffs(im: IntensityMeasure) -> Result<&'static Coeffs, ImrError> {
        table::lookup(INFO.short_name, &TABLE, im)
    }
}

fn rock_mean(c: &Coeffs, m: f64, r: f64, reverse: bool) -> f64 {
    let (c1, c2, c5, c6) = if m <= HINGE_MAGNITUDE {
        (c.c1, 1.0, 1.29649, 0.250)
    } else {
        (c.c1 - 0.65, 1.1, -0.48451, 0.524)
    };
    let ln_y = c1
        + c2 * m
        + c.c3 * (8.5 - m).powf(2.5)
        + c.c4 * (r + (c5 + c6 * m).exp()).ln()
        + c.c7 * (r + 2.0).ln();
    if reverse {
        ln_y + ROCK_REVERSE_FACTOR_LN
    } else {
        ln_y
    }
}

fn soil_mean(c: &Coeffs, m: f64, r: f64, reverse: bool) -> f64 {
    let c1 = if reverse { -1.92 } else { -2.17 };
    let (c4, c5) = if m <= HINGE_MAGNITUDE {
        (2.1863, 0.32)
    } else {
        (0.3825, 0.5882)
    };
    c1 + m - 1.70 * (r + c4 * (c5 * m).exp()).ln() + c.soil_c6 + c.soil_c7 * (8.5 - m).powf(2.5)
}

impl GroundMotionModel for Sadigh1997 {
    fn info(&self) -> &'static ModelInfo {
        &INFO
    }

    fn supported_periods(&self) -> Vec<f64> {
        table::sa_periods(&TABLE)
    }

    fn mean(&self, im: IntensityMeasure, input: &GmInput) -> Result<f64, ImrError> {
        let c = Self::coeffs(im)?;
        let r = INFO.check_input(input)?;
        let reverse = classify_rake(input.rake) == FaultStyle::Reverse;
        let m = input.magnitude;
        Ok(match INFO.site_type(input.site_type)? {
            Some(SiteType::DeepSoil) => soil_mean(c, m, r, reverse),
            _ => rock_mean(c, m, r, reverse),
        })
    }

    fn std_dev(&self, im: IntensityMeasure, input: &GmInput, kind: StdDevType) -> Result<f64, ImrError> {
        INFO.check_std_dev_type(kind)?;
        let c = Self::coeffs(im)?;
        INFO.check_input(input)?;
        let site = INFO.site_type(input.site_type)?;
        if kind == StdDevType::None {
            return Ok(0.0);
        }
        let m = input.magnitude;
        Ok(match site {
            Some(SiteType::DeepSoil) => c.soil_sigma0 - SOIL_SIGMA_SLOPE * m.min(SOIL_SIGMA_MAG_CAP),
            _ => c.sigma0 - ROCK_SIGMA_SLOPE * m.min(ROCK_SIGMA_MAG_CAP),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imr::Distance;

    fn rock(m: f64, r: f64) -> GmInput {
        GmInput::new(m, Distance::rupture(r)).with_site_type(SiteType::Rock)
    }

    #[test]
    fn continuous_at_hinge() {
        let below = Sadigh1997.mean(Pga, &rock(6.5, 20.0)).unwrap();
        let above = Sadigh1997.mean(Pga, &rock(6.5 + 1e-9, 20.0)).unwrap();
        assert!((below - above).abs() < 1e-6);
        let soil = |m| rock(m, 20.0).with_site_type(SiteType::DeepSoil);
        let below = Sadigh1997.mean(Sa(1.0), &soil(6.5)).unwrap();
        let above = Sadigh1997.mean(Sa(1.0), &soil(6.5 + 1e-9)).unwrap();
        assert!((below - above).abs() < 1e-3);
    }

    #[test]
    fn reverse_is_twenty_percent_higher_on_rock() {
        let ss = rock(6.0, 15.0);
        let rv = ss.with_rake(90.0);
        let ratio = (Sadigh1997.mean(Sa(0.2), &rv).unwrap() - Sadigh1997.mean(Sa(0.2), &ss).unwrap()).exp();
        assert!((ratio - 1.2).abs() < 1e-12);
    }

    #[test]
    fn rock_pga_hand_value() {
        // M 7, rRup 10 km, strike-slip.
        let pga = Sadigh1997.mean(Pga, &rock(7.0, 10.0)).unwrap().exp();
        assert!((pga / 0.372_535_9 - 1.0).abs() < 1e-6, "PGA {pga}");
    }

    #[test]
    fn sigma_floors() {
        let s = |m| Sadigh1997.std_dev(Pga, &rock(m, 10.0), StdDevType::Total).unwrap();
        assert!((s(5.0) - 0.69).abs() < 1e-12);
        assert!((s(7.21) - s(8.0)).abs() < 1e-12);
        let soil = rock(7.5, 10.0).with_site_type(SiteType::DeepSoil);
        let floor = |im| Sadigh1997.std_dev(im, &soil, StdDevType::Total).unwrap();
        assert!((floor(Sa(1.0)) - 0.54).abs() < 1e-12);
        assert!((floor(Sa(2.0)) - 0.58).abs() < 1e-12);
        assert!(Sadigh1997.std_dev(Pga, &rock(6.0, 10.0), StdDevType::InterEvent).is_err());
    }

    #[test]
    fn rejects_foreign_site_type() {
        let input = rock(6.0, 10.0).with_site_type(SiteType::SoftRock);
        assert!(matches!(
            Sadigh1997.mean(Pga, &input),
            Err(ImrError::UnsupportedSelection { kind: "site type", .. })
        ));
    }
}
