//! Boore, Joyner & Fumal (1997): shallow crustal earthquakes in western
//! North America.
//!
//! ```text
//! ln Y = b1 + b2 (M − 6) + b3 (M − 6)² + b5 ln r + bV ln(Vs30 / VA)
//! r    = sqrt(rJB² + h²)
//! ```
//!
//! `b1` is `b1ss` for strike-slip, `b1rv` for reverse and `b1all` for normal
//! or unspecified rakes. Sigma is derived: intra-event is `sqrt(σ1² + σc²)`,
//! inter-event is `σe`.

use super::classify::{classify_rake, FaultStyle};
use super::table::{self, Row};
use super::{
    Component, DistanceMetric, GmInput, GroundMotionModel, ImType, ImrError, IntensityMeasure,
    ModelInfo, ParamRange, StdDevType,
};
use crate::rupture::TectonicRegion;

#[derive(Debug, Clone, Copy)]
struct Coeffs {
    b1ss: f64,
    b1rv: f64,
    b1all: f64,
    b2: f64,
    b3: f64,
    b5: f64,
    bv: f64,
    va: f64,
    h: f64,
    sigma1: f64,
    sigma_c: f64,
    sigma_e: f64,
}

#[allow(clippy::too_many_arguments)]
const fn row(
    im: IntensityMeasure,
    b1ss: f64,
    b1rv: f64,
    b1all: f64,
    b2: f64,
    b3: f64,
    b5: f64,
    bv: f64,
    va: f64,
    h: f64,
    sigma1: f64,
    sigma_c: f64,
    sigma_e: f64,
) -> Row<Coeffs> {
    Row {
        im,
        c: Coeffs {
            b1ss,
            b1rv,
            b1all,
            b2,
            b3,
            b5,
            bv,
            va,
            h,
            sigma1,
            sigma_c,
            sigma_e,
        },
    }
}

use IntensityMeasure::{Pga, Sa};

#[rustfmt::skip]
static TABLE: [Row<Coeffs>; 7] = [
    //  im        b1ss    b1rv    b1all   b2     b3      b5      bv      VA      h     σ1     σc     σe
    row(Pga,     -0.313, -0.117, -0.242, 0.527,  0.000, -0.778, -0.371, 1396.0, 5.57, 0.431, 0.160, 0.184),
    row(Sa(0.1),  1.006,  1.087,  1.059, 0.753, -0.226, -0.934, -0.212, 1112.0, 6.27, 0.440, 0.134, 0.000),
    row(Sa(0.2),  0.999,  1.170,  1.089, 0.711, -0.207, -0.924, -0.292, 2118.0, 7.02, 0.465, 0.148, 0.000),
    row(Sa(0.3),  0.598,  0.803,  0.700, 0.769, -0.161, -0.893, -0.401, 2133.0, 5.94, 0.487, 0.166, 0.000),
    row(Sa(0.5), -0.122,  0.087, -0.025, 0.884, -0.090, -0.846, -0.655, 1795.0, 4.13, 0.519, 0.191, 0.074),
    row(Sa(1.0), -1.133, -1.009, -1.080, 1.036, -0.032, -0.798, -0.698, 1406.0, 2.90, 0.553, 0.224, 0.255),
    row(Sa(2.0), -1.699, -1.801, -1.743, 1.085, -0.085, -0.812, -0.655, 1795.0, 5.85, 0.585, 0.270, 0.335),
];

/// Static description.
pub static INFO: ModelInfo = ModelInfo {
    name: "Boore, Joyner & Fumal (1997)",
    short_name: "BJF_1997",
    distance_metric: DistanceMetric::JoynerBoore,
    measures: &[ImType::Pga, ImType::Sa],
    components: &[Component::RandomHorizontal],
    std_dev_types: &[
        StdDevType::Total,
        StdDevType::InterEvent,
        StdDevType::IntraEvent,
        StdDevType::None,
    ],
    site_types: &[],
    tectonic_regions: &[TectonicRegion::ActiveShallow],
    sigma_derived: true,
    magnitude: ParamRange::new(4.0, 9.0, 5.5, 7.5, 5.5),
    distance: ParamRange::new(0.0, 1000.0, 0.0, 80.0, 0.0),
    vs30: ParamRange::new(1.0, 5000.0, 140.0, 1620.0, 760.0),
    depth: ParamRange::new(0.0, 40.0, 0.0, 40.0, 10.0),
};

/// Boore, Joyner & Fumal (1997).
#[derive(Debug, Clone, Copy, Default)]
pub struct BooreJoynerFumal1997;

impl BooreJoynerFumal1997 {
    fn coeffs(im: IntensityMeasure) -> Result<&'static Coeffs, ImrError> {
        table::lookup(INFO.short_name, &TABLE, im)
    }
}

impl GroundMotionModel for BooreJoynerFumal1997 {
    fn info(&self) -> &'static ModelInfo {
        &INFO
    }

    fn supported_periods(&self) -> Vec<f64> {
        table::sa_periods(&TABLE)
    }

    fn mean(&self, im: IntensityMeasure, input: &GmInput) -> Result<f64, ImrError> {
        let c = Self::coeffs(im)?;
        let r_jb = INFO.check_input(input)?;
        let b1 = match classify_rake(input.rake) {
            FaultStyle::StrikeSlip => c.b1ss,
            FaultStyle::Reverse => c.b1rv,
            FaultStyle::Normal | FaultStyle::Unspecified => c.b1all,
        };
        let dm = input.magnitude - 6.0;
        let r = r_jb.hypot(c.h);
        Ok(b1 + c.b2 * dm + c.b3 * dm * dm + c.b5 * r.ln() + c.bv * (input.vs30 / c.va).ln())
    }

    fn std_dev(&self, im: IntensityMeasure, input: &GmInput, kind: StdDevType) -> Result<f64, ImrError> {
        INFO.check_std_dev_type(kind)?;
        let c = Self::coeffs(im)?;
        INFO.check_input(input)?;
        let intra = c.sigma1.hypot(c.sigma_c);
        Ok(match kind {
            StdDevType::Total => intra.hypot(c.sigma_e),
            StdDevType::InterEvent => c.sigma_e,
            StdDevType::IntraEvent => intra,
            StdDevType::None => 0.0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imr::Distance;

    #[test]
    fn pga_hand_value() {
        // M 6.5 strike-slip, rJB 10 km, Vs30 760.
        let input = GmInput::new(6.5, Distance::joyner_boore(10.0));
        let pga = BooreJoynerFumal1997.mean(Pga, &input).unwrap().exp();
        assert!((pga / 0.178_987_4 - 1.0).abs() < 1e-6, "PGA {pga}");
    }

    #[test]
    fn reverse_uses_b1rv() {
        let ss = GmInput::new(6.0, Distance::joyner_boore(20.0));
        let rv = ss.with_rake(90.0);
        let d = BooreJoynerFumal1997.mean(Pga, &rv).unwrap() - BooreJoynerFumal1997.mean(Pga, &ss).unwrap();
        assert!((d - (-0.117 + 0.313)).abs() < 1e-12);
    }

    #[test]
    fn softer_sites_amplify() {
        let rock = GmInput::new(6.0, Distance::joyner_boore(20.0)).with_vs30(1000.0);
        let soil = rock.with_vs30(250.0);
        let m = BooreJoynerFumal1997;
        assert!(m.mean(Sa(1.0), &soil).unwrap() > m.mean(Sa(1.0), &rock).unwrap());
    }

    #[test]
    fn rejects_rupture_distance() {
        let input = GmInput::new(6.0, Distance::rupture(20.0));
        assert!(matches!(
            BooreJoynerFumal1997.mean(Pga, &input),
            Err(ImrError::DistanceMetricMismatch { .. })
        ));
    }

    #[test]
    fn pga_sigma() {
        let input = GmInput::new(6.0, Distance::joyner_boore(20.0));
        let m = BooreJoynerFumal1997;
        let total = m.std_dev(Pga, &input, StdDevType::Total).unwrap();
        assert!((total - 0.495).abs() < 1e-3, "total {total}");
    }
}
