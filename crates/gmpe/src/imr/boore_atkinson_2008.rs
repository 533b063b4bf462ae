//! Boore & Atkinson (2008) NGA relation for shallow crustal earthquakes.
//!
//! ```text
//! ln Y = F_M(M) + F_D(rJB, M) + F_S(Vs30, rJB, M)
//! ```
//!
//! `F_M` is a hinged quadratic in magnitude with style-of-faulting offsets,
//! `F_D` is geometric spreading with magnitude-dependent slope plus anelastic
//! attenuation, and `F_S` combines linear Vs30 scaling with a nonlinear term
//! driven by `pga4nl`, the PGA predicted on the 760 m/s reference site.
//!
//! Sigma is derived: intra-event `σ`, inter-event `τU` when the rake is
//! unspecified and `τM` otherwise.

use super::classify::{classify_rake, FaultIndicators, FaultStyle};
use super::table::{self, Row};
use super::{
    Component, DistanceMetric, GmInput, GroundMotionModel, ImType, ImrError, IntensityMeasure,
    ModelInfo, ParamRange, StdDevType,
};
use crate::rupture::TectonicRegion;

#[derive(Debug, Clone, Copy)]
struct Coeffs {
    e1: f64,
    e2: f64,
    e3: f64,
    e4: f64,
    e5: f64,
    e6: f64,
    e7: f64,
    mh: f64,
    c1: f64,
    c2: f64,
    c3: f64,
    h: f64,
    blin: f64,
    b1: f64,
    b2: f64,
    sigma: f64,
    tau_u: f64,
    tau_m: f64,
}

#[rustfmt::skip]
static TABLE: [Row<Coeffs>; 2] = [
    Row {
        im: IntensityMeasure::Pgv,
        c: Coeffs {
            e1: 5.00121, e2: 5.04727, e3: 4.63188, e4: 5.08210, e5: 0.18322, e6: -0.12736, e7: 0.0,
            mh: 8.50, c1: -0.87370, c2: 0.10060, c3: -0.00334, h: 2.54,
            blin: -0.600, b1: -0.500, b2: -0.06,
            sigma: 0.500, tau_u: 0.286, tau_m: 0.256,
        },
    },
    Row {
        im: IntensityMeasure::Pga,
        c: Coeffs {
            e1: -0.53804, e2: -0.50350, e3: -0.75472, e4: -0.50970, e5: 0.28805, e6: -0.10164, e7: 0.0,
            mh: 6.75, c1: -0.66050, c2: 0.11970, c3: -0.01151, h: 1.35,
            blin: -0.360, b1: -0.640, b2: -0.14,
            sigma: 0.502, tau_u: 0.265, tau_m: 0.260,
        },
    },
];

const M_REF: f64 = 4.5;
const R_REF: f64 = 1.0;
const V_REF: f64 = 760.0;
const V1: f64 = 180.0;
const V2: f64 = 300.0;
const A1: f64 = 0.03;
const A2: f64 = 0.09;
const PGA_LOW: f64 = 0.06;

/// Static description.
pub static INFO: ModelInfo = ModelInfo {
    name: "Boore & Atkinson (2008)",
    short_name: "BA_2008",
    distance_metric: DistanceMetric::JoynerBoore,
    measures: &[ImType::Pga, ImType::Pgv],
    components: &[Component::GmRotI50],
    std_dev_types: &[
        StdDevType::Total,
        StdDevType::InterEvent,
        StdDevType::IntraEvent,
        StdDevType::None,
    ],
    site_types: &[],
    tectonic_regions: &[TectonicRegion::ActiveShallow],
    sigma_derived: true,
    magnitude: ParamRange::new(4.0, 9.0, 5.0, 8.0, 5.5),
    distance: ParamRange::new(0.0, 1000.0, 0.0, 200.0, 0.0),
    vs30: ParamRange::new(1.0, 5000.0, 180.0, 1300.0, 760.0),
    depth: ParamRange::new(0.0, 40.0, 0.0, 40.0, 10.0),
};

/// Boore & Atkinson (2008).
#[derive(Debug, Clone, Copy, Default)]
pub struct BooreAtkinson2008;

impl BooreAtkinson2008 {
    fn coeffs(im: IntensityMeasure) -> Result<&'static Coeffs, ImrError> {
        table::lookup(INFO.short_name, &TABLE, im)
    }
}

fn magnitude_term(c: &Coeffs, m: f64, style: FaultStyle) -> f64 {
    let f = FaultIndicators::from_style(style);
    let unspecified = if style == FaultStyle::Unspecified { 1.0 } else { 0.0 };
    let base = c.e1 * unspecified + c.e2 * f.strike_slip + c.e3 * f.normal + c.e4 * f.reverse;
    let dm = m - c.mh;
    if m <= c.mh {
        base + c.e5 * dm + c.e6 * dm * dm
    } else {
        base + c.e7 * dm
    }
}

fn distance_term(c: &Coeffs, m: f64, r_jb: f64) -> f64 {
    let r = r_jb.hypot(c.h);
    (c.c1 + c.c2 * (m - M_REF)) * (r / R_REF).ln() + c.c3 * (r - R_REF)
}

fn nonlinear_slope(c: &Coeffs, vs30: f64) -> f64 {
    if vs30 <= V1 {
        c.b1
    } else if vs30 <= V2 {
        (c.b1 - c.b2) * (vs30 / V2).ln() / (V1 / V2).ln() + c.b2
    } else if vs30 < V_REF {
        c.b2 * (vs30 / V_REF).ln() / (V2 / V_REF).ln()
    } else {
        0.0
    }
}

fn site_term(c: &Coeffs, vs30: f64, pga4nl: f64) -> f64 {
    let linear = c.blin * (vs30 / V_REF).ln();
    let bnl = nonlinear_slope(c, vs30);
    let nonlinear = if pga4nl <= A1 {
        bnl * (PGA_LOW / 0.1).ln()
    } else if pga4nl <= A2 {
        let dx = (A2 / A1).ln();
        let dy = bnl * (A2 / PGA_LOW).ln();
        let cc = (3.0 * dy - bnl * dx) / (dx * dx);
        let dd = -(2.0 * dy - bnl * dx) / (dx * dx * dx);
        let x = (pga4nl / A1).ln();
        bnl * (PGA_LOW / 0.1).ln() + cc * x * x + dd * x * x * x
    } else {
        bnl * (pga4nl / 0.1).ln()
    };
    linear + nonlinear
}

impl GroundMotionModel for BooreAtkinson2008 {
    fn info(&self) -> &'static ModelInfo {
        &INFO
    }

    fn supported_periods(&self) -> Vec<f64> {
        table::sa_periods(&TABLE)
    }

    fn mean(&self, im: IntensityMeasure, input: &GmInput) -> Result<f64, ImrError> {
        let c = Self::coeffs(im)?;
        let r_jb = INFO.check_input(input)?;
        let m = input.magnitude;
        let style = classify_rake(input.rake);
        let pga = Self::coeffs(IntensityMeasure::Pga)?;
        let pga4nl = (magnitude_term(pga, m, style) + distance_term(pga, m, r_jb)).exp();
        Ok(magnitude_term(c, m, style) + distance_term(c, m, r_jb) + site_term(c, input.vs30, pga4nl))
    }

    fn std_dev(&self, im: IntensityMeasure, input: &GmInput, kind: StdDevType) -> Result<f64, ImrError> {
        INFO.check_std_dev_type(kind)?;
        let c = Self::coeffs(im)?;
        INFO.check_input(input)?;
        let tau = if classify_rake(input.rake) == FaultStyle::Unspecified {
            c.tau_u
        } else {
            c.tau_m
        };
        Ok(match kind {
            StdDevType::Total => c.sigma.hypot(tau),
            StdDevType::InterEvent => tau,
            StdDevType::IntraEvent => c.sigma,
            StdDevType::None => 0.0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imr::Distance;

    const PGA: IntensityMeasure = IntensityMeasure::Pga;

    #[test]
    fn reference_site_has_no_site_term() {
        let input = GmInput::new(6.0, Distance::joyner_boore(10.0)).with_vs30(V_REF);
        let pga = BooreAtkinson2008.mean(PGA, &input).unwrap().exp();
        assert!((pga / 0.136_270_2 - 1.0).abs() < 1e-6, "PGA {pga}");
        let c = BooreAtkinson2008::coeffs(PGA).unwrap();
        assert_eq!(site_term(c, V_REF, 0.5), 0.0);
    }

    #[test]
    fn nonlinear_slope_is_continuous() {
        let c = BooreAtkinson2008::coeffs(PGA).unwrap();
        for v in [V1, V2, V_REF] {
            let below = nonlinear_slope(c, v - 1e-9);
            let above = nonlinear_slope(c, v + 1e-9);
            assert!((below - above).abs() < 1e-6, "jump at {v}");
        }
    }

    #[test]
    fn nonlinear_term_is_smooth_in_pga4nl() {
        let c = BooreAtkinson2008::coeffs(PGA).unwrap();
        for p in [A1, A2] {
            let below = site_term(c, 250.0, p - 1e-9);
            let above = site_term(c, 250.0, p + 1e-9);
            assert!((below - above).abs() < 1e-6, "jump at {p}");
        }
    }

    #[test]
    fn unspecified_rake_uses_tau_u() {
        let m = BooreAtkinson2008;
        let ss = GmInput::new(6.0, Distance::joyner_boore(10.0));
        let u = ss.with_rake(f64::NAN);
        assert_eq!(m.std_dev(PGA, &u, StdDevType::InterEvent).unwrap(), 0.265);
        assert_eq!(m.std_dev(PGA, &ss, StdDevType::InterEvent).unwrap(), 0.260);
        let total = m.std_dev(PGA, &u, StdDevType::Total).unwrap();
        assert!((total - 0.566).abs() < 2e-3);
    }

    #[test]
    fn pgv_in_cm_per_s() {
        let input = GmInput::new(7.0, Distance::joyner_boore(10.0));
        let pgv = BooreAtkinson2008.mean(IntensityMeasure::Pgv, &input).unwrap().exp();
        assert!(pgv > 10.0 && pgv < 200.0, "PGV {pgv}");
    }
}
