//! Abrahamson & Silva (1997): shallow crustal earthquakes, rock and deep
//! soil, with a hanging-wall term.
//!
//! ```text
//! ln Y = f1(M, rRup) + F·f3(M) + HW·f4(M, rRup) + S·f5(PGA_rock)
//! ```
//!
//! `F` blends reverse and reverse-oblique faulting (see
//! [`reverse_oblique_weight`]), `HW` is the hanging-wall flag and `S` selects
//! deep soil. The soil term reads the rock PGA predicted for the same event,
//! so every period evaluates the PGA row first.

use super::classify::reverse_oblique_weight;
use super::table::{self, Row};
use super::{
    Component, DistanceMetric, GmInput, GroundMotionModel, ImType, ImrError, IntensityMeasure,
    ModelInfo, ParamRange, SiteType, StdDevType,
};
use crate::rupture::TectonicRegion;

#[derive(Debug, Clone, Copy)]
struct Coeffs {
    c4: f64,
    a1: f64,
    a3: f64,
    a5: f64,
    a6: f64,
    a9: f64,
    a10: f64,
    a11: f64,
    a12: f64,
    b5: f64,
    b6: f64,
}

// Period-independent coefficients.
const A2: f64 = 0.512;
const A4: f64 = -0.144;
const A13: f64 = 0.17;
const C1: f64 = 6.4;
const C5: f64 = 0.03;
const N: f64 = 2.0;

#[rustfmt::skip]
static TABLE: [Row<Coeffs>; 1] = [
    Row {
        im: IntensityMeasure::Pga,
        c: Coeffs {
            c4: 5.60, a1: 1.640, a3: -1.145, a5: 0.610, a6: 0.260, a9: 0.370,
            a10: -0.417, a11: -0.230, a12: 0.0000, b5: 0.70, b6: 0.135,
        },
    },
];

/// Static description.
pub static INFO: ModelInfo = ModelInfo {
    name: "Abrahamson & Silva (1997)",
    short_name: "AS_1997",
    distance_metric: DistanceMetric::Rupture,
    measures: &[ImType::Pga],
    components: &[Component::AverageHorizontal],
    std_dev_types: &[StdDevType::Total, StdDevType::None],
    site_types: &[SiteType::Rock, SiteType::DeepSoil],
    tectonic_regions: &[TectonicRegion::ActiveShallow],
    sigma_derived: false,
    magnitude: ParamRange::new(4.0, 9.0, 4.4, 7.4, 5.5),
    distance: ParamRange::new(0.0, 1000.0, 0.0, 200.0, 0.0),
    vs30: ParamRange::new(1.0, 5000.0, 1.0, 5000.0, 760.0),
    depth: ParamRange::new(0.0, 40.0, 0.0, 40.0, 10.0),
};

/// Abrahamson & Silva (1997).
#[derive(Debug, Clone, Copy, Default)]
pub struct AbrahamsonSilva1997;

impl AbrahamsonSilva1997 {
    fn coeffs(im: IntensityMeasure) -> Result<&'static Coeffs, ImrError> {
        table::lookup(INFO.short_name, &TABLE, im)
    }
}

fn f1(c: &Coeffs, m: f64, r_rup: f64) -> f64 {
    let r = r_rup.hypot(c.c4);
    let slope = if m <= C1 { A2 } else { A4 };
    c.a1 + slope * (m - C1) + c.a12 * (8.5 - m).powf(N) + (c.a3 + A13 * (m - C1)) * r.ln()
}

fn f3(c: &Coeffs, m: f64) -> f64 {
    if m <= 5.8 {
        c.a5
    } else if m < C1 {
        c.a5 + (c.a6 - c.a5) / (C1 - 5.8) * (m - 5.8)
    } else {
        c.a6
    }
}

fn f4(c: &Coeffs, m: f64, r_rup: f64) -> f64 {
    let f_m = (m - 5.5).clamp(0.0, 1.0);
    let f_r = if r_rup <= 4.0 {
        0.0
    } else if r_rup <= 8.0 {
        c.a9 * (r_rup - 4.0) / 4.0
    } else if r_rup <= 18.0 {
        c.a9
    } else if r_rup <= 25.0 {
        c.a9 * (1.0 - (r_rup - 18.0) / 7.0)
    } else {
        0.0
    };
    f_m * f_r
}

fn rock(c: &Coeffs, input: &GmInput, r_rup: f64) -> f64 {
    let m = input.magnitude;
    let f = reverse_oblique_weight(input.rake);
    let hw = if input.hanging_wall { 1.0 } else { 0.0 };
    f1(c, m, r_rup) + f * f3(c, m) + hw * f4(c, m, r_rup)
}

impl GroundMotionModel for AbrahamsonSilva1997 {
    fn info(&self) -> &'static ModelInfo {
        &INFO
    }

    fn supported_periods(&self) -> Vec<f64> {
        table::sa_periods(&TABLE)
    }

    fn mean(&self, im: IntensityMeasure, input: &GmInput) -> Result<f64, ImrError> {
        let c = Self::coeffs(im)?;
        let r_rup = INFO.check_input(input)?;
        let ln_rock = rock(c, input, r_rup);
        if INFO.site_type(input.site_type)? != Some(SiteType::DeepSoil) {
            return Ok(ln_rock);
        }
        let pga_rock = rock(Self::coeffs(IntensityMeasure::Pga)?, input, r_rup).exp();
        Ok(ln_rock + c.a10 + c.a11 * (pga_rock + C5).ln())
    }

    fn std_dev(&self, im: IntensityMeasure, input: &GmInput, kind: StdDevType) -> Result<f64, ImrError> {
        INFO.check_std_dev_type(kind)?;
        let c = Self::coeffs(im)?;
        INFO.check_input(input)?;
        INFO.site_type(input.site_type)?;
        if kind == StdDevType::None {
            return Ok(0.0);
        }
        let m = input.magnitude.clamp(5.0, 7.0);
        Ok(c.b5 - c.b6 * (m - 5.0))
    }
}
