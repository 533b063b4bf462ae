//! Travasarou, Bray & Abrahamson (2003): Arias intensity.
//!
//! ```text
//! ln Ia = c1 + c2 (M − 6) + c3 ln(M / 6) + c4 ln sqrt(r² + h²)
//!       + (s11 + s12 (M − 6)) Sc + (s21 + s22 (M − 6)) Sd
//!       + f1 FN + f2 FR
//! ```
//!
//! Site class comes from Vs30 via [`NehrpClass`]: B (and A) is the reference,
//! `Sc = 1` for C, `Sd = 1` for D and E. Intra-event sigma depends on the
//! site class and on the predicted intensity; inter-event sigma depends on
//! magnitude. Total is derived.

use super::classify::{classify_rake, FaultStyle, NehrpClass};
use super::{
    Component, DistanceMetric, GmInput, GroundMotionModel, ImType, ImrError, IntensityMeasure,
    ModelInfo, ParamRange, StdDevType,
};
use crate::rupture::TectonicRegion;

const C1: f64 = 2.800;
const C2: f64 = -1.981;
const C3: f64 = 20.72;
const C4: f64 = -1.703;
const H: f64 = 8.78;
const S11: f64 = 0.454;
const S12: f64 = 0.101;
const S21: f64 = 0.479;
const S22: f64 = 0.334;
const F1: f64 = -0.166;
const F2: f64 = 0.512;

/// Intensities (m/s) bounding the sloped intra-event sigma branch.
const IA_LOW: f64 = 0.013;
const IA_HIGH: f64 = 0.125;
const SIGMA_SLOPE: f64 = 0.106;

/// Static description.
pub static INFO: ModelInfo = ModelInfo {
    name: "Travasarou, Bray & Abrahamson (2003)",
    short_name: "TBA_2003",
    distance_metric: DistanceMetric::Rupture,
    measures: &[ImType::AriasIntensity],
    components: &[Component::AverageHorizontal],
    std_dev_types: &[
        StdDevType::Total,
        StdDevType::InterEvent,
        StdDevType::IntraEvent,
        StdDevType::None,
    ],
    site_types: &[],
    tectonic_regions: &[TectonicRegion::ActiveShallow],
    sigma_derived: true,
    magnitude: ParamRange::new(4.0, 9.0, 4.7, 7.6, 6.0),
    distance: ParamRange::new(0.0, 1000.0, 0.0, 250.0, 0.0),
    vs30: ParamRange::new(1.0, 5000.0, 180.0, 1500.0, 760.0),
    depth: ParamRange::new(0.0, 40.0, 0.0, 40.0, 10.0),
};

/// Travasarou, Bray & Abrahamson (2003).
#[derive(Debug, Clone, Copy, Default)]
pub struct Travasarou2003;

/// `(Sc, Sd)` indicators.
fn site_indicators(vs30: f64) -> (f64, f64) {
    match NehrpClass::from_vs30(vs30) {
        NehrpClass::A | NehrpClass::B => (0.0, 0.0),
        NehrpClass::C => (1.0, 0.0),
        NehrpClass::D | NehrpClass::E => (0.0, 1.0),
    }
}

fn ln_arias(m: f64, r: f64, vs30: f64, rake: f64) -> f64 {
    let (sc, sd) = site_indicators(vs30);
    let (fn_, fr) = match classify_rake(rake) {
        FaultStyle::Normal => (1.0, 0.0),
        FaultStyle::Reverse => (0.0, 1.0),
        FaultStyle::StrikeSlip | FaultStyle::Unspecified => (0.0, 0.0),
    };
    let dm = m - 6.0;
    C1 + C2 * dm + C3 * (m / 6.0).ln() + C4 * r.hypot(H).ln()
        + (S11 + S12 * dm) * sc
        + (S21 + S22 * dm) * sd
        + F1 * fn_
        + F2 * fr
}

fn intra_sigma(vs30: f64, arias: f64) -> f64 {
    let (low, high) = match NehrpClass::from_vs30(vs30) {
        NehrpClass::A | NehrpClass::B => (1.18, 0.94),
        NehrpClass::C => (1.17, 0.93),
        NehrpClass::D | NehrpClass::E => (0.96, 0.73),
    };
    if arias <= IA_LOW {
        low
    } else if arias < IA_HIGH {
        low - SIGMA_SLOPE * (arias / IA_LOW).ln()
    } else {
        high
    }
}

fn inter_sigma(m: f64) -> f64 {
    if m <= 4.7 {
        0.611
    } else if m < 7.6 {
        0.611 - 0.047 * (m - 4.7)
    } else {
        0.475
    }
}

impl Travasarou2003 {
    fn evaluate(im: IntensityMeasure, input: &GmInput) -> Result<f64, ImrError> {
        if im != IntensityMeasure::AriasIntensity {
            return Err(ImrError::unsupported(INFO.short_name, "intensity measure", im));
        }
        let r = INFO.check_input(input)?;
        Ok(ln_arias(input.magnitude, r, input.vs30, input.rake))
    }
}

impl GroundMotionModel for Travasarou2003 {
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
        let intra = intra_sigma(input.vs30, mean.exp());
        let inter = inter_sigma(input.magnitude);
        Ok(match kind {
            StdDevType::Total => intra.hypot(inter),
            StdDevType::InterEvent => inter,
            StdDevType::IntraEvent => intra,
            StdDevType::None => 0.0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imr::Distance;

    const IA: IntensityMeasure = IntensityMeasure::AriasIntensity;

    #[test]
    fn reference_case() {
        // M 6, rRup 0, site B, strike-slip.
        let input = GmInput::new(6.0, Distance::rupture(0.0)).with_vs30(1000.0);
        let ia = Travasarou2003.mean(IA, &input).unwrap().exp();
        assert!((ia / 0.406_680_5 - 1.0).abs() < 1e-6, "Ia {ia}");
        let sigma = Travasarou2003.std_dev(IA, &input, StdDevType::Total).unwrap();
        assert!((sigma - 1.089_032).abs() < 1e-6, "sigma {sigma}");
    }

    #[test]
    fn site_classes() {
        let b = GmInput::new(6.0, Distance::rupture(20.0)).with_vs30(800.0);
        let c = b.with_vs30(500.0);
        let d = b.with_vs30(250.0);
        let m = Travasarou2003;
        let ln_b = m.mean(IA, &b).unwrap();
        assert!((m.mean(IA, &c).unwrap() - ln_b - S11).abs() < 1e-12);
        assert!((m.mean(IA, &d).unwrap() - ln_b - S21).abs() < 1e-12);
    }

    #[test]
    fn sigma_branches_are_continuous() {
        assert!((inter_sigma(7.6 - 1e-9) - 0.475).abs() < 1e-3);
        for vs30 in [1000.0, 500.0, 250.0] {
            let lo = intra_sigma(vs30, IA_LOW);
            let above_lo = intra_sigma(vs30, IA_LOW * (1.0 + 1e-9));
            assert!((above_lo - lo).abs() < 1e-9, "vs30 {vs30}: {lo} then {above_lo}");
            let below_hi = intra_sigma(vs30, IA_HIGH * (1.0 - 1e-9));
            assert!((intra_sigma(vs30, IA_HIGH) - below_hi).abs() < 1e-2);
        }
    }

    #[test]
    fn total_is_derived() {
        let input = GmInput::new(6.5, Distance::rupture(15.0));
        let m = Travasarou2003;
        let t = m.std_dev(IA, &input, StdDevType::Total).unwrap();
        let a = m.std_dev(IA, &input, StdDevType::InterEvent).unwrap();
        let e = m.std_dev(IA, &input, StdDevType::IntraEvent).unwrap();
        assert!((t * t - a * a - e * e).abs() < 1e-12);
    }

    #[test]
    fn arias_only() {
        let input = GmInput::new(6.5, Distance::rupture(15.0));
        assert!(Travasarou2003.mean(IntensityMeasure::Pga, &input).is_err());
    }
}
