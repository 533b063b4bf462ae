//! Style-of-faulting and site-class classifiers.
//!
//! Pure functions from rake or Vs30 to the categorical indicators family
//! formulas consume. Interval edges are stated on each function.

/// Style of faulting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaultStyle {
    /// Strike-slip.
    StrikeSlip,
    /// Normal.
    Normal,
    /// Reverse or thrust.
    Reverse,
    /// Rake not given.
    Unspecified,
}

/// Wraps a rake into `[-180, 180)`.
#[must_use]
pub fn normalize_rake(rake: f64) -> f64 {
    (rake + 180.0).rem_euclid(360.0) - 180.0
}

/// Classifies a rake angle.
///
/// Reverse if `30 < rake < 150`, normal if `-150 < rake < -30`, strike-slip
/// otherwise (both open intervals, so ±30 and ±150 are strike-slip). A NaN
/// rake is [`FaultStyle::Unspecified`].
#[must_use]
pub fn classify_rake(rake: f64) -> FaultStyle {
    if rake.is_nan() {
        return FaultStyle::Unspecified;
    }
    let r = normalize_rake(rake);
    if r > 30.0 && r < 150.0 {
        FaultStyle::Reverse
    } else if r > -150.0 && r < -30.0 {
        FaultStyle::Normal
    } else {
        FaultStyle::StrikeSlip
    }
}

/// One-hot `(strike-slip, normal, reverse)` indicators.
///
/// An unspecified style is all zeros, which selects a family's "unknown"
/// coefficient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaultIndicators {
    /// Strike-slip indicator.
    pub strike_slip: f64,
    /// Normal indicator.
    pub normal: f64,
    /// Reverse indicator.
    pub reverse: f64,
}

impl FaultIndicators {
    /// Indicators for a style.
    #[must_use]
    pub const fn from_style(style: FaultStyle) -> Self {
        let (strike_slip, normal, reverse) = match style {
            FaultStyle::StrikeSlip => (1.0, 0.0, 0.0),
            FaultStyle::Normal => (0.0, 1.0, 0.0),
            FaultStyle::Reverse => (0.0, 0.0, 1.0),
            FaultStyle::Unspecified => (0.0, 0.0, 0.0),
        };
        Self {
            strike_slip,
            normal,
            reverse,
        }
    }

    /// Indicators for a rake.
    #[must_use]
    pub fn from_rake(rake: f64) -> Self {
        Self::from_style(classify_rake(rake))
    }
}

/// Blended reverse-faulting weight with an oblique transition.
///
/// `1` for `67.5 ≤ rake ≤ 112.5`, `0.5` for reverse-oblique rakes in
/// `22.5 ≤ rake < 67.5` or `112.5 < rake ≤ 157.5`, `0` otherwise. NaN is `0`.
#[must_use]
pub fn reverse_oblique_weight(rake: f64) -> f64 {
    if rake.is_nan() {
        return 0.0;
    }
    let r = normalize_rake(rake);
    if (67.5..=112.5).contains(&r) {
        1.0
    } else if (22.5..=157.5).contains(&r) {
        0.5
    } else {
        0.0
    }
}

/// NEHRP site class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NehrpClass {
    /// Hard rock.
    A,
    /// Rock.
    B,
    /// Very dense soil and soft rock.
    C,
    /// Stiff soil.
    D,
    /// Soft soil.
    E,
}

impl NehrpClass {
    /// Bins Vs30 (m/s): A `> 1500`, B `(760, 1500]`, C `(360, 760]`,
    /// D `[180, 360]`, E `< 180`.
    #[must_use]
    pub fn from_vs30(vs30: f64) -> Self {
        if vs30 > 1500.0 {
            Self::A
        } else if vs30 > 760.0 {
            Self::B
        } else if vs30 > 360.0 {
            Self::C
        } else if vs30 >= 180.0 {
            Self::D
        } else {
            Self::E
        }
    }

    /// Letter name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::E => "E",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rake_edges() {
        assert_eq!(classify_rake(90.0), FaultStyle::Reverse);
        assert_eq!(classify_rake(30.0), FaultStyle::StrikeSlip);
        assert_eq!(classify_rake(30.1), FaultStyle::Reverse);
        assert_eq!(classify_rake(150.0), FaultStyle::StrikeSlip);
        assert_eq!(classify_rake(-90.0), FaultStyle::Normal);
        assert_eq!(classify_rake(-30.0), FaultStyle::StrikeSlip);
        assert_eq!(classify_rake(180.0), FaultStyle::StrikeSlip);
        assert_eq!(classify_rake(0.0), FaultStyle::StrikeSlip);
        assert_eq!(classify_rake(f64::NAN), FaultStyle::Unspecified);
    }

    #[test]
    fn rake_wraps() {
        assert_eq!(classify_rake(450.0), FaultStyle::Reverse);
        assert_eq!(classify_rake(270.0), FaultStyle::Normal);
        assert_eq!(normalize_rake(180.0), -180.0);
    }

    #[test]
    fn indicators_are_one_hot() {
        let i = FaultIndicators::from_rake(-90.0);
        assert_eq!((i.strike_slip, i.normal, i.reverse), (0.0, 1.0, 0.0));
        let u = FaultIndicators::from_rake(f64::NAN);
        assert_eq!((u.strike_slip, u.normal, u.reverse), (0.0, 0.0, 0.0));
    }

    #[test]
    fn oblique_weight() {
        assert_eq!(reverse_oblique_weight(90.0), 1.0);
        assert_eq!(reverse_oblique_weight(67.5), 1.0);
        assert_eq!(reverse_oblique_weight(45.0), 0.5);
        assert_eq!(reverse_oblique_weight(135.0), 0.5);
        assert_eq!(reverse_oblique_weight(0.0), 0.0);
        assert_eq!(reverse_oblique_weight(-90.0), 0.0);
    }

    #[test]
    fn nehrp_edges() {
        assert_eq!(NehrpClass::from_vs30(1500.1), NehrpClass::A);
        assert_eq!(NehrpClass::from_vs30(1500.0), NehrpClass::B);
        assert_eq!(NehrpClass::from_vs30(760.0), NehrpClass::C);
        assert_eq!(NehrpClass::from_vs30(360.0), NehrpClass::D);
        assert_eq!(NehrpClass::from_vs30(180.0), NehrpClass::D);
        assert_eq!(NehrpClass::from_vs30(179.9), NehrpClass::E);
    }
}
