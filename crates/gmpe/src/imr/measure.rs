//! Vocabulary shared by every family: intensity measures, components of
//! motion, standard-deviation types and categorical site types.

use core::fmt;

/// Intensity-measure type names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImType {
    /// Peak ground acceleration (g).
    Pga,
    /// Peak ground velocity (cm/s).
    Pgv,
    /// 5%-damped pseudo-spectral acceleration (g) at a period.
    Sa,
    /// Arias intensity (m/s).
    AriasIntensity,
    /// Modified Mercalli intensity. Not instrumental; no family predicts it
    /// directly, but its name governs the component rule.
    Mmi,
}

impl ImType {
    /// Canonical name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Pga => "PGA",
            Self::Pgv => "PGV",
            Self::Sa => "SA",
            Self::AriasIntensity => "IA",
            Self::Mmi => "MMI",
        }
    }

    /// Parses a canonical name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "PGA" => Some(Self::Pga),
            "PGV" => Some(Self::Pgv),
            "SA" => Some(Self::Sa),
            "IA" => Some(Self::AriasIntensity),
            "MMI" => Some(Self::Mmi),
            _ => None,
        }
    }
}

impl fmt::Display for ImType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A concrete intensity measure: a type plus, for SA, its period in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IntensityMeasure {
    /// Peak ground acceleration.
    Pga,
    /// Peak ground velocity.
    Pgv,
    /// Spectral acceleration at the given period (s).
    Sa(f64),
    /// Arias intensity.
    AriasIntensity,
}

impl IntensityMeasure {
    /// The type of this measure.
    #[must_use]
    pub const fn im_type(self) -> ImType {
        match self {
            Self::Pga => ImType::Pga,
            Self::Pgv => ImType::Pgv,
            Self::Sa(_) => ImType::Sa,
            Self::AriasIntensity => ImType::AriasIntensity,
        }
    }

    /// SA period, if any.
    #[must_use]
    pub const fn period(self) -> Option<f64> {
        match self {
            Self::Sa(p) => Some(p),
            _ => None,
        }
    }

    /// Native units of `exp(mean)`.
    #[must_use]
    pub const fn units(self) -> &'static str {
        match self {
            Self::Pga | Self::Sa(_) => "g",
            Self::Pgv => "cm/s",
            Self::AriasIntensity => "m/s",
        }
    }
}

impl fmt::Display for IntensityMeasure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sa(p) => write!(f, "SA({p} s)"),
            other => f.write_str(other.im_type().name()),
        }
    }
}

/// Component of horizontal or vertical ground motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Component {
    /// Geometric mean of the two horizontal components.
    AverageHorizontal,
    /// Orientation-independent geometric mean, 50th percentile.
    GmRotI50,
    /// A randomly oriented single horizontal component.
    RandomHorizontal,
    /// The larger of the two horizontal components.
    GreaterOfTwo,
    /// Vertical component.
    Vertical,
}

impl Component {
    /// All components.
    pub const ALL: [Self; 5] = [
        Self::AverageHorizontal,
        Self::GmRotI50,
        Self::RandomHorizontal,
        Self::GreaterOfTwo,
        Self::Vertical,
    ];

    /// Canonical name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::AverageHorizontal => "Average Horizontal",
            Self::GmRotI50 => "Average Horizontal (GMRotI50)",
            Self::RandomHorizontal => "Random Horizontal",
            Self::GreaterOfTwo => "Greater of Two Horz.",
            Self::Vertical => "Vertical",
        }
    }

    /// Parses a canonical name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which part of the aleatory variability to report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StdDevType {
    /// Total standard deviation.
    Total,
    /// Between-event component.
    InterEvent,
    /// Within-event component.
    IntraEvent,
    /// Zero; yields a deterministic median.
    None,
}

impl StdDevType {
    /// All types.
    pub const ALL: [Self; 4] = [Self::Total, Self::InterEvent, Self::IntraEvent, Self::None];

    /// Canonical name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Total => "Total",
            Self::InterEvent => "Inter-Event",
            Self::IntraEvent => "Intra-Event",
            Self::None => "None (zero)",
        }
    }

    /// Parses a canonical name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }
}

impl fmt::Display for StdDevType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Categorical site conditions used by families without a Vs30 term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SiteType {
    /// Rock.
    Rock,
    /// Soil (generic).
    Soil,
    /// Deep soil (> 20 m over rock).
    DeepSoil,
    /// Firm soil.
    FirmSoil,
    /// Soft (sedimentary) rock.
    SoftRock,
    /// Hard (crystalline) rock.
    HardRock,
}

impl SiteType {
    /// All site types.
    pub const ALL: [Self; 6] = [
        Self::Rock,
        Self::Soil,
        Self::DeepSoil,
        Self::FirmSoil,
        Self::SoftRock,
        Self::HardRock,
    ];

    /// Canonical name, as stored in a site's `Site Type` parameter.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Rock => "Rock",
            Self::Soil => "Soil",
            Self::DeepSoil => "Deep-Soil",
            Self::FirmSoil => "Firm-soil",
            Self::SoftRock => "Soft-rock",
            Self::HardRock => "Hard-rock",
        }
    }

    /// Parses a canonical name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }
}

impl fmt::Display for SiteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for c in Component::ALL {
            assert_eq!(Component::from_name(c.name()), Some(c));
        }
        for t in StdDevType::ALL {
            assert_eq!(StdDevType::from_name(t.name()), Some(t));
        }
        for s in SiteType::ALL {
            assert_eq!(SiteType::from_name(s.name()), Some(s));
        }
        for i in [ImType::Pga, ImType::Pgv, ImType::Sa, ImType::AriasIntensity, ImType::Mmi] {
            assert_eq!(ImType::from_name(i.name()), Some(i));
        }
        assert_eq!(Component::from_name("NOT_SUPPORTED"), None);
    }

    #[test]
    fn display() {
        assert_eq!(IntensityMeasure::Sa(0.2).to_string(), "SA(0.2 s)");
        assert_eq!(IntensityMeasure::Pgv.to_string(), "PGV");
        assert_eq!(IntensityMeasure::Pgv.units(), "cm/s");
    }
}
