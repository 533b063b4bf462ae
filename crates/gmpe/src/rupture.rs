//! Earthquake ruptures as attenuation relationships consume them.

use core::fmt;

use crate::geo::{Location, RuptureSurface};

/// Tectonic setting of a source, used by families that distinguish them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(rename_all = "snake_case"))]
pub enum TectonicRegion {
    /// Crustal events in active regions (e.g. California).
    #[default]
    ActiveShallow,
    /// Crustal events in stable continental regions.
    StableShallow,
    /// Subduction interface (megathrust) events.
    SubductionInterface,
    /// Intraslab events within the subducting plate.
    SubductionSlab,
    /// Volcanic events.
    Volcanic,
}

impl TectonicRegion {
    /// All regions in canonical order.
    pub const ALL: [Self; 5] = [
        Self::ActiveShallow,
        Self::StableShallow,
        Self::SubductionInterface,
        Self::SubductionSlab,
        Self::Volcanic,
    ];

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ActiveShallow => "Active Shallow Crust",
            Self::StableShallow => "Stable Shallow Crust",
            Self::SubductionInterface => "Subduction Interface",
            Self::SubductionSlab => "Subduction IntraSlab",
            Self::Volcanic => "Volcanic",
        }
    }
}

impl fmt::Display for TectonicRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An earthquake rupture. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Rupture {
    magnitude: f64,
    rake: f64,
    hypocenter: Location,
    surface: RuptureSurface,
    tectonic: TectonicRegion,
}

impl Rupture {
    /// Creates a rupture.
    #[must_use]
    pub fn new(
        magnitude: f64,
        rake: f64,
        hypocenter: Location,
        surface: RuptureSurface,
        tectonic: TectonicRegion,
    ) -> Self {
        Self {
            magnitude,
            rake,
            hypocenter,
            surface,
            tectonic,
        }
    }

    /// A point rupture whose hypocenter is the point itself.
    #[must_use]
    pub fn point(magnitude: f64, rake: f64, hypocenter: Location, tectonic: TectonicRegion) -> Self {
        Self::new(
            magnitude,
            rake,
            hypocenter,
            RuptureSurface::Point(hypocenter),
            tectonic,
        )
    }

    /// Moment magnitude.
    #[must_use]
    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    /// Average rake in degrees.
    #[must_use]
    pub fn rake(&self) -> f64 {
        self.rake
    }

    /// Hypocenter.
    #[must_use]
    pub fn hypocenter(&self) -> &Location {
        &self.hypocenter
    }

    /// Rupture surface.
    #[must_use]
    pub fn surface(&self) -> &RuptureSurface {
        &self.surface
    }

    /// Tectonic region of the generating source.
    #[must_use]
    pub fn tectonic(&self) -> TectonicRegion {
        self.tectonic
    }
}

/// A rupture with its probability of occurring in the forecast time span.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbEqkRupture {
    /// The rupture.
    pub rupture: Rupture,
    /// Probability of one or more occurrences in the time span.
    pub probability: f64,
}

/// Poisson probability of at least one event in `duration` years.
#[inline]
#[must_use]
pub fn poisson_probability(annual_rate: f64, duration: f64) -> f64 {
    -(-annual_rate * duration).exp_m1()
}
