//! Earthquake sources and the rupture forecast built from them.

mod area;
mod fault;
mod forecast;

pub use area::AreaSource;
pub use fault::{wells_coppersmith_area, FaultSourceData, SimpleFaultSource};
pub use forecast::EqkRuptureForecast;

use thiserror::Error;

use crate::geo::Location;
use crate::mfd::MfdError;
use crate::rupture::{Rupture, TectonicRegion};

/// Errors from building geometry, sources or forecasts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SourceError {
    /// A polygon with too few vertices or zero extent.
    #[error("region needs at least 3 distinct vertices, got {vertices}")]
    EmptyRegion {
        /// Vertices supplied.
        vertices: usize,
    },
    /// A fault trace with fewer than two points.
    #[error("fault trace needs at least 2 points, got {points}")]
    DegenerateTrace {
        /// Points supplied.
        points: usize,
    },
    /// Dip outside `(0, 90]`.
    #[error("dip {dip} is outside (0, 90]")]
    InvalidDip {
        /// Offending dip.
        dip: f64,
    },
    /// Seismogenic depths negative or out of order.
    #[error("seismogenic depths upper {upper} / lower {lower} are invalid")]
    InvalidDepths {
        /// Upper seismogenic depth.
        upper: f64,
        /// Lower seismogenic depth.
        lower: f64,
    },
    /// Non-positive grid spacing.
    #[error("grid spacing {spacing} must be positive")]
    InvalidSpacing {
        /// Offending spacing.
        spacing: f64,
    },
    /// An area source whose grid has no node inside the region.
    #[error("area source `{name}` has no grid nodes at spacing {spacing}°")]
    NoGridNodes {
        /// Source name.
        name: String,
        /// Grid spacing in degrees.
        spacing: f64,
    },
    /// A scalar source property outside its domain.
    #[error("invalid {name}: {value}")]
    InvalidValue {
        /// Property name.
        name: &'static str,
        /// Offending value.
        value: f64,
    },
    /// Forecast duration not positive and finite.
    #[error("forecast duration {years} yr must be positive")]
    InvalidDuration {
        /// Offending duration.
        years: f64,
    },
    /// The source's distribution is malformed.
    #[error(transparent)]
    Mfd(#[from] MfdError),
}

/// The source types a forecast can hold.
#[derive(Debug, Clone, PartialEq)]
pub enum SeismicSource {
    /// A planar fault.
    SimpleFault(SimpleFaultSource),
    /// A gridded area zone.
    Area(AreaSource),
}

impl SeismicSource {
    /// Source name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::SimpleFault(s) => &s.data().name,
            Self::Area(a) => a.name(),
        }
    }

    /// Tectonic region of every rupture.
    #[must_use]
    pub fn tectonic(&self) -> TectonicRegion {
        match self {
            Self::SimpleFault(s) => s.data().tectonic,
            Self::Area(a) => a.tectonic(),
        }
    }

    /// Every rupture with its annual rate.
    #[must_use]
    pub fn ruptures(&self) -> Vec<(Rupture, f64)> {
        match self {
            Self::SimpleFault(s) => s.ruptures(),
            Self::Area(a) => a.ruptures(),
        }
    }

    /// Shortest horizontal distance from `site` to anything the source can
    /// rupture.
    #[must_use]
    pub fn min_distance(&self, site: &Location) -> f64 {
        match self {
            Self::SimpleFault(s) => s.surface().distance_jb(site),
            Self::Area(a) => a.region().distance_to(site),
        }
    }
}

impl From<SimpleFaultSource> for SeismicSource {
    fn from(s: SimpleFaultSource) -> Self {
        Self::SimpleFault(s)
    }
}

impl From<AreaSource> for SeismicSource {
    fn from(a: AreaSource) -> Self {
        Self::Area(a)
    }
}
