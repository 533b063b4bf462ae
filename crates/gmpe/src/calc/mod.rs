//! Hazard calculations driven by an attenuation relationship.

mod hazard_curve;

pub use hazard_curve::{HazardCurve, HazardCurveCalculator, DEFAULT_MAX_DISTANCE_KM};

use thiserror::Error;

use crate::imr::ImrError;
use crate::source::SourceError;

/// Errors from a hazard calculation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HazardError {
    /// The relationship rejected a site, rupture or query.
    #[error(transparent)]
    Imr(#[from] ImrError),
    /// A source or forecast could not be built.
    #[error(transparent)]
    Source(#[from] SourceError),
    /// Intensity levels empty, non-positive or not strictly ascending.
    #[error("intensity level {index} ({value}) must be positive and strictly ascending")]
    InvalidLevels {
        /// Index of the first bad level.
        index: usize,
        /// Offending value.
        value: f64,
    },
    /// Cut-off distance not positive.
    #[error("maximum source distance {km} km must be positive")]
    InvalidMaxDistance {
        /// Offending distance.
        km: f64,
    },
}
