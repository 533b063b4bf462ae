//! Errors raised by attenuation relationships.

use thiserror::Error;

use super::DistanceMetric;

/// Everything that can go wrong configuring or querying a relationship.
///
/// Setter errors are raised before any state changes, so a failed call
/// leaves the relationship exactly as it was.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ImrError {
    /// A value violated a parameter's hard constraint.
    #[error("invalid value {value} for {name}: {reason}")]
    InvalidParameterValue {
        /// Parameter name.
        name: &'static str,
        /// Rejected value.
        value: f64,
        /// Human-readable constraint that was violated.
        reason: String,
    },
    /// A name (intensity measure, std-dev type, site type, ...) the family
    /// does not recognise.
    #[error("{family} does not support {kind} `{name}`")]
    UnsupportedSelection {
        /// Family short name.
        family: &'static str,
        /// What was being selected.
        kind: &'static str,
        /// The offending name.
        name: String,
    },
    /// A component-of-motion name the family does not recognise.
    #[error("{family} does not support component `{name}`")]
    UnsupportedComponent {
        /// Family short name.
        family: &'static str,
        /// The offending component name.
        name: String,
    },
    /// A distance tagged with the wrong metric for this family.
    #[error("{family} expects {expected} distance, got {actual}")]
    DistanceMetricMismatch {
        /// Family short name.
        family: &'static str,
        /// Metric the family is calibrated against.
        expected: DistanceMetric,
        /// Metric supplied by the caller.
        actual: DistanceMetric,
    },
    /// A rupture was supplied before any site, so no distance exists.
    #[error("a site must be set before a rupture")]
    SiteNotSet,
}

impl ImrError {
    pub(crate) fn unsupported(family: &'static str, kind: &'static str, name: impl ToString) -> Self {
        Self::UnsupportedSelection {
            family,
            kind,
            name: name.to_string(),
        }
    }
}
