//! # Attenuation relationships
//!
//! Every family implements [`GroundMotionModel`], a stateless capability set
//! over explicit primitive inputs ([`GmInput`]). [`AttenuationRelationship`]
//! is the stateful adapter a hazard-curve loop drives: it owns the current
//! configuration, turns rupture/site pairs into a `GmInput`, and calls the
//! stateless form, so both calling conventions agree by construction.
//!
//! ```
//! use gmpe::imr::{registry, Distance, GmInput, IntensityMeasure, StdDevType};
//!
//! let bjf = registry::model_by_short_name("BJF_1997").unwrap();
//! let input = GmInput::new(6.5, Distance::joyner_boore(10.0)).with_vs30(760.0);
//! let ln_pga = bjf.mean(IntensityMeasure::Pga, &input).unwrap();
//! let sigma = bjf.std_dev(IntensityMeasure::Pga, &input, StdDevType::Total).unwrap();
//! assert!(ln_pga.exp() > 0.05 && ln_pga.exp() < 1.0);
//! assert!(sigma > 0.0);
//! ```
//!
//! # Distances
//!
//! Distances are tagged with their [`DistanceMetric`]. A family handed a
//! distance in a metric it was not calibrated against fails with
//! [`ImrError::DistanceMetricMismatch`] instead of silently mis-predicting.

use core::fmt;

use crate::rupture::TectonicRegion;

mod error;
mod measure;
mod param;

pub mod classify;
pub mod exceedance;
pub mod registry;
pub mod relationship;
pub mod table;

pub mod abrahamson_silva_1997;
pub mod boore_atkinson_2008;
pub mod boore_joyner_fumal_1997;
pub mod campbell_1997;
pub mod cornell_1979;
pub mod sadigh_1997;
pub mod spudich_1999;
pub mod travasarou_2003;
pub mod youngs_1997;

pub use error::ImrError;
pub use exceedance::SigmaTruncation;
pub use measure::{Component, ImType, IntensityMeasure, SiteType, StdDevType};
pub use param::{
    ParamRange, ParameterWarning, ParameterWarningListener, RecordingListener,
    TracingWarningListener,
};
pub use relationship::{AttenuationRelationship, ImrConfig};

// ============================================================================
// Distance
// ============================================================================

/// Site-to-source distance metrics. Not interchangeable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DistanceMetric {
    /// Closest distance to the rupture surface (rRup).
    Rupture,
    /// Closest horizontal distance to the surface projection (rJB).
    JoynerBoore,
    /// Closest distance to the seismogenic part of the rupture (rSeis).
    Seismogenic,
    /// Straight-line distance to the hypocenter.
    Hypocentral,
}

impl DistanceMetric {
    /// Short name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Rupture => "rRup",
            Self::JoynerBoore => "rJB",
            Self::Seismogenic => "rSeis",
            Self::Hypocentral => "rHypo",
        }
    }
}

impl fmt::Display for DistanceMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A distance in km together with the metric it was measured in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Distance {
    /// Metric.
    pub metric: DistanceMetric,
    /// Distance in km.
    pub km: f64,
}

impl Distance {
    /// Creates a tagged distance.
    #[must_use]
    pub const fn new(metric: DistanceMetric, km: f64) -> Self {
        Self { metric, km }
    }

    /// Rupture distance.
    #[must_use]
    pub const fn rupture(km: f64) -> Self {
        Self::new(DistanceMetric::Rupture, km)
    }

    /// Joyner-Boore distance.
    #[must_use]
    pub const fn joyner_boore(km: f64) -> Self {
        Self::new(DistanceMetric::JoynerBoore, km)
    }

    /// Seismogenic distance.
    #[must_use]
    pub const fn seismogenic(km: f64) -> Self {
        Self::new(DistanceMetric::Seismogenic, km)
    }

    /// Hypocentral distance.
    #[must_use]
    pub const fn hypocentral(km: f64) -> Self {
        Self::new(DistanceMetric::Hypocentral, km)
    }
}

// ============================================================================
// Stateless inputs
// ============================================================================

/// Every primitive a family formula may read.
///
/// Families ignore fields they do not use. `rake = NaN` means the style of
/// faulting is unspecified; families with an "unspecified" coefficient use
/// it, others treat it as strike-slip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GmInput {
    /// Moment magnitude.
    pub magnitude: f64,
    /// Tagged site-to-source distance.
    pub distance: Distance,
    /// Vs30 in m/s.
    pub vs30: f64,
    /// Categorical site type; `None` selects the family default.
    pub site_type: Option<SiteType>,
    /// Rake in degrees.
    pub rake: f64,
    /// Dip in degrees.
    pub dip: f64,
    /// Hypocentral depth in km.
    pub depth: f64,
    /// Whether the site lies on the hanging wall.
    pub hanging_wall: bool,
    /// Component of motion; `None` selects the family default.
    pub component: Option<Component>,
    /// Tectonic region of the source.
    pub tectonic: TectonicRegion,
}

impl GmInput {
    /// Inputs for a vertical strike-slip event at 10 km depth, Vs30 760 m/s.
    #[must_use]
    pub const fn new(magnitude: f64, distance: Distance) -> Self {
        Self {
            magnitude,
            distance,
            vs30: crate::site::DEFAULT_VS30,
            site_type: None,
            rake: 0.0,
            dip: 90.0,
            depth: 10.0,
            hanging_wall: false,
            component: None,
            tectonic: TectonicRegion::ActiveShallow,
        }
    }

    /// Sets Vs30.
    #[must_use]
    pub const fn with_vs30(mut self, vs30: f64) -> Self {
        self.vs30 = vs30;
        self
    }

    /// Sets the categorical site type.
    #[must_use]
    pub const fn with_site_type(mut self, site_type: SiteType) -> Self {
        self.site_type = Some(site_type);
        self
    }

    /// Sets the rake.
    #[must_use]
    pub const fn with_rake(mut self, rake: f64) -> Self {
        self.rake = rake;
        self
    }

    /// Sets the dip.
    #[must_use]
    pub const fn with_dip(mut self, dip: f64) -> Self {
        self.dip = dip;
        self
    }

    /// Sets the hypocentral depth.
    #[must_use]
    pub const fn with_depth(mut self, depth: f64) -> Self {
        self.depth = depth;
        self
    }

    /// Marks the site as on (or off) the hanging wall.
    #[must_use]
    pub const fn with_hanging_wall(mut self, hanging_wall: bool) -> Self {
        self.hanging_wall = hanging_wall;
        self
    }

    /// Sets the component of motion.
    #[must_use]
    pub const fn with_component(mut self, component: Component) -> Self {
        self.component = Some(component);
        self
    }

    /// Sets the tectonic region.
    #[must_use]
    pub const fn with_tectonic(mut self, tectonic: TectonicRegion) -> Self {
        self.tectonic = tectonic;
        self
    }
}

// ============================================================================
// Model description
// ============================================================================

/// Static description of a family: what it supports and its parameter
/// constraints.
#[derive(Debug)]
pub struct ModelInfo {
    /// Full name.
    pub name: &'static str,
    /// Registry key.
    pub short_name: &'static str,
    /// Metric the family is calibrated against.
    pub distance_metric: DistanceMetric,
    /// Supported intensity-measure types. The first is the default.
    pub measures: &'static [ImType],
    /// Supported components. The first is the default.
    pub components: &'static [Component],
    /// Supported standard-deviation types.
    pub std_dev_types: &'static [StdDevType],
    /// Categorical site types. Empty for Vs30-driven families. The first is
    /// the default.
    pub site_types: &'static [SiteType],
    /// Supported tectonic regions.
    pub tectonic_regions: &'static [TectonicRegion],
    /// Whether total sigma is `sqrt(inter² + intra²)`.
    pub sigma_derived: bool,
    /// Magnitude constraint.
    pub magnitude: ParamRange,
    /// Distance constraint (km).
    pub distance: ParamRange,
    /// Vs30 constraint (m/s).
    pub vs30: ParamRange,
    /// Hypocentral depth constraint (km).
    pub depth: ParamRange,
}

impl ModelInfo {
    /// The default component.
    #[must_use]
    pub fn default_component(&self) -> Option<Component> {
        self.components.first().copied()
    }

    /// The default site type, if the family is categorical.
    #[must_use]
    pub fn default_site_type(&self) -> Option<SiteType> {
        self.site_types.first().copied()
    }

    /// Validates the parts of `input` every family shares (distance metric,
    /// component, tectonic region) and returns the distance in km.
    ///
    /// # Errors
    ///
    /// Returns the first [`ImrError`] encountered.
    pub fn check_input(&self, input: &GmInput) -> Result<f64, ImrError> {
        self.component(input.component)?;
        self.check_tectonic(input.tectonic)?;
        self.distance_km(&input.distance)
    }

    /// Rejects tectonic regions the family was not derived for.
    ///
    /// # Errors
    ///
    /// Returns [`ImrError::UnsupportedSelection`].
    pub fn check_tectonic(&self, region: TectonicRegion) -> Result<(), ImrError> {
        if self.tectonic_regions.contains(&region) {
            Ok(())
        } else {
            Err(ImrError::unsupported(self.short_name, "tectonic region", region))
        }
    }

    /// Checks a distance's metric and returns its value in km.
    ///
    /// # Errors
    ///
    /// Returns [`ImrError::DistanceMetricMismatch`] on a metric mismatch.
    pub fn distance_km(&self, distance: &Distance) -> Result<f64, ImrError> {
        if distance.metric != self.distance_metric {
            return Err(ImrError::DistanceMetricMismatch {
                family: self.short_name,
                expected: self.distance_metric,
                actual: distance.metric,
            });
        }
        Ok(distance.km)
    }

    /// Resolves the site type to use, rejecting ones the family lacks.
    ///
    /// # Errors
    ///
    /// Returns [`ImrError::UnsupportedSelection`] for a foreign site type.
    pub fn site_type(&self, requested: Option<SiteType>) -> Result<Option<SiteType>, ImrError> {
        match requested {
            None => Ok(self.default_site_type()),
            Some(t) if self.site_types.contains(&t) => Ok(Some(t)),
            Some(t) => Err(ImrError::unsupported(self.short_name, "site type", t)),
        }
    }

    /// Resolves the component to use, rejecting ones the family lacks.
    ///
    /// # Errors
    ///
    /// Returns [`ImrError::UnsupportedComponent`] for a foreign component.
    pub fn component(&self, requested: Option<Component>) -> Result<Option<Component>, ImrError> {
        match requested {
            None => Ok(self.default_component()),
            Some(c) if self.components.contains(&c) => Ok(Some(c)),
            Some(c) => Err(ImrError::UnsupportedComponent {
                family: self.short_name,
                name: c.name().to_string(),
            }),
        }
    }

    /// Rejects standard-deviation types the family lacks.
    ///
    /// # Errors
    ///
    /// Returns [`ImrError::UnsupportedSelection`] for a foreign type.
    pub fn check_std_dev_type(&self, kind: StdDevType) -> Result<(), ImrError> {
        if self.std_dev_types.contains(&kind) {
            Ok(())
        } else {
            Err(ImrError::unsupported(self.short_name, "std dev type", kind))
        }
    }
}

// ============================================================================
// The capability interface
// ============================================================================

/// A ground-motion prediction equation, evaluated statelessly.
///
/// Implementations hold no mutable state; coefficient tables are `static`.
pub trait GroundMotionModel: fmt::Debug + Send + Sync {
    /// Static description.
    fn info(&self) -> &'static ModelInfo;

    /// Tabulated SA periods in ascending order; empty if SA is unsupported.
    fn supported_periods(&self) -> Vec<f64>;

    /// Natural-log mean of the intensity measure, in the measure's native
    /// units once exponentiated.
    ///
    /// # Errors
    ///
    /// Returns [`ImrError`] for an unsupported measure, period, site type,
    /// component or tectonic region, or for a distance in the wrong metric.
    fn mean(&self, im: IntensityMeasure, input: &GmInput) -> Result<f64, ImrError>;

    /// Standard deviation of the natural-log intensity.
    ///
    /// # Errors
    ///
    /// Same conditions as [`GroundMotionModel::mean`], plus
    /// [`ImrError::UnsupportedSelection`] for an unsupported `kind`.
    fn std_dev(&self, im: IntensityMeasure, input: &GmInput, kind: StdDevType) -> Result<f64, ImrError>;

    /// Every concrete measure the family predicts, SA expanded over
    /// [`GroundMotionModel::supported_periods`].
    fn measures(&self) -> Vec<IntensityMeasure> {
        let mut out = Vec::new();
        for ty in self.info().measures {
            match ty {
                ImType::Pga => out.push(IntensityMeasure::Pga),
                ImType::Pgv => out.push(IntensityMeasure::Pgv),
                ImType::AriasIntensity => out.push(IntensityMeasure::AriasIntensity),
                ImType::Sa => out.extend(self.supported_periods().into_iter().map(IntensityMeasure::Sa)),
                ImType::Mmi => {}
            }
        }
        out
    }

    /// Supported intensity measure check, including the SA period.
    fn supports(&self, im: IntensityMeasure) -> bool {
        if !self.info().measures.contains(&im.im_type()) {
            return false;
        }
        match im {
            IntensityMeasure::Sa(p) => table::nearest_period(&self.supported_periods(), p)
                .is_some_and(|q| (q - p).abs() <= table::PERIOD_TOLERANCE),
            _ => true,
        }
    }
}
