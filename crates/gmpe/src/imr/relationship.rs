//! The stateful attenuation relationship.
//!
//! [`AttenuationRelationship`] owns one family plus the mutable
//! configuration a hazard loop sets between queries. Every query builds a
//! [`GmInput`] from that state and calls the family's stateless form, so
//! `relationship.mean()` equals `model.mean(im, &relationship.input())`
//! exactly.
//!
//! Setters validate everything before they change anything: a failed set
//! leaves the relationship untouched.
//!
//! ```
//! use gmpe::geo::Location;
//! use gmpe::imr::{registry, AttenuationRelationship};
//! use gmpe::rupture::{Rupture, TectonicRegion};
//! use gmpe::site::Site;
//!
//! let mut imr = AttenuationRelationship::new(registry::model_by_short_name("BJF_1997").unwrap());
//! imr.set_site(&Site::new(Location::surface(34.0, -118.0))).unwrap();
//! let hypo = Location::new(34.1, -118.0, 8.0);
//! imr.set_rupture(&Rupture::point(6.5, 0.0, hypo, TectonicRegion::ActiveShallow)).unwrap();
//! let p = imr.exceed_probability(0.1).unwrap();
//! assert!(p > 0.0 && p < 1.0);
//! ```

use core::fmt;
use std::sync::Arc;

use super::exceedance::{self, SigmaTruncation};
use super::param::WarnedValue;
use super::table::{self, PERIOD_TOLERANCE};
use super::{
    Component, Distance, GmInput, GroundMotionModel, ImType, ImrError, IntensityMeasure, ModelInfo,
    ParameterWarningListener, SiteType, StdDevType, TracingWarningListener,
};
use crate::geo::Location;
use crate::rupture::{Rupture, TectonicRegion};
use crate::site::{Site, SITE_TYPE};

/// Selection state read by the zero-argument queries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImrConfig {
    /// Active intensity measure.
    pub intensity_measure: IntensityMeasure,
    /// Active component; `None` after an MMI selection.
    pub component: Option<Component>,
    /// Active standard-deviation type.
    pub std_dev_type: StdDevType,
    /// Residual truncation used by exceedance queries.
    pub truncation: SigmaTruncation,
}

/// A family plus its current configuration and rupture/site parameters.
///
/// Not meant to be shared between threads mid-configuration; build one per
/// worker. Families themselves are stateless and their tables `static`.
pub struct AttenuationRelationship {
    model: Box<dyn GroundMotionModel>,
    listener: Arc<dyn ParameterWarningListener>,
    config: ImrConfig,
    magnitude: WarnedValue,
    distance: WarnedValue,
    vs30: WarnedValue,
    depth: WarnedValue,
    rake: f64,
    dip: f64,
    site_type: Option<SiteType>,
    hanging_wall: bool,
    tectonic: TectonicRegion,
    site_location: Option<Location>,
}

impl fmt::Debug for AttenuationRelationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttenuationRelationship")
            .field("model", &self.info().short_name)
            .field("config", &self.config)
            .field("input", &self.input())
            .finish_non_exhaustive()
    }
}

fn default_intensity_measure(model: &dyn GroundMotionModel) -> IntensityMeasure {
    let first = model.info().measures.first().copied();
    match first {
        Some(ImType::Pgv) => IntensityMeasure::Pgv,
        Some(ImType::AriasIntensity) => IntensityMeasure::AriasIntensity,
        Some(ImType::Sa) => model
            .supported_periods()
            .first()
            .map_or(IntensityMeasure::Pga, |&p| IntensityMeasure::Sa(p)),
        _ => IntensityMeasure::Pga,
    }
}

impl AttenuationRelationship {
    /// Wraps `model`, logging parameter warnings through `tracing`, and
    /// applies the defaults.
    #[must_use]
    pub fn new(model: Box<dyn GroundMotionModel>) -> Self {
        Self::with_listener(model, Arc::new(TracingWarningListener))
    }

    /// Wraps `model` with a caller-supplied warning listener and applies the
    /// defaults.
    #[must_use]
    pub fn with_listener(model: Box<dyn GroundMotionModel>, listener: Arc<dyn ParameterWarningListener>) -> Self {
        let info = model.info();
        let mut imr = Self {
            config: ImrConfig {
                intensity_measure: default_intensity_measure(model.as_ref()),
                component: info.default_component(),
                std_dev_type: StdDevType::Total,
                truncation: SigmaTruncation::None,
            },
            magnitude: WarnedValue::new("Magnitude", info.magnitude),
            distance: WarnedValue::new("Distance", info.distance),
            vs30: WarnedValue::new("Vs30", info.vs30),
            depth: WarnedValue::new("Focal Depth", info.depth),
            rake: 0.0,
            dip: 90.0,
            site_type: info.default_site_type(),
            hanging_wall: false,
            tectonic: info.tectonic_regions.first().copied().unwrap_or_default(),
            site_location: None,
            model,
            listener,
        };
        imr.set_param_defaults();
        imr
    }

    /// Restores every parameter and selection to its default and forgets the
    /// site.
    pub fn set_param_defaults(&mut self) {
        let info = self.model.info();
        self.config = ImrConfig {
            intensity_measure: default_intensity_measure(self.model.as_ref()),
            component: info.default_component(),
            std_dev_type: StdDevType::Total,
            truncation: SigmaTruncation::None,
        };
        self.magnitude.reset();
        self.distance.reset();
        self.vs30.reset();
        self.depth.reset();
        self.rake = 0.0;
        self.dip = 90.0;
        self.site_type = info.default_site_type();
        self.hanging_wall = false;
        self.tectonic = info.tectonic_regions.first().copied().unwrap_or_default();
        self.site_location = None;
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    /// The wrapped family.
    #[must_use]
    pub fn model(&self) -> &dyn GroundMotionModel {
        self.model.as_ref()
    }

    /// The family's static description.
    #[must_use]
    pub fn info(&self) -> &'static ModelInfo {
        self.model.info()
    }

    /// Current selection state.
    #[must_use]
    pub fn config(&self) -> &ImrConfig {
        &self.config
    }

    /// Active intensity measure.
    #[must_use]
    pub fn intensity_measure(&self) -> IntensityMeasure {
        self.config.intensity_measure
    }

    /// Active component, `None` after an MMI selection.
    #[must_use]
    pub fn component(&self) -> Option<Component> {
        self.config.component
    }

    /// Current magnitude.
    #[must_use]
    pub fn magnitude(&self) -> f64 {
        self.magnitude.get()
    }

    /// Current distance, tagged with the family's metric.
    #[must_use]
    pub fn distance(&self) -> Distance {
        Distance::new(self.info().distance_metric, self.distance.get())
    }

    /// Current Vs30.
    #[must_use]
    pub fn vs30(&self) -> f64 {
        self.vs30.get()
    }

    /// The stateless input equivalent to the current state.
    #[must_use]
    pub fn input(&self) -> GmInput {
        GmInput {
            magnitude: self.magnitude.get(),
            distance: self.distance(),
            vs30: self.vs30.get(),
            site_type: self.site_type,
            rake: self.rake,
            dip: self.dip,
            depth: self.depth.get(),
            hanging_wall: self.hanging_wall,
            component: self.config.component,
            tectonic: self.tectonic,
        }
    }

    // ------------------------------------------------------------------------
    // Selections
    // ------------------------------------------------------------------------

    /// Selects the intensity measure by type name (`"PGA"`, `"SA"`, ...).
    ///
    /// Selecting `"SA"` keeps the current period if SA is already active and
    /// otherwise picks the shortest tabulated period.
    ///
    /// # Errors
    ///
    /// Returns [`ImrError::UnsupportedSelection`] if the family does not
    /// predict the named measure.
    pub fn set_intensity_measure(&mut self, name: &str) -> Result<(), ImrError> {
        let info = self.info();
        let unsupported = || ImrError::unsupported(info.short_name, "intensity measure", name);
        let ty = ImType::from_name(name)
            .filter(|t| info.measures.contains(t))
            .ok_or_else(unsupported)?;
        let im = match ty {
            ImType::Pga => IntensityMeasure::Pga,
            ImType::Pgv => IntensityMeasure::Pgv,
            ImType::AriasIntensity => IntensityMeasure::AriasIntensity,
            ImType::Sa => match self.config.intensity_measure {
                sa @ IntensityMeasure::Sa(_) => sa,
                _ => IntensityMeasure::Sa(*self.model.supported_periods().first().ok_or_else(unsupported)?),
            },
            ImType::Mmi => return Err(unsupported()),
        };
        self.config.intensity_measure = im;
        Ok(())
    }

    /// Selects a concrete intensity measure. SA periods are snapped to the
    /// matching tabulated value.
    ///
    /// # Errors
    ///
    /// Returns [`ImrError::UnsupportedSelection`] for a measure or period the
    /// family lacks.
    pub fn select_intensity_measure(&mut self, im: IntensityMeasure) -> Result<(), ImrError> {
        if !self.model.supports(im) {
            return Err(ImrError::unsupported(self.info().short_name, "intensity measure", im));
        }
        self.config.intensity_measure = match im {
            IntensityMeasure::Sa(p) => {
                IntensityMeasure::Sa(table::nearest_period(&self.model.supported_periods(), p).unwrap_or(p))
            }
            other => other,
        };
        Ok(())
    }

    /// Selects SA at `period`, which must be tabulated.
    ///
    /// # Errors
    ///
    /// Returns [`ImrError::UnsupportedSelection`] if the family has no SA and
    /// [`ImrError::InvalidParameterValue`] for an untabulated period.
    pub fn set_sa_period(&mut self, period: f64) -> Result<(), ImrError> {
        let info = self.info();
        if !info.measures.contains(&ImType::Sa) {
            return Err(ImrError::unsupported(info.short_name, "intensity measure", ImType::Sa));
        }
        let periods = self.model.supported_periods();
        match table::nearest_period(&periods, period) {
            Some(q) if (q - period).abs() <= PERIOD_TOLERANCE => {
                self.config.intensity_measure = IntensityMeasure::Sa(q);
                Ok(())
            }
            nearest => Err(ImrError::InvalidParameterValue {
                name: "SA Period",
                value: period,
                reason: match nearest {
                    Some(q) => format!("not a tabulated period (nearest is {q})"),
                    None => "no tabulated periods".to_string(),
                },
            }),
        }
    }

    /// Sets the component of motion for a measure of type `im_type`.
    ///
    /// For `"MMI"` the component is cleared whatever `component` says; MMI
    /// has no instrumental component. Otherwise `component` must be one the
    /// family supports.
    ///
    /// # Errors
    ///
    /// Returns [`ImrError::UnsupportedComponent`] for an unknown component.
    pub fn set_component_parameter(&mut self, component: &str, im_type: &str) -> Result<(), ImrError> {
        if im_type == ImType::Mmi.name() {
            self.config.component = None;
            return Ok(());
        }
        let info = self.info();
        let c = Component::from_name(component)
            .filter(|c| info.components.contains(c))
            .ok_or_else(|| ImrError::UnsupportedComponent {
                family: info.short_name,
                name: component.to_string(),
            })?;
        self.config.component = Some(c);
        Ok(())
    }

    /// Selects the standard-deviation type.
    ///
    /// # Errors
    ///
    /// Returns [`ImrError::UnsupportedSelection`] for a type the family does
    /// not decompose into.
    pub fn set_std_dev_type(&mut self, kind: StdDevType) -> Result<(), ImrError> {
        self.info().check_std_dev_type(kind)?;
        self.config.std_dev_type = kind;
        Ok(())
    }

    /// Selects the standard-deviation type by name (`"Total"`, ...).
    ///
    /// # Errors
    ///
    /// Returns [`ImrError::UnsupportedSelection`] for an unknown name.
    pub fn set_std_dev_type_by_name(&mut self, name: &str) -> Result<(), ImrError> {
        let kind = StdDevType::from_name(name)
            .ok_or_else(|| ImrError::unsupported(self.info().short_name, "std dev type", name))?;
        self.set_std_dev_type(kind)
    }

    /// Sets the residual truncation.
    ///
    /// # Errors
    ///
    /// Returns [`ImrError::InvalidParameterValue`] for a non-positive level.
    pub fn set_truncation(&mut self, truncation: SigmaTruncation) -> Result<(), ImrError> {
        self.config.truncation = truncation.validate()?;
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Primitive parameters
    // ------------------------------------------------------------------------

    /// Sets the magnitude.
    ///
    /// # Errors
    ///
    /// Returns [`ImrError::InvalidParameterValue`] outside the allowed range.
    pub fn set_magnitude(&mut self, magnitude: f64) -> Result<(), ImrError> {
        self.magnitude.set(magnitude, self.listener.as_ref())
    }

    /// Sets the distance in km, in the family's metric.
    ///
    /// # Errors
    ///
    /// Returns [`ImrError::InvalidParameterValue`] outside the allowed range.
    pub fn set_distance(&mut self, km: f64) -> Result<(), ImrError> {
        self.distance.set(km, self.listener.as_ref())
    }

    /// Sets a tagged distance.
    ///
    /// # Errors
    ///
    /// Returns [`ImrError::DistanceMetricMismatch`] for a foreign metric and
    /// [`ImrError::InvalidParameterValue`] outside the allowed range.
    pub fn set_tagged_distance(&mut self, distance: Distance) -> Result<(), ImrError> {
        let km = self.info().distance_km(&distance)?;
        self.set_distance(km)
    }

    /// Sets Vs30.
    ///
    /// # Errors
    ///
    /// Returns [`ImrError::InvalidParameterValue`] outside the allowed range.
    pub fn set_vs30(&mut self, vs30: f64) -> Result<(), ImrError> {
        self.vs30.set(vs30, self.listener.as_ref())
    }

    /// Sets the focal depth in km.
    ///
    /// # Errors
    ///
    /// Returns [`ImrError::InvalidParameterValue`] outside the allowed range.
    pub fn set_depth(&mut self, depth: f64) -> Result<(), ImrError> {
        self.depth.set(depth, self.listener.as_ref())
    }

    /// Sets the rake in degrees; NaN means unspecified.
    pub fn set_rake(&mut self, rake: f64) {
        self.rake = rake;
    }

    /// Sets the dip in degrees.
    ///
    /// # Errors
    ///
    /// Returns [`ImrError::InvalidParameterValue`] outside `(0, 90]`.
    pub fn set_dip(&mut self, dip: f64) -> Result<(), ImrError> {
        check_dip(dip)?;
        self.dip = dip;
        Ok(())
    }

    /// Marks the site as on (or off) the hanging wall.
    pub fn set_hanging_wall(&mut self, hanging_wall: bool) {
        self.hanging_wall = hanging_wall;
    }

    /// Sets the categorical site type by name.
    ///
    /// # Errors
    ///
    /// Returns [`ImrError::UnsupportedSelection`] for a type the family lacks.
    pub fn set_site_type(&mut self, name: &str) -> Result<(), ImrError> {
        self.site_type = self.resolve_site_type(name)?;
        Ok(())
    }

    /// Sets the tectonic region.
    ///
    /// # Errors
    ///
    /// Returns [`ImrError::UnsupportedSelection`] for a region the family was
    /// not derived for.
    pub fn set_tectonic_region(&mut self, region: TectonicRegion) -> Result<(), ImrError> {
        self.info().check_tectonic(region)?;
        self.tectonic = region;
        Ok(())
    }

    fn resolve_site_type(&self, name: &str) -> Result<Option<SiteType>, ImrError> {
        let info = self.info();
        let unsupported = || ImrError::unsupported(info.short_name, "site type", name);
        let t = SiteType::from_name(name).ok_or_else(unsupported)?;
        if info.site_types.contains(&t) {
            Ok(Some(t))
        } else {
            Err(unsupported())
        }
    }

    // ------------------------------------------------------------------------
    // Rupture / site adapter
    // ------------------------------------------------------------------------

    /// Reads Vs30 and the site type from `site` and remembers its location.
    ///
    /// A missing Vs30 falls back to [`crate::site::DEFAULT_VS30`]; a missing
    /// site type to the family default. A `Site Type` text parameter is
    /// ignored by families without categorical site types. The distance is
    /// recomputed by the next [`AttenuationRelationship::set_rupture`].
    ///
    /// # Errors
    ///
    /// Returns [`ImrError`] if Vs30 or the site type is unacceptable.
    pub fn set_site(&mut self, site: &Site) -> Result<(), ImrError> {
        let vs30 = site.vs30_or_default();
        self.vs30.check(vs30)?;
        let site_type = match site.text(SITE_TYPE) {
            Some(name) if !self.info().site_types.is_empty() => self.resolve_site_type(name)?,
            _ => self.info().default_site_type(),
        };
        self.vs30.commit(vs30, self.listener.as_ref());
        self.site_type = site_type;
        self.site_location = Some(*site.location());
        Ok(())
    }

    /// Reads magnitude, rake, depth, dip, tectonic region, hanging-wall
    /// side and the family's distance metric from `rupture` relative to the
    /// current site.
    ///
    /// # Errors
    ///
    /// Returns [`ImrError::SiteNotSet`] before any [`AttenuationRelationship::set_site`],
    /// and [`ImrError`] for any unacceptable derived value.
    pub fn set_rupture(&mut self, rupture: &Rupture) -> Result<(), ImrError> {
        let site = self.site_location.ok_or(ImrError::SiteNotSet)?;
        let info = self.info();
        let surface = rupture.surface();
        let km = surface.distance(info.distance_metric, &site, rupture.hypocenter());
        let depth = rupture.hypocenter().depth();
        let dip = surface.dip();
        self.magnitude.check(rupture.magnitude())?;
        self.distance.check(km)?;
        self.depth.check(depth)?;
        check_dip(dip)?;
        info.check_tectonic(rupture.tectonic())?;

        let listener = self.listener.as_ref();
        self.magnitude.commit(rupture.magnitude(), listener);
        self.distance.commit(km, listener);
        self.depth.commit(depth, listener);
        self.rake = rupture.rake();
        self.dip = dip;
        self.hanging_wall = surface.is_on_hanging_wall(&site);
        self.tectonic = rupture.tectonic();
        Ok(())
    }

    /// [`AttenuationRelationship::set_site`] then
    /// [`AttenuationRelationship::set_rupture`].
    ///
    /// # Errors
    ///
    /// As for the two setters.
    pub fn set_site_and_rupture(&mut self, site: &Site, rupture: &Rupture) -> Result<(), ImrError> {
        self.set_site(site)?;
        self.set_rupture(rupture)
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    /// Natural-log mean of the active measure for the current state.
    ///
    /// # Errors
    ///
    /// As for [`GroundMotionModel::mean`].
    pub fn mean(&self) -> Result<f64, ImrError> {
        self.model.mean(self.config.intensity_measure, &self.input())
    }

    /// Standard deviation of the active type for the current state.
    ///
    /// # Errors
    ///
    /// As for [`GroundMotionModel::std_dev`].
    pub fn std_dev(&self) -> Result<f64, ImrError> {
        self.model
            .std_dev(self.config.intensity_measure, &self.input(), self.config.std_dev_type)
    }

    /// Probability that the active measure exceeds `iml` (native units).
    ///
    /// # Errors
    ///
    /// Returns [`ImrError::InvalidParameterValue`] if `ln(iml)` is outside
    /// `[ln(f64::MIN_POSITIVE), ln(f64::MAX)]`, else as for the queries.
    pub fn exceed_probability(&self, iml: f64) -> Result<f64, ImrError> {
        let ln_iml = exceedance::check_iml(iml)?;
        let (mean, sigma) = (self.mean()?, self.std_dev()?);
        Ok(exceedance::exceedance_probability(mean, sigma, ln_iml, self.config.truncation))
    }

    /// Exceedance probability at each level, evaluating mean and sigma once.
    ///
    /// # Errors
    ///
    /// As for [`AttenuationRelationship::exceed_probability`].
    pub fn exceed_probabilities(&self, imls: &[f64]) -> Result<Vec<f64>, ImrError> {
        let (mean, sigma) = (self.mean()?, self.std_dev()?);
        imls.iter()
            .map(|&iml| {
                let ln_iml = exceedance::check_iml(iml)?;
                Ok(exceedance::exceedance_probability(mean, sigma, ln_iml, self.config.truncation))
            })
            .collect()
    }
}

fn check_dip(dip: f64) -> Result<(), ImrError> {
    if dip.is_nan() || dip <= 0.0 || dip > 90.0 {
        return Err(ImrError::InvalidParameterValue {
            name: "Dip",
            value: dip,
            reason: "must lie in (0, 90]".to_string(),
        });
    }
    Ok(())
}
