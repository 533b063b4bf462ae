//! TOML configuration for a single-site hazard run.
//!
//! ```
//! use gmpe::config::HazardConfig;
//!
//! let cfg = HazardConfig::from_toml_str(r#"
//!     imr = "BJF_1997"
//!     intensity_measure = "SA"
//!     period = 1.0
//!
//!     [site]
//!     lat = 34.0
//!     lon = -118.0
//!     vs30 = 400.0
//!
//!     [[sources]]
//!     kind = "area"
//!     name = "background"
//!     border = [[33.8, -118.2], [33.8, -117.8], [34.2, -117.8], [34.2, -118.2]]
//!     depth = 8.0
//!
//!     [sources.mfd]
//!     kind = "gutenberg_richter"
//!     b_value = 1.0
//!     total_rate = 0.05
//!     min_mag = 5.0
//!     max_mag = 7.0
//!     num_bins = 9
//! "#).unwrap();
//!
//! let imr = cfg.build_imr().unwrap();
//! assert_eq!(imr.intensity_measure().to_string(), "SA(1 s)");
//! assert_eq!(cfg.build_forecast().unwrap().sources().len(), 1);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calc::{HazardCurveCalculator, HazardError};
use crate::geo::{Location, Region};
use crate::imr::{registry, AttenuationRelationship, ImrError, SigmaTruncation};
use crate::mfd::{GutenbergRichterMfd, IncrementalMfd, MagFreqDist, SingleMagFreqDist};
use crate::rupture::TectonicRegion;
use crate::site::{Site, SiteValue, SITE_TYPE, VS30};
use crate::source::{
    AreaSource, EqkRuptureForecast, FaultSourceData, SeismicSource, SimpleFaultSource, SourceError,
};

/// PGA levels (g) used when a run names none.
pub const DEFAULT_IMLS: [f64; 19] = [
    0.005, 0.007, 0.0098, 0.0137, 0.0192, 0.0269, 0.0376, 0.0527, 0.0738, 0.103, 0.145, 0.203,
    0.284, 0.397, 0.556, 0.778, 1.09, 1.52, 2.13,
];

/// Errors loading or applying a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read {path}")]
    Io {
        /// File path.
        path: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// The TOML did not match the schema.
    #[error("invalid configuration: {0}")]
    Decode(#[from] toml::de::Error),
    /// The relationship rejected a selection.
    #[error(transparent)]
    Imr(#[from] ImrError),
    /// A source could not be built.
    #[error(transparent)]
    Source(#[from] SourceError),
    /// A calculator setting was rejected.
    #[error(transparent)]
    Hazard(#[from] HazardError),
}

/// How the sigma distribution is truncated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TruncationKind {
    /// Untruncated.
    #[default]
    None,
    /// Upper tail only.
    Upper,
    /// Both tails.
    TwoSided,
}

/// A hazard run: one site, one relationship, a set of sources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HazardConfig {
    /// Short name of the attenuation relationship.
    pub imr: String,
    /// Intensity measure name (`PGA`, `PGV`, `SA`, `IA`).
    #[serde(default = "default_intensity_measure")]
    pub intensity_measure: String,
    /// SA period in seconds.
    #[serde(default)]
    pub period: Option<f64>,
    /// Component name; the family default when absent.
    #[serde(default)]
    pub component: Option<String>,
    /// Std-dev type name; `Total` when absent.
    #[serde(default)]
    pub std_dev_type: Option<String>,
    /// Sigma truncation.
    #[serde(default)]
    pub truncation: TruncationKind,
    /// Truncation level in standard deviations.
    #[serde(default = "default_truncation_level")]
    pub truncation_level: f64,
    /// Forecast time span.
    #[serde(default = "default_duration")]
    pub duration_years: f64,
    /// Sources farther than this are skipped.
    #[serde(default = "default_max_distance")]
    pub max_distance_km: f64,
    /// Intensity levels; [`DEFAULT_IMLS`] when absent.
    #[serde(default)]
    pub imls: Option<Vec<f64>>,
    /// Grid spacing for fault surfaces in km.
    #[serde(default = "default_fault_spacing")]
    pub fault_spacing_km: f64,
    /// The site.
    pub site: SiteConfig,
    /// The sources.
    #[serde(default)]
    pub sources: Vec<SourceConfig>,
}

/// Site section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
    /// Optional name (part of site identity).
    #[serde(default)]
    pub name: Option<String>,
    /// Vs30 in m/s.
    #[serde(default)]
    pub vs30: Option<f64>,
    /// Family-specific site type name.
    #[serde(default)]
    pub site_type: Option<String>,
}

/// One source, tagged by `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceConfig {
    /// A planar fault.
    SimpleFault {
        /// Identifier.
        #[serde(default)]
        id: i64,
        /// Name.
        name: String,
        /// Tectonic region.
        #[serde(default)]
        tectonic: TectonicRegion,
        /// Distribution.
        mfd: MfdConfig,
        /// Trace as `[lat, lon]` pairs.
        trace: Vec<[f64; 2]>,
        /// Dip in degrees.
        dip: f64,
        /// Rake in degrees.
        #[serde(default)]
        rake: f64,
        /// Upper seismogenic depth in km.
        #[serde(default)]
        upper_depth: f64,
        /// Lower seismogenic depth in km.
        lower_depth: f64,
        /// Whether ruptures float.
        #[serde(default)]
        floating: bool,
    },
    /// A gridded area zone.
    Area {
        /// Name.
        name: String,
        /// Border as `[lat, lon]` pairs.
        border: Vec<[f64; 2]>,
        /// Tectonic region.
        #[serde(default)]
        tectonic: TectonicRegion,
        /// Distribution for the whole zone.
        mfd: MfdConfig,
        /// Rupture depth in km.
        depth: f64,
        /// Rake in degrees.
        #[serde(default)]
        rake: f64,
        /// Grid spacing in degrees.
        #[serde(default = "default_area_spacing")]
        spacing_deg: f64,
    },
}

/// A magnitude-frequency distribution, tagged by `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MfdConfig {
    /// Truncated Gutenberg-Richter from its total cumulative rate.
    GutenbergRichter {
        /// b-value.
        b_value: f64,
        /// Total cumulative annual rate.
        total_rate: f64,
        /// Lowest bin magnitude.
        min_mag: f64,
        /// Highest bin magnitude.
        max_mag: f64,
        /// Number of bins.
        num_bins: usize,
    },
    /// One magnitude.
    Single {
        /// Magnitude.
        magnitude: f64,
        /// Annual rate.
        rate: f64,
    },
    /// Explicit `[magnitude, rate]` bins.
    Incremental {
        /// Bins in ascending magnitude.
        bins: Vec<[f64; 2]>,
    },
}

fn default_intensity_measure() -> String {
    "PGA".to_string()
}

const fn default_truncation_level() -> f64 {
    3.0
}

const fn default_duration() -> f64 {
    50.0
}

const fn default_max_distance() -> f64 {
    crate::calc::DEFAULT_MAX_DISTANCE_KM
}

const fn default_fault_spacing() -> f64 {
    1.0
}

const fn default_area_spacing() -> f64 {
    0.1
}

fn locations(points: &[[f64; 2]]) -> Vec<Location> {
    points.iter().map(|&[lat, lon]| Location::surface(lat, lon)).collect()
}

impl MfdConfig {
    /// Builds the distribution.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Mfd`] for invalid parameters.
    pub fn build(&self) -> Result<MagFreqDist, SourceError> {
        Ok(match *self {
            Self::GutenbergRichter {
                b_value,
                total_rate,
                min_mag,
                max_mag,
                num_bins,
            } => GutenbergRichterMfd::new(b_value, total_rate, min_mag, max_mag, num_bins)?.into(),
            Self::Single { magnitude, rate } => SingleMagFreqDist::new(magnitude, rate)?.into(),
            Self::Incremental { ref bins } => {
                IncrementalMfd::new(bins.iter().map(|&[m, r]| (m, r)).collect())?.into()
            }
        })
    }
}

impl SourceConfig {
    /// Builds the source.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] for invalid geometry or distributions.
    pub fn build(&self, fault_spacing_km: f64) -> Result<SeismicSource, SourceError> {
        match self {
            Self::SimpleFault {
                id,
                name,
                tectonic,
                mfd,
                trace,
                dip,
                rake,
                upper_depth,
                lower_depth,
                floating,
            } => {
                let data = FaultSourceData {
                    id: *id,
                    name: name.clone(),
                    tectonic: *tectonic,
                    mfd: mfd.build()?,
                    trace: locations(trace),
                    dip: *dip,
                    rake: *rake,
                    upper_depth: *upper_depth,
                    lower_depth: *lower_depth,
                    floating: *floating,
                };
                Ok(SimpleFaultSource::new(data, fault_spacing_km)?.into())
            }
            Self::Area {
                name,
                border,
                tectonic,
                mfd,
                depth,
                rake,
                spacing_deg,
            } => {
                let region = Region::new(locations(border))?;
                Ok(AreaSource::new(name.clone(), region, mfd.build()?, *depth, *rake, *tectonic, *spacing_deg)?.into())
            }
        }
    }
}

impl HazardConfig {
    /// Parses a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Decode`] if the text is not valid for the
    /// schema.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Reads and parses a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, else as for
    /// [`HazardConfig::from_toml_str`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// The site with its Vs30 and site type parameters.
    #[must_use]
    pub fn build_site(&self) -> Site {
        let loc = Location::surface(self.site.lat, self.site.lon);
        let mut site = match &self.site.name {
            Some(name) => Site::named(loc, name.clone()),
            None => Site::new(loc),
        };
        if let Some(vs30) = self.site.vs30 {
            site.set_param(VS30, SiteValue::Double(vs30));
        }
        if let Some(kind) = &self.site.site_type {
            site.set_param(SITE_TYPE, SiteValue::Text(kind.clone()));
        }
        site
    }

    /// The forecast over every configured source.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Source`] for the first invalid source.
    pub fn build_forecast(&self) -> Result<EqkRuptureForecast, ConfigError> {
        let sources = self
            .sources
            .iter()
            .map(|s| s.build(self.fault_spacing_km))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(EqkRuptureForecast::new(sources, self.duration_years)?)
    }

    /// The relationship with intensity measure, period, component, std-dev
    /// type and truncation applied in that order.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Imr`] for any selection the family rejects.
    pub fn build_imr(&self) -> Result<AttenuationRelationship, ConfigError> {
        let mut imr = AttenuationRelationship::new(registry::model_by_short_name(&self.imr)?);
        imr.set_intensity_measure(&self.intensity_measure)?;
        if let Some(period) = self.period {
            imr.set_sa_period(period)?;
        }
        if let Some(component) = &self.component {
            imr.set_component_parameter(component, &self.intensity_measure)?;
        }
        if let Some(kind) = &self.std_dev_type {
            imr.set_std_dev_type_by_name(kind)?;
        }
        imr.set_truncation(self.truncation())?;
        Ok(imr)
    }

    /// The calculator with the configured cut-off.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Hazard`] for a non-positive cut-off.
    pub fn build_calculator(&self) -> Result<HazardCurveCalculator, ConfigError> {
        Ok(HazardCurveCalculator::new(self.max_distance_km)?)
    }

    /// Intensity levels for the curve.
    #[must_use]
    pub fn curve_imls(&self) -> Vec<f64> {
        self.imls.clone().unwrap_or_else(|| DEFAULT_IMLS.to_vec())
    }

    fn truncation(&self) -> SigmaTruncation {
        match self.truncation {
            TruncationKind::None => SigmaTruncation::None,
            TruncationKind::Upper => SigmaTruncation::Upper(self.truncation_level),
            TruncationKind::TwoSided => SigmaTruncation::TwoSided(self.truncation_level),
        }
    }
}
