//! Ground-motion prediction for probabilistic seismic hazard.
//!
//! `gmpe` evaluates empirical **attenuation relationships**: the natural-log
//! mean and standard deviation of a ground-motion intensity measure given an
//! earthquake rupture and a site. Every family sits behind one interface, so
//! a hazard-curve loop can swap models without knowing their formulas.
//!
//! # Layers
//!
//! | Module | Role |
//! |--------|------|
//! | [`imr`] | Families, the stateless [`imr::GroundMotionModel`] trait and the stateful [`imr::AttenuationRelationship`] |
//! | [`site`], [`rupture`] | What a relationship consumes |
//! | [`geo`] | Locations, regions, rupture surfaces and distance metrics |
//! | [`mfd`] | Magnitude-frequency distributions |
//! | [`source`] | Fault and area sources, rupture forecasts |
//! | [`calc`] | Hazard curves |
//! | [`config`] | TOML run files (feature `config`) |
//!
//! # Example: one query
//!
//! ```
//! use gmpe::imr::{registry, Distance, GmInput, IntensityMeasure, StdDevType};
//!
//! let model = registry::model_by_short_name("Sadigh_1997").unwrap();
//! let input = GmInput::new(7.0, Distance::rupture(20.0));
//! let mean = model.mean(IntensityMeasure::Sa(1.0), &input).unwrap();
//! let sigma = model.std_dev(IntensityMeasure::Sa(1.0), &input, StdDevType::Total).unwrap();
//! assert!(mean < 0.0 && sigma > 0.0);
//! ```
//!
//! # Example: a hazard curve
//!
//! ```
//! use gmpe::calc::HazardCurveCalculator;
//! use gmpe::geo::{Location, Region};
//! use gmpe::imr::{registry, AttenuationRelationship};
//! use gmpe::mfd::GutenbergRichterMfd;
//! use gmpe::rupture::TectonicRegion;
//! use gmpe::site::Site;
//! use gmpe::source::{AreaSource, EqkRuptureForecast};
//!
//! let region = Region::rectangle(34.0, 34.4, -118.4, -118.0).unwrap();
//! let mfd = GutenbergRichterMfd::new(1.0, 0.02, 5.0, 7.0, 9).unwrap().into();
//! let zone = AreaSource::new("zone", region, mfd, 8.0, 0.0, TectonicRegion::ActiveShallow, 0.1).unwrap();
//! let forecast = EqkRuptureForecast::new(vec![zone.into()], 50.0).unwrap();
//!
//! let mut imr = AttenuationRelationship::new(registry::model_by_short_name("BJF_1997").unwrap());
//! let site = Site::new(Location::surface(34.2, -118.2));
//! let curve = HazardCurveCalculator::default()
//!     .compute(&[0.05, 0.1, 0.2, 0.4], &site, &forecast, &mut imr)
//!     .unwrap();
//! assert!(curve.is_monotonic());
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

// Geometry collaborators (location, region, surface)
pub mod geo;

// Sites and ruptures
pub mod rupture;
pub mod site;

// Magnitude-frequency distributions
pub mod mfd;

// Sources and forecasts
pub mod source;

// Attenuation relationships
pub mod imr;

// Hazard curves
pub mod calc;

// Run configuration
#[cfg(feature = "config")]
pub mod config;

pub use calc::{HazardCurve, HazardCurveCalculator, HazardError};
pub use geo::Location;
pub use imr::{AttenuationRelationship, GroundMotionModel, ImrError, IntensityMeasure, StdDevType};
pub use rupture::{ProbEqkRupture, Rupture, TectonicRegion};
pub use site::Site;
pub use source::{EqkRuptureForecast, SeismicSource, SourceError};
