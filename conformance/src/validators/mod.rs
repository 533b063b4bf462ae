//! Conformance validators, one module per concern.
//!
//! Each exposes a `validate` function returning a
//! [`ConformanceReport`](crate::ConformanceReport).

pub mod hazard;
pub mod interface;
pub mod sigma;
pub mod tables;

use gmpe::imr::{GmInput, GroundMotionModel};

/// A representative input in the family's own metric and first tectonic
/// region.
#[must_use]
pub fn sample_input(model: &dyn GroundMotionModel, magnitude: f64, km: f64) -> GmInput {
    let info = model.info();
    let mut input = GmInput::new(magnitude, gmpe::imr::Distance::new(info.distance_metric, km))
        .with_vs30(400.0)
        .with_depth(12.0);
    if let Some(&tectonic) = info.tectonic_regions.first() {
        input = input.with_tectonic(tectonic);
    }
    input
}
