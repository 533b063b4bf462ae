//! Interface uniformity across registered families.
//!
//! - The stateful relationship returns exactly what the stateless model
//!   returns for the same primitives.
//! - A distance in a foreign metric is rejected.
//! - Measures a family does not predict are rejected, and `supports`
//!   agrees with `mean`.
//! - An SA period absent from a family's table is rejected.
//! - Setting the component for MMI clears it; unknown components fail.

use gmpe::geo::Location;
use gmpe::imr::{
    registry, AttenuationRelationship, Distance, DistanceMetric, GroundMotionModel, ImType, ImrError,
    IntensityMeasure, StdDevType,
};
use gmpe::rupture::Rupture;
use gmpe::site::{Site, SiteValue, VS30};

use super::sample_input;
use crate::report::{ConformanceReport, TestResult};

const VALIDATOR: &str = "imr/interface";

/// Runs the interface checks.
#[must_use]
pub fn validate() -> ConformanceReport {
    let mut report = ConformanceReport::new();
    report.push(check_stateful_agreement());
    report.push(check_metric_rejection());
    report.push(check_measure_rejection());
    report.push(check_untabulated_periods());
    report.push(check_component_rule());
    report
}

fn check_stateful_agreement() -> TestResult {
    let site = Site::new(Location::surface(34.0, -118.0)).with_param(VS30, SiteValue::Double(400.0));
    let mut failures = Vec::new();

    for model in registry::all_models() {
        let name = model.info().short_name;
        let Some(&tectonic) = model.info().tectonic_regions.first() else {
            failures.push(format!("{name}: no tectonic region"));
            continue;
        };
        let rupture = Rupture::point(6.5, 90.0, Location::new(34.2, -118.0, 15.0), tectonic);
        let ims = model.measures();
        let mut imr = AttenuationRelationship::new(model);
        if let Err(e) = imr.set_site_and_rupture(&site, &rupture) {
            failures.push(format!("{name}: {e}"));
            continue;
        }
        for im in ims {
            if let Err(e) = agree(&mut imr, im) {
                failures.push(format!("{name} {im}: {e}"));
            }
        }
    }

    TestResult::from_failures(
        VALIDATOR,
        "Stateful and stateless evaluation agree for every family and measure",
        "Stateful evaluation diverges from the stateless model",
        failures,
    )
}

fn agree(imr: &mut AttenuationRelationship, im: IntensityMeasure) -> Result<(), String> {
    imr.select_intensity_measure(im).map_err(|e| e.to_string())?;
    let input = imr.input();
    let stateful = (imr.mean(), imr.std_dev());
    let stateless = (
        imr.model().mean(im, &input),
        imr.model().std_dev(im, &input, StdDevType::Total),
    );
    match (stateful, stateless) {
        ((Ok(a), Ok(b)), (Ok(c), Ok(d))) if a == c && b == d => Ok(()),
        (s, t) => Err(format!("stateful {s:?} vs stateless {t:?}")),
    }
}

fn check_metric_rejection() -> TestResult {
    let mut failures = Vec::new();
    for model in registry::all_models() {
        let info = model.info();
        let foreign = if info.distance_metric == DistanceMetric::Rupture {
            DistanceMetric::JoynerBoore
        } else {
            DistanceMetric::Rupture
        };
        let mut input = sample_input(model.as_ref(), 6.0, 10.0);
        input.distance = Distance::new(foreign, 10.0);
        let Some(&im) = model.measures().first() else {
            failures.push(format!("{}: predicts no measure", info.short_name));
            continue;
        };
        match model.mean(im, &input) {
            Err(ImrError::DistanceMetricMismatch { .. }) => {}
            other => failures.push(format!(
                "{}: {} distance gave {other:?}",
                info.short_name,
                foreign.name()
            )),
        }
    }
    TestResult::from_failures(
        VALIDATOR,
        "Every family rejects distances in a foreign metric",
        "Families accept distances in a foreign metric",
        failures,
    )
}

fn check_measure_rejection() -> TestResult {
    let candidates = [
        IntensityMeasure::Pga,
        IntensityMeasure::Pgv,
        IntensityMeasure::AriasIntensity,
        IntensityMeasure::Sa(0.2),
    ];
    let mut failures = Vec::new();
    for model in registry::all_models() {
        let predicted = model.measures();
        let input = sample_input(model.as_ref(), 6.0, 10.0);
        for im in candidates {
            let expected = predicted.contains(&im);
            let evaluated = model.mean(im, &input).is_ok();
            if evaluated != expected || model.supports(im) != expected {
                failures.push(format!(
                    "{} {im}: predicted {expected}, mean ok {evaluated}, supports {}",
                    model.info().short_name,
                    model.supports(im)
                ));
            }
        }
    }
    TestResult::from_failures(
        VALIDATOR,
        "Unsupported intensity measures are rejected consistently",
        "Intensity-measure support is inconsistent",
        failures,
    )
}

fn check_untabulated_periods() -> TestResult {
    let mut failures = Vec::new();
    for model in registry::all_models() {
        if !model.info().measures.contains(&ImType::Sa) {
            continue;
        }
        let untabulated = IntensityMeasure::Sa(0.123_456);
        if untabulated_accepted(model.as_ref(), untabulated) {
            failures.push(format!("{} accepts {untabulated}", model.info().short_name));
        }
    }
    TestResult::from_failures(
        VALIDATOR,
        "SA periods must be tabulated exactly",
        "Families accept untabulated SA periods",
        failures,
    )
}

fn check_component_rule() -> TestResult {
    let mut failures = Vec::new();
    for model in registry::all_models() {
        let name = model.info().short_name;
        let mut imr = AttenuationRelationship::new(model);
        if let Err(detail) = component_rule(&mut imr) {
            failures.push(format!("{name}: {detail}"));
        }
    }
    TestResult::from_failures(
        VALIDATOR,
        "MMI clears the component and unknown components are rejected",
        "Component rule violated",
        failures,
    )
}

fn component_rule(imr: &mut AttenuationRelationship) -> Result<(), String> {
    imr.set_component_parameter("COMPONENT_NAME", ImType::Mmi.name())
        .map_err(|e| e.to_string())?;
    if imr.component().is_some() {
        return Err(format!("MMI left component {:?}", imr.component()));
    }
    let default = imr.info().default_component().ok_or("no default component")?;
    imr.set_component_parameter(default.name(), ImType::Pga.name())
        .map_err(|e| e.to_string())?;
    if imr.component() != Some(default) {
        return Err(format!("component {:?} after selecting {default:?}", imr.component()));
    }
    match imr.set_component_parameter("NOT_SUPPORTED", ImType::Pga.name()) {
        Err(ImrError::UnsupportedComponent { .. }) => Ok(()),
        other => Err(format!("unknown component gave {other:?}")),
    }
}

fn untabulated_accepted(model: &dyn GroundMotionModel, im: IntensityMeasure) -> bool {
    model.supports(im) || model.mean(im, &sample_input(model, 6.0, 10.0)).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Severity;

    #[test]
    fn each_check_reports_once() {
        let report = validate();
        assert_eq!(report.results.len(), 5);
        assert!(report.results.iter().all(|r| r.severity == Severity::Pass), "{:#?}", report.results);
    }
}
