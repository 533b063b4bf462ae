//! Standard-deviation checks.

use gmpe::imr::{registry, GmInput, GroundMotionModel, ImrError, IntensityMeasure, StdDevType};

use super::sample_input;
use crate::report::{ConformanceReport, TestResult};

const VALIDATOR: &str = "imr/sigma";
/// Relative tolerance on the decomposition.
const TOLERANCE: f64 = 1e-6;

/// Runs the sigma checks over every family, measure and a small grid of
/// magnitudes and distances.
#[must_use]
pub fn validate() -> ConformanceReport {
    let mut decomposition = Vec::new();
    let mut positivity = Vec::new();

    for model in registry::all_models() {
        let name = model.info().short_name;
        for (magnitude, km) in [(5.5, 5.0), (6.5, 30.0), (7.5, 100.0)] {
            let input = sample_input(model.as_ref(), magnitude, km);
            for im in model.measures() {
                let tag = format!("{name} {im} M{magnitude} {km} km");
                match total_sigma(model.as_ref(), im, &input) {
                    Ok(total) if total > 0.0 && total.is_finite() => {}
                    Ok(total) => positivity.push(format!("{tag}: total {total}")),
                    Err(e) => positivity.push(format!("{tag}: {e}")),
                }
                if let Err(detail) = decomposes(model.as_ref(), im, &input) {
                    decomposition.push(format!("{tag}: {detail}"));
                }
            }
        }
    }

    let mut report = ConformanceReport::new();
    report.push(TestResult::from_failures(
        VALIDATOR,
        "Total sigma is positive and finite",
        "Total sigma is not positive",
        positivity,
    ));
    report.push(TestResult::from_failures(
        VALIDATOR,
        "Total sigma decomposes into inter- and intra-event where supported",
        "Sigma decomposition is inconsistent",
        decomposition,
    ));
    report
}

fn total_sigma(model: &dyn GroundMotionModel, im: IntensityMeasure, input: &GmInput) -> Result<f64, ImrError> {
    model.std_dev(im, input, StdDevType::Total)
}

fn decomposes(model: &dyn GroundMotionModel, im: IntensityMeasure, input: &GmInput) -> Result<(), String> {
    let inter = model.std_dev(im, input, StdDevType::InterEvent);
    if !model.info().sigma_derived {
        return match inter {
            Err(_) => Ok(()),
            Ok(_) => Err("total-only family accepts an inter-event sigma".into()),
        };
    }
    let intra = model.std_dev(im, input, StdDevType::IntraEvent);
    let total = total_sigma(model, im, input).map_err(|e| e.to_string())?;
    let inter = inter.map_err(|e| e.to_string())?;
    let intra = intra.map_err(|e| e.to_string())?;
    let derived = inter.hypot(intra);
    if ((total - derived) / total).abs() <= TOLERANCE {
        Ok(())
    } else {
        Err(format!("total {total} vs sqrt(inter² + intra²) {derived}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gmpe::imr::Distance;

    #[test]
    fn derived_family_decomposes() {
        let bjf = registry::model_by_short_name("BJF_1997").unwrap();
        let input = GmInput::new(6.0, Distance::joyner_boore(10.0));
        assert!(decomposes(bjf.as_ref(), IntensityMeasure::Pga, &input).is_ok());
    }

    #[test]
    fn total_only_family_has_no_components() {
        let cornell = registry::model_by_short_name("Cornell_1979").unwrap();
        let input = GmInput::new(6.0, Distance::hypocentral(10.0));
        assert!(decomposes(cornell.as_ref(), IntensityMeasure::Pga, &input).is_ok());
    }
}
