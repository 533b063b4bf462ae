//! Hazard-curve sanity for every family.
//!
//! Each family integrates a small fault-plus-area forecast in its first
//! tectonic region. The curve must be monotonic and carry some hazard.

use gmpe::calc::HazardCurveCalculator;
use gmpe::geo::{Location, Region};
use gmpe::imr::{registry, AttenuationRelationship};
use gmpe::mfd::GutenbergRichterMfd;
use gmpe::rupture::TectonicRegion;
use gmpe::site::Site;
use gmpe::source::{AreaSource, EqkRuptureForecast, FaultSourceData, SimpleFaultSource};

use crate::report::{ConformanceReport, TestResult};

const VALIDATOR: &str = "calc/hazard";

const LEVELS: [f64; 8] = [0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0];

fn forecast(tectonic: TectonicRegion) -> anyhow::Result<EqkRuptureForecast> {
    let fault = FaultSourceData {
        id: 1,
        name: "sample fault".into(),
        tectonic,
        mfd: GutenbergRichterMfd::new(1.0, 0.01, 6.0, 7.2, 7)?.into(),
        trace: vec![Location::surface(34.3, -118.4), Location::surface(34.3, -117.9)],
        dip: 60.0,
        rake: 90.0,
        upper_depth: 1.0,
        lower_depth: 14.0,
        floating: true,
    };
    let region = Region::rectangle(33.8, 34.2, -118.3, -117.9)?;
    let mfd = GutenbergRichterMfd::new(1.0, 0.05, 5.0, 6.8, 7)?.into();
    let area = AreaSource::new("sample zone", region, mfd, 10.0, 0.0, tectonic, 0.1)?;
    let sources = vec![SimpleFaultSource::new(fault, 2.0)?.into(), area.into()];
    Ok(EqkRuptureForecast::new(sources, 50.0)?)
}

fn curve_for(imr: &mut AttenuationRelationship, site: &Site) -> anyhow::Result<Vec<f64>> {
    let tectonic = imr
        .info()
        .tectonic_regions
        .first()
        .copied()
        .ok_or_else(|| anyhow::anyhow!("no tectonic region"))?;
    let measure = imr
        .info()
        .measures
        .first()
        .ok_or_else(|| anyhow::anyhow!("no intensity measure"))?
        .name();
    imr.set_intensity_measure(measure)?;
    let curve = HazardCurveCalculator::default().compute(&LEVELS, site, &forecast(tectonic)?, imr)?;
    if !curve.is_monotonic() {
        anyhow::bail!("not monotonic: {:?}", curve.probabilities());
    }
    Ok(curve.probabilities().to_vec())
}

/// Computes one curve per family.
#[must_use]
pub fn validate() -> ConformanceReport {
    let site = Site::new(Location::surface(34.0, -118.1));
    let mut failures = Vec::new();
    for model in registry::all_models() {
        let name = model.info().short_name;
        let mut imr = AttenuationRelationship::new(model);
        match curve_for(&mut imr, &site) {
            Ok(p) if p.first().is_some_and(|&p0| p0 > 0.0) => {
                tracing::debug!(family = name, p0 = p[0], "hazard curve ok");
            }
            Ok(_) => failures.push(format!("{name}: no hazard at the lowest level")),
            Err(e) => failures.push(format!("{name}: {e:#}")),
        }
    }
    let mut report = ConformanceReport::new();
    report.push(TestResult::from_failures(
        VALIDATOR,
        "Every family yields a monotonic, non-trivial hazard curve",
        "Hazard curves are malformed",
        failures,
    ));
    report
}
