//! Benchmarks for hazard-curve integration over fault and area sources.

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use gmpe::calc::HazardCurveCalculator;
use gmpe::geo::{Location, Region};
use gmpe::imr::{registry, AttenuationRelationship};
use gmpe::mfd::GutenbergRichterMfd;
use gmpe::rupture::TectonicRegion;
use gmpe::site::Site;
use gmpe::source::{AreaSource, EqkRuptureForecast, FaultSourceData, SeismicSource, SimpleFaultSource};

const LEVELS: [f64; 10] = [0.005, 0.01, 0.02, 0.05, 0.1, 0.2, 0.4, 0.8, 1.5, 3.0];

fn forecast() -> Option<EqkRuptureForecast> {
    let fault = FaultSourceData {
        id: 1,
        name: "bench fault".into(),
        tectonic: TectonicRegion::ActiveShallow,
        mfd: GutenbergRichterMfd::new(1.0, 0.02, 6.0, 7.5, 16).ok()?.into(),
        trace: vec![Location::surface(34.3, -118.5), Location::surface(34.4, -117.8)],
        dip: 70.0,
        rake: 180.0,
        upper_depth: 0.0,
        lower_depth: 15.0,
        floating: true,
    };
    let region = Region::rectangle(33.5, 34.5, -118.5, -117.5).ok()?;
    let mfd = GutenbergRichterMfd::new(1.0, 0.1, 5.0, 7.0, 21).ok()?.into();
    let area = AreaSource::new("bench zone", region, mfd, 8.0, 0.0, TectonicRegion::ActiveShallow, 0.1).ok()?;
    let sources: Vec<SeismicSource> = vec![SimpleFaultSource::new(fault, 1.0).ok()?.into(), area.into()];
    EqkRuptureForecast::new(sources, 50.0).ok()
}

fn bench_curve(c: &mut Criterion) {
    let Some(forecast) = forecast() else {
        return;
    };
    let site = Site::new(Location::surface(34.0, -118.0));
    let calc = HazardCurveCalculator::default();
    let mut group = c.benchmark_group("hazard_curve");
    group.throughput(Throughput::Elements(forecast.num_ruptures() as u64));
    group.sample_size(10);
    for short_name in ["BJF_1997", "Sadigh_1997", "Campbell_1997", "BA_2008"] {
        let Ok(model) = registry::model_by_short_name(short_name) else {
            continue;
        };
        let mut imr = AttenuationRelationship::new(model);
        group.bench_function(short_name, |b| {
            b.iter(|| calc.compute(&LEVELS, &site, &forecast, &mut imr));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_curve);
criterion_main!(benches);
