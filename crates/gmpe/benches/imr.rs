//! Benchmarks for single-point evaluation through both calling conventions.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use gmpe::geo::Location;
use gmpe::imr::{registry, AttenuationRelationship, Distance, GmInput, ImType, IntensityMeasure, StdDevType};
use gmpe::rupture::Rupture;
use gmpe::site::Site;

// ============================================================================
// Stateless form
// ============================================================================

fn bench_stateless(c: &mut Criterion) {
    let mut group = c.benchmark_group("stateless_mean_sigma");
    for model in registry::all_models() {
        let info = model.info();
        let im = match info.measures[0] {
            ImType::Pgv => IntensityMeasure::Pgv,
            ImType::AriasIntensity => IntensityMeasure::AriasIntensity,
            _ => IntensityMeasure::Pga,
        };
        let input = GmInput::new(6.5, Distance::new(info.distance_metric, 25.0))
            .with_vs30(400.0)
            .with_tectonic(info.tectonic_regions[0]);
        group.bench_with_input(BenchmarkId::from_parameter(info.short_name), &input, |b, input| {
            b.iter(|| {
                let mean = model.mean(im, black_box(input));
                let sigma = model.std_dev(im, black_box(input), StdDevType::Total);
                (mean, sigma)
            });
        });
    }
    group.finish();
}

// ============================================================================
// Stateful form
// ============================================================================

fn bench_stateful(c: &mut Criterion) {
    let site = Site::new(Location::surface(34.0, -118.0));
    let rupture = Rupture::point(
        6.5,
        0.0,
        Location::new(34.2, -118.0, 8.0),
        gmpe::rupture::TectonicRegion::ActiveShallow,
    );
    let mut group = c.benchmark_group("stateful_exceedance");
    for short_name in ["BJF_1997", "Sadigh_1997", "BA_2008"] {
        let Ok(model) = registry::model_by_short_name(short_name) else {
            continue;
        };
        let mut imr = AttenuationRelationship::new(model);
        if imr.set_site(&site).is_err() {
            continue;
        }
        group.bench_function(short_name, |b| {
            b.iter(|| {
                let _ = imr.set_rupture(black_box(&rupture));
                imr.exceed_probabilities(black_box(&[0.05, 0.1, 0.2, 0.4]))
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_stateless, bench_stateful);
criterion_main!(benches);
