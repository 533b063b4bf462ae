//! Derived total sigma equals the root sum of squares of its parts.

use gmpe::imr::{registry, Distance, GmInput, StdDevType};

#[test]
fn total_is_root_sum_of_squares() {
    let mut checked = 0;
    for model in registry::all_models() {
        let info = model.info();
        if !info.sigma_derived {
            continue;
        }
        for (m, km, vs30, rake) in [(5.5, 5.0, 300.0, 0.0), (7.0, 30.0, 760.0, 90.0), (6.2, 80.0, 1200.0, f64::NAN)] {
            let input = GmInput::new(m, Distance::new(info.distance_metric, km))
                .with_vs30(vs30)
                .with_rake(rake)
                .with_tectonic(info.tectonic_regions[0]);
            for im in model.measures() {
                let sigma = |kind| model.std_dev(im, &input, kind).unwrap();
                let total = sigma(StdDevType::Total);
                let parts = sigma(StdDevType::InterEvent).hypot(sigma(StdDevType::IntraEvent));
                assert!(
                    ((total - parts) / total).abs() < 1e-6,
                    "{} {im}: total {total} vs parts {parts}",
                    info.short_name
                );
                assert_eq!(sigma(StdDevType::None), 0.0);
                checked += 1;
            }
        }
    }
    assert!(checked > 0);
}

#[test]
fn total_only_families_reject_components() {
    for model in registry::all_models() {
        let info = model.info();
        if info.sigma_derived {
            continue;
        }
        let input = GmInput::new(6.0, Distance::new(info.distance_metric, 20.0)).with_tectonic(info.tectonic_regions[0]);
        let im = model.measures()[0];
        assert!(model.std_dev(im, &input, StdDevType::InterEvent).is_err(), "{}", info.short_name);
        assert!(model.std_dev(im, &input, StdDevType::Total).unwrap() > 0.0);
    }
}
