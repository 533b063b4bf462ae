//! The bundled demo run file parses and produces a sensible curve.

#![cfg(feature = "config")]

use gmpe::config::HazardConfig;

const DEMO: &str = include_str!("../../../demos/la_basin.toml");

#[test]
fn demo_run_produces_a_curve() {
    let cfg = HazardConfig::from_toml_str(DEMO).unwrap();
    let forecast = cfg.build_forecast().unwrap();
    assert_eq!(forecast.sources().len(), 2);

    let mut imr = cfg.build_imr().unwrap();
    let curve = cfg
        .build_calculator()
        .unwrap()
        .compute(&cfg.curve_imls(), &cfg.build_site(), &forecast, &mut imr)
        .unwrap();
    assert_eq!(curve.len(), 19);
    assert!(curve.is_monotonic());
    assert!(curve.probabilities()[0] > 0.5, "{:?}", curve.probabilities());
    assert!(*curve.probabilities().last().unwrap() < 0.01);
}
