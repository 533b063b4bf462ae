//! The uniform relationship interface across every registered family.

use gmpe::geo::{Location, RuptureSurface};
use gmpe::imr::{
    registry, AttenuationRelationship, Distance, DistanceMetric, GmInput, GroundMotionModel,
    ImrError, IntensityMeasure, StdDevType,
};
use gmpe::rupture::Rupture;
use gmpe::site::{Site, SiteValue, VS30};

fn site() -> Site {
    Site::new(Location::surface(34.0, -118.0)).with_param(VS30, SiteValue::Double(400.0))
}

fn rupture(model: &dyn GroundMotionModel) -> Rupture {
    let tectonic = model.info().tectonic_regions[0];
    let hypo = Location::new(34.2, -118.0, 15.0);
    Rupture::point(6.5, 90.0, hypo, tectonic)
}

#[test]
fn stateful_and_stateless_agree() {
    for model in registry::all_models() {
        let name = model.info().short_name;
        let rupture = rupture(model.as_ref());
        let mut imr = AttenuationRelationship::new(model);
        imr.set_site_and_rupture(&site(), &rupture).unwrap();

        let metric = imr.info().distance_metric;
        let km = RuptureSurface::Point(*rupture.hypocenter()).distance(metric, site().location(), rupture.hypocenter());
        assert_eq!(imr.distance(), Distance::new(metric, km), "{name}");

        let mut explicit = GmInput::new(6.5, Distance::new(metric, km))
            .with_vs30(400.0)
            .with_rake(90.0)
            .with_dip(90.0)
            .with_depth(15.0)
            .with_tectonic(rupture.tectonic());
        if let Some(t) = imr.info().default_site_type() {
            explicit = explicit.with_site_type(t);
        }
        if let Some(c) = imr.info().default_component() {
            explicit = explicit.with_component(c);
        }

        for im in imr.model().measures() {
            imr.select_intensity_measure(im).unwrap();
            let stateful = imr.mean().unwrap();
            assert_eq!(stateful, imr.model().mean(im, &explicit).unwrap(), "{name} {im}");
            assert_eq!(imr.std_dev().unwrap(), imr.model().std_dev(im, &explicit, StdDevType::Total).unwrap());
        }
    }
}

#[test]
fn wrong_distance_metric_is_detected() {
    for model in registry::all_models() {
        let info = model.info();
        let foreign = if info.distance_metric == DistanceMetric::Rupture {
            Distance::joyner_boore(10.0)
        } else {
            Distance::rupture(10.0)
        };
        let input = GmInput::new(6.0, foreign).with_tectonic(info.tectonic_regions[0]);
        let im = model.measures()[0];
        assert!(
            matches!(model.mean(im, &input), Err(ImrError::DistanceMetricMismatch { .. })),
            "{}",
            info.short_name
        );
    }
}

#[test]
fn measures_expand_sa_over_tabulated_periods() {
    for model in registry::all_models() {
        let measures = model.measures();
        let sa = measures.iter().filter(|im| matches!(im, IntensityMeasure::Sa(_))).count();
        assert_eq!(sa, model.supported_periods().len(), "{}", model.info().short_name);
        assert!(!measures.is_empty());
        assert!(measures.iter().all(|&im| model.supports(im)), "{}", model.info().short_name);
    }
}

#[test]
fn unsupported_measures_are_rejected() {
    for model in registry::all_models() {
        let info = model.info();
        let input = GmInput::new(6.0, Distance::new(info.distance_metric, 10.0)).with_tectonic(info.tectonic_regions[0]);
        for im in [IntensityMeasure::Pga, IntensityMeasure::Pgv, IntensityMeasure::AriasIntensity, IntensityMeasure::Sa(0.2)] {
            let supported = model.measures().contains(&im);
            assert_eq!(model.mean(im, &input).is_ok(), supported, "{} {im}", info.short_name);
            assert_eq!(model.supports(im), supported, "{} {im}", info.short_name);
        }
        assert!(model.mean(IntensityMeasure::Sa(0.123), &input).is_err());
    }
}

#[test]
fn mmi_clears_component_for_every_family() {
    for model in registry::all_models() {
        let mut imr = AttenuationRelationship::new(model);
        imr.set_component_parameter("COMPONENT_NAME", "MMI").unwrap();
        assert_eq!(imr.component(), None);
        let default = imr.info().components[0];
        imr.set_component_parameter(default.name(), "AAA").unwrap();
        assert_eq!(imr.component(), Some(default));
        assert!(matches!(
            imr.set_component_parameter("NOT_SUPPORTED", "AAA"),
            Err(ImrError::UnsupportedComponent { .. })
        ));
    }
}

#[test]
fn rupture_before_site_is_an_error() {
    for model in registry::all_models() {
        let rupture = rupture(model.as_ref());
        let mut imr = AttenuationRelationship::new(model);
        assert_eq!(imr.set_rupture(&rupture), Err(ImrError::SiteNotSet));
    }
}

#[test]
fn defaults_restore_after_configuration() {
    let mut imr = AttenuationRelationship::new(registry::model_by_short_name("Sadigh_1997").unwrap());
    let before = imr.input();
    imr.set_site_and_rupture(&site(), &rupture(imr.model())).unwrap();
    imr.set_sa_period(1.0).unwrap();
    imr.set_std_dev_type(StdDevType::None).unwrap();
    assert_ne!(imr.input(), before);
    imr.set_param_defaults();
    assert_eq!(imr.input(), before);
    assert_eq!(imr.intensity_measure(), IntensityMeasure::Pga);
    assert_eq!(imr.set_rupture(&rupture(imr.model())), Err(ImrError::SiteNotSet));
}
