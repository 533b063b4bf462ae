//! Gutenberg-Richter range changes conserve the moment rate.

use gmpe::mfd::{GutenbergRichterMfd, MagFreqDist, MfdError, MAX_BINS};
use proptest::prelude::*;

// =============================================================================
// Worked case
// =============================================================================

#[test]
fn increment_then_restore() {
    let mut gr = GutenbergRichterMfd::new(2.0, 123.0, 10.0, 20.0, 11).unwrap();
    assert_eq!(gr.delta(), 1.0);
    let (a, moment) = (gr.a_value(), gr.total_moment_rate());

    gr.increment_mag_upper(2.4).unwrap();
    assert_eq!(gr.mag_upper(), 22.0);
    assert_eq!(gr.num_bins(), 13);
    assert_eq!(gr.delta(), 1.0);
    assert_eq!(gr.b_value(), 2.0);
    assert_eq!(gr.total_moment_rate(), moment);

    gr.increment_mag_upper(-1.55).unwrap();
    assert_eq!(gr.mag_upper(), 20.0);
    assert_eq!(gr.num_bins(), 11);
    assert!((gr.total_cumulative_rate() - 123.0).abs() < 1e-9);
    assert_eq!(gr.a_value(), a);
}

#[test]
fn bins_sum_to_the_cumulative_rate() {
    let gr = GutenbergRichterMfd::new(1.0, 0.2, 5.0, 8.0, 31).unwrap();
    let total: f64 = gr.points().iter().map(|(_, r)| r).sum();
    assert!((total - 0.2).abs() < 1e-12, "bins sum to {total}");
    assert!((gr.cumulative_rate(0) - 0.2).abs() < 1e-12);

    let mfd: MagFreqDist = gr.clone().into();
    assert!((mfd.total_moment_rate() - gr.total_moment_rate()).abs() / gr.total_moment_rate() < 1e-9);
    assert_eq!(mfd.max_magnitude(), Some(gr.mag_upper()));
}

#[test]
fn too_few_bins_is_rejected() {
    let mut gr = GutenbergRichterMfd::new(1.0, 1.0, 5.0, 6.0, 3).unwrap();
    assert!(gr.increment_mag_upper(-1.0).is_err());
    assert_eq!(gr.num_bins(), 3);
    assert!(GutenbergRichterMfd::new(1.0, 1.0, 5.0, 6.0, 1).is_err());
    assert!(GutenbergRichterMfd::new(1.0, 1.0, 6.0, 5.0, 5).is_err());
}

#[test]
fn non_finite_range_changes_are_rejected() {
    let mut gr = GutenbergRichterMfd::new(1.0, 1.0, 5.0, 8.0, 31).unwrap();
    let before = gr.clone();
    for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        assert!(matches!(gr.increment_mag_upper(bad), Err(MfdError::InvalidValue { .. })), "{bad}");
        assert!(matches!(gr.set_mag_upper(bad), Err(MfdError::InvalidValue { .. })), "{bad}");
    }
    assert_eq!(gr, before);
}

#[test]
fn huge_range_changes_are_rejected() {
    let mut gr = GutenbergRichterMfd::new(1.0, 1.0, 5.0, 8.0, 31).unwrap();
    let before = gr.clone();
    assert!(matches!(gr.increment_mag_upper(1e300), Err(MfdError::TooManyBins { .. })));
    assert!(matches!(gr.set_mag_upper(1e300), Err(MfdError::TooManyBins { .. })));
    assert!(matches!(gr.set_mag_upper(1e12), Err(MfdError::TooManyBins { .. })));
    assert!(matches!(gr.increment_mag_upper(-1e300), Err(MfdError::TooFewBins { num_bins: 0 })));
    assert!(matches!(gr.set_mag_upper(-1e300), Err(MfdError::TooFewBins { num_bins: 0 })));
    assert_eq!(gr, before);

    // M 1004.9 has no finite moment.
    assert!(matches!(gr.set_mag_upper(gr.magnitude(MAX_BINS - 1)), Err(MfdError::InvalidValue { .. })));
    assert_eq!(gr, before);

    let mut fine = GutenbergRichterMfd::new(1.0, 1.0, 5.0, 5.01, 2).unwrap();
    fine.set_mag_upper(fine.magnitude(MAX_BINS - 1)).unwrap();
    assert_eq!(fine.num_bins(), MAX_BINS);
    assert!(fine.total_moment_rate().is_finite());
    assert!(GutenbergRichterMfd::new(1.0, 1.0, 5.0, 8.0, MAX_BINS + 1).is_err());
}

// =============================================================================
// Round trips
// =============================================================================

proptest! {
    /// incrementMagUpper(d) followed by incrementMagUpper(-d) restores the
    /// distribution.
    #[test]
    fn prop_increment_round_trip(
        b in 0.5f64..2.0,
        tcr in 0.01f64..1000.0,
        lower in 4.0f64..6.0,
        span in 1.0f64..4.0,
        bins in 5usize..40,
        dm in -2.0f64..2.0,
    ) {
        let mut gr = GutenbergRichterMfd::new(b, tcr, lower, lower + span, bins).unwrap();
        let before = gr.clone();
        prop_assume!(gr.increment_mag_upper(dm).is_ok());
        prop_assert_eq!(gr.total_moment_rate(), before.total_moment_rate());
        gr.increment_mag_upper(-dm).unwrap();

        prop_assert_eq!(gr.num_bins(), before.num_bins());
        prop_assert!((gr.mag_upper() - before.mag_upper()).abs() < 1e-5);
        prop_assert!((gr.b_value() - before.b_value()).abs() < 1e-5);
        prop_assert!((gr.a_value() - before.a_value()).abs() < 1e-5);
        prop_assert!((gr.total_cumulative_rate() - before.total_cumulative_rate()).abs() < 1e-5 * tcr.max(1.0));
        prop_assert!((gr.total_moment_rate() - before.total_moment_rate()).abs() < 1e8);
    }

    /// setMagUpper(x) followed by setMagUpper(original) restores the a-value
    /// and cumulative rate.
    #[test]
    fn prop_set_mag_upper_round_trip(
        b in 0.5f64..2.0,
        tcr in 0.01f64..1000.0,
        lower in 4.0f64..6.0,
        span in 1.0f64..4.0,
        bins in 5usize..40,
        target in 7.0f64..9.0,
    ) {
        let mut gr = GutenbergRichterMfd::new(b, tcr, lower, lower + span, bins).unwrap();
        let (upper, a) = (gr.mag_upper(), gr.a_value());
        gr.set_mag_upper(target).unwrap();
        gr.set_mag_upper(upper).unwrap();
        prop_assert!((gr.a_value() - a).abs() < 1e-2);
        prop_assert!((gr.total_cumulative_rate() - tcr).abs() < 1e-1);
    }
}
