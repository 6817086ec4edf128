//! Sensitivity tests — sweeps, elasticity rating, breakeven, tornado.

use nac_tco_core::{
    sensitivity::{variations, SensitivityParameter, SensitivityRating, MAX_RANGE_PCT, MAX_STEPS},
    SettingsOverride, TcoEngine,
};

#[test]
fn variations_are_symmetric_around_base() {
    let v = variations(SensitivityParameter::DeviceCount, 500.0, 30.0, 5);
    assert_eq!(v, vec![350.0, 425.0, 500.0, 575.0, 650.0]);
}

#[test]
fn variations_collapse_duplicates_after_rounding() {
    // 2 locations ± 20%: 1.6 → 2, 2.0, 2.4 → 2
    let v = variations(SensitivityParameter::Locations, 2.0, 20.0, 3);
    assert_eq!(v, vec![2.0]);
}

#[test]
fn device_sweep_is_non_decreasing_for_subscription_vendor() {
    let engine = TcoEngine::builtin();
    let sweep = engine
        .sensitivity("portnox", "cisco", SensitivityParameter::DeviceCount, 30.0, 7, None)
        .unwrap();

    assert_eq!(sweep.points.len(), 7);
    assert_eq!(sweep.base_value, 500.0);
    assert!((sweep.base_tco - 333_900.0).abs() < 1e-6);
    assert!(
        sweep.points.windows(2).all(|w| w[1].tco >= w[0].tco),
        "TCO must not fall as devices grow"
    );
    assert!(sweep.points.windows(2).all(|w| w[1].value > w[0].value));
}

/// 350 → 650 devices moves portnox TCO from 320130 to 347670.
#[test]
fn elasticity_and_rating() {
    let engine = TcoEngine::builtin();
    let sweep = engine
        .sensitivity("portnox", "cisco", SensitivityParameter::DeviceCount, 30.0, 5, None)
        .unwrap();

    let expected = ((347_670.0 - 320_130.0) / 333_900.0) / (300.0 / 500.0);
    assert!((sweep.elasticity - expected).abs() < 1e-9, "got {}", sweep.elasticity);
    assert_eq!(sweep.rating, SensitivityRating::Low);
}

#[test]
fn flat_sweep_has_zero_elasticity() {
    let engine = TcoEngine::builtin();
    // No subscription, all points below the 1000-device breakpoint.
    let sweep = engine
        .sensitivity("cisco", "cisco", SensitivityParameter::BasePrice, 50.0, 5, None)
        .unwrap();
    assert_eq!(sweep.elasticity, 0.0);
    assert_eq!(sweep.breakeven, None, "a vendor never beats itself");
}

#[test]
fn device_breakeven_is_smallest_fleet_with_positive_roi() {
    let engine = TcoEngine::builtin();
    let sweep = engine
        .sensitivity("portnox", "cisco", SensitivityParameter::DeviceCount, 30.0, 5, None)
        .unwrap();
    assert_eq!(sweep.breakeven, Some(350.0));

    let reversed = engine
        .sensitivity("cisco", "portnox", SensitivityParameter::DeviceCount, 30.0, 5, None)
        .unwrap();
    assert_eq!(reversed.breakeven, None, "cisco never beats portnox here");
}

/// Portnox TCO at price p is 288000 + 15300p, so ROI vs cisco stays above
/// 100% only below p ≈ 11.1. Sweep 7, 8.5, 10, 11.5, 13.
#[test]
fn price_breakeven_is_highest_price_above_roi_threshold() {
    let engine = TcoEngine::builtin();
    let over = SettingsOverride { base_price: Some(10.0), ..Default::default() };
    let sweep = engine
        .sensitivity("portnox", "cisco", SensitivityParameter::BasePrice, 30.0, 5, Some(&over))
        .unwrap();

    let values: Vec<f64> = sweep.points.iter().map(|p| p.value).collect();
    assert_eq!(values, vec![7.0, 8.5, 10.0, 11.5, 13.0]);
    assert!(sweep.points[3].roi < 100.0, "11.5 should fall below the threshold");
    assert_eq!(sweep.breakeven, Some(10.0));
}

#[test]
fn price_breakeven_absent_when_threshold_never_met() {
    let engine = TcoEngine::builtin();
    let sweep = engine
        .sensitivity("portnox", "microsoft", SensitivityParameter::BasePrice, 30.0, 5, None)
        .unwrap();
    assert!(sweep.points.iter().all(|p| p.roi <= 100.0));
    assert_eq!(sweep.breakeven, None);
}

#[test]
fn other_parameters_have_no_breakeven() {
    let engine = TcoEngine::builtin();
    for parameter in [
        SensitivityParameter::VolumeDiscount,
        SensitivityParameter::Locations,
        SensitivityParameter::YearsToProject,
    ] {
        let sweep = engine
            .sensitivity("portnox", "cisco", parameter, 30.0, 5, None)
            .unwrap();
        assert!(sweep.points.iter().all(|p| p.roi > 0.0));
        assert_eq!(sweep.breakeven, None, "{parameter:?}");
    }
}

#[test]
fn step_count_is_capped() {
    let engine = TcoEngine::builtin();
    let sweep = engine
        .sensitivity("portnox", "cisco", SensitivityParameter::DeviceCount, 30.0, usize::MAX, None)
        .unwrap();
    assert_eq!(sweep.points.len(), MAX_STEPS);
    assert_eq!(variations(SensitivityParameter::DeviceCount, 500.0, 30.0, 1_000_000).len(), MAX_STEPS);
}

#[test]
fn negative_range_sweeps_ascending() {
    let engine = TcoEngine::builtin();
    let sweep = engine
        .sensitivity("portnox", "cisco", SensitivityParameter::DeviceCount, -30.0, 5, None)
        .unwrap();

    let values: Vec<f64> = sweep.points.iter().map(|p| p.value).collect();
    assert_eq!(values, vec![350.0, 425.0, 500.0, 575.0, 650.0]);
    assert_eq!(sweep.breakeven, Some(350.0));
}

#[test]
fn oversized_range_is_capped() {
    let v = variations(SensitivityParameter::DeviceCount, 500.0, 400.0, 3);
    assert_eq!(v, vec![0.0, 500.0, 1_000.0]);

    let engine = TcoEngine::builtin();
    let tornado = engine.tornado("cisco", -250.0, None).unwrap();
    assert_eq!(tornado.range_pct, MAX_RANGE_PCT);
}

#[test]
fn huge_device_counts_stay_within_u32() {
    let engine = TcoEngine::builtin();
    let over = SettingsOverride { device_count: Some(u32::MAX), ..Default::default() };
    let sweep = engine
        .sensitivity("portnox", "cisco", SensitivityParameter::DeviceCount, 30.0, 3, Some(&over))
        .unwrap();

    let top = sweep.points.last().unwrap();
    assert_eq!(top.value, f64::from(u32::MAX), "reported value is the value used");
    assert_eq!(sweep.points.len(), 2, "+30% collapses onto the base");
}

#[test]
fn rating_thresholds() {
    assert_eq!(SensitivityRating::from_elasticity(0.0), SensitivityRating::Low);
    assert_eq!(SensitivityRating::from_elasticity(0.5), SensitivityRating::MediumLow);
    assert_eq!(SensitivityRating::from_elasticity(1.2), SensitivityRating::Medium);
    assert_eq!(SensitivityRating::from_elasticity(1.5), SensitivityRating::MediumHigh);
    assert_eq!(SensitivityRating::from_elasticity(2.0), SensitivityRating::High);
}

#[test]
fn sweep_respects_override() {
    let engine = TcoEngine::builtin();
    let over = SettingsOverride { device_count: Some(2_000), ..Default::default() };
    let sweep = engine
        .sensitivity("cisco", "portnox", SensitivityParameter::DeviceCount, 10.0, 3, Some(&over))
        .unwrap();
    assert_eq!(sweep.base_value, 2_000.0);
    assert_eq!(sweep.points[0].value, 1_800.0);
}

#[test]
fn unknown_vendor_has_no_sweep() {
    let engine = TcoEngine::builtin();
    assert!(engine
        .sensitivity("ghost", "cisco", SensitivityParameter::DeviceCount, 30.0, 5, None)
        .is_none());
    assert!(engine.tornado("ghost", 20.0, None).is_none());
}

/// Cisco has no subscription, so only the horizon moves its TCO at ±20%.
#[test]
fn tornado_ranks_by_impact() {
    let engine = TcoEngine::builtin();
    let tornado = engine.tornado("cisco", 20.0, None).unwrap();

    assert_eq!(tornado.bars.len(), SensitivityParameter::ALL.len());
    assert!(tornado.bars.windows(2).all(|w| w[0].impact >= w[1].impact));
    assert_eq!(tornado.most_sensitive, Some(SensitivityParameter::YearsToProject));

    let years = &tornado.bars[0];
    assert_eq!(years.low_value, 2.0);
    assert_eq!(years.high_value, 4.0);
    assert!((years.impact - 2.0 * 236_000.0).abs() < 1e-6);
}

#[test]
fn tornado_for_zero_cost_vendor_has_no_driver() {
    let engine = TcoEngine::builtin();
    let tornado = engine.tornado("no-nac", 20.0, None).unwrap();
    assert!(tornado.bars.iter().all(|b| b.impact == 0.0));
    assert_eq!(tornado.most_sensitive, None);
}

#[test]
fn sweep_serializes_camel_case() {
    let engine = TcoEngine::builtin();
    let sweep = engine
        .sensitivity("portnox", "cisco", SensitivityParameter::VolumeDiscount, 20.0, 3, None)
        .unwrap();
    let v = serde_json::to_value(&sweep).unwrap();
    assert_eq!(v["parameter"], "volumeDiscount");
    assert!(v["baseTco"].is_number());
    assert_eq!(v["rating"], "low");
}
