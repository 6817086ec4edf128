//! TCO model tests — scaling factors, cost buckets, subscription.

use nac_tco_core::{
    tco::{location_factor, size_factor},
    SettingsOverride, TcoEngine,
};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

fn devices(n: u32) -> SettingsOverride {
    SettingsOverride { device_count: Some(n), ..Default::default() }
}

fn locations(n: u32) -> SettingsOverride {
    SettingsOverride { locations: Some(n), ..Default::default() }
}

#[test]
fn size_factor_breakpoints() {
    assert_eq!(size_factor(0), 0.8);
    assert_eq!(size_factor(999), 0.8);
    assert_eq!(size_factor(1000), 1.0);
    assert_eq!(size_factor(5000), 1.0);
    assert_eq!(size_factor(5001), 1.5);
    assert_eq!(size_factor(10_000), 1.5);
    assert_eq!(size_factor(10_001), 2.0, "last matching threshold wins above 10000");
}

#[test]
fn location_factor_is_sub_linear() {
    assert_eq!(location_factor(0), 0.0);
    assert_eq!(location_factor(2), 1.0);
    assert!(approx(location_factor(8), 2.0));
    assert!(location_factor(4) < 2.0 * location_factor(2));
}

/// Defaults: 500 devices (size 0.8), 2 locations (identity).
#[test]
fn default_hardware_matches_worked_example() {
    let engine = TcoEngine::builtin();
    let tco = engine.compute_tco("aruba", None).unwrap();

    // aruba initialHardware = 70000 → 70000 × 0.8 × 1
    assert!(approx(tco.initial_hardware, 56_000.0), "got {}", tco.initial_hardware);
    assert!(approx(tco.initial_licensing, 80_000.0));
    assert!(approx(tco.initial_implementation, 40_000.0));
    assert!(approx(tco.total_initial_cost, 176_000.0));
}

#[test]
fn cisco_breakdown_under_defaults() {
    let engine = TcoEngine::builtin();
    let tco = engine.compute_tco("cisco", None).unwrap();

    assert!(approx(tco.total_initial_cost, 208_000.0));
    assert!(approx(tco.annual_maintenance, 20_000.0));
    assert!(approx(tco.annual_support, 32_000.0));
    assert!(approx(tco.annual_operations, 64_000.0));
    // Vendor-embedded FTE: 100000 × 1.5 × 0.8
    assert!(approx(tco.annual_personnel, 120_000.0));
    assert_eq!(tco.annual_subscription, 0.0);
    assert!(approx(tco.total_annual_cost, 236_000.0));
    assert!(approx(tco.three_year_tco, 916_000.0), "got {}", tco.three_year_tco);
}

#[test]
fn portnox_breakdown_includes_subscription() {
    let engine = TcoEngine::builtin();
    let tco = engine.compute_tco("portnox", None).unwrap();

    // 500 × 3.0 × (1 − 0.15) × 12
    assert!(approx(tco.annual_subscription, 15_300.0), "got {}", tco.annual_subscription);
    assert!(approx(tco.total_initial_cost, 96_000.0));
    assert!(approx(tco.total_annual_cost, 79_300.0));
    assert!(approx(tco.three_year_tco, 333_900.0));
}

#[test]
fn global_fte_cost_does_not_change_personnel() {
    let engine = TcoEngine::builtin();
    let over = SettingsOverride { fte_cost: Some(250_000.0), ..Default::default() };

    let a = engine.compute_tco("cisco", None).unwrap();
    let b = engine.compute_tco("cisco", Some(&over)).unwrap();
    assert_eq!(a.annual_personnel, b.annual_personnel);
}

#[test]
fn crossing_size_breakpoint_increases_initial_cost() {
    let engine = TcoEngine::builtin();
    for id in ["cisco", "aruba", "portnox", "juniper"] {
        let small = engine.compute_tco(id, Some(&devices(900))).unwrap();
        let large = engine.compute_tco(id, Some(&devices(1100))).unwrap();
        assert!(
            large.total_initial_cost > small.total_initial_cost,
            "{id}: {} should exceed {}",
            large.total_initial_cost,
            small.total_initial_cost
        );
    }
}

#[test]
fn zero_locations_collapse_site_bound_costs() {
    let engine = TcoEngine::builtin();
    let tco = engine.compute_tco("cisco", Some(&locations(0))).unwrap();

    assert_eq!(tco.initial_hardware, 0.0);
    assert_eq!(tco.initial_implementation, 0.0);
    assert_eq!(tco.annual_maintenance, 0.0);
    // Licensing is device-bound, not site-bound.
    assert!(approx(tco.initial_licensing, 96_000.0));
    assert!(tco.three_year_tco.is_finite());
}

#[test]
fn zero_devices_uses_small_org_factor() {
    let engine = TcoEngine::builtin();
    let tco = engine.compute_tco("portnox", Some(&devices(0))).unwrap();

    assert_eq!(tco.annual_subscription, 0.0);
    assert!(approx(tco.initial_licensing, 80_000.0));
    assert!(tco.three_year_tco.is_finite());
}

#[test]
fn cloud_vendors_pay_subscription_and_others_do_not() {
    let engine = TcoEngine::builtin();
    for vendor in engine.catalog().iter() {
        let tco = engine.compute_tco(&vendor.id, None).unwrap();
        if vendor.is_cloud() {
            assert!(tco.annual_subscription > 0.0, "{} should have a subscription", vendor.id);
        } else {
            assert_eq!(tco.annual_subscription, 0.0, "{} should not", vendor.id);
        }
    }
}

#[test]
fn unknown_vendor_yields_none() {
    let engine = TcoEngine::builtin();
    assert!(engine.compute_tco("does-not-exist", None).is_none());
}

#[test]
fn yearly_schedule_accumulates_to_tco() {
    let engine = TcoEngine::builtin();
    let over = SettingsOverride { years_to_project: Some(5), ..Default::default() };
    let tco = engine.compute_tco("forescout", Some(&over)).unwrap();
    let schedule = tco.yearly_costs(5);

    assert_eq!(schedule.len(), 6);
    assert_eq!(schedule[0].label, "Initial");
    assert_eq!(schedule[0].total, tco.total_initial_cost);
    assert_eq!(schedule[3].label, "Year 3");
    assert_eq!(schedule[3].recurring, tco.total_annual_cost);

    let last = schedule.last().unwrap();
    assert!(
        (last.cumulative - tco.three_year_tco).abs() < 1e-6,
        "cumulative {} vs tco {}",
        last.cumulative,
        tco.three_year_tco
    );
}
