//! Determinism tests.
//!
//! The engine holds no mutable state: identical inputs must give
//! identical results, call after call and thread after thread.

use nac_tco_core::{SettingsOverride, TcoEngine};
use std::sync::Arc;

fn scenario() -> SettingsOverride {
    SettingsOverride {
        device_count: Some(7_500),
        locations: Some(6),
        years_to_project: Some(5),
        ..Default::default()
    }
}

#[test]
fn repeated_calls_are_identical() {
    let engine = TcoEngine::builtin();
    let over = scenario();
    let ids = ["portnox", "cisco", "aruba", "forescout", "juniper"];

    let a = engine.compute_all(&ids, Some(&over));
    let b = engine.compute_all(&ids, Some(&over));

    assert_eq!(a, b);
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap(),
        "serialized output must be byte-identical"
    );
}

#[test]
fn concurrent_callers_see_the_same_results() {
    let engine = Arc::new(TcoEngine::builtin());
    let over = scenario();
    let ids = ["portnox", "cisco", "fortinac", "securew2"];
    let expected = engine.compute_all(&ids, Some(&over));

    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let engine = Arc::clone(&engine);
                let over = &over;
                s.spawn(move || engine.compute_all(&ids, Some(over)))
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

#[test]
fn catalog_swap_does_not_affect_existing_engine() {
    let original = TcoEngine::builtin();
    let before = original.compute_all(&["portnox", "cisco"], None);

    let swapped = original.clone().with_catalog(Arc::new(
        nac_tco_core::VendorCatalog::from_records(vec![]).unwrap(),
    ));
    assert!(swapped.compute_all(&["portnox", "cisco"], None).vendors.is_empty());

    assert_eq!(original.compute_all(&["portnox", "cisco"], None), before);
}
