//! Site identity: equality and hashing use location and name only.

use std::collections::HashMap;

use gmpe::geo::Location;
use gmpe::site::{Site, SiteValue, VS30};
use proptest::prelude::*;

// =============================================================================
// Keyed lookup over a global grid
// =============================================================================

#[test]
fn grid_of_sites_as_map_keys() {
    let mut map = HashMap::new();
    for i in 0..180 {
        for j in 0..180 {
            let lat = -89.5 + i as f64;
            let lon = -179.0 + 2.0 * j as f64;
            let site = Site::new(Location::surface(lat, lon)).with_param(VS30, SiteValue::Double(760.0));
            assert!(map.insert(site, (i, j)).is_none());
        }
    }
    assert_eq!(map.len(), 32_400);

    for i in 0..180 {
        for j in 0..180 {
            let key = Site::new(Location::surface(-89.5 + i as f64, -179.0 + 2.0 * j as f64));
            assert_eq!(map.get(&key), Some(&(i, j)), "lookup failed at ({i}, {j})");
            assert_eq!(map.remove(&key), Some((i, j)));
            assert_eq!(map.remove(&key), None);
        }
    }
    assert!(map.is_empty());
}

#[test]
fn named_and_unnamed_sites_differ() {
    let loc = Location::surface(34.0, -118.0);
    let mut map = HashMap::new();
    map.insert(Site::new(loc), 0);
    map.insert(Site::named(loc, "LA"), 1);
    map.insert(Site::named(loc, "la"), 2);
    assert_eq!(map.len(), 3);
    assert_eq!(map[&Site::named(loc, "LA")], 1);
}

// =============================================================================
// Equality agrees with the identity fields
// =============================================================================

fn name() -> impl Strategy<Value = Option<String>> {
    prop::option::of(prop::sample::select(vec!["a".to_string(), "b".to_string()]))
}

proptest! {
    /// Sites are equal exactly when location and name are.
    #[test]
    fn prop_equality_is_location_and_name(
        lat in prop::sample::select(vec![10.0, 10.5]),
        lat2 in prop::sample::select(vec![10.0, 10.5]),
        lon in -180.0f64..180.0,
        n1 in name(),
        n2 in name(),
        vs30 in 150.0f64..1500.0,
    ) {
        let make = |lat: f64, n: &Option<String>| {
            let loc = Location::surface(lat, lon);
            n.as_ref().map_or_else(|| Site::new(loc), |n| Site::named(loc, n.clone()))
        };
        let a = make(lat, &n1).with_param(VS30, SiteValue::Double(vs30));
        let b = make(lat2, &n2);
        prop_assert_eq!(a == b, lat == lat2 && n1 == n2);
    }

    /// Parameters never affect the hash.
    #[test]
    fn prop_params_do_not_affect_lookup(lat in -90.0f64..90.0, lon in -180.0f64..180.0, vs30 in 150.0f64..1500.0) {
        let loc = Location::surface(lat, lon);
        let mut map = HashMap::new();
        map.insert(Site::new(loc), ());
        let lookup = Site::new(loc).with_param(VS30, SiteValue::Double(vs30));
        prop_assert!(map.contains_key(&lookup));
    }
}
