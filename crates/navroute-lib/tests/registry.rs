mod common;

use common::coord;
use navroute_lib::{distance, Error, WaypointRegistry};

fn two_odemis() -> WaypointRegistry {
    let mut registry = WaypointRegistry::new();
    registry.register("ODEMI", coord(37.49751, -8.38401), Some("LP"));
    registry.register("ODEMI", coord(52.1, 5.2), Some("EH"));
    registry.register("TROIA", coord(38.07325, -8.87915), Some("LP"));
    registry
}

#[test]
fn unique_name_resolves_regardless_of_hint() {
    let registry = two_odemis();
    let troia = registry.resolve("TROIA", None).expect("unique name");
    let far_hint = registry
        .resolve("TROIA", Some(coord(-45.0, 170.0)))
        .expect("hint ignored for unique name");
    assert_eq!(troia, far_hint);
    assert_eq!(registry.waypoint(troia).region.as_deref(), Some("LP"));
}

#[test]
fn unknown_name_is_not_found_with_suggestions() {
    let registry = two_odemis();
    let err = registry.resolve("TROJA", None).expect_err("unknown name");
    match err {
        Error::UnknownWaypoint { name, suggestions } => {
            assert_eq!(name, "TROJA");
            assert!(suggestions.contains(&"TROIA".to_string()));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn shared_name_without_hint_is_ambiguous() {
    let registry = two_odemis();
    let err = registry.resolve("ODEMI", None).expect_err("ambiguous");
    match err {
        Error::AmbiguousWaypoint { name, candidates } => {
            assert_eq!(name, "ODEMI");
            assert_eq!(candidates.len(), 2);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn shared_name_with_hint_picks_nearest_candidate() {
    let registry = two_odemis();
    let near_lisbon = coord(38.7, -9.1);
    let near_amsterdam = coord(52.37, 4.9);

    let iberian = registry.resolve("ODEMI", Some(near_lisbon)).unwrap();
    let dutch = registry.resolve("ODEMI", Some(near_amsterdam)).unwrap();

    assert_ne!(iberian, dutch);
    assert_eq!(registry.waypoint(iberian).region.as_deref(), Some("LP"));
    assert_eq!(registry.waypoint(dutch).region.as_deref(), Some("EH"));

    // The winner is strictly the geodesically closest candidate.
    let chosen = registry.waypoint(iberian).coordinate;
    for &candidate in registry.candidates("ODEMI") {
        let other = registry.waypoint(candidate).coordinate;
        assert!(distance(chosen, near_lisbon) <= distance(other, near_lisbon));
    }
}

#[test]
fn equidistant_candidates_resolve_to_first_registered() {
    let mut registry = WaypointRegistry::new();
    let north = registry.register("TWIN", coord(1.0, 0.0), None);
    let south = registry.register("TWIN", coord(-1.0, 0.0), None);

    let resolved = registry.resolve("TWIN", Some(coord(0.0, 0.0))).unwrap();
    assert_eq!(resolved, north);
    assert_ne!(resolved, south);
}

#[test]
fn duplicate_registration_reuses_handle() {
    let mut registry = WaypointRegistry::new();
    let first = registry.register("MANIK", coord(40.69185, -8.61617), Some("LP"));
    let again = registry.register("MANIK", coord(40.691852, -8.616168), None);
    let elsewhere = registry.register("MANIK", coord(40.7, -8.6), None);

    assert_eq!(first, again);
    assert_ne!(first, elsewhere);
    assert_eq!(registry.len(), 2);
    assert_eq!(registry.candidates("MANIK"), &[first, elsewhere]);
    assert_eq!(registry.key(first), registry.key(again));
}

#[test]
fn same_coordinate_different_names_are_distinct() {
    let mut registry = WaypointRegistry::new();
    let a = registry.register("FTM", coord(39.66589, -8.49269), None);
    let b = registry.register("FATIM", coord(39.66589, -8.49269), None);
    assert_ne!(a, b);
    assert_eq!(registry.iter().count(), 2);
}
