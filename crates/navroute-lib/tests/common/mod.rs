#![allow(dead_code)]

use std::path::PathBuf;

use navroute_lib::{
    build_graph, load_navdata, BuildOptions, Coordinate, EdgeRecord, Graph, Network,
    WaypointRecord, WaypointRegistry,
};

pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures/navdata")
}

pub fn fixture_network() -> Network {
    load_navdata(&fixtures_dir(), &BuildOptions::default()).expect("fixture navdata loads")
}

pub fn coord(lat: f64, lon: f64) -> Coordinate {
    Coordinate::new(lat, lon).expect("valid coordinate")
}

/// Synthetic network of `count` waypoints named `W0..Wn`, one degree apart on
/// the equator. `edges` are `(from, to, designator, cost)` over those indices.
pub fn line_network(
    count: usize,
    edges: &[(usize, usize, &str, f64)],
) -> (WaypointRegistry, Graph) {
    let waypoints = (0..count).map(|i| WaypointRecord::new(format!("W{i}"), 0.0, i as f64));
    let edges = edges.iter().map(|&(from, to, designator, cost)| {
        EdgeRecord::airway(designator, format!("W{from}"), format!("W{to}")).with_cost(cost)
    });
    build_graph(waypoints, edges).expect("synthetic network builds")
}
