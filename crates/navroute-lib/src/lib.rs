//! navroute library entry points.
//!
//! This crate builds an airway graph from normalized waypoint and edge
//! records, resolves waypoint names that are shared by several fixes using a
//! nearby reference coordinate, and finds the shortest route between two
//! waypoints with A*. Higher-level consumers (the CLI) should only depend on
//! the functions exported here instead of reimplementing behavior.
//!

#![deny(warnings)]

pub mod error;
pub mod geo;
pub mod graph;
pub mod navdata;
pub mod network;
pub mod output;
pub mod path;
pub mod registry;
pub mod routing;

pub use error::{Error, Result};
pub use geo::{distance, Coordinate, EARTH_RADIUS_NM};
pub use graph::{Edge, Graph, DIRECT_DESIGNATOR};
pub use navdata::{load_navdata, NavdataPaths};
pub use network::{
    build_graph, build_network, BuildOptions, BuildReport, EdgeRecord, Network, WaypointRecord,
};
pub use output::{render_long, render_short, RouteLeg, RouteRenderMode, RouteSummary};
pub use path::{find_route, find_route_with, Path, PathStep, RouteAlgorithm, SearchLimits};
pub use registry::{Waypoint, WaypointHandle, WaypointKey, WaypointRegistry};
pub use routing::{plan_route, RoutePlan, RouteRequest};
