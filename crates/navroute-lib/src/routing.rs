//! Route planning entry point.
//!
//! [`plan_route`] ties the pieces together for callers that start from
//! waypoint names: it resolves both endpoints (using optional location hints
//! for names shared by several waypoints), runs the search and returns a
//! [`RoutePlan`].
//!
//! ```ignore
//! use navroute_lib::{load_navdata, plan_route, BuildOptions, RouteRequest};
//!
//! let network = load_navdata("navdata", &BuildOptions::default())?;
//! let request = RouteRequest::new("MANIK", "ODEMI");
//! let plan = plan_route(&network.registry, &network.graph, &request)?;
//! println!("{} hops", plan.hop_count());
//! ```

use serde::Serialize;
use tracing::info;

use crate::error::Result;
use crate::geo::Coordinate;
use crate::graph::Graph;
use crate::path::{find_route_with, Path, RouteAlgorithm, SearchLimits};
use crate::registry::{WaypointHandle, WaypointRegistry};

/// High-level route planning request.
#[derive(Debug, Clone, Default)]
pub struct RouteRequest {
    pub start: String,
    pub goal: String,
    /// Location used to pick the start when its name is shared.
    pub start_hint: Option<Coordinate>,
    /// Location used to pick the goal when its name is shared.
    pub goal_hint: Option<Coordinate>,
    pub algorithm: RouteAlgorithm,
    pub limits: SearchLimits,
}

impl RouteRequest {
    /// A* request between two names without hints or limits.
    pub fn new(start: impl Into<String>, goal: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            goal: goal.into(),
            ..Self::default()
        }
    }

    pub fn with_hints(mut self, start: Option<Coordinate>, goal: Option<Coordinate>) -> Self {
        self.start_hint = start;
        self.goal_hint = goal;
        self
    }

    pub fn with_algorithm(mut self, algorithm: RouteAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_max_expansions(mut self, limit: usize) -> Self {
        self.limits.max_expansions = Some(limit);
        self
    }
}

/// Planned route returned by the library.
#[derive(Debug, Clone, Serialize)]
pub struct RoutePlan {
    pub algorithm: RouteAlgorithm,
    pub start: WaypointHandle,
    pub goal: WaypointHandle,
    pub path: Path,
}

impl RoutePlan {
    /// Number of hops in the route.
    pub fn hop_count(&self) -> usize {
        self.path.hop_count()
    }

    /// Route length in nautical miles.
    pub fn distance_nm(&self) -> f64 {
        self.path.total_cost()
    }
}

/// Resolve the request's endpoints and search for the cheapest route.
pub fn plan_route(
    registry: &WaypointRegistry,
    graph: &Graph,
    request: &RouteRequest,
) -> Result<RoutePlan> {
    let start = registry.resolve(&request.start, request.start_hint)?;
    let goal = registry.resolve(&request.goal, request.goal_hint)?;

    let path = find_route_with(
        graph,
        registry,
        start,
        goal,
        request.algorithm,
        &request.limits,
    )?;

    info!(
        start = %request.start,
        goal = %request.goal,
        hops = path.hop_count(),
        distance_nm = path.total_cost(),
        "planned route"
    );

    Ok(RoutePlan {
        algorithm: request.algorithm,
        start,
        goal,
        path,
    })
}
