use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::graph::{Edge, Graph};
use crate::registry::{Waypoint, WaypointHandle, WaypointRegistry};

/// Supported search algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RouteAlgorithm {
    /// Best-first search guided by great-circle distance to the goal.
    #[default]
    #[serde(rename = "a-star")]
    AStar,
    /// Uniform-cost search (no heuristic).
    Dijkstra,
}

impl RouteAlgorithm {
    fn heuristic(self, from: &Waypoint, goal: &Waypoint) -> f64 {
        match self {
            RouteAlgorithm::AStar => from.coordinate.distance_to(&goal.coordinate),
            RouteAlgorithm::Dijkstra => 0.0,
        }
    }
}

impl fmt::Display for RouteAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            RouteAlgorithm::AStar => "a-star",
            RouteAlgorithm::Dijkstra => "dijkstra",
        };
        f.write_str(value)
    }
}

/// Bounds applied to a single search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchLimits {
    /// Maximum number of waypoints finalized before giving up.
    pub max_expansions: Option<usize>,
}

/// One waypoint along a found path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathStep {
    pub waypoint: WaypointHandle,
    pub name: String,
    /// Designator of the edge used to reach this waypoint; `None` for the start.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub designator: Option<String>,
    pub leg_cost: f64,
    pub cumulative_cost: f64,
}

/// Ordered result of a route search, start first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Path {
    steps: Vec<PathStep>,
}

impl Path {
    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    pub fn start(&self) -> &PathStep {
        &self.steps[0]
    }

    pub fn goal(&self) -> &PathStep {
        &self.steps[self.steps.len() - 1]
    }

    /// Number of edges traversed.
    pub fn hop_count(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    /// Accumulated cost in nautical miles.
    pub fn total_cost(&self) -> f64 {
        self.goal().cumulative_cost
    }

    /// Steps after the start, each paired with its designator.
    pub fn hops(&self) -> impl Iterator<Item = (&str, &PathStep)> {
        self.steps
            .iter()
            .skip(1)
            .map(|step| (step.designator.as_deref().unwrap_or_default(), step))
    }
}

/// Transient search state; `parent` indexes into the per-query arena.
#[derive(Debug)]
struct SearchNode<'g> {
    waypoint: WaypointHandle,
    name: &'g str,
    g: f64,
    via: Option<&'g Edge>,
    parent: Option<usize>,
}

/// Find the cheapest route from `start` to `goal` with A*.
pub fn find_route(
    graph: &Graph,
    registry: &WaypointRegistry,
    start: WaypointHandle,
    goal: WaypointHandle,
) -> Result<Path> {
    find_route_with(
        graph,
        registry,
        start,
        goal,
        RouteAlgorithm::AStar,
        &SearchLimits::default(),
    )
}

/// Find the cheapest route with an explicit algorithm and limits.
///
/// Frontier entries are ordered by `f = g + h`, ties going to the entry
/// inserted first. Stale entries for already finalized waypoints are
/// discarded when popped rather than updated in place.
pub fn find_route_with(
    graph: &Graph,
    registry: &WaypointRegistry,
    start: WaypointHandle,
    goal: WaypointHandle,
    algorithm: RouteAlgorithm,
    limits: &SearchLimits,
) -> Result<Path> {
    let endpoint = |handle: WaypointHandle| {
        registry.get(handle).ok_or_else(|| Error::UnknownWaypoint {
            name: handle.to_string(),
            suggestions: Vec::new(),
        })
    };
    let start_waypoint = endpoint(start)?;
    let goal_waypoint = endpoint(goal)?;

    let mut arena: Vec<SearchNode<'_>> = Vec::new();
    let mut open = BinaryHeap::new();
    let mut closed = vec![false; registry.len()];
    let mut expanded = 0usize;

    arena.push(SearchNode {
        waypoint: start,
        name: &start_waypoint.name,
        g: 0.0,
        via: None,
        parent: None,
    });
    open.push(OpenEntry::new(0, 0.0, algorithm.heuristic(start_waypoint, goal_waypoint)));

    while let Some(entry) = open.pop() {
        let current = entry.node;
        let waypoint = arena[current].waypoint;
        if closed[waypoint.index()] {
            continue;
        }

        if waypoint == goal {
            debug!(
                %algorithm,
                expanded,
                created = arena.len(),
                cost = arena[current].g,
                "route found"
            );
            return Ok(reconstruct_path(&arena, current));
        }

        if let Some(limit) = limits.max_expansions {
            if expanded >= limit {
                return Err(Error::SearchLimitExceeded {
                    start: start_waypoint.name.clone(),
                    goal: goal_waypoint.name.clone(),
                    limit,
                });
            }
        }

        closed[waypoint.index()] = true;
        expanded += 1;

        let g = arena[current].g;
        for edge in graph.neighbours(waypoint) {
            // Edges pointing outside this registry are not traversable.
            let Some(target) = registry.get(edge.target) else {
                continue;
            };
            if closed[edge.target.index()] {
                continue;
            }

            let next_g = g + edge.cost;
            let h = algorithm.heuristic(target, goal_waypoint);
            let index = arena.len();
            arena.push(SearchNode {
                waypoint: edge.target,
                name: &target.name,
                g: next_g,
                via: Some(edge),
                parent: Some(current),
            });
            open.push(OpenEntry::new(index, next_g, h));
        }
    }

    debug!(%algorithm, expanded, created = arena.len(), "frontier exhausted");
    Err(Error::RouteNotFound {
        start: start_waypoint.name.clone(),
        goal: goal_waypoint.name.clone(),
    })
}

fn reconstruct_path(arena: &[SearchNode<'_>], terminal: usize) -> Path {
    let mut chain = Vec::new();
    let mut current = Some(terminal);
    while let Some(index) = current {
        chain.push(index);
        current = arena[index].parent;
    }
    chain.reverse();

    let steps = chain
        .into_iter()
        .map(|index| {
            let node = &arena[index];
            PathStep {
                waypoint: node.waypoint,
                name: node.name.to_string(),
                designator: node.via.map(|edge| edge.designator.clone()),
                leg_cost: node.via.map_or(0.0, |edge| edge.cost),
                cumulative_cost: node.g,
            }
        })
        .collect();

    Path { steps }
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Frontier entry; `node` is the arena index and doubles as insertion order.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct OpenEntry {
    node: usize,
    estimate: FloatOrd,
}

impl OpenEntry {
    fn new(node: usize, cost: f64, heuristic: f64) -> Self {
        Self {
            node,
            estimate: FloatOrd(cost + heuristic),
        }
    }
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by estimate, then by age.
        other
            .estimate
            .cmp(&self.estimate)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
