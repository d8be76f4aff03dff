//! Graph construction from normalized navigation records.
//!
//! Ingestion layers (see [`crate::navdata`]) turn source files into
//! [`WaypointRecord`]s and [`EdgeRecord`]s; this module registers the
//! waypoints, resolves each edge endpoint against the registry and fills the
//! [`Graph`].

use tracing::{info, trace, warn};

use crate::error::{Error, Result};
use crate::geo::Coordinate;
use crate::graph::{Graph, DIRECT_DESIGNATOR};
use crate::registry::{WaypointHandle, WaypointRegistry, DEFAULT_KEY_PRECISION};

/// Normalized waypoint as supplied by an ingestion layer.
#[derive(Debug, Clone, PartialEq)]
pub struct WaypointRecord {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub region: Option<String>,
}

impl WaypointRecord {
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
            region: None,
        }
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }
}

/// Normalized edge as supplied by an ingestion layer.
///
/// Hints are the coordinates the source file printed next to each endpoint
/// name; they disambiguate names shared by several waypoints.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeRecord {
    pub from_name: String,
    pub from_hint: Option<Coordinate>,
    pub to_name: String,
    pub to_hint: Option<Coordinate>,
    pub designator: String,
    /// Published distance in nautical miles; computed from the endpoints when absent.
    pub cost: Option<f64>,
    /// Insert the edge in both directions.
    pub bidirectional: bool,
}

impl EdgeRecord {
    /// One-way airway segment.
    pub fn airway(
        designator: impl Into<String>,
        from_name: impl Into<String>,
        to_name: impl Into<String>,
    ) -> Self {
        Self {
            from_name: from_name.into(),
            from_hint: None,
            to_name: to_name.into(),
            to_hint: None,
            designator: designator.into(),
            cost: None,
            bidirectional: false,
        }
    }

    /// Direct leg, usable in both directions.
    pub fn direct(from_name: impl Into<String>, to_name: impl Into<String>) -> Self {
        Self {
            bidirectional: true,
            ..Self::airway(DIRECT_DESIGNATOR, from_name, to_name)
        }
    }

    pub fn with_hints(mut self, from: Option<Coordinate>, to: Option<Coordinate>) -> Self {
        self.from_hint = from;
        self.to_hint = to;
        self
    }

    pub fn with_cost(mut self, cost: f64) -> Self {
        self.cost = Some(cost);
        self
    }
}

/// Options controlling graph construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildOptions {
    /// Decimal places used by the waypoint deduplication key.
    pub key_precision: u32,
    /// Fail on unresolved waypoints and invalid coordinates instead of skipping them.
    pub strict: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            key_precision: DEFAULT_KEY_PRECISION,
            strict: true,
        }
    }
}

impl BuildOptions {
    pub fn lenient() -> Self {
        Self {
            strict: false,
            ..Self::default()
        }
    }
}

/// Counters collected while building a network.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub waypoints: usize,
    pub edges: usize,
    pub skipped_waypoints: usize,
    pub skipped_edges: usize,
}

/// Registry and graph produced from one set of records.
#[derive(Debug, Clone, Default)]
pub struct Network {
    pub registry: WaypointRegistry,
    pub graph: Graph,
    pub report: BuildReport,
}

/// Build the registry and graph with default (strict) options.
pub fn build_graph<W, E>(waypoints: W, edges: E) -> Result<(WaypointRegistry, Graph)>
where
    W: IntoIterator<Item = WaypointRecord>,
    E: IntoIterator<Item = EdgeRecord>,
{
    let network = build_network(waypoints, edges, &BuildOptions::default())?;
    Ok((network.registry, network.graph))
}

/// Build the registry and graph, reporting what was loaded or skipped.
pub fn build_network<W, E>(waypoints: W, edges: E, options: &BuildOptions) -> Result<Network>
where
    W: IntoIterator<Item = WaypointRecord>,
    E: IntoIterator<Item = EdgeRecord>,
{
    let mut registry = WaypointRegistry::with_precision(options.key_precision);
    let mut graph = Graph::new();
    let mut report = BuildReport::default();

    for record in waypoints {
        match Coordinate::new(record.latitude, record.longitude) {
            Ok(coordinate) => {
                registry.register(&record.name, coordinate, record.region.as_deref());
            }
            Err(err) if !options.strict => {
                warn!(name = %record.name, error = %err, "skipping waypoint");
                report.skipped_waypoints += 1;
            }
            Err(err) => return Err(err),
        }
    }

    for record in edges {
        let endpoints = match resolve_endpoints(&registry, &record) {
            Ok(endpoints) => endpoints,
            Err(err) if !options.strict && err.is_lookup() => {
                warn!(
                    designator = %record.designator,
                    from = %record.from_name,
                    to = %record.to_name,
                    error = %err,
                    "skipping edge with unresolved endpoint"
                );
                report.skipped_edges += 1;
                continue;
            }
            Err(err) => return Err(err),
        };

        let ((from, from_coordinate), (to, to_coordinate)) = endpoints;
        let cost = record
            .cost
            .unwrap_or_else(|| from_coordinate.distance_to(&to_coordinate));
        if !cost.is_finite() || cost < 0.0 {
            return Err(Error::InvalidCost {
                from: record.from_name,
                to: record.to_name,
                cost,
            });
        }

        if record.bidirectional {
            graph.add_bidirectional_edge(from, to, record.designator, cost)?;
            report.edges += 2;
        } else {
            graph.add_edge(from, to, record.designator, cost)?;
            report.edges += 1;
        }
    }

    report.waypoints = registry.len();
    info!(
        waypoints = report.waypoints,
        edges = report.edges,
        skipped_waypoints = report.skipped_waypoints,
        skipped_edges = report.skipped_edges,
        "built route network"
    );

    Ok(Network {
        registry,
        graph,
        report,
    })
}

/// Resolve both ends of an edge.
///
/// Each endpoint prefers its own hint and falls back to the location of the
/// opposite end, so disambiguation always happens close to the segment.
fn resolve_endpoints(
    registry: &WaypointRegistry,
    record: &EdgeRecord,
) -> Result<(Endpoint, Endpoint)> {
    let from_hint = record.from_hint.or(record.to_hint);
    let from = resolve_endpoint(registry, &record.from_name, from_hint)?;
    let to = resolve_endpoint(registry, &record.to_name, record.to_hint.or(Some(from.1)))?;
    trace!(
        designator = %record.designator,
        from = %from.0,
        to = %to.0,
        "resolved edge endpoints"
    );
    Ok((from, to))
}

/// Resolved handle together with the waypoint's own coordinate.
type Endpoint = (WaypointHandle, Coordinate);

fn resolve_endpoint(
    registry: &WaypointRegistry,
    name: &str,
    hint: Option<Coordinate>,
) -> Result<Endpoint> {
    let handle = registry.resolve(name, hint)?;
    registry
        .get(handle)
        .map(|waypoint| (handle, waypoint.coordinate))
        .ok_or_else(|| Error::UnknownWaypoint {
            name: name.to_string(),
            suggestions: Vec::new(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_records_default_to_one_way_airways() {
        let airway = EdgeRecord::airway("UN872", "MANIK", "TROIA");
        assert!(!airway.bidirectional);
        assert_eq!(airway.designator, "UN872");

        let direct = EdgeRecord::direct("MANIK", "TROIA").with_cost(12.5);
        assert!(direct.bidirectional);
        assert_eq!(direct.designator, DIRECT_DESIGNATOR);
        assert_eq!(direct.cost, Some(12.5));
    }

    #[test]
    fn lenient_options_keep_default_precision() {
        let options = BuildOptions::lenient();
        assert!(!options.strict);
        assert_eq!(options.key_precision, DEFAULT_KEY_PRECISION);
    }
}
