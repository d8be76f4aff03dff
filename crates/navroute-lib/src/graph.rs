use std::ops::Range;

use once_cell::sync::OnceCell;
use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::registry::WaypointHandle;

/// Designator used for direct (non-airway) legs.
pub const DIRECT_DESIGNATOR: &str = "DCT";

/// Directed edge within the routing graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Edge {
    pub target: WaypointHandle,
    pub designator: String,
    /// Leg length in nautical miles.
    pub cost: f64,
}

impl Edge {
    pub fn is_direct(&self) -> bool {
        self.designator == DIRECT_DESIGNATOR
    }
}

/// Per-node view over the edge list, grouped by origin in insertion order.
#[derive(Debug, Clone)]
struct AdjacencyIndex {
    ranges: Vec<Range<usize>>,
    edges: Vec<Edge>,
}

/// Directed, edge-labelled graph over registry handles.
///
/// Edges are appended during construction. The adjacency index used by
/// [`Graph::neighbours`] is built on the first lookup and dropped again by
/// any later [`Graph::add_edge`].
#[derive(Debug, Clone, Default)]
pub struct Graph {
    edges: Vec<(WaypointHandle, Edge)>,
    node_count: usize,
    index: OnceCell<AdjacencyIndex>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a directed edge. Parallel edges are kept as distinct options.
    pub fn add_edge(
        &mut self,
        from: WaypointHandle,
        to: WaypointHandle,
        designator: impl Into<String>,
        cost: f64,
    ) -> Result<()> {
        if !cost.is_finite() || cost < 0.0 {
            return Err(Error::InvalidCost {
                from: from.to_string(),
                to: to.to_string(),
                cost,
            });
        }

        self.node_count = self.node_count.max(from.index() + 1).max(to.index() + 1);
        self.edges.push((
            from,
            Edge {
                target: to,
                designator: designator.into(),
                cost,
            },
        ));
        self.index.take();
        Ok(())
    }

    /// Insert the edge in both directions with identical cost.
    pub fn add_bidirectional_edge(
        &mut self,
        a: WaypointHandle,
        b: WaypointHandle,
        designator: impl Into<String>,
        cost: f64,
    ) -> Result<()> {
        let designator = designator.into();
        self.add_edge(a, b, designator.clone(), cost)?;
        self.add_edge(b, a, designator, cost)
    }

    /// Outgoing edges of `node` in insertion order.
    pub fn neighbours(&self, node: WaypointHandle) -> &[Edge] {
        let index = self.index.get_or_init(|| self.build_index());
        index
            .ranges
            .get(node.index())
            .map(|range| &index.edges[range.clone()])
            .unwrap_or(&[])
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// One past the highest handle referenced by any edge.
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    fn build_index(&self) -> AdjacencyIndex {
        let mut order: Vec<usize> = (0..self.edges.len()).collect();
        // Stable sort keeps insertion order among edges sharing an origin.
        order.sort_by_key(|&i| self.edges[i].0);

        let mut ranges = vec![0..0; self.node_count];
        let mut edges = Vec::with_capacity(self.edges.len());
        for i in order {
            let (from, edge) = &self.edges[i];
            let range = &mut ranges[from.index()];
            if range.start == range.end {
                *range = edges.len()..edges.len();
            }
            edges.push(edge.clone());
            range.end = edges.len();
        }

        debug!(
            nodes = self.node_count,
            edges = edges.len(),
            "built adjacency index"
        );
        AdjacencyIndex { ranges, edges }
    }
}
