//! Cycle detection by iterative source elimination.
//!
//! Each pass removes every vertex whose in-degree is zero among the vertices
//! still present. The whole layer is collected before any vertex is removed,
//! so in-degrees within a pass are always measured against the same graph.
//! Elimination stalls with vertices left exactly when the graph has a cycle.

use crate::error::ScheduleError;
use crate::graph::{ScheduleGraph, VertexId};

/// Outcome of running source elimination to completion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Elimination {
    /// Vertices removed in each pass, ascending id within a pass.
    pub layers: Vec<Vec<VertexId>>,
    /// Vertices never removed; non-empty iff the graph is cyclic.
    pub remaining: Vec<VertexId>,
}

/// Run layer elimination on a working copy of the in-degrees.
pub(crate) fn eliminate_sources(graph: &ScheduleGraph) -> Elimination {
    let n = graph.vertex_count();
    let mut in_degree: Vec<usize> = (0..n).map(|v| graph.predecessors(v).len()).collect();
    let mut present = vec![true; n];
    let mut present_count = n;
    let mut layers: Vec<Vec<VertexId>> = Vec::new();

    while present_count > 0 {
        let layer: Vec<VertexId> = (0..n)
            .filter(|&v| present[v] && in_degree[v] == 0)
            .collect();
        if layer.is_empty() {
            break;
        }

        // Drop the layer only once it is complete
        for &vertex in &layer {
            present[vertex] = false;
            for &(successor, _) in graph.successors(vertex) {
                in_degree[successor] -= 1;
            }
        }
        present_count -= layer.len();
        layers.push(layer);
    }

    let remaining = (0..n).filter(|&v| present[v]).collect();
    Elimination { layers, remaining }
}

/// True iff some vertex never reaches in-degree zero.
pub fn has_cycle(graph: &ScheduleGraph) -> bool {
    !eliminate_sources(graph).remaining.is_empty()
}

/// First negative edge as (from, to, weight), in edge order.
pub fn find_negative_edge(graph: &ScheduleGraph) -> Option<(VertexId, VertexId, i64)> {
    graph.edges().find(|&(_, _, weight)| weight < 0)
}

/// Verdict on whether a graph can be scheduled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Validation {
    pub is_valid: bool,
    /// `ScheduleError::Cycle` or `ScheduleError::NegativeEdge` when invalid.
    pub reason: Option<ScheduleError>,
}

impl Validation {
    pub fn into_result(self) -> Result<(), ScheduleError> {
        match self.reason {
            Some(reason) => Err(reason),
            None => Ok(()),
        }
    }
}

/// Check both scheduling preconditions: no cycle, then no negative edge.
///
/// A cyclic graph is reported as a cycle even if it also has negative edges.
pub fn validate(graph: &ScheduleGraph) -> Validation {
    let elimination = eliminate_sources(graph);
    let reason = if !elimination.remaining.is_empty() {
        Some(ScheduleError::Cycle {
            remaining: elimination.remaining,
        })
    } else {
        find_negative_edge(graph)
            .map(|(from, to, weight)| ScheduleError::NegativeEdge { from, to, weight })
    };

    Validation {
        is_valid: reason.is_none(),
        reason,
    }
}
