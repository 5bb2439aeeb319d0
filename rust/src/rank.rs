//! Topological rank assignment.
//!
//! Ranks are the layers produced by source elimination: rank `k` holds the
//! vertices removed in pass `k`. Rank 0 is always exactly alpha.

use crate::cycle::eliminate_sources;
use crate::error::ScheduleError;
use crate::graph::{ScheduleGraph, VertexId};

/// Ordered rank classes, ascending vertex id within each class.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RankPartition {
    classes: Vec<Vec<VertexId>>,
    /// Rank of each vertex, indexed by vertex id.
    rank_of: Vec<usize>,
}

impl RankPartition {
    fn from_classes(classes: Vec<Vec<VertexId>>, vertex_count: usize) -> Self {
        let mut rank_of = vec![0; vertex_count];
        for (rank, class) in classes.iter().enumerate() {
            for &vertex in class {
                rank_of[vertex] = rank;
            }
        }
        Self { classes, rank_of }
    }

    pub fn classes(&self) -> &[Vec<VertexId>] {
        &self.classes
    }

    pub fn into_classes(self) -> Vec<Vec<VertexId>> {
        self.classes
    }

    /// Number of rank classes.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    #[inline]
    pub fn rank(&self, vertex: VertexId) -> Option<usize> {
        self.rank_of.get(vertex).copied()
    }

    /// Vertices in rank order, a valid topological order of the graph.
    pub fn order(&self) -> impl DoubleEndedIterator<Item = VertexId> + '_ {
        self.classes.iter().flatten().copied()
    }
}

/// Partition the vertices of an acyclic graph into rank classes.
///
/// Fails with `ScheduleError::Cycle` when elimination stalls.
pub fn compute_ranks(graph: &ScheduleGraph) -> Result<RankPartition, ScheduleError> {
    let elimination = eliminate_sources(graph);
    if !elimination.remaining.is_empty() {
        return Err(ScheduleError::Cycle {
            remaining: elimination.remaining,
        });
    }
    Ok(RankPartition::from_classes(
        elimination.layers,
        graph.vertex_count(),
    ))
}
