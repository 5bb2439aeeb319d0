//! Weighted precedence graph built from a constraint table.
//!
//! Vertex 0 is the synthetic start sentinel (alpha), vertex `N + 1` the
//! synthetic end sentinel (omega), and `1..=N` are the real tasks. An edge
//! `i -> j` means task `i` must finish before task `j` starts and carries the
//! duration of `i` as its weight.

use std::path::Path;

use rustc_hash::FxHashSet;

use crate::error::MalformedInputError;
use crate::models::TaskRecord;
use crate::parser::{parse_constraint_table, read_constraint_table};

/// Vertex identifier in `0..=N+1`.
pub type VertexId = usize;

/// The alpha sentinel is always vertex 0.
pub const ALPHA: VertexId = 0;

/// Immutable precedence graph stored as adjacency lists in both directions.
///
/// Lists are sorted by neighbour id, so iteration order is deterministic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScheduleGraph {
    /// Durations indexed by vertex; sentinels have duration 0.
    durations: Vec<i64>,
    /// Outgoing edges as (successor, weight) pairs, indexed by vertex.
    successors: Vec<Vec<(VertexId, i64)>>,
    /// Incoming edges as (predecessor, weight) pairs, indexed by vertex.
    predecessors: Vec<Vec<(VertexId, i64)>>,
}

impl ScheduleGraph {
    /// Build the graph from parsed task records.
    ///
    /// Task ids must be a dense permutation of `1..=N` and every predecessor
    /// must name one of them. Tasks without predecessors hang off alpha with
    /// weight 0; tasks nobody depends on feed omega with their own duration.
    pub fn build(records: &[TaskRecord]) -> Result<Self, MalformedInputError> {
        let task_count = records.len();
        if task_count == 0 {
            return Err(MalformedInputError::Empty);
        }

        let vertex_count = task_count + 2;
        let mut durations = vec![0; vertex_count];
        let mut seen: FxHashSet<usize> =
            FxHashSet::with_capacity_and_hasher(task_count, Default::default());

        // N unique ids inside 1..=N are necessarily dense
        for record in records {
            if record.task_id == ALPHA || record.task_id > task_count {
                return Err(MalformedInputError::TaskIdOutOfRange {
                    task_id: record.task_id,
                    task_count,
                });
            }
            if !seen.insert(record.task_id) {
                return Err(MalformedInputError::DuplicateTask {
                    task_id: record.task_id,
                });
            }
            durations[record.task_id] = record.duration;
        }

        for record in records {
            if let Some(&predecessor) = record
                .predecessors
                .iter()
                .find(|&&p| p == ALPHA || p > task_count)
            {
                return Err(MalformedInputError::UnknownPredecessor {
                    task_id: record.task_id,
                    predecessor,
                });
            }
        }

        let mut graph = Self {
            durations,
            successors: vec![Vec::new(); vertex_count],
            predecessors: vec![Vec::new(); vertex_count],
        };

        for record in records {
            if record.predecessors.is_empty() {
                graph.add_edge(ALPHA, record.task_id, 0);
            }
            for &predecessor in &record.predecessors {
                let weight = graph.durations[predecessor];
                graph.add_edge(predecessor, record.task_id, weight);
            }
        }

        // Dead ends are detected on out-edges, never in-edges
        let omega = graph.omega();
        for task in 1..omega {
            if graph.successors[task].is_empty() {
                let weight = graph.durations[task];
                graph.add_edge(task, omega, weight);
            }
        }

        for list in graph
            .successors
            .iter_mut()
            .chain(graph.predecessors.iter_mut())
        {
            list.sort_unstable_by_key(|&(vertex, _)| vertex);
        }

        Ok(graph)
    }

    /// Parse a constraint table held in memory and build its graph.
    pub fn parse(text: &str) -> Result<Self, MalformedInputError> {
        Self::build(&parse_constraint_table(text)?)
    }

    /// Read a constraint table file and build its graph.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, MalformedInputError> {
        Self::build(&read_constraint_table(path)?)
    }

    /// Insert an edge unless one already links the same pair.
    fn add_edge(&mut self, from: VertexId, to: VertexId, weight: i64) {
        if self.successors[from].iter().any(|&(s, _)| s == to) {
            return;
        }
        self.successors[from].push((to, weight));
        self.predecessors[to].push((from, weight));
    }

    pub fn alpha(&self) -> VertexId {
        ALPHA
    }

    pub fn omega(&self) -> VertexId {
        self.durations.len() - 1
    }

    /// Number of vertices, sentinels included (`N + 2`).
    pub fn vertex_count(&self) -> usize {
        self.durations.len()
    }

    /// Number of real tasks (`N`).
    pub fn task_count(&self) -> usize {
        self.durations.len() - 2
    }

    #[inline]
    pub fn duration(&self, vertex: VertexId) -> i64 {
        self.durations[vertex]
    }

    /// Outgoing edges of `vertex` as (successor, weight), ascending by successor.
    #[inline]
    pub fn successors(&self, vertex: VertexId) -> &[(VertexId, i64)] {
        &self.successors[vertex]
    }

    /// Incoming edges of `vertex` as (predecessor, weight), ascending by predecessor.
    #[inline]
    pub fn predecessors(&self, vertex: VertexId) -> &[(VertexId, i64)] {
        &self.predecessors[vertex]
    }

    /// Weight of edge `from -> to`, or None when absent. A zero weight is a real edge.
    pub fn weight(&self, from: VertexId, to: VertexId) -> Option<i64> {
        self.successors
            .get(from)?
            .iter()
            .find(|&&(s, _)| s == to)
            .map(|&(_, weight)| weight)
    }

    /// All edges as (from, to, weight), ordered by `from` then `to`.
    pub fn edges(&self) -> impl Iterator<Item = (VertexId, VertexId, i64)> + '_ {
        self.successors
            .iter()
            .enumerate()
            .flat_map(|(from, list)| list.iter().map(move |&(to, weight)| (from, to, weight)))
    }

    /// Dense `(N+2) x (N+2)` view, `None` marking an absent edge.
    pub fn adjacency_matrix(&self) -> Vec<Vec<Option<i64>>> {
        let n = self.vertex_count();
        let mut matrix = vec![vec![None; n]; n];
        for (from, to, weight) in self.edges() {
            matrix[from][to] = Some(weight);
        }
        matrix
    }

    /// "α" for alpha, "ω" for omega, the task id otherwise.
    pub fn vertex_name(&self, vertex: VertexId) -> String {
        if vertex == ALPHA {
            "α".to_string()
        } else if vertex == self.omega() {
            "ω".to_string()
        } else {
            vertex.to_string()
        }
    }
}
