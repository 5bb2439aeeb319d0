//! Error types for constraint-table loading and schedule computation.

use thiserror::Error;

use crate::graph::VertexId;

/// A constraint table that cannot be turned into a graph.
///
/// Raised while parsing or building; no partial graph is ever returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedInputError {
    #[error("Failed to read constraint table {path}: {message}")]
    Io { path: String, message: String },
    #[error("Line {line}: invalid {field} {value:?}")]
    InvalidInteger {
        line: usize,
        field: &'static str,
        value: String,
    },
    #[error("Line {line}: missing duration")]
    MissingDuration { line: usize },
    #[error("Constraint table contains no tasks")]
    Empty,
    #[error("Task {task_id} is declared more than once")]
    DuplicateTask { task_id: usize },
    #[error("Task id {task_id} is outside 1..={task_count}")]
    TaskIdOutOfRange { task_id: usize, task_count: usize },
    #[error("Task {task_id} references unknown predecessor {predecessor}")]
    UnknownPredecessor { task_id: usize, predecessor: usize },
}

/// Errors raised while checking or scheduling a graph.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// Elimination stalled; `remaining` holds the vertices that never became sources.
    #[error("Graph contains a cycle among vertices {remaining:?}")]
    Cycle { remaining: Vec<VertexId> },
    #[error("Negative edge {from} -> {to} with weight {weight}")]
    NegativeEdge {
        from: VertexId,
        to: VertexId,
        weight: i64,
    },
    /// A date computed for `vertex` does not fit in an `i64`.
    #[error("Date of vertex {vertex} exceeds the representable range")]
    DateOverflow { vertex: VertexId },
    #[error(transparent)]
    Malformed(#[from] MalformedInputError),
}

impl ScheduleError {
    /// True for the two verdicts that mean "not a valid scheduling graph".
    pub fn is_unschedulable(&self) -> bool {
        matches!(self, Self::Cycle { .. } | Self::NegativeEdge { .. })
    }
}
