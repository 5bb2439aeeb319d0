//! Core data types exchanged with callers.

use chrono::NaiveDate;
use pyo3::prelude::*;

use crate::graph::VertexId;

/// One line of a constraint table: a task, its duration and its direct predecessors.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaskRecord {
    #[pyo3(get, set)]
    pub task_id: usize,
    #[pyo3(get, set)]
    pub duration: i64,
    #[pyo3(get, set)]
    pub predecessors: Vec<usize>,
}

impl TaskRecord {
    pub fn new(task_id: usize, duration: i64, predecessors: Vec<usize>) -> Self {
        Self {
            task_id,
            duration,
            predecessors,
        }
    }
}

#[pymethods]
impl TaskRecord {
    #[new]
    #[pyo3(signature = (task_id, duration, predecessors=Vec::new()))]
    fn py_new(task_id: usize, duration: i64, predecessors: Vec<usize>) -> Self {
        Self::new(task_id, duration, predecessors)
    }

    fn __repr__(&self) -> String {
        format!(
            "TaskRecord(task_id={}, duration={}, predecessors={:?})",
            self.task_id, self.duration, self.predecessors
        )
    }
}

/// Scheduling attributes of a single vertex, sentinels included.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VertexSchedule {
    #[pyo3(get)]
    pub vertex: VertexId,
    /// Display name: "α", "ω" or the task id.
    #[pyo3(get)]
    pub name: String,
    #[pyo3(get)]
    pub rank: usize,
    #[pyo3(get)]
    pub duration: i64,
    #[pyo3(get)]
    pub predecessors: Vec<VertexId>,
    #[pyo3(get)]
    pub successors: Vec<VertexId>,
    #[pyo3(get)]
    pub earliest_date: i64,
    #[pyo3(get)]
    pub latest_date: i64,
    #[pyo3(get)]
    pub total_float: i64,
    /// None for omega, which has no successor to measure against.
    #[pyo3(get)]
    pub free_float: Option<i64>,
    /// Earliest date anchored to the configured project start, if any.
    #[pyo3(get)]
    pub earliest_start: Option<NaiveDate>,
    #[pyo3(get)]
    pub latest_start: Option<NaiveDate>,
}

#[pymethods]
impl VertexSchedule {
    fn __repr__(&self) -> String {
        format!(
            "VertexSchedule(vertex={}, rank={}, earliest={}, latest={}, total_float={}, free_float={:?})",
            self.name,
            self.rank,
            self.earliest_date,
            self.latest_date,
            self.total_float,
            self.free_float
        )
    }
}

/// Complete result of scheduling one constraint table.
#[pyclass]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScheduleReport {
    /// One row per vertex, in rank order (ascending id within a rank).
    #[pyo3(get)]
    pub vertices: Vec<VertexSchedule>,
    #[pyo3(get)]
    pub ranks: Vec<Vec<VertexId>>,
    #[pyo3(get)]
    pub critical_paths: Vec<Vec<VertexId>>,
    /// Earliest date of omega.
    #[pyo3(get)]
    pub project_duration: i64,
    /// Dense "weight or absent" view of the graph, indexed [from][to].
    #[pyo3(get)]
    pub matrix: Vec<Vec<Option<i64>>>,
}

impl ScheduleReport {
    /// Row for the given vertex id.
    pub fn vertex(&self, vertex: VertexId) -> Option<&VertexSchedule> {
        self.vertices.iter().find(|row| row.vertex == vertex)
    }
}

#[pymethods]
impl ScheduleReport {
    fn __repr__(&self) -> String {
        format!(
            "ScheduleReport(vertices={}, ranks={}, critical_paths={}, project_duration={})",
            self.vertices.len(),
            self.ranks.len(),
            self.critical_paths.len(),
            self.project_duration
        )
    }
}
