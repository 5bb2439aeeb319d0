//! Critical Path Method scheduling engine.
//!
//! Builds a weighted precedence graph from a constraint table, checks that it
//! can be scheduled, ranks its vertices and derives earliest/latest dates,
//! floats and every critical path. The engine is exposed to Rust callers and,
//! through PyO3, as the `rust` Python extension module.

// Allow clippy warning triggered by PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use pyo3::prelude::*;

pub mod calendar;
mod config;
pub mod cycle;
mod error;
pub mod graph;
pub mod logging;
mod models;
pub mod parser;
pub mod rank;
pub mod schedule;

pub use calendar::{compute_calendars, Calendar};
pub use config::ScheduleConfig;
pub use cycle::{find_negative_edge, has_cycle, validate, Validation};
pub use error::{MalformedInputError, ScheduleError};
pub use graph::{ScheduleGraph, VertexId, ALPHA};
pub use models::{ScheduleReport, TaskRecord, VertexSchedule};
pub use parser::{parse_constraint_table, read_constraint_table};
pub use rank::{compute_ranks, RankPartition};
pub use schedule::{schedule_file, schedule_graph, schedule_records};

fn to_py_err(err: impl std::fmt::Display) -> PyErr {
    pyo3::exceptions::PyValueError::new_err(err.to_string())
}

/// Parse constraint-table text into task records.
///
/// # Raises
/// * ValueError if a field is not an integer or a duration is missing
#[pyfunction]
#[pyo3(name = "parse_constraint_table")]
fn py_parse_constraint_table(text: &str) -> PyResult<Vec<TaskRecord>> {
    parse_constraint_table(text).map_err(to_py_err)
}

/// Check whether tasks form a valid scheduling graph.
///
/// # Returns
/// * (True, None) when valid, (False, reason) for a cycle or a negative edge
///
/// # Raises
/// * ValueError if the task list is malformed
#[pyfunction]
fn check_graph(tasks: Vec<TaskRecord>) -> PyResult<(bool, Option<String>)> {
    let graph = ScheduleGraph::build(&tasks).map_err(to_py_err)?;
    let validation = validate(&graph);
    Ok((
        validation.is_valid,
        validation.reason.map(|reason| reason.to_string()),
    ))
}

/// Compute ranks, dates, floats and critical paths for a task list.
///
/// # Arguments
/// * `tasks` - Task records with dense ids 1..N
/// * `config` - Reporting configuration (verbosity, project start date)
///
/// # Raises
/// * ValueError if the input is malformed, cyclic, has a negative duration
///   or has dates beyond the 64-bit range
#[pyfunction]
#[pyo3(signature = (tasks, config=None))]
fn run_schedule(
    tasks: Vec<TaskRecord>,
    config: Option<ScheduleConfig>,
) -> PyResult<ScheduleReport> {
    let config = config.unwrap_or_default();
    schedule_records(&tasks, &config).map_err(to_py_err)
}

/// Same as `run_schedule`, reading the tasks from a constraint-table file.
#[pyfunction]
#[pyo3(signature = (path, config=None))]
fn run_schedule_file(path: &str, config: Option<ScheduleConfig>) -> PyResult<ScheduleReport> {
    let config = config.unwrap_or_default();
    schedule_file(path, &config).map_err(to_py_err)
}

/// The cpm.rust Python module.
#[pymodule]
fn rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Core data types
    m.add_class::<TaskRecord>()?;
    m.add_class::<VertexSchedule>()?;
    m.add_class::<ScheduleReport>()?;

    // Config types
    m.add_class::<ScheduleConfig>()?;

    // Algorithms
    m.add_function(wrap_pyfunction!(py_parse_constraint_table, m)?)?;
    m.add_function(wrap_pyfunction!(check_graph, m)?)?;
    m.add_function(wrap_pyfunction!(run_schedule, m)?)?;
    m.add_function(wrap_pyfunction!(run_schedule_file, m)?)?;

    Ok(())
}
