//! End-to-end scheduling pipeline.
//!
//! Runs build, validation, ranking and calendar computation in that order and
//! flattens the results into plain data for the presentation layer.

use std::path::Path;

use chrono::{Days, NaiveDate};

use crate::calendar::{compute_calendars, Calendar};
use crate::config::ScheduleConfig;
use crate::cycle::validate;
use crate::error::ScheduleError;
use crate::graph::{ScheduleGraph, VertexId};
use crate::models::{ScheduleReport, TaskRecord, VertexSchedule};
use crate::parser::read_constraint_table;
use crate::{log_debug, log_passes, log_summary};

/// Calendar date `offset` days after `start`. Negative or overflowing offsets yield None.
fn anchor(start: NaiveDate, offset: i64) -> Option<NaiveDate> {
    let days = u64::try_from(offset).ok()?;
    start.checked_add_days(Days::new(days))
}

fn neighbour_ids(edges: &[(VertexId, i64)]) -> Vec<VertexId> {
    edges.iter().map(|&(vertex, _)| vertex).collect()
}

/// Flatten graph and calendar into one row per vertex, in rank order.
fn build_report(
    graph: &ScheduleGraph,
    calendar: &Calendar,
    config: &ScheduleConfig,
) -> ScheduleReport {
    let ranks = calendar.ranks();
    let vertices = ranks
        .order()
        .map(|vertex| {
            let earliest_date = calendar.earliest(vertex);
            let latest_date = calendar.latest(vertex);
            VertexSchedule {
                vertex,
                name: graph.vertex_name(vertex),
                rank: ranks.rank(vertex).unwrap_or_default(),
                duration: graph.duration(vertex),
                predecessors: neighbour_ids(graph.predecessors(vertex)),
                successors: neighbour_ids(graph.successors(vertex)),
                earliest_date,
                latest_date,
                total_float: calendar.total_float(vertex),
                free_float: calendar.free_float(vertex),
                earliest_start: config
                    .project_start
                    .and_then(|start| anchor(start, earliest_date)),
                latest_start: config
                    .project_start
                    .and_then(|start| anchor(start, latest_date)),
            }
        })
        .collect();

    ScheduleReport {
        vertices,
        ranks: ranks.classes().to_vec(),
        critical_paths: calendar.critical_paths().to_vec(),
        project_duration: calendar.project_duration(),
        matrix: graph.adjacency_matrix(),
    }
}

/// Schedule an already-built graph.
pub fn schedule_graph(
    graph: &ScheduleGraph,
    config: &ScheduleConfig,
) -> Result<ScheduleReport, ScheduleError> {
    let verbosity = config.verbosity;

    if let Err(reason) = validate(graph).into_result() {
        log_summary!(verbosity, "[SCHEDULE] Not a valid scheduling graph: {}", reason);
        return Err(reason);
    }
    log_summary!(
        verbosity,
        "[SCHEDULE] Graph is valid: {} tasks, {} edges",
        graph.task_count(),
        graph.edges().count()
    );

    let calendar = compute_calendars(graph).inspect_err(|err| {
        log_summary!(verbosity, "[SCHEDULE] Calendar failed: {}", err);
    })?;

    for (rank, class) in calendar.ranks().classes().iter().enumerate() {
        let names: Vec<String> = class.iter().map(|&v| graph.vertex_name(v)).collect();
        log_passes!(verbosity, "[RANK] {}: {}", rank, names.join(", "));
    }
    for vertex in calendar.ranks().order() {
        log_debug!(
            verbosity,
            "[CALENDAR] {}: earliest={} latest={} total_float={} free_float={:?}",
            graph.vertex_name(vertex),
            calendar.earliest(vertex),
            calendar.latest(vertex),
            calendar.total_float(vertex),
            calendar.free_float(vertex)
        );
    }

    log_summary!(
        verbosity,
        "[SCHEDULE] Project duration {} with {} critical path(s)",
        calendar.project_duration(),
        calendar.critical_paths().len()
    );
    for path in calendar.critical_paths() {
        let names: Vec<String> = path.iter().map(|&v| graph.vertex_name(v)).collect();
        log_summary!(verbosity, "[SCHEDULE]   {}", names.join(" -> "));
    }

    Ok(build_report(graph, &calendar, config))
}

/// Build and schedule a graph from parsed records.
pub fn schedule_records(
    records: &[TaskRecord],
    config: &ScheduleConfig,
) -> Result<ScheduleReport, ScheduleError> {
    let graph = ScheduleGraph::build(records)?;
    schedule_graph(&graph, config)
}

/// Read a constraint table file and schedule it.
pub fn schedule_file(
    path: impl AsRef<Path>,
    config: &ScheduleConfig,
) -> Result<ScheduleReport, ScheduleError> {
    let path = path.as_ref();
    log_summary!(
        config.verbosity,
        "[SCHEDULE] Importing constraints from {}",
        path.display()
    );
    let records = read_constraint_table(path)?;
    schedule_records(&records, config)
}
