//! Earliest/latest dates, floats and critical paths.
//!
//! The forward pass walks the rank classes in order, the backward pass walks
//! them in reverse starting from omega. Every call rederives everything from
//! the immutable graph.

use crate::cycle::find_negative_edge;
use crate::error::ScheduleError;
use crate::graph::{ScheduleGraph, VertexId};
use crate::rank::{compute_ranks, RankPartition};

/// Dates and floats of every vertex, indexed by vertex id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Calendar {
    ranks: RankPartition,
    earliest: Vec<i64>,
    latest: Vec<i64>,
    total_float: Vec<i64>,
    /// None for omega.
    free_float: Vec<Option<i64>>,
    critical_paths: Vec<Vec<VertexId>>,
}

impl Calendar {
    /// The rank partition the passes were run over.
    pub fn ranks(&self) -> &RankPartition {
        &self.ranks
    }

    #[inline]
    pub fn earliest(&self, vertex: VertexId) -> i64 {
        self.earliest[vertex]
    }

    #[inline]
    pub fn latest(&self, vertex: VertexId) -> i64 {
        self.latest[vertex]
    }

    #[inline]
    pub fn total_float(&self, vertex: VertexId) -> i64 {
        self.total_float[vertex]
    }

    #[inline]
    pub fn free_float(&self, vertex: VertexId) -> Option<i64> {
        self.free_float[vertex]
    }

    pub fn earliest_dates(&self) -> &[i64] {
        &self.earliest
    }

    pub fn latest_dates(&self) -> &[i64] {
        &self.latest
    }

    pub fn total_floats(&self) -> &[i64] {
        &self.total_float
    }

    pub fn free_floats(&self) -> &[Option<i64>] {
        &self.free_float
    }

    /// Every alpha-to-omega critical path, in ascending successor order.
    pub fn critical_paths(&self) -> &[Vec<VertexId>] {
        &self.critical_paths
    }

    /// Earliest date of omega.
    pub fn project_duration(&self) -> i64 {
        self.earliest.last().copied().unwrap_or(0)
    }

    /// Union of the critical paths, ascending.
    pub fn critical_vertices(&self) -> Vec<VertexId> {
        let mut vertices: Vec<VertexId> = self.critical_paths.iter().flatten().copied().collect();
        vertices.sort_unstable();
        vertices.dedup();
        vertices
    }

    pub fn is_critical(&self, vertex: VertexId) -> bool {
        self.critical_paths.iter().any(|path| path.contains(&vertex))
    }
}

/// Compute the full calendar of a graph.
///
/// Fails with `ScheduleError::Cycle` on a cyclic graph, with
/// `ScheduleError::NegativeEdge` when any edge weight is negative and with
/// `ScheduleError::DateOverflow` when a date leaves the `i64` range.
pub fn compute_calendars(graph: &ScheduleGraph) -> Result<Calendar, ScheduleError> {
    let ranks = compute_ranks(graph)?;
    if let Some((from, to, weight)) = find_negative_edge(graph) {
        return Err(ScheduleError::NegativeEdge { from, to, weight });
    }

    let n = graph.vertex_count();
    let omega = graph.omega();

    // Forward pass: alpha has no predecessor and starts at 0
    let mut earliest = vec![0i64; n];
    for vertex in ranks.order() {
        let mut date = 0i64;
        for &(p, weight) in graph.predecessors(vertex) {
            let finish = earliest[p]
                .checked_add(weight)
                .ok_or(ScheduleError::DateOverflow { vertex })?;
            date = date.max(finish);
        }
        earliest[vertex] = date;
    }

    // Backward pass: omega is pinned to its earliest date
    let project_end = earliest[omega];
    let mut latest = vec![project_end; n];
    for vertex in ranks.order().rev() {
        if vertex == omega {
            continue;
        }
        let mut date = project_end;
        for &(s, weight) in graph.successors(vertex) {
            let start = latest[s]
                .checked_sub(weight)
                .ok_or(ScheduleError::DateOverflow { vertex })?;
            date = date.min(start);
        }
        latest[vertex] = date;
    }

    let total_float = (0..n)
        .map(|v| {
            latest[v]
                .checked_sub(earliest[v])
                .ok_or(ScheduleError::DateOverflow { vertex: v })
        })
        .collect::<Result<Vec<i64>, _>>()?;

    let mut free_float: Vec<Option<i64>> = vec![None; n];
    for (v, slot) in free_float.iter_mut().enumerate() {
        for &(s, weight) in graph.successors(v) {
            let slack = earliest[s]
                .checked_sub(earliest[v])
                .and_then(|gap| gap.checked_sub(weight))
                .ok_or(ScheduleError::DateOverflow { vertex: v })?;
            *slot = Some(slot.map_or(slack, |current| current.min(slack)));
        }
    }

    let critical_paths = enumerate_critical_paths(graph, &ranks, &earliest);

    Ok(Calendar {
        ranks,
        earliest,
        latest,
        total_float,
        free_float,
        critical_paths,
    })
}

/// An edge is tight when the successor's earliest date is set by it.
#[inline]
fn is_tight(earliest: &[i64], from: VertexId, to: VertexId, weight: i64) -> bool {
    earliest[from].checked_add(weight) == Some(earliest[to])
}

/// Enumerate every alpha-to-omega path made only of tight edges.
///
/// Each vertex on such a path has zero free float and zero total float.
/// Tied paths multiply, so the output can grow exponentially with the graph.
fn enumerate_critical_paths(
    graph: &ScheduleGraph,
    ranks: &RankPartition,
    earliest: &[i64],
) -> Vec<Vec<VertexId>> {
    let omega = graph.omega();

    // Vertices that reach omega through tight edges alone; pruning on this
    // keeps the walk from entering zero-free-float chains that dead-end.
    let mut reaches_omega = vec![false; graph.vertex_count()];
    reaches_omega[omega] = true;
    for vertex in ranks.order().rev() {
        if vertex == omega {
            continue;
        }
        reaches_omega[vertex] = graph
            .successors(vertex)
            .iter()
            .any(|&(s, weight)| reaches_omega[s] && is_tight(earliest, vertex, s, weight));
    }

    let mut paths = Vec::new();
    if reaches_omega[graph.alpha()] {
        let mut path = vec![graph.alpha()];
        extend_paths(graph, earliest, &reaches_omega, &mut path, &mut paths);
    }
    paths
}

fn extend_paths(
    graph: &ScheduleGraph,
    earliest: &[i64],
    reaches_omega: &[bool],
    path: &mut Vec<VertexId>,
    paths: &mut Vec<Vec<VertexId>>,
) {
    let Some(&vertex) = path.last() else {
        return;
    };
    if vertex == graph.omega() {
        paths.push(path.clone());
        return;
    }
    for &(successor, weight) in graph.successors(vertex) {
        if reaches_omega[successor] && is_tight(earliest, vertex, successor, weight) {
            path.push(successor);
            extend_paths(graph, earliest, reaches_omega, path, paths);
            path.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_calendar(table: &str) -> Calendar {
        let graph = ScheduleGraph::parse(table).unwrap();
        compute_calendars(&graph).unwrap()
    }

    fn assert_float_bounds(graph: &ScheduleGraph, calendar: &Calendar) {
        let omega = graph.omega();
        assert_eq!(calendar.earliest(omega), calendar.latest(omega));
        assert_eq!(calendar.earliest(graph.alpha()), 0);
        for v in 0..graph.vertex_count() {
            assert!(calendar.total_float(v) >= 0, "vertex {} total float", v);
            if v == omega {
                assert_eq!(calendar.free_float(v), None);
                continue;
            }
            let free = calendar.free_float(v).unwrap();
            assert!(free >= 0, "vertex {} free float", v);
            assert!(calendar.total_float(v) >= free, "vertex {} floats", v);
        }
        for path in calendar.critical_paths() {
            assert_eq!(path.first(), Some(&graph.alpha()));
            assert_eq!(path.last(), Some(&omega));
            for &v in path {
                assert_eq!(calendar.total_float(v), 0);
            }
        }
    }

    #[test]
    fn test_linear_chain() {
        let calendar = make_calendar("1 3\n2 5 1\n3 2 2\n");
        assert_eq!(calendar.earliest_dates(), &[0, 0, 3, 8, 10]);
        assert_eq!(calendar.latest_dates(), &[0, 0, 3, 8, 10]);
        assert_eq!(calendar.total_floats(), &[0, 0, 0, 0, 0]);
        assert_eq!(
            calendar.free_floats(),
            &[Some(0), Some(0), Some(0), Some(0), None]
        );
        assert_eq!(calendar.critical_paths(), &[vec![0, 1, 2, 3, 4]]);
        assert_eq!(calendar.project_duration(), 10);
    }

    #[test]
    fn test_two_start_tasks_feeding_one() {
        let calendar = make_calendar("1 4\n2 6\n3 1 1 2\n");
        assert_eq!(calendar.earliest(3), 6);
        assert_eq!(calendar.total_float(1), 2);
        assert_eq!(calendar.free_float(1), Some(2));
        assert_eq!(calendar.total_float(2), 0);
        assert_eq!(calendar.free_float(2), Some(0));
        assert_eq!(calendar.critical_paths(), &[vec![0, 2, 3, 4]]);
        assert!(calendar.is_critical(2));
        assert!(!calendar.is_critical(1));
        assert_eq!(calendar.project_duration(), 7);
    }

    #[test]
    fn test_tied_paths_all_reported() {
        // 1 fans out to 2 and 3 of equal length, both join at 4
        let calendar = make_calendar("1 2\n2 3 1\n3 3 1\n4 1 2 3\n");
        assert_eq!(
            calendar.critical_paths(),
            &[vec![0, 1, 2, 4, 5], vec![0, 1, 3, 4, 5]]
        );
        assert_eq!(calendar.critical_vertices(), vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_chained_tied_diamonds_multiply_paths() {
        // Three equal-length diamonds in a row: 2 * 2 * 2 critical paths
        let calendar = make_calendar(
            "1 1\n2 1 1\n3 1 1\n4 1 2 3\n5 1 4\n6 1 4\n7 1 5 6\n8 1 7\n9 1 7\n10 1 8 9\n",
        );
        assert_eq!(calendar.critical_paths().len(), 8);
        assert_eq!(calendar.critical_vertices(), (0..=11).collect::<Vec<_>>());
        assert_eq!(calendar.project_duration(), 7);
    }

    #[test]
    fn test_zero_free_float_off_critical_path() {
        // 1 -> 2 is a short branch beside the long task 3
        let calendar = make_calendar("1 1\n2 1 1\n3 10\n");
        assert_eq!(calendar.free_float(1), Some(0));
        assert_eq!(calendar.total_float(1), 8);
        assert_eq!(calendar.free_float(2), Some(8));
        assert_eq!(calendar.critical_paths(), &[vec![0, 3, 4]]);
    }

    #[test]
    fn test_zero_duration_tasks() {
        let calendar = make_calendar("1 0\n2 0 1\n3 4\n");
        assert_eq!(calendar.project_duration(), 4);
        assert_eq!(calendar.earliest(2), 0);
        assert_eq!(calendar.total_float(1), 4);
        assert_eq!(calendar.critical_paths(), &[vec![0, 3, 4]]);

        let calendar = make_calendar("1 0\n2 0\n");
        assert_eq!(calendar.project_duration(), 0);
        assert_eq!(calendar.critical_paths().len(), 2);
    }

    #[test]
    fn test_diamond_with_slack_branch() {
        // Path via 2: 2 + 3 + 1 = 6, via 3: 2 + 5 + 1 = 8
        let calendar = make_calendar("1 2\n2 3 1\n3 5 1\n4 1 2 3\n");
        assert_eq!(calendar.earliest(4), 7);
        assert_eq!(calendar.latest(2), 4);
        assert_eq!(calendar.total_float(2), 2);
        assert_eq!(calendar.free_float(2), Some(2));
        assert_eq!(calendar.critical_paths(), &[vec![0, 1, 3, 4, 5]]);
    }

    #[test]
    fn test_float_bounds_across_graph_family() {
        let tables = [
            "1 1\n",
            "1 0\n2 0\n3 0\n",
            "1 2\n2 3 1\n3 4 1\n4 5 2 3\n",
            "1 3\n2 2\n3 4 1\n4 1 1 2\n5 6 3 4\n6 2 2\n",
            "1 1\n2 1 1\n3 1 2\n4 1 3\n5 1 1\n6 1 5 4\n7 9\n",
            "1 5\n2 5\n3 5\n4 0 1 2 3\n",
        ];
        for table in tables {
            let graph = ScheduleGraph::parse(table).unwrap();
            let calendar = compute_calendars(&graph).unwrap();
            assert_float_bounds(&graph, &calendar);
            assert!(!calendar.critical_paths().is_empty());
        }
    }

    #[test]
    fn test_repeated_computation_is_identical() {
        let graph = ScheduleGraph::parse("1 3\n2 2\n3 4 1\n4 1 1 2\n5 6 3 4\n6 2 2\n").unwrap();
        let snapshot = graph.clone();
        let first = compute_calendars(&graph).unwrap();
        let second = compute_calendars(&graph).unwrap();
        assert_eq!(first, second);
        assert_eq!(graph, snapshot);
    }

    #[test]
    fn test_cycle_rejected() {
        let graph = ScheduleGraph::parse("1 2\n2 3 1 3\n3 4 2\n").unwrap();
        assert!(matches!(
            compute_calendars(&graph),
            Err(ScheduleError::Cycle { .. })
        ));
    }

    #[test]
    fn test_date_overflow_is_an_error() {
        let graph = ScheduleGraph::parse("1 9223372036854775807\n2 1 1\n").unwrap();
        assert_eq!(
            compute_calendars(&graph),
            Err(ScheduleError::DateOverflow { vertex: 3 })
        );

        let graph =
            ScheduleGraph::parse("1 5000000000000000000\n2 5000000000000000000 1\n").unwrap();
        assert_eq!(
            compute_calendars(&graph),
            Err(ScheduleError::DateOverflow { vertex: 3 })
        );
    }

    #[test]
    fn test_largest_representable_project() {
        let calendar = make_calendar("1 9223372036854775806\n2 1 1\n");
        assert_eq!(calendar.project_duration(), i64::MAX);
        assert_eq!(calendar.critical_paths(), &[vec![0, 1, 2, 3]]);
        assert_eq!(calendar.total_floats(), &[0, 0, 0, 0]);
    }

    #[test]
    fn test_negative_duration_rejected() {
        let graph = ScheduleGraph::parse("1 2\n2 -4 1\n").unwrap();
        assert_eq!(
            compute_calendars(&graph),
            Err(ScheduleError::NegativeEdge {
                from: 2,
                to: 3,
                weight: -4
            })
        );
    }
}
