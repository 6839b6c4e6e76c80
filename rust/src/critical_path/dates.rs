//! Earliest and latest date propagation.

use crate::graph::{GraphError, TaskGraph};
use crate::{log_debug, log_phases};

use super::types::Dates;

/// Compute earliest and latest start dates for every task.
///
/// Forward pass in rank order:
///   earliest[source] = 0
///   earliest[v] = max over predecessors p of (earliest[p] + duration[p])
///
/// Backward pass in reverse rank order:
///   latest[sink] = earliest[sink]
///   latest[v] = min over successors s of (latest[s] - duration[v])
///
/// Fails with `DateOverflow` naming the task whose date leaves the `i64` range.
///
/// Needs synthesized boundaries, derived successors and computed ranks, and
/// the graph must be acyclic with non-negative durations for the result to
/// mean anything.
pub fn compute_dates(graph: &TaskGraph) -> Result<Dates, GraphError> {
    let (Some(source), Some(sink)) = (graph.source(), graph.sink()) else {
        return Err(GraphError::MissingBoundary);
    };
    let order = graph.rank_order()?;
    let verbosity = graph.verbosity();
    let n = graph.len();

    let tasks = graph.tasks();
    let duration = |t: u32| tasks[t as usize].duration();

    let overflow = |t: u32| GraphError::DateOverflow(graph.name_of(t).to_string());

    let mut earliest = vec![0i64; n];
    for &task in &order {
        let mut start = 0;
        for &p in tasks[task as usize].predecessors() {
            let finish = earliest[p as usize]
                .checked_add(duration(p))
                .ok_or_else(|| overflow(task))?;
            start = start.max(finish);
        }
        earliest[task as usize] = start;
    }
    earliest[source as usize] = 0;

    let project_duration = earliest[sink as usize];

    let mut latest = vec![0i64; n];
    latest[sink as usize] = project_duration;
    for &task in order.iter().rev() {
        if task == sink {
            continue;
        }
        let mut start: Option<i64> = None;
        for &s in tasks[task as usize].successors() {
            let required = latest[s as usize]
                .checked_sub(duration(task))
                .ok_or_else(|| overflow(task))?;
            start = Some(start.map_or(required, |current| current.min(required)));
        }
        // None only when successors were never derived
        let start = match start {
            Some(start) => start,
            None => project_duration
                .checked_sub(duration(task))
                .ok_or_else(|| overflow(task))?,
        };
        latest[task as usize] = start;
        log_debug!(
            verbosity,
            "  {}: earliest={} latest={}",
            graph.name_of(task),
            earliest[task as usize],
            latest[task as usize]
        );
    }

    log_phases!(verbosity, "Computed dates: project duration {}", project_duration);
    Ok(Dates {
        earliest,
        latest,
        project_duration,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::tests::{bounded_graph, diamond_records, idx};
    use crate::models::TaskRecord;

    fn dated(records: &[TaskRecord]) -> (TaskGraph, Dates) {
        let mut graph = bounded_graph(records);
        graph.compute_ranks().unwrap();
        let dates = compute_dates(&graph).unwrap();
        (graph, dates)
    }

    #[test]
    fn test_diamond_dates() {
        let (graph, dates) = dated(&diamond_records());
        let at = |name: &str| {
            let t = idx(&graph, name);
            (dates.earliest(t), dates.latest(t))
        };

        assert_eq!(at("A"), (0, 0));
        assert_eq!(at("B"), (3, 5));
        assert_eq!(at("C"), (3, 3));
        assert_eq!(at("D"), (7, 7));
        assert_eq!(at("0"), (0, 0));
        assert_eq!(at("5"), (8, 8));
        assert_eq!(dates.project_duration(), 8);
    }

    #[test]
    fn test_chain_dates() {
        let records = vec![
            TaskRecord::new("A", 2, &[]),
            TaskRecord::new("B", 3, &["A"]),
            TaskRecord::new("C", 4, &["B"]),
        ];
        let (graph, dates) = dated(&records);
        assert_eq!(dates.project_duration(), 9);
        for name in ["A", "B", "C"] {
            assert_eq!(dates.slack(idx(&graph, name)), 0);
        }
        assert_eq!(dates.earliest(idx(&graph, "C")), 5);
    }

    #[test]
    fn test_edge_inequalities_hold_with_equality_somewhere() {
        let records = vec![
            TaskRecord::new("A", 2, &[]),
            TaskRecord::new("B", 5, &[]),
            TaskRecord::new("C", 1, &["A"]),
            TaskRecord::new("D", 3, &["A", "B"]),
            TaskRecord::new("E", 2, &["C", "D"]),
            TaskRecord::new("F", 6, &["C"]),
        ];
        let (graph, dates) = dated(&records);

        for (u, v) in graph.edges() {
            let du = graph.task(u).unwrap().duration();
            assert!(dates.earliest(v) >= dates.earliest(u) + du);
            assert!(dates.latest(u) <= dates.latest(v) - du);
        }
        for task in graph.tasks() {
            let v = task.index();
            if !task.predecessors().is_empty() {
                assert!(task.predecessors().iter().any(|&p| {
                    dates.earliest(v) == dates.earliest(p) + graph.task(p).unwrap().duration()
                }));
            }
            if !task.successors().is_empty() {
                assert!(task
                    .successors()
                    .iter()
                    .any(|&s| dates.latest(v) == dates.latest(s) - task.duration()));
            }
            assert!(dates.slack(v) >= 0);
        }
    }

    #[test]
    fn test_huge_durations_overflow() {
        let huge = i64::MAX / 2 + 1;
        let records = vec![
            TaskRecord::new("A", huge, &[]),
            TaskRecord::new("B", huge, &["A"]),
        ];
        let mut graph = bounded_graph(&records);
        graph.compute_ranks().unwrap();

        // B starts at `huge`; the sink would start at 2 * huge
        let sink = graph.name_of(graph.sink().unwrap()).to_string();
        assert_eq!(compute_dates(&graph), Err(GraphError::DateOverflow(sink)));
    }

    #[test]
    fn test_requires_ranks() {
        let graph = bounded_graph(&diamond_records());
        assert!(matches!(compute_dates(&graph), Err(GraphError::Unranked(_))));
    }

    #[test]
    fn test_requires_boundaries() {
        let mut graph = TaskGraph::build(
            &diamond_records(),
            &crate::config::EngineConfig::default(),
        )
        .unwrap();
        graph.derive_successors();
        graph.compute_ranks().unwrap();
        assert_eq!(compute_dates(&graph), Err(GraphError::MissingBoundary));
    }
}
