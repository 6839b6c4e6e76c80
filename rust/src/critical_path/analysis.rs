//! Slack and critical path enumeration.

use rustc_hash::FxHashSet;

use crate::graph::{GraphError, TaskGraph};
use crate::log_checks;
use crate::registry::TaskIndex;

use super::types::Dates;

/// Slack of every task, indexed by task.
pub fn compute_slack(dates: &Dates) -> Vec<i64> {
    dates
        .earliest
        .iter()
        .zip(&dates.latest)
        .map(|(earliest, latest)| latest - earliest)
        .collect()
}

/// Tasks with zero slack.
pub fn critical_tasks(dates: &Dates) -> FxHashSet<TaskIndex> {
    (0..dates.len() as TaskIndex)
        .filter(|&task| dates.is_critical(task))
        .collect()
}

/// Enumerate every critical path from the source.
///
/// Starting at the source, a path is extended into each successor whose own
/// slack is zero, and ends when it reaches a task with no successors (the
/// sink on a bounded graph). A zero-slack task is only reached through
/// zero-slack ancestors. Paths that run out of zero-slack successors before
/// the sink are dropped.
///
/// Returned paths are sorted. On graphs with many parallel critical branches
/// the count grows combinatorially.
pub fn critical_paths(
    graph: &TaskGraph,
    dates: &Dates,
) -> Result<Vec<Vec<TaskIndex>>, GraphError> {
    let source = graph.source().ok_or(GraphError::MissingBoundary)?;

    let mut paths: Vec<Vec<TaskIndex>> = Vec::new();
    let mut stack: Vec<Vec<TaskIndex>> = vec![vec![source]];

    while let Some(path) = stack.pop() {
        let Some(task) = path.last().and_then(|&last| graph.task(last)) else {
            continue;
        };
        if task.successors().is_empty() {
            paths.push(path);
            continue;
        }
        for next in task.sorted_successors() {
            if dates.is_critical(next) {
                let mut extended = path.clone();
                extended.push(next);
                stack.push(extended);
            }
        }
    }

    paths.sort();
    log_checks!(graph.verbosity(), "Found {} critical paths", paths.len());
    Ok(paths)
}
