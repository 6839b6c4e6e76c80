//! Structural checks that gate scheduling.
//!
//! Both checks are advisory: they report, the caller decides. Ranking or
//! dating a graph that fails either check gives meaningless results.

use crate::models::Validation;
use crate::registry::TaskIndex;
use crate::{log_checks, log_debug};

use super::TaskGraph;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    OnPath,
    Done,
}

impl TaskGraph {
    /// Depth-first search along successors from `root`, reporting whether a
    /// task on the current path is reached again.
    ///
    /// A task reached twice through different branches (a diamond) is not a
    /// cycle; only a revisit of the current path is.
    pub fn has_cycle_from(&self, root: TaskIndex) -> bool {
        let mut marks = vec![Mark::Unvisited; self.len()];
        self.cycle_reachable(root, &mut marks)
    }

    /// Whether any cycle exists anywhere in the graph.
    ///
    /// Searches from every task not yet explored, so cycles that the source
    /// cannot reach (or graphs without a source at all) are still found.
    pub fn has_cycle(&self) -> bool {
        let mut marks = vec![Mark::Unvisited; self.len()];
        let roots = self.source().into_iter().chain(0..self.len() as TaskIndex);
        for root in roots {
            if self.cycle_reachable(root, &mut marks) {
                return true;
            }
        }
        false
    }

    /// Whether any task has a negative duration.
    pub fn has_negative_duration(&self) -> bool {
        self.tasks().iter().any(|task| task.duration() < 0)
    }

    /// Run both checks.
    pub fn validate(&self) -> Validation {
        let validation = Validation {
            has_cycle: self.has_cycle(),
            has_negative_duration: self.has_negative_duration(),
        };
        log_checks!(
            self.verbosity(),
            "Validation: cycle={}, negative_duration={}",
            validation.has_cycle,
            validation.has_negative_duration
        );
        validation
    }

    fn cycle_reachable(&self, root: TaskIndex, marks: &mut [Mark]) -> bool {
        let Some(task) = self.task(root) else {
            return false;
        };
        if marks[root as usize] != Mark::Unvisited {
            return false;
        }

        marks[root as usize] = Mark::OnPath;
        let mut stack: Vec<(TaskIndex, Vec<TaskIndex>)> = vec![(root, task.sorted_successors())];

        while let Some(frame) = stack.last_mut() {
            let node = frame.0;
            match frame.1.pop() {
                Some(next) => match marks[next as usize] {
                    Mark::OnPath => {
                        log_debug!(
                            self.verbosity(),
                            "  Cycle: {} revisits {}",
                            self.name_of(node),
                            self.name_of(next)
                        );
                        return true;
                    }
                    Mark::Done => {}
                    Mark::Unvisited => {
                        marks[next as usize] = Mark::OnPath;
                        let successors = self
                            .task(next)
                            .map(|t| t.sorted_successors())
                            .unwrap_or_default();
                        stack.push((next, successors));
                    }
                },
                None => {
                    marks[node as usize] = Mark::Done;
                    stack.pop();
                }
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{bounded_graph, diamond_records, idx};
    use super::*;
    use crate::config::EngineConfig;
    use crate::models::TaskRecord;

    fn derived(records: &[TaskRecord]) -> TaskGraph {
        let mut graph = TaskGraph::build(records, &EngineConfig::default()).unwrap();
        graph.derive_successors();
        graph
    }

    #[test]
    fn test_diamond_is_acyclic() {
        let graph = bounded_graph(&diamond_records());
        assert!(!graph.has_cycle());
        assert!(!graph.has_cycle_from(graph.source().unwrap()));
        assert!(graph.validate().is_schedulable());
    }

    #[test]
    fn test_two_task_cycle() {
        let records = vec![
            TaskRecord::new("S", 1, &[]),
            TaskRecord::new("A", 1, &["S", "B"]),
            TaskRecord::new("B", 1, &["A"]),
            TaskRecord::new("E", 1, &["B"]),
        ];
        let graph = bounded_graph(&records);
        assert!(graph.has_cycle());
        assert!(graph.has_cycle_from(graph.source().unwrap()));
        assert!(!graph.validate().is_schedulable());
    }

    #[test]
    fn test_self_loop_is_cycle() {
        let graph = derived(&[TaskRecord::new("A", 1, &["A"])]);
        assert!(graph.has_cycle());
        assert!(graph.has_cycle_from(idx(&graph, "A")));
    }

    #[test]
    fn test_cycle_unreachable_from_source() {
        // X and Y form a loop with no entry; the source only reaches A
        let records = vec![
            TaskRecord::new("A", 1, &[]),
            TaskRecord::new("X", 1, &["Y"]),
            TaskRecord::new("Y", 1, &["X"]),
        ];
        let graph = bounded_graph(&records);
        assert!(!graph.has_cycle_from(graph.source().unwrap()));
        assert!(graph.has_cycle());
    }

    #[test]
    fn test_shared_descendant_is_not_cycle() {
        // Two routes into D, then a long tail after it
        let mut records = diamond_records();
        records.push(TaskRecord::new("E", 1, &["D"]));
        records.push(TaskRecord::new("F", 1, &["E", "B"]));
        let graph = bounded_graph(&records);
        assert!(!graph.has_cycle());
    }

    #[test]
    fn test_negative_duration() {
        let records = vec![
            TaskRecord::new("A", 3, &[]),
            TaskRecord::new("B", -5, &["A"]),
        ];
        let graph = derived(&records);
        let validation = graph.validate();
        assert!(validation.has_negative_duration);
        assert!(!validation.has_cycle);
        assert!(!validation.is_schedulable());
    }

    #[test]
    fn test_negative_duration_checked_regardless_of_cycle() {
        let records = vec![TaskRecord::new("A", -5, &["A"])];
        let validation = derived(&records).validate();
        assert!(validation.has_cycle);
        assert!(validation.has_negative_duration);
    }

    #[test]
    fn test_out_of_range_root() {
        let graph = derived(&diamond_records());
        assert!(!graph.has_cycle_from(99));
    }
}
