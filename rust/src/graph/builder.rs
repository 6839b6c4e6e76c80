//! Graph construction from parsed task records.

use rustc_hash::FxHashSet;

use crate::config::{EngineConfig, UnresolvedPolicy};
use crate::models::TaskRecord;
use crate::registry::TaskIndex;
use crate::{log_checks, log_debug, log_phases};

use super::{GraphError, TaskGraph};

impl TaskGraph {
    /// Build a graph from task records.
    ///
    /// Records may arrive in any order and may name predecessors that are
    /// defined later. A repeated record overwrites the duration and adds to
    /// the predecessor set. Predecessors that never get a record of their
    /// own are handled according to `config.unresolved_references`.
    ///
    /// No validation happens here; call `validate` once boundaries and
    /// successors are in place.
    pub fn build(records: &[TaskRecord], config: &EngineConfig) -> Result<Self, GraphError> {
        let policy = config.unresolved_policy()?;
        let verbosity = config.verbosity;
        let mut graph = TaskGraph::new(verbosity);
        let mut defined: FxHashSet<TaskIndex> =
            FxHashSet::with_capacity_and_hasher(records.len(), Default::default());

        for record in records {
            let subject = graph.find_or_create(&record.name);
            graph.task_mut(subject).duration = record.duration;
            defined.insert(subject);

            for pred_name in &record.predecessors {
                let pred = graph.find_or_create(pred_name);
                if graph.task_mut(subject).predecessors.insert(pred) {
                    log_debug!(verbosity, "  {} <- {}", record.name, pred_name);
                }
            }
        }

        for task in graph.tasks_mut() {
            if defined.contains(&task.index) {
                continue;
            }
            match policy {
                UnresolvedPolicy::Reject => {
                    return Err(GraphError::UnresolvedReference(task.name.clone()));
                }
                UnresolvedPolicy::ZeroDuration => {
                    log_checks!(
                        verbosity,
                        "Task {:?} never defined, using duration 0",
                        task.name
                    );
                    task.duration = 0;
                }
            }
        }

        log_phases!(
            verbosity,
            "Built graph: {} tasks from {} records",
            graph.len(),
            records.len()
        );
        Ok(graph)
    }

    /// Mirror every predecessor edge into the predecessor's successor set.
    ///
    /// Set semantics make repeated calls harmless.
    pub fn derive_successors(&mut self) {
        let edges = self.edges();
        for &(pred, task) in &edges {
            self.task_mut(pred).successors.insert(task);
        }
        log_checks!(self.verbosity(), "Derived successors for {} edges", edges.len());
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{diamond_records, idx};
    use super::*;

    fn build(records: &[TaskRecord]) -> TaskGraph {
        TaskGraph::build(records, &EngineConfig::default()).unwrap()
    }

    fn assert_transpose(graph: &TaskGraph) {
        for task in graph.tasks() {
            for &s in task.successors() {
                assert!(graph.task(s).unwrap().predecessors().contains(&task.index()));
            }
            for &p in task.predecessors() {
                assert!(graph.task(p).unwrap().successors().contains(&task.index()));
            }
        }
    }

    #[test]
    fn test_build_diamond() {
        let graph = build(&diamond_records());
        assert_eq!(graph.len(), 4);

        let d = graph.task(idx(&graph, "D")).unwrap();
        assert_eq!(d.duration(), 1);
        assert_eq!(d.sorted_predecessors(), {
            let mut v = vec![idx(&graph, "B"), idx(&graph, "C")];
            v.sort_unstable();
            v
        });
        // Successors are only filled in by derive_successors
        assert!(graph.tasks().iter().all(|t| t.successors().is_empty()));
    }

    #[test]
    fn test_forward_reference_resolved() {
        let records = vec![
            TaskRecord::new("B", 2, &["A"]),
            TaskRecord::new("A", 5, &[]),
        ];
        let graph = build(&records);

        assert_eq!(graph.len(), 2);
        let a = graph.task(idx(&graph, "A")).unwrap();
        assert_eq!(a.duration(), 5);
        assert!(a.predecessors().is_empty());
    }

    #[test]
    fn test_repeated_record_overwrites_duration_and_unions_predecessors() {
        let records = vec![
            TaskRecord::new("A", 1, &[]),
            TaskRecord::new("B", 1, &[]),
            TaskRecord::new("C", 2, &["A"]),
            TaskRecord::new("C", 7, &["B", "A"]),
        ];
        let graph = build(&records);

        let c = graph.task(idx(&graph, "C")).unwrap();
        assert_eq!(c.duration(), 7);
        assert_eq!(c.predecessors().len(), 2);
    }

    #[test]
    fn test_duplicate_predecessor_is_noop() {
        let records = vec![
            TaskRecord::new("A", 1, &[]),
            TaskRecord::new("B", 1, &["A", "A"]),
        ];
        let graph = build(&records);
        assert_eq!(graph.task(idx(&graph, "B")).unwrap().predecessors().len(), 1);
    }

    #[test]
    fn test_unresolved_reference_rejected() {
        let records = vec![TaskRecord::new("B", 2, &["ghost"])];
        let result = TaskGraph::build(&records, &EngineConfig::default());
        assert_eq!(
            result.unwrap_err(),
            GraphError::UnresolvedReference("ghost".to_string())
        );
    }

    #[test]
    fn test_unresolved_reference_zero_policy() {
        let records = vec![TaskRecord::new("B", 2, &["ghost"])];
        let config = EngineConfig {
            unresolved_references: "zero".to_string(),
            ..EngineConfig::default()
        };
        let graph = TaskGraph::build(&records, &config).unwrap();
        assert_eq!(graph.task(idx(&graph, "ghost")).unwrap().duration(), 0);
    }

    #[test]
    fn test_unknown_policy() {
        let config = EngineConfig {
            unresolved_references: "maybe".to_string(),
            ..EngineConfig::default()
        };
        let result = TaskGraph::build(&diamond_records(), &config);
        assert_eq!(
            result.unwrap_err(),
            GraphError::UnknownPolicy("maybe".to_string())
        );
    }

    #[test]
    fn test_derive_successors_is_transpose() {
        let mut graph = build(&diamond_records());
        graph.derive_successors();
        assert_transpose(&graph);

        let a = graph.task(idx(&graph, "A")).unwrap();
        assert_eq!(a.successors().len(), 2);
        assert!(graph.task(idx(&graph, "D")).unwrap().successors().is_empty());
    }

    #[test]
    fn test_derive_successors_idempotent() {
        let mut graph = build(&diamond_records());
        graph.derive_successors();
        let first: Vec<Vec<TaskIndex>> =
            graph.tasks().iter().map(|t| t.sorted_successors()).collect();

        graph.derive_successors();
        let second: Vec<Vec<TaskIndex>> =
            graph.tasks().iter().map(|t| t.sorted_successors()).collect();

        assert_eq!(first, second);
        assert_transpose(&graph);
    }
}
