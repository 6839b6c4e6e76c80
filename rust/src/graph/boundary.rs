//! Synthetic source and sink tasks.
//!
//! The source precedes every task that has no predecessor and the sink
//! follows every task that precedes nothing, so the graph gets a single
//! start event and a single end event.

use crate::registry::TaskIndex;
use crate::{log_checks, log_phases};

use super::{GraphError, TaskGraph, TaskKind};

/// Name given to the synthetic source task.
pub const SOURCE_NAME: &str = "0";

impl TaskGraph {
    /// Add the source task in front of every entry task.
    ///
    /// Fails with `NoEntryPoint` when every task has a predecessor, since such
    /// a graph cannot be acyclic. Calling again returns the existing source.
    pub fn add_source(&mut self) -> Result<TaskIndex, GraphError> {
        if let Some(source) = self.source() {
            return Ok(source);
        }

        let entries: Vec<TaskIndex> = self
            .tasks()
            .iter()
            .filter(|task| task.predecessors().is_empty())
            .map(|task| task.index())
            .collect();
        if entries.is_empty() {
            return Err(GraphError::NoEntryPoint);
        }

        let source = self.push_boundary(SOURCE_NAME, TaskKind::Source);
        for &entry in &entries {
            self.task_mut(entry).predecessors.insert(source);
            self.task_mut(source).successors.insert(entry);
        }
        self.source = Some(source);

        log_checks!(
            self.verbosity(),
            "Source {:?} precedes {} entry tasks",
            self.name_of(source),
            entries.len()
        );
        log_phases!(self.verbosity(), "Added source");
        Ok(source)
    }

    /// Add the sink task after every task that is nobody's predecessor.
    ///
    /// The exit set is computed on the graph as it stands before the sink is
    /// appended. The sink is named after the task count at creation time,
    /// primed if an input task already has that name.
    /// Fails with `NoExitPoint` when every task precedes another one.
    pub fn add_sink(&mut self) -> Result<TaskIndex, GraphError> {
        if let Some(sink) = self.sink() {
            return Ok(sink);
        }

        let mut is_predecessor = vec![false; self.len()];
        for task in self.tasks() {
            for &pred in task.predecessors() {
                is_predecessor[pred as usize] = true;
            }
        }
        let exits: Vec<TaskIndex> = self
            .tasks()
            .iter()
            .filter(|task| !is_predecessor[task.index() as usize])
            .map(|task| task.index())
            .collect();
        if exits.is_empty() {
            return Err(GraphError::NoExitPoint);
        }

        let preferred = self.len().to_string();
        let sink = self.push_boundary(&preferred, TaskKind::Sink);
        for &exit in &exits {
            self.task_mut(sink).predecessors.insert(exit);
            self.task_mut(exit).successors.insert(sink);
        }
        self.sink = Some(sink);

        log_checks!(
            self.verbosity(),
            "Sink {:?} follows {} exit tasks",
            self.name_of(sink),
            exits.len()
        );
        log_phases!(self.verbosity(), "Added sink");
        Ok(sink)
    }
}
