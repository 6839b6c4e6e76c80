//! Task dependency graph.
//!
//! The graph owns every task in an index-addressed arena. Construction and
//! scheduling are separate phases, each an explicit call on `TaskGraph`:
//!
//! 1. `build` registers tasks from records (forward references allowed)
//! 2. `add_source` / `add_sink` synthesize the boundary events
//! 3. `derive_successors` mirrors predecessor sets into successor sets
//! 4. `validate` reports cycles and negative durations
//! 5. `compute_ranks` assigns topological layers
//!
//! Date propagation lives in `critical_path` and expects all of the above.

mod boundary;
mod builder;
mod ranks;
mod task;
mod validation;

pub use boundary::SOURCE_NAME;
pub use task::{Task, TaskKind};

use thiserror::Error;

use crate::registry::{TaskIndex, TaskRegistry};

/// Errors raised while constructing or leveling a task graph.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("No task without predecessors: cannot create a source")]
    NoEntryPoint,
    #[error("No task without successors: cannot create a sink")]
    NoExitPoint,
    #[error("Task {0:?} is referenced as a predecessor but never defined")]
    UnresolvedReference(String),
    #[error("Unknown unresolved-reference policy: {0}")]
    UnknownPolicy(String),
    #[error("Circular dependency detected in task graph")]
    CircularDependency,
    #[error("Ranks have not been computed for task {0:?}")]
    Unranked(String),
    #[error("Source or sink has not been synthesized")]
    MissingBoundary,
    #[error("Date of task {0:?} overflows the day range")]
    DateOverflow(String),
}

/// Arena of tasks with their name registry and boundary indices.
#[derive(Clone, Debug, Default)]
pub struct TaskGraph {
    tasks: Vec<Task>,
    registry: TaskRegistry,
    source: Option<TaskIndex>,
    sink: Option<TaskIndex>,
    verbosity: u8,
}

impl TaskGraph {
    /// Create an empty graph logging at the given verbosity.
    pub fn new(verbosity: u8) -> Self {
        Self {
            verbosity,
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn verbosity(&self) -> u8 {
        self.verbosity
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    #[inline]
    pub fn task(&self, index: TaskIndex) -> Option<&Task> {
        self.tasks.get(index as usize)
    }

    #[inline]
    pub fn index_of(&self, name: &str) -> Option<TaskIndex> {
        self.registry.get(name)
    }

    /// Name of a task, or an empty string for an index outside the arena.
    pub fn name_of(&self, index: TaskIndex) -> &str {
        self.registry.resolve(index).unwrap_or_default()
    }

    pub fn source(&self) -> Option<TaskIndex> {
        self.source
    }

    pub fn sink(&self) -> Option<TaskIndex> {
        self.sink
    }

    /// All (predecessor, task) edges, sorted.
    pub fn edges(&self) -> Vec<(TaskIndex, TaskIndex)> {
        let mut edges: Vec<(TaskIndex, TaskIndex)> = self
            .tasks
            .iter()
            .flat_map(|task| task.predecessors.iter().map(move |&p| (p, task.index)))
            .collect();
        edges.sort_unstable();
        edges
    }

    /// Find the task with this name, creating a zero-duration work task if needed.
    pub(crate) fn find_or_create(&mut self, name: &str) -> TaskIndex {
        let (index, created) = self.registry.intern(name);
        if created {
            self.tasks.push(Task::new(index, name, TaskKind::Work, 0));
        }
        index
    }

    /// Append a zero-duration boundary task under `preferred`, or under the
    /// first of `preferred'`, `preferred''`, ... that no task uses yet.
    pub(crate) fn push_boundary(&mut self, preferred: &str, kind: TaskKind) -> TaskIndex {
        let mut name = preferred.to_string();
        while self.registry.get(&name).is_some() {
            name.push('\'');
        }
        let (index, _) = self.registry.intern(&name);
        self.tasks.push(Task::new(index, &name, kind, 0));
        index
    }

    #[inline]
    pub(crate) fn task_mut(&mut self, index: TaskIndex) -> &mut Task {
        &mut self.tasks[index as usize]
    }

    pub(crate) fn tasks_mut(&mut self) -> &mut [Task] {
        &mut self.tasks
    }
}
