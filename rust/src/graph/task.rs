//! Task node stored in the graph arena.

use rustc_hash::FxHashSet;

use crate::registry::TaskIndex;

/// Role of a task in the graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskKind {
    /// A task read from the input records.
    Work,
    /// Synthetic zero-duration start event.
    Source,
    /// Synthetic zero-duration end event.
    Sink,
}

/// A scheduling unit.
///
/// Predecessor and successor sets hold arena indices rather than references,
/// so the two directions can be kept as exact transposes without ownership cycles.
#[derive(Clone, Debug)]
pub struct Task {
    pub(crate) index: TaskIndex,
    pub(crate) name: String,
    pub(crate) kind: TaskKind,
    pub(crate) duration: i64,
    pub(crate) predecessors: FxHashSet<TaskIndex>,
    pub(crate) successors: FxHashSet<TaskIndex>,
    pub(crate) rank: Option<u32>,
}

impl Task {
    pub(crate) fn new(index: TaskIndex, name: &str, kind: TaskKind, duration: i64) -> Self {
        Self {
            index,
            name: name.to_string(),
            kind,
            duration,
            predecessors: FxHashSet::default(),
            successors: FxHashSet::default(),
            rank: None,
        }
    }

    pub fn index(&self) -> TaskIndex {
        self.index
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> TaskKind {
        self.kind
    }

    pub fn duration(&self) -> i64 {
        self.duration
    }

    pub fn predecessors(&self) -> &FxHashSet<TaskIndex> {
        &self.predecessors
    }

    pub fn successors(&self) -> &FxHashSet<TaskIndex> {
        &self.successors
    }

    /// Topological layer, `None` until ranks are computed.
    pub fn rank(&self) -> Option<u32> {
        self.rank
    }

    /// Successors in ascending index order, for deterministic traversals.
    pub fn sorted_successors(&self) -> Vec<TaskIndex> {
        let mut successors: Vec<TaskIndex> = self.successors.iter().copied().collect();
        successors.sort_unstable();
        successors
    }

    pub fn sorted_predecessors(&self) -> Vec<TaskIndex> {
        let mut predecessors: Vec<TaskIndex> = self.predecessors.iter().copied().collect();
        predecessors.sort_unstable();
        predecessors
    }
}
