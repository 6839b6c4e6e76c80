//! Task name registry.
//!
//! Maps task names to stable arena indices. Indices are handed out in
//! creation order and never reused, so every phase can address tasks by
//! integer instead of re-locating them by name.

use rustc_hash::FxHashMap;

/// Arena index of a task (u32 for compact storage and fast hashing).
pub type TaskIndex = u32;

/// Registry that maps task names to arena indices.
#[derive(Debug, Clone)]
pub struct TaskRegistry {
    to_index: FxHashMap<String, TaskIndex>,
    names: Vec<String>,
}

impl TaskRegistry {
    /// Create a new registry with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            to_index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            names: Vec::with_capacity(capacity),
        }
    }

    /// Find or create the index for a name.
    ///
    /// The flag is true when the name was not registered before.
    pub fn intern(&mut self, name: &str) -> (TaskIndex, bool) {
        if let Some(&index) = self.to_index.get(name) {
            return (index, false);
        }
        let index = self.names.len() as TaskIndex;
        self.names.push(name.to_string());
        self.to_index.insert(name.to_string(), index);
        (index, true)
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<TaskIndex> {
        self.to_index.get(name).copied()
    }

    #[inline]
    pub fn resolve(&self, index: TaskIndex) -> Option<&str> {
        self.names.get(index as usize).map(|s| s.as_str())
    }

    /// Number of registered names.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for TaskRegistry {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}
