//! Types for critical path analysis.

use crate::registry::TaskIndex;

/// Earliest and latest start dates, indexed by task.
///
/// Dates are integer offsets from the project start (day 0).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Dates {
    pub(crate) earliest: Vec<i64>,
    pub(crate) latest: Vec<i64>,
    pub(crate) project_duration: i64,
}

impl Dates {
    #[inline]
    pub fn earliest(&self, task: TaskIndex) -> i64 {
        self.earliest[task as usize]
    }

    #[inline]
    pub fn latest(&self, task: TaskIndex) -> i64 {
        self.latest[task as usize]
    }

    /// Slack = latest - earliest.
    #[inline]
    pub fn slack(&self, task: TaskIndex) -> i64 {
        self.latest(task) - self.earliest(task)
    }

    pub fn is_critical(&self, task: TaskIndex) -> bool {
        self.slack(task) == 0
    }

    /// Earliest date of the sink, i.e. the project length.
    pub fn project_duration(&self) -> i64 {
        self.project_duration
    }

    pub fn len(&self) -> usize {
        self.earliest.len()
    }

    pub fn is_empty(&self) -> bool {
        self.earliest.is_empty()
    }
}
