//! Core data types exchanged with the host application.

use chrono::NaiveDate;
use pyo3::prelude::*;
use std::collections::HashMap;

// Note: We use std HashMap here for PyO3 interface compatibility

/// One parsed line of a task list: a task, its duration and its predecessors.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaskRecord {
    #[pyo3(get, set)]
    pub name: String,
    #[pyo3(get, set)]
    pub duration: i64,
    #[pyo3(get, set)]
    pub predecessors: Vec<String>,
}

impl TaskRecord {
    pub fn new(name: impl Into<String>, duration: i64, predecessors: &[&str]) -> Self {
        Self {
            name: name.into(),
            duration,
            predecessors: predecessors.iter().map(|p| p.to_string()).collect(),
        }
    }
}

#[pymethods]
impl TaskRecord {
    #[new]
    #[pyo3(signature = (name, duration, predecessors=None))]
    fn py_new(name: String, duration: i64, predecessors: Option<Vec<String>>) -> Self {
        Self {
            name,
            duration,
            predecessors: predecessors.unwrap_or_default(),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "TaskRecord(name={:?}, duration={}, predecessors={:?})",
            self.name, self.duration, self.predecessors
        )
    }
}

/// Advisory flags a caller must check before ranking or dating a graph.
#[pyclass]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Validation {
    #[pyo3(get)]
    pub has_cycle: bool,
    #[pyo3(get)]
    pub has_negative_duration: bool,
}

#[pymethods]
impl Validation {
    /// Acyclic with no negative duration.
    pub fn is_schedulable(&self) -> bool {
        !self.has_cycle && !self.has_negative_duration
    }

    fn __repr__(&self) -> String {
        format!(
            "Validation(has_cycle={}, has_negative_duration={})",
            self.has_cycle, self.has_negative_duration
        )
    }
}

/// Name-keyed view of a computed schedule.
#[pyclass]
#[derive(Clone, Debug, Default)]
pub struct ScheduleResult {
    #[pyo3(get)]
    pub source: String,
    #[pyo3(get)]
    pub sink: String,
    #[pyo3(get)]
    pub ranks: HashMap<String, u32>,
    #[pyo3(get)]
    pub earliest: HashMap<String, i64>,
    #[pyo3(get)]
    pub latest: HashMap<String, i64>,
    #[pyo3(get)]
    pub slack: HashMap<String, i64>,
    #[pyo3(get)]
    pub critical_paths: Vec<Vec<String>>,
    #[pyo3(get)]
    pub project_duration: i64,
    /// Earliest start as a calendar date; empty unless a project start was configured.
    #[pyo3(get)]
    pub start_dates: HashMap<String, NaiveDate>,
}

#[pymethods]
impl ScheduleResult {
    fn __repr__(&self) -> String {
        format!(
            "ScheduleResult(tasks={}, project_duration={}, critical_paths={})",
            self.earliest.len(),
            self.project_duration,
            self.critical_paths.len()
        )
    }
}
