//! Critical path (CPM/PERT) scheduling engine.
//!
//! Builds a task dependency graph from records, bounds it with a synthetic
//! source and sink, validates it, levels it by rank and computes earliest
//! and latest dates, slack and every critical path.

// Allow clippy warning triggered by PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use pyo3::prelude::*;

mod calendar;
mod config;
pub mod critical_path;
pub mod graph;
pub mod logging;
mod models;
pub mod records;
mod registry;
mod schedule;

pub use calendar::TaskWindow;
pub use config::{EngineConfig, UnresolvedPolicy};
pub use critical_path::{compute_dates, compute_slack, critical_paths, critical_tasks, Dates};
pub use graph::{GraphError, Task, TaskGraph, TaskKind, SOURCE_NAME};
pub use models::{ScheduleResult, TaskRecord, Validation};
pub use records::{parse_task_list, ParseError};
pub use registry::{TaskIndex, TaskRegistry};
pub use schedule::{validate_records, Schedule, ScheduleError};

fn to_py_err(err: impl std::fmt::Display) -> PyErr {
    pyo3::exceptions::PyValueError::new_err(err.to_string())
}

/// Parse a task list (`<name> <duration> [<predecessor> ...]` per line).
///
/// # Raises
/// * ValueError on a missing or non-integer duration
#[pyfunction(name = "parse_task_list")]
fn py_parse_task_list(text: &str) -> PyResult<Vec<TaskRecord>> {
    parse_task_list(text).map_err(to_py_err)
}

/// Report whether a task set has a cycle or a negative duration.
///
/// # Raises
/// * ValueError if a predecessor is never defined (under the "reject" policy)
#[pyfunction]
#[pyo3(signature = (records, config=None))]
fn validate_tasks(records: Vec<TaskRecord>, config: Option<EngineConfig>) -> PyResult<Validation> {
    let config = config.unwrap_or_default();
    validate_records(&records, &config).map_err(to_py_err)
}

/// Compute the full schedule: ranks, earliest/latest dates, slack and
/// critical paths, keyed by task name.
///
/// # Raises
/// * ValueError if no source or sink can be placed, a predecessor is
///   undefined, or the graph has a cycle or a negative duration
#[pyfunction]
#[pyo3(signature = (records, config=None))]
fn schedule_tasks(
    records: Vec<TaskRecord>,
    config: Option<EngineConfig>,
) -> PyResult<ScheduleResult> {
    let config = config.unwrap_or_default();
    Schedule::compute(&records, &config)
        .and_then(|schedule| schedule.to_result(&config))
        .map_err(to_py_err)
}

/// The pert.rust Python module.
#[pymodule]
fn rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Data types
    m.add_class::<TaskRecord>()?;
    m.add_class::<Validation>()?;
    m.add_class::<ScheduleResult>()?;

    // Config types
    m.add_class::<EngineConfig>()?;

    // Algorithms
    m.add_function(wrap_pyfunction!(py_parse_task_list, m)?)?;
    m.add_function(wrap_pyfunction!(validate_tasks, m)?)?;
    m.add_function(wrap_pyfunction!(schedule_tasks, m)?)?;

    Ok(())
}
