//! Configuration types for the scheduling engine.

use chrono::NaiveDate;
use pyo3::prelude::*;

use crate::graph::GraphError;

/// How to treat a predecessor name that never gets its own record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnresolvedPolicy {
    /// Fail graph construction with `UnresolvedReference`.
    Reject,
    /// Treat the stub as a zero-duration task.
    ZeroDuration,
}

impl UnresolvedPolicy {
    /// Parse the policy name used in `EngineConfig::unresolved_references`.
    pub fn parse(name: &str) -> Result<Self, GraphError> {
        match name {
            "reject" => Ok(Self::Reject),
            "zero" => Ok(Self::ZeroDuration),
            other => Err(GraphError::UnknownPolicy(other.to_string())),
        }
    }
}

/// Configuration for graph construction and scheduling.
#[pyclass]
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Verbosity level: 0=silent, 1=phases, 2=checks, 3=debug.
    #[pyo3(get, set)]
    pub verbosity: u8,
    /// Policy for undefined predecessors: "reject" or "zero"
    #[pyo3(get, set)]
    pub unresolved_references: String,
    /// Calendar date of day 0, used to report dates instead of offsets
    #[pyo3(get, set)]
    pub project_start: Option<NaiveDate>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            verbosity: 0,
            unresolved_references: "reject".to_string(),
            project_start: None,
        }
    }
}

impl EngineConfig {
    pub fn unresolved_policy(&self) -> Result<UnresolvedPolicy, GraphError> {
        UnresolvedPolicy::parse(&self.unresolved_references)
    }
}

#[pymethods]
impl EngineConfig {
    #[new]
    #[pyo3(signature = (verbosity=None, unresolved_references=None, project_start=None))]
    fn new(
        verbosity: Option<u8>,
        unresolved_references: Option<String>,
        project_start: Option<NaiveDate>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            verbosity: verbosity.unwrap_or(defaults.verbosity),
            unresolved_references: unresolved_references
                .unwrap_or(defaults.unresolved_references),
            project_start,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "EngineConfig(verbosity={}, unresolved_references={:?}, project_start={:?})",
            self.verbosity, self.unresolved_references, self.project_start
        )
    }
}
