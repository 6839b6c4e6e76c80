//! End-to-end scheduling pipeline.

use rustc_hash::FxHashSet;
use std::collections::HashMap;
use thiserror::Error;

use crate::config::EngineConfig;
use crate::critical_path::{compute_dates, compute_slack, critical_paths, critical_tasks, Dates};
use crate::graph::{GraphError, TaskGraph};
use crate::models::{ScheduleResult, TaskRecord, Validation};
use crate::records::{parse_task_list, ParseError};
use crate::log_phases;
use crate::registry::TaskIndex;

/// Errors that can occur while scheduling a task list.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error(transparent)]
    Graph(#[from] GraphError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(
        "Graph is not schedulable (cycle: {has_cycle}, negative duration: {has_negative_duration})"
    )]
    NotSchedulable {
        has_cycle: bool,
        has_negative_duration: bool,
    },
    #[error("Day offset {0} is outside the calendar range")]
    DateOutOfRange(i64),
}

/// Build a graph from records and report its validation flags.
///
/// Boundaries are not synthesized, so this also answers for graphs that
/// have no entry or exit task.
pub fn validate_records(
    records: &[TaskRecord],
    config: &EngineConfig,
) -> Result<Validation, GraphError> {
    let mut graph = TaskGraph::build(records, config)?;
    graph.derive_successors();
    Ok(graph.validate())
}

/// A fully scheduled project: the bounded, ranked graph and everything
/// derived from it.
#[derive(Clone, Debug)]
pub struct Schedule {
    graph: TaskGraph,
    dates: Dates,
    slack: Vec<i64>,
    critical_paths: Vec<Vec<TaskIndex>>,
    max_rank: u32,
}

impl Schedule {
    /// Run every phase in order on a set of records.
    ///
    /// Structural failures (no entry, no exit, unresolved names) abort with
    /// the graph error; a cycle or negative duration stops before ranking
    /// with `NotSchedulable`.
    pub fn compute(records: &[TaskRecord], config: &EngineConfig) -> Result<Self, ScheduleError> {
        let mut graph = TaskGraph::build(records, config)?;
        graph.add_source()?;
        graph.add_sink()?;
        graph.derive_successors();

        let validation = graph.validate();
        if !validation.is_schedulable() {
            return Err(ScheduleError::NotSchedulable {
                has_cycle: validation.has_cycle,
                has_negative_duration: validation.has_negative_duration,
            });
        }

        let max_rank = graph.compute_ranks()?;
        let dates = compute_dates(&graph)?;
        let slack = compute_slack(&dates);
        let critical_paths = critical_paths(&graph, &dates)?;

        log_phases!(
            config.verbosity,
            "Scheduled {} tasks: duration {}, {} critical paths",
            graph.len(),
            dates.project_duration(),
            critical_paths.len()
        );
        Ok(Self {
            graph,
            dates,
            slack,
            critical_paths,
            max_rank,
        })
    }

    /// Parse a task list and schedule it.
    pub fn from_task_list(text: &str, config: &EngineConfig) -> Result<Self, ScheduleError> {
        let records = parse_task_list(text)?;
        Self::compute(&records, config)
    }

    pub fn graph(&self) -> &TaskGraph {
        &self.graph
    }

    pub fn dates(&self) -> &Dates {
        &self.dates
    }

    /// Slack indexed by task.
    pub fn slack(&self) -> &[i64] {
        &self.slack
    }

    pub fn critical_paths(&self) -> &[Vec<TaskIndex>] {
        &self.critical_paths
    }

    pub fn critical_tasks(&self) -> FxHashSet<TaskIndex> {
        critical_tasks(&self.dates)
    }

    /// Highest rank, i.e. the sink's rank.
    pub fn max_rank(&self) -> u32 {
        self.max_rank
    }

    pub fn project_duration(&self) -> i64 {
        self.dates.project_duration()
    }

    /// Name-keyed copy of the schedule for the host application.
    pub fn to_result(&self, config: &EngineConfig) -> Result<ScheduleResult, ScheduleError> {
        let graph = &self.graph;

        let start_dates = match config.project_start {
            Some(start) => self
                .calendar(start)?
                .into_iter()
                .map(|w| (graph.name_of(w.task).to_string(), w.earliest_start))
                .collect(),
            None => HashMap::new(),
        };

        Ok(ScheduleResult {
            source: graph
                .source()
                .map(|s| graph.name_of(s).to_string())
                .unwrap_or_default(),
            sink: graph
                .sink()
                .map(|s| graph.name_of(s).to_string())
                .unwrap_or_default(),
            ranks: by_name(graph, |t| {
                graph.task(t).and_then(|task| task.rank()).unwrap_or_default()
            }),
            earliest: by_name(graph, |t| self.dates.earliest(t)),
            latest: by_name(graph, |t| self.dates.latest(t)),
            slack: by_name(graph, |t| self.slack[t as usize]),
            critical_paths: self
                .critical_paths
                .iter()
                .map(|path| path.iter().map(|&t| graph.name_of(t).to_string()).collect())
                .collect(),
            project_duration: self.project_duration(),
            start_dates,
        })
    }
}

fn by_name<V>(graph: &TaskGraph, value: impl Fn(TaskIndex) -> V) -> HashMap<String, V> {
    graph
        .tasks()
        .iter()
        .map(|task| (task.name().to_string(), value(task.index())))
        .collect()
}
