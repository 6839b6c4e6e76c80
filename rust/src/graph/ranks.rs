//! Rank leveling by repeated frontier removal (Kahn layering).

use rustc_hash::FxHashSet;

use crate::registry::TaskIndex;
use crate::{log_debug, log_phases};

use super::{GraphError, TaskGraph};

impl TaskGraph {
    /// Assign every task its topological layer and return the highest rank.
    ///
    /// Works on a scratch copy of the predecessor sets; the graph's own sets
    /// are never touched. Each round takes every remaining task with no
    /// remaining predecessor as the frontier, gives it the round number, and
    /// strikes it from the scratch sets.
    ///
    /// If tasks remain but no frontier forms the graph is cyclic and
    /// `CircularDependency` is returned with no rank written.
    pub fn compute_ranks(&mut self) -> Result<u32, GraphError> {
        let mut scratch: Vec<FxHashSet<TaskIndex>> = self
            .tasks()
            .iter()
            .map(|task| task.predecessors().clone())
            .collect();
        let mut remaining: Vec<TaskIndex> = (0..self.len() as TaskIndex).collect();
        let mut ranks = vec![0u32; self.len()];
        let mut level: u32 = 0;

        while !remaining.is_empty() {
            let (frontier, rest): (Vec<TaskIndex>, Vec<TaskIndex>) = remaining
                .iter()
                .partition(|&&task| scratch[task as usize].is_empty());
            if frontier.is_empty() {
                return Err(GraphError::CircularDependency);
            }

            log_debug!(
                self.verbosity(),
                "  Rank {}: {:?}",
                level,
                frontier
                    .iter()
                    .map(|&t| self.name_of(t))
                    .collect::<Vec<_>>()
            );
            for &task in &frontier {
                ranks[task as usize] = level;
            }
            for &task in &rest {
                let preds = &mut scratch[task as usize];
                for done in &frontier {
                    preds.remove(done);
                }
            }

            remaining = rest;
            level += 1;
        }

        for (task, rank) in self.tasks_mut().iter_mut().zip(ranks) {
            task.rank = Some(rank);
        }

        let max_rank = level.saturating_sub(1);
        log_phases!(self.verbosity(), "Computed ranks: {} levels", level);
        Ok(max_rank)
    }

    /// Tasks grouped by rank, lowest rank first, indices ascending within a level.
    ///
    /// Fails with `Unranked` if ranks have not been computed.
    pub fn levels(&self) -> Result<Vec<Vec<TaskIndex>>, GraphError> {
        let mut levels: Vec<Vec<TaskIndex>> = Vec::new();
        for task in self.tasks() {
            let rank = task
                .rank()
                .ok_or_else(|| GraphError::Unranked(task.name().to_string()))?
                as usize;
            if levels.len() <= rank {
                levels.resize_with(rank + 1, Vec::new);
            }
            levels[rank].push(task.index());
        }
        Ok(levels)
    }

    /// Task indices ordered by rank, so every predecessor precedes its successors.
    pub(crate) fn rank_order(&self) -> Result<Vec<TaskIndex>, GraphError> {
        Ok(self.levels()?.into_iter().flatten().collect())
    }
}
