//! Calendar view of a schedule.
//!
//! Dates are computed as whole-day offsets from day 0; this maps them onto
//! calendar dates from a given project start. No working-day calendar is
//! applied: every day counts.

use chrono::{Duration, NaiveDate};

use crate::registry::TaskIndex;
use crate::schedule::{Schedule, ScheduleError};

/// Earliest and latest window of one task, as calendar dates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaskWindow {
    pub task: TaskIndex,
    pub earliest_start: NaiveDate,
    pub earliest_finish: NaiveDate,
    pub latest_start: NaiveDate,
    pub latest_finish: NaiveDate,
}

fn offset(start: NaiveDate, days: i64) -> Result<NaiveDate, ScheduleError> {
    Duration::try_days(days)
        .and_then(|delta| start.checked_add_signed(delta))
        .ok_or(ScheduleError::DateOutOfRange(days))
}

impl Schedule {
    /// Calendar windows for every task, in index order.
    pub fn calendar(&self, start: NaiveDate) -> Result<Vec<TaskWindow>, ScheduleError> {
        let dates = self.dates();
        self.graph()
            .tasks()
            .iter()
            .map(|task| {
                let t = task.index();
                let duration = task.duration();
                Ok(TaskWindow {
                    task: t,
                    earliest_start: offset(start, dates.earliest(t))?,
                    earliest_finish: offset(start, dates.earliest(t) + duration)?,
                    latest_start: offset(start, dates.latest(t))?,
                    latest_finish: offset(start, dates.latest(t) + duration)?,
                })
            })
            .collect()
    }
}
