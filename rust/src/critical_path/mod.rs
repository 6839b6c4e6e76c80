//! Critical path method on a bounded, ranked task graph.
//!
//! `compute_dates` runs the forward and backward passes; `compute_slack`
//! and `critical_paths` derive float and the zero-float source-to-sink paths.

mod analysis;
mod dates;
mod types;

pub use analysis::{compute_slack, critical_paths, critical_tasks};
pub use dates::compute_dates;
pub use types::Dates;
