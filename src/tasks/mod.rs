//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Stats reset: snapshots and zeroes every stage's counters at a fixed interval

mod stats_reset;

pub use stats_reset::{log_reporter, spawn_stats_reset_task, StatsReporter};
