//! Engine error types.
//!
//! Only structurally invalid configuration is an error. Infeasible
//! placements are reported as diagnostics inside the timetable.

use thiserror::Error;

/// Caller-side contract violations that abort a run.
#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("slots per day must be at least 1")]
    ZeroSlotsPerDay,

    #[error("day window configured for day {day}, but the week has {days} day(s)")]
    DayWindowOutOfRange { day: usize, days: usize },

    #[error("invalid schedule request: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type SchedulerResult<T> = Result<T, SchedulerError>;
