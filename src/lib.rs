//! Weekly course timetabling for the U-Engine ecosystem.
//!
//! Assigns courses to (day, slot, channel, room) tuples under room and
//! online capacity, instructor availability, overlap and day-window
//! constraints, after honoring caller-fixed pins.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Course`, `Room`, `Pin`, `DayWindow`,
//!   `Availability`, `ConstraintSettings`, `Assignment`, `Timetable`
//! - **`dispatching`**: Ordering rules behind the placement strategies
//! - **`scheduler`**: Pin resolver, scarcity estimator, first-fit placer,
//!   grid assembly and KPIs
//! - **`validation`**: Pre-flight input checks (duplicate IDs, stray pins)
//!
//! # Architecture
//!
//! The engine is a pure function of one [`scheduler::ScheduleRequest`]:
//! no I/O, no shared state, single-threaded. Persistence, editing and
//! rendering are left to callers, which exchange the serde-serializable
//! request and [`models::Timetable`] values with it.

pub mod dispatching;
pub mod error;
pub mod models;
pub mod scheduler;
pub mod validation;

pub use error::{SchedulerError, SchedulerResult};
