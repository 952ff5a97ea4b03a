//! Timetabling domain models.
//!
//! Provides the input entities a run consumes and the records it
//! produces. Entities are plain data; the placement logic lives in
//! [`crate::scheduler`].
//!
//! # Domain Mappings
//!
//! | u-timetable | Faculty timetable | Training center |
//! |-------------|-------------------|-----------------|
//! | Course | Lecture | Session |
//! | Room | Classroom | Training room |
//! | Pin | Fixed lecture slot | Booked session |
//! | Timetable | Weekly program | Weekly plan |

mod calendar;
mod constraint;
mod course;
mod pin;
mod room;
mod schedule;

pub use calendar::{Availability, DayWindow, DayWindows, SlotKey, WeekGrid, WindowBounds};
pub use constraint::{ConstraintSettings, Strategy};
pub use course::Course;
pub use pin::Pin;
pub use room::Room;
pub use schedule::{
    Assignment, CellKey, Channel, Diagnostic, ReasonCode, Timetable, TimetableGrid, TimetableRow,
    ONLINE_ROOM,
};
