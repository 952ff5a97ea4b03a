//! Course model.
//!
//! A course is the unit being placed: one instructor, one class-year,
//! a contiguous run of `duration` slots on a single day.

use serde::{Deserialize, Serialize};

/// A course to be placed in the weekly grid.
///
/// Immutable once a run begins. `duration` is signed so that malformed
/// input (zero or negative) can be represented; such courses are never
/// placeable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Unique course identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Instructor name (key into the availability index).
    pub instructor: String,
    /// Class-year of the attending cohort (1-4).
    pub class_year: u8,
    /// Number of consecutive slots the course occupies.
    pub duration: i32,
    /// Whether the course asks for consecutive slots in the same room.
    ///
    /// Carried for collaborators; placement does not read it.
    pub consecutive: bool,
    /// Whether the course is delivered online.
    pub online: bool,
}

impl Course {
    /// Creates a one-slot, first-year, room-based course.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            instructor: String::new(),
            class_year: 1,
            duration: 1,
            consecutive: false,
            online: false,
        }
    }

    /// Sets the course name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the instructor.
    pub fn with_instructor(mut self, instructor: impl Into<String>) -> Self {
        self.instructor = instructor.into();
        self
    }

    /// Sets the class-year.
    pub fn with_class_year(mut self, class_year: u8) -> Self {
        self.class_year = class_year;
        self
    }

    /// Sets the duration in slots.
    pub fn with_duration(mut self, duration: i32) -> Self {
        self.duration = duration;
        self
    }

    /// Sets the consecutive-slots flag.
    pub fn with_consecutive(mut self, consecutive: bool) -> Self {
        self.consecutive = consecutive;
        self
    }

    /// Marks the course as online.
    pub fn online(mut self) -> Self {
        self.online = true;
        self
    }

    /// Duration as a slot count, `None` when non-positive.
    pub fn slot_len(&self) -> Option<usize> {
        usize::try_from(self.duration).ok().filter(|&len| len > 0)
    }

    /// Whether the course belongs to the graduating year.
    pub fn is_final_year(&self) -> bool {
        self.class_year == 4
    }
}
