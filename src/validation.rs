//! Input validation for timetabling requests.
//!
//! The engine tolerates malformed input: unknown or duplicate pins are
//! dropped silently and bad durations just leave a course unplaced.
//! Callers that want to see those cases run this check first. It never
//! changes what the engine does.
//!
//! Detects:
//! - Duplicate course and room IDs
//! - Pins naming unknown courses, unknown rooms or days outside the week
//! - Several pins for the same course
//! - Non-positive durations and class-years outside 1-4
//! - Blocked slots outside the week grid

use crate::models::Channel;
use crate::scheduler::ScheduleRequest;
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// A pin references a course that doesn't exist.
    UnknownPinCourse,
    /// More than one pin targets the same course.
    DuplicatePin,
    /// A pin references a room that doesn't exist.
    InvalidRoomReference,
    /// A pin or blocked slot lies outside the week grid.
    OutsideGrid,
    /// A course has a non-positive duration.
    InvalidDuration,
    /// A course has a class-year outside 1-4.
    InvalidClassYear,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a request before scheduling.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_request(request: &ScheduleRequest) -> ValidationResult {
    let mut errors = Vec::new();

    let mut room_ids = HashSet::new();
    for r in &request.rooms {
        if !room_ids.insert(r.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate room ID: {}", r.id),
            ));
        }
    }

    let mut course_ids = HashSet::new();
    for c in &request.courses {
        if !course_ids.insert(c.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate course ID: {}", c.id),
            ));
        }
        if c.duration <= 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidDuration,
                format!("Course '{}' has duration {}", c.id, c.duration),
            ));
        }
        if !(1..=4).contains(&c.class_year) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidClassYear,
                format!("Course '{}' has class-year {}", c.id, c.class_year),
            ));
        }
    }

    let mut pinned = HashSet::new();
    for (i, pin) in request.pins.iter().enumerate() {
        let id = pin.course_id.trim();
        if !course_ids.contains(id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownPinCourse,
                format!("Pin #{i} references unknown course '{id}'"),
            ));
        } else if !pinned.insert(id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicatePin,
                format!("Pin #{i} repeats course '{id}'"),
            ));
        }
        if pin.day >= request.week.days {
            errors.push(ValidationError::new(
                ValidationErrorKind::OutsideGrid,
                format!("Pin #{i} targets day {} of a {}-day week", pin.day, request.week.days),
            ));
        }
        if pin.channel == Channel::FaceToFace {
            if let Some(room) = pin.room.as_deref().filter(|r| !r.is_empty()) {
                if !room_ids.contains(room) {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::InvalidRoomReference,
                        format!("Pin #{i} references unknown room '{room}'"),
                    ));
                }
            }
        }
    }

    let mut outside: Vec<String> = Vec::new();
    for (instructor, slots) in request.availability.iter() {
        for key in slots {
            if !request.week.contains(*key) {
                outside.push(format!(
                    "Blocked slot (day {}, slot {}) of '{instructor}' is outside the week",
                    key.day, key.slot
                ));
            }
        }
    }
    // HashMap iteration order is arbitrary
    outside.sort();
    errors.extend(
        outside
            .into_iter()
            .map(|msg| ValidationError::new(ValidationErrorKind::OutsideGrid, msg)),
    );

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
