//! Static placement-opportunity count per course.
//!
//! Counts the (day, start) positions where a course could begin using
//! only day windows and the instructor's blocked slots. Other courses and
//! current occupancy are ignored, so the count is an upper bound used for
//! ranking only.

use crate::dispatching::SchedulingContext;
use crate::models::{Availability, Course, DayWindows};

/// Number of statically feasible (day, start) positions for a course.
///
/// Returns 0 for non-positive durations.
pub fn feasible_starts(
    course: &Course,
    windows: &DayWindows,
    availability: &Availability,
    days: usize,
    slots_per_day: usize,
) -> usize {
    let Some(len) = course.slot_len() else {
        return 0;
    };
    (0..days)
        .filter_map(|day| windows.bounds(day, slots_per_day).map(|b| (day, b)))
        .map(|(day, bounds)| {
            bounds
                .starts_for(len)
                .filter(|&start| !availability.any_blocked(&course.instructor, day, start, len))
                .count()
        })
        .sum()
}

/// Builds the ordering context for the given course indices.
pub fn scarcity_context(
    courses: &[Course],
    candidates: &[usize],
    windows: &DayWindows,
    availability: &Availability,
    days: usize,
    slots_per_day: usize,
) -> SchedulingContext {
    candidates
        .iter()
        .map(|&idx| &courses[idx])
        .fold(SchedulingContext::new(), |ctx, course| {
            let count = feasible_starts(course, windows, availability, days, slots_per_day);
            ctx.with_feasible_starts(course.id.clone(), count)
        })
}
