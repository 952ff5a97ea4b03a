//! First-fit greedy placement.
//!
//! # Algorithm
//!
//! For each course, in the order given:
//! 1. Scan days ascending, then start slots ascending inside the day window.
//! 2. Skip a start if any covered slot is instructor-blocked or (when
//!    enforced) the instructor or class-year is already busy.
//! 3. Room pass: take the first room, in input order, with spare capacity
//!    for the whole run. Online pass: check the shared online cap.
//! 4. Commit the first feasible candidate and move on. No backtracking.
//!
//! # Complexity
//! O(n * d * s * r) where n=courses, d=days, s=slots per day, r=rooms.

use tracing::debug;

use super::occupancy::Occupancy;
use super::request::ScheduleRequest;
use crate::models::{Assignment, Channel, Course, Diagnostic};

/// Placements and failures of one pass.
#[derive(Debug, Default)]
pub(crate) struct PassOutcome {
    pub assignments: Vec<Assignment>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Places `order` (indices into `request.courses`) on `channel`.
pub(crate) fn place_pass(
    request: &ScheduleRequest,
    order: &[usize],
    channel: Channel,
    occupancy: &mut Occupancy,
) -> PassOutcome {
    let mut outcome = PassOutcome::default();
    for &idx in order {
        let course = &request.courses[idx];
        match place_course(request, course, channel, occupancy) {
            Some(assignment) => {
                debug!(
                    course = %course.id,
                    day = assignment.day,
                    start = assignment.start,
                    room = %assignment.room,
                    "course placed"
                );
                outcome.assignments.push(assignment);
            }
            None => {
                debug!(course = %course.id, %channel, "course unplaced");
                outcome
                    .diagnostics
                    .push(Diagnostic::no_feasible_slot(&course.id, channel));
            }
        }
    }
    outcome
}

fn place_course(
    request: &ScheduleRequest,
    course: &Course,
    channel: Channel,
    occupancy: &mut Occupancy,
) -> Option<Assignment> {
    let len = course.slot_len()?;
    let settings = &request.settings;
    let spd = request.week.slots_per_day;

    for day in 0..request.week.days {
        let Some(bounds) = request.day_windows.bounds(day, spd) else {
            continue;
        };
        for start in bounds.starts_for(len) {
            if request
                .availability
                .any_blocked(&course.instructor, day, start, len)
            {
                continue;
            }
            if occupancy
                .overlap_conflict(course, day, start, len, settings)
                .is_some()
            {
                continue;
            }
            match channel {
                Channel::FaceToFace => {
                    let Some(room) =
                        occupancy.first_free_room(day, start, len, settings.max_per_room)
                    else {
                        continue;
                    };
                    occupancy.commit_room(course, room, day, start, len);
                    return Some(Assignment::in_room(
                        &course.id,
                        day,
                        start,
                        len,
                        &request.rooms[room].id,
                    ));
                }
                Channel::Online => {
                    if !occupancy.online_fits(day, start, len, settings.online_cap) {
                        continue;
                    }
                    occupancy.commit_online(course, day, start, len);
                    return Some(Assignment::online(&course.id, day, start, len));
                }
            }
        }
    }
    None
}
