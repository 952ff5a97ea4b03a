//! Pin resolution.
//!
//! Pins are validated and committed in input order before any greedy
//! placement. A pin either lands exactly where it asks or its course is
//! reported and left out of the greedy passes. Pins naming an unknown
//! course, or a course that already went through pin resolution, are
//! dropped without a diagnostic. A rejected pin also settles its course,
//! so a later pin for the same course is not tried.
//! With duplicated course ids, pins resolve to the last course carrying
//! the id.

use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use super::occupancy::Occupancy;
use super::request::ScheduleRequest;
use crate::models::{Assignment, Channel, Course, Diagnostic, Pin, ReasonCode};

/// Outcome of pin resolution.
#[derive(Debug, Default)]
pub(crate) struct PinResolution {
    pub assignments: Vec<Assignment>,
    pub diagnostics: Vec<Diagnostic>,
    /// Course indices that are final after this stage.
    pub settled: HashSet<usize>,
}

/// Resolves every pin against `occupancy`, committing the accepted ones.
pub(crate) fn resolve_pins(request: &ScheduleRequest, occupancy: &mut Occupancy) -> PinResolution {
    let mut course_index: HashMap<&str, usize> = HashMap::new();
    for (idx, course) in request.courses.iter().enumerate() {
        course_index.insert(course.id.as_str(), idx);
    }

    let mut resolution = PinResolution::default();
    for pin in &request.pins {
        let Some(&idx) = course_index.get(pin.course_id.trim()) else {
            warn!(course = %pin.course_id, "pin dropped: unknown course id");
            continue;
        };
        if !resolution.settled.insert(idx) {
            warn!(course = %pin.course_id, "pin dropped: course already resolved");
            continue;
        }

        let course = &request.courses[idx];
        match try_pin(request, occupancy, course, pin) {
            Ok(assignment) => {
                debug!(
                    course = %course.id,
                    day = assignment.day,
                    start = assignment.start,
                    room = %assignment.room,
                    "pin committed"
                );
                resolution.assignments.push(assignment);
            }
            Err(diagnostic) => {
                debug!(course = %course.id, reason = %diagnostic.reason, "pin rejected");
                resolution.diagnostics.push(diagnostic);
            }
        }
    }
    resolution
}

fn try_pin(
    request: &ScheduleRequest,
    occupancy: &mut Occupancy,
    course: &Course,
    pin: &Pin,
) -> Result<Assignment, Diagnostic> {
    let reject = |reason: ReasonCode, message: String| Diagnostic::new(&course.id, reason, message);
    let (day, start) = (pin.day, pin.start);
    let spd = request.week.slots_per_day;

    let bounds = (day < request.week.days)
        .then(|| request.day_windows.bounds(day, spd))
        .flatten();
    let len = match (bounds, course.slot_len()) {
        (Some(b), Some(len)) if b.contains_run(start, len) => len,
        (Some(b), _) => {
            return Err(reject(
                ReasonCode::WindowViolation,
                format!(
                    "pinned slots {start}+{} fall outside {} window {}-{}",
                    course.duration,
                    request.week.day_label(day),
                    b.first,
                    b.last
                ),
            ))
        }
        (None, _) => {
            return Err(reject(
                ReasonCode::WindowViolation,
                format!("day {day} has no usable window"),
            ))
        }
    };

    if request
        .availability
        .any_blocked(&course.instructor, day, start, len)
    {
        return Err(reject(
            ReasonCode::InstructorUnavailable,
            format!("{} is unavailable in the pinned slots", course.instructor),
        ));
    }

    if let Some(reason) = occupancy.overlap_conflict(course, day, start, len, &request.settings) {
        let message = match reason {
            ReasonCode::InstructorOverlap => format!("{} already teaches then", course.instructor),
            _ => format!("class-year {} already attends a course then", course.class_year),
        };
        return Err(reject(reason, message));
    }

    if course.online || pin.channel == Channel::Online {
        if !occupancy.online_fits(day, start, len, request.settings.online_cap) {
            return Err(reject(
                ReasonCode::OnlineCapacityExceeded,
                format!("online cap {} reached", request.settings.online_cap),
            ));
        }
        occupancy.commit_online(course, day, start, len);
        return Ok(Assignment::online(&course.id, day, start, len).pinned());
    }

    let Some(room_id) = pin.room.as_deref().filter(|r| !r.is_empty()) else {
        return Err(reject(
            ReasonCode::ChannelNotSpecified,
            "room-based pin without a room".to_string(),
        ));
    };
    let Some(room) = request.rooms.iter().position(|r| r.id == room_id) else {
        return Err(reject(
            ReasonCode::RoomNotFound,
            format!("room not found ({room_id})"),
        ));
    };
    if !occupancy.room_fits(room, day, start, len, request.settings.max_per_room) {
        return Err(reject(
            ReasonCode::RoomCapacityExceeded,
            format!("{room_id} is full in the pinned slots"),
        ));
    }
    occupancy.commit_room(course, room, day, start, len);
    Ok(Assignment::in_room(&course.id, day, start, len, room_id).pinned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Availability, ConstraintSettings, DayWindow, Room, WeekGrid};

    fn course(id: &str, instructor: &str, year: u8, duration: i32) -> Course {
        Course::new(id)
            .with_instructor(instructor)
            .with_class_year(year)
            .with_duration(duration)
    }

    fn request(courses: Vec<Course>, pins: Vec<Pin>) -> ScheduleRequest {
        let mut req = ScheduleRequest::new(
            WeekGrid::new(2, 6),
            courses,
            vec![Room::new("R1"), Room::new("R2")],
        );
        req.pins = pins;
        req
    }

    fn resolve(req: &ScheduleRequest) -> (PinResolution, Occupancy) {
        let mut occ = Occupancy::new(req.week.days, req.rooms.len(), req.week.slots_per_day);
        let res = resolve_pins(req, &mut occ);
        (res, occ)
    }

    fn only_reason(res: &PinResolution) -> ReasonCode {
        assert!(res.assignments.is_empty());
        assert_eq!(res.diagnostics.len(), 1);
        res.diagnostics[0].reason
    }

    #[test]
    fn test_room_pin_committed_verbatim() {
        let req = request(
            vec![course("X", "Hoca_A", 1, 2)],
            vec![Pin::in_room("X", 1, 3, "R2")],
        );
        let (res, occ) = resolve(&req);

        assert_eq!(
            res.assignments,
            vec![Assignment::in_room("X", 1, 3, 2, "R2").pinned()]
        );
        assert!(res.diagnostics.is_empty());
        assert!(res.settled.contains(&0));
        assert_eq!(occ.room_load(1, 1, 3), 1);
        assert_eq!(occ.room_load(1, 1, 4), 1);
        assert!(occ.instructor_busy("Hoca_A", 1, 4, 1));
    }

    #[test]
    fn test_online_course_ignores_room_channel() {
        let req = request(
            vec![course("X", "Hoca_A", 1, 1).online()],
            vec![Pin::in_room("X", 0, 0, "R1")],
        );
        let (res, occ) = resolve(&req);
        assert_eq!(res.assignments[0].channel, Channel::Online);
        assert_eq!(res.assignments[0].room, crate::models::ONLINE_ROOM);
        assert_eq!(occ.online_load(0, 0), 1);
        assert_eq!(occ.room_load(0, 0, 0), 0);
    }

    #[test]
    fn test_window_violation() {
        let mut req = request(
            vec![course("X", "Hoca_A", 1, 2)],
            vec![Pin::in_room("X", 0, 1, "R1")],
        );
        req.day_windows.set(0, DayWindow::new(2, 3));
        let (res, _) = resolve(&req);
        assert_eq!(only_reason(&res), ReasonCode::WindowViolation);
        assert!(res.diagnostics[0].message.contains("2-4"));
        // Rejected pins are final
        assert!(res.settled.contains(&0));
    }

    #[test]
    fn test_window_violation_past_end_of_day() {
        let req = request(
            vec![course("X", "Hoca_A", 1, 2)],
            vec![Pin::in_room("X", 0, 5, "R1")],
        );
        let (res, _) = resolve(&req);
        assert_eq!(only_reason(&res), ReasonCode::WindowViolation);
    }

    #[test]
    fn test_window_violation_for_day_outside_week() {
        let req = request(
            vec![course("X", "Hoca_A", 1, 1)],
            vec![Pin::in_room("X", 7, 0, "R1")],
        );
        let (res, _) = resolve(&req);
        assert_eq!(only_reason(&res), ReasonCode::WindowViolation);
    }

    #[test]
    fn test_window_violation_for_zero_duration() {
        let req = request(
            vec![course("X", "Hoca_A", 1, 0)],
            vec![Pin::in_room("X", 0, 0, "R1")],
        );
        let (res, _) = resolve(&req);
        assert_eq!(only_reason(&res), ReasonCode::WindowViolation);
    }

    #[test]
    fn test_instructor_unavailable() {
        let mut req = request(
            vec![course("X", "Hoca_A", 1, 2)],
            vec![Pin::in_room("X", 0, 0, "R1")],
        );
        req.availability = Availability::new().with_blocked("Hoca_A", 0, 1);
        let (res, _) = resolve(&req);
        assert_eq!(only_reason(&res), ReasonCode::InstructorUnavailable);
    }

    #[test]
    fn test_instructor_and_class_overlap() {
        let req = request(
            vec![
                course("X", "Hoca_A", 1, 2),
                course("Y", "Hoca_A", 2, 1),
                course("Z", "Hoca_B", 1, 1),
            ],
            vec![
                Pin::in_room("X", 0, 0, "R1"),
                Pin::in_room("Y", 0, 1, "R2"),
                Pin::in_room("Z", 0, 0, "R2"),
            ],
        );
        let (res, _) = resolve(&req);
        assert_eq!(res.assignments.len(), 1);
        assert_eq!(res.diagnostics[0].course_id, "Y");
        assert_eq!(res.diagnostics[0].reason, ReasonCode::InstructorOverlap);
        assert_eq!(res.diagnostics[1].course_id, "Z");
        assert_eq!(res.diagnostics[1].reason, ReasonCode::ClassOverlap);
    }

    #[test]
    fn test_overlap_not_enforced() {
        let mut req = request(
            vec![course("X", "Hoca_A", 1, 1), course("Y", "Hoca_A", 1, 1)],
            vec![Pin::in_room("X", 0, 0, "R1"), Pin::in_room("Y", 0, 0, "R2")],
        );
        req.settings = ConstraintSettings::default()
            .with_instructor_no_overlap(false)
            .with_class_no_overlap(false);
        let (res, _) = resolve(&req);
        assert_eq!(res.assignments.len(), 2);
    }

    #[test]
    fn test_online_capacity_exceeded() {
        let mut req = request(
            vec![course("X", "Hoca_A", 1, 1), course("Y", "Hoca_B", 2, 1)],
            vec![Pin::online("X", 0, 0), Pin::online("Y", 0, 0)],
        );
        req.settings = ConstraintSettings::default().with_online_cap(1);
        let (res, _) = resolve(&req);
        assert_eq!(res.assignments.len(), 1);
        assert_eq!(res.diagnostics[0].reason, ReasonCode::OnlineCapacityExceeded);
    }

    #[test]
    fn test_channel_not_specified() {
        let mut pin = Pin::in_room("X", 0, 0, "");
        let req = request(vec![course("X", "Hoca_A", 1, 1)], vec![pin.clone()]);
        let (res, _) = resolve(&req);
        assert_eq!(only_reason(&res), ReasonCode::ChannelNotSpecified);

        pin.room = None;
        let req = request(vec![course("X", "Hoca_A", 1, 1)], vec![pin]);
        let (res, _) = resolve(&req);
        assert_eq!(only_reason(&res), ReasonCode::ChannelNotSpecified);
    }

    #[test]
    fn test_room_not_found() {
        let req = request(
            vec![course("X", "Hoca_A", 1, 1)],
            vec![Pin::in_room("X", 0, 0, "R9")],
        );
        let (res, _) = resolve(&req);
        assert_eq!(only_reason(&res), ReasonCode::RoomNotFound);
        assert!(res.diagnostics[0].message.contains("R9"));
    }

    #[test]
    fn test_room_capacity_exceeded() {
        let req = request(
            vec![course("X", "Hoca_A", 1, 2), course("Y", "Hoca_B", 2, 1)],
            vec![Pin::in_room("X", 0, 0, "R1"), Pin::in_room("Y", 0, 1, "R1")],
        );
        let (res, _) = resolve(&req);
        assert_eq!(res.assignments.len(), 1);
        assert_eq!(res.diagnostics[0].reason, ReasonCode::RoomCapacityExceeded);
    }

    #[test]
    fn test_unknown_and_duplicate_pins_dropped_silently() {
        let req = request(
            vec![course("X", "Hoca_A", 1, 1)],
            vec![
                Pin::in_room("NOPE", 0, 0, "R1"),
                Pin::in_room("X", 0, 0, "R1"),
                Pin::in_room("X", 1, 0, "R2"),
            ],
        );
        let (res, occ) = resolve(&req);
        assert_eq!(res.assignments.len(), 1);
        assert_eq!(res.assignments[0].day, 0);
        assert!(res.diagnostics.is_empty());
        assert_eq!(occ.room_load(1, 1, 0), 0);
    }

    #[test]
    fn test_rejected_course_not_repinned() {
        let req = request(
            vec![course("X", "Hoca_A", 1, 1)],
            vec![Pin::in_room("X", 0, 0, "R9"), Pin::in_room("X", 0, 0, "R1")],
        );
        let (res, _) = resolve(&req);
        assert_eq!(only_reason(&res), ReasonCode::RoomNotFound);
    }

    #[test]
    fn test_window_violation_for_start_near_usize_max() {
        let req = request(
            vec![course("X", "Hoca_A", 1, 2)],
            vec![Pin::in_room("X", 0, usize::MAX, "R1")],
        );
        let (res, occ) = resolve(&req);
        assert_eq!(only_reason(&res), ReasonCode::WindowViolation);
        assert!(res.settled.contains(&0));
        assert_eq!(occ.room_load(0, 0, 0), 0);
    }

    #[test]
    fn test_duplicate_course_id_pins_last_course() {
        let req = request(
            vec![course("X", "Hoca_A", 1, 1), course("X", "Hoca_B", 2, 1)],
            vec![Pin::in_room("X", 0, 0, "R1")],
        );
        let (res, occ) = resolve(&req);
        assert_eq!(res.assignments.len(), 1);
        assert!(res.settled.contains(&1));
        assert!(!res.settled.contains(&0));
        assert!(occ.instructor_busy("Hoca_B", 0, 0, 1));
        assert!(!occ.instructor_busy("Hoca_A", 0, 0, 1));
    }
}
