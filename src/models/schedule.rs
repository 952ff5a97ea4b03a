//! Timetable (solution) model.
//!
//! A timetable is the outcome of one run: the committed placements, a
//! diagnostic for every course that could not be placed, and the cell
//! lookup that rendering collaborators read.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Range;

use super::{Course, WeekGrid};

/// Room marker used for online placements and cells.
pub const ONLINE_ROOM: &str = "ONLINE";

/// Delivery channel of a placement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Channel {
    /// Room-based delivery.
    #[default]
    FaceToFace,
    /// Online delivery, limited by the shared online cap.
    Online,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FaceToFace => f.write_str("FaceToFace"),
            Self::Online => f.write_str("Online"),
        }
    }
}

/// A committed placement of one course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// Placed course.
    pub course_id: String,
    /// Day index.
    pub day: usize,
    /// First occupied slot.
    pub start: usize,
    /// Number of occupied slots (denormalized from the course).
    pub duration: usize,
    /// Delivery channel.
    pub channel: Channel,
    /// Room id, or [`ONLINE_ROOM`].
    pub room: String,
    /// Whether the placement came from a pin.
    pub pinned: bool,
}

impl Assignment {
    /// Creates a room-based assignment.
    pub fn in_room(
        course_id: impl Into<String>,
        day: usize,
        start: usize,
        duration: usize,
        room: impl Into<String>,
    ) -> Self {
        Self {
            course_id: course_id.into(),
            day,
            start,
            duration,
            channel: Channel::FaceToFace,
            room: room.into(),
            pinned: false,
        }
    }

    /// Creates an online assignment.
    pub fn online(course_id: impl Into<String>, day: usize, start: usize, duration: usize) -> Self {
        Self {
            course_id: course_id.into(),
            day,
            start,
            duration,
            channel: Channel::Online,
            room: ONLINE_ROOM.to_string(),
            pinned: false,
        }
    }

    /// Marks the assignment as coming from a pin.
    pub fn pinned(mut self) -> Self {
        self.pinned = true;
        self
    }

    /// Occupied slots, `[start, start + duration)`.
    #[inline]
    pub fn slots(&self) -> Range<usize> {
        self.start..self.start + self.duration
    }

    /// Last occupied slot.
    #[inline]
    pub fn last_slot(&self) -> usize {
        self.start + self.duration - 1
    }

    /// Whether the placement occupies (day, slot).
    pub fn covers(&self, day: usize, slot: usize) -> bool {
        self.day == day && self.slots().contains(&slot)
    }
}

/// Why a course ended up without a placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReasonCode {
    /// Pinned slot range falls outside the day window or the day.
    WindowViolation,
    /// Pinned range hits a slot the instructor blocked.
    InstructorUnavailable,
    /// Instructor already teaches in a pinned slot.
    InstructorOverlap,
    /// Class-year already attends a course in a pinned slot.
    ClassOverlap,
    /// Online cap already reached in a pinned slot.
    OnlineCapacityExceeded,
    /// Pinned room already at its per-slot cap.
    RoomCapacityExceeded,
    /// Pinned room id does not exist.
    RoomNotFound,
    /// Room-based pin without a room.
    ChannelNotSpecified,
    /// The greedy pass found no start (and room) on any day.
    NoFeasibleSlot { channel: Channel },
}

impl ReasonCode {
    /// Whether the reason is a pin rejection.
    pub fn is_pin_rejection(&self) -> bool {
        !matches!(self, Self::NoFeasibleSlot { .. })
    }

    /// Whether the failure belongs to the online channel.
    pub fn is_online_capacity_class(&self) -> bool {
        matches!(
            self,
            Self::OnlineCapacityExceeded
                | Self::NoFeasibleSlot {
                    channel: Channel::Online
                }
        )
    }
}

impl fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WindowViolation => f.write_str("WindowViolation"),
            Self::InstructorUnavailable => f.write_str("InstructorUnavailable"),
            Self::InstructorOverlap => f.write_str("InstructorOverlap"),
            Self::ClassOverlap => f.write_str("ClassOverlap"),
            Self::OnlineCapacityExceeded => f.write_str("OnlineCapacityExceeded"),
            Self::RoomCapacityExceeded => f.write_str("RoomCapacityExceeded"),
            Self::RoomNotFound => f.write_str("RoomNotFound"),
            Self::ChannelNotSpecified => f.write_str("ChannelNotSpecified"),
            Self::NoFeasibleSlot { channel } => write!(f, "NoFeasibleSlot({channel})"),
        }
    }
}

/// An unplaced course and the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Unplaced course.
    pub course_id: String,
    /// Machine-readable reason.
    pub reason: ReasonCode,
    /// Human-readable detail.
    pub message: String,
}

impl Diagnostic {
    /// Creates a diagnostic.
    pub fn new(
        course_id: impl Into<String>,
        reason: ReasonCode,
        message: impl Into<String>,
    ) -> Self {
        Self {
            course_id: course_id.into(),
            reason,
            message: message.into(),
        }
    }

    /// Creates a greedy-pass failure for the given channel.
    pub fn no_feasible_slot(course_id: impl Into<String>, channel: Channel) -> Self {
        let message = match channel {
            Channel::FaceToFace => "no free room/slot inside the day windows",
            Channel::Online => {
                "online capacity or overlap blocks every slot inside the day windows"
            }
        };
        Self::new(course_id, ReasonCode::NoFeasibleSlot { channel }, message)
    }
}

/// A (day, slot, channel, room-or-ONLINE) coordinate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellKey {
    pub day: usize,
    pub slot: usize,
    pub channel: Channel,
    pub room: String,
}

impl CellKey {
    /// Creates a cell key.
    pub fn new(day: usize, slot: usize, channel: Channel, room: impl Into<String>) -> Self {
        Self {
            day,
            slot,
            channel,
            room: room.into(),
        }
    }

    /// The online cell of (day, slot).
    pub fn online(day: usize, slot: usize) -> Self {
        Self::new(day, slot, Channel::Online, ONLINE_ROOM)
    }
}

/// Cell → course ids occupying it, in placement order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimetableGrid {
    cells: BTreeMap<CellKey, Vec<String>>,
}

impl TimetableGrid {
    /// Creates an empty grid.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a course in a cell.
    pub fn push(&mut self, key: CellKey, course_id: impl Into<String>) {
        self.cells.entry(key).or_default().push(course_id.into());
    }

    /// Course ids in a cell (empty if none).
    pub fn get(&self, key: &CellKey) -> &[String] {
        self.cells.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Occupied cells in (day, slot, channel, room) order.
    pub fn iter(&self) -> impl Iterator<Item = (&CellKey, &[String])> {
        self.cells.iter().map(|(k, v)| (k, v.as_slice()))
    }

    /// Number of occupied cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether no cell is occupied.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// One line of the flat day × slot × channel × room table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimetableRow {
    pub day: usize,
    pub day_label: String,
    pub slot: usize,
    pub slot_label: String,
    pub channel: Channel,
    pub room: String,
    pub course_ids: Vec<String>,
}

/// Result of one scheduling run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Timetable {
    /// Committed placements: pins first, then offline, then online.
    pub assignments: Vec<Assignment>,
    /// One entry per unplaced course.
    pub diagnostics: Vec<Diagnostic>,
    /// Cell lookup derived from `assignments`.
    #[serde(skip)]
    pub grid: TimetableGrid,
    /// Grid dimensions and labels the run used.
    pub week: WeekGrid,
    /// Room ids in input order.
    pub room_ids: Vec<String>,
}

impl Timetable {
    /// Finds the assignment of a course.
    pub fn assignment_for(&self, course_id: &str) -> Option<&Assignment> {
        self.assignments.iter().find(|a| a.course_id == course_id)
    }

    /// Finds the diagnostic of a course.
    pub fn diagnostic_for(&self, course_id: &str) -> Option<&Diagnostic> {
        self.diagnostics.iter().find(|d| d.course_id == course_id)
    }

    /// All assignments placed in a room.
    pub fn assignments_for_room(&self, room_id: &str) -> Vec<&Assignment> {
        self.assignments
            .iter()
            .filter(|a| a.room == room_id)
            .collect()
    }

    /// Whether every course was placed.
    pub fn is_complete(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Flattens the grid into rows: for each day and slot, every room in
    /// input order followed by the online cell.
    pub fn rows(&self) -> Vec<TimetableRow> {
        let mut rows = Vec::with_capacity(
            self.week.days * self.week.slots_per_day * (self.room_ids.len() + 1),
        );
        for day in 0..self.week.days {
            let day_label = self.week.day_label(day);
            for slot in 0..self.week.slots_per_day {
                let slot_label = self.week.slot_label(slot);
                let cells = self
                    .room_ids
                    .iter()
                    .map(|room| CellKey::new(day, slot, Channel::FaceToFace, room.as_str()))
                    .chain(std::iter::once(CellKey::online(day, slot)));
                for key in cells {
                    rows.push(TimetableRow {
                        day,
                        day_label: day_label.clone(),
                        slot,
                        slot_label: slot_label.clone(),
                        channel: key.channel,
                        course_ids: self.grid.get(&key).to_vec(),
                        room: key.room,
                    });
                }
            }
        }
        rows
    }

    /// Renders a cell as `id | name | instructor | S<year>` entries joined
    /// by ` / `, or `-` when empty.
    pub fn cell_text(&self, key: &CellKey, courses: &[Course]) -> String {
        let ids = self.grid.get(key);
        if ids.is_empty() {
            return "-".to_string();
        }
        ids.iter()
            .map(|id| match courses.iter().find(|c| &c.id == id) {
                Some(c) => format!("{} | {} | {} | S{}", c.id, c.name, c.instructor, c.class_year),
                None => id.clone(),
            })
            .collect::<Vec<_>>()
            .join(" / ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_timetable() -> Timetable {
        let assignments = vec![
            Assignment::in_room("A", 0, 0, 2, "R1").pinned(),
            Assignment::online("B", 0, 1, 1),
        ];
        let mut grid = TimetableGrid::new();
        grid.push(CellKey::new(0, 0, Channel::FaceToFace, "R1"), "A");
        grid.push(CellKey::new(0, 1, Channel::FaceToFace, "R1"), "A");
        grid.push(CellKey::online(0, 1), "B");
        Timetable {
            assignments,
            diagnostics: vec![Diagnostic::no_feasible_slot("C", Channel::FaceToFace)],
            grid,
            week: WeekGrid::new(1, 2).with_day_labels(["Mon"]),
            room_ids: vec!["R1".into(), "R2".into()],
        }
    }

    #[test]
    fn test_assignment_slots() {
        let a = Assignment::in_room("A", 1, 3, 2, "R1");
        assert_eq!(a.slots(), 3..5);
        assert_eq!(a.last_slot(), 4);
        assert!(a.covers(1, 4));
        assert!(!a.covers(1, 5));
        assert!(!a.covers(0, 3));
        assert!(!a.pinned);
    }

    #[test]
    fn test_online_assignment_marker() {
        let a = Assignment::online("B", 0, 0, 1);
        assert_eq!(a.channel, Channel::Online);
        assert_eq!(a.room, ONLINE_ROOM);
    }

    #[test]
    fn test_reason_classes() {
        assert!(ReasonCode::OnlineCapacityExceeded.is_online_capacity_class());
        assert!(ReasonCode::NoFeasibleSlot {
            channel: Channel::Online
        }
        .is_online_capacity_class());
        assert!(!ReasonCode::NoFeasibleSlot {
            channel: Channel::FaceToFace
        }
        .is_online_capacity_class());
        assert!(ReasonCode::RoomNotFound.is_pin_rejection());
        assert!(!ReasonCode::NoFeasibleSlot {
            channel: Channel::Online
        }
        .is_pin_rejection());
    }

    #[test]
    fn test_reason_display() {
        assert_eq!(ReasonCode::ClassOverlap.to_string(), "ClassOverlap");
        assert_eq!(
            ReasonCode::NoFeasibleSlot {
                channel: Channel::Online
            }
            .to_string(),
            "NoFeasibleSlot(Online)"
        );
    }

    #[test]
    fn test_queries() {
        let t = sample_timetable();
        assert_eq!(t.assignment_for("A").unwrap().room, "R1");
        assert!(t.assignment_for("C").is_none());
        assert_eq!(
            t.diagnostic_for("C").unwrap().reason,
            ReasonCode::NoFeasibleSlot {
                channel: Channel::FaceToFace
            }
        );
        assert_eq!(t.assignments_for_room("R1").len(), 1);
        assert_eq!(t.assignments_for_room(ONLINE_ROOM).len(), 1);
        assert!(!t.is_complete());
    }

    #[test]
    fn test_rows_cover_every_cell() {
        let t = sample_timetable();
        let rows = t.rows();
        // 1 day * 2 slots * (2 rooms + online)
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[0].day_label, "Mon");
        assert_eq!(rows[0].slot_label, "1");
        assert_eq!(rows[0].room, "R1");
        assert_eq!(rows[0].course_ids, vec!["A".to_string()]);
        assert_eq!(rows[1].room, "R2");
        assert!(rows[1].course_ids.is_empty());
        assert_eq!(rows[2].channel, Channel::Online);
        assert!(rows[2].course_ids.is_empty());
        assert_eq!(rows[5].room, ONLINE_ROOM);
        assert_eq!(rows[5].course_ids, vec!["B".to_string()]);
    }

    #[test]
    fn test_cell_text() {
        let t = sample_timetable();
        let courses = vec![Course::new("A")
            .with_name("Intro")
            .with_instructor("Hoca_A")
            .with_class_year(2)];

        let key = CellKey::new(0, 0, Channel::FaceToFace, "R1");
        assert_eq!(t.cell_text(&key, &courses), "A | Intro | Hoca_A | S2");
        assert_eq!(t.cell_text(&CellKey::online(0, 1), &courses), "B");
        assert_eq!(t.cell_text(&CellKey::online(0, 0), &courses), "-");
    }

    #[test]
    fn test_grid_multi_occupant_cell() {
        let mut grid = TimetableGrid::new();
        grid.push(CellKey::online(0, 0), "X");
        grid.push(CellKey::online(0, 0), "Y");
        assert_eq!(grid.len(), 1);
        assert_eq!(grid.get(&CellKey::online(0, 0)), ["X".to_string(), "Y".to_string()]);
        assert!(grid.get(&CellKey::online(0, 1)).is_empty());
    }
}
