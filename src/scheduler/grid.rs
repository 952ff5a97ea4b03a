//! Grid assembly: flat placements → cell lookup.

use crate::models::{Assignment, CellKey, Diagnostic, Room, Timetable, TimetableGrid, WeekGrid};

/// Builds the (day, slot, channel, room) → course ids lookup.
///
/// Every slot an assignment covers gets an entry; a cell only holds more
/// than one id when the room or online cap allows sharing.
pub fn build_grid(assignments: &[Assignment]) -> TimetableGrid {
    let mut grid = TimetableGrid::new();
    for a in assignments {
        for slot in a.slots() {
            grid.push(
                CellKey::new(a.day, slot, a.channel, a.room.as_str()),
                a.course_id.as_str(),
            );
        }
    }
    grid
}

/// Packages the run output for rendering collaborators.
pub fn assemble(
    assignments: Vec<Assignment>,
    diagnostics: Vec<Diagnostic>,
    week: &WeekGrid,
    rooms: &[Room],
) -> Timetable {
    let grid = build_grid(&assignments);
    Timetable {
        assignments,
        diagnostics,
        grid,
        week: week.clone(),
        room_ids: rooms.iter().map(|r| r.id.clone()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Channel;

    #[test]
    fn test_grid_covers_every_slot() {
        let grid = build_grid(&[
            Assignment::in_room("A", 0, 1, 3, "R1"),
            Assignment::online("B", 1, 0, 1),
        ]);

        assert_eq!(grid.len(), 4);
        for slot in 1..4 {
            let key = CellKey::new(0, slot, Channel::FaceToFace, "R1");
            assert_eq!(grid.get(&key), ["A".to_string()]);
        }
        assert!(grid
            .get(&CellKey::new(0, 0, Channel::FaceToFace, "R1"))
            .is_empty());
        assert_eq!(grid.get(&CellKey::online(1, 0)), ["B".to_string()]);
    }

    #[test]
    fn test_shared_cell_keeps_placement_order() {
        let grid = build_grid(&[
            Assignment::online("B", 0, 0, 1),
            Assignment::online("A", 0, 0, 1),
        ]);
        assert_eq!(
            grid.get(&CellKey::online(0, 0)),
            ["B".to_string(), "A".to_string()]
        );
    }

    #[test]
    fn test_assemble_keeps_order_and_rooms() {
        let t = assemble(
            vec![Assignment::in_room("A", 0, 0, 1, "R2")],
            vec![Diagnostic::no_feasible_slot("B", Channel::Online)],
            &WeekGrid::new(1, 1),
            &[Room::new("R1"), Room::new("R2")],
        );
        assert_eq!(t.room_ids, vec!["R1".to_string(), "R2".to_string()]);
        assert_eq!(t.grid.len(), 1);
        assert_eq!(t.diagnostics.len(), 1);
    }
}
