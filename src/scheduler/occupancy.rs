//! Mutable occupancy state of a single run.
//!
//! Created empty at the start of a run, mutated only by the pin resolver
//! and the greedy placer, and dropped once the timetable is assembled.
//!
//! Callers pass slot runs that already passed the day-window check, so
//! every `start + len` stays within `slots_per_day`.

use std::collections::{HashMap, HashSet};

use crate::models::{ConstraintSettings, Course, ReasonCode, SlotKey};

/// Room load, online load and busy sets per (day, slot).
#[derive(Debug, Clone)]
pub struct Occupancy {
    /// `[day][room][slot]` → room-based occupants.
    room_load: Vec<Vec<Vec<u32>>>,
    /// `[day][slot]` → online occupants.
    online_load: Vec<Vec<u32>>,
    busy_instructors: HashMap<SlotKey, HashSet<String>>,
    busy_years: HashMap<SlotKey, HashSet<u8>>,
}

impl Occupancy {
    /// Creates empty state for the given grid.
    pub fn new(days: usize, rooms: usize, slots_per_day: usize) -> Self {
        Self {
            room_load: vec![vec![vec![0; slots_per_day]; rooms]; days],
            online_load: vec![vec![0; slots_per_day]; days],
            busy_instructors: HashMap::new(),
            busy_years: HashMap::new(),
        }
    }

    /// Room-based occupants of a room at (day, slot).
    pub fn room_load(&self, day: usize, room: usize, slot: usize) -> u32 {
        self.room_load[day][room][slot]
    }

    /// Online occupants at (day, slot).
    pub fn online_load(&self, day: usize, slot: usize) -> u32 {
        self.online_load[day][slot]
    }

    /// Whether the instructor already teaches in any slot of the run.
    pub fn instructor_busy(&self, instructor: &str, day: usize, start: usize, len: usize) -> bool {
        (start..start + len).any(|slot| {
            self.busy_instructors
                .get(&SlotKey::new(day, slot))
                .is_some_and(|set| set.contains(instructor))
        })
    }

    /// Whether the class-year already attends in any slot of the run.
    pub fn year_busy(&self, class_year: u8, day: usize, start: usize, len: usize) -> bool {
        (start..start + len).any(|slot| {
            self.busy_years
                .get(&SlotKey::new(day, slot))
                .is_some_and(|set| set.contains(&class_year))
        })
    }

    /// Overlap rules enabled in `settings`, instructor checked first.
    pub fn overlap_conflict(
        &self,
        course: &Course,
        day: usize,
        start: usize,
        len: usize,
        settings: &ConstraintSettings,
    ) -> Option<ReasonCode> {
        if settings.enforce_instructor_no_overlap
            && self.instructor_busy(&course.instructor, day, start, len)
        {
            return Some(ReasonCode::InstructorOverlap);
        }
        if settings.enforce_class_no_overlap && self.year_busy(course.class_year, day, start, len)
        {
            return Some(ReasonCode::ClassOverlap);
        }
        None
    }

    /// Whether one more occupant fits the room for the whole run.
    pub fn room_fits(&self, room: usize, day: usize, start: usize, len: usize, cap: u32) -> bool {
        self.room_load[day][room][start..start + len]
            .iter()
            .all(|&load| load < cap)
    }

    /// First room, in input order, that fits the whole run.
    pub fn first_free_room(&self, day: usize, start: usize, len: usize, cap: u32) -> Option<usize> {
        (0..self.room_load[day].len()).find(|&room| self.room_fits(room, day, start, len, cap))
    }

    /// Whether one more online occupant fits for the whole run.
    pub fn online_fits(&self, day: usize, start: usize, len: usize, cap: u32) -> bool {
        self.online_load[day][start..start + len]
            .iter()
            .all(|&load| load < cap)
    }

    /// Commits a room-based placement.
    pub fn commit_room(
        &mut self,
        course: &Course,
        room: usize,
        day: usize,
        start: usize,
        len: usize,
    ) {
        for slot in start..start + len {
            self.room_load[day][room][slot] += 1;
        }
        self.mark_busy(course, day, start, len);
    }

    /// Commits an online placement.
    pub fn commit_online(&mut self, course: &Course, day: usize, start: usize, len: usize) {
        for slot in start..start + len {
            self.online_load[day][slot] += 1;
        }
        self.mark_busy(course, day, start, len);
    }

    fn mark_busy(&mut self, course: &Course, day: usize, start: usize, len: usize) {
        for slot in start..start + len {
            let key = SlotKey::new(day, slot);
            self.busy_instructors
                .entry(key)
                .or_default()
                .insert(course.instructor.clone());
            self.busy_years
                .entry(key)
                .or_default()
                .insert(course.class_year);
        }
    }
}
