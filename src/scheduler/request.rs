//! Input snapshot for one scheduling run.

use serde::{Deserialize, Serialize};

use crate::error::{SchedulerError, SchedulerResult};
use crate::models::{
    Availability, ConstraintSettings, Course, DayWindow, DayWindows, Pin, Room, Strategy,
    WeekGrid,
};

/// Everything a run reads, captured once and never mutated by the engine.
///
/// This is also the shape of a saved configuration: persistence layers
/// serialize it with `serde` and hand it back through
/// [`ScheduleRequest::from_json_str`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRequest {
    /// Week dimensions and labels.
    pub week: WeekGrid,
    /// Courses in input order.
    pub courses: Vec<Course>,
    /// Rooms in scan order.
    pub rooms: Vec<Room>,
    /// Instructor blocked slots.
    #[serde(default)]
    pub availability: Availability,
    /// Hard-constraint switches and caps.
    #[serde(default)]
    pub settings: ConstraintSettings,
    /// Per-day usable windows.
    #[serde(default)]
    pub day_windows: DayWindows,
    /// Pinned placements in resolution order.
    #[serde(default)]
    pub pins: Vec<Pin>,
    /// Ordering of unpinned courses.
    #[serde(default)]
    pub strategy: Strategy,
}

impl ScheduleRequest {
    /// Creates a request with default settings, full-day windows and no pins.
    pub fn new(week: WeekGrid, courses: Vec<Course>, rooms: Vec<Room>) -> Self {
        Self {
            week,
            courses,
            rooms,
            availability: Availability::new(),
            settings: ConstraintSettings::default(),
            day_windows: DayWindows::new(),
            pins: Vec::new(),
            strategy: Strategy::default(),
        }
    }

    /// Parses a serialized request.
    pub fn from_json_str(json: &str) -> SchedulerResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Sets instructor availability.
    pub fn with_availability(mut self, availability: Availability) -> Self {
        self.availability = availability;
        self
    }

    /// Sets constraint settings.
    pub fn with_settings(mut self, settings: ConstraintSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Sets the window of one day.
    pub fn with_day_window(mut self, day: usize, window: DayWindow) -> Self {
        self.day_windows.set(day, window);
        self
    }

    /// Appends a pin.
    pub fn with_pin(mut self, pin: Pin) -> Self {
        self.pins.push(pin);
        self
    }

    /// Sets the ordering strategy.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Rejects configurations the engine cannot interpret.
    pub fn check_structure(&self) -> SchedulerResult<()> {
        if self.week.slots_per_day == 0 {
            return Err(SchedulerError::ZeroSlotsPerDay);
        }
        if let Some(day) = self
            .day_windows
            .configured_days()
            .find(|&d| d >= self.week.days)
        {
            return Err(SchedulerError::DayWindowOutOfRange {
                day,
                days: self.week.days,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Channel;

    #[test]
    fn test_structure_ok() {
        let req = ScheduleRequest::new(WeekGrid::new(5, 10), vec![], vec![])
            .with_day_window(4, DayWindow::new(0, 6));
        assert!(req.check_structure().is_ok());
    }

    #[test]
    fn test_zero_slots_per_day() {
        let req = ScheduleRequest::new(WeekGrid::new(5, 0), vec![], vec![]);
        assert!(matches!(
            req.check_structure(),
            Err(SchedulerError::ZeroSlotsPerDay)
        ));
    }

    #[test]
    fn test_window_for_missing_day() {
        let req = ScheduleRequest::new(WeekGrid::new(2, 10), vec![], vec![])
            .with_day_window(2, DayWindow::new(0, 4));
        match req.check_structure() {
            Err(SchedulerError::DayWindowOutOfRange { day, days }) => {
                assert_eq!(day, 2);
                assert_eq!(days, 2);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_from_json_with_defaults() {
        let json = r#"{
            "week": {"days": 2, "slots_per_day": 4, "day_labels": ["Mon", "Tue"]},
            "courses": [
                {"id": "C1", "name": "Intro", "instructor": "Hoca_A", "class_year": 1,
                 "duration": 2, "consecutive": true, "online": false}
            ],
            "rooms": [{"id": "R1"}],
            "availability": {"Hoca_A": [{"day": 0, "slot": 3}]},
            "day_windows": {"1": {"start": 1, "usable": 2}},
            "pins": [{"course_id": "C1", "day": 1, "start": 1, "room": "R1"}]
        }"#;
        let req = ScheduleRequest::from_json_str(json).unwrap();

        assert_eq!(req.week.day_label(1), "Tue");
        assert_eq!(req.courses[0].duration, 2);
        assert!(req.availability.is_blocked("Hoca_A", 0, 3));
        assert_eq!(req.day_windows.window(1, 4), DayWindow::new(1, 2));
        assert_eq!(req.pins[0].channel, Channel::FaceToFace);
        assert_eq!(req.settings, ConstraintSettings::default());
        assert_eq!(req.strategy, Strategy::ScarcityFirst);
    }

    #[test]
    fn test_from_json_malformed() {
        assert!(matches!(
            ScheduleRequest::from_json_str("{\"week\": 3}"),
            Err(SchedulerError::Parse(_))
        ));
    }
}
