//! Timetable quality metrics (KPIs).
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Placement rate | placed / total courses |
//! | Pinned | placements that came from pins |
//! | Online | placements on the online channel |
//! | Room utilization | occupied room-slots / usable window slots |

use std::collections::HashMap;

use super::request::ScheduleRequest;
use crate::models::{Channel, Timetable};

/// Summary indicators of a timetable.
#[derive(Debug, Clone)]
pub struct TimetableKpi {
    /// Courses in the request.
    pub total_courses: usize,
    /// Courses with an assignment.
    pub placed: usize,
    /// Courses with a diagnostic.
    pub unplaced: usize,
    /// Assignments that came from pins.
    pub pinned: usize,
    /// Assignments on the online channel.
    pub online: usize,
    /// placed / total (1.0 for an empty request).
    pub placement_rate: f64,
    /// Average room utilization (0.0..=max_per_room).
    pub avg_room_utilization: f64,
    /// Per-room utilization.
    pub utilization_by_room: HashMap<String, f64>,
}

impl TimetableKpi {
    /// Computes KPIs from a timetable and the request that produced it.
    pub fn calculate(timetable: &Timetable, request: &ScheduleRequest) -> Self {
        let total = request.courses.len();
        let placed = timetable.assignments.len();
        let spd = request.week.slots_per_day;

        let usable_slots: usize = (0..request.week.days)
            .filter_map(|day| request.day_windows.bounds(day, spd))
            .map(|b| b.len())
            .sum();

        let mut busy: HashMap<&str, usize> = request
            .rooms
            .iter()
            .map(|r| (r.id.as_str(), 0))
            .collect();
        for a in &timetable.assignments {
            if a.channel == Channel::FaceToFace {
                if let Some(count) = busy.get_mut(a.room.as_str()) {
                    *count += a.duration;
                }
            }
        }

        let utilization_by_room: HashMap<String, f64> = busy
            .into_iter()
            .map(|(id, slots)| {
                let util = if usable_slots == 0 {
                    0.0
                } else {
                    slots as f64 / usable_slots as f64
                };
                (id.to_string(), util)
            })
            .collect();

        let avg_room_utilization = if utilization_by_room.is_empty() {
            0.0
        } else {
            utilization_by_room.values().sum::<f64>() / utilization_by_room.len() as f64
        };

        Self {
            total_courses: total,
            placed,
            unplaced: timetable.diagnostics.len(),
            pinned: timetable.assignments.iter().filter(|a| a.pinned).count(),
            online: timetable
                .assignments
                .iter()
                .filter(|a| a.channel == Channel::Online)
                .count(),
            placement_rate: if total == 0 {
                1.0
            } else {
                placed as f64 / total as f64
            },
            avg_room_utilization,
            utilization_by_room,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Course, DayWindow, Pin, Room, WeekGrid};
    use crate::scheduler::TimetableScheduler;

    #[test]
    fn test_kpi_basic() {
        let request = ScheduleRequest::new(
            WeekGrid::new(2, 4),
            vec![
                Course::new("A").with_instructor("x").with_duration(2),
                Course::new("B").with_instructor("y").with_class_year(2).online(),
                Course::new("C").with_instructor("z").with_duration(9),
            ],
            vec![Room::new("R1"), Room::new("R2")],
        )
        .with_day_window(1, DayWindow::new(0, 2))
        .with_pin(Pin::in_room("A", 0, 0, "R1"));

        let timetable = TimetableScheduler::new().schedule(&request).unwrap();
        let kpi = TimetableKpi::calculate(&timetable, &request);

        assert_eq!(kpi.total_courses, 3);
        assert_eq!(kpi.placed, 2);
        assert_eq!(kpi.unplaced, 1);
        assert_eq!(kpi.pinned, 1);
        assert_eq!(kpi.online, 1);
        assert!((kpi.placement_rate - 2.0 / 3.0).abs() < 1e-10);
        // R1: 2 busy slots over 4 + 2 usable
        assert!((kpi.utilization_by_room["R1"] - 2.0 / 6.0).abs() < 1e-10);
        assert!((kpi.utilization_by_room["R2"] - 0.0).abs() < 1e-10);
        assert!((kpi.avg_room_utilization - 1.0 / 6.0).abs() < 1e-10);
    }

    #[test]
    fn test_kpi_empty() {
        let request = ScheduleRequest::new(WeekGrid::new(1, 4), vec![], vec![]);
        let timetable = TimetableScheduler::new().schedule(&request).unwrap();
        let kpi = TimetableKpi::calculate(&timetable, &request);
        assert_eq!(kpi.placed, 0);
        assert!((kpi.placement_rate - 1.0).abs() < 1e-10);
        assert!((kpi.avg_room_utilization - 0.0).abs() < 1e-10);
    }
}
