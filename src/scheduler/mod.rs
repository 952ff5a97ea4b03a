//! Constraint placement engine and KPI evaluation.
//!
//! # Pipeline
//!
//! 1. **Pins**: validated and committed in input order; rejected pins
//!    are final.
//! 2. **Ordering**: remaining courses split into room-based and online
//!    groups, each sorted by the selected [`Strategy`].
//! 3. **Placement**: first-fit greedy, room pass then online pass, over
//!    one shared occupancy state.
//! 4. **Assembly**: placements projected into the cell lookup.
//!
//! The run is sequential and deterministic: identical requests (including
//! course and pin order) yield identical timetables.

mod greedy;
mod grid;
mod kpi;
mod occupancy;
mod pins;
mod request;
mod scarcity;

pub use grid::build_grid;
pub use kpi::TimetableKpi;
pub use occupancy::Occupancy;
pub use request::ScheduleRequest;
pub use scarcity::{feasible_starts, scarcity_context};

use tracing::info;

use crate::dispatching::RuleEngine;
use crate::error::SchedulerResult;
use crate::models::{Channel, Timetable};

/// Pin-then-greedy timetable scheduler.
///
/// # Example
///
/// ```
/// use u_timetable::models::{Course, Room, WeekGrid};
/// use u_timetable::scheduler::{ScheduleRequest, TimetableScheduler};
///
/// let request = ScheduleRequest::new(
///     WeekGrid::new(1, 4),
///     vec![
///         Course::new("A").with_instructor("Hoca_A").with_duration(2),
///         Course::new("B").with_instructor("Hoca_A").with_duration(2),
///     ],
///     vec![Room::new("R1")],
/// );
///
/// let timetable = TimetableScheduler::new().schedule(&request).unwrap();
/// assert_eq!(timetable.assignments.len(), 2);
/// assert!(timetable.is_complete());
/// ```
#[derive(Debug, Clone, Default)]
pub struct TimetableScheduler {
    rule_engine: Option<RuleEngine>,
}

impl TimetableScheduler {
    /// Creates a scheduler that orders courses by the request's strategy.
    pub fn new() -> Self {
        Self { rule_engine: None }
    }

    /// Overrides the strategy with a custom rule chain.
    ///
    /// The chain receives feasible-start counts in its context.
    pub fn with_rule_engine(mut self, engine: RuleEngine) -> Self {
        self.rule_engine = Some(engine);
        self
    }

    /// Runs pin resolution, both greedy passes and grid assembly.
    ///
    /// # Errors
    /// Only for structurally invalid configuration (zero slots per day,
    /// a day window for a day outside the week). Infeasible courses are
    /// reported as diagnostics.
    pub fn schedule(&self, request: &ScheduleRequest) -> SchedulerResult<Timetable> {
        request.check_structure()?;

        let week = &request.week;
        let mut occupancy = Occupancy::new(week.days, request.rooms.len(), week.slots_per_day);

        let pinned = pins::resolve_pins(request, &mut occupancy);

        let (offline, online): (Vec<usize>, Vec<usize>) = (0..request.courses.len())
            .filter(|idx| !pinned.settled.contains(idx))
            .partition(|&idx| !request.courses[idx].online);

        let engine = self
            .rule_engine
            .clone()
            .unwrap_or_else(|| request.strategy.rule_engine());
        let offline_order = self.order(request, &engine, &offline);
        let online_order = self.order(request, &engine, &online);

        let room_pass = greedy::place_pass(
            request,
            &offline_order,
            Channel::FaceToFace,
            &mut occupancy,
        );
        let online_pass =
            greedy::place_pass(request, &online_order, Channel::Online, &mut occupancy);

        let mut assignments = pinned.assignments;
        assignments.extend(room_pass.assignments);
        assignments.extend(online_pass.assignments);
        let mut diagnostics = pinned.diagnostics;
        diagnostics.extend(room_pass.diagnostics);
        diagnostics.extend(online_pass.diagnostics);

        info!(
            strategy = ?request.strategy,
            courses = request.courses.len(),
            placed = assignments.len(),
            unplaced = diagnostics.len(),
            "timetable built"
        );

        Ok(grid::assemble(assignments, diagnostics, week, &request.rooms))
    }

    fn order(
        &self,
        request: &ScheduleRequest,
        engine: &RuleEngine,
        candidates: &[usize],
    ) -> Vec<usize> {
        let context = if self.rule_engine.is_some() || request.strategy.needs_scarcity() {
            scarcity_context(
                &request.courses,
                candidates,
                &request.day_windows,
                &request.availability,
                request.week.days,
                request.week.slots_per_day,
            )
        } else {
            Default::default()
        };
        engine.sort_indices(&request.courses, candidates, &context)
    }
}

/// Convenience wrapper: schedules with the request's own strategy.
pub fn schedule(request: &ScheduleRequest) -> SchedulerResult<Timetable> {
    TimetableScheduler::new().schedule(request)
}
