//! Precomputed inputs for ordering rules.

use std::collections::HashMap;

/// Per-course values the rules read.
///
/// Built once before the greedy passes; rules never see occupancy.
#[derive(Debug, Clone, Default)]
pub struct SchedulingContext {
    /// Statically feasible (day, start) count per course id.
    pub feasible_starts: HashMap<String, usize>,
}

impl SchedulingContext {
    /// Creates an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the feasible-start count for a course.
    pub fn with_feasible_starts(mut self, course_id: impl Into<String>, count: usize) -> Self {
        self.feasible_starts.insert(course_id.into(), count);
        self
    }

    /// Feasible-start count of a course (0 if unknown).
    pub fn feasible_starts_of(&self, course_id: &str) -> usize {
        self.feasible_starts.get(course_id).copied().unwrap_or(0)
    }
}
