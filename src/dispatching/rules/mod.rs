//! Built-in ordering rules.
//!
//! # Score Convention
//! All rules return lower scores for courses that should be attempted
//! earlier.

use super::{OrderingRule, RuleScore, SchedulingContext};
use crate::models::Course;

/// Fewest statically feasible starts first.
///
/// Reads the per-course count from the context. Hard-to-place courses
/// get the first pick of the grid.
#[derive(Debug, Clone, Copy)]
pub struct FewestFeasibleStarts;

impl OrderingRule for FewestFeasibleStarts {
    fn name(&self) -> &'static str {
        "SCARCITY"
    }

    fn evaluate(&self, course: &Course, context: &SchedulingContext) -> RuleScore {
        context.feasible_starts_of(&course.id) as RuleScore
    }

    fn description(&self) -> &'static str {
        "Fewest Feasible Starts"
    }
}

/// Graduating class-year (4) first.
#[derive(Debug, Clone, Copy)]
pub struct FinalYearFirst;

impl OrderingRule for FinalYearFirst {
    fn name(&self) -> &'static str {
        "FINAL_YEAR"
    }

    fn evaluate(&self, course: &Course, _context: &SchedulingContext) -> RuleScore {
        if course.is_final_year() {
            0
        } else {
            1
        }
    }

    fn description(&self) -> &'static str {
        "Final Year First"
    }
}

/// Longest duration first.
#[derive(Debug, Clone, Copy)]
pub struct LongestDuration;

impl OrderingRule for LongestDuration {
    fn name(&self) -> &'static str {
        "LONGEST"
    }

    fn evaluate(&self, course: &Course, _context: &SchedulingContext) -> RuleScore {
        -RuleScore::from(course.duration)
    }

    fn description(&self) -> &'static str {
        "Longest Duration First"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fewest_feasible_starts() {
        let ctx = SchedulingContext::new().with_feasible_starts("A", 4);
        assert_eq!(FewestFeasibleStarts.evaluate(&Course::new("A"), &ctx), 4);
        assert_eq!(FewestFeasibleStarts.evaluate(&Course::new("B"), &ctx), 0);
    }

    #[test]
    fn test_final_year_first() {
        let ctx = SchedulingContext::new();
        let y4 = Course::new("A").with_class_year(4);
        let y2 = Course::new("B").with_class_year(2);
        assert!(FinalYearFirst.evaluate(&y4, &ctx) < FinalYearFirst.evaluate(&y2, &ctx));
    }

    #[test]
    fn test_longest_duration() {
        let ctx = SchedulingContext::new();
        let long = Course::new("A").with_duration(4);
        let short = Course::new("B").with_duration(1);
        assert!(LongestDuration.evaluate(&long, &ctx) < LongestDuration.evaluate(&short, &ctx));
        assert_eq!(LongestDuration.description(), "Longest Duration First");
    }
}
