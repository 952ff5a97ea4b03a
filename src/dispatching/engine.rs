//! Rule engine for multi-criteria course ordering.
//!
//! Applies rules in sequence: the next rule is consulted only when the
//! previous ones tie. Courses tied on every rule keep their input order.

use std::cmp::Ordering;
use std::sync::Arc;

use super::{OrderingRule, RuleScore, SchedulingContext};
use crate::models::Course;

/// A composable, sequential rule engine.
///
/// # Example
/// ```
/// use u_timetable::dispatching::RuleEngine;
/// use u_timetable::dispatching::rules;
///
/// let engine = RuleEngine::new()
///     .with_rule(rules::FewestFeasibleStarts)
///     .with_tie_breaker(rules::LongestDuration);
/// assert_eq!(engine.rule_names(), vec!["SCARCITY", "LONGEST"]);
/// ```
#[derive(Clone, Default)]
pub struct RuleEngine {
    rules: Vec<Arc<dyn OrderingRule>>,
}

impl RuleEngine {
    /// Creates an empty rule engine (input order is kept).
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Adds the primary rule.
    pub fn with_rule<R: OrderingRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Adds a tie-breaking rule, consulted after all earlier ones tie.
    pub fn with_tie_breaker<R: OrderingRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Sorts a subset of courses, given as indices into `courses`.
    ///
    /// The sort is stable, so full ties preserve the order of `candidates`.
    pub fn sort_indices(
        &self,
        courses: &[Course],
        candidates: &[usize],
        context: &SchedulingContext,
    ) -> Vec<usize> {
        let mut keyed: Vec<(Vec<RuleScore>, usize)> = candidates
            .iter()
            .map(|&idx| (self.evaluate(&courses[idx], context), idx))
            .collect();
        keyed.sort_by(|a, b| compare_scores(&a.0, &b.0));
        keyed.into_iter().map(|(_, idx)| idx).collect()
    }

    /// Scores of a single course, one per rule.
    pub fn evaluate(&self, course: &Course, context: &SchedulingContext) -> Vec<RuleScore> {
        self.rules
            .iter()
            .map(|rule| rule.evaluate(course, context))
            .collect()
    }

    /// Names of the rules in evaluation order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }
}

fn compare_scores(a: &[RuleScore], b: &[RuleScore]) -> Ordering {
    a.iter()
        .zip(b)
        .map(|(x, y)| x.cmp(y))
        .find(|ord| ord.is_ne())
        .unwrap_or(Ordering::Equal)
}

impl std::fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEngine")
            .field("rules", &self.rule_names())
            .finish()
    }
}
