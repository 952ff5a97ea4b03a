//! Ordering rules and rule engine for the greedy placer.
//!
//! Decides the order in which unpinned courses are offered to the
//! first-fit placer. Each [`Strategy`] maps to a fixed rule chain.
//!
//! # Usage
//!
//! ```
//! use u_timetable::dispatching::{RuleEngine, SchedulingContext};
//! use u_timetable::dispatching::rules;
//!
//! let engine = RuleEngine::new()
//!     .with_rule(rules::FewestFeasibleStarts)
//!     .with_tie_breaker(rules::FinalYearFirst)
//!     .with_tie_breaker(rules::LongestDuration);
//!
//! let context = SchedulingContext::new();
//! // let order = engine.sort_indices(&courses, &candidates, &context);
//! ```

mod context;
mod engine;
pub mod rules;

pub use context::SchedulingContext;
pub use engine::RuleEngine;

use crate::models::{Course, Strategy};
use std::fmt::Debug;

/// Score returned by an ordering rule.
///
/// Lower scores = attempted earlier.
pub type RuleScore = i64;

/// A rule that ranks a course for placement.
///
/// # Score Convention
/// **Lower score = attempted first.**
pub trait OrderingRule: Send + Sync + Debug {
    /// Rule name (e.g., "SCARCITY").
    fn name(&self) -> &'static str;

    /// Scores a course given the precomputed context.
    fn evaluate(&self, course: &Course, context: &SchedulingContext) -> RuleScore;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}

impl Strategy {
    /// Rule chain implementing this strategy.
    pub fn rule_engine(&self) -> RuleEngine {
        match self {
            Self::ScarcityFirst => RuleEngine::new()
                .with_rule(rules::FewestFeasibleStarts)
                .with_tie_breaker(rules::FinalYearFirst)
                .with_tie_breaker(rules::LongestDuration),
            Self::DurationFirst => RuleEngine::new().with_rule(rules::LongestDuration),
        }
    }

    /// Whether the chain reads scarcity counts.
    pub fn needs_scarcity(&self) -> bool {
        matches!(self, Self::ScarcityFirst)
    }
}
