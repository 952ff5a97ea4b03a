//! Constraint settings and placement strategy.
//!
//! One explicit configuration value per run; nothing is read from
//! ambient state.

use serde::{Deserialize, Serialize};

/// Hard constraints applied by the pin resolver and the greedy placer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConstraintSettings {
    /// Maximum online courses running in the same (day, slot).
    pub online_cap: u32,
    /// Maximum courses sharing a room in the same (day, slot).
    pub max_per_room: u32,
    /// Forbid an instructor from teaching two courses at once.
    pub enforce_instructor_no_overlap: bool,
    /// Forbid a class-year from attending two courses at once.
    pub enforce_class_no_overlap: bool,
}

impl Default for ConstraintSettings {
    fn default() -> Self {
        Self {
            online_cap: 3,
            max_per_room: 1,
            enforce_instructor_no_overlap: true,
            enforce_class_no_overlap: true,
        }
    }
}

impl ConstraintSettings {
    /// Sets the online seat cap.
    pub fn with_online_cap(mut self, cap: u32) -> Self {
        self.online_cap = cap;
        self
    }

    /// Sets the per-room occupant cap.
    pub fn with_max_per_room(mut self, cap: u32) -> Self {
        self.max_per_room = cap;
        self
    }

    /// Enables or disables the instructor overlap rule.
    pub fn with_instructor_no_overlap(mut self, enforce: bool) -> Self {
        self.enforce_instructor_no_overlap = enforce;
        self
    }

    /// Enables or disables the class-year overlap rule.
    pub fn with_class_no_overlap(mut self, enforce: bool) -> Self {
        self.enforce_class_no_overlap = enforce;
        self
    }
}

/// Order in which unpinned courses are offered to the placer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strategy {
    /// Fewest statically feasible starts first; ties favour final-year,
    /// then longer courses.
    #[default]
    ScarcityFirst,
    /// Longest duration first.
    DurationFirst,
}

impl Strategy {
    /// Parses a strategy name (`"scarcity"`/`"duration"`, case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "scarcity" | "scarcity-first" | "scarcityfirst" => Some(Self::ScarcityFirst),
            "duration" | "duration-first" | "durationfirst" => Some(Self::DurationFirst),
            _ => None,
        }
    }
}
