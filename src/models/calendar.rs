//! Week grid, day windows and instructor availability.
//!
//! # Slot Model
//! A week is `days` days of `slots_per_day` equal slots each, indexed
//! from 0. Each day has a window: the contiguous run of slots in which a
//! course may start and into which it may extend.
//!
//! # Precedence
//! A slot is usable for an instructor iff it lies inside the day window
//! AND is not in the instructor's blocked set.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::ops::RangeInclusive;

/// A (day, slot) coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SlotKey {
    pub day: usize,
    pub slot: usize,
}

impl SlotKey {
    /// Creates a slot key.
    pub fn new(day: usize, slot: usize) -> Self {
        Self { day, slot }
    }
}

/// Dimensions and display labels of the weekly grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekGrid {
    /// Number of days in the week.
    pub days: usize,
    /// Number of slots in every day.
    pub slots_per_day: usize,
    /// Day names, indexed by day. Missing entries fall back to `Day N`.
    #[serde(default)]
    pub day_labels: Vec<String>,
    /// Slot names (e.g. start times). Missing entries fall back to `N`.
    #[serde(default)]
    pub slot_labels: BTreeMap<usize, String>,
}

impl WeekGrid {
    /// Creates an unlabelled grid.
    pub fn new(days: usize, slots_per_day: usize) -> Self {
        Self {
            days,
            slots_per_day,
            day_labels: Vec::new(),
            slot_labels: BTreeMap::new(),
        }
    }

    /// Sets the day names; the day count follows their number.
    pub fn with_day_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.day_labels = labels.into_iter().map(Into::into).collect();
        self.days = self.day_labels.len();
        self
    }

    /// Names a single slot.
    pub fn with_slot_label(mut self, slot: usize, label: impl Into<String>) -> Self {
        self.slot_labels.insert(slot, label.into());
        self
    }

    /// Display name of a day.
    pub fn day_label(&self, day: usize) -> String {
        self.day_labels
            .get(day)
            .cloned()
            .unwrap_or_else(|| format!("Day {}", day + 1))
    }

    /// Display name of a slot.
    pub fn slot_label(&self, slot: usize) -> String {
        self.slot_labels
            .get(&slot)
            .cloned()
            .unwrap_or_else(|| (slot + 1).to_string())
    }

    /// Whether a (day, slot) lies inside the grid.
    pub fn contains(&self, key: SlotKey) -> bool {
        key.day < self.days && key.slot < self.slots_per_day
    }
}

/// Usable slot range of one day: `start` plus `usable` slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayWindow {
    /// First usable slot.
    pub start: usize,
    /// Number of usable slots from `start`.
    pub usable: usize,
}

impl DayWindow {
    /// Creates a day window.
    pub fn new(start: usize, usable: usize) -> Self {
        Self { start, usable }
    }

    /// The whole day.
    pub fn full(slots_per_day: usize) -> Self {
        Self::new(0, slots_per_day)
    }

    /// Resolves the inclusive bounds `[start, min(slots_per_day, start + usable) - 1]`.
    ///
    /// Returns `None` if the window is empty.
    pub fn bounds(&self, slots_per_day: usize) -> Option<WindowBounds> {
        let limit = slots_per_day.min(self.start.saturating_add(self.usable));
        if limit == 0 || limit - 1 < self.start {
            return None;
        }
        Some(WindowBounds {
            first: self.start,
            last: limit - 1,
        })
    }
}

/// Resolved inclusive slot range of a day window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowBounds {
    pub first: usize,
    pub last: usize,
}

impl WindowBounds {
    /// Number of slots in the window.
    pub fn len(&self) -> usize {
        self.last - self.first + 1
    }

    /// Whether the window holds no slot. Never true once resolved.
    pub fn is_empty(&self) -> bool {
        self.last < self.first
    }

    /// Whether a run of `len` slots starting at `start` stays inside.
    pub fn contains_run(&self, start: usize, len: usize) -> bool {
        len > 0
            && start >= self.first
            && start.checked_add(len - 1).is_some_and(|end| end <= self.last)
    }

    /// Start slots, ascending, at which a run of `len` slots fits.
    pub fn starts_for(&self, len: usize) -> RangeInclusive<usize> {
        if len == 0 || len > self.len() {
            return 1..=0;
        }
        self.first..=self.last + 1 - len
    }
}

/// Per-day windows. Days without an entry use the full day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayWindows {
    windows: BTreeMap<usize, DayWindow>,
}

impl DayWindows {
    /// Creates an empty mapping (every day fully usable).
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: sets the window of a day.
    pub fn with_window(mut self, day: usize, window: DayWindow) -> Self {
        self.set(day, window);
        self
    }

    /// Sets the window of a day.
    pub fn set(&mut self, day: usize, window: DayWindow) {
        self.windows.insert(day, window);
    }

    /// Window of a day, defaulting to the full day.
    pub fn window(&self, day: usize, slots_per_day: usize) -> DayWindow {
        self.windows
            .get(&day)
            .copied()
            .unwrap_or_else(|| DayWindow::full(slots_per_day))
    }

    /// Resolved bounds of a day.
    pub fn bounds(&self, day: usize, slots_per_day: usize) -> Option<WindowBounds> {
        self.window(day, slots_per_day).bounds(slots_per_day)
    }

    /// Day indices with an explicit window, ascending.
    pub fn configured_days(&self) -> impl Iterator<Item = usize> + '_ {
        self.windows.keys().copied()
    }
}

/// Instructor name → blocked (day, slot) pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Availability {
    blocked: HashMap<String, HashSet<SlotKey>>,
}

impl Availability {
    /// Creates an index with no blocked slots.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: blocks one slot for an instructor.
    pub fn with_blocked(mut self, instructor: impl Into<String>, day: usize, slot: usize) -> Self {
        self.block(instructor, day, slot);
        self
    }

    /// Blocks one slot for an instructor.
    pub fn block(&mut self, instructor: impl Into<String>, day: usize, slot: usize) {
        self.blocked
            .entry(instructor.into())
            .or_default()
            .insert(SlotKey::new(day, slot));
    }

    /// Whether the instructor is blocked at (day, slot).
    pub fn is_blocked(&self, instructor: &str, day: usize, slot: usize) -> bool {
        self.blocked
            .get(instructor)
            .is_some_and(|set| set.contains(&SlotKey::new(day, slot)))
    }

    /// Whether any slot of `[start, start + len)` on `day` is blocked.
    pub fn any_blocked(&self, instructor: &str, day: usize, start: usize, len: usize) -> bool {
        let Some(set) = self.blocked.get(instructor) else {
            return false;
        };
        (start..start + len).any(|slot| set.contains(&SlotKey::new(day, slot)))
    }

    /// Iterates instructors and their blocked slots.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &HashSet<SlotKey>)> {
        self.blocked.iter().map(|(name, set)| (name.as_str(), set))
    }
}
