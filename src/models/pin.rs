//! Pinned placements.

use serde::{Deserialize, Serialize};

use super::Channel;

/// A caller-fixed placement that must be honored verbatim or rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pin {
    /// Course being pinned.
    pub course_id: String,
    /// Day index.
    pub day: usize,
    /// First slot.
    pub start: usize,
    /// Delivery channel. An online course is placed online regardless.
    #[serde(default)]
    pub channel: Channel,
    /// Room id, required for room-based pins.
    #[serde(default)]
    pub room: Option<String>,
}

impl Pin {
    /// Pins a course into a room.
    pub fn in_room(
        course_id: impl Into<String>,
        day: usize,
        start: usize,
        room: impl Into<String>,
    ) -> Self {
        Self {
            course_id: course_id.into(),
            day,
            start,
            channel: Channel::FaceToFace,
            room: Some(room.into()),
        }
    }

    /// Pins a course onto the online channel.
    pub fn online(course_id: impl Into<String>, day: usize, start: usize) -> Self {
        Self {
            course_id: course_id.into(),
            day,
            start,
            channel: Channel::Online,
            room: None,
        }
    }
}
