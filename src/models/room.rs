//! Room model.

use serde::{Deserialize, Serialize};

/// A physical room. The room set is fixed for one run and rooms are
/// tried in the order they are supplied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Unique room identifier.
    pub id: String,
}

impl Room {
    /// Creates a room.
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}
