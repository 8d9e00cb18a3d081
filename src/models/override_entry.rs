//! Locked (override) assignments.

use serde::{Deserialize, Serialize};

/// A locked student-to-faculty assignment.
///
/// Overrides are applied before any ranking and ignore the student's own
/// preference list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideEntry {
    /// Target faculty name.
    pub faculty: String,
    /// Roll number of the student being locked.
    pub roll: String,
}

impl OverrideEntry {
    /// Creates an override entry.
    pub fn new(faculty: impl Into<String>, roll: impl Into<String>) -> Self {
        Self {
            faculty: faculty.into(),
            roll: roll.into(),
        }
    }
}
