//! Allocation result model.
//!
//! A placement records where one student ended up and which phase put
//! them there. Warnings record non-fatal conflicts met along the way.

use serde::{Deserialize, Serialize};

/// How a student was placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlacementSource {
    /// Locked by an override entry.
    Override,
    /// Seated at one of the student's ranked faculties.
    Preference(u32),
    /// Seated by the fallback pass.
    Fallback,
    /// No faculty had a free seat.
    Unassigned,
}

/// Final placement of one student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// Student roll number.
    pub roll: String,
    /// Assigned faculty, `None` when unassigned.
    pub faculty: Option<String>,
    /// Phase that produced this placement.
    pub source: PlacementSource,
}

impl Placement {
    /// Creates a placement at a faculty.
    pub fn assigned(
        roll: impl Into<String>,
        faculty: impl Into<String>,
        source: PlacementSource,
    ) -> Self {
        Self {
            roll: roll.into(),
            faculty: Some(faculty.into()),
            source,
        }
    }

    /// Creates an unassigned placement.
    pub fn unassigned(roll: impl Into<String>) -> Self {
        Self {
            roll: roll.into(),
            faculty: None,
            source: PlacementSource::Unassigned,
        }
    }

    /// Whether a faculty was assigned.
    #[inline]
    pub fn is_assigned(&self) -> bool {
        self.faculty.is_some()
    }

    /// Assigned faculty name, or `label` when unassigned.
    pub fn faculty_or<'a>(&'a self, label: &'a str) -> &'a str {
        self.faculty.as_deref().unwrap_or(label)
    }
}

/// A non-fatal condition met during allocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationWarning {
    /// Warning category.
    pub kind: WarningKind,
    /// Roll number involved.
    pub roll: String,
    /// Faculty involved, if any.
    pub faculty: Option<String>,
    /// Human-readable description.
    pub message: String,
}

/// Categories of non-fatal conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarningKind {
    /// A second override named an already-placed roll.
    DuplicateOverride,
    /// An override named a faculty with no free seat.
    OverrideCapacity,
    /// An override named a roll missing from the student table.
    UnknownRoll,
    /// No faculty anywhere had a free seat for this student.
    CapacityExhausted,
}

impl AllocationWarning {
    /// Creates a duplicate override warning.
    pub fn duplicate_override(roll: impl Into<String>, faculty: impl Into<String>) -> Self {
        let roll = roll.into();
        let faculty = faculty.into();
        Self {
            kind: WarningKind::DuplicateOverride,
            message: format!("Roll '{roll}' is already allocated; override to '{faculty}' ignored"),
            roll,
            faculty: Some(faculty),
        }
    }

    /// Creates an override capacity conflict warning.
    pub fn override_capacity(roll: impl Into<String>, faculty: impl Into<String>) -> Self {
        let roll = roll.into();
        let faculty = faculty.into();
        Self {
            kind: WarningKind::OverrideCapacity,
            message: format!("Faculty '{faculty}' is full; override for roll '{roll}' ignored"),
            roll,
            faculty: Some(faculty),
        }
    }

    /// Creates an unknown roll warning.
    pub fn unknown_roll(roll: impl Into<String>, faculty: impl Into<String>) -> Self {
        let roll = roll.into();
        let faculty = faculty.into();
        Self {
            kind: WarningKind::UnknownRoll,
            message: format!("Override names unknown roll '{roll}'; skipped"),
            roll,
            faculty: Some(faculty),
        }
    }

    /// Creates a capacity exhaustion warning.
    pub fn capacity_exhausted(roll: impl Into<String>) -> Self {
        let roll = roll.into();
        Self {
            kind: WarningKind::CapacityExhausted,
            message: format!("No faculty has a free seat for roll '{roll}'; left unassigned"),
            roll,
            faculty: None,
        }
    }
}

impl std::fmt::Display for AllocationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}
