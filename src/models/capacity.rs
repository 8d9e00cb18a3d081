//! Faculty capacity model.
//!
//! A capacity table holds one seat limit per faculty in canonical order
//! together with the number of seats already taken. Occupied counts only
//! grow during a run and never exceed the limit.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Seat limit and current load for one faculty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacultyCapacity {
    /// Faculty name.
    pub faculty: String,
    /// Maximum number of students this faculty may receive.
    pub limit: usize,
    /// Seats taken so far.
    pub occupied: usize,
}

impl FacultyCapacity {
    /// Creates an empty faculty with the given limit.
    pub fn new(faculty: impl Into<String>, limit: usize) -> Self {
        Self {
            faculty: faculty.into(),
            limit,
            occupied: 0,
        }
    }

    /// Seats still free.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.limit.saturating_sub(self.occupied)
    }

    /// Whether at least one seat is free.
    #[inline]
    pub fn has_room(&self) -> bool {
        self.occupied < self.limit
    }
}

/// Capacities for every faculty, in canonical order.
///
/// Serializes as a plain list; the name index is rebuilt on load.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<FacultyCapacity>", into = "Vec<FacultyCapacity>")]
pub struct CapacityTable {
    entries: Vec<FacultyCapacity>,
    index: HashMap<String, usize>,
}

impl From<Vec<FacultyCapacity>> for CapacityTable {
    fn from(entries: Vec<FacultyCapacity>) -> Self {
        Self::new(entries)
    }
}

impl From<CapacityTable> for Vec<FacultyCapacity> {
    fn from(table: CapacityTable) -> Self {
        table.entries
    }
}

impl CapacityTable {
    /// Builds a table from capacities in canonical order.
    pub fn new(entries: Vec<FacultyCapacity>) -> Self {
        let index = entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.faculty.clone(), i))
            .collect();
        Self { entries, index }
    }

    /// Number of faculties.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no faculties.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All capacities in canonical order.
    pub fn entries(&self) -> &[FacultyCapacity] {
        &self.entries
    }

    /// Canonical position of a faculty.
    pub fn position(&self, faculty: &str) -> Option<usize> {
        self.index.get(faculty).copied()
    }

    /// Capacity entry for a faculty.
    pub fn get(&self, faculty: &str) -> Option<&FacultyCapacity> {
        self.position(faculty).map(|i| &self.entries[i])
    }

    /// Capacity entry at a canonical position.
    pub fn at(&self, position: usize) -> Option<&FacultyCapacity> {
        self.entries.get(position)
    }

    /// Whether the named faculty exists and has a free seat.
    pub fn has_room(&self, faculty: &str) -> bool {
        self.get(faculty).is_some_and(FacultyCapacity::has_room)
    }

    /// Takes one seat at `position`.
    ///
    /// Returns `false` (and changes nothing) if the faculty is full or the
    /// position is out of range.
    pub fn occupy(&mut self, position: usize) -> bool {
        match self.entries.get_mut(position) {
            Some(entry) if entry.has_room() => {
                entry.occupied += 1;
                true
            }
            _ => false,
        }
    }

    /// Sum of all seat limits.
    pub fn total_limit(&self) -> usize {
        self.entries.iter().map(|e| e.limit).sum()
    }

    /// Sum of all occupied seats.
    pub fn total_occupied(&self) -> usize {
        self.entries.iter().map(|e| e.occupied).sum()
    }

    /// Whether any faculty still has a free seat.
    pub fn any_room(&self) -> bool {
        self.entries.iter().any(FacultyCapacity::has_room)
    }
}
