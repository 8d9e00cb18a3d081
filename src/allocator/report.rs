//! Preference statistics.
//!
//! Two views of how students ranked each faculty:
//!
//! | View | Counts |
//! |------|--------|
//! | Allocation | Students placed at the faculty, by the rank they gave it |
//! | Demand | Every student who ranked the faculty, whatever the outcome |
//!
//! Rows follow canonical faculty order. The rank columns run from 1 to
//! `max(faculty count, highest rank counted)` so that no count is lost.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::AllocationRow;
use crate::models::StudentRecord;
use crate::schema::Schema;

/// Rank counts for one faculty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacultyPreferenceStat {
    /// Faculty name.
    pub faculty: String,
    /// `by_rank[k - 1]` = students counted at rank `k`.
    pub by_rank: Vec<usize>,
    /// Students counted with no rank for this faculty.
    pub no_preference: usize,
}

impl FacultyPreferenceStat {
    fn new(faculty: impl Into<String>, width: usize) -> Self {
        Self {
            faculty: faculty.into(),
            by_rank: vec![0; width],
            no_preference: 0,
        }
    }

    /// Count at a 1-based rank (0 when out of range).
    pub fn count_for_rank(&self, rank: u32) -> usize {
        (rank as usize)
            .checked_sub(1)
            .and_then(|i| self.by_rank.get(i))
            .copied()
            .unwrap_or(0)
    }

    /// Total students counted for this faculty.
    pub fn total(&self) -> usize {
        self.by_rank.iter().sum::<usize>() + self.no_preference
    }
}

/// Per-faculty rank counts, in canonical order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceStats {
    /// Number of rank columns (K).
    pub max_rank: usize,
    /// One entry per faculty.
    pub faculties: Vec<FacultyPreferenceStat>,
}

impl PreferenceStats {
    /// Counts allocated students by the rank they gave their faculty.
    ///
    /// Students with no rank for the faculty they got (override or
    /// fallback) count under `no_preference`. Unassigned students are not
    /// counted.
    pub fn from_allocation(
        schema: &Schema,
        students: &[StudentRecord],
        rows: &[AllocationRow],
    ) -> Self {
        let by_roll: HashMap<&str, &StudentRecord> =
            students.iter().map(|s| (s.roll.as_str(), s)).collect();

        let counted: Vec<(&str, Option<u32>)> = rows
            .iter()
            .filter_map(|row| {
                let faculty = row.faculty.as_deref()?;
                let rank = by_roll.get(row.roll.as_str()).and_then(|s| s.rank_for(faculty));
                Some((faculty, rank))
            })
            .collect();

        Self::tally(schema, &counted)
    }

    /// Counts how often each faculty was ranked at each rank.
    ///
    /// Only ranks given to faculties in `schema` are counted; the
    /// `no_preference` bucket holds students who left the faculty unranked.
    pub fn demand(schema: &Schema, students: &[StudentRecord]) -> Self {
        let mut counted = Vec::new();
        for faculty in schema.faculties() {
            for student in students {
                counted.push((faculty.as_str(), student.rank_for(faculty)));
            }
        }
        Self::tally(schema, &counted)
    }

    fn tally(schema: &Schema, counted: &[(&str, Option<u32>)]) -> Self {
        let highest = counted
            .iter()
            .filter_map(|&(_, rank)| rank)
            .max()
            .unwrap_or(0) as usize;
        let width = schema.len().max(highest);

        let mut faculties: Vec<FacultyPreferenceStat> = schema
            .faculties()
            .iter()
            .map(|f| FacultyPreferenceStat::new(f.clone(), width))
            .collect();

        for &(faculty, rank) in counted {
            let Some(position) = schema.position(faculty) else {
                continue;
            };
            let stat = &mut faculties[position];
            match rank {
                Some(rank) if rank > 0 => stat.by_rank[rank as usize - 1] += 1,
                _ => stat.no_preference += 1,
            }
        }

        Self {
            max_rank: width,
            faculties,
        }
    }

    /// Statistics row for a faculty.
    pub fn get(&self, faculty: &str) -> Option<&FacultyPreferenceStat> {
        self.faculties.iter().find(|s| s.faculty == faculty)
    }

    /// Total students counted across all faculties.
    pub fn total(&self) -> usize {
        self.faculties.iter().map(FacultyPreferenceStat::total).sum()
    }
}
