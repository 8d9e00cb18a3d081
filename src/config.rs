//! Allocation run configuration.

use serde::{Deserialize, Serialize};

/// Sentinel written for students no faculty could take.
pub const UNASSIGNED: &str = "Unassigned";

/// How students left over after the preference pass are seated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FallbackPolicy {
    /// Cycle through faculties in canonical order from a cursor that
    /// advances past each faculty used.
    #[default]
    RoundRobin,
    /// Pick the faculty with the fewest occupied seats among those with
    /// room; ties go to the earlier faculty.
    LeastLoaded,
}

/// Order of the preference-driven greedy pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PreferencePass {
    /// Each student, in CGPA order, takes their best-ranked faculty with room
    /// before the next student is considered.
    #[default]
    ByStudent,
    /// For rank 1, 2, ... scan every unplaced student in CGPA order and seat
    /// those whose faculty at that rank has room. When a student ties several
    /// faculties at one rank, only the first in column order is tried.
    ByRank,
}

/// Settings for one allocation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocationConfig {
    /// Fallback policy for students without a ranked seat.
    pub fallback: FallbackPolicy,
    /// Greedy pass ordering.
    pub preference_pass: PreferencePass,
    /// Consider only the first N faculty columns (`None` = all).
    pub faculty_limit: Option<usize>,
    /// Value written to the `Allocated` column for unplaced students.
    pub unassigned_label: String,
}

impl Default for AllocationConfig {
    fn default() -> Self {
        Self {
            fallback: FallbackPolicy::RoundRobin,
            preference_pass: PreferencePass::ByStudent,
            faculty_limit: None,
            unassigned_label: UNASSIGNED.to_string(),
        }
    }
}

impl AllocationConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the fallback policy.
    pub fn with_fallback(mut self, fallback: FallbackPolicy) -> Self {
        self.fallback = fallback;
        self
    }

    /// Sets the greedy pass ordering.
    pub fn with_preference_pass(mut self, pass: PreferencePass) -> Self {
        self.preference_pass = pass;
        self
    }

    /// Restricts the run to the first `limit` faculties.
    pub fn with_faculty_limit(mut self, limit: usize) -> Self {
        self.faculty_limit = Some(limit);
        self
    }

    /// Sets the unassigned sentinel.
    pub fn with_unassigned_label(mut self, label: impl Into<String>) -> Self {
        self.unassigned_label = label.into();
        self
    }
}
