//! Three-phase allocation engine.
//!
//! # Algorithm
//!
//! 1. **Overrides.** Apply locked assignments in file order. A roll that is
//!    already placed, a faculty with no free seat, or an unknown roll
//!    produces a warning and the entry is ignored.
//! 2. **Preferences.** Visit unplaced students by CGPA (descending, ties in
//!    input order) and seat each at the best-ranked faculty with room.
//! 3. **Fallback.** Seat whoever is left, in the same order, by round-robin
//!    over the canonical faculty order (or least-loaded first). Students
//!    that fit nowhere are left unassigned with a warning.
//!
//! Every seat taken goes through [`CapacityTable::occupy`], so no faculty
//! ever exceeds its limit.
//!
//! # Complexity
//! O(n log n + n * f) where n=students, f=faculties.

use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::config::{AllocationConfig, FallbackPolicy, PreferencePass};
use crate::models::{
    AllocationWarning, CapacityTable, OverrideEntry, Placement, PlacementSource, StudentRecord,
};

/// Mutable state of one allocation run.
///
/// Owns its capacity table and result map; nothing outlives the run.
pub(crate) struct AllocationRun<'a> {
    students: &'a [StudentRecord],
    config: &'a AllocationConfig,
    capacities: CapacityTable,
    placements: Vec<Option<Placement>>,
    roll_index: HashMap<&'a str, usize>,
    warnings: Vec<AllocationWarning>,
}

/// Final state handed back by [`AllocationRun::execute`].
pub(crate) struct RunResult {
    /// One placement per student, in input order.
    pub placements: Vec<Placement>,
    pub capacities: CapacityTable,
    pub warnings: Vec<AllocationWarning>,
}

impl<'a> AllocationRun<'a> {
    pub fn new(
        students: &'a [StudentRecord],
        capacities: CapacityTable,
        config: &'a AllocationConfig,
    ) -> Self {
        let roll_index = students
            .iter()
            .enumerate()
            .map(|(i, s)| (s.roll.as_str(), i))
            .collect();
        Self {
            students,
            config,
            capacities,
            placements: vec![None; students.len()],
            roll_index,
            warnings: Vec::new(),
        }
    }

    /// Runs all three phases.
    pub fn execute(mut self, overrides: &[OverrideEntry]) -> RunResult {
        let order = self.priority_order();

        let locked = self.apply_overrides(overrides);
        let preferred = match self.config.preference_pass {
            PreferencePass::ByStudent => self.assign_by_student(&order),
            PreferencePass::ByRank => self.assign_by_rank(&order),
        };
        let fallback = self.assign_fallback(&order);

        info!(
            overrides = locked,
            preferences = preferred,
            fallback,
            warnings = self.warnings.len(),
            "allocation phases complete"
        );

        let placements: Vec<Placement> = self
            .placements
            .into_iter()
            .zip(self.students)
            .map(|(p, s)| p.unwrap_or_else(|| Placement::unassigned(s.roll.clone())))
            .collect();

        debug_assert_eq!(
            self.capacities.total_occupied(),
            placements.iter().filter(|p| p.is_assigned()).count()
        );

        RunResult {
            placements,
            capacities: self.capacities,
            warnings: self.warnings,
        }
    }

    /// Student indices by CGPA descending, then input position ascending.
    fn priority_order(&self) -> Vec<usize> {
        let students = self.students;
        let mut indices: Vec<usize> = (0..students.len()).collect();
        indices.sort_by(|&a, &b| {
            students[b]
                .cgpa
                .total_cmp(&students[a].cgpa)
                .then(a.cmp(&b))
        });
        indices
    }

    fn place(&mut self, idx: usize, position: usize, source: PlacementSource) -> bool {
        if !self.capacities.occupy(position) {
            return false;
        }
        let Some(capacity) = self.capacities.at(position) else {
            return false;
        };
        let roll = &self.students[idx].roll;
        debug!(roll = %roll, faculty = %capacity.faculty, ?source, "placed student");
        self.placements[idx] = Some(Placement::assigned(
            roll.clone(),
            capacity.faculty.clone(),
            source,
        ));
        true
    }

    fn push_warning(&mut self, warning: AllocationWarning) {
        warn!(kind = ?warning.kind, roll = %warning.roll, "{}", warning.message);
        self.warnings.push(warning);
    }

    /// Phase 1. Returns the number of students locked.
    fn apply_overrides(&mut self, overrides: &[OverrideEntry]) -> usize {
        let mut locked = 0;
        for entry in overrides {
            let Some(&idx) = self.roll_index.get(entry.roll.as_str()) else {
                self.push_warning(AllocationWarning::unknown_roll(&entry.roll, &entry.faculty));
                continue;
            };
            if self.placements[idx].is_some() {
                self.push_warning(AllocationWarning::duplicate_override(
                    &entry.roll,
                    &entry.faculty,
                ));
                continue;
            }
            // Unknown faculties are rejected during validation.
            let Some(position) = self.capacities.position(&entry.faculty) else {
                continue;
            };
            if self.place(idx, position, PlacementSource::Override) {
                locked += 1;
            } else {
                self.push_warning(AllocationWarning::override_capacity(
                    &entry.roll,
                    &entry.faculty,
                ));
            }
        }
        locked
    }

    /// Phase 2, student-major. Returns the number of students seated.
    fn assign_by_student(&mut self, order: &[usize]) -> usize {
        let students = self.students;
        let mut seated = 0;
        for &idx in order {
            if self.placements[idx].is_some() {
                continue;
            }
            for pref in students[idx].ranked() {
                let Some(position) = self.capacities.position(&pref.faculty) else {
                    continue;
                };
                if self.place(idx, position, PlacementSource::Preference(pref.rank)) {
                    seated += 1;
                    break;
                }
            }
        }
        seated
    }

    /// Phase 2, rank-major. Returns the number of students seated.
    fn assign_by_rank(&mut self, order: &[usize]) -> usize {
        let students = self.students;
        let max_rank = order
            .iter()
            .filter(|&&idx| self.placements[idx].is_none())
            .map(|&idx| students[idx].max_rank())
            .max()
            .unwrap_or(0);

        let mut seated = 0;
        for rank in 1..=max_rank {
            for &idx in order {
                if self.placements[idx].is_some() {
                    continue;
                }
                // Only the first faculty in column order at this rank is tried.
                let first = students[idx]
                    .preferences
                    .iter()
                    .filter(|p| p.rank == rank)
                    .find_map(|p| self.capacities.position(&p.faculty));
                let Some(position) = first else {
                    continue;
                };
                if self.place(idx, position, PlacementSource::Preference(rank)) {
                    seated += 1;
                }
            }
        }
        seated
    }

    /// Phase 3. Returns the number of students seated.
    fn assign_fallback(&mut self, order: &[usize]) -> usize {
        let remaining: Vec<usize> = order
            .iter()
            .copied()
            .filter(|&idx| self.placements[idx].is_none())
            .collect();
        if remaining.is_empty() {
            return 0;
        }
        info!(
            students = remaining.len(),
            "seating students without an available preference"
        );

        let mut cursor = 0;
        let mut seated = 0;
        for idx in remaining {
            let target = match self.config.fallback {
                FallbackPolicy::RoundRobin => self.next_round_robin(cursor),
                FallbackPolicy::LeastLoaded => self.least_loaded(),
            };
            match target {
                Some(position) if self.place(idx, position, PlacementSource::Fallback) => {
                    cursor = (position + 1) % self.capacities.len();
                    seated += 1;
                }
                _ => {
                    let roll = self.students[idx].roll.clone();
                    self.placements[idx] = Some(Placement::unassigned(roll.clone()));
                    self.push_warning(AllocationWarning::capacity_exhausted(roll));
                }
            }
        }
        seated
    }

    /// First faculty with room at or after `cursor`, wrapping around.
    fn next_round_robin(&self, cursor: usize) -> Option<usize> {
        let n = self.capacities.len();
        (0..n)
            .map(|step| (cursor + step) % n)
            .find(|&position| self.capacities.at(position).is_some_and(|c| c.has_room()))
    }

    /// Faculty with room and the fewest occupied seats; ties go to the
    /// earlier faculty.
    fn least_loaded(&self) -> Option<usize> {
        self.capacities
            .entries()
            .iter()
            .enumerate()
            .filter(|(_, c)| c.has_room())
            .min_by_key(|(_, c)| c.occupied)
            .map(|(position, _)| position)
    }
}
