//! Student allocation and preference reporting.
//!
//! [`Allocator`] runs the full pipeline for one student table:
//! schema selection, validation, capacity planning, the three-phase
//! allocation, and the preference report. Every run builds its own
//! capacity table, so runs never share mutable state.
//!
//! # Usage
//!
//! ```
//! use u_assign::allocator::allocate;
//! use u_assign::models::{OverrideEntry, StudentRecord};
//! use u_assign::schema::Schema;
//! use u_assign::table::StudentTable;
//!
//! let schema = Schema::new(["Rao", "Iyer"]).unwrap();
//! let table = StudentTable::new(
//!     schema,
//!     vec![
//!         StudentRecord::new("R1", 9.1).with_preference("Rao", 1),
//!         StudentRecord::new("R2", 8.2).with_preference("Rao", 1),
//!     ],
//! );
//! let overrides = vec![OverrideEntry::new("Rao", "R2")];
//!
//! let outcome = allocate(&table, &overrides).unwrap();
//! assert_eq!(outcome.faculty_of("R2"), Some("Rao"));
//! assert_eq!(outcome.faculty_of("R1"), Some("Iyer"));
//! ```

mod engine;
mod report;

pub use report::{FacultyPreferenceStat, PreferenceStats};

use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::config::AllocationConfig;
use crate::error::Result;
use crate::models::{AllocationWarning, CapacityTable, OverrideEntry, Placement, PlacementSource};
use crate::planner::plan_capacities;
use crate::table::StudentTable;
use crate::validation::validate_input;
use engine::AllocationRun;

/// One row of the allocation table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationRow {
    /// Student roll number.
    pub roll: String,
    /// Student name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// CGPA as loaded.
    pub cgpa: f64,
    /// Assigned faculty, `None` when unassigned.
    pub faculty: Option<String>,
    /// Phase that produced the placement.
    pub source: PlacementSource,
}

/// Everything a run produces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationOutcome {
    /// One row per input student, in input order.
    pub rows: Vec<AllocationRow>,
    /// Preference statistics of the final allocation.
    pub stats: PreferenceStats,
    /// Non-fatal conditions, in the order they were met.
    pub warnings: Vec<AllocationWarning>,
    /// Final seat limits and loads.
    pub capacities: CapacityTable,
    /// Label used for unassigned students.
    pub unassigned_label: String,
}

impl AllocationOutcome {
    /// Assigned faculty for a roll number.
    pub fn faculty_of(&self, roll: &str) -> Option<&str> {
        self.row(roll).and_then(|r| r.faculty.as_deref())
    }

    /// Allocation row for a roll number.
    pub fn row(&self, roll: &str) -> Option<&AllocationRow> {
        self.rows.iter().find(|r| r.roll == roll)
    }

    /// Value for the `Allocated` column of a row.
    pub fn allocated_label<'a>(&'a self, row: &'a AllocationRow) -> &'a str {
        row.faculty.as_deref().unwrap_or(&self.unassigned_label)
    }

    /// Number of students with a faculty.
    pub fn assigned_count(&self) -> usize {
        self.rows.iter().filter(|r| r.faculty.is_some()).count()
    }

    /// Number of students left unassigned.
    pub fn unassigned_count(&self) -> usize {
        self.rows.len() - self.assigned_count()
    }

    /// Students placed at a faculty.
    pub fn load_of(&self, faculty: &str) -> usize {
        self.rows
            .iter()
            .filter(|r| r.faculty.as_deref() == Some(faculty))
            .count()
    }

    /// The allocation expressed as a full override set.
    ///
    /// Feeding this back with the same student table reproduces the same
    /// placements.
    pub fn to_overrides(&self) -> Vec<OverrideEntry> {
        self.rows
            .iter()
            .filter_map(|r| {
                r.faculty
                    .as_ref()
                    .map(|f| OverrideEntry::new(f.clone(), r.roll.clone()))
            })
            .collect()
    }
}

/// Allocation pipeline with a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct Allocator {
    config: AllocationConfig,
}

impl Allocator {
    /// Creates an allocator with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the configuration.
    pub fn with_config(mut self, config: AllocationConfig) -> Self {
        self.config = config;
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &AllocationConfig {
        &self.config
    }

    /// Allocates every student in `table`.
    ///
    /// Overrides whose faculty equals the unassigned label are ignored, so
    /// an allocation table can be fed back as an override set.
    ///
    /// # Errors
    /// - `Schema` if the faculty limit is zero, no faculties remain, or an
    ///   override names an unknown faculty.
    /// - `Parse` if a roll repeats, a CGPA is not finite, or a rank is zero
    ///   or above the number of faculty columns.
    pub fn allocate(
        &self,
        table: &StudentTable,
        overrides: &[OverrideEntry],
    ) -> Result<AllocationOutcome> {
        let schema = match self.config.faculty_limit {
            Some(limit) => {
                if limit > table.schema.len() {
                    warn!(
                        requested = limit,
                        available = table.schema.len(),
                        "faculty limit exceeds faculty columns; using all"
                    );
                }
                table.schema.limited(limit)?
            }
            None => table.schema.clone(),
        };
        info!(
            faculties = schema.len(),
            students = table.len(),
            overrides = overrides.len(),
            "starting allocation"
        );

        let label = self.config.unassigned_label.as_str();
        let overrides: Vec<OverrideEntry> = overrides
            .iter()
            .filter(|o| o.faculty != label)
            .cloned()
            .collect();

        let checked = validate_input(&schema, &table.students, &overrides, table.schema.len());
        if let Err(mut errors) = checked {
            for e in &errors {
                error!(kind = ?e.kind, row = ?e.row, "{}", e.message);
            }
            let first = errors
                .iter()
                .position(|e| e.kind.is_schema())
                .unwrap_or(0);
            return Err(errors.swap_remove(first).into());
        }

        let capacities = plan_capacities(table.len(), &schema)?;
        let result =
            AllocationRun::new(&table.students, capacities, &self.config).execute(&overrides);

        let rows: Vec<AllocationRow> = table
            .students
            .iter()
            .zip(result.placements)
            .map(|(student, placement)| {
                let Placement { faculty, source, .. } = placement;
                AllocationRow {
                    roll: student.roll.clone(),
                    name: student.name.clone(),
                    email: student.email.clone(),
                    cgpa: student.cgpa,
                    faculty,
                    source,
                }
            })
            .collect();

        let stats = PreferenceStats::from_allocation(&schema, &table.students, &rows);
        let outcome = AllocationOutcome {
            rows,
            stats,
            warnings: result.warnings,
            capacities: result.capacities,
            unassigned_label: self.config.unassigned_label.clone(),
        };

        info!(
            assigned = outcome.assigned_count(),
            unassigned = outcome.unassigned_count(),
            warnings = outcome.warnings.len(),
            "allocation finished"
        );
        Ok(outcome)
    }
}

/// Allocates with the default configuration.
pub fn allocate(table: &StudentTable, overrides: &[OverrideEntry]) -> Result<AllocationOutcome> {
    Allocator::new().allocate(table, overrides)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FallbackPolicy, PreferencePass};
    use crate::models::{StudentRecord, WarningKind};
    use crate::schema::Schema;

    fn four_students() -> StudentTable {
        StudentTable::new(
            Schema::new(["Rao", "Iyer"]).unwrap(),
            vec![
                StudentRecord::new("R1", 9.1)
                    .with_preference("Rao", 1)
                    .with_preference("Iyer", 2),
                StudentRecord::new("R2", 8.9)
                    .with_preference("Rao", 1)
                    .with_preference("Iyer", 2),
                StudentRecord::new("R3", 8.5)
                    .with_preference("Rao", 1)
                    .with_preference("Iyer", 2),
                StudentRecord::new("R4", 7.2)
                    .with_preference("Iyer", 1)
                    .with_preference("Rao", 2),
            ],
        )
    }

    #[test]
    fn test_four_students_two_faculties() {
        let outcome = allocate(&four_students(), &[]).unwrap();

        assert_eq!(outcome.faculty_of("R1"), Some("Rao"));
        assert_eq!(outcome.faculty_of("R2"), Some("Rao"));
        assert_eq!(outcome.faculty_of("R3"), Some("Iyer"));
        assert_eq!(outcome.faculty_of("R4"), Some("Iyer"));
        assert_eq!(outcome.row("R3").unwrap().source, PlacementSource::Preference(2));
        assert_eq!(outcome.load_of("Rao"), 2);
        assert_eq!(outcome.load_of("Iyer"), 2);
        assert!(outcome.warnings.is_empty());

        let rao = outcome.stats.get("Rao").unwrap();
        assert_eq!(rao.by_rank, vec![2, 0]);
        let iyer = outcome.stats.get("Iyer").unwrap();
        assert_eq!(iyer.by_rank, vec![1, 1]);
    }

    #[test]
    fn test_rows_keep_input_order() {
        let outcome = allocate(&four_students(), &[]).unwrap();
        let rolls: Vec<&str> = outcome.rows.iter().map(|r| r.roll.as_str()).collect();
        assert_eq!(rolls, vec!["R1", "R2", "R3", "R4"]);
    }

    #[test]
    fn test_remainder_seat_to_first_faculty() {
        let mut table = four_students();
        table.students.push(StudentRecord::new("R5", 6.0));

        let outcome = allocate(&table, &[]).unwrap();
        assert_eq!(outcome.capacities.get("Rao").unwrap().limit, 3);
        assert_eq!(outcome.capacities.get("Iyer").unwrap().limit, 2);
        assert_eq!(outcome.faculty_of("R3"), Some("Rao"));
        assert_eq!(outcome.row("R5").unwrap().source, PlacementSource::Fallback);
    }

    #[test]
    fn test_override_beats_cgpa() {
        let overrides = vec![OverrideEntry::new("Rao", "R4")];
        let outcome = allocate(&four_students(), &overrides).unwrap();

        assert_eq!(outcome.faculty_of("R4"), Some("Rao"));
        assert_eq!(outcome.row("R4").unwrap().source, PlacementSource::Override);
        assert_eq!(outcome.faculty_of("R1"), Some("Rao"));
        assert_eq!(outcome.faculty_of("R2"), Some("Iyer"));
        // R4 ranked Rao second, so the report counts rank 2.
        assert_eq!(outcome.stats.get("Rao").unwrap().by_rank, vec![1, 1]);
    }

    #[test]
    fn test_override_to_full_faculty_falls_through() {
        let overrides = vec![
            OverrideEntry::new("Iyer", "R1"),
            OverrideEntry::new("Iyer", "R2"),
            OverrideEntry::new("Iyer", "R4"),
        ];
        let outcome = allocate(&four_students(), &overrides).unwrap();

        assert_eq!(outcome.warnings.len(), 1);
        assert_eq!(outcome.warnings[0].kind, WarningKind::OverrideCapacity);
        assert_eq!(outcome.warnings[0].roll, "R4");
        // R4 goes through the preference pass and takes its rank-2 faculty.
        assert_eq!(outcome.faculty_of("R4"), Some("Rao"));
        assert_eq!(outcome.row("R4").unwrap().source, PlacementSource::Preference(2));
    }

    #[test]
    fn test_unranked_faculty_reached_by_fallback() {
        let table = StudentTable::new(
            Schema::new(["A", "B", "C"]).unwrap(),
            vec![
                StudentRecord::new("R1", 9.0).with_preference("A", 1),
                StudentRecord::new("R2", 8.0).with_preference("A", 1),
                StudentRecord::new("R3", 7.0).with_preference("A", 1),
            ],
        );
        let outcome = allocate(&table, &[]).unwrap();

        assert_eq!(outcome.faculty_of("R1"), Some("A"));
        assert_eq!(outcome.faculty_of("R2"), Some("B"));
        assert_eq!(outcome.faculty_of("R3"), Some("C"));
        assert_eq!(outcome.stats.get("B").unwrap().no_preference, 1);
    }

    #[test]
    fn test_unknown_override_faculty_is_fatal() {
        let overrides = vec![OverrideEntry::new("Bose", "R1")];
        let err = allocate(&four_students(), &overrides).unwrap_err();
        assert!(err.is_schema());
    }

    #[test]
    fn test_duplicate_roll_is_fatal() {
        let mut table = four_students();
        table.students.push(StudentRecord::new("R2", 6.0));
        let err = allocate(&table, &[]).unwrap_err();
        assert!(err.is_parse());
    }

    #[test]
    fn test_rank_above_faculty_count_is_fatal() {
        for pass in [PreferencePass::ByStudent, PreferencePass::ByRank] {
            let table = StudentTable::new(
                Schema::new(["Rao", "Iyer"]).unwrap(),
                vec![
                    StudentRecord::new("R1", 9.0).with_preference("Rao", 4_000_000_000),
                    StudentRecord::new("R2", 8.0).with_preference("Iyer", 1),
                ],
            );
            let config = AllocationConfig::default().with_preference_pass(pass);
            let err = Allocator::new()
                .with_config(config)
                .allocate(&table, &[])
                .unwrap_err();
            assert!(err.is_parse());
        }
    }

    #[test]
    fn test_faculty_limit_keeps_full_rank_range() {
        let table = StudentTable::new(
            Schema::new(["Rao", "Iyer", "Menon"]).unwrap(),
            vec![
                StudentRecord::new("R1", 9.0)
                    .with_preference("Menon", 1)
                    .with_preference("Iyer", 3),
                StudentRecord::new("R2", 8.0).with_preference("Rao", 1),
            ],
        );
        let config = AllocationConfig::default().with_faculty_limit(2);
        let outcome = Allocator::new().with_config(config).allocate(&table, &[]).unwrap();

        assert_eq!(outcome.faculty_of("R1"), Some("Iyer"));
        assert_eq!(outcome.stats.max_rank, 3);
        assert_eq!(outcome.stats.get("Iyer").unwrap().count_for_rank(3), 1);
    }

    #[test]
    fn test_unassigned_label_overrides_ignored() {
        let overrides = vec![OverrideEntry::new("Unassigned", "R1")];
        let outcome = allocate(&four_students(), &overrides).unwrap();
        assert!(outcome.warnings.is_empty());
        assert_eq!(outcome.faculty_of("R1"), Some("Rao"));
    }

    #[test]
    fn test_empty_table() {
        let table = StudentTable::new(Schema::new(["A", "B"]).unwrap(), Vec::new());
        let outcome = allocate(&table, &[]).unwrap();
        assert!(outcome.rows.is_empty());
        assert_eq!(outcome.capacities.total_limit(), 0);
        assert_eq!(outcome.stats.faculties.len(), 2);
    }

    #[test]
    fn test_faculty_limit() {
        let config = AllocationConfig::default().with_faculty_limit(1);
        let outcome = Allocator::new()
            .with_config(config)
            .allocate(&four_students(), &[])
            .unwrap();

        assert!(outcome.rows.iter().all(|r| r.faculty.as_deref() == Some("Rao")));
        assert_eq!(outcome.stats.faculties.len(), 1);
        assert_eq!(outcome.row("R4").unwrap().source, PlacementSource::Preference(2));
    }

    #[test]
    fn test_faculty_limit_zero() {
        let config = AllocationConfig::default().with_faculty_limit(0);
        let err = Allocator::new()
            .with_config(config)
            .allocate(&four_students(), &[])
            .unwrap_err();
        assert!(err.is_schema());
    }

    #[test]
    fn test_round_trip_through_overrides() {
        let config = AllocationConfig::default().with_fallback(FallbackPolicy::LeastLoaded);
        let allocator = Allocator::new().with_config(config);
        let mut table = four_students();
        table.students.push(StudentRecord::new("R5", 6.0));

        let first = allocator.allocate(&table, &[]).unwrap();
        let second = allocator.allocate(&table, &first.to_overrides()).unwrap();

        let a: Vec<_> = first.rows.iter().map(|r| r.faculty.clone()).collect();
        let b: Vec<_> = second.rows.iter().map(|r| r.faculty.clone()).collect();
        assert_eq!(a, b);
        assert!(second
            .rows
            .iter()
            .all(|r| r.source == PlacementSource::Override));
    }

    #[test]
    fn test_outcome_serializes() {
        let outcome = allocate(&four_students(), &[]).unwrap();
        let json = serde_json::to_string(&outcome).unwrap();
        let back: AllocationOutcome = serde_json::from_str(&json).unwrap();
        assert_eq!(back.rows.len(), 4);
        assert_eq!(back.faculty_of("R3"), Some("Iyer"));
        assert_eq!(back.stats, outcome.stats);
        assert_eq!(back.capacities.position("Iyer"), Some(1));
    }
}
