//! Input validation for allocation runs.
//!
//! Checks structural integrity of students and overrides before any seat
//! is handed out. Detects:
//! - Duplicate or empty roll numbers
//! - Non-finite CGPA values
//! - Preference ranks outside `1..=faculty count`
//! - Overrides naming a faculty outside the schema
//!
//! Every issue is collected; the caller decides which one to report.

use std::collections::HashMap;

use crate::error::AllocationError;
use crate::models::{OverrideEntry, StudentRecord};
use crate::schema::Schema;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// 1-based student row the error refers to, if any.
    pub row: Option<usize>,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two students share the same roll number.
    DuplicateRoll,
    /// A student has an empty roll number.
    EmptyRoll,
    /// CGPA is NaN or infinite, so students cannot be ranked.
    InvalidCgpa,
    /// A preference rank is zero or above the faculty count.
    InvalidRank,
    /// An override names a faculty that is not in the schema.
    UnknownFaculty,
}

impl ValidationErrorKind {
    /// Whether this kind is a structural (schema) problem rather than a
    /// bad field value.
    pub fn is_schema(self) -> bool {
        matches!(self, Self::UnknownFaculty)
    }
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, row: Option<usize>, message: impl Into<String>) -> Self {
        Self {
            kind,
            row,
            message: message.into(),
        }
    }
}

impl From<ValidationError> for AllocationError {
    fn from(err: ValidationError) -> Self {
        if err.kind.is_schema() {
            AllocationError::Schema(err.message)
        } else {
            AllocationError::Parse {
                row: err.row.unwrap_or(0),
                message: err.message,
            }
        }
    }
}

/// Validates the inputs of an allocation run.
///
/// Checks:
/// 1. No empty roll numbers
/// 2. No duplicate roll numbers
/// 3. Every CGPA is finite
/// 4. Every preference rank lies in `1..=rank_limit`
/// 5. Every override names a faculty in `schema`
///
/// `rank_limit` is the number of faculty columns in the student table. It
/// can exceed `schema.len()` when the run considers only some faculties.
///
/// Override rolls are not checked here: an unknown roll is a warning raised
/// during allocation, not a fatal error.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(
    schema: &Schema,
    students: &[StudentRecord],
    overrides: &[OverrideEntry],
    rank_limit: usize,
) -> ValidationResult {
    let mut errors = Vec::new();
    let mut first_row: HashMap<&str, usize> = HashMap::new();

    for (i, student) in students.iter().enumerate() {
        let row = i + 1;

        if student.roll.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyRoll,
                Some(row),
                "empty roll number",
            ));
        } else if let Some(&earlier) = first_row.get(student.roll.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateRoll,
                Some(row),
                format!(
                    "duplicate roll '{}' (first seen at row {earlier})",
                    student.roll
                ),
            ));
        } else {
            first_row.insert(student.roll.as_str(), row);
        }

        if !student.cgpa.is_finite() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidCgpa,
                Some(row),
                format!("roll '{}' has non-finite CGPA {}", student.roll, student.cgpa),
            ));
        }

        for pref in &student.preferences {
            if pref.rank == 0 || pref.rank as usize > rank_limit {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidRank,
                    Some(row),
                    format!(
                        "roll '{}' gives faculty '{}' rank {} (expected 1 to {rank_limit})",
                        student.roll, pref.faculty, pref.rank
                    ),
                ));
            }
        }
    }

    for entry in overrides {
        if !schema.contains(&entry.faculty) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownFaculty,
                None,
                format!(
                    "override for roll '{}' names unknown faculty '{}'",
                    entry.roll, entry.faculty
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> Schema {
        Schema::new(["Rao", "Iyer"]).unwrap()
    }

    fn sample_students() -> Vec<StudentRecord> {
        vec![
            StudentRecord::new("R1", 9.1).with_preference("Rao", 1),
            StudentRecord::new("R2", 8.4).with_preference("Iyer", 1),
        ]
    }

    #[test]
    fn test_valid_input() {
        let overrides = vec![OverrideEntry::new("Iyer", "R1")];
        assert!(validate_input(&schema(), &sample_students(), &overrides, 2).is_ok());
    }

    #[test]
    fn test_unknown_override_roll_is_not_an_error() {
        let overrides = vec![OverrideEntry::new("Iyer", "R99")];
        assert!(validate_input(&schema(), &sample_students(), &overrides, 2).is_ok());
    }

    #[test]
    fn test_duplicate_roll() {
        let mut students = sample_students();
        students.push(StudentRecord::new("R1", 7.0));

        let errors = validate_input(&schema(), &students, &[], 2).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::DuplicateRoll);
        assert_eq!(errors[0].row, Some(3));
        assert!(errors[0].message.contains("row 1"));
    }

    #[test]
    fn test_empty_roll() {
        let students = vec![StudentRecord::new("", 7.0)];
        let errors = validate_input(&schema(), &students, &[], 2).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::EmptyRoll));
    }

    #[test]
    fn test_invalid_cgpa() {
        let students = vec![StudentRecord::new("R1", f64::NAN)];
        let errors = validate_input(&schema(), &students, &[], 2).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::InvalidCgpa));
    }

    #[test]
    fn test_zero_rank() {
        let students = vec![StudentRecord::new("R1", 8.0).with_preference("Rao", 0)];
        let errors = validate_input(&schema(), &students, &[], 2).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::InvalidRank);
    }

    #[test]
    fn test_rank_above_limit() {
        let students = vec![StudentRecord::new("R1", 8.0).with_preference("Rao", 4_000_000_000)];
        let errors = validate_input(&schema(), &students, &[], 2).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::InvalidRank);
        assert_eq!(errors[0].row, Some(1));

        let err: AllocationError = errors[0].clone().into();
        assert!(err.is_parse());
    }

    #[test]
    fn test_rank_limit_may_exceed_schema() {
        let students = vec![StudentRecord::new("R1", 8.0).with_preference("Rao", 3)];
        assert!(validate_input(&schema(), &students, &[], 3).is_ok());
    }

    #[test]
    fn test_unknown_override_faculty() {
        let overrides = vec![OverrideEntry::new("Bose", "R1")];
        let errors = validate_input(&schema(), &sample_students(), &overrides, 2).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::UnknownFaculty);
        assert!(errors[0].kind.is_schema());

        let err: AllocationError = errors[0].clone().into();
        assert!(err.is_schema());
    }

    #[test]
    fn test_multiple_errors() {
        let students = vec![
            StudentRecord::new("R1", f64::INFINITY),
            StudentRecord::new("R1", 8.0),
        ];
        let overrides = vec![OverrideEntry::new("Bose", "R1")];

        let errors = validate_input(&schema(), &students, &overrides, 2).unwrap_err();
        assert!(errors.len() >= 3);
    }
}
