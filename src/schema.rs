//! Schema resolution for student tables.
//!
//! The student table starts with four fixed columns (`Roll`, `Name`,
//! `Email`, `CGPA`); every column after them names a faculty. The
//! left-to-right order of those columns is the canonical faculty order used
//! for remainder seats, tie-breaks, and round-robin fallback. It is never
//! re-sorted.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::{AllocationError, Result};

/// Fixed leading columns of a student table.
pub const FIXED_COLUMNS: [&str; 4] = ["Roll", "Name", "Email", "CGPA"];

/// Canonical faculty ordering for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    faculty_order: Vec<String>,
}

impl Schema {
    /// Builds a schema from an explicit faculty list.
    ///
    /// # Errors
    /// `Schema` if the list is empty or contains a duplicate name.
    pub fn new<I, S>(faculties: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let faculty_order: Vec<String> = faculties.into_iter().map(Into::into).collect();
        if faculty_order.is_empty() {
            return Err(AllocationError::schema("no faculty columns found"));
        }

        let mut seen = HashSet::new();
        for name in &faculty_order {
            if name.is_empty() {
                return Err(AllocationError::schema("faculty column with an empty name"));
            }
            if !seen.insert(name.as_str()) {
                return Err(AllocationError::schema(format!(
                    "duplicate faculty column '{name}'"
                )));
            }
        }

        Ok(Self { faculty_order })
    }

    /// Resolves the schema from a student table header row.
    ///
    /// The first four headers must be `Roll`, `Name`, `Email`, `CGPA`
    /// (case-insensitive, surrounding whitespace ignored). Every following
    /// header is a faculty, in column order.
    ///
    /// # Errors
    /// `Schema` if fewer than four columns exist, a fixed column is
    /// misnamed, no faculty columns follow, or a faculty name repeats.
    pub fn from_headers<S: AsRef<str>>(headers: &[S]) -> Result<Self> {
        if headers.len() < FIXED_COLUMNS.len() {
            return Err(AllocationError::schema(format!(
                "expected at least {} columns ({}), found {}",
                FIXED_COLUMNS.len(),
                FIXED_COLUMNS.join(", "),
                headers.len()
            )));
        }

        for (found, expected) in headers.iter().zip(FIXED_COLUMNS) {
            if !found.as_ref().trim().eq_ignore_ascii_case(expected) {
                return Err(AllocationError::schema(format!(
                    "expected column '{expected}', found '{}'",
                    found.as_ref().trim()
                )));
            }
        }

        Self::new(
            headers[FIXED_COLUMNS.len()..]
                .iter()
                .map(|h| h.as_ref().trim().to_string()),
        )
    }

    /// Keeps only the first `limit` faculties.
    ///
    /// A limit above the faculty count keeps every faculty.
    ///
    /// # Errors
    /// `Schema` if `limit` is zero.
    pub fn limited(&self, limit: usize) -> Result<Self> {
        if limit == 0 {
            return Err(AllocationError::schema("faculty limit must be at least 1"));
        }
        Ok(Self {
            faculty_order: self.faculty_order.iter().take(limit).cloned().collect(),
        })
    }

    /// Faculty names in canonical order.
    pub fn faculties(&self) -> &[String] {
        &self.faculty_order
    }

    /// Number of faculties.
    pub fn len(&self) -> usize {
        self.faculty_order.len()
    }

    /// Always `false` for a resolved schema; kept for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.faculty_order.is_empty()
    }

    /// Canonical position of a faculty.
    pub fn position(&self, faculty: &str) -> Option<usize> {
        self.faculty_order.iter().position(|f| f == faculty)
    }

    /// Whether the schema contains a faculty.
    pub fn contains(&self, faculty: &str) -> bool {
        self.position(faculty).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_headers() {
        let schema =
            Schema::from_headers(&["Roll", "Name", "Email", "CGPA", "Rao", "Iyer", "Menon"])
                .unwrap();
        assert_eq!(schema.faculties(), &["Rao", "Iyer", "Menon"]);
        assert_eq!(schema.len(), 3);
        assert_eq!(schema.position("Iyer"), Some(1));
        assert!(!schema.contains("Bose"));
    }

    #[test]
    fn test_order_is_not_sorted() {
        let schema = Schema::from_headers(&["Roll", "Name", "Email", "CGPA", "Zed", "Abe"]).unwrap();
        assert_eq!(schema.faculties(), &["Zed", "Abe"]);
    }

    #[test]
    fn test_fixed_columns_case_insensitive() {
        let schema = Schema::from_headers(&[" roll", "NAME", "email ", "Cgpa", "Rao"]).unwrap();
        assert_eq!(schema.faculties(), &["Rao"]);
    }

    #[test]
    fn test_too_few_columns() {
        let err = Schema::from_headers(&["Roll", "Name", "CGPA"]).unwrap_err();
        assert!(err.is_schema());
    }

    #[test]
    fn test_no_faculty_columns() {
        let err = Schema::from_headers(&["Roll", "Name", "Email", "CGPA"]).unwrap_err();
        assert!(err.is_schema());
        assert!(err.to_string().contains("no faculty"));
    }

    #[test]
    fn test_duplicate_faculty() {
        let err =
            Schema::from_headers(&["Roll", "Name", "Email", "CGPA", "Rao", "Iyer", "Rao"])
                .unwrap_err();
        assert!(err.to_string().contains("duplicate faculty column 'Rao'"));
    }

    #[test]
    fn test_misnamed_fixed_column() {
        let err = Schema::from_headers(&["Roll", "Name", "Mail", "CGPA", "Rao"]).unwrap_err();
        assert!(err.to_string().contains("'Email'"));
    }

    #[test]
    fn test_limited() {
        let schema = Schema::new(["A", "B", "C"]).unwrap();
        assert_eq!(schema.limited(2).unwrap().faculties(), &["A", "B"]);
        assert_eq!(schema.limited(10).unwrap().len(), 3);
        assert!(schema.limited(0).is_err());
    }
}
