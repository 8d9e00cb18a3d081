//! Student model.
//!
//! A student is identified by roll number and ranked by CGPA. Each student
//! carries an ordered list of faculty preferences; faculties missing from
//! the list are unranked.

use serde::{Deserialize, Serialize};

/// A faculty ranked by a student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preference {
    /// Faculty name (matches a schema column).
    pub faculty: String,
    /// Preference rank (1 = most preferred).
    pub rank: u32,
}

/// A student to be allocated.
///
/// Preferences are stored in column (canonical faculty) order, which is also
/// the tie-break order when a student gives two faculties the same rank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
    /// Unique roll number.
    pub roll: String,
    /// Student name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Cumulative grade point average (allocation priority, higher first).
    pub cgpa: f64,
    /// Ranked faculties in column order.
    pub preferences: Vec<Preference>,
}

impl StudentRecord {
    /// Creates a student with no preferences.
    pub fn new(roll: impl Into<String>, cgpa: f64) -> Self {
        Self {
            roll: roll.into(),
            name: String::new(),
            email: String::new(),
            cgpa,
            preferences: Vec::new(),
        }
    }

    /// Sets the student name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the email address.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Adds a ranked faculty.
    pub fn with_preference(mut self, faculty: impl Into<String>, rank: u32) -> Self {
        self.preferences.push(Preference {
            faculty: faculty.into(),
            rank,
        });
        self
    }

    /// Rank this student gave a faculty, if any.
    pub fn rank_for(&self, faculty: &str) -> Option<u32> {
        self.preferences
            .iter()
            .find(|p| p.faculty == faculty)
            .map(|p| p.rank)
    }

    /// Preferences in increasing rank order.
    ///
    /// Equal ranks keep column order (stable sort).
    pub fn ranked(&self) -> Vec<&Preference> {
        let mut prefs: Vec<&Preference> = self.preferences.iter().collect();
        prefs.sort_by_key(|p| p.rank);
        prefs
    }

    /// Faculty this student ranked at exactly `rank` (first in column order).
    pub fn faculty_at_rank(&self, rank: u32) -> Option<&str> {
        self.preferences
            .iter()
            .find(|p| p.rank == rank)
            .map(|p| p.faculty.as_str())
    }

    /// Highest rank number this student used (0 if none).
    pub fn max_rank(&self) -> u32 {
        self.preferences.iter().map(|p| p.rank).max().unwrap_or(0)
    }

    /// Whether the student ranked any faculty.
    pub fn has_preferences(&self) -> bool {
        !self.preferences.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_student_builder() {
        let s = StudentRecord::new("B21001", 8.75)
            .with_name("Asha")
            .with_email("asha@example.edu")
            .with_preference("Rao", 2)
            .with_preference("Iyer", 1);

        assert_eq!(s.roll, "B21001");
        assert_eq!(s.name, "Asha");
        assert_eq!(s.email, "asha@example.edu");
        assert!((s.cgpa - 8.75).abs() < 1e-10);
        assert_eq!(s.rank_for("Rao"), Some(2));
        assert_eq!(s.rank_for("Menon"), None);
        assert_eq!(s.max_rank(), 2);
        assert!(s.has_preferences());
    }

    #[test]
    fn test_ranked_order() {
        let s = StudentRecord::new("R1", 9.0)
            .with_preference("A", 3)
            .with_preference("B", 1)
            .with_preference("C", 2);

        let order: Vec<&str> = s.ranked().iter().map(|p| p.faculty.as_str()).collect();
        assert_eq!(order, vec!["B", "C", "A"]);
    }

    #[test]
    fn test_ranked_ties_keep_column_order() {
        let s = StudentRecord::new("R1", 9.0)
            .with_preference("A", 2)
            .with_preference("B", 1)
            .with_preference("C", 1);

        let order: Vec<&str> = s.ranked().iter().map(|p| p.faculty.as_str()).collect();
        assert_eq!(order, vec!["B", "C", "A"]);
        assert_eq!(s.faculty_at_rank(1), Some("B"));
        assert_eq!(s.faculty_at_rank(4), None);
    }

    #[test]
    fn test_student_without_preferences() {
        let s = StudentRecord::new("R1", 7.0);
        assert!(!s.has_preferences());
        assert_eq!(s.max_rank(), 0);
        assert!(s.ranked().is_empty());
    }
}
