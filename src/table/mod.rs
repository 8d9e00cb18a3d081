//! Tabular inputs and outputs.
//!
//! [`StudentTable`] is the parsed form of the student sheet: a resolved
//! [`Schema`] plus one [`StudentRecord`] per data row, in file order. The
//! [`io`] submodule reads and writes the CSV forms of every table.

pub mod io;

use serde::{Deserialize, Serialize};

use crate::error::{AllocationError, Result};
use crate::models::StudentRecord;
use crate::schema::{Schema, FIXED_COLUMNS};

/// Parsed student table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentTable {
    /// Canonical faculty ordering.
    pub schema: Schema,
    /// Students in input order.
    pub students: Vec<StudentRecord>,
}

impl StudentTable {
    /// Creates a table from already-built records.
    pub fn new(schema: Schema, students: Vec<StudentRecord>) -> Self {
        Self { schema, students }
    }

    /// Parses a header row and raw data rows.
    ///
    /// Short rows are padded with empty cells, so trailing faculties may be
    /// left out. Preference cells that are empty are unranked.
    ///
    /// # Errors
    /// - `Schema` if the header row does not resolve.
    /// - `Parse` if a roll is empty, a CGPA is not a finite number, or a
    ///   preference cell is not an integer from 1 to the faculty count.
    pub fn from_rows<H, R, C>(headers: &[H], rows: R) -> Result<Self>
    where
        H: AsRef<str>,
        R: IntoIterator<Item = Vec<C>>,
        C: AsRef<str>,
    {
        let schema = Schema::from_headers(headers)?;
        let students = rows
            .into_iter()
            .enumerate()
            .map(|(i, row)| parse_student(&schema, i + 1, &row))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { schema, students })
    }

    /// Number of students.
    pub fn len(&self) -> usize {
        self.students.len()
    }

    /// Whether the table has no students.
    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    /// Looks up a student by roll number.
    pub fn student(&self, roll: &str) -> Option<&StudentRecord> {
        self.students.iter().find(|s| s.roll == roll)
    }
}

fn cell<C: AsRef<str>>(row: &[C], index: usize) -> &str {
    row.get(index).map(|c| c.as_ref().trim()).unwrap_or("")
}

fn parse_student<C: AsRef<str>>(schema: &Schema, row_no: usize, row: &[C]) -> Result<StudentRecord> {
    let roll = cell(row, 0);
    if roll.is_empty() {
        return Err(AllocationError::parse(row_no, "empty Roll"));
    }

    let cgpa = parse_cgpa(cell(row, 3))
        .map_err(|msg| AllocationError::parse(row_no, format!("roll '{roll}': {msg}")))?;

    let mut student = StudentRecord::new(roll, cgpa)
        .with_name(cell(row, 1))
        .with_email(cell(row, 2));

    let max_rank = u32::try_from(schema.len()).unwrap_or(u32::MAX);
    for (i, faculty) in schema.faculties().iter().enumerate() {
        let raw = cell(row, FIXED_COLUMNS.len() + i);
        let rank = parse_rank(raw, max_rank).map_err(|msg| {
            AllocationError::parse(row_no, format!("roll '{roll}', faculty '{faculty}': {msg}"))
        })?;
        if let Some(rank) = rank {
            student = student.with_preference(faculty.clone(), rank);
        }
    }

    Ok(student)
}

/// Parses a CGPA cell. Empty, non-numeric, and non-finite values are rejected.
pub fn parse_cgpa(raw: &str) -> std::result::Result<f64, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err("missing CGPA".to_string());
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(format!("CGPA '{raw}' is not a number")),
    }
}

/// Parses a preference cell.
///
/// Empty means unranked. Integral floats such as `"2.0"` are accepted since
/// spreadsheet exports often write integer columns that way. A rank must lie
/// in `1..=max_rank`, where `max_rank` is the number of faculty columns.
pub fn parse_rank(raw: &str, max_rank: u32) -> std::result::Result<Option<u32>, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    let rank = match raw.parse::<u32>() {
        Ok(rank) => rank,
        Err(_) => match raw.parse::<f64>() {
            Ok(v) if v.fract() == 0.0 && v >= 0.0 && v <= f64::from(u32::MAX) => v as u32,
            _ => return Err(format!("preference '{raw}' is not a positive integer")),
        },
    };
    if rank == 0 {
        Err("preference rank must be at least 1".to_string())
    } else if rank > max_rank {
        Err(format!("preference rank {rank} exceeds the {max_rank} faculties"))
    } else {
        Ok(Some(rank))
    }
}
