//! CSV adapters.
//!
//! Readers turn CSV text into a [`StudentTable`] or a list of
//! [`OverrideEntry`]s. Writers emit the allocation and statistics tables.
//! All readers trim surrounding whitespace and accept ragged rows.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use csv::{ReaderBuilder, Trim, Writer};
use tracing::debug;

use super::StudentTable;
use crate::allocator::{AllocationOutcome, PreferenceStats};
use crate::error::{AllocationError, Result};
use crate::models::OverrideEntry;

fn reader<R: Read>(input: R) -> csv::Reader<R> {
    ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(input)
}

/// Reads a student table.
pub fn read_students<R: Read>(input: R) -> Result<StudentTable> {
    let mut rdr = reader(input);
    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        // Blank lines come through as a single empty field.
        if record.iter().all(str::is_empty) {
            continue;
        }
        rows.push(record.iter().map(str::to_string).collect::<Vec<_>>());
    }

    let table = StudentTable::from_rows(&headers, rows)?;
    debug!(
        students = table.len(),
        faculties = table.schema.len(),
        "read student table"
    );
    Ok(table)
}

/// Reads a student table from a file.
pub fn read_students_path(path: impl AsRef<Path>) -> Result<StudentTable> {
    read_students(File::open(path)?)
}

/// Reads an override table with `Faculty` and `Roll` columns.
///
/// Columns are located by name (case-insensitive), so extra columns are
/// ignored. Rows with an empty faculty or roll are skipped.
///
/// # Errors
/// `Schema` if either column is missing.
pub fn read_overrides<R: Read>(input: R) -> Result<Vec<OverrideEntry>> {
    let mut rdr = reader(input);
    let headers = rdr.headers()?.clone();
    let find = |name: &str| {
        headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
            .ok_or_else(|| AllocationError::schema(format!("override table has no '{name}' column")))
    };
    let faculty_col = find("Faculty")?;
    let roll_col = find("Roll")?;

    let mut entries = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let faculty = record.get(faculty_col).unwrap_or("");
        let roll = record.get(roll_col).unwrap_or("");
        if faculty.is_empty() || roll.is_empty() {
            continue;
        }
        entries.push(OverrideEntry::new(faculty, roll));
    }

    debug!(overrides = entries.len(), "read override table");
    Ok(entries)
}

/// Reads an override table from a file.
pub fn read_overrides_path(path: impl AsRef<Path>) -> Result<Vec<OverrideEntry>> {
    read_overrides(File::open(path)?)
}

/// Writes `Roll, Name, Email, CGPA, Allocated`, one row per student in
/// input order.
pub fn write_allocation<W: Write>(outcome: &AllocationOutcome, output: W) -> Result<()> {
    let mut writer = Writer::from_writer(output);
    writer.write_record(["Roll", "Name", "Email", "CGPA", "Allocated"])?;

    for row in &outcome.rows {
        let cgpa = row.cgpa.to_string();
        writer.write_record([
            row.roll.as_str(),
            row.name.as_str(),
            row.email.as_str(),
            cgpa.as_str(),
            outcome.allocated_label(row),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Writes `Faculty, Pref_1_Count, ..., Pref_K_Count, No_Preference_Count`,
/// one row per faculty in canonical order.
pub fn write_stats<W: Write>(stats: &PreferenceStats, output: W) -> Result<()> {
    let mut writer = Writer::from_writer(output);

    let mut header = vec!["Faculty".to_string()];
    header.extend((1..=stats.max_rank).map(|k| format!("Pref_{k}_Count")));
    header.push("No_Preference_Count".to_string());
    writer.write_record(&header)?;

    for stat in &stats.faculties {
        let mut record = vec![stat.faculty.clone()];
        record.extend(stat.by_rank.iter().map(usize::to_string));
        record.push(stat.no_preference.to_string());
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

/// Writes the allocation table to a file.
pub fn write_allocation_path(outcome: &AllocationOutcome, path: impl AsRef<Path>) -> Result<()> {
    write_allocation(outcome, File::create(path)?)
}

/// Writes a statistics table to a file.
pub fn write_stats_path(stats: &PreferenceStats, path: impl AsRef<Path>) -> Result<()> {
    write_stats(stats, File::create(path)?)
}
