//! Error types for allocation runs.
//!
//! Fatal conditions abort a run before any output is produced. Non-fatal
//! conditions are not errors; they are collected as
//! [`AllocationWarning`](crate::models::AllocationWarning)s on the outcome.

use thiserror::Error;

/// Fatal error raised while loading inputs or running an allocation.
#[derive(Error, Debug)]
pub enum AllocationError {
    /// Structural problem with the input tables (missing columns, no
    /// faculties, duplicate or unknown faculty names).
    #[error("Schema error: {0}")]
    Schema(String),

    /// A required field failed to parse. `row` is 1-based and counts data
    /// rows only (the header is not row 1).
    #[error("Parse error at row {row}: {message}")]
    Parse { row: usize, message: String },

    /// Underlying CSV reader/writer failure.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// IO errors from file adapters.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AllocationError>;

impl AllocationError {
    /// Creates a schema error.
    pub fn schema(msg: impl Into<String>) -> Self {
        Self::Schema(msg.into())
    }

    /// Creates a parse error for a data row.
    pub fn parse(row: usize, msg: impl Into<String>) -> Self {
        Self::Parse {
            row,
            message: msg.into(),
        }
    }

    /// Whether this error belongs to the schema class.
    pub fn is_schema(&self) -> bool {
        matches!(self, Self::Schema(_))
    }

    /// Whether this error belongs to the parse class.
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }
}
