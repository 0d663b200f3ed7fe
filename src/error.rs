use std::path::PathBuf;

use thiserror::Error;

/// Failures raised by roster operations and record construction.
#[derive(Debug, Error)]
pub enum RosterError {
    #[error("invalid score {0}: must be between 0 and 100")]
    InvalidScore(f64),

    #[error("expected {expected} subject scores, got {found}")]
    ScoreCount { expected: usize, found: usize },

    #[error("student id '{0}' already exists")]
    DuplicateId(String),

    #[error("student name '{0}' already exists")]
    DuplicateName(String),

    #[error("student '{0}' not found")]
    NotFound(String),
}

/// Failures at the spreadsheet-file boundary. Write failures are reported as
/// warnings by the session and never roll back the in-memory roster.
#[derive(Debug, Error)]
pub enum SheetError {
    #[error("file not found: {}", .0.display())]
    Missing(PathBuf),

    #[error("header mismatch at column {column}: expected '{expected}', found '{found}'")]
    SchemaMismatch {
        column: usize,
        expected: String,
        found: String,
    },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
