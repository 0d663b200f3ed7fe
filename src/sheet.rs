use std::path::Path;

use chrono::Local;
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use tracing::warn;

use crate::error::SheetError;
use crate::grades::{SUBJECTS, SUBJECT_COUNT};
use crate::roster::RosterStore;
use crate::student::StudentRecord;

/// Number of stored (non-derived) columns: id, name, age, gender, dob, email
/// plus the seven subject scores.
const STORED_COLUMNS: usize = 6 + SUBJECT_COUNT;

/// Row number (1-based) of the column header in a grade report; data starts on
/// the next row. Rows 1-6 hold the title banner and summary lines.
pub const REPORT_HEADER_ROW: usize = 8;

/// Fixed column schema shared by plain exports and report exports.
pub fn headers() -> Vec<&'static str> {
    let mut h = vec!["Student ID", "Name", "Age", "Gender", "Date of Birth", "Email"];
    h.extend(SUBJECTS);
    h.extend(["Average Score", "Letter Grade", "GPA", "Remark", "Last Updated"]);
    h
}

#[derive(Debug)]
pub struct ImportOutcome {
    pub records: Vec<StudentRecord>,
    pub skipped_rows: usize,
}

/// Whole-file rewrite of the roster in order: header row 1, one row per
/// record. Derived columns are recomputed and the Last Updated column is
/// stamped at write time.
pub fn export(path: &Path, roster: &RosterStore) -> Result<(), SheetError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut writer = WriterBuilder::new().flexible(true).from_path(path)?;
    writer.write_record(headers())?;

    let stamp = timestamp();
    for record in roster.records() {
        writer.write_record(record_row(record, &stamp))?;
    }
    writer.flush()?;
    Ok(())
}

/// Grade report: title banner on row 1, summary on rows 3-6, column header at
/// `REPORT_HEADER_ROW`, data below. Same artifact, fixed offsets.
pub fn export_report(path: &Path, roster: &RosterStore) -> Result<(), SheetError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let stats = roster.statistics();
    let mut writer = WriterBuilder::new().flexible(true).from_path(path)?;

    writer.write_record([format!("GRADE REPORT - {}", timestamp())])?;
    writer.write_record([""])?;
    writer.write_record([format!("Total Students: {}", stats.count)])?;
    writer.write_record([format!("Passing Students: {}", stats.passing_count)])?;
    writer.write_record([format!("Pass Rate: {:.2}%", stats.pass_rate_percent)])?;
    writer.write_record([format!("Class Average: {:.2}", stats.class_average)])?;
    writer.write_record([""])?;

    writer.write_record(headers())?;
    let stamp = timestamp();
    for record in roster.records() {
        writer.write_record(record_row(record, &stamp))?;
    }
    writer.flush()?;
    Ok(())
}

/// Reads rows below the header back into records. A row that fails to parse is
/// skipped and counted, never fatal to the whole import. Derived columns in
/// the file are ignored; grades are recomputed from the stored scores.
pub fn import(path: &Path) -> Result<ImportOutcome, SheetError> {
    if !path.is_file() {
        return Err(SheetError::Missing(path.to_path_buf()));
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;

    let mut records = Vec::new();
    let mut skipped_rows = 0usize;
    for (idx, row) in reader.records().enumerate() {
        // Header is row 1, first data row is row 2.
        let row_num = idx + 2;
        let row = match row {
            Ok(r) => r,
            Err(e) => {
                warn!(row = row_num, error = %e, "skipping unreadable row");
                skipped_rows += 1;
                continue;
            }
        };
        match parse_row(&row) {
            Ok(record) => records.push(record),
            Err(reason) => {
                warn!(row = row_num, %reason, "skipping malformed row");
                skipped_rows += 1;
            }
        }
    }

    Ok(ImportOutcome {
        records,
        skipped_rows,
    })
}

/// Compares the file's header row cell-by-cell against the expected schema.
pub fn validate_schema(path: &Path) -> bool {
    match read_schema_mismatch(path) {
        Ok(()) => true,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "schema validation failed");
            false
        }
    }
}

fn read_schema_mismatch(path: &Path) -> Result<(), SheetError> {
    if !path.is_file() {
        return Err(SheetError::Missing(path.to_path_buf()));
    }
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;
    let found = reader.headers()?.clone();
    for (i, expected) in headers().iter().enumerate() {
        let cell = found.get(i).unwrap_or("");
        if cell != *expected {
            return Err(SheetError::SchemaMismatch {
                column: i + 1,
                expected: expected.to_string(),
                found: cell.to_string(),
            });
        }
    }
    Ok(())
}

fn record_row(record: &StudentRecord, stamp: &str) -> Vec<String> {
    let mut row = Vec::with_capacity(headers().len());
    row.push(record.id().to_string());
    row.push(record.name.clone());
    row.push(record.age.to_string());
    row.push(record.gender.clone());
    row.push(record.date_of_birth.clone());
    row.push(record.email.clone());
    for score in record.scores() {
        row.push(format_number(*score));
    }
    row.push(format!("{:.2}", record.average()));
    row.push(record.letter_grade().to_string());
    row.push(format!("{:.1}", record.gpa()));
    row.push(record.remark().to_string());
    row.push(stamp.to_string());
    row
}

fn parse_row(row: &StringRecord) -> Result<StudentRecord, String> {
    if row.len() < STORED_COLUMNS {
        return Err(format!(
            "expected at least {STORED_COLUMNS} columns, found {}",
            row.len()
        ));
    }

    let field = |i: usize| row.get(i).unwrap_or("").trim();

    let age: u32 = field(2)
        .parse()
        .map_err(|e| format!("bad age '{}': {e}", field(2)))?;

    let mut scores = [0.0f64; SUBJECT_COUNT];
    for (i, slot) in scores.iter_mut().enumerate() {
        let raw = field(6 + i);
        *slot = raw
            .parse()
            .map_err(|e| format!("bad {} score '{raw}': {e}", SUBJECTS[i]))?;
    }

    StudentRecord::new(
        field(0),
        field(1),
        age,
        field(3),
        field(4),
        field(5),
        scores,
    )
    .map_err(|e| e.to_string())
}

fn format_number(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{v:.0}")
    } else {
        v.to_string()
    }
}

pub fn timestamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Filename-safe variant of `timestamp` (spaces and colons become
/// underscores).
pub fn timestamp_for_filename() -> String {
    Local::now().format("%Y-%m-%d_%H_%M_%S").to_string()
}
