use std::fs;

use tempfile::TempDir;

use gradebook::backup;
use gradebook::roster::RosterStore;
use gradebook::sheet::{self, REPORT_HEADER_ROW};
use gradebook::student::StudentRecord;

fn roster() -> RosterStore {
    let mut store = RosterStore::new();
    store
        .insert(
            StudentRecord::new(
                "S1",
                "Passing Student",
                20,
                "F",
                "2005-01-01",
                "s1@example.com",
                [95.0, 92.0, 88.0, 91.0, 93.0, 89.0, 90.0],
            )
            .expect("valid"),
        )
        .expect("insert");
    store
        .insert(
            StudentRecord::new(
                "S2",
                "Failing Student",
                21,
                "M",
                "2004-01-01",
                "s2@example.com",
                [40.0, 55.0, 60.0, 45.0, 50.0, 58.0, 52.0],
            )
            .expect("valid"),
        )
        .expect("insert");
    store
}

#[test]
fn report_layout_has_fixed_offsets() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("grade_report.csv");
    sheet::export_report(&path, &roster()).expect("export report");

    let text = fs::read_to_string(&path).expect("read report");
    let lines: Vec<&str> = text.lines().collect();

    assert!(lines[0].starts_with("GRADE REPORT - "));
    assert!(lines[2].contains("Total Students: 2"));
    assert!(lines[3].contains("Passing Students: 1"));
    assert!(lines[4].contains("Pass Rate: 50.00%"));
    assert!(lines[5].contains("Class Average: 71.29"));

    // Column header sits at the fixed report offset, data right below.
    let header_line = lines[REPORT_HEADER_ROW - 1];
    assert!(header_line.starts_with("Student ID,Name,Age"));
    assert!(header_line.contains("Mathematics"));
    assert!(header_line.ends_with("Last Updated"));
    assert!(lines[REPORT_HEADER_ROW].starts_with("S1,Passing Student"));
    assert!(lines[REPORT_HEADER_ROW + 1].starts_with("S2,Failing Student"));
}

#[test]
fn report_rows_carry_derived_grade_columns() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("grade_report.csv");
    sheet::export_report(&path, &roster()).expect("export report");

    let text = fs::read_to_string(&path).expect("read report");
    let lines: Vec<&str> = text.lines().collect();
    let s1 = lines[REPORT_HEADER_ROW];
    assert!(s1.contains("91.14"));
    assert!(s1.contains(",A,"));
    assert!(s1.contains("4.0"));
    assert!(s1.contains("Pass"));
    let s2 = lines[REPORT_HEADER_ROW + 1];
    assert!(s2.contains("51.43"));
    assert!(s2.contains(",E,"));
    assert!(s2.contains("0.0"));
    assert!(s2.contains("Fail"));
}

#[test]
fn empty_roster_report_has_zero_statistics() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("grade_report.csv");
    sheet::export_report(&path, &RosterStore::new()).expect("export report");

    let text = fs::read_to_string(&path).expect("read report");
    let lines: Vec<&str> = text.lines().collect();
    assert!(lines[2].contains("Total Students: 0"));
    assert!(lines[4].contains("Pass Rate: 0.00%"));
    assert!(lines[5].contains("Class Average: 0.00"));
}

#[test]
fn backup_writes_timestamped_copy_without_touching_primary() {
    let dir = TempDir::new().expect("temp dir");
    let backups = dir.path().join("backups");
    let primary = dir.path().join("students.csv");
    let store = roster();
    sheet::export(&primary, &store).expect("export primary");
    let before = fs::read_to_string(&primary).expect("read primary");

    let written =
        backup::create_backup(&backups, "students.csv", &store).expect("create backup");
    assert!(written.is_file());
    let name = written
        .file_name()
        .and_then(|n| n.to_str())
        .expect("backup file name");
    assert!(name.starts_with("backup_students_"));
    assert!(sheet::validate_schema(&written));

    let after = fs::read_to_string(&primary).expect("re-read primary");
    assert_eq!(before, after);
}
