use std::io::{BufRead, Write};

use anyhow::Result;
use tracing::{info, warn};

use crate::backup;
use crate::config::AppConfig;
use crate::console::Console;
use crate::grades::{SUBJECTS, SUBJECT_COUNT};
use crate::roster::RosterStore;
use crate::sheet;
use crate::student::StudentRecord;

/// The single role this system exercises. Modeled as a tagged variant rather
/// than a class hierarchy; the menu loop and label hang off it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Administrator,
}

impl Role {
    pub fn label(self) -> &'static str {
        match self {
            Role::Administrator => "Administrator",
        }
    }
}

/// Drives the menu loop for one administrator session. Owns the roster for
/// the lifetime of the session; every mutating operation is followed by a
/// best-effort flush to the configured data file.
pub struct AdminSession<R, W> {
    console: Console<R, W>,
    config: AppConfig,
    roster: RosterStore,
    role: Role,
}

impl<R: BufRead, W: Write> AdminSession<R, W> {
    pub fn new(config: AppConfig, roster: RosterStore, input: R, output: W) -> Self {
        Self {
            console: Console::new(input, output),
            config,
            roster,
            role: Role::Administrator,
        }
    }

    pub fn roster(&self) -> &RosterStore {
        &self.roster
    }

    /// Compares the provided credentials against the configured identity.
    /// No lockout, no rate limiting, no attempt tracking.
    pub fn authenticate(&self, username: &str, password: &str) -> bool {
        username == self.config.admin.username && password == self.config.admin.password
    }

    /// Top-level menu: log in or exit. Returns on explicit exit.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.console.print_header("STUDENT GRADE MANAGEMENT SYSTEM")?;
            self.console.print_menu(&["Admin Login", "Exit"])?;
            match self.console.prompt_menu_choice(2)? {
                1 => {
                    if self.login()? {
                        self.dashboard()?;
                    }
                }
                _ => {
                    self.console.print_info("Goodbye!")?;
                    return Ok(());
                }
            }
        }
    }

    fn login(&mut self) -> Result<bool> {
        self.console.print_header("ADMIN LOGIN")?;
        let username = self.console.prompt_nonempty("Username: ")?;
        let password = self.console.prompt_nonempty("Password: ")?;
        if self.authenticate(&username, &password) {
            info!(role = self.role.label(), "login successful");
            self.console
                .print_success(&format!("Login successful! Welcome, {}!", self.role.label()))?;
            Ok(true)
        } else {
            self.console.print_error("Invalid admin credentials!")?;
            Ok(false)
        }
    }

    fn dashboard(&mut self) -> Result<()> {
        loop {
            self.console.print_header("ADMIN DASHBOARD")?;
            self.console.print_menu(&[
                "Manage Students",
                "Import Data",
                "Export Grade Report",
                "Backup Data",
                "Sign Out",
                "Return to Main Menu",
            ])?;
            match self.console.prompt_menu_choice(6)? {
                1 => self.manage_students()?,
                2 => self.import_data()?,
                3 => self.export_report()?,
                4 => self.backup_data()?,
                5 => {
                    self.console
                        .print_info("Signing out from admin dashboard...")?;
                    return Ok(());
                }
                _ => {
                    self.console.print_info("Returning to main menu...")?;
                    return Ok(());
                }
            }
            if !self.console.ask_continue()? {
                return Ok(());
            }
        }
    }

    fn manage_students(&mut self) -> Result<()> {
        loop {
            self.console.print_header("STUDENT MANAGEMENT")?;
            self.console.print_menu(&[
                "View All Students",
                "Add New Student",
                "Edit Student Info",
                "Delete Student",
                "Search Student",
                "Show Failing Students",
                "Sort Students by Score",
                "Back to Admin Dashboard",
            ])?;
            match self.console.prompt_menu_choice(8)? {
                1 => self.view_all()?,
                2 => self.add_student()?,
                3 => self.edit_student()?,
                4 => self.delete_student()?,
                5 => self.search_student()?,
                6 => self.show_failing()?,
                7 => self.sort_students()?,
                _ => return Ok(()),
            }
        }
    }

    fn view_all(&mut self) -> Result<()> {
        self.console.print_header("ALL STUDENTS")?;
        if self.roster.is_empty() {
            self.console.print_warning("No students found!")?;
            return Ok(());
        }
        let records: Vec<&StudentRecord> = self.roster.records().iter().collect();
        self.console.print_table(&records)?;
        Ok(())
    }

    fn add_student(&mut self) -> Result<()> {
        self.console.print_header("ADD NEW STUDENT")?;

        let student_id = self.console.prompt_nonempty("Student ID: ")?;
        if self.roster.exists_by_id(&student_id) {
            self.console.print_error("Student ID already exists!")?;
            return Ok(());
        }

        let name = self.console.prompt_nonempty("Student Name: ")?;
        if self.roster.exists_by_name(&name) {
            self.console
                .print_error("Student with this name already exists!")?;
            return Ok(());
        }

        let age = self.console.prompt_u32("Age: ")?;
        let gender = self.console.prompt_nonempty("Gender: ")?;
        let date_of_birth = self
            .console
            .prompt_nonempty("Date of Birth (YYYY-MM-DD): ")?;
        let email = self.console.prompt_nonempty("Email: ")?;

        self.console.print_info("Enter scores for all subjects:")?;
        let scores = self.prompt_all_scores()?;

        let record = match StudentRecord::new(
            student_id,
            name,
            age,
            gender,
            date_of_birth,
            email,
            scores,
        ) {
            Ok(r) => r,
            Err(e) => {
                self.console.print_error(&e.to_string())?;
                return Ok(());
            }
        };
        match self.roster.insert(record) {
            Ok(()) => {
                self.console.print_success("Student added successfully!")?;
                self.flush_roster()?;
            }
            Err(e) => self.console.print_error(&e.to_string())?,
        }
        Ok(())
    }

    fn edit_student(&mut self) -> Result<()> {
        self.console.print_header("EDIT STUDENT INFO")?;

        let id = self.console.prompt_nonempty("Enter Student ID to edit: ")?;
        let Some(current) = self.roster.find_by_id(&id) else {
            self.console.print_error("Student not found!")?;
            return Ok(());
        };
        let current = current.clone();
        self.console.print_info("Current student info:")?;
        self.console.print_details(&current)?;

        self.console.print_menu(&[
            "Edit Name",
            "Edit Age",
            "Edit Gender",
            "Edit Date of Birth",
            "Edit Email",
            "Edit Scores",
            "Cancel",
        ])?;
        let choice = self.console.prompt_menu_choice(7)?;
        if choice == 7 {
            return Ok(());
        }

        match choice {
            1 => {
                let name = self.console.prompt_nonempty("New name: ")?;
                self.roster.update(&id, |r| r.name = name)?;
            }
            2 => {
                let age = self.console.prompt_u32("New age: ")?;
                self.roster.update(&id, |r| r.age = age)?;
            }
            3 => {
                let gender = self.console.prompt_nonempty("New gender: ")?;
                self.roster.update(&id, |r| r.gender = gender)?;
            }
            4 => {
                let dob = self
                    .console
                    .prompt_nonempty("New date of birth (YYYY-MM-DD): ")?;
                self.roster.update(&id, |r| r.date_of_birth = dob)?;
            }
            5 => {
                let email = self.console.prompt_nonempty("New email: ")?;
                self.roster.update(&id, |r| r.email = email)?;
            }
            _ => {
                let scores = self.prompt_all_scores()?;
                self.roster.update(&id, |r| {
                    // Each score already passed the prompt-loop range check.
                    let _ = r.set_scores(scores);
                })?;
            }
        }

        self.console
            .print_success("Student information updated successfully!")?;
        self.flush_roster()?;
        Ok(())
    }

    fn delete_student(&mut self) -> Result<()> {
        self.console.print_header("DELETE STUDENT")?;

        let id = self
            .console
            .prompt_nonempty("Enter Student ID to delete: ")?;
        let Some(found) = self.roster.find_by_id(&id) else {
            self.console.print_error("Student not found!")?;
            return Ok(());
        };
        let found = found.clone();
        self.console.print_info("Student found:")?;
        self.console.print_details(&found)?;

        if self
            .console
            .confirm("Are you sure you want to delete this student? (yes/no): ")?
        {
            self.roster.delete(&id);
            self.console.print_success("Student deleted successfully!")?;
            self.flush_roster()?;
        } else {
            self.console.print_info("Deletion cancelled.")?;
        }
        Ok(())
    }

    fn search_student(&mut self) -> Result<()> {
        self.console.print_header("SEARCH STUDENT")?;
        let term = self.console.prompt_nonempty("Enter Student ID or Name: ")?;
        match self.roster.search(&term) {
            Some(record) => {
                let record = record.clone();
                self.console.print_details(&record)?;
            }
            None => self.console.print_error("Student not found!")?,
        }
        Ok(())
    }

    fn show_failing(&mut self) -> Result<()> {
        self.console.print_header("FAILING STUDENTS")?;
        let failing = self.roster.filter_failing();
        if failing.is_empty() {
            self.console.print_success("No failing students found!")?;
        } else {
            self.console.print_table(&failing)?;
        }
        Ok(())
    }

    fn sort_students(&mut self) -> Result<()> {
        self.console.print_header("SORT STUDENTS BY SCORE")?;
        let order = self.console.prompt_nonempty("Sort order (asc/desc): ")?;
        let ascending = order.eq_ignore_ascii_case("asc");
        self.roster.sort_by_average(ascending);
        self.console.print_success("Students sorted successfully!")?;
        self.view_all()?;
        self.flush_roster()?;
        Ok(())
    }

    fn import_data(&mut self) -> Result<()> {
        self.console.print_header("IMPORT DATA")?;
        let path = self.config.data_file.clone();
        match sheet::import(&path) {
            Ok(outcome) => {
                let imported = outcome.records.len();
                if imported == 0 {
                    self.console
                        .print_error("No valid student data found in the file.")?;
                    return Ok(());
                }
                self.roster.merge(outcome.records);
                if outcome.skipped_rows > 0 {
                    self.console.print_warning(&format!(
                        "Skipped {} malformed row(s).",
                        outcome.skipped_rows
                    ))?;
                }
                self.console.print_success(&format!(
                    "Data imported successfully from {}!",
                    path.display()
                ))?;
                self.console
                    .print_info(&format!("Total students now: {}", self.roster.len()))?;
            }
            Err(e) => {
                self.console
                    .print_error(&format!("Failed to import data: {e}"))?;
            }
        }
        Ok(())
    }

    fn export_report(&mut self) -> Result<()> {
        self.console.print_header("EXPORT GRADE REPORT")?;
        let stats = self.roster.statistics();
        self.console.print_statistics(&stats)?;
        let path = self.config.report_file.clone();
        match sheet::export_report(&path, &self.roster) {
            Ok(()) => self.console.print_success(&format!(
                "Grade report exported successfully to {}!",
                path.display()
            ))?,
            Err(e) => self
                .console
                .print_error(&format!("Failed to export data: {e}"))?,
        }
        Ok(())
    }

    fn backup_data(&mut self) -> Result<()> {
        self.console.print_header("BACKUP DATA")?;
        let label = self
            .config
            .data_file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "students.csv".to_string());
        match backup::create_backup(&self.config.backup_dir, &label, &self.roster) {
            Ok(path) => self.console.print_success(&format!(
                "Data backup created successfully: {}",
                path.display()
            ))?,
            Err(e) => self
                .console
                .print_error(&format!("Failed to create backup: {e}"))?,
        }
        Ok(())
    }

    fn prompt_all_scores(&mut self) -> Result<[f64; SUBJECT_COUNT]> {
        let mut scores = [0.0f64; SUBJECT_COUNT];
        for (i, subject) in SUBJECTS.iter().enumerate() {
            scores[i] = self.console.prompt_score(subject)?;
        }
        Ok(scores)
    }

    /// Mutation-then-best-effort-persist: a write failure is a warning, never
    /// a rollback of the in-memory roster.
    fn flush_roster(&mut self) -> Result<()> {
        match sheet::export(&self.config.data_file, &self.roster) {
            Ok(()) => {
                self.roster.mark_clean();
                self.console.print_info("Data saved to spreadsheet file.")?;
            }
            Err(e) => {
                warn!(path = %self.config.data_file.display(), error = %e,
                    "failed to persist roster");
                self.console.print_warning(&format!(
                    "Change kept in memory but failed to save to file: {e}"
                ))?;
            }
        }
        Ok(())
    }
}
