use std::io::{self, BufRead, Write};

use crate::grades::{ClassStatistics, SUBJECTS};
use crate::student::StudentRecord;

/// Prompt/print surface for the interactive session, generic over the byte
/// streams so tests can drive it with in-memory buffers. Numeric prompts
/// re-prompt until a valid value is supplied; EOF surfaces as an error and
/// ends the session.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn read_line(&mut self) -> io::Result<String> {
        let mut line = String::new();
        let n = self.input.read_line(&mut line)?;
        if n == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input stream closed",
            ));
        }
        Ok(line.trim().to_string())
    }

    pub fn prompt_line(&mut self, prompt: &str) -> io::Result<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        self.read_line()
    }

    pub fn prompt_nonempty(&mut self, prompt: &str) -> io::Result<String> {
        loop {
            let value = self.prompt_line(prompt)?;
            if !value.is_empty() {
                return Ok(value);
            }
            self.print_error("Input cannot be empty.")?;
        }
    }

    pub fn prompt_u32(&mut self, prompt: &str) -> io::Result<u32> {
        loop {
            let raw = self.prompt_line(prompt)?;
            match raw.parse() {
                Ok(v) => return Ok(v),
                Err(_) => self.print_error("Please enter a whole number.")?,
            }
        }
    }

    pub fn prompt_f64(&mut self, prompt: &str) -> io::Result<f64> {
        loop {
            let raw = self.prompt_line(prompt)?;
            match raw.parse() {
                Ok(v) => return Ok(v),
                Err(_) => self.print_error("Please enter a number.")?,
            }
        }
    }

    /// Re-prompts until the score is within [0, 100].
    pub fn prompt_score(&mut self, subject: &str) -> io::Result<f64> {
        loop {
            let value = self.prompt_f64(&format!("{subject} score: "))?;
            if crate::grades::is_valid_score(value) {
                return Ok(value);
            }
            self.print_error("Invalid score! Score must be between 0-100.")?;
        }
    }

    /// Menu selections are bounded integers 1..=max.
    pub fn prompt_menu_choice(&mut self, max: usize) -> io::Result<usize> {
        loop {
            let choice = self.prompt_u32(&format!("Enter choice (1-{max}): "))? as usize;
            if (1..=max).contains(&choice) {
                return Ok(choice);
            }
            self.print_error(&format!("Please choose between 1 and {max}."))?;
        }
    }

    pub fn confirm(&mut self, prompt: &str) -> io::Result<bool> {
        let answer = self.prompt_line(prompt)?.to_ascii_lowercase();
        Ok(answer == "yes" || answer == "y")
    }

    pub fn ask_continue(&mut self) -> io::Result<bool> {
        self.confirm("Continue? (y/n): ")
    }

    pub fn print_header(&mut self, title: &str) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "========================================")?;
        writeln!(self.output, "  {title}")?;
        writeln!(self.output, "========================================")?;
        Ok(())
    }

    pub fn print_menu(&mut self, items: &[&str]) -> io::Result<()> {
        for (i, item) in items.iter().enumerate() {
            writeln!(self.output, "  {}. {item}", i + 1)?;
        }
        Ok(())
    }

    pub fn print_info(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "[INFO] {message}")
    }

    pub fn print_success(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "[OK] {message}")
    }

    pub fn print_warning(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "[WARN] {message}")
    }

    pub fn print_error(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "[ERROR] {message}")
    }

    pub fn print_table(&mut self, records: &[&StudentRecord]) -> io::Result<()> {
        writeln!(
            self.output,
            "{:<10} {:<24} {:>4} {:>8} {:>6} {:>4} {:>6}",
            "ID", "Name", "Age", "Average", "Grade", "GPA", "Remark"
        )?;
        writeln!(self.output, "{}", "-".repeat(68))?;
        for r in records {
            writeln!(
                self.output,
                "{:<10} {:<24} {:>4} {:>8.2} {:>6} {:>4.1} {:>6}",
                r.id(),
                r.name,
                r.age,
                r.average(),
                r.letter_grade(),
                r.gpa(),
                r.remark()
            )?;
        }
        Ok(())
    }

    pub fn print_details(&mut self, record: &StudentRecord) -> io::Result<()> {
        writeln!(self.output, "Student ID   : {}", record.id())?;
        writeln!(self.output, "Name         : {}", record.name)?;
        writeln!(self.output, "Age          : {}", record.age)?;
        writeln!(self.output, "Gender       : {}", record.gender)?;
        writeln!(self.output, "Date of Birth: {}", record.date_of_birth)?;
        writeln!(self.output, "Email        : {}", record.email)?;
        for (subject, score) in SUBJECTS.iter().zip(record.scores()) {
            writeln!(self.output, "  {subject:<18} {score:>6.1}")?;
        }
        writeln!(self.output, "Average      : {:.2}", record.average())?;
        writeln!(self.output, "Letter Grade : {}", record.letter_grade())?;
        writeln!(self.output, "GPA          : {:.1}", record.gpa())?;
        writeln!(self.output, "Remark       : {}", record.remark())?;
        Ok(())
    }

    pub fn print_statistics(&mut self, stats: &ClassStatistics) -> io::Result<()> {
        writeln!(self.output, "Total Students  : {}", stats.count)?;
        writeln!(self.output, "Passing Students: {}", stats.passing_count)?;
        writeln!(self.output, "Pass Rate       : {:.2}%", stats.pass_rate_percent)?;
        writeln!(self.output, "Class Average   : {:.2}", stats.class_average)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn prompt_score_reprompts_until_valid() {
        let mut c = console("150\n-3\nabc\n88.5\n");
        let score = c.prompt_score("Mathematics").expect("score");
        assert_eq!(score, 88.5);
    }

    #[test]
    fn menu_choice_rejects_out_of_bounds() {
        let mut c = console("0\n9\n3\n");
        assert_eq!(c.prompt_menu_choice(8).expect("choice"), 3);
    }

    #[test]
    fn eof_is_an_error_not_a_spin() {
        let mut c = console("");
        assert!(c.prompt_line("x: ").is_err());
    }

    #[test]
    fn confirm_accepts_yes_variants() {
        let mut c = console("YES\n");
        assert!(c.confirm("? ").expect("confirm"));
        let mut c = console("no\n");
        assert!(!c.confirm("? ").expect("confirm"));
    }
}
