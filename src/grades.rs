use std::fmt;

use serde::{Deserialize, Serialize};

pub const MIN_SCORE: f64 = 0.0;
pub const MAX_SCORE: f64 = 100.0;
pub const PASSING_THRESHOLD: f64 = 60.0;

const GRADE_A_THRESHOLD: f64 = 90.0;
const GRADE_B_THRESHOLD: f64 = 80.0;
const GRADE_C_THRESHOLD: f64 = 70.0;
const GRADE_D_THRESHOLD: f64 = 60.0;
const GRADE_E_THRESHOLD: f64 = 50.0;

pub const SUBJECT_COUNT: usize = 7;

/// Fixed subject list; score columns are positionally aligned to this order.
pub const SUBJECTS: [&str; SUBJECT_COUNT] = [
    "Mathematics",
    "Physics",
    "Chemistry",
    "Biology",
    "English",
    "History",
    "Computer Science",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LetterGrade {
    A,
    B,
    C,
    D,
    E,
    F,
}

impl LetterGrade {
    pub fn as_str(self) -> &'static str {
        match self {
            LetterGrade::A => "A",
            LetterGrade::B => "B",
            LetterGrade::C => "C",
            LetterGrade::D => "D",
            LetterGrade::E => "E",
            LetterGrade::F => "F",
        }
    }
}

impl fmt::Display for LetterGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Remark {
    Pass,
    Fail,
}

impl Remark {
    pub fn as_str(self) -> &'static str {
        match self {
            Remark::Pass => "Pass",
            Remark::Fail => "Fail",
        }
    }
}

impl fmt::Display for Remark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn is_valid_score(score: f64) -> bool {
    (MIN_SCORE..=MAX_SCORE).contains(&score)
}

pub fn average(scores: &[f64]) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    scores.iter().sum::<f64>() / scores.len() as f64
}

/// Thresholds evaluated highest-first with inclusive lower bounds.
pub fn letter_grade(avg: f64) -> LetterGrade {
    if avg >= GRADE_A_THRESHOLD {
        LetterGrade::A
    } else if avg >= GRADE_B_THRESHOLD {
        LetterGrade::B
    } else if avg >= GRADE_C_THRESHOLD {
        LetterGrade::C
    } else if avg >= GRADE_D_THRESHOLD {
        LetterGrade::D
    } else if avg >= GRADE_E_THRESHOLD {
        LetterGrade::E
    } else {
        LetterGrade::F
    }
}

/// A/B/C/D map to 4/3/2/1; everything below 60 (E and F both) maps to 0.0.
/// Five letter tiers but four nonzero GPA tiers, kept exactly as observed.
pub fn gpa(avg: f64) -> f64 {
    if avg >= GRADE_A_THRESHOLD {
        4.0
    } else if avg >= GRADE_B_THRESHOLD {
        3.0
    } else if avg >= GRADE_C_THRESHOLD {
        2.0
    } else if avg >= GRADE_D_THRESHOLD {
        1.0
    } else {
        0.0
    }
}

pub fn remark(avg: f64) -> Remark {
    if avg >= PASSING_THRESHOLD {
        Remark::Pass
    } else {
        Remark::Fail
    }
}

/// Aggregate class metrics over per-record averages. Rendered to 2 decimal
/// places in reports.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassStatistics {
    pub count: usize,
    pub passing_count: usize,
    pub class_average: f64,
    pub pass_rate_percent: f64,
}

pub fn class_statistics<I>(averages: I) -> ClassStatistics
where
    I: IntoIterator<Item = f64>,
{
    let mut count: usize = 0;
    let mut passing_count: usize = 0;
    let mut sum: f64 = 0.0;

    for avg in averages {
        count += 1;
        sum += avg;
        if remark(avg) == Remark::Pass {
            passing_count += 1;
        }
    }

    let class_average = if count > 0 { sum / count as f64 } else { 0.0 };
    let pass_rate_percent = if count > 0 {
        100.0 * passing_count as f64 / count as f64
    } else {
        0.0
    };

    ClassStatistics {
        count,
        passing_count,
        class_average,
        pass_rate_percent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_validity_matches_range() {
        assert!(is_valid_score(0.0));
        assert!(is_valid_score(100.0));
        assert!(is_valid_score(59.5));
        assert!(!is_valid_score(-0.01));
        assert!(!is_valid_score(100.01));
    }

    #[test]
    fn average_of_empty_is_zero() {
        assert_eq!(average(&[]), 0.0);
        assert_eq!(average(&[80.0, 90.0]), 85.0);
    }

    #[test]
    fn grade_and_gpa_boundaries_are_exact() {
        assert_eq!(letter_grade(90.0), LetterGrade::A);
        assert_eq!(gpa(90.0), 4.0);
        assert_eq!(letter_grade(89.99), LetterGrade::B);
        assert_eq!(gpa(89.99), 3.0);
        assert_eq!(letter_grade(70.0), LetterGrade::C);
        assert_eq!(gpa(70.0), 2.0);
        assert_eq!(letter_grade(60.0), LetterGrade::D);
        assert_eq!(gpa(60.0), 1.0);
        assert_eq!(letter_grade(59.99), LetterGrade::F);
        assert_eq!(gpa(59.99), 0.0);
        assert_eq!(letter_grade(50.0), LetterGrade::E);
        // E carries no GPA credit, same as F.
        assert_eq!(gpa(50.0), 0.0);
    }

    #[test]
    fn remark_boundary_at_sixty() {
        assert_eq!(remark(60.0), Remark::Pass);
        assert_eq!(remark(59.9), Remark::Fail);
    }

    #[test]
    fn class_statistics_of_empty_roster() {
        let stats = class_statistics(std::iter::empty());
        assert_eq!(stats.count, 0);
        assert_eq!(stats.passing_count, 0);
        assert_eq!(stats.class_average, 0.0);
        assert_eq!(stats.pass_rate_percent, 0.0);
    }

    #[test]
    fn class_statistics_mixed_roster() {
        let stats = class_statistics([91.0, 51.0].into_iter());
        assert_eq!(stats.count, 2);
        assert_eq!(stats.passing_count, 1);
        assert!((stats.class_average - 71.0).abs() < 1e-9);
        assert!((stats.pass_rate_percent - 50.0).abs() < 1e-9);
    }
}
