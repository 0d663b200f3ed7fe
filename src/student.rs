use serde::{Deserialize, Serialize};

use crate::error::RosterError;
use crate::grades::{self, LetterGrade, Remark, SUBJECT_COUNT};

/// One student's identity, demographics, and per-subject scores.
///
/// The id is assigned at construction and has no setter; grade fields are
/// always recomputed from the scores, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecord {
    student_id: String,
    pub name: String,
    pub age: u32,
    pub gender: String,
    pub date_of_birth: String,
    pub email: String,
    scores: [f64; SUBJECT_COUNT],
}

impl StudentRecord {
    pub fn new(
        student_id: impl Into<String>,
        name: impl Into<String>,
        age: u32,
        gender: impl Into<String>,
        date_of_birth: impl Into<String>,
        email: impl Into<String>,
        scores: [f64; SUBJECT_COUNT],
    ) -> Result<Self, RosterError> {
        validate_scores(&scores)?;
        Ok(Self {
            student_id: student_id.into(),
            name: name.into(),
            age,
            gender: gender.into(),
            date_of_birth: date_of_birth.into(),
            email: email.into(),
            scores,
        })
    }

    pub fn id(&self) -> &str {
        &self.student_id
    }

    pub fn scores(&self) -> &[f64; SUBJECT_COUNT] {
        &self.scores
    }

    pub fn set_scores(&mut self, scores: [f64; SUBJECT_COUNT]) -> Result<(), RosterError> {
        validate_scores(&scores)?;
        self.scores = scores;
        Ok(())
    }

    pub fn average(&self) -> f64 {
        grades::average(&self.scores)
    }

    pub fn letter_grade(&self) -> LetterGrade {
        grades::letter_grade(self.average())
    }

    pub fn gpa(&self) -> f64 {
        grades::gpa(self.average())
    }

    pub fn remark(&self) -> Remark {
        grades::remark(self.average())
    }

    pub fn is_passing(&self) -> bool {
        self.remark() == Remark::Pass
    }
}

fn validate_scores(scores: &[f64; SUBJECT_COUNT]) -> Result<(), RosterError> {
    for &s in scores {
        if !grades::is_valid_score(s) {
            return Err(RosterError::InvalidScore(s));
        }
    }
    Ok(())
}

/// Seed roster used when no data file exists at session start.
pub fn sample_roster() -> Vec<StudentRecord> {
    let seed: [(&str, &str, u32, &str, &str, &str, [f64; SUBJECT_COUNT]); 5] = [
        (
            "ST001",
            "Alice Johnson",
            20,
            "Female",
            "2005-03-14",
            "alice.johnson@example.com",
            [95.0, 92.0, 88.0, 91.0, 93.0, 89.0, 90.0],
        ),
        (
            "ST002",
            "Bob Smith",
            21,
            "Male",
            "2004-07-22",
            "bob.smith@example.com",
            [78.0, 82.0, 75.0, 80.0, 77.0, 74.0, 81.0],
        ),
        (
            "ST003",
            "Carol White",
            19,
            "Female",
            "2006-01-09",
            "carol.white@example.com",
            [40.0, 55.0, 60.0, 45.0, 50.0, 58.0, 52.0],
        ),
        (
            "ST004",
            "David Brown",
            22,
            "Male",
            "2003-11-30",
            "david.brown@example.com",
            [68.0, 64.0, 70.0, 62.0, 66.0, 61.0, 69.0],
        ),
        (
            "ST005",
            "Eve Davis",
            20,
            "Female",
            "2005-05-02",
            "eve.davis@example.com",
            [85.0, 88.0, 84.0, 90.0, 82.0, 87.0, 86.0],
        ),
    ];

    // Seed scores are compile-time constants inside [0, 100], so the records
    // are built directly without the runtime range check.
    seed.into_iter()
        .map(
            |(id, name, age, gender, dob, email, scores)| StudentRecord {
                student_id: id.to_string(),
                name: name.to_string(),
                age,
                gender: gender.to_string(),
                date_of_birth: dob.to_string(),
                email: email.to_string(),
                scores,
            },
        )
        .collect()
}
