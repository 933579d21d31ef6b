use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::model::ids::CaseId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CaseError {
    #[error("case id cannot be empty")]
    EmptyId,

    #[error("case title cannot be empty")]
    EmptyTitle,

    #[error("case vignette cannot be empty")]
    EmptyVignette,

    #[error("a case needs at least two options, got {len}")]
    TooFewOptions { len: usize },

    #[error("option {index} is empty")]
    EmptyOption { index: usize },

    #[error("correct index {index} is out of range for {len} options")]
    CorrectIndexOutOfRange { index: usize, len: usize },

    #[error("feedback text cannot be empty")]
    EmptyFeedback,
}

//
// ─── SEX ───────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sex::Male => f.write_str("M"),
            Sex::Female => f.write_str("F"),
        }
    }
}

//
// ─── DRAFT ─────────────────────────────────────────────────────────────────────
//

/// Unvalidated case content, as written in the catalog or a deck file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseDraft {
    pub id: String,
    pub title: String,
    pub patient_name: String,
    pub age: u16,
    pub sex: Sex,
    pub vignette: String,
    pub options: Vec<String>,
    pub correct_index: usize,
    #[serde(default)]
    pub audio: Option<String>,
    pub feedback_correct: String,
    pub feedback_wrong: String,
}

impl CaseDraft {
    /// Validate the draft into an immutable `Case`.
    ///
    /// # Errors
    ///
    /// Returns `CaseError` when a required field is blank, there are fewer than
    /// two options, or `correct_index` does not point into `options`.
    pub fn validate(self) -> Result<Case, CaseError> {
        let id = CaseId::new(self.id);
        if id.is_empty() {
            return Err(CaseError::EmptyId);
        }

        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(CaseError::EmptyTitle);
        }

        let vignette = self.vignette.trim().to_string();
        if vignette.is_empty() {
            return Err(CaseError::EmptyVignette);
        }

        let len = self.options.len();
        if len < 2 {
            return Err(CaseError::TooFewOptions { len });
        }
        if let Some(index) = self.options.iter().position(|o| o.trim().is_empty()) {
            return Err(CaseError::EmptyOption { index });
        }
        if self.correct_index >= len {
            return Err(CaseError::CorrectIndexOutOfRange {
                index: self.correct_index,
                len,
            });
        }

        let feedback_correct = self.feedback_correct.trim().to_string();
        let feedback_wrong = self.feedback_wrong.trim().to_string();
        if feedback_correct.is_empty() || feedback_wrong.is_empty() {
            return Err(CaseError::EmptyFeedback);
        }

        let audio = self
            .audio
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty());

        Ok(Case {
            id,
            title,
            patient_name: self.patient_name.trim().to_string(),
            age: self.age,
            sex: self.sex,
            vignette,
            options: self.options,
            correct_index: self.correct_index,
            audio,
            feedback_correct,
            feedback_wrong,
        })
    }
}

//
// ─── CASE ──────────────────────────────────────────────────────────────────────
//

/// A single clinical vignette with multiple-choice options and a known answer.
///
/// Always holds `correct_index < options.len()` and at least two options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Case {
    id: CaseId,
    title: String,
    patient_name: String,
    age: u16,
    sex: Sex,
    vignette: String,
    options: Vec<String>,
    correct_index: usize,
    audio: Option<String>,
    feedback_correct: String,
    feedback_wrong: String,
}

impl Case {
    #[must_use]
    pub fn id(&self) -> &CaseId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn patient_name(&self) -> &str {
        &self.patient_name
    }

    #[must_use]
    pub fn age(&self) -> u16 {
        self.age
    }

    #[must_use]
    pub fn sex(&self) -> Sex {
        self.sex
    }

    #[must_use]
    pub fn vignette(&self) -> &str {
        &self.vignette
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    #[must_use]
    pub fn correct_option(&self) -> &str {
        &self.options[self.correct_index]
    }

    #[must_use]
    pub fn audio(&self) -> Option<&str> {
        self.audio.as_deref()
    }

    #[must_use]
    pub fn feedback_correct(&self) -> &str {
        &self.feedback_correct
    }

    #[must_use]
    pub fn feedback_wrong(&self) -> &str {
        &self.feedback_wrong
    }

    /// Feedback text matching the outcome of an answer.
    #[must_use]
    pub fn feedback(&self, correct: bool) -> &str {
        if correct {
            &self.feedback_correct
        } else {
            &self.feedback_wrong
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
