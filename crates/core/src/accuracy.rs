//! Bounded diagnostic accuracy score and the rules that move it.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Upper bound of the accuracy scale.
pub const MAX_ACCURACY: u8 = 100;

/// Delta applied for a correct first attempt.
pub const CORRECT_DELTA: i32 = 3;

/// Delta applied for a wrong first attempt.
pub const WRONG_DELTA: i32 = -6;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ScoringError {
    #[error("accuracy {0} is above {MAX_ACCURACY}")]
    OutOfRange(u32),

    #[error("correct answers must not lower accuracy (delta {0})")]
    NegativeCorrectDelta(i32),

    #[error("wrong answers must not raise accuracy (delta {0})")]
    PositiveWrongDelta(i32),
}

//
// ─── CLAMP ─────────────────────────────────────────────────────────────────────
//

/// Add `delta` to `current` and clamp the result to `[0, MAX_ACCURACY]`.
#[must_use]
pub fn clamped_add(current: u8, delta: i32) -> u8 {
    let next = i64::from(current) + i64::from(delta);
    // Clamped into 0..=100, the cast cannot truncate.
    next.clamp(0, i64::from(MAX_ACCURACY)) as u8
}

//
// ─── ACCURACY ──────────────────────────────────────────────────────────────────
//

/// Percentage score in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Accuracy(u8);

impl Accuracy {
    pub const FULL: Accuracy = Accuracy(MAX_ACCURACY);
    pub const ZERO: Accuracy = Accuracy(0);

    /// # Errors
    ///
    /// Returns `ScoringError::OutOfRange` if `value` exceeds 100.
    pub fn new(value: u8) -> Result<Self, ScoringError> {
        if value > MAX_ACCURACY {
            return Err(ScoringError::OutOfRange(u32::from(value)));
        }
        Ok(Self(value))
    }

    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }

    /// Returns the accuracy after applying `delta`, clamped to the scale.
    #[must_use]
    pub fn apply(self, delta: i32) -> Self {
        Self(clamped_add(self.0, delta))
    }

    /// Integer mean of several scores, `None` when empty.
    #[must_use]
    pub fn mean(scores: &[Accuracy]) -> Option<Accuracy> {
        if scores.is_empty() {
            return None;
        }
        let sum: usize = scores.iter().map(|a| usize::from(a.0)).sum();
        let mean = sum / scores.len();
        u8::try_from(mean).ok().map(Accuracy)
    }
}

impl Default for Accuracy {
    fn default() -> Self {
        Self::FULL
    }
}

impl TryFrom<u8> for Accuracy {
    type Error = ScoringError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Accuracy> for u8 {
    fn from(value: Accuracy) -> Self {
        value.0
    }
}

impl fmt::Display for Accuracy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

//
// ─── SCORING RULES ─────────────────────────────────────────────────────────────
//

/// Starting score and per-answer deltas for a ward round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawScoringRules")]
pub struct ScoringRules {
    starting: Accuracy,
    correct_delta: i32,
    wrong_delta: i32,
}

impl ScoringRules {
    /// # Errors
    ///
    /// Returns `ScoringError` if `starting` exceeds 100, `correct_delta` is
    /// negative or `wrong_delta` is positive.
    pub fn new(starting: u8, correct_delta: i32, wrong_delta: i32) -> Result<Self, ScoringError> {
        let starting = Accuracy::new(starting)?;
        if correct_delta < 0 {
            return Err(ScoringError::NegativeCorrectDelta(correct_delta));
        }
        if wrong_delta > 0 {
            return Err(ScoringError::PositiveWrongDelta(wrong_delta));
        }
        Ok(Self {
            starting,
            correct_delta,
            wrong_delta,
        })
    }

    #[must_use]
    pub fn starting(&self) -> Accuracy {
        self.starting
    }

    #[must_use]
    pub fn correct_delta(&self) -> i32 {
        self.correct_delta
    }

    #[must_use]
    pub fn wrong_delta(&self) -> i32 {
        self.wrong_delta
    }

    /// Delta proposed for a scored first attempt.
    #[must_use]
    pub fn delta_for(&self, correct: bool) -> i32 {
        if correct {
            self.correct_delta
        } else {
            self.wrong_delta
        }
    }
}

#[derive(Deserialize)]
struct RawScoringRules {
    starting: u8,
    correct_delta: i32,
    wrong_delta: i32,
}

impl TryFrom<RawScoringRules> for ScoringRules {
    type Error = ScoringError;

    fn try_from(raw: RawScoringRules) -> Result<Self, Self::Error> {
        Self::new(raw.starting, raw.correct_delta, raw.wrong_delta)
    }
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            starting: Accuracy::FULL,
            correct_delta: CORRECT_DELTA,
            wrong_delta: WRONG_DELTA,
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
