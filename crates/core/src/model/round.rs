use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::accuracy::Accuracy;
use crate::model::ids::DeckId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RoundSummaryError {
    #[error("completed_at is before started_at")]
    InvalidTimeRange,

    #[error("answered cases ({answered}) exceed the deck size ({total})")]
    CountMismatch { answered: usize, total: usize },
}

/// Which ward a round belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundKind {
    Adult,
    Paediatric,
}

impl RoundKind {
    #[must_use]
    pub fn ward_title(self) -> &'static str {
        match self {
            RoundKind::Adult => "Ward Round",
            RoundKind::Paediatric => "Paeds Ward",
        }
    }
}

impl fmt::Display for RoundKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoundKind::Adult => f.write_str("adult"),
            RoundKind::Paediatric => f.write_str("paediatric"),
        }
    }
}

/// Snapshot of a finished ward round, handed to the completion sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundSummary {
    deck_id: DeckId,
    kind: RoundKind,
    started_at: DateTime<Utc>,
    completed_at: DateTime<Utc>,
    final_accuracy: Accuracy,
    total_cases: usize,
    first_attempt_correct: usize,
    first_attempt_wrong: usize,
}

impl RoundSummary {
    /// Build a summary from the counters a round collected.
    ///
    /// # Errors
    ///
    /// Returns `RoundSummaryError::InvalidTimeRange` if `completed_at` is before `started_at`.
    /// Returns `RoundSummaryError::CountMismatch` if more cases were scored than exist.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        deck_id: DeckId,
        kind: RoundKind,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
        final_accuracy: Accuracy,
        total_cases: usize,
        first_attempt_correct: usize,
        first_attempt_wrong: usize,
    ) -> Result<Self, RoundSummaryError> {
        if completed_at < started_at {
            return Err(RoundSummaryError::InvalidTimeRange);
        }
        let answered = first_attempt_correct + first_attempt_wrong;
        if answered > total_cases {
            return Err(RoundSummaryError::CountMismatch {
                answered,
                total: total_cases,
            });
        }

        Ok(Self {
            deck_id,
            kind,
            started_at,
            completed_at,
            final_accuracy,
            total_cases,
            first_attempt_correct,
            first_attempt_wrong,
        })
    }

    #[must_use]
    pub fn deck_id(&self) -> DeckId {
        self.deck_id
    }

    #[must_use]
    pub fn kind(&self) -> RoundKind {
        self.kind
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    #[must_use]
    pub fn final_accuracy(&self) -> Accuracy {
        self.final_accuracy
    }

    #[must_use]
    pub fn total_cases(&self) -> usize {
        self.total_cases
    }

    #[must_use]
    pub fn first_attempt_correct(&self) -> usize {
        self.first_attempt_correct
    }

    #[must_use]
    pub fn first_attempt_wrong(&self) -> usize {
        self.first_attempt_wrong
    }

    /// Cases left without any answer when the round ended.
    #[must_use]
    pub fn unanswered(&self) -> usize {
        self.total_cases - self.first_attempt_correct - self.first_attempt_wrong
    }

    #[must_use]
    pub fn duration(&self) -> chrono::Duration {
        self.completed_at - self.started_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn summary_counts_unanswered() {
        let now = fixed_now();
        let summary = RoundSummary::new(
            DeckId::new(1),
            RoundKind::Adult,
            now,
            now + chrono::Duration::minutes(5),
            Accuracy::new(94).unwrap(),
            3,
            1,
            1,
        )
        .unwrap();
        assert_eq!(summary.unanswered(), 1);
        assert_eq!(summary.duration(), chrono::Duration::minutes(5));
        assert_eq!(summary.final_accuracy().value(), 94);
    }

    #[test]
    fn summary_rejects_backwards_time() {
        let now = fixed_now();
        let err = RoundSummary::new(
            DeckId::new(1),
            RoundKind::Paediatric,
            now,
            now - chrono::Duration::seconds(1),
            Accuracy::FULL,
            1,
            0,
            0,
        )
        .unwrap_err();
        assert_eq!(err, RoundSummaryError::InvalidTimeRange);
    }

    #[test]
    fn summary_rejects_overcount() {
        let now = fixed_now();
        let err = RoundSummary::new(
            DeckId::new(1),
            RoundKind::Adult,
            now,
            now,
            Accuracy::FULL,
            2,
            2,
            1,
        )
        .unwrap_err();
        assert_eq!(
            err,
            RoundSummaryError::CountMismatch {
                answered: 3,
                total: 2
            }
        );
    }

    #[test]
    fn kind_has_ward_titles() {
        assert_eq!(RoundKind::Adult.ward_title(), "Ward Round");
        assert_eq!(RoundKind::Paediatric.to_string(), "paediatric");
    }
}
