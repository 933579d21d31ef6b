use serde::Serialize;

use auscult_core::Accuracy;
use auscult_core::model::RoundKind;

/// Read-only snapshot of a ward round for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundProgress {
    pub deck_name: String,
    pub kind: RoundKind,
    /// Zero-based index of the case on screen.
    pub index: usize,
    pub total: usize,
    pub accuracy: Accuracy,
    pub is_first: bool,
    pub is_last: bool,
    pub selected: Option<usize>,
    pub is_correct: Option<bool>,
    pub attempts: u32,
    pub feedback: Option<String>,
}

impl RoundProgress {
    /// One-based position label, e.g. `Case 3 of 8`.
    #[must_use]
    pub fn position_label(&self) -> String {
        format!("Case {} of {}", self.index + 1, self.total)
    }

    #[must_use]
    pub fn is_answered_correctly(&self) -> bool {
        self.is_correct == Some(true)
    }
}
