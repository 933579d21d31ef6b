use serde::Serialize;
use std::collections::HashSet;
use thiserror::Error;

use crate::model::case::Case;
use crate::model::ids::{CaseId, DeckId};
use crate::model::round::RoundKind;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DeckError {
    #[error("deck name cannot be empty")]
    EmptyName,

    #[error("deck must contain at least one case")]
    NoCases,

    #[error("duplicate case id in deck: {0}")]
    DuplicateCase(String),
}

//
// ─── DECK ──────────────────────────────────────────────────────────────────────
//

/// Ordered, immutable set of cases making up one ward round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Deck {
    id: DeckId,
    name: String,
    kind: RoundKind,
    cases: Vec<Case>,
}

impl Deck {
    /// Creates a deck from already validated cases.
    ///
    /// # Errors
    ///
    /// Returns `DeckError` if the name is blank, `cases` is empty, or two cases
    /// share an id.
    pub fn new(
        id: DeckId,
        name: impl Into<String>,
        kind: RoundKind,
        cases: Vec<Case>,
    ) -> Result<Self, DeckError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(DeckError::EmptyName);
        }
        if cases.is_empty() {
            return Err(DeckError::NoCases);
        }

        let mut seen: HashSet<&CaseId> = HashSet::with_capacity(cases.len());
        for case in &cases {
            if !seen.insert(case.id()) {
                return Err(DeckError::DuplicateCase(case.id().to_string()));
            }
        }

        Ok(Self {
            id,
            name,
            kind,
            cases,
        })
    }

    #[must_use]
    pub fn id(&self) -> DeckId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn kind(&self) -> RoundKind {
        self.kind
    }

    #[must_use]
    pub fn cases(&self) -> &[Case] {
        &self.cases
    }

    #[must_use]
    pub fn case(&self, index: usize) -> Option<&Case> {
        self.cases.get(index)
    }

    /// Number of cases; never zero.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    /// Always false for a constructed deck.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    #[must_use]
    pub fn last_index(&self) -> usize {
        self.cases.len().saturating_sub(1)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CaseDraft, Sex};

    fn case(id: &str) -> Case {
        CaseDraft {
            id: id.into(),
            title: format!("Case {id}"),
            patient_name: "Pat".into(),
            age: 30,
            sex: Sex::Female,
            vignette: "Vignette.".into(),
            options: vec!["A".into(), "B".into()],
            correct_index: 0,
            audio: None,
            feedback_correct: "ok".into(),
            feedback_wrong: "no".into(),
        }
        .validate()
        .unwrap()
    }

    #[test]
    fn deck_new_happy_path() {
        let deck = Deck::new(
            DeckId::new(1),
            "  Ward Round  ",
            RoundKind::Adult,
            vec![case("a"), case("b")],
        )
        .unwrap();
        assert_eq!(deck.name(), "Ward Round");
        assert_eq!(deck.len(), 2);
        assert_eq!(deck.last_index(), 1);
        assert_eq!(deck.case(1).unwrap().id().as_str(), "b");
        assert!(deck.case(2).is_none());
    }

    #[test]
    fn deck_rejects_empty_cases() {
        let err = Deck::new(DeckId::new(1), "Ward", RoundKind::Adult, Vec::new()).unwrap_err();
        assert_eq!(err, DeckError::NoCases);
    }

    #[test]
    fn deck_rejects_blank_name() {
        let err = Deck::new(DeckId::new(1), " ", RoundKind::Adult, vec![case("a")]).unwrap_err();
        assert_eq!(err, DeckError::EmptyName);
    }

    #[test]
    fn deck_rejects_duplicate_ids() {
        let err = Deck::new(
            DeckId::new(1),
            "Ward",
            RoundKind::Paediatric,
            vec![case("a"), case("a")],
        )
        .unwrap_err();
        assert_eq!(err, DeckError::DuplicateCase("a".into()));
    }
}
