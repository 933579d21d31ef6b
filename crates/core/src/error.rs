use thiserror::Error;

use crate::accuracy::ScoringError;
use crate::model::{CaseError, DeckError, ResourceError, RoundSummaryError};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Case(#[from] CaseError),
    #[error(transparent)]
    Deck(#[from] DeckError),
    #[error(transparent)]
    Scoring(#[from] ScoringError),
    #[error(transparent)]
    RoundSummary(#[from] RoundSummaryError),
    #[error(transparent)]
    Resource(#[from] ResourceError),
}
