//! Shared error types for the services crate.

use std::path::PathBuf;

use thiserror::Error;

use auscult_core::Scene;
use auscult_core::model::{CaseError, DeckError, RoundKind, RoundSummaryError};

/// Errors emitted when a clip cannot be played.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ListenError {
    #[error("equip the stethoscope to enable listening")]
    StethoscopeOff,
    #[error("case {case_id} has no recording")]
    NoAudio { case_id: String },
    #[error("no training clip at {index} (track has {len})")]
    UnknownClip { index: usize, len: usize },
}

/// Errors emitted by `WardRound`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RoundError {
    #[error("no sentence {index} (vignette has {len})")]
    NoSuchSentence { index: usize, len: usize },
    #[error(transparent)]
    Summary(#[from] RoundSummaryError),
}

/// Errors emitted by `Simulator`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SimulatorError {
    #[error("{scene} has no ward round")]
    NotOnWard { scene: Scene },
    #[error("training clips are played in the skills lab, not in {scene}")]
    NotInSkillsLab { scene: Scene },
    #[error("expected a {expected} deck, got a {found} deck")]
    DeckKindMismatch { expected: RoundKind, found: RoundKind },
    #[error(transparent)]
    Listen(#[from] ListenError),
    #[error(transparent)]
    Round(#[from] RoundError),
    #[error(transparent)]
    Content(#[from] auscult_core::Error),
}

/// Errors emitted while loading a deck file.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DeckLoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("case #{index}: {source}")]
    Case {
        index: usize,
        #[source]
        source: CaseError,
    },
    #[error(transparent)]
    Deck(#[from] DeckError),
}
