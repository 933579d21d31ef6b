mod case;
mod deck;
mod ids;
mod library;
mod round;
mod training;

pub use ids::{CaseId, DeckId, ParseIdError};

pub use case::{Case, CaseDraft, CaseError, Sex};
pub use deck::{Deck, DeckError};
pub use library::{LibraryResource, ResourceError};
pub use round::{RoundKind, RoundSummary, RoundSummaryError};
pub use training::{TrainingClip, TrainingTrack};
