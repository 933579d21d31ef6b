use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use auscult_core::model::{CaseDraft, Deck, DeckId, RoundKind};

use crate::error::DeckLoadError;

/// On-disk shape of a deck.
#[derive(Debug, Clone, Deserialize)]
pub struct DeckFile {
    pub name: String,
    pub kind: RoundKind,
    pub cases: Vec<CaseDraft>,
}

impl DeckFile {
    /// Validate every case and build the deck.
    ///
    /// # Errors
    ///
    /// Returns `DeckLoadError::Case` with the position of the first invalid case.
    /// Returns `DeckLoadError::Deck` if the deck itself is invalid.
    pub fn into_deck(self, id: DeckId) -> Result<Deck, DeckLoadError> {
        let cases = self
            .cases
            .into_iter()
            .enumerate()
            .map(|(index, draft)| {
                draft
                    .validate()
                    .map_err(|source| DeckLoadError::Case { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Deck::new(id, self.name, self.kind, cases)?)
    }
}

/// Parse a deck from JSON text.
///
/// # Errors
///
/// Returns `DeckLoadError::Json` on malformed input, otherwise as `DeckFile::into_deck`.
pub fn parse_deck(id: DeckId, json: &str) -> Result<Deck, DeckLoadError> {
    let file: DeckFile = serde_json::from_str(json)?;
    file.into_deck(id)
}

/// Read and parse a deck file.
///
/// # Errors
///
/// Returns `DeckLoadError::Io` if the file cannot be read, otherwise as `parse_deck`.
pub fn load_deck(id: DeckId, path: &Path) -> Result<Deck, DeckLoadError> {
    let json = fs::read_to_string(path).map_err(|source| DeckLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let deck = parse_deck(id, &json)?;
    info!(path = %path.display(), %id, kind = %deck.kind(), cases = deck.len(), "deck loaded");
    Ok(deck)
}
