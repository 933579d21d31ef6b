use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Stable slug identifying a clinical case (e.g. `adult-3`).
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CaseId(String);

impl CaseId {
    /// Creates a new `CaseId`, trimming surrounding whitespace.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self(id.trim().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Unique identifier for a Deck
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DeckId(u64);

impl DeckId {
    /// Creates a new `DeckId`
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the underlying u64 value
    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for CaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CaseId({})", self.0)
    }
}

impl fmt::Debug for DeckId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DeckId({})", self.0)
    }
}

// ─── Display Implementations ───────────────────────────────────────────────────

impl fmt::Display for CaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for DeckId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ─── FromStr Implementations ───────────────────────────────────────────────────

/// Error type for parsing an id from a string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    kind: &'static str,
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse {} from string", self.kind)
    }
}

impl std::error::Error for ParseIdError {}

impl FromStr for CaseId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = CaseId::new(s);
        if id.is_empty() {
            return Err(ParseIdError { kind: "CaseId" });
        }
        Ok(id)
    }
}

impl FromStr for DeckId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(DeckId::new)
            .map_err(|_| ParseIdError { kind: "DeckId" })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn case_id_trims_and_displays() {
        let id = CaseId::new("  adult-1 ");
        assert_eq!(id.as_str(), "adult-1");
        assert_eq!(id.to_string(), "adult-1");
        assert_eq!(format!("{id:?}"), "CaseId(adult-1)");
    }

    #[test]
    fn parse_rejects_blank_case_id() {
        assert!("   ".parse::<CaseId>().is_err());
        assert_eq!("chd-2".parse::<CaseId>().unwrap(), CaseId::new("chd-2"));
    }

    #[test]
    fn deck_id_parses_numbers_only() {
        assert_eq!("42".parse::<DeckId>().unwrap(), DeckId::new(42));
        let err = "forty".parse::<DeckId>().unwrap_err();
        assert_eq!(err.to_string(), "failed to parse DeckId from string");
    }
}
