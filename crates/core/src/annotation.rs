//! Sentence-level highlighting of case vignettes.

use std::collections::BTreeSet;

/// Split a vignette into sentences.
///
/// A sentence is a run of characters other than `.`, `!` and `?`, followed by
/// at most one of them. Runs made only of whitespace are dropped, and text
/// with no usable run comes back whole.
#[must_use]
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = None;

    for (i, ch) in text.char_indices() {
        let is_terminator = matches!(ch, '.' | '!' | '?');
        match (start, is_terminator) {
            (None, false) => start = Some(i),
            (Some(s), true) => {
                push_trimmed(&mut sentences, &text[s..i + ch.len_utf8()]);
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        push_trimmed(&mut sentences, &text[s..]);
    }

    if sentences.is_empty() {
        sentences.push(text);
    }
    sentences
}

fn push_trimmed<'a>(out: &mut Vec<&'a str>, fragment: &'a str) {
    let trimmed = fragment.trim();
    if trimmed.is_empty() || trimmed.chars().all(|c| matches!(c, '.' | '!' | '?')) {
        return;
    }
    out.push(trimmed);
}

/// Highlighter state for the vignette currently on screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Highlights {
    enabled: bool,
    marked: BTreeSet<usize>,
}

impl Highlights {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Flip highlighter mode; returns the new mode.
    pub fn toggle_mode(&mut self) -> bool {
        self.enabled = !self.enabled;
        self.enabled
    }

    /// Toggle a sentence while the highlighter is on.
    ///
    /// Returns whether the sentence is highlighted afterwards. Ignored (and
    /// reports the current state) while the highlighter is off.
    pub fn toggle_sentence(&mut self, index: usize) -> bool {
        if !self.enabled {
            return self.marked.contains(&index);
        }
        if !self.marked.remove(&index) {
            self.marked.insert(index);
            return true;
        }
        false
    }

    #[must_use]
    pub fn is_marked(&self, index: usize) -> bool {
        self.marked.contains(&index)
    }

    pub fn marked(&self) -> impl Iterator<Item = usize> + '_ {
        self.marked.iter().copied()
    }

    /// Remove all highlights; the mode is left as is.
    pub fn clear(&mut self) {
        self.marked.clear();
    }
}
