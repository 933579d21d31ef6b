use std::sync::Arc;

use chrono::{DateTime, Utc};
use rand::Rng;
use rand::rngs::StdRng;
use tracing::info;

use auscult_core::annotation::{Highlights, split_sentences};
use auscult_core::model::{Deck, RoundSummary};
use auscult_core::{Accuracy, Clock, ScoringRules};

use crate::error::{ListenError, RoundError};
use crate::ports::{AudioPlayer, RoundCompletionSink};
use crate::quiz::meter::AccuracyMeter;
use crate::quiz::progress::RoundProgress;
use crate::quiz::session::{Advance, ChoiceOutcome, QuizSession};

/// A mounted ward scene: one quiz session, the ward's accuracy meter and the
/// vignette highlighter.
#[derive(Debug)]
pub struct WardRound<R = StdRng> {
    session: QuizSession<R>,
    meter: AccuracyMeter,
    highlights: Highlights,
    clock: Clock,
    started_at: DateTime<Utc>,
}

impl<R: Rng> WardRound<R> {
    /// Mount a fresh round. Accuracy starts at the rules' starting value.
    #[must_use]
    pub fn start(deck: Arc<Deck>, rules: ScoringRules, clock: Clock, rng: R) -> Self {
        let started_at = clock.now();
        info!(deck_id = %deck.id(), kind = %deck.kind(), cases = deck.len(), "ward round started");
        Self {
            session: QuizSession::new(deck, rules, rng),
            meter: AccuracyMeter::new(rules.starting()),
            highlights: Highlights::new(),
            clock,
            started_at,
        }
    }

    #[must_use]
    pub fn session(&self) -> &QuizSession<R> {
        &self.session
    }

    #[must_use]
    pub fn accuracy(&self) -> Accuracy {
        self.meter.value()
    }

    #[must_use]
    pub fn highlights(&self) -> &Highlights {
        &self.highlights
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Vignette of the current case split into highlightable sentences.
    #[must_use]
    pub fn sentences(&self) -> Vec<&str> {
        split_sentences(self.session.current_case().vignette())
    }

    /// # Panics
    ///
    /// Panics if `option` is not a valid display index.
    pub fn choose(&mut self, option: usize) -> ChoiceOutcome {
        self.session.choose(option, &mut self.meter)
    }

    /// # Panics
    ///
    /// Panics if `option` is not a valid display index.
    pub fn toggle_eliminated(&mut self, option: usize) -> bool {
        self.session.toggle_eliminated(option)
    }

    pub fn toggle_highlighter(&mut self) -> bool {
        self.highlights.toggle_mode()
    }

    /// Returns whether the sentence is highlighted afterwards.
    ///
    /// # Errors
    ///
    /// Returns `RoundError::NoSuchSentence` if the vignette has no sentence at `index`.
    pub fn toggle_sentence(&mut self, index: usize) -> Result<bool, RoundError> {
        let len = self.sentences().len();
        if index >= len {
            return Err(RoundError::NoSuchSentence { index, len });
        }
        Ok(self.highlights.toggle_sentence(index))
    }

    pub fn clear_highlights(&mut self) {
        self.highlights.clear();
    }

    /// # Errors
    ///
    /// Returns `ListenError::NoAudio` if the current case has no recording.
    pub fn listen(&self, audio: &mut dyn AudioPlayer) -> Result<(), ListenError> {
        self.session.listen(audio)
    }

    /// Advance to the next case. Past the last case, the round summary goes
    /// to `completion` and the session is left untouched.
    ///
    /// # Errors
    ///
    /// Returns `RoundError::Summary` if the summary cannot be built.
    pub fn next(
        &mut self,
        audio: &mut dyn AudioPlayer,
        completion: &mut dyn RoundCompletionSink,
    ) -> Result<Advance, RoundError> {
        let advance = self.session.next(audio);
        match advance {
            Advance::RoundComplete => {
                let summary = self.summary()?;
                info!(
                    deck_id = %summary.deck_id(),
                    accuracy = %summary.final_accuracy(),
                    correct = summary.first_attempt_correct(),
                    wrong = summary.first_attempt_wrong(),
                    "ward round complete"
                );
                completion.round_complete(&summary);
            }
            Advance::Moved { .. } => self.highlights.clear(),
            Advance::Stayed => {}
        }
        Ok(advance)
    }

    pub fn previous(&mut self, audio: &mut dyn AudioPlayer) -> Advance {
        let advance = self.session.previous(audio);
        if let Advance::Moved { .. } = advance {
            self.highlights.clear();
        }
        advance
    }

    /// Snapshot of the round as it stands.
    ///
    /// # Errors
    ///
    /// Returns `RoundError::Summary` if the collected counters are inconsistent.
    pub fn summary(&self) -> Result<RoundSummary, RoundError> {
        let deck = self.session.deck();
        let results = self.session.scored_results();
        let correct = results.iter().filter(|r| **r == Some(true)).count();
        let wrong = results.iter().filter(|r| **r == Some(false)).count();
        let completed_at = self.clock.now().max(self.started_at);

        Ok(RoundSummary::new(
            deck.id(),
            deck.kind(),
            self.started_at,
            completed_at,
            self.meter.value(),
            deck.len(),
            correct,
            wrong,
        )?)
    }

    #[must_use]
    pub fn progress(&self) -> RoundProgress {
        let deck = self.session.deck();
        RoundProgress {
            deck_name: deck.name().to_string(),
            kind: deck.kind(),
            index: self.session.current_index(),
            total: deck.len(),
            accuracy: self.meter.value(),
            is_first: self.session.is_first(),
            is_last: self.session.is_last(),
            selected: self.session.selected(),
            is_correct: self.session.is_correct(),
            attempts: self.session.attempts_on_current(),
            feedback: self.session.feedback().map(str::to_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use auscult_core::catalog;
    use auscult_core::time::fixed_now;
    use rand::SeedableRng;

    use crate::ports::SilentAudioPlayer;

    fn round() -> WardRound {
        let deck = Arc::new(catalog::adult_ward_round().unwrap());
        WardRound::start(
            deck,
            ScoringRules::default(),
            Clock::fixed(fixed_now()),
            StdRng::seed_from_u64(5),
        )
    }

    #[test]
    fn starts_at_full_accuracy() {
        let round = round();
        let progress = round.progress();
        assert_eq!(progress.accuracy, Accuracy::FULL);
        assert_eq!(progress.position_label(), "Case 1 of 8");
        assert!(progress.is_first);
        assert_eq!(progress.feedback, None);
    }

    #[test]
    fn highlights_reset_when_case_changes() {
        let mut round = round();
        let mut done: Vec<RoundSummary> = Vec::new();
        round.toggle_highlighter();
        assert!(round.toggle_sentence(0).unwrap());

        round.next(&mut SilentAudioPlayer, &mut done).unwrap();
        assert_eq!(round.highlights().marked().count(), 0);
        assert!(round.highlights().is_enabled());
    }

    #[test]
    fn summary_counts_scored_cases() {
        let mut round = round();
        let len = round.session().options().len();
        let wrong = (round.session().correct_display_index() + 1) % len;
        round.choose(wrong);
        let mut done: Vec<RoundSummary> = Vec::new();
        round.next(&mut SilentAudioPlayer, &mut done).unwrap();
        assert!(done.is_empty());
        let correct = round.session().correct_display_index();
        round.choose(correct);

        let summary = round.summary().unwrap();
        assert_eq!(summary.first_attempt_wrong(), 1);
        assert_eq!(summary.first_attempt_correct(), 1);
        assert_eq!(summary.unanswered(), 6);
        assert_eq!(summary.final_accuracy().value(), 97);
    }

    #[test]
    fn sentence_outside_vignette_is_rejected() {
        let mut round = round();
        round.toggle_highlighter();
        let len = round.sentences().len();

        let err = round.toggle_sentence(len).unwrap_err();
        assert!(matches!(err, RoundError::NoSuchSentence { index, .. } if index == len));
        assert_eq!(round.highlights().marked().count(), 0);
        assert!(round.toggle_sentence(len - 1).unwrap());
    }
}
