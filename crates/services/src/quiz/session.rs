use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use auscult_core::audio::candidate_sources;
use auscult_core::model::{Case, Deck};
use auscult_core::{ScoringRules, ShuffledOptions, shuffle_with_correct_index};

use crate::error::ListenError;
use crate::ports::{AccuracySink, AudioPlayer};

//
// ─── OUTCOMES ──────────────────────────────────────────────────────────────────
//

/// What a `choose` call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoiceOutcome {
    /// The case was already answered correctly, or the option is eliminated.
    Ignored,
    /// `scored` is true when this answer moved the accuracy score.
    Correct { scored: bool },
    Wrong { scored: bool },
}

impl ChoiceOutcome {
    #[must_use]
    pub fn is_correct(self) -> bool {
        matches!(self, ChoiceOutcome::Correct { .. })
    }
}

/// What a `next`/`previous` call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// The session moved to the case at `index`.
    Moved { index: usize },
    /// `previous` on the first case.
    Stayed,
    /// `next` on the last case; nothing changed.
    RoundComplete,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// Progression through one deck of cases.
///
/// The session never owns the accuracy score or the audio output; both are
/// passed to the operations that need them.
pub struct QuizSession<R = StdRng> {
    deck: Arc<Deck>,
    rules: ScoringRules,
    current: usize,
    selected: Option<usize>,
    is_correct: Option<bool>,
    attempts: u32,
    eliminated: BTreeSet<usize>,
    display: ShuffledOptions<String>,
    // Scored first-attempt result per case; a case is scored at most once.
    scored: Vec<Option<bool>>,
    rng: R,
}

impl QuizSession<StdRng> {
    /// Session whose shuffles are reproducible from `seed`.
    #[must_use]
    pub fn seeded(deck: Arc<Deck>, rules: ScoringRules, seed: u64) -> Self {
        Self::new(deck, rules, StdRng::seed_from_u64(seed))
    }

    /// Session seeded from the thread-local generator.
    #[must_use]
    pub fn from_entropy(deck: Arc<Deck>, rules: ScoringRules) -> Self {
        Self::new(deck, rules, StdRng::from_rng(&mut rand::rng()))
    }
}

impl<R: Rng> QuizSession<R> {
    #[must_use]
    pub fn new(deck: Arc<Deck>, rules: ScoringRules, mut rng: R) -> Self {
        let display = shuffle_case(&deck.cases()[0], &mut rng);
        let scored = vec![None; deck.len()];
        Self {
            deck,
            rules,
            current: 0,
            selected: None,
            is_correct: None,
            attempts: 0,
            eliminated: BTreeSet::new(),
            display,
            scored,
            rng,
        }
    }

    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    #[must_use]
    pub fn rules(&self) -> ScoringRules {
        self.rules
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_case(&self) -> &Case {
        &self.deck.cases()[self.current]
    }

    /// Options of the current case in display order.
    #[must_use]
    pub fn options(&self) -> &[String] {
        self.display.items()
    }

    #[must_use]
    pub fn correct_display_index(&self) -> usize {
        self.display.correct_index()
    }

    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    #[must_use]
    pub fn is_correct(&self) -> Option<bool> {
        self.is_correct
    }

    #[must_use]
    pub fn attempts_on_current(&self) -> u32 {
        self.attempts
    }

    #[must_use]
    pub fn is_eliminated(&self, option: usize) -> bool {
        self.eliminated.contains(&option)
    }

    pub fn eliminated(&self) -> impl Iterator<Item = usize> + '_ {
        self.eliminated.iter().copied()
    }

    #[must_use]
    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.current >= self.deck.last_index()
    }

    /// Feedback for the latest answer on the current case.
    #[must_use]
    pub fn feedback(&self) -> Option<&str> {
        self.is_correct.map(|c| self.current_case().feedback(c))
    }

    /// Scored first-attempt result for each case, in deck order.
    #[must_use]
    pub fn scored_results(&self) -> &[Option<bool>] {
        &self.scored
    }

    /// Answer the current case with the option at `option` (display order).
    ///
    /// Only the first attempt on a case that has never been scored proposes a
    /// delta to `accuracy`.
    ///
    /// # Panics
    ///
    /// Panics if `option` is not a valid display index.
    pub fn choose(&mut self, option: usize, accuracy: &mut dyn AccuracySink) -> ChoiceOutcome {
        self.assert_option(option);

        if self.is_correct == Some(true) || self.eliminated.contains(&option) {
            return ChoiceOutcome::Ignored;
        }

        let correct = option == self.display.correct_index();
        self.selected = Some(option);
        self.is_correct = Some(correct);

        let scored = self.attempts == 0 && self.scored[self.current].is_none();
        if scored {
            self.scored[self.current] = Some(correct);
            accuracy.apply_delta(self.rules.delta_for(correct));
        }
        self.attempts += 1;

        debug!(
            deck_id = %self.deck.id(),
            case = %self.current_case().id(),
            option,
            correct,
            scored,
            attempts = self.attempts,
            "option chosen"
        );

        if correct {
            ChoiceOutcome::Correct { scored }
        } else {
            ChoiceOutcome::Wrong { scored }
        }
    }

    /// Cross out an option, or restore it. Returns whether it is now eliminated.
    ///
    /// # Panics
    ///
    /// Panics if `option` is not a valid display index.
    pub fn toggle_eliminated(&mut self, option: usize) -> bool {
        self.assert_option(option);
        if self.eliminated.remove(&option) {
            false
        } else {
            self.eliminated.insert(option);
            true
        }
    }

    /// Stop audio, then move to the next case or report round completion.
    pub fn next(&mut self, audio: &mut dyn AudioPlayer) -> Advance {
        audio.stop();
        if self.is_last() {
            debug!(deck_id = %self.deck.id(), "last case passed, round complete");
            return Advance::RoundComplete;
        }
        self.enter(self.current + 1);
        Advance::Moved {
            index: self.current,
        }
    }

    /// Stop audio, then move back one case. Committed scores are left alone.
    pub fn previous(&mut self, audio: &mut dyn AudioPlayer) -> Advance {
        audio.stop();
        if self.is_first() {
            return Advance::Stayed;
        }
        self.enter(self.current - 1);
        Advance::Moved {
            index: self.current,
        }
    }

    /// Play the current case's recording.
    ///
    /// # Errors
    ///
    /// Returns `ListenError::NoAudio` if the case has no recording.
    pub fn listen(&self, audio: &mut dyn AudioPlayer) -> Result<(), ListenError> {
        let case = self.current_case();
        let candidates = case.audio().map(candidate_sources).unwrap_or_default();
        if candidates.is_empty() {
            return Err(ListenError::NoAudio {
                case_id: case.id().to_string(),
            });
        }
        audio.play(&candidates);
        Ok(())
    }

    fn enter(&mut self, index: usize) {
        self.current = index;
        self.selected = None;
        self.is_correct = None;
        self.attempts = 0;
        self.eliminated.clear();
        self.display = shuffle_case(&self.deck.cases()[index], &mut self.rng);
        debug!(deck_id = %self.deck.id(), case = %self.current_case().id(), index, "entered case");
    }

    fn assert_option(&self, option: usize) {
        assert!(
            option < self.display.len(),
            "option {option} out of range for {} options",
            self.display.len()
        );
    }
}

fn shuffle_case<R: Rng>(case: &Case, rng: &mut R) -> ShuffledOptions<String> {
    shuffle_with_correct_index(case.options(), case.correct_index(), rng)
}

impl<R> fmt::Debug for QuizSession<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("deck_id", &self.deck.id())
            .field("current", &self.current)
            .field("selected", &self.selected)
            .field("is_correct", &self.is_correct)
            .field("attempts", &self.attempts)
            .field("eliminated", &self.eliminated)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use auscult_core::model::{CaseDraft, DeckId, RoundKind, Sex};

    use crate::ports::{AudioEvent, RecordingAudioPlayer};

    #[derive(Default)]
    struct Deltas(Vec<i32>);

    impl AccuracySink for Deltas {
        fn apply_delta(&mut self, delta: i32) {
            self.0.push(delta);
        }
    }

    fn case(id: &str, audio: Option<&str>) -> Case {
        CaseDraft {
            id: id.into(),
            title: format!("Case {id}"),
            patient_name: "Pat".into(),
            age: 40,
            sex: Sex::Male,
            vignette: "Listen at the apex.".into(),
            options: vec!["AS".into(), "MR".into(), "VSD".into(), "PDA".into()],
            correct_index: 2,
            audio: audio.map(str::to_string),
            feedback_correct: "right".into(),
            feedback_wrong: "hint".into(),
        }
        .validate()
        .unwrap()
    }

    fn deck(n: usize) -> Arc<Deck> {
        let cases = (0..n)
            .map(|i| case(&format!("c{i}"), Some("/assets/audio/x.mp3")))
            .collect();
        Arc::new(Deck::new(DeckId::new(1), "Test", RoundKind::Adult, cases).unwrap())
    }

    fn session(n: usize) -> QuizSession {
        QuizSession::seeded(deck(n), ScoringRules::default(), 42)
    }

    fn wrong_option(s: &QuizSession) -> usize {
        (s.correct_display_index() + 1) % s.options().len()
    }

    #[test]
    fn display_order_tracks_correct_option() {
        let s = session(1);
        assert_eq!(s.options()[s.correct_display_index()], "VSD");
    }

    #[test]
    fn correct_answer_locks_case() {
        let mut s = session(2);
        let mut sink = Deltas::default();
        let correct = s.correct_display_index();

        assert_eq!(s.choose(correct, &mut sink), ChoiceOutcome::Correct { scored: true });
        let order = s.options().to_vec();

        assert_eq!(s.choose(wrong_option(&s), &mut sink), ChoiceOutcome::Ignored);
        assert_eq!(s.choose(correct, &mut sink), ChoiceOutcome::Ignored);
        assert_eq!(s.selected(), Some(correct));
        assert_eq!(s.attempts_on_current(), 1);
        assert_eq!(sink.0, vec![3]);
        assert_eq!(s.options(), order.as_slice());
    }

    #[test]
    fn only_first_attempt_scores() {
        let mut s = session(2);
        let mut sink = Deltas::default();

        let wrong = wrong_option(&s);
        assert_eq!(s.choose(wrong, &mut sink), ChoiceOutcome::Wrong { scored: true });
        assert_eq!(s.choose(wrong, &mut sink), ChoiceOutcome::Wrong { scored: false });
        let correct = s.correct_display_index();
        assert_eq!(s.choose(correct, &mut sink), ChoiceOutcome::Correct { scored: false });

        assert_eq!(sink.0, vec![-6]);
        assert_eq!(s.attempts_on_current(), 3);
        assert_eq!(s.feedback(), Some("right"));
    }

    #[test]
    fn eliminated_option_cannot_be_chosen() {
        let mut s = session(1);
        let mut sink = Deltas::default();
        let target = s.correct_display_index();

        assert!(s.toggle_eliminated(target));
        assert_eq!(s.choose(target, &mut sink), ChoiceOutcome::Ignored);
        assert_eq!(s.selected(), None);
        assert_eq!(s.attempts_on_current(), 0);
        assert!(sink.0.is_empty());

        assert!(!s.toggle_eliminated(target));
        assert!(s.choose(target, &mut sink).is_correct());
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn choose_out_of_range_panics() {
        let mut s = session(1);
        s.choose(4, &mut Deltas::default());
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn eliminate_out_of_range_panics() {
        let mut s = session(1);
        s.toggle_eliminated(99);
    }

    #[test]
    fn next_walks_deck_then_completes() {
        let mut s = session(4);
        let mut audio = RecordingAudioPlayer::new();

        for expected in 1..4 {
            assert_eq!(s.next(&mut audio), Advance::Moved { index: expected });
        }
        assert!(s.is_last());
        assert_eq!(s.next(&mut audio), Advance::RoundComplete);
        assert_eq!(s.current_index(), 3);
        assert_eq!(audio.stop_count(), 4);
    }

    #[test]
    fn next_resets_case_state() {
        let mut s = session(2);
        let mut sink = Deltas::default();
        let mut audio = RecordingAudioPlayer::new();

        let wrong = wrong_option(&s);
        s.toggle_eliminated(s.correct_display_index());
        s.choose(wrong, &mut sink);
        s.next(&mut audio);

        assert_eq!(s.selected(), None);
        assert_eq!(s.is_correct(), None);
        assert_eq!(s.attempts_on_current(), 0);
        assert_eq!(s.eliminated().count(), 0);
        assert_eq!(s.feedback(), None);
    }

    #[test]
    fn previous_at_start_is_noop() {
        let mut s = session(3);
        let mut sink = Deltas::default();
        let mut audio = RecordingAudioPlayer::new();
        s.choose(wrong_option(&s), &mut sink);
        let before = format!("{s:?}");

        assert_eq!(s.previous(&mut audio), Advance::Stayed);
        assert_eq!(format!("{s:?}"), before);
        assert_eq!(sink.0, vec![-6]);
    }

    #[test]
    fn revisited_case_allows_free_attempt() {
        let mut s = session(2);
        let mut sink = Deltas::default();
        let mut audio = RecordingAudioPlayer::new();

        s.choose(wrong_option(&s), &mut sink);
        s.next(&mut audio);
        s.previous(&mut audio);

        assert_eq!(s.attempts_on_current(), 0);
        let correct = s.correct_display_index();
        assert_eq!(s.choose(correct, &mut sink), ChoiceOutcome::Correct { scored: false });
        assert_eq!(sink.0, vec![-6]);
        assert_eq!(s.scored_results()[0], Some(false));
    }

    #[test]
    fn listen_plays_derived_candidates() {
        let s = session(1);
        let mut audio = RecordingAudioPlayer::new();
        s.listen(&mut audio).unwrap();
        assert_eq!(
            audio.last(),
            Some(&AudioEvent::Play(vec![
                "/assets/audio/x.mp3".to_string(),
                "/audio/x.mp3".to_string()
            ]))
        );
    }

    #[test]
    fn listen_without_recording_fails() {
        let deck = Arc::new(
            Deck::new(DeckId::new(3), "Silent", RoundKind::Adult, vec![case("quiet", None)])
                .unwrap(),
        );
        let s = QuizSession::seeded(deck, ScoringRules::default(), 1);
        let err = s.listen(&mut RecordingAudioPlayer::new()).unwrap_err();
        assert_eq!(
            err,
            ListenError::NoAudio {
                case_id: "quiet".into()
            }
        );
    }
}
