//! Collaborators the quiz core talks to but does not own. They are lent to
//! each call, never stored.

use auscult_core::model::RoundSummary;

/// Platform audio output. Playback outcome is never reported back.
pub trait AudioPlayer {
    /// Try `candidates` in order until one plays.
    fn play(&mut self, candidates: &[String]);

    /// Stop whatever is playing. Must be cheap to call when idle.
    fn stop(&mut self);
}

/// Receiver of accuracy deltas proposed by a session.
///
/// The implementation owns the score and is responsible for clamping it.
pub trait AccuracySink {
    fn apply_delta(&mut self, delta: i32);
}

/// Receiver of the final snapshot when a round ends.
pub trait RoundCompletionSink {
    fn round_complete(&mut self, summary: &RoundSummary);
}

impl RoundCompletionSink for Vec<RoundSummary> {
    fn round_complete(&mut self, summary: &RoundSummary) {
        self.push(summary.clone());
    }
}

impl<T: AudioPlayer + ?Sized> AudioPlayer for &mut T {
    fn play(&mut self, candidates: &[String]) {
        (**self).play(candidates);
    }

    fn stop(&mut self) {
        (**self).stop();
    }
}

impl<T: AudioPlayer + ?Sized> AudioPlayer for Box<T> {
    fn play(&mut self, candidates: &[String]) {
        (**self).play(candidates);
    }

    fn stop(&mut self) {
        (**self).stop();
    }
}

/// Player that discards every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentAudioPlayer;

impl AudioPlayer for SilentAudioPlayer {
    fn play(&mut self, _candidates: &[String]) {}

    fn stop(&mut self) {}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioEvent {
    Play(Vec<String>),
    Stop,
}

/// Player that records requests in order; used to check stop-before-advance.
#[derive(Debug, Clone, Default)]
pub struct RecordingAudioPlayer {
    events: Vec<AudioEvent>,
}

impl RecordingAudioPlayer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn events(&self) -> &[AudioEvent] {
        &self.events
    }

    #[must_use]
    pub fn last(&self) -> Option<&AudioEvent> {
        self.events.last()
    }

    #[must_use]
    pub fn stop_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, AudioEvent::Stop))
            .count()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl AudioPlayer for RecordingAudioPlayer {
    fn play(&mut self, candidates: &[String]) {
        self.events.push(AudioEvent::Play(candidates.to_vec()));
    }

    fn stop(&mut self) {
        self.events.push(AudioEvent::Stop);
    }
}
