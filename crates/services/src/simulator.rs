//! Top-level controller for a rotation.
//!
//! The simulator owns the scene router, the audio player, the ward decks and
//! the currently mounted ward round. Every piece of mutable state lives here
//! and is lent to the session per call.

use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use tracing::{info, warn};

use auscult_core::audio::candidate_sources;
use auscult_core::catalog;
use auscult_core::model::{
    Deck, LibraryResource, RoundKind, RoundSummary, TrainingClip, TrainingTrack,
};
use auscult_core::{Accuracy, Clock, Scene, SceneRouter};

use crate::config::SimulatorConfig;
use crate::error::{ListenError, SimulatorError};
use crate::ports::AudioPlayer;
use crate::quiz::{Advance, ChoiceOutcome, WardRound};

//
// ─── DECKS ─────────────────────────────────────────────────────────────────────
//

/// The two decks a rotation plays, one per ward.
#[derive(Debug, Clone)]
pub struct WardDecks {
    pub adult: Deck,
    pub paediatric: Deck,
}

impl WardDecks {
    /// Built-in adult and congenital decks.
    ///
    /// # Errors
    ///
    /// Returns an error if the built-in content fails validation.
    pub fn builtin() -> Result<Self, auscult_core::Error> {
        Ok(Self {
            adult: catalog::adult_ward_round()?,
            paediatric: catalog::paediatric_ward_round()?,
        })
    }
}

//
// ─── PROGRESS ──────────────────────────────────────────────────────────────────
//

/// Latest completed round per ward.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProgressReport {
    pub adult: Option<RoundSummary>,
    pub paediatric: Option<RoundSummary>,
    /// Mean of both final accuracies once both wards are done.
    pub combined: Option<Accuracy>,
}

//
// ─── SIMULATOR ─────────────────────────────────────────────────────────────────
//

#[derive(Debug)]
pub struct Simulator<A> {
    config: SimulatorConfig,
    clock: Clock,
    audio: A,
    router: SceneRouter,
    stethoscope_on: bool,
    adult: Arc<Deck>,
    paediatric: Arc<Deck>,
    adult_clips: Vec<TrainingClip>,
    paediatric_clips: Vec<TrainingClip>,
    library: Vec<LibraryResource>,
    active: Option<WardRound>,
    completed: Vec<RoundSummary>,
    rng: StdRng,
}

impl<A: AudioPlayer> Simulator<A> {
    /// Start a rotation on the intro scene.
    ///
    /// # Errors
    ///
    /// Returns `SimulatorError::DeckKindMismatch` if a deck is on the wrong ward.
    /// Returns `SimulatorError::Content` if built-in library content is invalid.
    pub fn new(
        config: SimulatorConfig,
        decks: WardDecks,
        clock: Clock,
        audio: A,
    ) -> Result<Self, SimulatorError> {
        ensure_kind(&decks.adult, RoundKind::Adult)?;
        ensure_kind(&decks.paediatric, RoundKind::Paediatric)?;

        let rng = match config.shuffle_seed() {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };

        Ok(Self {
            config,
            clock,
            audio,
            router: SceneRouter::new(),
            stethoscope_on: false,
            adult: Arc::new(decks.adult),
            paediatric: Arc::new(decks.paediatric),
            adult_clips: catalog::training_clips(TrainingTrack::Adult),
            paediatric_clips: catalog::training_clips(TrainingTrack::Paediatric),
            library: catalog::library_resources()?,
            active: None,
            completed: Vec::new(),
            rng,
        })
    }

    /// # Errors
    ///
    /// Returns `SimulatorError::Content` if the built-in catalog is invalid.
    pub fn with_builtin_content(
        config: SimulatorConfig,
        clock: Clock,
        audio: A,
    ) -> Result<Self, SimulatorError> {
        Self::new(config, WardDecks::builtin()?, clock, audio)
    }

    // ─── Accessors ──────────────────────────────────────────────────────────────

    #[must_use]
    pub fn scene(&self) -> Scene {
        self.router.current()
    }

    #[must_use]
    pub fn audio(&self) -> &A {
        &self.audio
    }

    #[must_use]
    pub fn stethoscope_on(&self) -> bool {
        self.stethoscope_on
    }

    #[must_use]
    pub fn library(&self) -> &[LibraryResource] {
        &self.library
    }

    #[must_use]
    pub fn training_clips(&self, track: TrainingTrack) -> &[TrainingClip] {
        match track {
            TrainingTrack::Adult => &self.adult_clips,
            TrainingTrack::Paediatric => &self.paediatric_clips,
        }
    }

    #[must_use]
    pub fn completed_rounds(&self) -> &[RoundSummary] {
        &self.completed
    }

    /// The ward round mounted in the current scene.
    ///
    /// # Errors
    ///
    /// Returns `SimulatorError::NotOnWard` outside the ward scenes.
    pub fn ward(&self) -> Result<&WardRound, SimulatorError> {
        self.active.as_ref().ok_or(SimulatorError::NotOnWard {
            scene: self.router.current(),
        })
    }

    // ─── Scenes ─────────────────────────────────────────────────────────────────

    /// Returns true when the scene changed.
    pub fn next_scene(&mut self) -> bool {
        self.audio.stop();
        let moved = self.router.next();
        self.after_move(moved);
        moved
    }

    /// Returns true when the scene changed.
    pub fn previous_scene(&mut self) -> bool {
        self.audio.stop();
        let moved = self.router.previous();
        self.after_move(moved);
        moved
    }

    /// Returns true when the scene changed.
    pub fn goto(&mut self, scene: Scene) -> bool {
        self.audio.stop();
        let moved = self.router.goto(scene);
        self.after_move(moved);
        moved
    }

    fn after_move(&mut self, moved: bool) {
        if !moved {
            return;
        }
        let scene = self.router.current();
        info!(%scene, "scene changed");
        self.active = scene.round_kind().map(|kind| {
            let deck = match kind {
                RoundKind::Adult => Arc::clone(&self.adult),
                RoundKind::Paediatric => Arc::clone(&self.paediatric),
            };
            WardRound::start(
                deck,
                self.config.scoring(),
                self.clock,
                StdRng::from_rng(&mut self.rng),
            )
        });
    }

    // ─── Stethoscope ────────────────────────────────────────────────────────────

    /// Returns the new state.
    pub fn toggle_stethoscope(&mut self) -> bool {
        self.stethoscope_on = !self.stethoscope_on;
        info!(on = self.stethoscope_on, "stethoscope toggled");
        self.stethoscope_on
    }

    fn check_stethoscope(&self) -> Result<(), ListenError> {
        if self.config.require_stethoscope() && !self.stethoscope_on {
            warn!(scene = %self.router.current(), "listen refused, stethoscope off");
            return Err(ListenError::StethoscopeOff);
        }
        Ok(())
    }

    /// Play a skills-lab clip and return it for its findings.
    ///
    /// # Errors
    ///
    /// Returns `SimulatorError::NotInSkillsLab` outside the skills lab.
    /// Returns `SimulatorError::Listen` if the stethoscope is off or the clip
    /// does not exist.
    pub fn listen_training(
        &mut self,
        track: TrainingTrack,
        index: usize,
    ) -> Result<&TrainingClip, SimulatorError> {
        let scene = self.router.current();
        if scene != Scene::Skills {
            return Err(SimulatorError::NotInSkillsLab { scene });
        }
        self.check_stethoscope()?;

        let clips = match track {
            TrainingTrack::Adult => &self.adult_clips,
            TrainingTrack::Paediatric => &self.paediatric_clips,
        };
        let clip = clips.get(index).ok_or(ListenError::UnknownClip {
            index,
            len: clips.len(),
        })?;
        self.audio.play(&candidate_sources(clip.audio()));
        Ok(clip)
    }

    // ─── Ward actions ───────────────────────────────────────────────────────────

    fn ward_mut(&mut self) -> Result<&mut WardRound, SimulatorError> {
        let scene = self.router.current();
        self.active
            .as_mut()
            .ok_or(SimulatorError::NotOnWard { scene })
    }

    /// # Errors
    ///
    /// Returns `SimulatorError::NotOnWard` outside the ward scenes.
    ///
    /// # Panics
    ///
    /// Panics if `option` is not a valid display index.
    pub fn choose(&mut self, option: usize) -> Result<ChoiceOutcome, SimulatorError> {
        Ok(self.ward_mut()?.choose(option))
    }

    /// # Errors
    ///
    /// Returns `SimulatorError::NotOnWard` outside the ward scenes.
    ///
    /// # Panics
    ///
    /// Panics if `option` is not a valid display index.
    pub fn eliminate(&mut self, option: usize) -> Result<bool, SimulatorError> {
        Ok(self.ward_mut()?.toggle_eliminated(option))
    }

    /// # Errors
    ///
    /// Returns `SimulatorError::NotOnWard` outside the ward scenes.
    pub fn toggle_highlighter(&mut self) -> Result<bool, SimulatorError> {
        Ok(self.ward_mut()?.toggle_highlighter())
    }

    /// # Errors
    ///
    /// Returns `SimulatorError::NotOnWard` outside the ward scenes.
    /// Returns `SimulatorError::Round` if the vignette has no sentence at `index`.
    pub fn highlight_sentence(&mut self, index: usize) -> Result<bool, SimulatorError> {
        Ok(self.ward_mut()?.toggle_sentence(index)?)
    }

    /// # Errors
    ///
    /// Returns `SimulatorError::NotOnWard` outside the ward scenes.
    pub fn clear_highlights(&mut self) -> Result<(), SimulatorError> {
        self.ward_mut()?.clear_highlights();
        Ok(())
    }

    /// Play the current case's recording.
    ///
    /// # Errors
    ///
    /// Returns `SimulatorError::NotOnWard` outside the ward scenes.
    /// Returns `SimulatorError::Listen` if the stethoscope is off or the case
    /// has no recording.
    pub fn listen_case(&mut self) -> Result<(), SimulatorError> {
        let scene = self.router.current();
        let round = self
            .active
            .as_ref()
            .ok_or(SimulatorError::NotOnWard { scene })?;
        self.check_stethoscope()?;
        if let Err(err) = round.listen(&mut self.audio) {
            warn!(%scene, error = %err, "listen refused");
            return Err(err.into());
        }
        Ok(())
    }

    /// Move to the next case. Finishing the deck records the round and moves
    /// the rotation on to the next scene.
    ///
    /// # Errors
    ///
    /// Returns `SimulatorError::NotOnWard` outside the ward scenes.
    /// Returns `SimulatorError::Round` if the round summary cannot be built.
    pub fn next_case(&mut self) -> Result<Advance, SimulatorError> {
        let scene = self.router.current();
        let round = self
            .active
            .as_mut()
            .ok_or(SimulatorError::NotOnWard { scene })?;
        let advance = round.next(&mut self.audio, &mut self.completed)?;
        if advance == Advance::RoundComplete {
            self.next_scene();
        }
        Ok(advance)
    }

    /// # Errors
    ///
    /// Returns `SimulatorError::NotOnWard` outside the ward scenes.
    pub fn previous_case(&mut self) -> Result<Advance, SimulatorError> {
        let scene = self.router.current();
        let round = self
            .active
            .as_mut()
            .ok_or(SimulatorError::NotOnWard { scene })?;
        Ok(round.previous(&mut self.audio))
    }

    // ─── Progress ───────────────────────────────────────────────────────────────

    #[must_use]
    pub fn progress(&self) -> ProgressReport {
        let latest = |kind: RoundKind| {
            self.completed
                .iter()
                .rev()
                .find(|s| s.kind() == kind)
                .cloned()
        };
        let adult = latest(RoundKind::Adult);
        let paediatric = latest(RoundKind::Paediatric);
        let combined = match (&adult, &paediatric) {
            (Some(a), Some(p)) => Accuracy::mean(&[a.final_accuracy(), p.final_accuracy()]),
            _ => None,
        };
        ProgressReport {
            adult,
            paediatric,
            combined,
        }
    }
}

fn ensure_kind(deck: &Deck, expected: RoundKind) -> Result<(), SimulatorError> {
    if deck.kind() != expected {
        return Err(SimulatorError::DeckKindMismatch {
            expected,
            found: deck.kind(),
        });
    }
    Ok(())
}
