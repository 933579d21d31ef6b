#![forbid(unsafe_code)]

pub mod config;
pub mod deck_loader;
pub mod error;
pub mod ports;
pub mod quiz;
pub mod simulator;

pub use auscult_core::Clock;

pub use config::SimulatorConfig;
pub use deck_loader::{DeckFile, load_deck, parse_deck};
pub use error::{DeckLoadError, ListenError, RoundError, SimulatorError};
pub use ports::{
    AccuracySink, AudioEvent, AudioPlayer, RecordingAudioPlayer, RoundCompletionSink,
    SilentAudioPlayer,
};
pub use quiz::{AccuracyMeter, Advance, ChoiceOutcome, QuizSession, RoundProgress, WardRound};
pub use simulator::{ProgressReport, Simulator, WardDecks};
