#![forbid(unsafe_code)]

pub mod accuracy;
pub mod annotation;
pub mod audio;
pub mod catalog;
pub mod error;
pub mod model;
pub mod scene;
pub mod shuffle;
pub mod time;

pub use accuracy::{Accuracy, ScoringError, ScoringRules};
pub use error::Error;
pub use scene::{Scene, SceneRouter, UnknownScene};
pub use shuffle::{ShuffledOptions, shuffle_with_correct_index};
pub use time::Clock;
