mod meter;
mod progress;
mod round;
mod session;

pub use meter::AccuracyMeter;
pub use progress::RoundProgress;
pub use round::WardRound;
pub use session::{Advance, ChoiceOutcome, QuizSession};
