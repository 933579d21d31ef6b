use auscult_core::Accuracy;

use crate::ports::AccuracySink;

/// Owns a ward's accuracy score and clamps every delta into `[0, 100]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccuracyMeter {
    value: Accuracy,
}

impl AccuracyMeter {
    #[must_use]
    pub fn new(start: Accuracy) -> Self {
        Self { value: start }
    }

    #[must_use]
    pub fn value(&self) -> Accuracy {
        self.value
    }
}

impl AccuracySink for AccuracyMeter {
    fn apply_delta(&mut self, delta: i32) {
        self.value = self.value.apply(delta);
    }
}
