use serde::{Deserialize, Serialize};

use auscult_core::ScoringRules;

/// Runtime knobs for a `Simulator`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulatorConfig {
    scoring: ScoringRules,
    shuffle_seed: Option<u64>,
    require_stethoscope: bool,
}

impl SimulatorConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_scoring(mut self, scoring: ScoringRules) -> Self {
        self.scoring = scoring;
        self
    }

    /// Fix the option shuffle so a run can be replayed.
    #[must_use]
    pub fn with_shuffle_seed(mut self, seed: Option<u64>) -> Self {
        self.shuffle_seed = seed;
        self
    }

    #[must_use]
    pub fn with_require_stethoscope(mut self, required: bool) -> Self {
        self.require_stethoscope = required;
        self
    }

    #[must_use]
    pub fn scoring(&self) -> ScoringRules {
        self.scoring
    }

    #[must_use]
    pub fn shuffle_seed(&self) -> Option<u64> {
        self.shuffle_seed
    }

    #[must_use]
    pub fn require_stethoscope(&self) -> bool {
        self.require_stethoscope
    }
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            scoring: ScoringRules::default(),
            shuffle_seed: None,
            require_stethoscope: true,
        }
    }
}
