use serde::{Deserialize, Serialize};

/// Skills-lab track a training clip belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrainingTrack {
    Adult,
    Paediatric,
}

/// A reference heart-sound recording with its teaching points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrainingClip {
    title: String,
    audio: String,
    findings: Vec<String>,
}

impl TrainingClip {
    #[must_use]
    pub fn new(title: &str, audio: &str, findings: &[&str]) -> Self {
        Self {
            title: title.to_string(),
            audio: audio.to_string(),
            findings: findings.iter().map(|f| (*f).to_string()).collect(),
        }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn audio(&self) -> &str {
        &self.audio
    }

    #[must_use]
    pub fn findings(&self) -> &[String] {
        &self.findings
    }
}
