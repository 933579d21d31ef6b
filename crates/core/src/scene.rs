use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::model::RoundKind;

/// Scenes of a rotation, in the order the learner walks through them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scene {
    Intro,
    Skills,
    Ward,
    Peds,
    Progress,
    Library,
    References,
}

impl Scene {
    pub const ALL: [Scene; 7] = [
        Scene::Intro,
        Scene::Skills,
        Scene::Ward,
        Scene::Peds,
        Scene::Progress,
        Scene::Library,
        Scene::References,
    ];

    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Scene::Intro => 0,
            Scene::Skills => 1,
            Scene::Ward => 2,
            Scene::Peds => 3,
            Scene::Progress => 4,
            Scene::Library => 5,
            Scene::References => 6,
        }
    }

    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Scene::Intro => "Start Shift",
            Scene::Skills => "Skills Lab",
            Scene::Ward => RoundKind::Adult.ward_title(),
            Scene::Peds => RoundKind::Paediatric.ward_title(),
            Scene::Progress => "Progress",
            Scene::Library => "Consultant's Library",
            Scene::References => "References",
        }
    }

    /// The ward round played in this scene, if any.
    #[must_use]
    pub fn round_kind(self) -> Option<RoundKind> {
        match self {
            Scene::Ward => Some(RoundKind::Adult),
            Scene::Peds => Some(RoundKind::Paediatric),
            _ => None,
        }
    }
}

impl fmt::Display for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for Scene {
    type Err = UnknownScene;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "intro" => Ok(Scene::Intro),
            "skills" => Ok(Scene::Skills),
            "ward" => Ok(Scene::Ward),
            "peds" | "paeds" => Ok(Scene::Peds),
            "progress" => Ok(Scene::Progress),
            "library" => Ok(Scene::Library),
            "refs" | "references" => Ok(Scene::References),
            _ => Err(UnknownScene(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown scene: {0}")]
pub struct UnknownScene(pub String);

/// Index-based router over `Scene::ALL`; moves clamp at both ends.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SceneRouter {
    index: usize,
}

impl SceneRouter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn current(&self) -> Scene {
        Scene::ALL[self.index]
    }

    #[must_use]
    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.index + 1 >= Scene::ALL.len()
    }

    /// Returns true when the scene changed.
    pub fn next(&mut self) -> bool {
        if self.is_last() {
            return false;
        }
        self.index += 1;
        true
    }

    /// Returns true when the scene changed.
    pub fn previous(&mut self) -> bool {
        if self.is_first() {
            return false;
        }
        self.index -= 1;
        true
    }

    /// Returns true when the scene changed.
    pub fn goto(&mut self, scene: Scene) -> bool {
        let index = scene.index();
        let moved = index != self.index;
        self.index = index;
        moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_round_trips_for_all_scenes() {
        for (i, scene) in Scene::ALL.iter().enumerate() {
            assert_eq!(scene.index(), i);
            assert_eq!(Scene::from_index(i), Some(*scene));
        }
        assert_eq!(Scene::from_index(Scene::ALL.len()), None);
    }

    #[test]
    fn router_clamps_at_ends() {
        let mut router = SceneRouter::new();
        assert!(!router.previous());
        assert_eq!(router.current(), Scene::Intro);

        let mut moves = 0;
        while router.next() {
            moves += 1;
        }
        assert_eq!(moves, Scene::ALL.len() - 1);
        assert_eq!(router.current(), Scene::References);
        assert!(router.is_last());
        assert!(!router.next());
    }

    #[test]
    fn goto_reports_movement() {
        let mut router = SceneRouter::new();
        assert!(router.goto(Scene::Peds));
        assert!(!router.goto(Scene::Peds));
        assert_eq!(router.current().round_kind(), Some(RoundKind::Paediatric));
    }

    #[test]
    fn parses_scene_aliases() {
        assert_eq!("Paeds".parse::<Scene>().unwrap(), Scene::Peds);
        assert_eq!("refs".parse::<Scene>().unwrap(), Scene::References);
        assert!("lobby".parse::<Scene>().is_err());
    }
}
