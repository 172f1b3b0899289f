//! Results of resolving an action.

use dojo_core::{PlayerState, Scene};

/// Where the player ends up after an action.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    /// No next scene: re-render the current scene with the updated stats.
    Stay,
    /// Move to this scene.
    Enter(Scene),
    /// The next scene does not exist; show the "Scene Missing" sentinel.
    Missing(Scene),
}

impl Transition {
    /// The scene to show, or `None` to stay on the current one.
    pub fn scene(&self) -> Option<&Scene> {
        match self {
            Self::Stay => None,
            Self::Enter(scene) | Self::Missing(scene) => Some(scene),
        }
    }
}

/// Advisory messages for the renderer. They never block a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The action started (or restarted) a training.
    TrainingStarted {
        /// Skill now being trained.
        skill: String,
    },
    /// The action pointed at a scene the catalog does not have.
    SceneNotFound {
        /// The dangling scene ID.
        requested: String,
    },
}

/// A successfully resolved action.
#[derive(Debug, Clone)]
pub struct Resolution {
    /// Scene transition.
    pub transition: Transition,
    /// The player's state after effects (as persisted).
    pub player: PlayerState,
    /// Advisory notices, in the order they arose.
    pub notices: Vec<Notice>,
}

impl Resolution {
    /// The skill whose training this action started, if any.
    pub fn training_started(&self) -> Option<&str> {
        self.notices.iter().find_map(|notice| match notice {
            Notice::TrainingStarted { skill } => Some(skill.as_str()),
            _ => None,
        })
    }
}
