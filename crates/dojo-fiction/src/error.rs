//! Error types for action resolution.

use dojo_store::StoreError;
use thiserror::Error;

/// Result type for resolver operations.
pub type ResolveResult<T> = Result<T, ResolveError>;

/// Why an action was rejected. None of these are fatal to the process.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The action index does not exist on the scene.
    #[error("invalid action {index} on scene {scene} ({available} available)")]
    InvalidAction {
        /// Scene the action was chosen on.
        scene: String,
        /// Requested zero-based index.
        index: usize,
        /// Number of actions the scene has.
        available: usize,
    },

    /// The action's effects cannot be applied as written. Nothing was changed.
    #[error("action {index} on scene {scene} is malformed: {reason}")]
    InvalidEffect {
        /// Scene the action was chosen on.
        scene: String,
        /// Zero-based index of the action.
        index: usize,
        /// What is wrong with it.
        reason: String,
    },

    /// A stat is below the action's threshold. Nothing was changed.
    #[error("you need {threshold} {stat} to do this (you have {actual})")]
    RequirementNotMet {
        /// Stat that failed.
        stat: String,
        /// Minimum required value.
        threshold: f64,
        /// The player's value (0 when the stat is missing).
        actual: f64,
    },

    /// Persistence failed; the action is treated as not having happened.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}
