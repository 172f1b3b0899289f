//! The seam between the engine and whatever presents scenes to players.

use dojo_core::{PlayerState, Scene};

/// Turns a scene and the player's state into something presentable.
///
/// The engine does not precompute which actions are enabled; a front end
/// calls the resolver and interprets its result.
pub trait Renderer {
    /// The presentable form (text, a chat message, ...).
    type Output;

    /// Render `scene` for `player`.
    fn render(&self, scene: &Scene, player: &PlayerState) -> Self::Output;
}
