//! Scene/action state machine for Dojo.
//!
//! [`ActionResolver`] takes a player's choice on a scene, gates it on the
//! action's requirements, applies its effects through the pure [`engine`],
//! persists the result, and reports the next scene. Front ends present
//! scenes through the [`Renderer`] seam.

/// The pure effect engine.
pub mod engine;
/// Error types for action resolution.
pub mod error;
/// Transitions, notices and resolutions.
pub mod outcome;
/// The renderer seam.
pub mod render;
/// Requirement gating.
pub mod requirement;
/// The action resolver.
pub mod resolver;

pub use engine::apply;
pub use error::{ResolveError, ResolveResult};
pub use outcome::{Notice, Resolution, Transition};
pub use render::Renderer;
pub use resolver::ActionResolver;
