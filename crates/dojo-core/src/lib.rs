//! Core types for Dojo, a scene-graph interactive fiction engine.
//!
//! Defines the read-only scene graph ([`Scene`], [`Action`], [`WorldCatalog`]),
//! the effect values world data can carry ([`EffectValue`]), and the durable
//! per-player record ([`PlayerState`]). Nothing here performs player I/O; see
//! `dojo-store` for persistence.

/// The scene catalog loaded from world data.
pub mod catalog;
/// Time sources.
pub mod clock;
/// Effect values attached to actions.
pub mod effect;
/// Error types for world data and player identity.
pub mod error;
/// Player identity and state.
pub mod player;
/// Scenes and actions.
pub mod scene;
/// Field and number values.
pub mod value;

pub use catalog::{DanglingReference, WorldCatalog};
pub use clock::{Clock, ManualClock, SystemClock};
pub use effect::EffectValue;
pub use error::{CatalogError, CatalogResult, InvalidPlayerId};
pub use player::{PlayerId, PlayerState, TRAINABLE_SKILLS, fields, skill_display_name};
pub use scene::{Action, ActionKind, Scene};
pub use value::{FieldValue, Number};
