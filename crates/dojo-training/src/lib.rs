//! Background training for Dojo.
//!
//! A player who starts a training spends mana on every tick to grow the
//! trained skill, until the mana runs out (the training stalls) or the
//! maximum duration passes (the player goes back to idle). [`tick::advance`]
//! is the per-player step; [`TrainingScheduler`] applies it to every stored
//! player on a fixed interval.

/// Scheduler configuration.
pub mod config;
/// Error types.
pub mod error;
/// The periodic loop.
pub mod scheduler;
/// The per-player step.
pub mod tick;

pub use config::TrainingConfig;
pub use error::{TrainingError, TrainingResult};
pub use scheduler::{TickReport, TrainingScheduler};
pub use tick::{TickOutcome, advance};
