//! One player's training step.

use chrono::{DateTime, Utc};
use dojo_core::{Number, PlayerState, fields};

use crate::config::TrainingConfig;

/// What a single tick did to one player.
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// Not training.
    Idle,
    /// Training had no start time; it was set to now and nothing was consumed.
    Repaired {
        /// Skill being trained.
        skill: String,
    },
    /// The maximum duration elapsed and the player went back to idle.
    Finished {
        /// Skill that was being trained.
        skill: String,
    },
    /// Mana was consumed and the skill grew.
    Trained {
        /// Skill being trained.
        skill: String,
        /// The skill's new value.
        level: Number,
        /// Mana left afterwards.
        mana: Number,
    },
    /// Not enough mana this tick; still training.
    Stalled {
        /// Skill being trained.
        skill: String,
    },
}

/// Advance `state` by one tick at `now`.
pub fn advance(state: &mut PlayerState, now: DateTime<Utc>, config: &TrainingConfig) -> TickOutcome {
    let Some(skill) = state.active_training().map(str::to_string) else {
        return TickOutcome::Idle;
    };

    let Some(start) = state.training_start() else {
        state.set_training_start(Some(now));
        return TickOutcome::Repaired { skill };
    };

    if now - start >= config.max_duration {
        state.stop_training();
        return TickOutcome::Finished { skill };
    }

    let mana = state.mana();
    if mana.as_f64() < config.cost as f64 {
        return TickOutcome::Stalled { skill };
    }

    let mana = mana - Number::Integer(config.cost);
    let level = state.number(&skill) + Number::Integer(1);
    state.set(fields::MANA, mana);
    state.set(skill.as_str(), level);
    TickOutcome::Trained { skill, level, mana }
}
