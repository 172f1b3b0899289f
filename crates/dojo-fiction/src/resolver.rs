//! The scene/action state machine.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use dojo_core::{Clock, EffectValue, PlayerId, PlayerState, Scene, WorldCatalog, fields};
use dojo_store::PlayerStore;

use crate::engine;
use crate::error::{ResolveError, ResolveResult};
use crate::outcome::{Notice, Resolution, Transition};
use crate::requirement;

/// Resolves a player's chosen action against the scene graph.
///
/// Each resolution is a single locked load-modify-save cycle on the
/// player's record: requirements are checked against the stored state, and
/// nothing is written unless they all pass.
pub struct ActionResolver {
    catalog: Arc<WorldCatalog>,
    store: Arc<PlayerStore>,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for ActionResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionResolver")
            .field("scenes", &self.catalog.len())
            .finish_non_exhaustive()
    }
}

impl ActionResolver {
    /// Create a resolver over a catalog and a store.
    pub fn new(catalog: Arc<WorldCatalog>, store: Arc<PlayerStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            catalog,
            store,
            clock,
        }
    }

    /// The scene catalog.
    pub fn catalog(&self) -> &WorldCatalog {
        &self.catalog
    }

    /// The scene to show for `scene_id` (or the missing sentinel) and the
    /// player's current state.
    pub fn enter(&self, player: &PlayerId, scene_id: &str) -> ResolveResult<(Scene, PlayerState)> {
        let scene = self.catalog.scene_or_missing(scene_id).into_owned();
        let state = self.store.get(player)?;
        Ok((scene, state))
    }

    /// Resolve action `action_index` (zero-based) on the scene `scene_id`.
    pub fn resolve_at(
        &self,
        player: &PlayerId,
        scene_id: &str,
        action_index: usize,
    ) -> ResolveResult<Resolution> {
        let scene = self.catalog.scene_or_missing(scene_id);
        self.resolve(player, &scene, action_index)
    }

    /// Resolve action `action_index` (zero-based) on `current`.
    pub fn resolve(
        &self,
        player: &PlayerId,
        current: &Scene,
        action_index: usize,
    ) -> ResolveResult<Resolution> {
        let action = current
            .action(action_index)
            .ok_or_else(|| ResolveError::InvalidAction {
                scene: current.id.clone(),
                index: action_index,
                available: current.actions.len(),
            })?;
        action
            .validate()
            .map_err(|reason| ResolveError::InvalidEffect {
                scene: current.id.clone(),
                index: action_index,
                reason,
            })?;

        let now = self.clock.now();
        let state = self.store.update(player, |state| {
            requirement::check(state, &action.requires)?;
            if !action.effects.is_empty() {
                *state = engine::apply(state, &action.effects);
                sync_training_start(state, &action.effects, now);
            }
            Ok::<_, ResolveError>(state.clone())
        });

        let state = match state {
            Ok(state) => state,
            Err(e) => {
                tracing::debug!(
                    player = %player,
                    scene = %current.id,
                    action = %action.label,
                    error = %e,
                    "action rejected"
                );
                return Err(e);
            }
        };

        let mut notices = Vec::new();
        if action.effects.contains_key(fields::ACTIVE_TRAINING)
            && let Some(skill) = state.active_training()
        {
            tracing::info!(player = %player, skill, "training started");
            notices.push(Notice::TrainingStarted {
                skill: skill.to_string(),
            });
        }

        let transition = match &action.next_scene {
            None => Transition::Stay,
            Some(next) => match self.catalog.get(next) {
                Some(scene) => Transition::Enter(scene.clone()),
                None => {
                    tracing::warn!(
                        scene = %current.id,
                        action = %action.label,
                        next_scene = %next,
                        "next scene not found in catalog"
                    );
                    notices.push(Notice::SceneNotFound {
                        requested: next.clone(),
                    });
                    Transition::Missing(Scene::missing(next))
                }
            },
        };

        tracing::debug!(
            player = %player,
            scene = %current.id,
            action = %action.label,
            next = ?transition.scene().map(|s| s.id.as_str()),
            "action resolved"
        );

        Ok(Resolution {
            transition,
            player: state,
            notices,
        })
    }
}

/// Keep `training_start` set exactly while `active_training` is set.
fn sync_training_start(
    state: &mut PlayerState,
    effects: &BTreeMap<String, EffectValue>,
    now: DateTime<Utc>,
) {
    if !effects.contains_key(fields::ACTIVE_TRAINING) {
        return;
    }
    if state.active_training().is_some() {
        state.set_training_start(Some(now));
    } else {
        state.set_training_start(None);
    }
}
