pub mod act;
pub mod check;
pub mod play;
pub mod show;
pub mod start;
pub mod train;

use std::path::PathBuf;
use std::sync::Arc;

use colored::Colorize;
use dojo_core::{PlayerId, Scene, SystemClock, WorldCatalog, skill_display_name};
use dojo_fiction::{ActionResolver, Notice, Renderer, ResolveError, Resolution};
use dojo_store::PlayerStore;
use dojo_training::TrainingConfig;

use crate::render::TextRenderer;

/// Scene a new session starts in when none is given.
pub const DEFAULT_SCENE: &str = "town_square";

/// Paths and settings shared by every command.
pub struct Context {
    pub world: PathBuf,
    pub players: PathBuf,
    pub training: TrainingConfig,
}

impl Context {
    fn catalog(&self) -> Result<Arc<WorldCatalog>, String> {
        let catalog = WorldCatalog::load(&self.world).map_err(|e| e.to_string())?;
        tracing::debug!(world = %self.world.display(), scenes = catalog.len(), "world loaded");
        Ok(Arc::new(catalog))
    }

    fn store(&self) -> Result<Arc<PlayerStore>, String> {
        PlayerStore::open(&self.players)
            .map(Arc::new)
            .map_err(|e| e.to_string())
    }

    fn resolver(&self) -> Result<ActionResolver, String> {
        Ok(ActionResolver::new(
            self.catalog()?,
            self.store()?,
            Arc::new(SystemClock),
        ))
    }
}

fn parse_player(raw: &str) -> Result<PlayerId, String> {
    PlayerId::parse(raw).map_err(|e| e.to_string())
}

/// Turn a rejected action into what the player is told.
fn describe_rejection(e: ResolveError) -> String {
    match e {
        ResolveError::RequirementNotMet {
            stat, threshold, ..
        } => format!(
            "You need {threshold} {} to do this!",
            skill_display_name(&stat)
        ),
        ResolveError::InvalidAction {
            available: 0,
            scene,
            ..
        } => format!("scene '{scene}' has no actions"),
        ResolveError::InvalidAction {
            available, index, ..
        } => format!(
            "no action {} here (choose 1-{available})",
            index + 1
        ),
        other => other.to_string(),
    }
}

/// Print notices and the scene the player ends up on. Returns that scene.
fn present(resolution: Resolution, current: Scene) -> Scene {
    for notice in &resolution.notices {
        match notice {
            Notice::TrainingStarted { skill } => {
                println!("  You begin training {}...", skill_display_name(skill).bold());
            }
            Notice::SceneNotFound { requested } => {
                eprintln!(
                    "  {} scene '{requested}' does not exist",
                    "warning:".yellow().bold()
                );
            }
        }
    }
    let scene = match resolution.transition.scene() {
        Some(next) => next.clone(),
        None => current,
    };
    print!("{}", TextRenderer.render(&scene, &resolution.player));
    scene
}
