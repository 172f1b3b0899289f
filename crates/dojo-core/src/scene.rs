use std::collections::BTreeMap;

use serde::Deserialize;

use crate::effect::EffectValue;
use crate::player::fields;
use crate::value::FieldValue;

/// What an action represents to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(from = "String")]
pub enum ActionKind {
    /// Move through the scene graph (the default).
    #[default]
    Navigate,
    /// Perform something in place, such as starting a training.
    Activity,
}

impl From<String> for ActionKind {
    fn from(s: String) -> Self {
        if s.eq_ignore_ascii_case("activity") {
            Self::Activity
        } else {
            Self::Navigate
        }
    }
}

/// A choice attached to a scene, with gating requirements and state effects.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Action {
    /// Text shown on the action's button.
    pub label: String,
    /// Navigation or activity.
    #[serde(rename = "type", default)]
    pub kind: ActionKind,
    /// Minimum stat values needed to take the action (inclusive).
    #[serde(default)]
    pub requires: BTreeMap<String, f64>,
    /// Effects applied to the player when the action is taken.
    #[serde(default)]
    pub effects: BTreeMap<String, EffectValue>,
    /// Scene entered after the action, if any.
    #[serde(default)]
    pub next_scene: Option<String>,
}

impl Action {
    /// Create an unconditional navigation action with no effects.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            kind: ActionKind::Navigate,
            requires: BTreeMap::new(),
            effects: BTreeMap::new(),
            next_scene: None,
        }
    }

    /// Set the action kind.
    pub fn with_kind(mut self, kind: ActionKind) -> Self {
        self.kind = kind;
        self
    }

    /// Add a requirement.
    pub fn with_requirement(mut self, stat: impl Into<String>, threshold: f64) -> Self {
        self.requires.insert(stat.into(), threshold);
        self
    }

    /// Add an effect.
    pub fn with_effect(mut self, field: impl Into<String>, effect: EffectValue) -> Self {
        self.effects.insert(field.into(), effect);
        self
    }

    /// Set the scene entered after this action.
    pub fn with_next_scene(mut self, scene_id: impl Into<String>) -> Self {
        self.next_scene = Some(scene_id.into());
        self
    }

    /// Check the effects the engine gives a meaning of its own.
    ///
    /// `active_training` may only be set to a non-empty skill name or to
    /// null, so that a set start time always belongs to a trainable skill.
    pub fn validate(&self) -> Result<(), String> {
        match self.effects.get(fields::ACTIVE_TRAINING) {
            None | Some(EffectValue::Set(FieldValue::Null)) => Ok(()),
            Some(EffectValue::Set(FieldValue::Text(skill))) if !skill.is_empty() => Ok(()),
            Some(_) => Err(format!(
                "effect `{}` must be a skill name or null",
                fields::ACTIVE_TRAINING
            )),
        }
    }
}

fn untitled() -> String {
    "Untitled".to_string()
}

/// A node in the narrative graph.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Scene {
    /// Unique key in the catalog. Filled from the document key on load.
    #[serde(skip)]
    pub id: String,
    /// Scene heading.
    #[serde(default = "untitled")]
    pub title: String,
    /// Descriptive text.
    #[serde(default)]
    pub body: String,
    /// Optional image reference (path or URL), passed through to renderers.
    #[serde(default)]
    pub image: Option<String>,
    /// Selectable actions, in display order.
    #[serde(rename = "buttons", default)]
    pub actions: Vec<Action>,
}

impl Scene {
    /// Title of the sentinel returned for unknown scene IDs.
    pub const MISSING_TITLE: &'static str = "Scene Missing";

    /// Create an empty scene.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            body: String::new(),
            image: None,
            actions: Vec::new(),
        }
    }

    /// The sentinel scene shown in place of an unknown scene ID.
    ///
    /// It keeps the requested ID so renderers can report what was missing,
    /// and has no actions.
    pub fn missing(requested: &str) -> Self {
        Self {
            id: requested.to_string(),
            title: Self::MISSING_TITLE.to_string(),
            body: format!("⚠️ Could not load scene `{requested}`."),
            image: None,
            actions: Vec::new(),
        }
    }

    /// Set the body text.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Add an action.
    pub fn with_action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    /// Look up an action by its zero-based index.
    pub fn action(&self, index: usize) -> Option<&Action> {
        self.actions.get(index)
    }
}
