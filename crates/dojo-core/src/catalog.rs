use std::borrow::Cow;
use std::collections::HashMap;
use std::path::Path;

use strsim::jaro_winkler;

use crate::error::{CatalogError, CatalogResult};
use crate::scene::Scene;

/// Minimum similarity for a scene ID suggestion (0.0-1.0).
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// An action whose `next_scene` names a scene the catalog does not contain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingReference {
    /// Scene holding the action.
    pub scene: String,
    /// Zero-based index of the action.
    pub action: usize,
    /// The unknown target ID.
    pub target: String,
}

/// Read-only lookup of scenes by ID.
#[derive(Debug, Clone, Default)]
pub struct WorldCatalog {
    scenes: HashMap<String, Scene>,
}

impl WorldCatalog {
    /// Build a catalog from already constructed scenes.
    pub fn new(scenes: impl IntoIterator<Item = Scene>) -> Self {
        Self {
            scenes: scenes.into_iter().map(|s| (s.id.clone(), s)).collect(),
        }
    }

    /// Parse a JSON document mapping scene IDs to scene records.
    pub fn from_json_str(json: &str) -> CatalogResult<Self> {
        let raw: HashMap<String, Scene> = serde_json::from_str(json)?;
        if raw.keys().any(|id| id.is_empty()) {
            return Err(CatalogError::Invalid("scene id must not be empty".into()));
        }
        for (id, scene) in &raw {
            for (index, action) in scene.actions.iter().enumerate() {
                action.validate().map_err(|reason| {
                    CatalogError::Invalid(format!("scene '{id}', action {}: {reason}", index + 1))
                })?;
            }
        }
        let scenes = raw
            .into_iter()
            .map(|(id, mut scene)| {
                scene.id = id.clone();
                (id, scene)
            })
            .collect();
        Ok(Self { scenes })
    }

    /// Load the catalog from a JSON file.
    pub fn load(path: &Path) -> CatalogResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Look up a scene by ID.
    pub fn get(&self, id: &str) -> Option<&Scene> {
        self.scenes.get(id)
    }

    /// Look up a scene, substituting the "Scene Missing" sentinel for unknown IDs.
    pub fn scene_or_missing(&self, id: &str) -> Cow<'_, Scene> {
        match self.scenes.get(id) {
            Some(scene) => Cow::Borrowed(scene),
            None => Cow::Owned(Scene::missing(id)),
        }
    }

    /// Whether a scene with this ID exists.
    pub fn contains(&self, id: &str) -> bool {
        self.scenes.contains_key(id)
    }

    /// Number of scenes.
    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    /// Whether the catalog has no scenes.
    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    /// All scene IDs, sorted.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.scenes.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Every action pointing at a scene that does not exist, in ID order.
    pub fn dangling_references(&self) -> Vec<DanglingReference> {
        let mut dangling = Vec::new();
        for id in self.ids() {
            let Some(scene) = self.scenes.get(id) else {
                continue;
            };
            for (index, action) in scene.actions.iter().enumerate() {
                if let Some(target) = &action.next_scene
                    && !self.contains(target)
                {
                    dangling.push(DanglingReference {
                        scene: id.to_string(),
                        action: index,
                        target: target.clone(),
                    });
                }
            }
        }
        dangling
    }

    /// The existing scene ID closest to `input`, if any is similar enough.
    pub fn suggest(&self, input: &str) -> Option<&str> {
        let input_lower = input.to_lowercase();
        self.scenes
            .keys()
            .map(|id| (id.as_str(), jaro_winkler(&input_lower, &id.to_lowercase())))
            .filter(|(_, score)| *score >= SUGGESTION_THRESHOLD)
            .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(id, _)| id)
    }
}
