//! Static per-room data.
//!
//! A [`SceneDescriptor`] is read once when a room is entered and never
//! modified afterwards. It is deserialized from a JSON file laid out like an
//! exported Tiled object layer:
//!
//! ```json
//! {
//!   "name": "apartment",
//!   "width": 640, "height": 480,
//!   "default_spawn": { "x": 400, "y": 400 },
//!   "music": { "id": "bgMusic", "looped": true },
//!   "objects": [ { "name": "player_spawn", "x": 120, "y": 300 } ],
//!   "collision_objects": [ { "x": 0, "y": 0, "width": 640, "height": 16 } ],
//!   "triggers": [ { "tag": "door_to_bedroom", "action": { "kind": "door", "destination": "bedroom" } } ]
//! }
//! ```
//!
//! Optional content degrades silently: a trigger whose tag has no object is
//! skipped, a missing `player_spawn` falls back to `default_spawn`, and a
//! missing `collision_objects` list means nothing is solid.

use std::path::Path;

use bevy_ecs::prelude::Resource;
use glam::Vec2;
use log::{debug, warn};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::components::boxcollider::Rect;
use crate::components::triggerzone::{DEFAULT_ZONE_SIZE, TriggerZone, ZoneAction};

/// Name of the object marking where the player appears.
pub const SPAWN_OBJECT: &str = "player_spawn";

#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize, Serialize)]
pub struct SpawnPoint {
    pub x: f32,
    pub y: f32,
}

impl From<SpawnPoint> for Vec2 {
    fn from(p: SpawnPoint) -> Self {
        Vec2::new(p.x, p.y)
    }
}

/// Background music a room asks for.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MusicCue {
    pub id: String,
    #[serde(default)]
    pub volume: Option<f32>,
    #[serde(default = "default_looped")]
    pub looped: bool,
}

fn default_looped() -> bool {
    true
}

/// A named point or rectangle from the room's object layer.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MapObject {
    pub name: String,
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub width: Option<f32>,
    #[serde(default)]
    pub height: Option<f32>,
}

impl MapObject {
    /// Object rectangle, anchored at its top-left corner, with the default
    /// zone size for missing or zero dimensions.
    pub fn zone_rect(&self) -> Rect {
        let size = |v: Option<f32>| match v {
            Some(v) if v > 0.0 => v,
            _ => DEFAULT_ZONE_SIZE,
        };
        Rect::new(self.x, self.y, size(self.width), size(self.height))
    }
}

/// Binds an object tag to the action its zone performs.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TriggerBinding {
    pub tag: String,
    pub action: ZoneAction,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SceneDescriptor {
    pub name: String,
    pub width: f32,
    pub height: f32,
    #[serde(default)]
    pub default_spawn: SpawnPoint,
    #[serde(default)]
    pub music: Option<MusicCue>,
    #[serde(default)]
    pub objects: Vec<MapObject>,
    #[serde(default)]
    pub collision_objects: Option<Vec<Rect>>,
    #[serde(default)]
    pub triggers: Vec<TriggerBinding>,
}

impl SceneDescriptor {
    pub fn from_json_str(json: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let descriptor: SceneDescriptor = serde_json::from_str(json)?;
        Ok(descriptor)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, Box<dyn std::error::Error>> {
        let file_content = std::fs::read_to_string(path)?;
        Self::from_json_str(&file_content)
    }

    pub fn find_object(&self, name: &str) -> Option<&MapObject> {
        self.objects.iter().find(|o| o.name == name)
    }

    /// Where the player appears: the `player_spawn` object if present, else
    /// the room's default coordinate.
    pub fn spawn_point(&self) -> Vec2 {
        match self.find_object(SPAWN_OBJECT) {
            Some(obj) => Vec2::new(obj.x, obj.y),
            None => {
                debug!(
                    "Scene '{}' has no '{}' object, using default spawn ({}, {})",
                    self.name, SPAWN_OBJECT, self.default_spawn.x, self.default_spawn.y
                );
                self.default_spawn.into()
            }
        }
    }

    /// Build a fresh, un-latched zone for every binding whose tag exists.
    pub fn resolve_zones(&self) -> Vec<TriggerZone> {
        self.triggers
            .iter()
            .filter_map(|binding| match self.find_object(&binding.tag) {
                Some(obj) => Some(TriggerZone::new(
                    binding.tag.clone(),
                    obj.zone_rect(),
                    binding.action.clone(),
                )),
                None => {
                    debug!(
                        "Scene '{}' has no object '{}', trigger skipped",
                        self.name, binding.tag
                    );
                    None
                }
            })
            .collect()
    }

    pub fn geometry(&self) -> SceneGeometry {
        if self.collision_objects.is_none() {
            debug!("Scene '{}' has no collision layer", self.name);
        }
        SceneGeometry {
            bounds: Rect::new(0.0, 0.0, self.width, self.height),
            solids: self.collision_objects.clone().unwrap_or_default(),
        }
    }
}

/// Collision geometry of the current room, consumed by the physics pass.
#[derive(Resource, Debug, Clone, PartialEq, Default)]
pub struct SceneGeometry {
    pub bounds: Rect,
    pub solids: Vec<Rect>,
}

/// All known rooms keyed by name.
#[derive(Debug, Clone, Default)]
pub struct SceneLibrary {
    scenes: FxHashMap<String, SceneDescriptor>,
}

impl SceneLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every `*.json` file in `dir`. Files that fail to parse are
    /// logged and skipped; an unreadable directory is an error.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self, Box<dyn std::error::Error>> {
        let mut library = Self::new();
        for entry in std::fs::read_dir(dir.as_ref())? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            match SceneDescriptor::load_from_file(&path) {
                Ok(descriptor) => {
                    debug!("Loaded scene '{}' from {}", descriptor.name, path.display());
                    library.insert(descriptor);
                }
                Err(e) => warn!("Skipping scene file {}: {}", path.display(), e),
            }
        }
        Ok(library)
    }

    pub fn insert(&mut self, descriptor: SceneDescriptor) {
        self.scenes.insert(descriptor.name.clone(), descriptor);
    }

    pub fn get(&self, name: &str) -> Option<&SceneDescriptor> {
        self.scenes.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SceneDescriptor> {
        self.scenes.values()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.scenes.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const APARTMENT: &str = r#"{
        "name": "apartment",
        "width": 640,
        "height": 480,
        "default_spawn": { "x": 400, "y": 400 },
        "objects": [
            { "name": "player_spawn", "x": 120, "y": 300 },
            { "name": "door_to_bedroom", "x": 600, "y": 200, "width": 24 }
        ],
        "triggers": [
            { "tag": "door_to_bedroom", "action": { "kind": "door", "destination": "bedroom" } },
            { "tag": "table_note", "action": { "kind": "note", "note": "bedroom_letter_1" } }
        ]
    }"#;

    #[test]
    fn test_spawn_object_wins_over_default() {
        let scene = SceneDescriptor::from_json_str(APARTMENT).unwrap();
        assert_eq!(scene.spawn_point(), Vec2::new(120.0, 300.0));
    }

    #[test]
    fn test_missing_spawn_falls_back_to_default() {
        let mut scene = SceneDescriptor::from_json_str(APARTMENT).unwrap();
        scene.objects.retain(|o| o.name != SPAWN_OBJECT);
        assert_eq!(scene.spawn_point(), Vec2::new(400.0, 400.0));
    }

    #[test]
    fn test_trigger_without_object_is_absent() {
        let scene = SceneDescriptor::from_json_str(APARTMENT).unwrap();
        let zones = scene.resolve_zones();
        assert_eq!(zones.len(), 1);
        assert_eq!(zones[0].tag, "door_to_bedroom");
    }

    #[test]
    fn test_zone_size_defaults_to_32() {
        let scene = SceneDescriptor::from_json_str(APARTMENT).unwrap();
        let zone = &scene.resolve_zones()[0];
        assert_eq!(zone.rect, Rect::new(600.0, 200.0, 24.0, 32.0));
        assert!(!zone.is_triggered());
    }

    #[test]
    fn test_missing_collision_layer_means_no_solids() {
        let scene = SceneDescriptor::from_json_str(APARTMENT).unwrap();
        let geometry = scene.geometry();
        assert!(geometry.solids.is_empty());
        assert_eq!(geometry.bounds, Rect::new(0.0, 0.0, 640.0, 480.0));
    }

    #[test]
    fn test_library_lookup() {
        let mut library = SceneLibrary::new();
        library.insert(SceneDescriptor::from_json_str(APARTMENT).unwrap());
        assert!(library.contains("apartment"));
        assert!(library.get("bedroom").is_none());
        assert_eq!(library.len(), 1);
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(SceneDescriptor::from_json_str("{ \"name\": 3 }").is_err());
    }
}
