//! Game asset bundle.
//!
//! Everything a scene needs that comes from disk: room descriptors and note
//! texts. Loaded once at startup and shared (by clone) with every scene.
use log::{info, warn};

use crate::resources::gameconfig::GameConfig;
use crate::resources::notestore::NoteStore;
use crate::resources::scenedescriptor::{SceneDescriptor, SceneLibrary};

#[derive(Debug, Clone, Default)]
pub struct GameAssets {
    pub scenes: SceneLibrary,
    pub notes: NoteStore,
}

impl GameAssets {
    pub fn new(scenes: SceneLibrary, notes: NoteStore) -> Self {
        Self { scenes, notes }
    }

    /// Load rooms and notes from the directories named in `config`.
    ///
    /// A missing scene directory is an error. A missing notes directory only
    /// means every note reads as empty.
    pub fn load(config: &GameConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let scenes = SceneLibrary::load_dir(&config.scenes_dir).map_err(|e| {
            format!(
                "Failed to read scenes from {}: {}",
                config.scenes_dir.display(),
                e
            )
        })?;
        let notes = match NoteStore::load_dir(&config.notes_dir) {
            Ok(notes) => notes,
            Err(e) => {
                warn!(
                    "No notes loaded from {}: {}",
                    config.notes_dir.display(),
                    e
                );
                NoteStore::new()
            }
        };
        info!("Loaded {} scene(s), {} note(s)", scenes.len(), notes.len());
        Ok(Self { scenes, notes })
    }

    /// Distinct music ids requested by any scene.
    pub fn music_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .scenes
            .iter()
            .filter_map(|s: &SceneDescriptor| s.music.as_ref().map(|m| m.id.clone()))
            .collect();
        ids.sort();
        ids.dedup();
        ids
    }
}
