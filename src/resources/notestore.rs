//! Text provider for readable notes.
//!
//! Notes are plain UTF-8 files; the file stem is the note id
//! (`assets/notes/bedroom_letter_1.txt` → `"bedroom_letter_1"`).

use std::path::Path;

use bevy_ecs::prelude::Resource;
use log::{debug, warn};
use rustc_hash::FxHashMap;

#[derive(Resource, Debug, Clone, Default)]
pub struct NoteStore {
    notes: FxHashMap<String, String>,
}

impl NoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every `*.txt` file in `dir`. Unreadable files are logged and
    /// skipped.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self, Box<dyn std::error::Error>> {
        let mut store = Self::new();
        for entry in std::fs::read_dir(dir.as_ref())? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("txt") {
                continue;
            }
            let Some(id) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            match std::fs::read_to_string(&path) {
                Ok(text) => {
                    debug!("Loaded note '{}' ({} bytes)", id, text.len());
                    store.insert(id, text);
                }
                Err(e) => warn!("Skipping note file {}: {}", path.display(), e),
            }
        }
        Ok(store)
    }

    pub fn insert(&mut self, id: impl Into<String>, text: impl Into<String>) {
        self.notes.insert(id.into(), text.into());
    }

    /// Literal content of the note, if known.
    pub fn get(&self, id: &str) -> Option<&str> {
        self.notes.get(id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}
