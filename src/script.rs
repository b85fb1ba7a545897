//! Recorded input for the headless driver.
//!
//! A script is a JSON list of frames:
//!
//! ```json
//! [
//!   { "dt": 0.016, "keys": { "left": true }, "repeat": 30 },
//!   { "dt": 0.016, "keys": {}, "touch": { "a": true } }
//! ]
//! ```
//!
//! `keys` fields default to false, `touch` may be omitted entirely and
//! `repeat` defaults to 1.
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::resources::input::{KeySet, TouchControls};

fn default_dt() -> f32 {
    1.0 / 60.0
}

fn default_repeat() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ScriptFrame {
    #[serde(default = "default_dt")]
    pub dt: f32,
    #[serde(default)]
    pub keys: KeySet,
    #[serde(default)]
    pub touch: Option<TouchControls>,
    #[serde(default = "default_repeat")]
    pub repeat: u32,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(transparent)]
pub struct InputScript {
    pub frames: Vec<ScriptFrame>,
}

impl InputScript {
    pub fn from_json_str(json: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let script: InputScript = serde_json::from_str(json)?;
        Ok(script)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, Box<dyn std::error::Error>> {
        let file_content = std::fs::read_to_string(path)?;
        Self::from_json_str(&file_content)
    }

    /// Frames with `repeat` expanded.
    pub fn expanded(&self) -> impl Iterator<Item = &ScriptFrame> {
        self.frames
            .iter()
            .flat_map(|f| std::iter::repeat_n(f, f.repeat as usize))
    }

    pub fn frame_count(&self) -> usize {
        self.frames.iter().map(|f| f.repeat as usize).sum()
    }
}
