//! Game configuration resource.
//!
//! Manages game settings loaded from an INI configuration file. Provides
//! defaults for safe startup and methods to load/save configuration.
//!
//! # Configuration File Format
//!
//! ```ini
//! [player]
//! speed = 160
//! carry_facing = true
//!
//! [timing]
//! door_delay_ms = 200
//! overlay_grace_ms = 100
//!
//! [audio]
//! door_sound = doorSound
//! door_volume = 0.6
//! button_sound = buttonPress
//! button_volume = 0.5
//! music_volume = 0.3
//!
//! [scenes]
//! start = apartment
//! dir = assets/scenes
//! notes_dir = assets/notes
//! sounds_dir = assets/sounds
//!
//! [window]
//! width = 640
//! height = 480
//! target_fps = 60
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

use crate::components::player::DEFAULT_SPEED;

/// Default safe values for startup
const DEFAULT_CARRY_FACING: bool = true;
const DEFAULT_DOOR_DELAY_MS: u64 = 200;
const DEFAULT_OVERLAY_GRACE_MS: u64 = 100;
const DEFAULT_DOOR_SOUND: &str = "doorSound";
const DEFAULT_DOOR_VOLUME: f32 = 0.6;
const DEFAULT_BUTTON_SOUND: &str = "buttonPress";
const DEFAULT_BUTTON_VOLUME: f32 = 0.5;
const DEFAULT_MUSIC_VOLUME: f32 = 0.3;
const DEFAULT_START_SCENE: &str = "apartment";
const DEFAULT_SCENES_DIR: &str = "assets/scenes";
const DEFAULT_NOTES_DIR: &str = "assets/notes";
const DEFAULT_SOUNDS_DIR: &str = "assets/sounds";
const DEFAULT_VIEW_WIDTH: u32 = 640;
const DEFAULT_VIEW_HEIGHT: u32 = 480;
const DEFAULT_TARGET_FPS: u32 = 60;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Game configuration resource.
///
/// A clone is inserted into every scene world so systems can read tuning
/// values without reaching back to the driver.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Walking speed in world units per second.
    pub speed: f32,
    /// Keep the player's facing when walking through a door.
    pub carry_facing: bool,
    /// Delay between a door trigger and the scene hand-off.
    pub door_delay_ms: u64,
    /// Time after opening a note during which close input is ignored.
    pub overlay_grace_ms: u64,
    pub door_sound: String,
    pub door_volume: f32,
    pub button_sound: String,
    pub button_volume: f32,
    pub music_volume: f32,
    /// Scene entered at startup.
    pub start_scene: String,
    pub scenes_dir: PathBuf,
    pub notes_dir: PathBuf,
    pub sounds_dir: PathBuf,
    /// View (window) width in pixels.
    pub view_width: u32,
    /// View (window) height in pixels.
    pub view_height: u32,
    /// Target frames per second.
    pub target_fps: u32,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            speed: DEFAULT_SPEED,
            carry_facing: DEFAULT_CARRY_FACING,
            door_delay_ms: DEFAULT_DOOR_DELAY_MS,
            overlay_grace_ms: DEFAULT_OVERLAY_GRACE_MS,
            door_sound: DEFAULT_DOOR_SOUND.to_string(),
            door_volume: DEFAULT_DOOR_VOLUME,
            button_sound: DEFAULT_BUTTON_SOUND.to_string(),
            button_volume: DEFAULT_BUTTON_VOLUME,
            music_volume: DEFAULT_MUSIC_VOLUME,
            start_scene: DEFAULT_START_SCENE.to_string(),
            scenes_dir: PathBuf::from(DEFAULT_SCENES_DIR),
            notes_dir: PathBuf::from(DEFAULT_NOTES_DIR),
            sounds_dir: PathBuf::from(DEFAULT_SOUNDS_DIR),
            view_width: DEFAULT_VIEW_WIDTH,
            view_height: DEFAULT_VIEW_HEIGHT,
            target_fps: DEFAULT_TARGET_FPS,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let text = std::fs::read_to_string(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.load_from_str(&text)?;

        info!(
            "Loaded config: speed={}, door_delay={}ms, grace={}ms, start='{}', view={}x{}",
            self.speed,
            self.door_delay_ms,
            self.overlay_grace_ms,
            self.start_scene,
            self.view_width,
            self.view_height
        );

        Ok(())
    }

    /// Load configuration from INI text instead of a file.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply_ini(&config);
        Ok(())
    }

    fn apply_ini(&mut self, config: &Ini) {
        // [player] section
        if let Some(speed) = config.getfloat("player", "speed").ok().flatten() {
            self.speed = speed as f32;
        }
        if let Some(carry) = config.getbool("player", "carry_facing").ok().flatten() {
            self.carry_facing = carry;
        }

        // [timing] section
        if let Some(ms) = config.getuint("timing", "door_delay_ms").ok().flatten() {
            self.door_delay_ms = ms;
        }
        if let Some(ms) = config.getuint("timing", "overlay_grace_ms").ok().flatten() {
            self.overlay_grace_ms = ms;
        }

        // [audio] section
        if let Some(id) = config.get("audio", "door_sound") {
            self.door_sound = id;
        }
        if let Some(vol) = config.getfloat("audio", "door_volume").ok().flatten() {
            self.door_volume = vol as f32;
        }
        if let Some(id) = config.get("audio", "button_sound") {
            self.button_sound = id;
        }
        if let Some(vol) = config.getfloat("audio", "button_volume").ok().flatten() {
            self.button_volume = vol as f32;
        }
        if let Some(vol) = config.getfloat("audio", "music_volume").ok().flatten() {
            self.music_volume = vol as f32;
        }

        // [scenes] section
        if let Some(start) = config.get("scenes", "start") {
            self.start_scene = start;
        }
        if let Some(dir) = config.get("scenes", "dir") {
            self.scenes_dir = PathBuf::from(dir);
        }
        if let Some(dir) = config.get("scenes", "notes_dir") {
            self.notes_dir = PathBuf::from(dir);
        }
        if let Some(dir) = config.get("scenes", "sounds_dir") {
            self.sounds_dir = PathBuf::from(dir);
        }

        // [window] section
        if let Some(width) = config.getuint("window", "width").ok().flatten() {
            self.view_width = width as u32;
        }
        if let Some(height) = config.getuint("window", "height").ok().flatten() {
            self.view_height = height as u32;
        }
        if let Some(fps) = config.getuint("window", "target_fps").ok().flatten() {
            self.target_fps = fps as u32;
        }
    }

    /// Door delay in seconds.
    pub fn door_delay(&self) -> f32 {
        self.door_delay_ms as f32 / 1000.0
    }

    /// Overlay grace period in seconds.
    pub fn overlay_grace(&self) -> f32 {
        self.overlay_grace_ms as f32 / 1000.0
    }

    /// Get the view size.
    pub fn view_size(&self) -> (u32, u32) {
        (self.view_width, self.view_height)
    }
}
