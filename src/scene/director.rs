//! Driver-side owner of the current scene.
//!
//! The director is what a game loop talks to. Each frame it runs the
//! reference physics pass and the scene update, forwards the scene's audio
//! commands to the audio thread, and performs door hand-offs by building the
//! destination scene and dropping the current one.
use log::{debug, info, warn};

use crate::events::audio::{AudioCmd, AudioMessage};
use crate::game::GameAssets;
use crate::resources::audio::AudioBridge;
use crate::resources::gameconfig::GameConfig;
use crate::resources::input::{KeySet, TouchControls};
use crate::scene::controller::SceneController;
use crate::scene::{FrameTick, Scene, SceneEntry, SceneFlow};

pub struct SceneDirector {
    assets: GameAssets,
    config: GameConfig,
    current: SceneController,
    audio: Option<AudioBridge>,
    handoffs: u32,
    frames: u64,
}

impl SceneDirector {
    /// Enter the configured start scene. Fails only if that scene is
    /// unknown.
    pub fn new(assets: GameAssets, config: GameConfig) -> Result<Self, String> {
        let start = config.start_scene.clone();
        let Some(descriptor) = assets.scenes.get(&start).cloned() else {
            return Err(format!("Unknown start scene '{}'", start));
        };
        let mut current = SceneController::new(descriptor, assets.notes.clone(), config.clone());
        current.on_enter(SceneEntry::default());
        Ok(Self {
            assets,
            config,
            current,
            audio: None,
            handoffs: 0,
            frames: 0,
        })
    }

    /// Attach an audio thread and queue loads for every sound the game uses.
    pub fn with_audio(mut self, bridge: AudioBridge) -> Self {
        let dir = &self.config.sounds_dir;
        for id in [&self.config.door_sound, &self.config.button_sound] {
            bridge.send(AudioCmd::LoadFx {
                id: id.clone(),
                path: dir.join(format!("{id}.mp3")).to_string_lossy().into_owned(),
            });
        }
        for id in self.assets.music_ids() {
            bridge.send(AudioCmd::LoadMusic {
                path: dir.join(format!("{id}.mp3")).to_string_lossy().into_owned(),
                id,
            });
        }
        self.audio = Some(bridge);
        // the start scene already asked for its music
        self.forward_audio();
        self
    }

    pub fn current(&self) -> &SceneController {
        &self.current
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn handoffs(&self) -> u32 {
        self.handoffs
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Run one frame with the reference physics pass.
    pub fn frame(&mut self, dt: f32, keys: KeySet, touch: Option<TouchControls>) -> SceneFlow {
        let tick = self.current.physics_step(dt, keys, touch);
        self.advance(&tick)
    }

    /// Run one frame from a tick produced by an external engine.
    pub fn advance(&mut self, tick: &FrameTick) -> SceneFlow {
        self.frames += 1;
        let flow = self.current.on_update(tick);
        self.forward_audio();
        if let SceneFlow::Handoff(destination) = &flow
            && !self.switch_to(destination)
        {
            self.current.cancel_handoff();
            return SceneFlow::Continue;
        }
        flow
    }

    /// Leave the current scene for `destination`. Returns false, leaving the
    /// current scene in place, if the destination is unknown.
    pub fn switch_to(&mut self, destination: &str) -> bool {
        let Some(descriptor) = self.assets.scenes.get(destination).cloned() else {
            warn!(
                "Scene '{}' wants to hand off to unknown scene '{}'",
                self.current.name(),
                destination
            );
            return false;
        };
        let exit = self.current.on_exit();
        self.forward_audio();

        let entry = SceneEntry {
            facing: self.config.carry_facing.then_some(exit.facing),
            music: exit.music,
        };
        let mut next = SceneController::new(descriptor, self.assets.notes.clone(), self.config.clone());
        next.on_enter(entry);
        let previous = std::mem::replace(&mut self.current, next);
        info!("Hand-off '{}' -> '{}'", previous.name(), self.current.name());
        drop(previous);

        self.handoffs += 1;
        self.forward_audio();
        true
    }

    fn forward_audio(&mut self) {
        let cmds = self.current.drain_audio();
        let Some(bridge) = &self.audio else {
            return;
        };
        for cmd in cmds {
            bridge.send(cmd);
        }
        for msg in bridge.poll() {
            match msg {
                AudioMessage::FxLoadFailed { id, error }
                | AudioMessage::MusicLoadFailed { id, error } => {
                    warn!("Audio '{}' failed to load: {}", id, error)
                }
                other => debug!("audio: {:?}", other),
            }
        }
    }

    /// Stop the audio thread.
    pub fn shutdown(&mut self) {
        self.forward_audio();
        if let Some(mut bridge) = self.audio.take() {
            bridge.shutdown();
        }
    }
}

impl Drop for SceneDirector {
    fn drop(&mut self) {
        self.shutdown();
    }
}
