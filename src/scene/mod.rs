//! Scenes and the frame protocol.
//!
//! A scene is one room. [`controller::SceneController`] owns the room's ECS
//! world (player, trigger zones, open overlay) and runs one frame every time
//! the driver hands it a [`FrameTick`]. [`director::SceneDirector`] owns the
//! current scene, swaps it for another one on a door hand-off, and forwards
//! audio.
//!
//! Per frame:
//! 1. the engine's physics pass produces a [`FrameTick`] (position and zone
//!    overlaps computed for this frame)
//! 2. the scene merges input, latches newly entered door zones and flags note
//!    zones the player stands next to
//! 3. if an overlay is open, only its close check runs
//! 4. otherwise an action press next to a note opens an overlay, or the
//!    movement controller runs

pub mod controller;
pub mod director;
pub mod listener;
pub mod overlay;

use bevy_ecs::prelude::Entity;
use glam::Vec2;
use smallvec::SmallVec;

use crate::components::player::Direction;
use crate::resources::audio::ActiveMusic;
use crate::resources::input::{KeySet, TouchControls};

/// Everything the engine delivers for one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameTick {
    /// Frame delta in seconds.
    pub dt: f32,
    pub keys: KeySet,
    /// Touch pad state; `None` when there is no touch pad.
    pub touch: Option<TouchControls>,
    /// Player position after this frame's physics, if the engine moved it.
    pub player_position: Option<Vec2>,
    /// Trigger zones the player overlaps after this frame's physics.
    pub overlaps: SmallVec<[Entity; 4]>,
}

impl FrameTick {
    pub fn new(dt: f32, keys: KeySet) -> Self {
        Self {
            dt,
            keys,
            ..Default::default()
        }
    }

    pub fn with_touch(mut self, touch: TouchControls) -> Self {
        self.touch = Some(touch);
        self
    }

    pub fn with_position(mut self, position: Vec2) -> Self {
        self.player_position = Some(position);
        self
    }

    pub fn with_overlaps(mut self, zones: &[Entity]) -> Self {
        self.overlaps = SmallVec::from_slice(zones);
        self
    }
}

/// What the driver should do after a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneFlow {
    Continue,
    /// Leave for the named scene.
    Handoff(String),
}

/// State handed to a scene when it is entered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneEntry {
    /// Initial facing of the player; `None` means the default.
    pub facing: Option<Direction>,
    pub music: ActiveMusic,
}

/// State a scene hands back when it is left.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneExit {
    pub facing: Direction,
    pub music: ActiveMusic,
}

/// Lifecycle of a room as seen by the driver loop.
pub trait Scene {
    fn name(&self) -> &str;
    fn on_enter(&mut self, entry: SceneEntry);
    fn on_update(&mut self, tick: &FrameTick) -> SceneFlow;
    fn on_exit(&mut self) -> SceneExit;
}
