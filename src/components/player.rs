//! Player-controlled character components.
//!
//! - [`Player`] – marker for the single controllable entity of a scene
//! - [`Direction`] – the four facings of the character
//! - [`MotionState`] – the eight idle/moving states resolved each frame
//! - [`PlayerMotion`] – per-player movement context (facing, speed, state)
//!
//! The movement context lives on the player entity instead of in globals, so
//! the scene director decides explicitly what survives a room change.

use bevy_ecs::prelude::Component;
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::components::boxcollider::BoxCollider;

/// Default walking speed in world units per second.
pub const DEFAULT_SPEED: f32 = 160.0;
/// Size of one character cell in the sprite sheet.
pub const SPRITE_CELL: f32 = 64.0;
/// Collision footprint size (feet area of the sprite).
pub const FOOTPRINT_SIZE: Vec2 = Vec2::new(20.0, 20.0);
/// Footprint offset from the top-left corner of the sprite cell.
pub const FOOTPRINT_CELL_OFFSET: Vec2 = Vec2::new(22.0, 44.0);

/// Marker for the player character.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Player;

/// Facing of the character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

impl Direction {
    /// Resolution order when several directions are held at once.
    pub const PRIORITY: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// Unit vector in screen space (y grows downwards).
    pub fn unit(self) -> Vec2 {
        match self {
            Direction::Up => Vec2::new(0.0, -1.0),
            Direction::Down => Vec2::new(0.0, 1.0),
            Direction::Left => Vec2::new(-1.0, 0.0),
            Direction::Right => Vec2::new(1.0, 0.0),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

/// The eight animation-bearing states of the character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MotionState {
    Idle(Direction),
    Moving(Direction),
}

impl Default for MotionState {
    fn default() -> Self {
        MotionState::Idle(Direction::default())
    }
}

impl MotionState {
    pub fn direction(self) -> Direction {
        match self {
            MotionState::Idle(d) | MotionState::Moving(d) => d,
        }
    }

    /// Animation key registered in the animation store for this state.
    pub fn animation_key(self) -> &'static str {
        match self {
            MotionState::Idle(Direction::Up) => "idle-up",
            MotionState::Idle(Direction::Down) => "idle-down",
            MotionState::Idle(Direction::Left) => "idle-left",
            MotionState::Idle(Direction::Right) => "idle-right",
            MotionState::Moving(Direction::Up) => "moving-up",
            MotionState::Moving(Direction::Down) => "moving-down",
            MotionState::Moving(Direction::Left) => "moving-left",
            MotionState::Moving(Direction::Right) => "moving-right",
        }
    }
}

/// Movement context owned by the player entity.
///
/// `facing` always holds the last direction that was actively moved in and is
/// only written by the movement controller.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct PlayerMotion {
    pub facing: Direction,
    pub speed: f32,
    pub state: MotionState,
}

impl Default for PlayerMotion {
    fn default() -> Self {
        Self::new(DEFAULT_SPEED)
    }
}

impl PlayerMotion {
    pub fn new(speed: f32) -> Self {
        Self {
            facing: Direction::default(),
            speed,
            state: MotionState::default(),
        }
    }

    /// Start facing `facing`, idle.
    pub fn facing(mut self, facing: Direction) -> Self {
        self.facing = facing;
        self.state = MotionState::Idle(facing);
        self
    }
}

/// Collider for the character's feet, relative to the sprite pivot.
pub fn footprint() -> BoxCollider {
    BoxCollider::new(FOOTPRINT_SIZE.x, FOOTPRINT_SIZE.y)
        .with_offset(FOOTPRINT_CELL_OFFSET - Vec2::splat(SPRITE_CELL * 0.5))
}
