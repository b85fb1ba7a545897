//! World-space position of an entity.
//!
//! For the player this is the sprite pivot (center of the 64×64 cell). The
//! value is owned by the physics pass: the engine writes it every frame and
//! gameplay systems only read it.
use bevy_ecs::prelude::Component;
use glam::Vec2;

#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct MapPosition {
    pub pos: Vec2,
}

impl MapPosition {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
        }
    }

    pub fn from_vec(pos: Vec2) -> Self {
        Self { pos }
    }
}
