//! Kinematic body component.
//!
//! The [`RigidBody`] stores the velocity requested by gameplay (the movement
//! controller) and consumed by the physics pass. The `frozen` flag lets game
//! logic pin an entity in place, e.g. while a note overlay is open.

use bevy_ecs::prelude::Component;
use glam::Vec2;

/// Kinematic body storing the current velocity in world units per second.
///
/// # Example
/// ```ignore
/// let mut rb = RigidBody::new();
/// rb.set_velocity(Vec2::new(-160.0, 0.0));
///
/// // Stop and pin while a modal dialog is up
/// rb.freeze();
/// ```
#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct RigidBody {
    /// Current velocity in world units per second.
    pub velocity: Vec2,
    /// When true, the physics pass leaves the entity's position untouched.
    pub frozen: bool,
}

impl RigidBody {
    /// Create a RigidBody at rest.
    pub fn new() -> Self {
        Self {
            velocity: Vec2::ZERO,
            frozen: false,
        }
    }

    /// Set the velocity of the RigidBody.
    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    /// Get the current velocity.
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Zero the velocity on both axes.
    pub fn stop(&mut self) {
        self.velocity = Vec2::ZERO;
    }

    /// Stop and freeze the rigid body.
    pub fn freeze(&mut self) {
        self.velocity = Vec2::ZERO;
        self.frozen = true;
    }

    /// Unfreeze the rigid body, allowing the physics pass to move it again.
    pub fn unfreeze(&mut self) {
        self.frozen = false;
    }
}
