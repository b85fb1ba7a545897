//! ECS components for entities.
//!
//! This module groups all component types that can be attached to entities in
//! a scene world.
//!
//! Submodules overview:
//! - [`animation`] – playback state of the animation shown by an entity
//! - [`boxcollider`] – axis-aligned collider and the shared [`boxcollider::Rect`] type
//! - [`mapposition`] – world-space position (pivot) for an entity
//! - [`overlay`] – note overlay state and its drawable elements
//! - [`player`] – player marker, facing and per-player movement context
//! - [`rigidbody`] – simple kinematic body storing velocity
//! - [`timer`] – single-shot countdown owned by an entity
//! - [`triggerzone`] – one-shot door zones and continuous note zones

pub mod animation;
pub mod boxcollider;
pub mod mapposition;
pub mod overlay;
pub mod player;
pub mod rigidbody;
pub mod timer;
pub mod triggerzone;
