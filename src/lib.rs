//! roomwalk library.
//!
//! A small top-down exploration game core: a player walks between rooms
//! through doors and reads notes in a modal overlay. This module exposes the
//! ECS components, resources, systems, events and scene driver for the
//! binary and for integration tests.

pub mod components;
#[cfg(feature = "desktop")]
pub mod desktop;
pub mod events;
pub mod game;
pub mod resources;
pub mod scene;
pub mod script;
pub mod systems;
