//! Game systems.
//!
//! This module groups all ECS systems that advance a scene world.
//!
//! Submodules overview
//! - [`animation`] – advance sprite animations
//! - [`audio`] – audio thread backends and scene music
//! - [`collision`] – player footprint against trigger zones (reference physics)
//! - [`input`] – merge keyboard and touch into [`crate::resources::input::InputSnapshot`]
//! - [`interaction`] – request a note overlay on action near a note
//! - [`movement`] – integrate velocities against room geometry (reference physics)
//! - [`movementcontroller`] – translate input into player velocity and animation
//! - [`time`] – update simulation time and delta, process timers
//! - [`triggerzone`] – latch door zones and flag note proximity

pub mod animation;
pub mod audio;
pub mod collision;
pub mod input;
pub mod interaction;
pub mod movement;
pub mod movementcontroller;
pub mod time;
pub mod triggerzone;
