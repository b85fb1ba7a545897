//! ECS resources made available to systems.
//!
//! This module groups the data injected into each scene world and accessed
//! by systems during execution: input state, timing, configuration, scene
//! data and asset stores. Each submodule documents the semantics and intended
//! usage of its resource(s).
//!
//! Overview
//! - `animationstore` – sprite-sheet animations of the player character
//! - `audio` – bridge to the background audio thread and current music
//! - `gameconfig` – INI-backed tuning values
//! - `input` – keyboard, touch and merged per-frame input
//! - `interaction` – note open requests and their action edge
//! - `notestore` – readable note texts keyed by id
//! - `overlaps` – zones overlapped by the player this frame
//! - `scenedescriptor` – static room data, geometry and the scene library
//! - `scenestate` – scene lifecycle and pending hand-off
//! - `worldtime` – simulation time and delta
pub mod animationstore;
pub mod audio;
pub mod gameconfig;
pub mod input;
pub mod interaction;
pub mod notestore;
pub mod overlaps;
pub mod scenedescriptor;
pub mod scenestate;
pub mod worldtime;
