//! Event types and observers used by the game.
//!
//! This module groups the domain events exchanged across systems and the
//! corresponding observers that react to them.
//!
//! Submodules:
//! - [`audio`] – commands and messages for the background audio thread
//! - [`timer`] – timer expiry and the delayed actions it performs
//! - [`zone`] – door and note notifications
pub mod audio;
pub mod timer;
pub mod zone;
