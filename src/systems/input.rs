//! Input aggregation system.
//!
//! - [`aggregate_input`] merges [`KeyboardState`] and the optional
//!   [`TouchControls`] resource into the frame's [`InputSnapshot`].
//!
//! The raw keyboard state is written by the driver before the frame runs
//! (see [`crate::scene::FrameTick`]), so this system never touches a device.
use bevy_ecs::prelude::*;

use crate::resources::input::{InputSnapshot, KeyboardState, TouchControls};

/// OR-merge keyboard and touch into [`InputSnapshot`]. A missing touch
/// resource counts as all-false.
pub fn aggregate_input(
    keyboard: Res<KeyboardState>,
    touch: Option<Res<TouchControls>>,
    mut snapshot: ResMut<InputSnapshot>,
) {
    let previous = *snapshot;
    *snapshot = InputSnapshot::merge(&keyboard, touch.as_deref(), &previous);
}
