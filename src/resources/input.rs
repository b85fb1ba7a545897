//! Per-frame input resources.
//!
//! Two physical sources feed the game:
//! - [`KeyboardState`] – direction keys plus one action key, written by the
//!   driver from whatever windowing layer is in use
//! - [`TouchControls`] – optional on-screen pad with the shape
//!   `{left, right, up, down, a}`; when the resource is absent it counts as
//!   all-false
//!
//! The aggregation system merges both into one [`InputSnapshot`] per frame.
//! Consumers that need "just pressed" semantics on their own schedule keep an
//! [`EdgeDetector`] each.
use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

/// Raw held state of the logical keys for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeySet {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub action: bool,
}

/// Resource capturing the keyboard keys relevant to gameplay.
#[derive(Resource, Debug, Clone, Default)]
pub struct KeyboardState {
    pub keys: KeySet,
}

impl KeyboardState {
    pub fn apply(&mut self, keys: KeySet) {
        self.keys = keys;
    }
}

/// External touch pad state. Missing fields deserialize as false.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TouchControls {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub a: bool,
}

/// Merged logical input for one frame.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub action_held: bool,
    /// Action went from released to held between the previous and this frame.
    pub action_just_pressed: bool,
}

impl InputSnapshot {
    /// OR-merge keyboard and touch. `previous` supplies the action state of
    /// the last merged frame for the edge.
    pub fn merge(
        keyboard: &KeyboardState,
        touch: Option<&TouchControls>,
        previous: &InputSnapshot,
    ) -> Self {
        let touch = touch.copied().unwrap_or_default();
        let keys = keyboard.keys;
        let action_held = keys.action || touch.a;
        Self {
            up: keys.up || touch.up,
            down: keys.down || touch.down,
            left: keys.left || touch.left,
            right: keys.right || touch.right,
            action_held,
            action_just_pressed: action_held && !previous.action_held,
        }
    }
}

/// Rising-edge detector over a sampled boolean.
///
/// Each consumer owns one, so the edge is relative to the last time *that
/// consumer* looked at the input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeDetector {
    last_held: bool,
}

impl EdgeDetector {
    pub fn primed(held: bool) -> Self {
        Self { last_held: held }
    }

    /// Returns true when `held` is true and the previous sample was false.
    pub fn sample(&mut self, held: bool) -> bool {
        let edge = held && !self.last_held;
        self.last_held = held;
        edge
    }
}
