//! Trigger zones.
//!
//! A [`TriggerZone`] is a passive rectangle with a bound [`ZoneAction`]. Door
//! zones are one-shot: the first reported overlap flips the `triggered` latch
//! and nothing can reset it for the lifetime of the scene. Note zones are
//! continuous: every overlapping frame raises the `near` flag, which the
//! scene clears again at the end of the frame.

use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

use crate::components::boxcollider::Rect;

/// Zone width/height used when the map object does not declare one.
pub const DEFAULT_ZONE_SIZE: f32 = 32.0;

/// What happens when the player walks into a zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ZoneAction {
    /// Play the door sound and hand off to `destination` after the door delay.
    Door { destination: String },
    /// Mark the player as adjacent to the note `note`.
    Note { note: String },
}

#[derive(Component, Debug, Clone, PartialEq)]
pub struct TriggerZone {
    /// Name of the map object the zone was built from.
    pub tag: String,
    pub rect: Rect,
    pub action: ZoneAction,
    triggered: bool,
    near: bool,
}

impl TriggerZone {
    pub fn new(tag: impl Into<String>, rect: Rect, action: ZoneAction) -> Self {
        Self {
            tag: tag.into(),
            rect,
            action,
            triggered: false,
            near: false,
        }
    }

    /// Flip the latch. Returns true only on the first call.
    pub fn latch(&mut self) -> bool {
        if self.triggered {
            return false;
        }
        self.triggered = true;
        true
    }

    pub fn is_triggered(&self) -> bool {
        self.triggered
    }

    pub fn is_one_shot(&self) -> bool {
        matches!(self.action, ZoneAction::Door { .. })
    }

    pub fn mark_near(&mut self) {
        self.near = true;
    }

    pub fn clear_near(&mut self) {
        self.near = false;
    }

    pub fn is_near(&self) -> bool {
        self.near
    }
}
