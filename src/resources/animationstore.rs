//! Animation resource registry.
//!
//! This module provides a minimal store for animation definitions that can be
//! reused by multiple entities. Systems look up an animation by a string key
//! and drive playback based on the immutable parameters stored here.
//!
//! The character uses a sprite sheet with 13 frames per row. Rows 8 to 11
//! hold the walk cycles facing up, left, down and right; the first frame of
//! each of those rows doubles as the idle pose.

use bevy_ecs::prelude::Resource;
use rustc_hash::FxHashMap;

use crate::components::player::{Direction, MotionState};

pub const FRAMES_PER_ROW: usize = 13;
pub const WALK_FRAMES: usize = 9;
pub const WALK_FPS: f32 = 10.0;

/// Central registry of reusable animation definitions keyed by string IDs.
#[derive(Resource, Debug, Clone, Default)]
pub struct AnimationStore {
    pub animations: FxHashMap<String, AnimationResource>,
}

/// Immutable data describing one run of frames on a sprite-sheet row.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationResource {
    /// Sheet row the frames are taken from.
    pub row: usize,
    /// Column of the first frame within the row.
    pub first_frame: usize,
    /// Number of frames in the animation.
    pub frame_count: usize,
    /// Frames per second playback speed.
    pub fps: f32,
    /// Whether the animation restarts after the last frame.
    pub looped: bool,
}

impl AnimationResource {
    /// Index of `frame` within the whole sheet, counting row by row.
    pub fn sheet_frame(&self, frame: usize) -> usize {
        self.row * FRAMES_PER_ROW + self.first_frame + frame.min(self.frame_count.saturating_sub(1))
    }
}

/// Sheet row holding the walk cycle for `direction`.
pub fn walk_row(direction: Direction) -> usize {
    match direction {
        Direction::Up => 8,
        Direction::Left => 9,
        Direction::Down => 10,
        Direction::Right => 11,
    }
}

impl AnimationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, animation: AnimationResource) {
        self.animations.insert(key.into(), animation);
    }

    pub fn get(&self, key: &str) -> Option<&AnimationResource> {
        self.animations.get(key)
    }

    /// Store with the eight `moving-*` / `idle-*` animations of the player
    /// character.
    pub fn character_sheet() -> Self {
        let mut store = Self::new();
        for direction in Direction::PRIORITY {
            let row = walk_row(direction);
            store.insert(
                MotionState::Moving(direction).animation_key(),
                AnimationResource {
                    row,
                    first_frame: 0,
                    frame_count: WALK_FRAMES,
                    fps: WALK_FPS,
                    looped: true,
                },
            );
            store.insert(
                MotionState::Idle(direction).animation_key(),
                AnimationResource {
                    row,
                    first_frame: 0,
                    frame_count: 1,
                    fps: 1.0,
                    looped: false,
                },
            );
        }
        store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_character_sheet_has_all_keys() {
        let store = AnimationStore::character_sheet();
        assert_eq!(store.animations.len(), 8);
        for key in [
            "idle-up",
            "idle-down",
            "idle-left",
            "idle-right",
            "moving-up",
            "moving-down",
            "moving-left",
            "moving-right",
        ] {
            assert!(store.get(key).is_some(), "missing {key}");
        }
    }

    #[test]
    fn test_walk_rows() {
        let store = AnimationStore::character_sheet();
        assert_eq!(store.get("moving-up").unwrap().row, 8);
        assert_eq!(store.get("moving-left").unwrap().row, 9);
        assert_eq!(store.get("moving-down").unwrap().row, 10);
        assert_eq!(store.get("moving-right").unwrap().row, 11);
    }

    #[test]
    fn test_idle_is_frame_zero_of_walk_row() {
        let store = AnimationStore::character_sheet();
        let idle = store.get("idle-left").unwrap();
        assert_eq!(idle.sheet_frame(0), 9 * FRAMES_PER_ROW);
        assert_eq!(idle.sheet_frame(5), 9 * FRAMES_PER_ROW);
    }

    #[test]
    fn test_walk_frames_advance_along_row() {
        let walk = AnimationStore::character_sheet().get("moving-down").unwrap().clone();
        assert_eq!(walk.frame_count, 9);
        assert_eq!(walk.sheet_frame(3), 10 * FRAMES_PER_ROW + 3);
    }
}
