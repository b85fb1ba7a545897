use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

/// Playback state of the animation currently shown by an entity.
///
/// `animation_key` indexes the [`AnimationStore`](crate::resources::animationstore::AnimationStore).
#[derive(Debug, Clone, Component, Serialize, Deserialize, PartialEq)]
pub struct Animation {
    pub animation_key: String,
    pub frame_index: usize,
    pub elapsed_time: f32,
}

impl Animation {
    pub fn new(animation_key: impl Into<String>) -> Self {
        Self {
            animation_key: animation_key.into(),
            frame_index: 0,
            elapsed_time: 0.0,
        }
    }

    /// Switch to `key`, restarting playback.
    ///
    /// Returns false and leaves playback untouched when `key` is already
    /// playing.
    pub fn play(&mut self, key: &str) -> bool {
        if self.animation_key == key {
            return false;
        }
        self.animation_key.clear();
        self.animation_key.push_str(key);
        self.frame_index = 0;
        self.elapsed_time = 0.0;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_play_switches_and_restarts() {
        let mut anim = Animation::new("idle-down");
        anim.frame_index = 3;
        anim.elapsed_time = 0.05;
        assert!(anim.play("moving-left"));
        assert_eq!(anim.animation_key, "moving-left");
        assert_eq!(anim.frame_index, 0);
        assert_eq!(anim.elapsed_time, 0.0);
    }

    #[test]
    fn test_play_same_key_is_idempotent() {
        let mut anim = Animation::new("moving-left");
        anim.frame_index = 4;
        assert!(!anim.play("moving-left"));
        assert_eq!(anim.frame_index, 4);
    }
}
