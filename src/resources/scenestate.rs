//! Scene lifecycle resources.
//!
//! Every scene world carries a [`SceneState`] describing where that scene is
//! in its lifecycle and a [`NextScene`] holding a requested hand-off. Delayed
//! callbacks check [`SceneState`] before acting, so a hand-off scheduled by a
//! scene that is already leaving is ignored.

use bevy_ecs::prelude::Resource;

/// Discrete lifecycle states of one scene instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SceneStates {
    #[default]
    Loading,
    Active,
    Exiting,
    Exited,
}

/// Authoritative lifecycle state of the owning scene.
#[derive(Resource, Debug, Clone, PartialEq, Eq, Default)]
pub struct SceneState {
    current: SceneStates,
}

impl SceneState {
    pub fn new() -> Self {
        SceneState {
            current: SceneStates::Loading,
        }
    }

    pub fn get(&self) -> SceneStates {
        self.current
    }

    pub fn set(&mut self, state: SceneStates) {
        self.current = state;
    }

    pub fn is_active(&self) -> bool {
        self.current == SceneStates::Active
    }
}

/// Representation of a requested hand-off.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum NextScenes {
    #[default]
    Unchanged,
    Pending(String),
}

/// Intent to leave this scene for another one.
#[derive(Resource, Debug, Clone, PartialEq, Eq, Default)]
pub struct NextScene {
    next: NextScenes,
}

impl NextScene {
    pub fn new() -> Self {
        NextScene {
            next: NextScenes::Unchanged,
        }
    }

    pub fn get(&self) -> &NextScenes {
        &self.next
    }

    /// Request a hand-off to `destination`.
    pub fn set(&mut self, destination: impl Into<String>) {
        self.next = NextScenes::Pending(destination.into());
    }

    /// Clear the pending request, returning the destination if there was one.
    pub fn take(&mut self) -> Option<String> {
        match std::mem::take(&mut self.next) {
            NextScenes::Pending(destination) => Some(destination),
            NextScenes::Unchanged => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_state_starts_loading() {
        let state = SceneState::new();
        assert_eq!(state.get(), SceneStates::Loading);
        assert!(!state.is_active());
    }

    #[test]
    fn test_next_scene_take_clears() {
        let mut next = NextScene::new();
        assert_eq!(next.get(), &NextScenes::Unchanged);
        next.set("bedroom");
        assert_eq!(next.get(), &NextScenes::Pending("bedroom".into()));
        assert_eq!(next.take().as_deref(), Some("bedroom"));
        assert_eq!(next.get(), &NextScenes::Unchanged);
        assert_eq!(next.take(), None);
    }
}
