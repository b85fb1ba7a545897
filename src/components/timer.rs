// Single-shot countdown attached to the entity that owns the deferred work.
// Despawning the owner cancels the timer.
use bevy_ecs::prelude::Component;

/// Work to run when a [`Timer`] expires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerAction {
    /// Hand control to the named scene.
    SceneHandoff { destination: String },
    /// End the grace period of the note overlay that owns the timer.
    OverlayGrace,
}

#[derive(Component, Debug, Clone)]
pub struct Timer {
    pub duration: f32,
    pub elapsed: f32,
    pub action: TimerAction,
}

impl Timer {
    pub fn new(duration: f32, action: TimerAction) -> Self {
        Timer {
            duration,
            elapsed: 0.0,
            action,
        }
    }

    /// Advance by `dt` seconds. Returns true once the duration is reached.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.elapsed += dt;
        self.elapsed >= self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_starts_at_zero() {
        let timer = Timer::new(0.2, TimerAction::OverlayGrace);
        assert_eq!(timer.elapsed, 0.0);
        assert_eq!(timer.action, TimerAction::OverlayGrace);
    }

    #[test]
    fn test_tick_expires_at_duration() {
        let mut timer = Timer::new(0.2, TimerAction::OverlayGrace);
        assert!(!timer.tick(0.1));
        assert!(timer.tick(0.1));
    }

    #[test]
    fn test_zero_duration_expires_on_first_tick() {
        let mut timer = Timer::new(0.0, TimerAction::OverlayGrace);
        assert!(timer.tick(0.0));
    }
}
