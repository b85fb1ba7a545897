//! Timer expiration events.
//!
//! When a [`Timer`](crate::components::timer::Timer) component reaches its
//! duration, it is removed from its entity and a [`TimerEvent`] is triggered.
//! [`observe_timer_expired`] then performs the delayed action, but only if
//! the thing that scheduled it is still alive.
//!
//! # Related
//!
//! - [`crate::components::timer::Timer`] – the timer component
//! - [`crate::systems::time::update_timers`] – the system that emits these events

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{debug, info};

use crate::components::overlay::NoteOverlay;
use crate::components::timer::TimerAction;
use crate::resources::scenestate::{NextScene, SceneState};

/// Event emitted when a timer expires.
///
/// The `entity` field identifies the entity that owned the timer, and
/// `action` is what the timer was scheduled to do.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct TimerEvent {
    /// The entity whose timer expired.
    pub entity: Entity,
    /// The action configured on the timer.
    pub action: TimerAction,
}

/// Observer that runs the delayed action of an expired timer.
///
/// - [`TimerAction::SceneHandoff`] requests the hand-off through
///   [`NextScene`] while the scene is still active. A scene that is already
///   leaving ignores it.
/// - [`TimerAction::OverlayGrace`] lets the overlay accept a close press. If
///   the overlay entity is gone the event is dropped.
pub fn observe_timer_expired(
    trigger: On<TimerEvent>,
    scene_state: Res<SceneState>,
    mut next_scene: ResMut<NextScene>,
    mut overlays: Query<&mut NoteOverlay>,
) {
    let event = trigger.event();
    match &event.action {
        TimerAction::SceneHandoff { destination } => {
            if !scene_state.is_active() {
                debug!(
                    "Ignoring hand-off to '{}', scene is {:?}",
                    destination,
                    scene_state.get()
                );
                return;
            }
            info!("Door delay elapsed, handing off to '{}'", destination);
            next_scene.set(destination.clone());
        }
        TimerAction::OverlayGrace => match overlays.get_mut(event.entity) {
            Ok(mut overlay) => {
                debug!("Overlay grace period over for note '{}'", overlay.note);
                overlay.finish_grace();
            }
            Err(_) => debug!("Grace timer fired for a closed overlay {:?}", event.entity),
        },
    }
}
