//! Time update systems.
//!
//! - [`update_world_time`] advances the scene's
//!   [`WorldTime`](crate::resources::worldtime::WorldTime) once per frame,
//!   applying `time_scale` to the provided delta.
//! - [`update_timers`] ticks every [`Timer`] and fires a [`TimerEvent`] for
//!   the ones that expired.
use bevy_ecs::prelude::*;

use crate::components::timer::Timer;
use crate::events::timer::TimerEvent;
use crate::resources::worldtime::WorldTime;

/// Update elapsed and delta seconds on the `WorldTime` resource.
///
/// `dt` is expected to be the unscaled frame delta in seconds. The system
/// applies the current `time_scale` and writes both `elapsed` and `delta`.
pub fn update_world_time(world: &mut World, dt: f32) {
    let mut wt = world.resource_mut::<WorldTime>();
    let scaled_dt = dt * wt.time_scale;
    wt.elapsed += scaled_dt;
    wt.delta = scaled_dt;
    wt.frame_count += 1;
}

/// Tick timers by the frame delta.
///
/// Timers are single-shot: an expired timer is removed from its entity
/// before the event is triggered. A timer whose entity was despawned simply
/// no longer exists, so it can never fire.
pub fn update_timers(
    world_time: Res<WorldTime>,
    mut query: Query<(Entity, &mut Timer)>,
    mut commands: Commands,
) {
    for (entity, mut timer) in query.iter_mut() {
        if timer.tick(world_time.delta) {
            commands.entity(entity).remove::<Timer>();
            commands.trigger(TimerEvent {
                entity,
                action: timer.action.clone(),
            });
        }
    }
}
