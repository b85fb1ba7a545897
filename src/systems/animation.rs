//! Animation playback system.
//!
//! 1. Animation data is defined in [`AnimationStore`]
//! 2. Entities have an [`Animation`] component pointing to a key
//! 3. [`animation`] advances frames based on `fps`
//!
//! Which key is active is decided elsewhere (the movement controller for the
//! player); this system only plays it.
use bevy_ecs::prelude::*;

use crate::components::animation::Animation;
use crate::resources::animationstore::AnimationStore;
use crate::resources::worldtime::WorldTime;

/// Advance animation playback.
///
/// Looped animations wrap around; the others stay on their last frame.
/// Unknown keys are left untouched.
pub fn animation(
    mut query: Query<&mut Animation>,
    animation_store: Res<AnimationStore>,
    time: Res<WorldTime>,
) {
    for mut anim_comp in query.iter_mut() {
        let Some(animation) = animation_store.get(&anim_comp.animation_key) else {
            continue;
        };
        if animation.frame_count <= 1 || animation.fps <= 0.0 {
            continue;
        }
        anim_comp.elapsed_time += time.delta;

        let frame_duration = 1.0 / animation.fps;
        while anim_comp.elapsed_time >= frame_duration {
            anim_comp.elapsed_time -= frame_duration;
            anim_comp.frame_index += 1;

            if anim_comp.frame_index >= animation.frame_count {
                if animation.looped {
                    anim_comp.frame_index = 0;
                } else {
                    anim_comp.frame_index = animation.frame_count - 1;
                    anim_comp.elapsed_time = 0.0;
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_world(delta: f32) -> World {
        let mut world = World::new();
        world.insert_resource(AnimationStore::character_sheet());
        world.insert_resource(WorldTime {
            delta,
            ..Default::default()
        });
        world
    }

    fn run(world: &mut World) {
        let mut schedule = Schedule::default();
        schedule.add_systems(animation);
        schedule.run(world);
    }

    #[test]
    fn test_walk_cycle_advances_and_wraps() {
        let mut world = make_world(0.35);
        let e = world.spawn(Animation::new("moving-left")).id();
        run(&mut world);
        let anim = world.get::<Animation>(e).unwrap();
        assert_eq!(anim.frame_index, 3);
        run(&mut world);
        run(&mut world);
        // 1.05 s at 10 fps over 9 frames
        assert_eq!(world.get::<Animation>(e).unwrap().frame_index, 1);
    }

    #[test]
    fn test_idle_stays_on_frame_zero() {
        let mut world = make_world(1.0);
        let e = world.spawn(Animation::new("idle-down")).id();
        run(&mut world);
        assert_eq!(world.get::<Animation>(e).unwrap().frame_index, 0);
    }
}
