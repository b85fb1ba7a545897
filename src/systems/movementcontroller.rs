//! Player movement controller.
//!
//! Turns the frame's [`InputSnapshot`] into a velocity on the player's
//! [`RigidBody`] and selects the matching animation. Only one axis moves at a
//! time: when several directions are held the first one in
//! [`Direction::PRIORITY`] wins (left, right, up, down).
//!
//! With nothing held the player stops and idles facing the last direction it
//! moved in, which lives in its [`PlayerMotion`] component.
use bevy_ecs::prelude::*;
use log::trace;

use crate::components::animation::Animation;
use crate::components::player::{Direction, MotionState, Player, PlayerMotion};
use crate::components::rigidbody::RigidBody;
use crate::resources::input::InputSnapshot;

/// Pick the motion state for this frame. `facing` is the last resolved
/// direction and is only used when no direction is held.
pub fn resolve_motion(input: &InputSnapshot, facing: Direction) -> MotionState {
    Direction::PRIORITY
        .into_iter()
        .find(|d| match d {
            Direction::Left => input.left,
            Direction::Right => input.right,
            Direction::Up => input.up,
            Direction::Down => input.down,
        })
        .map_or(MotionState::Idle(facing), MotionState::Moving)
}

/// Apply velocity, facing and animation to the player.
///
/// Does nothing until a player entity exists. Frozen bodies are left alone.
pub fn movement_controller(
    input: Res<InputSnapshot>,
    mut query: Query<(&mut PlayerMotion, &mut RigidBody, &mut Animation), With<Player>>,
) {
    for (mut motion, mut rigidbody, mut animation) in query.iter_mut() {
        if rigidbody.frozen {
            continue;
        }
        let state = resolve_motion(&input, motion.facing);
        match state {
            MotionState::Moving(direction) => {
                rigidbody.set_velocity(direction.unit() * motion.speed);
                motion.facing = direction;
            }
            MotionState::Idle(_) => rigidbody.stop(),
        }
        if motion.state != state {
            trace!("Player {:?} -> {:?}", motion.state, state);
            motion.state = state;
        }
        animation.play(state.animation_key());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn held(left: bool, right: bool, up: bool, down: bool) -> InputSnapshot {
        InputSnapshot {
            left,
            right,
            up,
            down,
            ..Default::default()
        }
    }

    #[test]
    fn test_single_direction() {
        assert_eq!(
            resolve_motion(&held(false, false, true, false), Direction::Down),
            MotionState::Moving(Direction::Up)
        );
    }

    #[test]
    fn test_priority_left_over_everything() {
        assert_eq!(
            resolve_motion(&held(true, true, true, true), Direction::Down),
            MotionState::Moving(Direction::Left)
        );
        assert_eq!(
            resolve_motion(&held(false, true, true, false), Direction::Down),
            MotionState::Moving(Direction::Right)
        );
        assert_eq!(
            resolve_motion(&held(false, false, true, true), Direction::Left),
            MotionState::Moving(Direction::Up)
        );
    }

    #[test]
    fn test_idle_keeps_facing() {
        assert_eq!(
            resolve_motion(&InputSnapshot::default(), Direction::Right),
            MotionState::Idle(Direction::Right)
        );
    }

    #[test]
    fn test_system_without_player_is_noop() {
        let mut world = World::new();
        world.insert_resource(held(true, false, false, false));
        let mut schedule = Schedule::default();
        schedule.add_systems(movement_controller);
        schedule.run(&mut world);
    }
}
