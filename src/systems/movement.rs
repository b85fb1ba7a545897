//! Reference physics pass: integrate velocities against the room geometry.
//!
//! An embedding engine that does its own physics can skip this and hand the
//! resulting position to the scene through
//! [`FrameTick`](crate::scene::FrameTick) instead.
use bevy_ecs::prelude::*;
use glam::Vec2;

use crate::components::boxcollider::{BoxCollider, Rect};
use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::RigidBody;
use crate::resources::scenedescriptor::SceneGeometry;
use crate::resources::worldtime::PhysicsStep;

/// Move every non-frozen body by `velocity * dt`.
///
/// Bodies with a collider move one axis at a time. An axis step that would
/// push the collider into a solid stops flush against its edge. Afterwards
/// the collider is kept inside the room bounds.
pub fn movement_system(
    mut query: Query<(&mut MapPosition, &RigidBody, Option<&BoxCollider>)>,
    step: Res<PhysicsStep>,
    geometry: Res<SceneGeometry>,
) {
    for (mut position, rigidbody, collider) in query.iter_mut() {
        if rigidbody.frozen {
            continue;
        }
        let delta = rigidbody.velocity * step.dt;
        let Some(collider) = collider else {
            position.pos += delta;
            continue;
        };

        let pos = sweep_axis(position.pos, Vec2::new(delta.x, 0.0), collider, &geometry.solids);
        let pos = sweep_axis(pos, Vec2::new(0.0, delta.y), collider, &geometry.solids);
        position.pos = clamp_to_bounds(pos, collider, &geometry.bounds);
    }
}

/// Move by `delta` along a single axis, stopping flush against the first
/// solid in the way. Solids the collider already overlaps are ignored.
fn sweep_axis(pos: Vec2, delta: Vec2, collider: &BoxCollider, solids: &[Rect]) -> Vec2 {
    if delta == Vec2::ZERO {
        return pos;
    }
    let from = collider.rect(pos);
    let to = collider.rect(pos + delta);
    let swept = Rect::from_min_max(from.min().min(to.min()), from.max().max(to.max()));

    let mut allowed = delta;
    for solid in solids.iter().filter(|s| swept.overlaps(s) && !from.overlaps(s)) {
        if delta.x > 0.0 {
            allowed.x = allowed.x.min(solid.x - from.max().x);
        } else if delta.x < 0.0 {
            allowed.x = allowed.x.max(solid.max().x - from.x);
        }
        if delta.y > 0.0 {
            allowed.y = allowed.y.min(solid.y - from.max().y);
        } else if delta.y < 0.0 {
            allowed.y = allowed.y.max(solid.max().y - from.y);
        }
    }
    pos + allowed
}

/// Keep the collider at `pos` inside `bounds`. Empty bounds disable the
/// clamp.
pub fn clamp_to_bounds(pos: Vec2, collider: &BoxCollider, bounds: &Rect) -> Vec2 {
    if bounds.w <= 0.0 || bounds.h <= 0.0 {
        return pos;
    }
    let lo = bounds.min() - collider.offset;
    let hi = bounds.max() - collider.offset - collider.size;
    Vec2::new(pos.x.max(lo.x).min(hi.x), pos.y.max(lo.y).min(hi.y))
}
