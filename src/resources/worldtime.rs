use bevy_ecs::prelude::Resource;

/// Simulation clock of a scene world.
#[derive(Resource, Clone, Copy, Debug)]
pub struct WorldTime {
    pub elapsed: f32,
    pub delta: f32,
    pub time_scale: f32,
    pub frame_count: u64,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: 0.0,
            delta: 0.0,
            time_scale: 1.0,
            frame_count: 0,
        }
    }
}

/// Step length handed to the physics pass for the current frame.
///
/// Kept apart from [`WorldTime`] because the engine integrates before the
/// scene logic advances its own clock.
#[derive(Resource, Clone, Copy, Debug, Default)]
pub struct PhysicsStep {
    pub dt: f32,
}
