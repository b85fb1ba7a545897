use bevy_ecs::prelude::{Entity, Resource};
use smallvec::SmallVec;

/// Zones the player footprint overlaps this frame, as reported by the
/// physics pass.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct ZoneOverlaps {
    pub zones: SmallVec<[Entity; 4]>,
}

impl ZoneOverlaps {
    pub fn replace(&mut self, zones: &[Entity]) {
        self.zones.clear();
        self.zones.extend_from_slice(zones);
    }

    pub fn contains(&self, zone: Entity) -> bool {
        self.zones.contains(&zone)
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}
