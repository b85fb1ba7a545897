//! Reference physics pass: player footprint against trigger zones.
use bevy_ecs::prelude::*;
use smallvec::SmallVec;

use crate::components::boxcollider::BoxCollider;
use crate::components::mapposition::MapPosition;
use crate::components::player::Player;
use crate::components::triggerzone::TriggerZone;
use crate::resources::overlaps::ZoneOverlaps;

/// Record every zone whose rectangle overlaps the player's footprint at its
/// current position. Touching edges do not count.
pub fn zone_contacts(
    player: Query<(&MapPosition, &BoxCollider), With<Player>>,
    zones: Query<(Entity, &TriggerZone)>,
    mut overlaps: ResMut<ZoneOverlaps>,
) {
    let mut found: SmallVec<[Entity; 4]> = SmallVec::new();
    for (position, collider) in player.iter() {
        found.extend(
            zones
                .iter()
                .filter(|(_, zone)| collider.overlaps_rect(position.pos, &zone.rect))
                .map(|(entity, _)| entity),
        );
    }
    overlaps.replace(&found);
}
