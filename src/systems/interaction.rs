//! Note interaction check.
//!
//! Runs only on frames where no overlay is open. It samples its own
//! [`InteractionEdge`] so the press that later closes an overlay is not seen
//! here as a fresh press, and requests an overlay when the player presses
//! action while a note zone is near.
use bevy_ecs::prelude::*;

use crate::components::triggerzone::{TriggerZone, ZoneAction};
use crate::resources::input::InputSnapshot;
use crate::resources::interaction::{InteractionEdge, NoteRequest, PendingInteraction};

pub fn interaction_check(
    input: Res<InputSnapshot>,
    mut edge: ResMut<InteractionEdge>,
    zones: Query<(Entity, &TriggerZone)>,
    mut pending: ResMut<PendingInteraction>,
) {
    if !edge.0.sample(input.action_held) {
        return;
    }
    let near_note = zones.iter().find_map(|(entity, zone)| match &zone.action {
        ZoneAction::Note { note } if zone.is_near() => Some(NoteRequest {
            zone: entity,
            note: note.clone(),
        }),
        _ => None,
    });
    if near_note.is_some() {
        pending.request = near_note;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::boxcollider::Rect;

    fn make_world(near: bool) -> (World, Entity) {
        let mut world = World::new();
        world.insert_resource(InputSnapshot::default());
        world.insert_resource(InteractionEdge::default());
        world.insert_resource(PendingInteraction::default());
        let mut zone = TriggerZone::new(
            "table_note",
            Rect::new(0.0, 0.0, 32.0, 32.0),
            ZoneAction::Note {
                note: "bedroom_letter_1".into(),
            },
        );
        if near {
            zone.mark_near();
        }
        let entity = world.spawn(zone).id();
        (world, entity)
    }

    fn press(world: &mut World, held: bool) {
        world.resource_mut::<InputSnapshot>().action_held = held;
        let mut schedule = Schedule::default();
        schedule.add_systems(interaction_check);
        schedule.run(world);
    }

    #[test]
    fn test_press_near_note_requests_overlay() {
        let (mut world, zone) = make_world(true);
        press(&mut world, true);
        let request = world.resource_mut::<PendingInteraction>().take().unwrap();
        assert_eq!(request.zone, zone);
        assert_eq!(request.note, "bedroom_letter_1");
    }

    #[test]
    fn test_held_action_does_not_request_again() {
        let (mut world, _) = make_world(true);
        press(&mut world, true);
        world.resource_mut::<PendingInteraction>().take();
        press(&mut world, true);
        assert!(world.resource::<PendingInteraction>().request.is_none());
    }

    #[test]
    fn test_press_away_from_note_does_nothing() {
        let (mut world, _) = make_world(false);
        press(&mut world, true);
        assert!(world.resource::<PendingInteraction>().request.is_none());
    }
}
