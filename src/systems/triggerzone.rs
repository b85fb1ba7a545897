//! Trigger zone systems.
//!
//! - [`process_zone_overlaps`] reacts to the zones the player overlaps this
//!   frame. Door zones latch on the first overlap, play the door sound, and
//!   schedule the hand-off with a [`Timer`] on the zone entity. Note zones
//!   just mark themselves as near.
//! - [`clear_proximity`] drops every near flag at the end of the frame, so a
//!   note zone is only near on frames where the player actually overlaps it.
use bevy_ecs::prelude::*;
use log::debug;

use crate::components::timer::{Timer, TimerAction};
use crate::components::triggerzone::{TriggerZone, ZoneAction};
use crate::events::audio::AudioCmd;
use crate::events::zone::DoorEnteredEvent;
use crate::resources::gameconfig::GameConfig;
use crate::resources::overlaps::ZoneOverlaps;

pub fn process_zone_overlaps(
    mut commands: Commands,
    overlaps: Res<ZoneOverlaps>,
    mut zones: Query<&mut TriggerZone>,
    config: Res<GameConfig>,
    mut audio_cmds: MessageWriter<AudioCmd>,
) {
    for &entity in overlaps.zones.iter() {
        let Ok(mut zone) = zones.get_mut(entity) else {
            debug!("Overlap reported for unknown zone {:?}", entity);
            continue;
        };
        if !zone.is_one_shot() {
            zone.mark_near();
            continue;
        }
        if !zone.latch() {
            continue;
        }
        debug!("Zone '{}' latched", zone.tag);
        let ZoneAction::Door { destination } = zone.action.clone() else {
            continue;
        };
        audio_cmds.write(AudioCmd::PlayFx {
            id: config.door_sound.clone(),
            volume: config.door_volume,
        });
        commands.entity(entity).insert(Timer::new(
            config.door_delay(),
            TimerAction::SceneHandoff {
                destination: destination.clone(),
            },
        ));
        commands.trigger(DoorEnteredEvent {
            zone: entity,
            tag: zone.tag.clone(),
            destination,
        });
    }
}

pub fn clear_proximity(mut zones: Query<&mut TriggerZone>) {
    for mut zone in zones.iter_mut() {
        if zone.is_near() {
            zone.clear_near();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::boxcollider::Rect;
    use bevy_ecs::message::Messages;

    fn make_world() -> World {
        let mut world = World::new();
        world.insert_resource(GameConfig::new());
        world.insert_resource(ZoneOverlaps::default());
        world.init_resource::<Messages<AudioCmd>>();
        world
    }

    fn door(world: &mut World) -> Entity {
        world
            .spawn(TriggerZone::new(
                "door_to_bedroom",
                Rect::new(0.0, 0.0, 32.0, 32.0),
                ZoneAction::Door {
                    destination: "bedroom".into(),
                },
            ))
            .id()
    }

    fn run(world: &mut World) {
        let mut schedule = Schedule::default();
        schedule.add_systems(process_zone_overlaps);
        schedule.run(world);
    }

    fn sounds(world: &mut World) -> Vec<AudioCmd> {
        world.resource_mut::<Messages<AudioCmd>>().drain().collect()
    }

    #[test]
    fn test_door_latches_once_and_schedules_handoff() {
        let mut world = make_world();
        let zone = door(&mut world);
        world.resource_mut::<ZoneOverlaps>().replace(&[zone]);

        run(&mut world);
        assert!(world.get::<TriggerZone>(zone).unwrap().is_triggered());
        let timer = world.get::<Timer>(zone).unwrap();
        assert!((timer.duration - 0.2).abs() < 1e-6);
        assert_eq!(
            timer.action,
            TimerAction::SceneHandoff {
                destination: "bedroom".into()
            }
        );
        assert_eq!(
            sounds(&mut world),
            vec![AudioCmd::PlayFx {
                id: "doorSound".into(),
                volume: 0.6
            }]
        );

        world.get_mut::<Timer>(zone).unwrap().elapsed = 0.1;
        run(&mut world);
        assert!(sounds(&mut world).is_empty());
        assert_eq!(world.get::<Timer>(zone).unwrap().elapsed, 0.1);
    }

    #[test]
    fn test_door_delay_follows_config() {
        let mut world = make_world();
        world.resource_mut::<GameConfig>().door_delay_ms = 500;
        let zone = door(&mut world);
        world.resource_mut::<ZoneOverlaps>().replace(&[zone]);

        run(&mut world);
        let timer = world.get::<Timer>(zone).unwrap();
        assert!((timer.duration - 0.5).abs() < 1e-6);
        assert_eq!(timer.elapsed, 0.0);
    }

    #[test]
    fn test_note_zone_is_near_until_cleared() {
        let mut world = make_world();
        let zone = world
            .spawn(TriggerZone::new(
                "table_note",
                Rect::new(0.0, 0.0, 32.0, 32.0),
                ZoneAction::Note {
                    note: "bedroom_letter_1".into(),
                },
            ))
            .id();
        world.resource_mut::<ZoneOverlaps>().replace(&[zone]);

        let mut schedule = Schedule::default();
        schedule.add_systems((process_zone_overlaps, clear_proximity).chain());

        run(&mut world);
        assert!(world.get::<TriggerZone>(zone).unwrap().is_near());
        assert!(!world.get::<TriggerZone>(zone).unwrap().is_triggered());
        assert!(world.get::<Timer>(zone).is_none());

        schedule.run(&mut world);
        assert!(!world.get::<TriggerZone>(zone).unwrap().is_near());
        assert!(sounds(&mut world).is_empty());
    }
}
