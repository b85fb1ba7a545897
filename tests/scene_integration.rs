//! Scene frame protocol tests.
//!
//! These drive a [`SceneController`] the way an external engine would: each
//! frame hands in the held keys and the zones the player overlaps, and the
//! tests look at the resulting velocity, animation, hand-off and overlay
//! state. No physics pass runs here, so the player never moves on its own.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use glam::Vec2;

use roomwalk::components::overlay::{
    BACKDROP_DEPTH, CLOSE_HINT, OverlayElementKind, PANEL_DEPTH, TEXT_DEPTH,
};
use roomwalk::components::player::Direction;
use roomwalk::components::triggerzone::ZoneAction;
use roomwalk::events::audio::AudioCmd;
use roomwalk::events::zone::{DoorEnteredEvent, NoteClosedEvent, NoteOpenedEvent};
use roomwalk::resources::animationstore::FRAMES_PER_ROW;
use roomwalk::resources::gameconfig::GameConfig;
use roomwalk::resources::input::{KeySet, TouchControls};
use roomwalk::resources::notestore::NoteStore;
use roomwalk::resources::scenedescriptor::{
    MapObject, MusicCue, SceneDescriptor, SpawnPoint, TriggerBinding,
};
use roomwalk::resources::scenestate::SceneStates;
use roomwalk::scene::controller::SceneController;
use roomwalk::scene::{FrameTick, Scene, SceneEntry, SceneFlow};

const DT: f32 = 0.1;
const EPSILON: f32 = 1e-4;

#[derive(Resource, Default)]
struct Counts {
    doors: u32,
    opened: u32,
    closed: u32,
}

fn object(name: &str, x: f32, y: f32) -> MapObject {
    MapObject {
        name: name.into(),
        x,
        y,
        width: Some(32.0),
        height: Some(32.0),
    }
}

fn apartment() -> SceneDescriptor {
    SceneDescriptor {
        name: "apartment".into(),
        width: 640.0,
        height: 480.0,
        default_spawn: SpawnPoint { x: 400.0, y: 400.0 },
        music: Some(MusicCue {
            id: "bgMusic".into(),
            volume: None,
            looped: true,
        }),
        objects: vec![
            object("door_to_bedroom", 600.0, 400.0),
            object("table_note", 100.0, 100.0),
            object("blank_note", 200.0, 100.0),
        ],
        collision_objects: None,
        triggers: vec![
            TriggerBinding {
                tag: "door_to_bedroom".into(),
                action: ZoneAction::Door {
                    destination: "bedroom".into(),
                },
            },
            TriggerBinding {
                tag: "table_note".into(),
                action: ZoneAction::Note {
                    note: "bedroom_letter_1".into(),
                },
            },
            TriggerBinding {
                tag: "blank_note".into(),
                action: ZoneAction::Note {
                    note: "never_written".into(),
                },
            },
            TriggerBinding {
                tag: "no_such_object".into(),
                action: ZoneAction::Note {
                    note: "bedroom_letter_1".into(),
                },
            },
        ],
    }
}

fn make_scene() -> SceneController {
    let mut notes = NoteStore::new();
    notes.insert("bedroom_letter_1", "Gone to the store.");
    let mut scene = SceneController::new(apartment(), notes, GameConfig::new());
    scene.world_mut().init_resource::<Counts>();
    scene
        .world_mut()
        .add_observer(|_: On<DoorEnteredEvent>, mut counts: ResMut<Counts>| counts.doors += 1);
    scene
        .world_mut()
        .add_observer(|_: On<NoteOpenedEvent>, mut counts: ResMut<Counts>| counts.opened += 1);
    scene
        .world_mut()
        .add_observer(|_: On<NoteClosedEvent>, mut counts: ResMut<Counts>| counts.closed += 1);
    scene.on_enter(SceneEntry::default());
    // music start on entry is not part of these tests
    scene.drain_audio();
    scene
}

fn counts(scene: &SceneController) -> (u32, u32, u32) {
    let c = scene.world().resource::<Counts>();
    (c.doors, c.opened, c.closed)
}

fn keys() -> KeySet {
    KeySet::default()
}

fn left() -> KeySet {
    KeySet {
        left: true,
        ..KeySet::default()
    }
}

fn action() -> KeySet {
    KeySet {
        action: true,
        ..KeySet::default()
    }
}

fn step(scene: &mut SceneController, keys: KeySet, overlaps: &[Entity]) -> SceneFlow {
    scene.on_update(&FrameTick::new(DT, keys).with_overlaps(overlaps))
}

fn approx_vec(a: Vec2, b: Vec2) -> bool {
    (a - b).length() < EPSILON
}

fn door_sounds(cmds: &[AudioCmd]) -> usize {
    cmds.iter()
        .filter(|c| matches!(c, AudioCmd::PlayFx { id, .. } if id == "doorSound"))
        .count()
}

fn button_sounds(cmds: &[AudioCmd]) -> usize {
    cmds.iter()
        .filter(|c| matches!(c, AudioCmd::PlayFx { id, .. } if id == "buttonPress"))
        .count()
}

// =============================================================================
// Movement
// =============================================================================

#[test]
fn enter_spawns_player_idle_facing_down() {
    let scene = make_scene();
    assert_eq!(scene.state(), SceneStates::Active);
    assert_eq!(scene.player_position(), Some(Vec2::new(400.0, 400.0)));
    assert_eq!(scene.player_animation(), Some("idle-down"));
    assert_eq!(scene.player_sheet_frame(), Some(10 * FRAMES_PER_ROW));
    assert_eq!(scene.player_velocity(), Some(Vec2::ZERO));
}

#[test]
fn enter_skips_trigger_without_object() {
    let scene = make_scene();
    assert!(scene.zone("no_such_object").is_none());
    assert!(scene.zone("table_note").is_some());
    assert!(scene.zone("door_to_bedroom").is_some());
}

#[test]
fn single_direction_moves_at_full_speed() {
    let cases = [
        (Direction::Left, Vec2::new(-160.0, 0.0), "moving-left"),
        (Direction::Right, Vec2::new(160.0, 0.0), "moving-right"),
        (Direction::Up, Vec2::new(0.0, -160.0), "moving-up"),
        (Direction::Down, Vec2::new(0.0, 160.0), "moving-down"),
    ];
    for (direction, velocity, animation) in cases {
        let mut scene = make_scene();
        let held = KeySet {
            left: direction == Direction::Left,
            right: direction == Direction::Right,
            up: direction == Direction::Up,
            down: direction == Direction::Down,
            action: false,
        };
        step(&mut scene, held, &[]);
        assert!(
            approx_vec(scene.player_velocity().unwrap(), velocity),
            "{direction:?}"
        );
        assert_eq!(scene.player_animation(), Some(animation));
        assert_eq!(scene.player_motion().unwrap().facing, direction);
    }
}

#[test]
fn several_directions_resolve_by_priority() {
    let mut scene = make_scene();
    let all = KeySet {
        left: true,
        right: true,
        up: true,
        down: true,
        action: false,
    };
    step(&mut scene, all, &[]);
    assert_eq!(scene.player_animation(), Some("moving-left"));

    let right_down = KeySet {
        right: true,
        down: true,
        ..KeySet::default()
    };
    step(&mut scene, right_down, &[]);
    assert_eq!(scene.player_animation(), Some("moving-right"));
    assert!(approx_vec(
        scene.player_velocity().unwrap(),
        Vec2::new(160.0, 0.0)
    ));

    let up_down = KeySet {
        up: true,
        down: true,
        ..KeySet::default()
    };
    step(&mut scene, up_down, &[]);
    assert_eq!(scene.player_animation(), Some("moving-up"));
}

#[test]
fn releasing_keys_idles_in_last_direction() {
    let mut scene = make_scene();
    step(&mut scene, left(), &[]);
    assert!(approx_vec(
        scene.player_velocity().unwrap(),
        Vec2::new(-160.0, 0.0)
    ));
    assert_eq!(scene.player_animation(), Some("moving-left"));

    step(&mut scene, keys(), &[]);
    assert_eq!(scene.player_velocity(), Some(Vec2::ZERO));
    assert_eq!(scene.player_animation(), Some("idle-left"));
}

#[test]
fn no_input_idles_facing_down() {
    let mut scene = make_scene();
    step(&mut scene, keys(), &[]);
    assert_eq!(scene.player_animation(), Some("idle-down"));
    assert_eq!(scene.player_velocity(), Some(Vec2::ZERO));
}

#[test]
fn touch_pad_moves_like_keyboard() {
    let mut scene = make_scene();
    let touch = TouchControls {
        up: true,
        ..TouchControls::default()
    };
    scene.on_update(&FrameTick::new(DT, keys()).with_touch(touch));
    assert_eq!(scene.player_animation(), Some("moving-up"));
}

#[test]
fn engine_position_is_adopted() {
    let mut scene = make_scene();
    scene.on_update(&FrameTick::new(DT, keys()).with_position(Vec2::new(50.0, 60.0)));
    assert_eq!(scene.player_position(), Some(Vec2::new(50.0, 60.0)));
}

// =============================================================================
// Door zones
// =============================================================================

#[test]
fn door_fires_once_and_hands_off_after_delay() {
    let mut scene = make_scene();
    let door = scene.zone_entity("door_to_bedroom").unwrap();

    // frame N
    assert_eq!(step(&mut scene, keys(), &[door]), SceneFlow::Continue);
    assert!(scene.zone("door_to_bedroom").unwrap().is_triggered());
    assert!(scene.handoff_scheduled());
    assert_eq!(counts(&scene).0, 1);
    assert_eq!(door_sounds(&scene.drain_audio()), 1);

    // frame N+1: still overlapping, nothing new
    assert_eq!(step(&mut scene, keys(), &[door]), SceneFlow::Continue);
    assert_eq!(counts(&scene).0, 1);
    assert_eq!(door_sounds(&scene.drain_audio()), 0);

    // frame N+2: 200 ms elapsed
    assert_eq!(
        step(&mut scene, keys(), &[door]),
        SceneFlow::Handoff("bedroom".into())
    );
    assert_eq!(scene.state(), SceneStates::Exiting);
    assert!(!scene.handoff_scheduled());
    assert_eq!(counts(&scene).0, 1);
}

#[test]
fn door_does_not_refire_on_reentry() {
    let mut scene = make_scene();
    let door = scene.zone_entity("door_to_bedroom").unwrap();

    step(&mut scene, keys(), &[door]);
    step(&mut scene, keys(), &[]);
    let flow = step(&mut scene, keys(), &[door]);
    assert_eq!(flow, SceneFlow::Handoff("bedroom".into()));
    assert_eq!(counts(&scene).0, 1);
}

#[test]
fn leaving_scene_drops_pending_handoff() {
    let mut scene = make_scene();
    let door = scene.zone_entity("door_to_bedroom").unwrap();
    step(&mut scene, keys(), &[door]);

    let exit = scene.on_exit();
    assert_eq!(exit.facing, Direction::Down);
    assert_eq!(scene.state(), SceneStates::Exited);
    for _ in 0..5 {
        assert_eq!(step(&mut scene, keys(), &[]), SceneFlow::Continue);
    }
}

#[test]
fn cancelled_handoff_keeps_scene_active() {
    let mut scene = make_scene();
    let door = scene.zone_entity("door_to_bedroom").unwrap();
    step(&mut scene, keys(), &[door]);
    step(&mut scene, keys(), &[]);
    assert!(matches!(step(&mut scene, keys(), &[]), SceneFlow::Handoff(_)));

    scene.cancel_handoff();
    assert_eq!(scene.state(), SceneStates::Active);
    for _ in 0..5 {
        assert_eq!(step(&mut scene, keys(), &[door]), SceneFlow::Continue);
    }
    assert_eq!(counts(&scene).0, 1);
}

// =============================================================================
// Note zones and the overlay
// =============================================================================

#[test]
fn note_proximity_only_lasts_one_frame() {
    let mut scene = make_scene();
    let note = scene.zone_entity("table_note").unwrap();

    step(&mut scene, keys(), &[note]);
    assert!(!scene.zone("table_note").unwrap().is_near());

    // fresh press, but not overlapping any more
    step(&mut scene, action(), &[]);
    assert!(!scene.overlay_open());
    assert_eq!(counts(&scene).1, 0);
}

#[test]
fn action_near_note_opens_overlay_and_freezes_player() {
    let mut scene = make_scene();
    let note = scene.zone_entity("table_note").unwrap();

    step(&mut scene, left(), &[note]);
    assert!(approx_vec(
        scene.player_velocity().unwrap(),
        Vec2::new(-160.0, 0.0)
    ));

    let held = KeySet {
        left: true,
        action: true,
        ..KeySet::default()
    };
    step(&mut scene, held, &[note]);
    assert!(scene.overlay_open());
    assert_eq!(scene.listener_count(), 1);
    assert_eq!(scene.player_velocity(), Some(Vec2::ZERO));
    assert_eq!(scene.player_animation(), Some("idle-left"));
    assert_eq!(counts(&scene).1, 1);
    assert_eq!(button_sounds(&scene.drain_audio()), 1);

    // still frozen while the overlay is up, whatever is held
    step(&mut scene, held, &[note]);
    assert_eq!(scene.player_velocity(), Some(Vec2::ZERO));
    assert_eq!(scene.player_animation(), Some("idle-left"));
}

#[test]
fn overlay_elements_are_layered() {
    let mut scene = make_scene();
    let note = scene.zone_entity("table_note").unwrap();
    step(&mut scene, action(), &[note]);

    let elements = scene.overlay_elements();
    assert_eq!(elements.len(), 4);
    let depths: Vec<i32> = elements.iter().map(|e| e.depth).collect();
    assert_eq!(depths, vec![BACKDROP_DEPTH, PANEL_DEPTH, TEXT_DEPTH, TEXT_DEPTH]);

    let backdrop = elements[0];
    assert_eq!(backdrop.kind, OverlayElementKind::Backdrop);
    assert!((backdrop.alpha - 0.9).abs() < EPSILON);
    assert_eq!(backdrop.size, Vec2::new(640.0, 480.0));

    let body = elements
        .iter()
        .find(|e| e.kind == OverlayElementKind::Body)
        .unwrap();
    assert_eq!(body.text.as_deref(), Some("Gone to the store."));
    let hint = elements
        .iter()
        .find(|e| e.kind == OverlayElementKind::Hint)
        .unwrap();
    assert_eq!(hint.text.as_deref(), Some(CLOSE_HINT));
}

#[test]
fn missing_note_text_opens_empty_overlay() {
    let mut scene = make_scene();
    let note = scene.zone_entity("blank_note").unwrap();
    step(&mut scene, action(), &[note]);

    assert!(scene.overlay_open());
    let elements = scene.overlay_elements();
    let body = elements
        .iter()
        .find(|e| e.kind == OverlayElementKind::Body)
        .unwrap();
    assert_eq!(body.text.as_deref(), Some(""));
}

#[test]
fn held_press_at_grace_end_does_not_close() {
    let mut scene = make_scene();
    let note = scene.zone_entity("table_note").unwrap();

    // frame N: open
    step(&mut scene, action(), &[note]);
    assert!(scene.overlay_open());
    assert!(!scene.overlay().unwrap().can_close());

    // frame N+1: grace over, still holding the opening press
    step(&mut scene, action(), &[note]);
    assert!(scene.overlay().unwrap().can_close());
    assert!(scene.overlay_open());

    step(&mut scene, action(), &[note]);
    assert!(scene.overlay_open());

    step(&mut scene, keys(), &[note]);
    assert!(scene.overlay_open());

    // fresh press closes
    step(&mut scene, action(), &[note]);
    assert!(!scene.overlay_open());
    assert!(scene.overlay_elements().is_empty());
    assert_eq!(scene.listener_count(), 0);
    assert_eq!(counts(&scene), (0, 1, 1));
    assert_eq!(button_sounds(&scene.drain_audio()), 2);
}

#[test]
fn press_during_grace_is_ignored() {
    let mut scene = make_scene();
    let note = scene.zone_entity("table_note").unwrap();
    let fast = |scene: &mut SceneController, keys: KeySet| {
        scene.on_update(&FrameTick::new(0.01, keys).with_overlaps(&[note]))
    };

    fast(&mut scene, action());
    fast(&mut scene, keys());
    fast(&mut scene, action());
    assert!(scene.overlay_open());
    assert!(!scene.overlay().unwrap().can_close());

    // a long released frame ends the grace period
    scene.on_update(&FrameTick::new(0.5, keys()));
    assert!(scene.overlay().unwrap().can_close());
    fast(&mut scene, action());
    assert!(!scene.overlay_open());
}

#[test]
fn closing_press_does_not_reopen_overlay() {
    let mut scene = make_scene();
    let note = scene.zone_entity("table_note").unwrap();

    step(&mut scene, action(), &[note]);
    step(&mut scene, keys(), &[note]);
    step(&mut scene, action(), &[note]);
    assert!(!scene.overlay_open());

    // still holding the closing press next to the note
    step(&mut scene, action(), &[note]);
    assert!(!scene.overlay_open());

    step(&mut scene, keys(), &[note]);
    step(&mut scene, action(), &[note]);
    assert!(scene.overlay_open());
    assert_eq!(counts(&scene), (0, 2, 1));
}

#[test]
fn player_walks_again_after_close() {
    let mut scene = make_scene();
    let note = scene.zone_entity("table_note").unwrap();

    step(&mut scene, action(), &[note]);
    step(&mut scene, keys(), &[]);
    step(&mut scene, action(), &[]);
    assert!(!scene.overlay_open());

    step(&mut scene, left(), &[]);
    assert!(approx_vec(
        scene.player_velocity().unwrap(),
        Vec2::new(-160.0, 0.0)
    ));
    assert_eq!(scene.player_animation(), Some("moving-left"));
}

#[test]
fn door_timer_runs_while_overlay_is_open() {
    let mut scene = make_scene();
    let door = scene.zone_entity("door_to_bedroom").unwrap();
    let note = scene.zone_entity("table_note").unwrap();

    step(&mut scene, action(), &[door, note]);
    assert!(scene.overlay_open());
    assert!(scene.handoff_scheduled());
    step(&mut scene, action(), &[]);
    assert_eq!(
        step(&mut scene, action(), &[]),
        SceneFlow::Handoff("bedroom".into())
    );
}

// =============================================================================
// Music
// =============================================================================

#[test]
fn entering_starts_room_music() {
    let mut scene = SceneController::new(apartment(), NoteStore::new(), GameConfig::new());
    scene.on_enter(SceneEntry::default());
    let cmds = scene.drain_audio();
    assert_eq!(
        cmds,
        vec![AudioCmd::PlayMusic {
            id: "bgMusic".into(),
            looped: true,
            volume: 0.3,
        }]
    );
    assert!(scene.active_music().is_playing("bgMusic"));
}

#[test]
fn entering_with_same_music_does_not_restart_it() {
    let mut scene = SceneController::new(apartment(), NoteStore::new(), GameConfig::new());
    let mut entry = SceneEntry::default();
    entry.music.id = Some("bgMusic".into());
    scene.on_enter(entry);
    assert!(scene.drain_audio().is_empty());
}
