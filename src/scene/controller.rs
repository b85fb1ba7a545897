//! One room's world and its per-frame update.
//!
//! The controller owns a private [`World`]. Dropping the controller drops
//! the world, and with it every pending [`Timer`]: a door hand-off or an
//! overlay grace period can never fire into a scene that no longer exists.
use bevy_ecs::message::Messages;
use bevy_ecs::prelude::*;
use glam::Vec2;
use log::{debug, info};
use smallvec::SmallVec;

use crate::components::animation::Animation;
use crate::components::mapposition::MapPosition;
use crate::components::overlay::{NoteOverlay, OverlayElement};
use crate::components::player::{Direction, MotionState, Player, PlayerMotion, footprint};
use crate::components::rigidbody::RigidBody;
use crate::components::timer::{Timer, TimerAction};
use crate::components::triggerzone::TriggerZone;
use crate::events::audio::AudioCmd;
use crate::events::timer::observe_timer_expired;
use crate::events::zone::{observe_door_entered, observe_note_closed, observe_note_opened};
use crate::resources::animationstore::AnimationStore;
use crate::resources::audio::ActiveMusic;
use crate::resources::gameconfig::GameConfig;
use crate::resources::input::{InputSnapshot, KeySet, KeyboardState, TouchControls};
use crate::resources::interaction::{InteractionEdge, PendingInteraction};
use crate::resources::notestore::NoteStore;
use crate::resources::overlaps::ZoneOverlaps;
use crate::resources::scenedescriptor::SceneDescriptor;
use crate::resources::scenestate::{NextScene, SceneState, SceneStates};
use crate::resources::worldtime::{PhysicsStep, WorldTime};
use crate::scene::listener::FrameListeners;
use crate::scene::overlay::{OverlayCloseCheck, open_overlay};
use crate::scene::{FrameTick, Scene, SceneEntry, SceneExit, SceneFlow};
use crate::systems::animation::animation;
use crate::systems::audio::{drain_audio_cmds, start_scene_music};
use crate::systems::collision::zone_contacts;
use crate::systems::input::aggregate_input;
use crate::systems::interaction::interaction_check;
use crate::systems::movement::movement_system;
use crate::systems::movementcontroller::movement_controller;
use crate::systems::time::{update_timers, update_world_time};
use crate::systems::triggerzone::{clear_proximity, process_zone_overlaps};

pub struct SceneController {
    descriptor: SceneDescriptor,
    world: World,
    listeners: FrameListeners,
    player: Option<Entity>,
    zones: Vec<Entity>,
    /// Timers, zone overlaps, input merge.
    pre: Schedule,
    interaction: Schedule,
    movement: Schedule,
    /// Animation playback, near-flag reset.
    post: Schedule,
    physics: Schedule,
}

impl SceneController {
    pub fn new(descriptor: SceneDescriptor, notes: NoteStore, config: GameConfig) -> Self {
        let mut world = World::new();
        world.insert_resource(WorldTime::default());
        world.insert_resource(PhysicsStep::default());
        world.insert_resource(config);
        world.insert_resource(notes);
        world.insert_resource(AnimationStore::character_sheet());
        world.insert_resource(descriptor.geometry());
        world.insert_resource(KeyboardState::default());
        world.insert_resource(InputSnapshot::default());
        world.insert_resource(InteractionEdge::default());
        world.insert_resource(PendingInteraction::default());
        world.insert_resource(ZoneOverlaps::default());
        world.insert_resource(SceneState::new());
        world.insert_resource(NextScene::new());
        world.insert_resource(ActiveMusic::default());
        world.init_resource::<Messages<AudioCmd>>();

        world.add_observer(observe_timer_expired);
        world.add_observer(observe_door_entered);
        world.add_observer(observe_note_opened);
        world.add_observer(observe_note_closed);

        let mut pre = Schedule::default();
        pre.add_systems((update_timers, process_zone_overlaps, aggregate_input).chain());
        let mut interaction = Schedule::default();
        interaction.add_systems(interaction_check);
        let mut movement = Schedule::default();
        movement.add_systems(movement_controller);
        let mut post = Schedule::default();
        post.add_systems((animation, clear_proximity).chain());
        let mut physics = Schedule::default();
        physics.add_systems((movement_system, zone_contacts).chain());

        Self {
            descriptor,
            world,
            listeners: FrameListeners::new(),
            player: None,
            zones: Vec::new(),
            pre,
            interaction,
            movement,
            post,
            physics,
        }
    }

    pub fn descriptor(&self) -> &SceneDescriptor {
        &self.descriptor
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn state(&self) -> SceneStates {
        self.world.resource::<SceneState>().get()
    }

    pub fn player(&self) -> Option<Entity> {
        self.player
    }

    pub fn player_position(&self) -> Option<Vec2> {
        self.player
            .and_then(|p| self.world.get::<MapPosition>(p))
            .map(|p| p.pos)
    }

    pub fn player_velocity(&self) -> Option<Vec2> {
        self.player
            .and_then(|p| self.world.get::<RigidBody>(p))
            .map(RigidBody::velocity)
    }

    pub fn player_motion(&self) -> Option<PlayerMotion> {
        self.player
            .and_then(|p| self.world.get::<PlayerMotion>(p))
            .copied()
    }

    pub fn player_animation(&self) -> Option<&str> {
        self.player
            .and_then(|p| self.world.get::<Animation>(p))
            .map(|a| a.animation_key.as_str())
    }

    /// Sprite sheet cell the player's current animation frame is drawn from.
    pub fn player_sheet_frame(&self) -> Option<usize> {
        let animation = self.player.and_then(|p| self.world.get::<Animation>(p))?;
        self.world
            .get_resource::<AnimationStore>()?
            .get(&animation.animation_key)
            .map(|resource| resource.sheet_frame(animation.frame_index))
    }

    pub fn zone_entity(&self, tag: &str) -> Option<Entity> {
        self.zones.iter().copied().find(|&e| {
            self.world
                .get::<TriggerZone>(e)
                .is_some_and(|z| z.tag == tag)
        })
    }

    pub fn zone(&self, tag: &str) -> Option<&TriggerZone> {
        self.zone_entity(tag)
            .and_then(|e| self.world.get::<TriggerZone>(e))
    }

    /// Whether a door hand-off is scheduled but has not fired yet.
    pub fn handoff_scheduled(&self) -> bool {
        self.zones.iter().any(|&e| {
            self.world
                .get::<Timer>(e)
                .is_some_and(|t| matches!(t.action, TimerAction::SceneHandoff { .. }))
        })
    }

    pub fn overlay(&self) -> Option<&NoteOverlay> {
        let mut query = self.world.try_query::<&NoteOverlay>()?;
        query.iter(&self.world).next()
    }

    pub fn overlay_open(&self) -> bool {
        self.overlay().is_some()
    }

    /// Overlay elements in draw order.
    pub fn overlay_elements(&self) -> Vec<&OverlayElement> {
        let Some(mut query) = self.world.try_query::<&OverlayElement>() else {
            return Vec::new();
        };
        let mut elements: Vec<&OverlayElement> = query.iter(&self.world).collect();
        elements.sort_by_key(|e| e.depth);
        elements
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Take every audio command written since the last call.
    pub fn drain_audio(&mut self) -> Vec<AudioCmd> {
        drain_audio_cmds(&mut self.world)
    }

    pub fn active_music(&self) -> &ActiveMusic {
        self.world.resource::<ActiveMusic>()
    }

    /// Drop a hand-off the driver could not honor and stay in this scene.
    pub fn cancel_handoff(&mut self) {
        self.world.resource_mut::<NextScene>().take();
        let mut state = self.world.resource_mut::<SceneState>();
        if state.get() == SceneStates::Exiting {
            state.set(SceneStates::Active);
        }
    }

    /// Reference physics pass: move the player by its current velocity
    /// against the room geometry and collect zone overlaps. The result is the
    /// tick to feed into [`Scene::on_update`] for the same frame.
    pub fn physics_step(&mut self, dt: f32, keys: KeySet, touch: Option<TouchControls>) -> FrameTick {
        self.world.resource_mut::<PhysicsStep>().dt = dt;
        self.physics.run(&mut self.world);
        FrameTick {
            dt,
            keys,
            touch,
            player_position: self.player_position(),
            overlaps: self.world.resource::<ZoneOverlaps>().zones.clone(),
        }
    }

    fn apply_tick(&mut self, tick: &FrameTick) {
        self.world.resource_mut::<KeyboardState>().apply(tick.keys);
        match tick.touch {
            Some(touch) => self.world.insert_resource(touch),
            None => {
                self.world.remove_resource::<TouchControls>();
            }
        }
        if let (Some(pos), Some(player)) = (tick.player_position, self.player)
            && let Some(mut position) = self.world.get_mut::<MapPosition>(player)
        {
            position.pos = pos;
        }
        let overlaps: SmallVec<[Entity; 4]> = tick
            .overlaps
            .iter()
            .copied()
            .filter(|e| self.zones.contains(e))
            .collect();
        self.world.resource_mut::<ZoneOverlaps>().zones = overlaps;
    }

    fn spawn_player(&mut self, facing: Direction) -> Entity {
        let speed = self.world.resource::<GameConfig>().speed;
        let spawn = self.descriptor.spawn_point();
        self.world
            .spawn((
                Player,
                PlayerMotion::new(speed).facing(facing),
                MapPosition::from_vec(spawn),
                RigidBody::new(),
                footprint(),
                Animation::new(MotionState::Idle(facing).animation_key()),
            ))
            .id()
    }
}

impl Scene for SceneController {
    fn name(&self) -> &str {
        &self.descriptor.name
    }

    fn on_enter(&mut self, entry: SceneEntry) {
        self.world.insert_resource(entry.music);
        self.zones = self
            .descriptor
            .resolve_zones()
            .into_iter()
            .map(|zone| self.world.spawn(zone).id())
            .collect();
        let facing = entry.facing.unwrap_or_default();
        self.player = Some(self.spawn_player(facing));
        start_scene_music(&mut self.world, self.descriptor.music.as_ref());
        self.world.resource_mut::<SceneState>().set(SceneStates::Active);
        info!(
            "Entered scene '{}' at {:?} facing {}, {} zone(s)",
            self.descriptor.name,
            self.player_position().unwrap_or_default(),
            facing.as_str(),
            self.zones.len()
        );
    }

    fn on_update(&mut self, tick: &FrameTick) -> SceneFlow {
        if self.state() != SceneStates::Active {
            debug!("Frame for inactive scene '{}' ignored", self.descriptor.name);
            return SceneFlow::Continue;
        }
        update_world_time(&mut self.world, tick.dt);
        self.apply_tick(tick);
        self.pre.run(&mut self.world);

        if !self.listeners.is_empty() {
            self.listeners.dispatch(&mut self.world);
        } else {
            self.interaction.run(&mut self.world);
            let request = self.world.resource_mut::<PendingInteraction>().take();
            match request {
                Some(request) => {
                    let root = open_overlay(&mut self.world, &request);
                    self.listeners.push(Box::new(OverlayCloseCheck::new(root)));
                }
                None => self.movement.run(&mut self.world),
            }
        }

        self.post.run(&mut self.world);
        self.world.clear_trackers();

        match self.world.resource_mut::<NextScene>().take() {
            Some(destination) => {
                self.world.resource_mut::<SceneState>().set(SceneStates::Exiting);
                SceneFlow::Handoff(destination)
            }
            None => SceneFlow::Continue,
        }
    }

    fn on_exit(&mut self) -> SceneExit {
        self.listeners.clear();
        self.world.resource_mut::<SceneState>().set(SceneStates::Exited);
        let facing = self.player_motion().map(|m| m.facing).unwrap_or_default();
        info!("Leaving scene '{}'", self.descriptor.name);
        SceneExit {
            facing,
            music: self.active_music().clone(),
        }
    }
}
