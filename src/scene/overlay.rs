//! Opening and closing the note overlay.
//!
//! [`open_overlay`] spawns the overlay entities, freezes the player and
//! starts the grace timer on the overlay root. The scene then registers an
//! [`OverlayCloseCheck`] listener, which owns the close protocol: after the
//! grace period the first released-to-held action transition closes the
//! overlay and the listener removes itself.
use arrayvec::ArrayVec;
use bevy_ecs::message::Messages;
use bevy_ecs::prelude::*;
use log::{debug, warn};

use crate::components::animation::Animation;
use crate::components::overlay::{NoteOverlay, OverlayLayout};
use crate::components::player::{MotionState, Player, PlayerMotion};
use crate::components::rigidbody::RigidBody;
use crate::components::timer::{Timer, TimerAction};
use crate::events::audio::AudioCmd;
use crate::events::zone::{NoteClosedEvent, NoteOpenedEvent};
use crate::resources::gameconfig::GameConfig;
use crate::resources::input::InputSnapshot;
use crate::resources::interaction::NoteRequest;
use crate::resources::notestore::NoteStore;
use crate::scene::listener::{FrameListener, ListenerControl};

/// Spawn the overlay for `request` and return its root entity.
pub fn open_overlay(world: &mut World, request: &NoteRequest) -> Entity {
    let text = match world.resource::<NoteStore>().get(&request.note) {
        Some(text) => text.to_string(),
        None => {
            warn!("Note '{}' has no text", request.note);
            String::new()
        }
    };
    let config = world.resource::<GameConfig>().clone();
    let action_held = world.resource::<InputSnapshot>().action_held;

    let layout = OverlayLayout::new(config.view_width as f32, config.view_height as f32);
    let mut elements: ArrayVec<Entity, 4> = ArrayVec::new();
    for element in layout.elements(&text) {
        elements.push(world.spawn(element).id());
    }

    let mut overlay = NoteOverlay::new(request.note.clone(), action_held);
    overlay.elements = elements;
    let root = world
        .spawn((
            overlay,
            Timer::new(config.overlay_grace(), TimerAction::OverlayGrace),
        ))
        .id();

    set_player_frozen(world, true);
    play_button(world, &config);
    world.trigger(NoteOpenedEvent {
        zone: request.zone,
        note: request.note.clone(),
    });
    root
}

/// Despawn the overlay rooted at `root` and give control back to the player.
pub fn close_overlay(world: &mut World, root: Entity) {
    let Some(overlay) = world.get::<NoteOverlay>(root).cloned() else {
        debug!("close_overlay on missing overlay {:?}", root);
        return;
    };
    for element in overlay.elements {
        world.despawn(element);
    }
    world.despawn(root);

    set_player_frozen(world, false);
    let config = world.resource::<GameConfig>().clone();
    play_button(world, &config);
    world.trigger(NoteClosedEvent { note: overlay.note });
}

fn set_player_frozen(world: &mut World, frozen: bool) {
    let mut query = world.query_filtered::<(&mut RigidBody, &mut PlayerMotion, &mut Animation), With<Player>>();
    for (mut rigidbody, mut motion, mut animation) in query.iter_mut(world) {
        if frozen {
            rigidbody.freeze();
            motion.state = MotionState::Idle(motion.facing);
            animation.play(motion.state.animation_key());
        } else {
            rigidbody.unfreeze();
        }
    }
}

fn play_button(world: &mut World, config: &GameConfig) {
    world
        .resource_mut::<Messages<AudioCmd>>()
        .write(AudioCmd::PlayFx {
            id: config.button_sound.clone(),
            volume: config.button_volume,
        });
}

/// Listener that watches for the close press of one overlay.
#[derive(Debug, Clone, Copy)]
pub struct OverlayCloseCheck {
    root: Entity,
}

impl OverlayCloseCheck {
    pub fn new(root: Entity) -> Self {
        Self { root }
    }

    pub fn root(&self) -> Entity {
        self.root
    }
}

impl FrameListener for OverlayCloseCheck {
    fn name(&self) -> &'static str {
        "overlay-close-check"
    }

    fn on_frame(&mut self, world: &mut World) -> ListenerControl {
        let held = world.resource::<InputSnapshot>().action_held;
        let close = match world.get_mut::<NoteOverlay>(self.root) {
            Some(mut overlay) => overlay.poll_close(held),
            None => return ListenerControl::Remove,
        };
        if close {
            close_overlay(world, self.root);
            ListenerControl::Remove
        } else {
            ListenerControl::Keep
        }
    }
}
