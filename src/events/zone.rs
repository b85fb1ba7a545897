//! Trigger zone and note events.
//!
//! These are notifications for anything that wants to react to zone activity
//! without being part of the frame protocol. The scene registers the logging
//! observers below; tests attach their own to count firings.
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::info;

/// A door zone latched and scheduled its hand-off.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct DoorEnteredEvent {
    pub zone: Entity,
    pub tag: String,
    pub destination: String,
}

/// A note overlay opened.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct NoteOpenedEvent {
    pub zone: Entity,
    pub note: String,
}

/// A note overlay closed after a confirmed close press.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct NoteClosedEvent {
    pub note: String,
}

pub fn observe_door_entered(trigger: On<DoorEnteredEvent>) {
    let event = trigger.event();
    info!(
        "Door '{}' entered, leaving for '{}'",
        event.tag, event.destination
    );
}

pub fn observe_note_opened(trigger: On<NoteOpenedEvent>) {
    info!("Reading note '{}'", trigger.event().note);
}

pub fn observe_note_closed(trigger: On<NoteClosedEvent>) {
    info!("Closed note '{}'", trigger.event().note);
}
