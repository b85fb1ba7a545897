//! Resources used by the note interaction check.

use bevy_ecs::prelude::{Entity, Resource};

use crate::resources::input::EdgeDetector;

/// Action edge as seen by the interaction check.
///
/// Sampled only on frames where no overlay is open, which keeps it apart
/// from the overlay's own close detector.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct InteractionEdge(pub EdgeDetector);

/// A note the player asked to read this frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteRequest {
    pub zone: Entity,
    pub note: String,
}

/// Open request produced by the interaction check and consumed by the scene
/// controller in the same frame.
#[derive(Resource, Debug, Clone, Default)]
pub struct PendingInteraction {
    pub request: Option<NoteRequest>,
}

impl PendingInteraction {
    pub fn take(&mut self) -> Option<NoteRequest> {
        self.request.take()
    }
}
