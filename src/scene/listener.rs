//! Per-frame listeners owned by a scene.
//!
//! While any listener is registered the scene dispatches the frame to the
//! listeners instead of running the movement controller. A listener removes
//! itself by returning [`ListenerControl::Remove`].
use bevy_ecs::prelude::World;
use log::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerControl {
    Keep,
    Remove,
}

pub trait FrameListener: Send {
    fn name(&self) -> &'static str;
    fn on_frame(&mut self, world: &mut World) -> ListenerControl;
}

#[derive(Default)]
pub struct FrameListeners {
    listeners: Vec<Box<dyn FrameListener>>,
}

impl FrameListeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, listener: Box<dyn FrameListener>) {
        self.listeners.push(listener);
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Run every listener once, in registration order, dropping the ones
    /// that asked to be removed.
    pub fn dispatch(&mut self, world: &mut World) {
        self.listeners.retain_mut(|listener| match listener.on_frame(world) {
            ListenerControl::Keep => true,
            ListenerControl::Remove => {
                debug!("Listener '{}' removed", listener.name());
                false
            }
        });
    }

    pub fn clear(&mut self) {
        self.listeners.clear();
    }
}
