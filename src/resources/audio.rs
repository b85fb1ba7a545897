//! Bridge between the scene worlds and the background audio thread.
//!
//! Scene systems write [`AudioCmd`] messages into their own world. The
//! [`SceneDirector`](crate::scene::director::SceneDirector) drains them after
//! every frame and forwards them through the [`AudioBridge`], which owns the
//! channels and the thread handle. Use [`AudioBridge::spawn`] once at startup
//! with the backend of choice and [`AudioBridge::shutdown`] during teardown
//! to stop the thread and free audio resources.

use bevy_ecs::prelude::Resource;
use crossbeam_channel::{Receiver, Sender, unbounded};
use log::warn;

use crate::events::audio::{AudioCmd, AudioMessage};

/// Shared bridge between the game thread and the audio thread.
pub struct AudioBridge {
    /// Sender for [`AudioCmd`] messages (game -> audio thread).
    pub tx_cmd: Sender<AudioCmd>,
    /// Receiver for [`AudioMessage`] messages (audio thread -> game).
    pub rx_msg: Receiver<AudioMessage>,
    /// Join handle for the background audio thread.
    handle: Option<std::thread::JoinHandle<()>>,
}

impl AudioBridge {
    /// Create the command/message channels and spawn `backend` on its own
    /// thread.
    pub fn spawn<F>(backend: F) -> Self
    where
        F: FnOnce(Receiver<AudioCmd>, Sender<AudioMessage>) + Send + 'static,
    {
        let (tx_cmd, rx_cmd) = unbounded::<AudioCmd>();
        let (tx_msg, rx_msg) = unbounded::<AudioMessage>();

        let handle = std::thread::spawn(move || backend(rx_cmd, tx_msg));

        AudioBridge {
            tx_cmd,
            rx_msg,
            handle: Some(handle),
        }
    }

    /// Queue a command for the audio thread. Send errors mean the thread is
    /// gone, which only happens during shutdown.
    pub fn send(&self, cmd: AudioCmd) {
        let _ = self.tx_cmd.send(cmd);
    }

    /// Non-blocking drain of everything the audio thread reported.
    pub fn poll(&self) -> Vec<AudioMessage> {
        self.rx_msg.try_iter().collect()
    }

    /// Request shutdown of the audio thread and join it.
    pub fn shutdown(&mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = self.tx_cmd.send(AudioCmd::Shutdown);
            if handle.join().is_err() {
                warn!("Audio thread panicked during shutdown");
            }
        }
    }
}

impl Drop for AudioBridge {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Music track currently playing, if any.
///
/// Carried from one scene world to the next so a room only starts its music
/// when it is not already running.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveMusic {
    pub id: Option<String>,
}

impl ActiveMusic {
    pub fn is_playing(&self, id: &str) -> bool {
        self.id.as_deref() == Some(id)
    }
}
