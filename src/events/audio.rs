use bevy_ecs::message::Message;

/// Commands sent *to* the audio thread
#[derive(Message, Debug, Clone, PartialEq)]
pub enum AudioCmd {
    LoadMusic { id: String, path: String },
    PlayMusic { id: String, looped: bool, volume: f32 },
    StopMusic { id: String },
    LoadFx { id: String, path: String },
    PlayFx { id: String, volume: f32 },
    Shutdown,
}

/// Messages sent *back* from the audio thread
#[derive(Message, Debug, Clone, PartialEq)]
pub enum AudioMessage {
    MusicLoaded { id: String },
    MusicLoadFailed { id: String, error: String },
    MusicPlayStarted { id: String },
    MusicStopped { id: String },
    FxLoaded { id: String },
    FxLoadFailed { id: String, error: String },
    FxPlayed { id: String },
}
