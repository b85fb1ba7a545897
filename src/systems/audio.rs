//! Audio backends and scene audio helpers.
//!
//! Audio runs on a dedicated thread created through
//! [`AudioBridge::spawn`](crate::resources::audio::AudioBridge::spawn). The
//! thread receives [`AudioCmd`] messages and answers with [`AudioMessage`]s.
//! Two backends exist:
//! - [`logging_audio_thread`] records what would be played. Used by the
//!   headless driver and in tests.
//! - [`raylib_audio_thread`] (feature `desktop`) owns the Raylib audio device
//!   and plays sounds and music for real.
//!
//! Scene systems never talk to the thread directly; they write
//! [`AudioCmd`] messages into their world and the director forwards them.
use bevy_ecs::message::Messages;
use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, Sender};
use log::{debug, info};

use crate::events::audio::{AudioCmd, AudioMessage};
use crate::resources::audio::ActiveMusic;
use crate::resources::gameconfig::GameConfig;
use crate::resources::scenedescriptor::MusicCue;

/// Start the room's music unless that track is already playing.
pub fn start_scene_music(world: &mut World, cue: Option<&MusicCue>) {
    let Some(cue) = cue else {
        return;
    };
    if world.resource::<ActiveMusic>().is_playing(&cue.id) {
        debug!("Music '{}' already playing", cue.id);
        return;
    }
    let volume = cue
        .volume
        .unwrap_or_else(|| world.resource::<GameConfig>().music_volume);
    world.resource_mut::<ActiveMusic>().id = Some(cue.id.clone());
    world
        .resource_mut::<Messages<AudioCmd>>()
        .write(AudioCmd::PlayMusic {
            id: cue.id.clone(),
            looped: cue.looped,
            volume,
        });
}

/// Take every audio command written during the frame.
pub fn drain_audio_cmds(world: &mut World) -> Vec<AudioCmd> {
    match world.get_resource_mut::<Messages<AudioCmd>>() {
        Some(mut messages) => messages.drain().collect(),
        None => Vec::new(),
    }
}

/// Backend that only logs. Answers play requests as if they succeeded so the
/// rest of the game behaves the same with or without a sound device.
pub fn logging_audio_thread(rx_cmd: Receiver<AudioCmd>, tx_msg: Sender<AudioMessage>) {
    debug!(
        "audio thread starting (id={:?})",
        std::thread::current().id()
    );
    for cmd in rx_cmd.iter() {
        match cmd {
            AudioCmd::LoadMusic { id, path } => {
                debug!("[audio] load music id='{}' path='{}'", id, path);
                let _ = tx_msg.send(AudioMessage::MusicLoaded { id });
            }
            AudioCmd::LoadFx { id, path } => {
                debug!("[audio] load fx id='{}' path='{}'", id, path);
                let _ = tx_msg.send(AudioMessage::FxLoaded { id });
            }
            AudioCmd::PlayMusic { id, looped, volume } => {
                info!("[audio] music '{}' looped={} vol={}", id, looped, volume);
                let _ = tx_msg.send(AudioMessage::MusicPlayStarted { id });
            }
            AudioCmd::StopMusic { id } => {
                info!("[audio] stop music '{}'", id);
                let _ = tx_msg.send(AudioMessage::MusicStopped { id });
            }
            AudioCmd::PlayFx { id, volume } => {
                info!("[audio] fx '{}' vol={}", id, volume);
                let _ = tx_msg.send(AudioMessage::FxPlayed { id });
            }
            AudioCmd::Shutdown => {
                debug!("[audio] shutdown requested");
                break;
            }
        }
    }
}

/// Entry point of the Raylib audio thread.
///
/// Owns all `Music` and `Sound` handles so Raylib audio calls stay on one
/// thread. Non-blockingly drains commands, pumps music streams, restarts
/// looped tracks that ended, and sleeps briefly between iterations. Returns
/// when it receives [`AudioCmd::Shutdown`] or the command channel closes.
#[cfg(feature = "desktop")]
pub fn raylib_audio_thread(rx_cmd: Receiver<AudioCmd>, tx_msg: Sender<AudioMessage>) {
    use log::{error, warn};
    use raylib::core::audio::{Music, RaylibAudio, Sound};
    use rustc_hash::{FxHashMap, FxHashSet};

    let audio = match RaylibAudio::init_audio_device() {
        Ok(device) => device,
        Err(e) => {
            error!("Failed to initialize audio device: {}", e);
            // keep draining so senders never block on a dead thread
            for cmd in rx_cmd.iter() {
                if matches!(cmd, AudioCmd::Shutdown) {
                    break;
                }
            }
            return;
        }
    };

    let mut musics: FxHashMap<String, Music> = FxHashMap::default();
    let mut looped: FxHashSet<String> = FxHashSet::default();
    let mut playing: FxHashSet<String> = FxHashSet::default();
    let mut sounds: FxHashMap<String, Sound> = FxHashMap::default();

    'run: loop {
        for cmd in rx_cmd.try_iter() {
            match cmd {
                AudioCmd::LoadMusic { id, path } => match audio.new_music(&path) {
                    Ok(music) => {
                        debug!("[audio] loaded id='{}' path='{}'", id, path);
                        musics.insert(id.clone(), music);
                        let _ = tx_msg.send(AudioMessage::MusicLoaded { id });
                    }
                    Err(e) => {
                        warn!("[audio] load failed id='{}' path='{}': {}", id, path, e);
                        let _ = tx_msg.send(AudioMessage::MusicLoadFailed {
                            id,
                            error: e.to_string(),
                        });
                    }
                },
                AudioCmd::PlayMusic {
                    id,
                    looped: want_loop,
                    volume,
                } => {
                    if let Some(music) = musics.get(&id) {
                        music.set_volume(volume);
                        music.seek_stream(0.0);
                        music.play_stream();
                        playing.insert(id.clone());
                        if want_loop {
                            looped.insert(id.clone());
                        } else {
                            looped.remove(&id);
                        }
                        let _ = tx_msg.send(AudioMessage::MusicPlayStarted { id });
                    }
                }
                AudioCmd::StopMusic { id } => {
                    if let Some(music) = musics.get(&id) {
                        music.stop_stream();
                        playing.remove(&id);
                        looped.remove(&id);
                        let _ = tx_msg.send(AudioMessage::MusicStopped { id });
                    }
                }
                AudioCmd::LoadFx { id, path } => match audio.new_sound(&path) {
                    Ok(sound) => {
                        debug!("[audio] fx loaded id='{}' path='{}'", id, path);
                        sounds.insert(id.clone(), sound);
                        let _ = tx_msg.send(AudioMessage::FxLoaded { id });
                    }
                    Err(e) => {
                        warn!("[audio] fx load failed id='{}' path='{}': {}", id, path, e);
                        let _ = tx_msg.send(AudioMessage::FxLoadFailed {
                            id,
                            error: e.to_string(),
                        });
                    }
                },
                AudioCmd::PlayFx { id, volume } => {
                    if let Some(sound) = sounds.get(&id) {
                        sound.set_volume(volume);
                        sound.play();
                        let _ = tx_msg.send(AudioMessage::FxPlayed { id });
                    } else {
                        debug!("[audio] fx '{}' not loaded", id);
                    }
                }
                AudioCmd::Shutdown => break 'run,
            }
        }

        let mut ended: Vec<String> = Vec::new();
        for id in playing.iter() {
            if let Some(music) = musics.get(id) {
                if music.is_stream_playing() {
                    music.update_stream();
                } else if music.get_time_played() >= music.get_time_length() - 0.01 {
                    ended.push(id.clone());
                }
            }
        }
        for id in ended {
            match musics.get(&id) {
                Some(music) if looped.contains(&id) => {
                    music.seek_stream(0.0);
                    music.play_stream();
                }
                _ => {
                    playing.remove(&id);
                    let _ = tx_msg.send(AudioMessage::MusicStopped { id });
                }
            }
        }
        std::thread::sleep(std::time::Duration::from_millis(10));
    }

    // handles must drop before the device
    musics.clear();
    sounds.clear();
    debug!("[audio] thread exiting");
}
