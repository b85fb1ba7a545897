//! roomwalk entry point.
//!
//! Built on:
//! - **bevy_ecs** for the per-room entity-component-system worlds
//! - **raylib** (feature `desktop`) for windowing, drawing and audio
//!
//! Without the `desktop` feature the binary replays a recorded input script
//! headlessly and prints where the player ended up.
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --script assets/scripts/walkthrough.json
//! cargo run --release --features desktop -- --window
//! ```

use std::path::PathBuf;

use clap::Parser;
use log::{error, info, warn};

use roomwalk::game::GameAssets;
use roomwalk::resources::audio::AudioBridge;
use roomwalk::resources::gameconfig::GameConfig;
use roomwalk::scene::director::SceneDirector;
use roomwalk::scene::{Scene, SceneFlow};
use roomwalk::script::InputScript;
use roomwalk::systems::audio::logging_audio_thread;

const DEFAULT_SCRIPT: &str = "assets/scripts/walkthrough.json";

/// Two rooms, a door and a note.
#[derive(Parser)]
#[command(version, about = "Top-down room exploration")]
struct Cli {
    /// Configuration file.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// Scene to start in, overriding the configuration.
    #[arg(long, value_name = "NAME")]
    start_scene: Option<String>,

    /// Input script to replay headlessly.
    #[arg(long, value_name = "PATH")]
    script: Option<PathBuf>,

    /// Open a window instead of replaying a script.
    #[cfg(feature = "desktop")]
    #[arg(long)]
    window: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = GameConfig::with_path(cli.config.clone());
    if let Err(e) = config.load_from_file() {
        warn!("{}, using defaults", e);
    }
    if let Some(start) = cli.start_scene {
        config.start_scene = start;
    }

    let assets = match GameAssets::load(&config) {
        Ok(assets) => assets,
        Err(e) => {
            error!("{e}");
            std::process::exit(1);
        }
    };

    #[cfg(feature = "desktop")]
    if cli.window {
        if let Err(e) = roomwalk::desktop::run(assets, config) {
            error!("{e}");
            std::process::exit(1);
        }
        return;
    }

    let script_path = cli.script.unwrap_or_else(|| PathBuf::from(DEFAULT_SCRIPT));
    let script = match InputScript::load_from_file(&script_path) {
        Ok(script) => script,
        Err(e) => {
            error!("Failed to load script {}: {}", script_path.display(), e);
            std::process::exit(1);
        }
    };

    let mut director = match SceneDirector::new(assets, config) {
        Ok(director) => director.with_audio(AudioBridge::spawn(logging_audio_thread)),
        Err(e) => {
            error!("{e}");
            std::process::exit(1);
        }
    };

    info!(
        "Replaying {} frame(s) from {}",
        script.frame_count(),
        script_path.display()
    );
    let mut overlay_was_open = false;
    for frame in script.expanded() {
        if let SceneFlow::Handoff(destination) = director.frame(frame.dt, frame.keys, frame.touch) {
            info!("Now in '{}'", destination);
        }
        let overlay_open = director.current().overlay_open();
        if overlay_open != overlay_was_open {
            info!("Overlay {}", if overlay_open { "opened" } else { "closed" });
            overlay_was_open = overlay_open;
        }
    }

    let scene = director.current();
    let position = scene.player_position().unwrap_or_default();
    println!(
        "scene={} position=({:.1}, {:.1}) animation={} overlay_open={} frames={} handoffs={}",
        scene.name(),
        position.x,
        position.y,
        scene.player_animation().unwrap_or("-"),
        scene.overlay_open(),
        director.frames(),
        director.handoffs()
    );
    director.shutdown();
}
