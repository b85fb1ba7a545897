//! Raylib window driver.
//!
//! Polls the keyboard (arrows or WASD, Space or Enter for action), runs one
//! director frame per rendered frame and draws the room as debug shapes:
//! room bounds, solid rectangles, trigger zones, the player footprint and,
//! on top, the note overlay elements.
use raylib::prelude::*;

use crate::components::boxcollider::BoxCollider;
use crate::components::mapposition::MapPosition;
use crate::components::overlay::OverlayElement;
use crate::components::player::Direction;
use crate::components::triggerzone::ZoneAction;
use crate::game::GameAssets;
use crate::resources::audio::AudioBridge;
use crate::resources::gameconfig::GameConfig;
use crate::resources::input::KeySet;
use crate::resources::scenedescriptor::SceneGeometry;
use crate::scene::director::SceneDirector;
use crate::scene::Scene;
use crate::systems::audio::raylib_audio_thread;

fn read_keys(rl: &RaylibHandle) -> KeySet {
    let down = |a: KeyboardKey, b: KeyboardKey| rl.is_key_down(a) || rl.is_key_down(b);
    KeySet {
        up: down(KeyboardKey::KEY_UP, KeyboardKey::KEY_W),
        down: down(KeyboardKey::KEY_DOWN, KeyboardKey::KEY_S),
        left: down(KeyboardKey::KEY_LEFT, KeyboardKey::KEY_A),
        right: down(KeyboardKey::KEY_RIGHT, KeyboardKey::KEY_D),
        action: down(KeyboardKey::KEY_SPACE, KeyboardKey::KEY_ENTER),
    }
}

fn rgba(color: u32, alpha: f32) -> Color {
    Color::new(
        ((color >> 16) & 0xff) as u8,
        ((color >> 8) & 0xff) as u8,
        (color & 0xff) as u8,
        (alpha.clamp(0.0, 1.0) * 255.0) as u8,
    )
}

/// Greedy word wrap on top of explicit line breaks.
fn wrap_lines(text: &str, font_size: i32, width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            let candidate = if line.is_empty() {
                word.to_string()
            } else {
                format!("{line} {word}")
            };
            if !line.is_empty() && measure_text(&candidate, font_size) as f32 > width {
                lines.push(std::mem::replace(&mut line, word.to_string()));
            } else {
                line = candidate;
            }
        }
        lines.push(line);
    }
    lines
}

fn draw_element(d: &mut RaylibDrawHandle, element: &OverlayElement) {
    let color = rgba(element.color, element.alpha);
    match &element.text {
        None => {
            let min = element.center - element.size * 0.5;
            d.draw_rectangle(
                min.x as i32,
                min.y as i32,
                element.size.x as i32,
                element.size.y as i32,
                color,
            );
        }
        Some(text) => {
            let size = element.font_size as i32;
            let lines = match element.wrap_width {
                Some(width) => wrap_lines(text, size, width),
                None => vec![text.clone()],
            };
            let line_height = size + 4;
            let top = element.center.y as i32 - (lines.len() as i32 * line_height) / 2;
            for (i, line) in lines.iter().enumerate() {
                let w = measure_text(line, size);
                d.draw_text(
                    line,
                    element.center.x as i32 - w / 2,
                    top + i as i32 * line_height,
                    size,
                    color,
                );
            }
        }
    }
}

fn draw_scene(d: &mut RaylibDrawHandle, director: &SceneDirector) {
    let scene = director.current();
    let world = scene.world();

    let geometry = world.resource::<SceneGeometry>();
    let b = geometry.bounds;
    d.draw_rectangle(b.x as i32, b.y as i32, b.w as i32, b.h as i32, Color::BEIGE);
    for solid in &geometry.solids {
        d.draw_rectangle(
            solid.x as i32,
            solid.y as i32,
            solid.w as i32,
            solid.h as i32,
            Color::BROWN,
        );
    }

    for tag in scene.descriptor().triggers.iter().map(|t| t.tag.as_str()) {
        let Some(zone) = scene.zone(tag) else {
            continue;
        };
        let color = match zone.action {
            ZoneAction::Door { .. } if zone.is_triggered() => Color::ORANGE,
            ZoneAction::Door { .. } => Color::BLUE,
            ZoneAction::Note { .. } => Color::PURPLE,
        };
        let r = zone.rect;
        d.draw_rectangle_lines(r.x as i32, r.y as i32, r.w as i32, r.h as i32, color);
    }

    if let Some(player) = scene.player()
        && let (Some(pos), Some(collider)) = (
            world.get::<MapPosition>(player),
            world.get::<BoxCollider>(player),
        )
    {
        let r = collider.rect(pos.pos);
        d.draw_rectangle(r.x as i32, r.y as i32, r.w as i32, r.h as i32, Color::DARKGREEN);
        let facing = scene.player_motion().map(|m| m.facing).unwrap_or(Direction::Down);
        let tip = r.center() + facing.unit() * 14.0;
        d.draw_line(
            r.center().x as i32,
            r.center().y as i32,
            tip.x as i32,
            tip.y as i32,
            Color::BLACK,
        );
    }

    for element in scene.overlay_elements() {
        draw_element(d, element);
    }

    let label = format!(
        "{}  {} [{}]",
        scene.name(),
        scene.player_animation().unwrap_or("-"),
        scene.player_sheet_frame().unwrap_or_default()
    );
    d.draw_text(&label, 10, 10, 10, Color::BLACK);
}

/// Open the window and run until it is closed.
pub fn run(assets: GameAssets, config: GameConfig) -> Result<(), String> {
    let (width, height) = config.view_size();
    let target_fps = config.target_fps;

    let mut director =
        SceneDirector::new(assets, config)?.with_audio(AudioBridge::spawn(raylib_audio_thread));

    let (mut rl, thread) = raylib::init()
        .size(width as i32, height as i32)
        .title("roomwalk")
        .build();
    rl.set_target_fps(target_fps);
    rl.set_exit_key(None);

    while !rl.window_should_close() {
        let dt = rl.get_frame_time();
        let keys = read_keys(&rl);
        director.frame(dt, keys, None);

        let mut d = rl.begin_drawing(&thread);
        d.clear_background(Color::DARKGRAY);
        draw_scene(&mut d, &director);
    }

    director.shutdown();
    Ok(())
}
