//! The five screens and their shared drawing vocabulary.
//!
//! Screens draw in a phosphor-green palette onto the engine canvas; the
//! circular arena mask is applied later at presentation, so everything here
//! treats the canvas as a plain rectangle centered on the arena.

mod credits;
mod gameover;
mod gameplay;
mod start;

use std::time::Duration;

use engine::{Canvas, Rgba, ScreenRegistry};

pub(crate) use credits::CreditsScreen;
pub(crate) use gameover::GameOverScreen;
pub(crate) use gameplay::GameplayScreen;
pub(crate) use start::StartScreen;

use super::world::{GameMode, MatchWorld, Ship, Shot, Vec2};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum ScreenId {
    Start,
    Versus,
    Enemy,
    GameOver,
    Credits,
}

pub(crate) const ARENA_COLOR: Rgba = [0, 136, 0, 255];
pub(crate) const SHIP_COLOR: Rgba = [190, 255, 190, 255];
pub(crate) const DRONE_COLOR: Rgba = [255, 196, 120, 255];
pub(crate) const SHOT_COLOR: Rgba = [255, 255, 255, 255];
pub(crate) const STAR_COLOR: Rgba = [60, 140, 60, 255];
pub(crate) const BANNER_COLOR: Rgba = [140, 255, 140, 255];

pub(crate) fn build_registry(
    input_cooldown: Duration,
) -> ScreenRegistry<ScreenId, MatchWorld> {
    let mut registry = ScreenRegistry::new(input_cooldown);
    registry.register(ScreenId::Start, Box::new(StartScreen::new()));
    registry.register(
        ScreenId::Versus,
        Box::new(GameplayScreen::new(GameMode::Versus)),
    );
    registry.register(
        ScreenId::Enemy,
        Box::new(GameplayScreen::new(GameMode::Enemy)),
    );
    registry.register(ScreenId::GameOver, Box::new(GameOverScreen::new()));
    registry.register(ScreenId::Credits, Box::new(CreditsScreen::new()));
    registry
}

/// World coordinates are centered on the arena; the canvas origin is its
/// top-left corner.
pub(crate) fn to_canvas(canvas: &Canvas, position: Vec2) -> (i32, i32) {
    (
        (canvas.width() as f32 / 2.0 + position.x).round() as i32,
        (canvas.height() as f32 / 2.0 + position.y).round() as i32,
    )
}

pub(crate) fn draw_arena(canvas: &mut Canvas, arena_radius: f32) {
    let cx = canvas.width() as i32 / 2;
    let cy = canvas.height() as i32 / 2;
    canvas.draw_circle(cx, cy, arena_radius.round() as i32, ARENA_COLOR);
}

/// Fixed pseudo-random star pattern; `scroll` shifts it vertically so the
/// credits screen can drift it.
pub(crate) fn draw_starfield(canvas: &mut Canvas, scroll: i32) {
    let width = canvas.width() as i32;
    let height = canvas.height() as i32;
    let mut state: u32 = 0x9e37_79b9;
    for _ in 0..70 {
        state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        let x = ((state >> 16) as i32).rem_euclid(width);
        let y = ((state & 0xffff) as i32 + scroll).rem_euclid(height);
        canvas.set_pixel(x, y, STAR_COLOR);
    }
}

pub(crate) fn draw_ship(canvas: &mut Canvas, ship: &Ship, color: Rgba) {
    if !ship.alive {
        return;
    }
    let (cos, sin) = (ship.heading.cos(), ship.heading.sin());
    let nose = Vec2 {
        x: ship.position.x + cos * 12.0,
        y: ship.position.y + sin * 12.0,
    };
    let left = Vec2 {
        x: ship.position.x + (ship.heading + 2.5).cos() * 9.0,
        y: ship.position.y + (ship.heading + 2.5).sin() * 9.0,
    };
    let right = Vec2 {
        x: ship.position.x + (ship.heading - 2.5).cos() * 9.0,
        y: ship.position.y + (ship.heading - 2.5).sin() * 9.0,
    };
    let (nx, ny) = to_canvas(canvas, nose);
    let (lx, ly) = to_canvas(canvas, left);
    let (rx, ry) = to_canvas(canvas, right);
    canvas.draw_line(nx, ny, lx, ly, color);
    canvas.draw_line(lx, ly, rx, ry, color);
    canvas.draw_line(rx, ry, nx, ny, color);
}

pub(crate) fn draw_shots(canvas: &mut Canvas, shots: &[Shot]) {
    for shot in shots {
        let (x, y) = to_canvas(canvas, shot.position);
        canvas.fill_rect(x - 1, y - 1, 2, 2, SHOT_COLOR);
    }
}
