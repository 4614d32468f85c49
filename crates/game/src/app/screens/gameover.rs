use engine::{Canvas, Key, Screen, ScreenCommand, TickContext, BLACK};
use tracing::info;

use super::super::world::{GameMode, MatchWorld, PlayerSlot};
use super::{draw_arena, draw_ship, draw_starfield, ScreenId, BANNER_COLOR, DRONE_COLOR, SHIP_COLOR};

/// Post-match screen: Space restarts the mode that just ended, Enter (or
/// Escape) returns to the start screen.
pub(crate) struct GameOverScreen;

impl GameOverScreen {
    pub(crate) fn new() -> Self {
        Self
    }
}

impl Screen<ScreenId, MatchWorld> for GameOverScreen {
    fn init(&mut self, world: &mut MatchWorld) {
        info!(winner = ?world.winner, mode = ?world.mode, "game_over");
    }

    fn update(
        &mut self,
        world: &mut MatchWorld,
        ctx: &TickContext<'_>,
    ) -> ScreenCommand<ScreenId> {
        if ctx.input_suppressed {
            return ScreenCommand::None;
        }
        if ctx.input.is_held(Key::Space) {
            return ScreenCommand::ChangeTo(match world.mode {
                GameMode::Enemy => ScreenId::Enemy,
                GameMode::Versus => ScreenId::Versus,
            });
        }
        if ctx.input.is_held(Key::Enter) || ctx.input.is_held(Key::Escape) {
            return ScreenCommand::ChangeTo(ScreenId::Start);
        }
        ScreenCommand::None
    }

    fn draw(&mut self, world: &MatchWorld, canvas: &mut Canvas) {
        canvas.clear(BLACK);
        draw_starfield(canvas, 0);
        draw_arena(canvas, world.arena_radius);
        draw_ship(canvas, &world.ships[0], SHIP_COLOR);
        draw_ship(canvas, &world.ships[1], DRONE_COLOR);

        // Winner banner: one or two tally blocks over the survivor.
        let cx = canvas.width() as i32 / 2;
        let cy = canvas.height() as i32 / 2;
        canvas.fill_rect(cx - 70, cy - 100, 140, 8, BANNER_COLOR);
        match world.winner {
            Some(PlayerSlot::One) => {
                canvas.fill_rect(cx - 6, cy - 84, 12, 12, SHIP_COLOR);
            }
            Some(PlayerSlot::Two) => {
                canvas.fill_rect(cx - 16, cy - 84, 12, 12, DRONE_COLOR);
                canvas.fill_rect(cx + 4, cy - 84, 12, 12, DRONE_COLOR);
            }
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use engine::{GameConfig, InputLatch};

    use crate::app::audio::SoundBank;
    use super::*;

    fn ctx<'a>(
        input: &'a InputLatch,
        config: &'a GameConfig,
        suppressed: bool,
    ) -> TickContext<'a> {
        TickContext {
            now: Instant::now(),
            input,
            input_suppressed: suppressed,
            config,
        }
    }

    fn finished_world(mode: GameMode) -> MatchWorld {
        let mut world = MatchWorld::new(330.0, SoundBank::new());
        world.start_match(mode);
        world.winner = Some(PlayerSlot::One);
        world.ships[1].alive = false;
        world
    }

    #[test]
    fn space_restarts_the_mode_that_ended() {
        let mut screen = GameOverScreen::new();
        let config = GameConfig::default();
        let mut input = InputLatch::new();
        input.press(Key::Space);

        let mut enemy_world = finished_world(GameMode::Enemy);
        assert_eq!(
            screen.update(&mut enemy_world, &ctx(&input, &config, false)),
            ScreenCommand::ChangeTo(ScreenId::Enemy)
        );

        let mut versus_world = finished_world(GameMode::Versus);
        assert_eq!(
            screen.update(&mut versus_world, &ctx(&input, &config, false)),
            ScreenCommand::ChangeTo(ScreenId::Versus)
        );
    }

    #[test]
    fn enter_returns_to_start() {
        let mut screen = GameOverScreen::new();
        let config = GameConfig::default();
        let mut input = InputLatch::new();
        input.press(Key::Enter);

        let mut world = finished_world(GameMode::Enemy);
        assert_eq!(
            screen.update(&mut world, &ctx(&input, &config, false)),
            ScreenCommand::ChangeTo(ScreenId::Start)
        );
    }

    #[test]
    fn lingering_fire_key_is_ignored_during_cooldown() {
        let mut screen = GameOverScreen::new();
        let config = GameConfig::default();
        let mut input = InputLatch::new();
        input.press(Key::Space);

        let mut world = finished_world(GameMode::Enemy);
        assert_eq!(
            screen.update(&mut world, &ctx(&input, &config, true)),
            ScreenCommand::None
        );
    }
}
