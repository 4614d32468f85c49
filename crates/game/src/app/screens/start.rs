use engine::{Canvas, Key, Screen, ScreenCommand, TickContext, BLACK};

use super::super::world::{GameMode, MatchWorld};
use super::{draw_arena, draw_ship, draw_starfield, ScreenId, BANNER_COLOR, DRONE_COLOR, SHIP_COLOR};

/// Title/menu screen. 1 or Enter starts a round against the drone, 2 starts
/// a two-player round, C shows the credits.
pub(crate) struct StartScreen {
    pulse: u32,
}

impl StartScreen {
    pub(crate) fn new() -> Self {
        Self { pulse: 0 }
    }
}

impl Screen<ScreenId, MatchWorld> for StartScreen {
    fn init(&mut self, world: &mut MatchWorld) {
        self.pulse = 0;
        // Fresh ships as the attract-mode backdrop.
        world.start_match(GameMode::Enemy);
    }

    fn update(
        &mut self,
        _world: &mut MatchWorld,
        ctx: &TickContext<'_>,
    ) -> ScreenCommand<ScreenId> {
        self.pulse = self.pulse.wrapping_add(1);
        if ctx.input_suppressed {
            return ScreenCommand::None;
        }
        if ctx.input.is_held(Key::Digit1) || ctx.input.is_held(Key::Enter) {
            return ScreenCommand::ChangeTo(ScreenId::Enemy);
        }
        if ctx.input.is_held(Key::Digit2) {
            return ScreenCommand::ChangeTo(ScreenId::Versus);
        }
        if ctx.input.is_held(Key::C) {
            return ScreenCommand::ChangeTo(ScreenId::Credits);
        }
        ScreenCommand::None
    }

    fn draw(&mut self, world: &MatchWorld, canvas: &mut Canvas) {
        canvas.clear(BLACK);
        draw_starfield(canvas, 0);
        draw_arena(canvas, world.arena_radius);
        draw_ship(canvas, &world.ships[0], SHIP_COLOR);
        draw_ship(canvas, &world.ships[1], DRONE_COLOR);

        // Title block and a blinking start prompt.
        let cx = canvas.width() as i32 / 2;
        let cy = canvas.height() as i32 / 2;
        canvas.fill_rect(cx - 60, cy - 90, 120, 10, BANNER_COLOR);
        if (self.pulse / 30) % 2 == 0 {
            canvas.fill_rect(cx - 36, cy + 70, 72, 6, BANNER_COLOR);
        }
    }
}
