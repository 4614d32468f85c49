use engine::{Canvas, Key, Screen, ScreenCommand, TickContext, BLACK};

use super::super::world::MatchWorld;
use super::{draw_arena, draw_starfield, ScreenId, BANNER_COLOR};

/// Scrolling credits. Any of the confirm keys returns to the start screen.
pub(crate) struct CreditsScreen {
    scroll: i32,
}

impl CreditsScreen {
    pub(crate) fn new() -> Self {
        Self { scroll: 0 }
    }
}

impl Screen<ScreenId, MatchWorld> for CreditsScreen {
    fn init(&mut self, _world: &mut MatchWorld) {
        self.scroll = 0;
    }

    fn update(
        &mut self,
        _world: &mut MatchWorld,
        ctx: &TickContext<'_>,
    ) -> ScreenCommand<ScreenId> {
        self.scroll = self.scroll.wrapping_add(1);
        if ctx.input_suppressed {
            return ScreenCommand::None;
        }
        if ctx.input.is_held(Key::Enter)
            || ctx.input.is_held(Key::Space)
            || ctx.input.is_held(Key::Escape)
        {
            return ScreenCommand::ChangeTo(ScreenId::Start);
        }
        ScreenCommand::None
    }

    fn draw(&mut self, world: &MatchWorld, canvas: &mut Canvas) {
        canvas.clear(BLACK);
        draw_starfield(canvas, self.scroll / 2);
        draw_arena(canvas, world.arena_radius);

        // Credit lines drift upward and wrap.
        let height = canvas.height() as i32;
        let cx = canvas.width() as i32 / 2;
        for (row, width) in [(0, 120), (1, 90), (2, 104), (3, 70)] {
            let y = (height - self.scroll + row * 28).rem_euclid(height);
            canvas.fill_rect(cx - width / 2, y, width as u32, 6, BANNER_COLOR);
        }
    }
}
