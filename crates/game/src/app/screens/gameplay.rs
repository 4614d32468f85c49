use engine::{Canvas, InputLatch, Key, Screen, ScreenCommand, TickContext, BLACK};
use tracing::info;

use super::super::world::{drone_controls, GameMode, MatchWorld, ShipControls};
use super::{
    draw_arena, draw_ship, draw_shots, draw_starfield, ScreenId, DRONE_COLOR, SHIP_COLOR,
};

/// Both combat modes share one screen body; the registered instances differ
/// only in which mode they reset the world to and where ship two's intent
/// comes from (second player or drone).
pub(crate) struct GameplayScreen {
    mode: GameMode,
}

impl GameplayScreen {
    pub(crate) fn new(mode: GameMode) -> Self {
        Self { mode }
    }
}

fn wasd_controls(input: &InputLatch) -> ShipControls {
    ShipControls {
        turn: turn_axis(input.is_held(Key::A), input.is_held(Key::D)),
        thrust: input.is_held(Key::W),
        fire: input.is_held(Key::Space),
    }
}

fn arrow_controls(input: &InputLatch) -> ShipControls {
    ShipControls {
        turn: turn_axis(input.is_held(Key::Left), input.is_held(Key::Right)),
        thrust: input.is_held(Key::Up),
        fire: input.is_held(Key::Enter),
    }
}

fn turn_axis(left: bool, right: bool) -> f32 {
    match (left, right) {
        (true, false) => -1.0,
        (false, true) => 1.0,
        _ => 0.0,
    }
}

fn merge_controls(a: ShipControls, b: ShipControls) -> ShipControls {
    ShipControls {
        turn: (a.turn + b.turn).clamp(-1.0, 1.0),
        thrust: a.thrust || b.thrust,
        fire: a.fire || b.fire,
    }
}

impl Screen<ScreenId, MatchWorld> for GameplayScreen {
    fn init(&mut self, world: &mut MatchWorld) {
        world.start_match(self.mode);
        info!(mode = ?self.mode, "match_started");
    }

    fn update(
        &mut self,
        world: &mut MatchWorld,
        ctx: &TickContext<'_>,
    ) -> ScreenCommand<ScreenId> {
        let mut pair = match self.mode {
            // Solo play accepts either control cluster.
            GameMode::Enemy => [
                merge_controls(wasd_controls(ctx.input), arrow_controls(ctx.input)),
                drone_controls(world),
            ],
            GameMode::Versus => [wasd_controls(ctx.input), arrow_controls(ctx.input)],
        };
        if ctx.input_suppressed {
            // The keypress that started this round must not fire a shot on
            // the first frames.
            pair[0].fire = false;
            pair[1].fire = false;
        }

        let dt = 1.0 / ctx.config.target_tps as f32;
        if let Some(winner) = world.step(dt, pair, ctx.now) {
            info!(winner = ?winner, mode = ?self.mode, "match_over");
            return ScreenCommand::ChangeTo(ScreenId::GameOver);
        }
        ScreenCommand::None
    }

    fn draw(&mut self, world: &MatchWorld, canvas: &mut Canvas) {
        canvas.clear(BLACK);
        draw_starfield(canvas, 0);
        draw_arena(canvas, world.arena_radius);
        draw_ship(canvas, &world.ships[0], SHIP_COLOR);
        draw_ship(canvas, &world.ships[1], DRONE_COLOR);
        draw_shots(canvas, &world.shots);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use engine::GameConfig;

    use crate::app::audio::SoundBank;
    use crate::app::world::{PlayerSlot, Shot, Vec2};
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

    fn world() -> MatchWorld {
        MatchWorld::new(330.0, SoundBank::new())
    }

    #[test]
    fn init_resets_the_world_for_its_mode() {
        let mut screen = GameplayScreen::new(GameMode::Versus);
        let mut world = world();
        screen.init(&mut world);
        assert_eq!(world.mode, GameMode::Versus);
        assert_eq!(world.winner, None);
    }

    #[test]
    fn kill_transitions_to_game_over() {
        let mut screen = GameplayScreen::new(GameMode::Versus);
        let mut world = world();
        screen.init(&mut world);
        world.shots.push(Shot {
            position: world.ships[1].position,
            velocity: Vec2::default(),
            ttl: 1.0,
            owner: PlayerSlot::One,
        });
        let config = GameConfig::default();
        let input = InputLatch::new();

        let command = screen.update(&mut world, &ctx(&input, &config, false));
        assert_eq!(command, ScreenCommand::ChangeTo(ScreenId::GameOver));
        assert_eq!(world.winner, Some(PlayerSlot::One));
    }

    #[test]
    fn space_fires_for_player_one_in_versus() {
        let mut screen = GameplayScreen::new(GameMode::Versus);
        let mut world = world();
        screen.init(&mut world);
        let config = GameConfig::default();
        let mut input = InputLatch::new();
        input.press(Key::Space);

        screen.update(&mut world, &ctx(&input, &config, false));
        assert_eq!(world.shots.len(), 1);
        assert_eq!(world.shots[0].owner, PlayerSlot::One);
    }

    #[test]
    fn fire_is_blocked_while_cooldown_active() {
        let mut screen = GameplayScreen::new(GameMode::Versus);
        let mut world = world();
        screen.init(&mut world);
        let config = GameConfig::default();
        let mut input = InputLatch::new();
        input.press(Key::Space);

        screen.update(&mut world, &ctx(&input, &config, true));
        assert!(world.shots.is_empty());
    }

    #[test]
    fn arrows_fire_for_player_two_in_versus() {
        let mut screen = GameplayScreen::new(GameMode::Versus);
        let mut world = world();
        screen.init(&mut world);
        let config = GameConfig::default();
        let mut input = InputLatch::new();
        input.press(Key::Enter);

        screen.update(&mut world, &ctx(&input, &config, false));
        assert_eq!(world.shots.len(), 1);
        assert_eq!(world.shots[0].owner, PlayerSlot::Two);
    }

    #[test]
    fn arrows_also_steer_the_player_in_enemy_mode() {
        let mut screen = GameplayScreen::new(GameMode::Enemy);
        let mut world = world();
        screen.init(&mut world);
        let config = GameConfig::default();
        let mut input = InputLatch::new();
        input.press(Key::Up);

        screen.update(&mut world, &ctx(&input, &config, false));
        // Ship one spawns heading +x; arrow thrust must accelerate it.
        assert!(world.ships[0].velocity.x > 0.0);
    }

    #[test]
    fn opposite_turn_keys_cancel() {
        assert_eq!(turn_axis(true, true), 0.0);
        assert_eq!(turn_axis(true, false), -1.0);
        assert_eq!(turn_axis(false, true), 1.0);
    }
}
