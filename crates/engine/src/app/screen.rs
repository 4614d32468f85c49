//! Screen dispatch.
//!
//! Exactly one screen is active at any time. The registry resolves the
//! active screen on every call, so the update/draw pair the loop runs can
//! never go stale, even when a transition happens between two catch-up
//! steps of the same frame.
//!
//! Screens cannot reach back into the registry that owns them, so they
//! request transitions by returning a [`ScreenCommand`] from `update`; the
//! loop applies it before the next step runs.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::info;

use super::canvas::Canvas;
use super::config::GameConfig;
use super::input::InputLatch;

/// Per-step view handed to `update`. `input_suppressed` mirrors the
/// transition cooldown; consulting it is the screen's choice.
pub struct TickContext<'a> {
    pub now: Instant,
    pub input: &'a InputLatch,
    pub input_suppressed: bool,
    pub config: &'a GameConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenCommand<K> {
    None,
    ChangeTo(K),
}

pub trait Screen<K, W> {
    /// Runs synchronously on every transition to this screen, before any
    /// `update`, including when the screen transitions to itself.
    fn init(&mut self, world: &mut W);

    fn update(&mut self, world: &mut W, ctx: &TickContext<'_>) -> ScreenCommand<K>;

    fn draw(&mut self, world: &W, canvas: &mut Canvas);
}

/// Cooldown armed on every transition. Suppresses the keypress that caused
/// a transition from being re-read as fresh input by the incoming screen.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransitionGuard {
    active_until: Option<Instant>,
}

impl TransitionGuard {
    pub fn armed(now: Instant, cooldown: Duration) -> Self {
        Self {
            active_until: Some(now + cooldown),
        }
    }

    pub fn is_active(&self, now: Instant) -> bool {
        self.active_until.is_some_and(|until| now < until)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ScreenError<K: fmt::Debug> {
    #[error("no screen registered for key {0:?}")]
    UnknownScreen(K),
    #[error("no active screen; change_to must run during bring-up")]
    NoActiveScreen,
}

pub struct ScreenRegistry<K, W> {
    screens: HashMap<K, Box<dyn Screen<K, W>>>,
    active: Option<K>,
    input_cooldown: Duration,
    guard: TransitionGuard,
}

impl<K, W> ScreenRegistry<K, W>
where
    K: Copy + Eq + Hash + fmt::Debug,
{
    pub fn new(input_cooldown: Duration) -> Self {
        Self {
            screens: HashMap::new(),
            active: None,
            input_cooldown,
            guard: TransitionGuard::default(),
        }
    }

    pub fn register(&mut self, key: K, screen: Box<dyn Screen<K, W>>) {
        self.screens.insert(key, screen);
    }

    pub fn active(&self) -> Option<K> {
        self.active
    }

    /// Makes `key` the active screen: arms the input cooldown, runs the
    /// incoming screen's `init` exactly once, then rebinds dispatch. An
    /// unregistered key is a contract violation and fails here rather than
    /// at the next frame.
    pub fn change_to(&mut self, key: K, world: &mut W, now: Instant) -> Result<(), ScreenError<K>> {
        let Some(screen) = self.screens.get_mut(&key) else {
            return Err(ScreenError::UnknownScreen(key));
        };
        self.guard = TransitionGuard::armed(now, self.input_cooldown);
        screen.init(world);
        self.active = Some(key);
        info!(screen = ?key, "screen_changed");
        Ok(())
    }

    /// Advisory: true while the post-transition cooldown is running.
    pub fn input_cooldown_active(&self, now: Instant) -> bool {
        self.guard.is_active(now)
    }

    pub fn update_active(
        &mut self,
        world: &mut W,
        ctx: &TickContext<'_>,
    ) -> Result<ScreenCommand<K>, ScreenError<K>> {
        let key = self.active.ok_or(ScreenError::NoActiveScreen)?;
        let Some(screen) = self.screens.get_mut(&key) else {
            return Err(ScreenError::UnknownScreen(key));
        };
        Ok(screen.update(world, ctx))
    }

    pub fn draw_active(&mut self, world: &W, canvas: &mut Canvas) -> Result<(), ScreenError<K>> {
        let key = self.active.ok_or(ScreenError::NoActiveScreen)?;
        let Some(screen) = self.screens.get_mut(&key) else {
            return Err(ScreenError::UnknownScreen(key));
        };
        screen.draw(world, canvas);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum TestKey {
        First,
        Second,
    }

    /// Shared scratchpad the test screens write call traces into.
    #[derive(Debug, Default)]
    struct Trace {
        events: Vec<&'static str>,
    }

    struct TraceScreen {
        init_label: &'static str,
        update_label: &'static str,
    }

    impl TraceScreen {
        fn new(init_label: &'static str, update_label: &'static str) -> Self {
            Self {
                init_label,
                update_label,
            }
        }
    }

    impl Screen<TestKey, Trace> for TraceScreen {
        fn init(&mut self, world: &mut Trace) {
            world.events.push(self.init_label);
        }

        fn update(&mut self, world: &mut Trace, _ctx: &TickContext<'_>) -> ScreenCommand<TestKey> {
            world.events.push(self.update_label);
            ScreenCommand::None
        }

        fn draw(&mut self, _world: &Trace, _canvas: &mut Canvas) {}
    }

    fn registry() -> ScreenRegistry<TestKey, Trace> {
        let mut registry = ScreenRegistry::new(Duration::from_millis(200));
        registry.register(
            TestKey::First,
            Box::new(TraceScreen::new("first.init", "first.update")),
        );
        registry.register(
            TestKey::Second,
            Box::new(TraceScreen::new("second.init", "second.update")),
        );
        registry
    }

    fn ctx<'a>(
        now: Instant,
        input: &'a InputLatch,
        config: &'a GameConfig,
        suppressed: bool,
    ) -> TickContext<'a> {
        TickContext {
            now,
            input,
            input_suppressed: suppressed,
            config,
        }
    }

    #[test]
    fn change_to_runs_init_before_any_update() {
        let mut registry = registry();
        let mut world = Trace::default();
        let now = Instant::now();
        let input = InputLatch::new();
        let config = GameConfig::default();

        registry
            .change_to(TestKey::First, &mut world, now)
            .expect("change_to");
        registry
            .update_active(&mut world, &ctx(now, &input, &config, false))
            .expect("update");

        assert_eq!(world.events, vec!["first.init", "first.update"]);
    }

    #[test]
    fn transitions_run_inits_in_order_and_rebind_dispatch() {
        let mut registry = registry();
        let mut world = Trace::default();
        let now = Instant::now();
        let input = InputLatch::new();
        let config = GameConfig::default();

        registry
            .change_to(TestKey::First, &mut world, now)
            .expect("first");
        registry
            .change_to(TestKey::Second, &mut world, now)
            .expect("second");
        registry
            .update_active(&mut world, &ctx(now, &input, &config, false))
            .expect("update");

        assert_eq!(
            world.events,
            vec!["first.init", "second.init", "second.update"]
        );
        assert_eq!(registry.active(), Some(TestKey::Second));
    }

    #[test]
    fn reentering_the_active_screen_reruns_init() {
        let mut registry = registry();
        let mut world = Trace::default();
        let now = Instant::now();

        registry
            .change_to(TestKey::First, &mut world, now)
            .expect("first");
        registry
            .change_to(TestKey::First, &mut world, now)
            .expect("again");

        assert_eq!(world.events, vec!["first.init", "first.init"]);
    }

    #[test]
    fn unknown_key_fails_fast_without_touching_state() {
        let mut registry: ScreenRegistry<TestKey, Trace> =
            ScreenRegistry::new(Duration::from_millis(200));
        registry.register(
            TestKey::First,
            Box::new(TraceScreen::new("first.init", "first.update")),
        );
        let mut world = Trace::default();
        let now = Instant::now();

        let err = registry
            .change_to(TestKey::Second, &mut world, now)
            .expect_err("unknown key");
        assert_eq!(err, ScreenError::UnknownScreen(TestKey::Second));
        assert!(world.events.is_empty());
        assert_eq!(registry.active(), None);
        assert!(!registry.input_cooldown_active(now));
    }

    #[test]
    fn update_without_active_screen_is_an_error() {
        let mut registry = registry();
        let mut world = Trace::default();
        let now = Instant::now();
        let input = InputLatch::new();
        let config = GameConfig::default();

        let err = registry
            .update_active(&mut world, &ctx(now, &input, &config, false))
            .expect_err("no active screen");
        assert_eq!(err, ScreenError::NoActiveScreen);
    }

    #[test]
    fn cooldown_is_active_within_window_and_expires_after() {
        let mut registry = registry();
        let mut world = Trace::default();
        let now = Instant::now();

        registry
            .change_to(TestKey::First, &mut world, now)
            .expect("change_to");
        assert!(registry.input_cooldown_active(now));
        assert!(registry.input_cooldown_active(now + Duration::from_millis(199)));
        assert!(!registry.input_cooldown_active(now + Duration::from_millis(200)));
    }

    #[test]
    fn guard_rearms_on_every_transition() {
        let mut registry = registry();
        let mut world = Trace::default();
        let base = Instant::now();

        registry
            .change_to(TestKey::First, &mut world, base)
            .expect("first");
        let later = base + Duration::from_millis(500);
        registry
            .change_to(TestKey::Second, &mut world, later)
            .expect("second");
        assert!(registry.input_cooldown_active(later + Duration::from_millis(100)));
    }
}
