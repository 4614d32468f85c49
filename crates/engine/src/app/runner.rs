//! Loop bring-up and frame driving.
//!
//! [`GameLoop`] is the frame body: one call plans the due simulation steps,
//! runs the active screen's update for each, applies any requested screen
//! transition between steps, and draws once if anything stepped. It takes
//! `now` as a parameter and owns no timing source, so it runs identically
//! under the windowed driver, the interval fallback, and tests.
//!
//! The driver strategy is picked once at startup: if the host can create an
//! event loop, frames ride `RedrawRequested` (one callback per display
//! refresh opportunity); otherwise the fallback calls the frame body on a
//! fixed wall-clock interval derived from the target tick rate. Neither
//! driver has a stop surface; a frame error ends scheduling and propagates.

use std::fmt;
use std::hash::Hash;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use pixels::{Pixels, SurfaceTexture};
use thiserror::Error;
use tracing::{info, warn};
use winit::dpi::LogicalSize;
use winit::error::{EventLoopError, OsError};
use winit::event::{ElementState, Event, KeyEvent, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::{Window, WindowBuilder};

use super::canvas::Canvas;
use super::config::{ConfigError, GameConfig};
use super::input::{key_from_physical, InputLatch, Key};
use super::metrics::MetricsAccumulator;
use super::scheduler::FixedStepScheduler;
use super::screen::{ScreenCommand, ScreenError, ScreenRegistry, TickContext};

const MASK_COLOR: [u8; 4] = [0, 0, 0, 255];

#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("screen dispatch failed: {0}")]
    Screen(String),
    #[error("failed to create application window: {0}")]
    CreateWindow(#[source] OsError),
    #[error("failed to initialize presentation surface: {0}")]
    CreateSurface(#[source] pixels::Error),
    #[error("failed to present frame: {0}")]
    Present(#[source] pixels::Error),
    #[error("event loop failed: {0}")]
    EventLoopRun(#[source] EventLoopError),
}

fn screen_error<K: fmt::Debug>(err: ScreenError<K>) -> AppError {
    AppError::Screen(err.to_string())
}

/// What one frame did, for the driver: how many steps ran and whether the
/// canvas holds a fresh image to present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameOutcome {
    pub steps: u32,
    pub drew: bool,
}

pub struct GameLoop<K, W> {
    config: GameConfig,
    scheduler: FixedStepScheduler,
    registry: ScreenRegistry<K, W>,
    world: W,
    input: InputLatch,
    canvas: Canvas,
    metrics: MetricsAccumulator,
    last_frame: Option<Instant>,
}

impl<K, W> fmt::Debug for GameLoop<K, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameLoop")
            .field("config", &self.config)
            .field("scheduler", &self.scheduler)
            .field("metrics", &self.metrics)
            .finish_non_exhaustive()
    }
}

impl<K, W> GameLoop<K, W>
where
    K: Copy + Eq + Hash + fmt::Debug,
{
    /// Validates the configuration, builds the loop state, and transitions
    /// to the initial screen (running its `init`).
    pub fn new(
        config: GameConfig,
        mut registry: ScreenRegistry<K, W>,
        mut world: W,
        initial_screen: K,
        now: Instant,
    ) -> Result<Self, AppError> {
        config.validate()?;
        registry
            .change_to(initial_screen, &mut world, now)
            .map_err(screen_error)?;
        let scheduler =
            FixedStepScheduler::new(config.step_interval(), config.max_catchup_steps, now);
        let canvas = Canvas::new(config.width, config.height);
        let metrics = MetricsAccumulator::new(config.metrics_log_interval, now);
        Ok(Self {
            config,
            scheduler,
            registry,
            world,
            input: InputLatch::new(),
            canvas,
            metrics,
            last_frame: None,
        })
    }

    /// One frame-driver callback: catch up on due steps, then draw once if
    /// any ran. Screen dispatch failures propagate; the caller must stop
    /// scheduling further frames on error.
    pub fn frame(&mut self, now: Instant) -> Result<FrameOutcome, AppError> {
        let frame_dt = match self.last_frame {
            Some(previous) => now.saturating_duration_since(previous),
            None => Duration::ZERO,
        };
        self.last_frame = Some(now);

        let plan = self.scheduler.tick(now);
        if !plan.dropped_backlog.is_zero() {
            warn!(
                dropped_backlog_ms = plan.dropped_backlog.as_millis() as u64,
                max_catchup_steps = self.config.max_catchup_steps,
                "sim_clamp_triggered"
            );
        }

        for _ in 0..plan.steps {
            let command = {
                let ctx = TickContext {
                    now,
                    input: &self.input,
                    input_suppressed: self.registry.input_cooldown_active(now),
                    config: &self.config,
                };
                self.registry
                    .update_active(&mut self.world, &ctx)
                    .map_err(screen_error)?
            };
            if let ScreenCommand::ChangeTo(next) = command {
                // Applied between steps so the remaining catch-up work of
                // this frame already runs the incoming screen.
                self.registry
                    .change_to(next, &mut self.world, now)
                    .map_err(screen_error)?;
            }
            self.metrics.record_step();
        }

        if plan.should_draw() {
            self.registry
                .draw_active(&self.world, &mut self.canvas)
                .map_err(screen_error)?;
        }

        self.metrics.record_frame(frame_dt);
        if let Some(snapshot) = self.metrics.maybe_snapshot(now) {
            info!(
                fps = snapshot.fps,
                tps = snapshot.tps,
                frame_time_ms = snapshot.frame_time_ms,
                "loop_metrics"
            );
        }

        Ok(FrameOutcome {
            steps: plan.steps,
            drew: plan.should_draw(),
        })
    }

    pub fn handle_key_event(&mut self, event: &KeyEvent) {
        self.apply_key_transition(key_from_physical(event.physical_key), event.state);
    }

    fn apply_key_transition(&mut self, key: Option<Key>, state: ElementState) {
        let Some(key) = key else {
            return;
        };
        match state {
            ElementState::Pressed => self.input.press(key),
            ElementState::Released => self.input.release(key),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn world(&self) -> &W {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut W {
        &mut self.world
    }

    pub fn input_mut(&mut self) -> &mut InputLatch {
        &mut self.input
    }

    pub fn active_screen(&self) -> Option<K> {
        self.registry.active()
    }
}

/// Brings the loop up and hands it to a frame driver. The driver choice is
/// probed exactly once: hosts without an event loop fall back to the
/// fixed-interval driver for the life of the process.
pub fn run_app<K, W>(
    config: GameConfig,
    registry: ScreenRegistry<K, W>,
    world: W,
    initial_screen: K,
) -> Result<(), AppError>
where
    K: Copy + Eq + Hash + fmt::Debug,
{
    let now = Instant::now();
    let mut game = GameLoop::new(config, registry, world, initial_screen, now)?;
    info!(
        target_tps = game.config().target_tps,
        width = game.config().width,
        height = game.config().height,
        arena_radius = game.config().arena_radius,
        max_catchup_steps = game.config().max_catchup_steps,
        "loop_config"
    );

    match EventLoop::new() {
        Ok(event_loop) => run_windowed(event_loop, &mut game),
        Err(err) => {
            warn!(error = %err, "refresh_driver_unavailable_using_interval_fallback");
            run_interval(&mut game)
        }
    }
}

fn run_windowed<K, W>(
    event_loop: EventLoop<()>,
    game: &mut GameLoop<K, W>,
) -> Result<(), AppError>
where
    K: Copy + Eq + Hash + fmt::Debug,
{
    let config = game.config().clone();
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(config.window_title.clone())
            .with_inner_size(LogicalSize::new(config.width as f64, config.height as f64))
            .with_resizable(false)
            .build(&event_loop)
            .map_err(AppError::CreateWindow)?,
    );
    let mut presenter = Presenter::new(Arc::clone(&window), &config)?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut frame_error: Option<AppError> = None;
    let window_id = window.id();
    event_loop
        .run(|event, window_target| match event {
            Event::WindowEvent {
                window_id: id,
                event,
            } if id == window_id => match event {
                WindowEvent::CloseRequested => {
                    info!(reason = "window_close", "shutdown_requested");
                    window_target.exit();
                }
                WindowEvent::Focused(false) => game.input_mut().clear(),
                WindowEvent::KeyboardInput { event, .. } => game.handle_key_event(&event),
                WindowEvent::RedrawRequested => {
                    let now = Instant::now();
                    match game.frame(now) {
                        Ok(outcome) => {
                            if outcome.drew {
                                if let Err(err) = presenter.present(game.canvas()) {
                                    frame_error = Some(err);
                                    window_target.exit();
                                }
                            }
                        }
                        Err(err) => {
                            frame_error = Some(err);
                            window_target.exit();
                        }
                    }
                }
                _ => {}
            },
            Event::AboutToWait => window.request_redraw(),
            _ => {}
        })
        .map_err(AppError::EventLoopRun)?;

    match frame_error {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

fn run_interval<K, W>(game: &mut GameLoop<K, W>) -> Result<(), AppError>
where
    K: Copy + Eq + Hash + fmt::Debug,
{
    let interval = game.config().step_interval();
    info!(
        interval_ms = interval.as_millis() as u64,
        "interval_driver_started"
    );
    loop {
        game.frame(Instant::now())?;
        thread::sleep(interval);
    }
}

/// Copies the canvas to the surface with the circular arena mask applied,
/// then renders. Compositing lives here so the canvas stays a plain
/// rectangle for the screens.
struct Presenter {
    pixels: Pixels<'static>,
    mask: Vec<bool>,
}

impl Presenter {
    fn new(window: Arc<Window>, config: &GameConfig) -> Result<Self, AppError> {
        let surface = SurfaceTexture::new(config.width, config.height, window);
        let pixels = Pixels::new(config.width, config.height, surface)
            .map_err(AppError::CreateSurface)?;
        Ok(Self {
            pixels,
            mask: build_arena_mask(config.width, config.height, config.arena_radius),
        })
    }

    fn present(&mut self, canvas: &Canvas) -> Result<(), AppError> {
        let source = canvas.data();
        let frame = self.pixels.frame_mut();
        for (index, chunk) in frame.chunks_exact_mut(4).enumerate() {
            if self.mask[index] {
                let offset = index * 4;
                chunk.copy_from_slice(&source[offset..offset + 4]);
            } else {
                chunk.copy_from_slice(&MASK_COLOR);
            }
        }
        self.pixels.render().map_err(AppError::Present)
    }
}

/// Per-pixel visibility of the circular play field, centered on the
/// surface. One pixel of slack keeps the drawn arena outline unclipped.
fn build_arena_mask(width: u32, height: u32, arena_radius: u32) -> Vec<bool> {
    let cx = width as f64 / 2.0;
    let cy = height as f64 / 2.0;
    let limit = (arena_radius as f64 + 1.0).powi(2);
    let mut mask = Vec::with_capacity(width as usize * height as usize);
    for y in 0..height {
        for x in 0..width {
            let dx = (x as f64 + 0.5) - cx;
            let dy = (y as f64 + 0.5) - cy;
            mask.push(dx * dx + dy * dy <= limit);
        }
    }
    mask
}
