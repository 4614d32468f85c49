mod audio;
mod canvas;
mod config;
mod input;
mod metrics;
mod runner;
mod scheduler;
mod screen;

pub use audio::{AudioClip, SoundTrigger};
pub use canvas::{Canvas, Rgba, BLACK, WHITE};
pub use config::{ConfigError, GameConfig};
pub use input::{key_from_physical, InputLatch, Key};
pub use metrics::{LoopMetricsSnapshot, MetricsAccumulator};
pub use runner::{run_app, AppError, FrameOutcome, GameLoop};
pub use scheduler::{FixedStepScheduler, TickPlan};
pub use screen::{
    Screen, ScreenCommand, ScreenError, ScreenRegistry, TickContext, TransitionGuard,
};
