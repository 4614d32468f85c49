pub mod app;

pub use app::{
    key_from_physical, run_app, AppError, AudioClip, Canvas, ConfigError, FixedStepScheduler,
    FrameOutcome, GameConfig, GameLoop, InputLatch, Key, LoopMetricsSnapshot, MetricsAccumulator,
    Rgba, Screen, ScreenCommand, ScreenError, ScreenRegistry, SoundTrigger, TickContext, TickPlan,
    TransitionGuard, BLACK, WHITE,
};
