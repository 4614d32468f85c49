use std::time::Duration;

use thiserror::Error;

/// Process-wide configuration, fixed at startup and read-only afterwards.
///
/// `target_tps`, `width`, `height` and `arena_radius` describe the simulation
/// and its display surface; the remaining fields are loop policy knobs.
#[derive(Debug, Clone)]
pub struct GameConfig {
    pub window_title: String,
    pub target_tps: u32,
    pub width: u32,
    pub height: u32,
    pub arena_radius: u32,
    pub max_catchup_steps: u32,
    pub input_cooldown: Duration,
    pub metrics_log_interval: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window_title: "Spacewar".to_string(),
            target_tps: 60,
            width: 660,
            height: 660,
            arena_radius: 330,
            max_catchup_steps: 10,
            input_cooldown: Duration::from_millis(200),
            metrics_log_interval: Duration::from_secs(1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("target tick rate must be positive")]
    ZeroTargetTps,
    #[error("display dimensions must be positive, got {width}x{height}")]
    ZeroDimension { width: u32, height: u32 },
    #[error("arena radius must be positive")]
    ZeroArenaRadius,
    #[error("arena radius {radius} does not fit a {width}x{height} surface")]
    ArenaRadiusOutOfBounds { radius: u32, width: u32, height: u32 },
    #[error("max catch-up steps must be positive")]
    ZeroMaxCatchupSteps,
}

impl GameConfig {
    /// Rejects configurations the loop cannot run with. Called once during
    /// bring-up; invalid values fail fast instead of being clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.target_tps == 0 {
            return Err(ConfigError::ZeroTargetTps);
        }
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::ZeroDimension {
                width: self.width,
                height: self.height,
            });
        }
        if self.arena_radius == 0 {
            return Err(ConfigError::ZeroArenaRadius);
        }
        if self.arena_radius > self.width.min(self.height) / 2 {
            return Err(ConfigError::ArenaRadiusOutOfBounds {
                radius: self.arena_radius,
                width: self.width,
                height: self.height,
            });
        }
        if self.max_catchup_steps == 0 {
            return Err(ConfigError::ZeroMaxCatchupSteps);
        }
        Ok(())
    }

    /// Fixed simulation step size. Computed from `target_tps` once and held
    /// constant for the lifetime of the loop.
    pub fn step_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.target_tps as f64)
    }
}
