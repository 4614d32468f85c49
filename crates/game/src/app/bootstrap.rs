use engine::{GameConfig, ScreenRegistry};
use tracing::info;
use tracing_subscriber::EnvFilter;

use super::audio::SoundBank;
use super::screens::{self, ScreenId};
use super::world::MatchWorld;

pub(crate) struct AppWiring {
    pub(crate) config: GameConfig,
    pub(crate) registry: ScreenRegistry<ScreenId, MatchWorld>,
    pub(crate) world: MatchWorld,
    pub(crate) initial_screen: ScreenId,
}

pub(crate) fn build_app() -> AppWiring {
    init_tracing();
    info!("=== Spacewar Startup ===");

    let config = GameConfig::default();
    let registry = screens::build_registry(config.input_cooldown);
    let world = MatchWorld::new(config.arena_radius as f32, SoundBank::new());

    AppWiring {
        config,
        registry,
        world,
        initial_screen: ScreenId::Start,
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}
