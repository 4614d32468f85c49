use std::process::ExitCode;

use engine::run_app;
use tracing::error;

mod app;

fn main() -> ExitCode {
    let app::AppWiring {
        config,
        registry,
        world,
        initial_screen,
    } = app::build_app();

    if let Err(err) = run_app(config, registry, world, initial_screen) {
        error!(error = %err, "startup_failed");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
