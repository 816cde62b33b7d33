use maze_engine::{LoopConfig, Scene};
use tracing::info;
use tracing_subscriber::EnvFilter;

use super::labplay;

/// Cap for the headless demo run; long enough to play through the tutorial
/// and a stretch of gameplay, short enough to terminate promptly.
const DEMO_MAX_TICKS: u64 = 1800;

pub(crate) struct AppWiring {
    pub(crate) config: LoopConfig,
    pub(crate) scene: Box<dyn Scene>,
}

pub(crate) fn build_app() -> Result<AppWiring, String> {
    init_tracing();
    info!("=== Privacy Maze Startup ===");

    let scene = labplay::build_scene()?;
    let config = LoopConfig {
        target_tps: 60,
        max_ticks: Some(DEMO_MAX_TICKS),
    };

    Ok(AppWiring { config, scene })
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
