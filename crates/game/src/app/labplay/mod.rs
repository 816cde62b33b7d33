use maze_engine::{
    InputAction, InputSnapshot, Rect, Scene, SceneCommand, SceneError, SessionScope, TimerBank,
    TimerId, TweenBank, TweenId, TweenLoop, Vec2,
};
use tracing::{debug, info, warn};

use crate::content::{EduNode, NodeCatalog};

const BASE_SPEED: f32 = 130.0;
const DASH_SPEED: f32 = 340.0;
const DASH_COOLDOWN_MS: f64 = 3000.0;
const DASH_DURATION_SECONDS: f32 = 0.14;
const INTERACT_RADIUS: f32 = 26.0;
const REQUIRED_KEYS: u32 = 3;
const SESSION_TIME_SECONDS: f32 = 90.0;
const SLOW_ZONE_MULTIPLIER: f32 = 0.6;
const LASER_TOGGLE_SECONDS: f32 = 0.9;
const LASER_TIME_PENALTY_SECONDS: f32 = 6.0;
const LASER_VELOCITY_DAMP: f32 = 0.4;
const DRONE_TIME_PENALTY_SECONDS: f32 = 8.0;
const DRONE_VELOCITY_DAMP: f32 = 0.3;
const DRONE_HIT_IFRAMES_MS: f64 = 800.0;
const DRONE_LEG_SECONDS: f32 = 1.8;
const KEY_SCORE_BONUS: i32 = 25;
const PORTAL_SCORE_BONUS: i32 = 40;
const GLITCH_SECONDS: f32 = 8.0;
const PORTAL_PHRASE: &str = "PRIVACY";
const PORTAL_TIME_LIMIT_SECONDS: f32 = 20.0;
const PLAYER_RADIUS: f32 = 7.0;
const KEY_PICKUP_RADIUS: f32 = 10.0;
const EXIT_RADIUS: f32 = 16.0;
const DRONE_CONTACT_RADIUS: f32 = 8.0;
const TUTORIAL_PULSE_SECONDS: f32 = 0.7;
const EXIT_PULSE_SECONDS: f32 = 0.5;
const AUTO_SOLVE_POLL_FRAMES: u32 = 120;
const LAB_SYSTEM_ORDER_TEXT: &str = "Interaction>Movement>Hazards>Scheduling>Clock>Objectives";

include!("types.rs");
include!("progression.rs");
include!("map.rs");
include!("systems.rs");
include!("scene_state.rs");
include!("scene_impl.rs");
include!("util.rs");

pub(crate) fn build_scene() -> Result<Box<dyn Scene>, String> {
    let catalog = crate::content::resolve_catalog()?;
    Ok(Box::new(LabPlayScene::new(
        catalog,
        Box::new(LogHud),
        Box::new(AutoSolveHost::default()),
        Box::new(LogResults),
    )))
}

#[cfg(test)]
mod tests {
    include!("tests.rs");
}
