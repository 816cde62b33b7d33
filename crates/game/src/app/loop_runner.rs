use std::process::ExitCode;

use maze_engine::{run_session, InputAction, InputSnapshot, SceneHost, ScriptedInput};
use tracing::{error, info};

use super::bootstrap::AppWiring;

pub(crate) fn run(app: AppWiring) -> ExitCode {
    let mut host = SceneHost::new(app.scene);
    let mut input = demo_script();
    match run_session(&mut host, &mut input, &app.config) {
        Ok(summary) => {
            info!(
                ticks = summary.ticks,
                restarts = summary.restarts,
                quit = summary.quit_requested,
                "demo_complete"
            );
            ExitCode::SUCCESS
        }
        Err(error) => {
            error!(error = %error, "session_failed");
            ExitCode::FAILURE
        }
    }
}

/// A canned playthrough for the headless binary: dismiss the intro, walk up
/// to the tutorial node, clear the tutorial, then wander the maze while the
/// hazards and clock run.
fn demo_script() -> ScriptedInput {
    let mut script = ScriptedInput::default();
    let up = InputSnapshot::empty().with_action_down(InputAction::MoveUp, true);
    let up_left = up.with_action_down(InputAction::MoveLeft, true);
    let left = InputSnapshot::empty().with_action_down(InputAction::MoveLeft, true);
    let down = InputSnapshot::empty().with_action_down(InputAction::MoveDown, true);

    script.push(InputSnapshot::empty().with_dismiss_pressed(true));
    script.push_repeated(up, 8);
    script.push(InputSnapshot::empty().with_interact_pressed(true));
    script.push(InputSnapshot::empty());
    script.push(InputSnapshot::empty().with_interact_pressed(true));

    script.push(InputSnapshot::empty().with_dash_pressed(true));
    script.push_repeated(up_left, 240);
    script.push_repeated(left, 60);
    script.push_repeated(down, 180);
    script.push_repeated(InputSnapshot::empty(), 600);
    script.push(InputSnapshot::empty().with_quit_requested(true));
    script
}
