use std::process::ExitCode;

use tracing::error;

mod app;
mod content;

fn main() -> ExitCode {
    let wiring = match app::bootstrap::build_app() {
        Ok(wiring) => wiring,
        Err(reason) => {
            error!(reason = %reason, "startup_failed");
            eprintln!("maze-game startup failed: {reason}");
            return ExitCode::FAILURE;
        }
    };
    app::run(wiring)
}
