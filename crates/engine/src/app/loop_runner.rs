use std::collections::VecDeque;

use tracing::info;

use super::input::InputSnapshot;
use super::scene::{SceneCommand, SceneError, SceneHost};

#[derive(Debug, Clone)]
pub struct LoopConfig {
    pub target_tps: u32,
    pub max_ticks: Option<u64>,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            target_tps: 60,
            max_ticks: None,
        }
    }
}

pub trait InputSource {
    fn next_snapshot(&mut self) -> InputSnapshot;
}

/// Pre-recorded input for headless runs. Returns one frame per tick and an
/// empty snapshot once the script is exhausted.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    frames: VecDeque<InputSnapshot>,
}

impl ScriptedInput {
    pub fn new(frames: Vec<InputSnapshot>) -> Self {
        Self {
            frames: frames.into(),
        }
    }

    pub fn push(&mut self, snapshot: InputSnapshot) {
        self.frames.push_back(snapshot);
    }

    pub fn push_repeated(&mut self, snapshot: InputSnapshot, count: usize) {
        for _ in 0..count {
            self.frames.push_back(snapshot);
        }
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl InputSource for ScriptedInput {
    fn next_snapshot(&mut self) -> InputSnapshot {
        self.frames.pop_front().unwrap_or_else(InputSnapshot::empty)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub ticks: u64,
    pub restarts: u32,
    pub quit_requested: bool,
}

/// Fixed-timestep session driver: one input snapshot per simulation tick,
/// scene commands applied between ticks, guaranteed shutdown on every exit
/// path. Headless; presentation layers sit elsewhere.
pub fn run_session(
    host: &mut SceneHost,
    input: &mut dyn InputSource,
    config: &LoopConfig,
) -> Result<RunSummary, SceneError> {
    let target_tps = config.target_tps.max(1);
    let fixed_dt_seconds = 1.0 / target_tps as f32;

    if let Err(error) = host.load_active() {
        host.shutdown();
        return Err(error);
    }
    info!(target_tps, max_ticks = ?config.max_ticks, "session_started");

    let mut summary = RunSummary::default();
    loop {
        if let Some(max_ticks) = config.max_ticks {
            if summary.ticks >= max_ticks {
                break;
            }
        }

        let snapshot = input.next_snapshot();
        if snapshot.quit_requested() {
            summary.quit_requested = true;
            break;
        }

        let command = host.update_active(fixed_dt_seconds, &snapshot);
        summary.ticks += 1;
        match command {
            SceneCommand::None => {}
            SceneCommand::Restart => {
                if let Err(error) = host.restart() {
                    host.shutdown();
                    return Err(error);
                }
                summary.restarts += 1;
            }
            SceneCommand::Quit => {
                summary.quit_requested = true;
                break;
            }
        }
    }

    host.shutdown();
    info!(
        ticks = summary.ticks,
        restarts = summary.restarts,
        quit = summary.quit_requested,
        "session_finished"
    );
    Ok(summary)
}
