mod input;
mod loop_runner;
mod sched;
mod scene;
mod scope;

pub use input::{InputAction, InputSnapshot};
pub use loop_runner::{run_session, InputSource, LoopConfig, RunSummary, ScriptedInput};
pub use sched::{SchedError, TimerBank, TimerId, TweenBank, TweenId, TweenLoop};
pub use scene::{Rect, Scene, SceneCommand, SceneError, SceneHost, Vec2};
pub use scope::{SessionScope, TeardownReport, TrackedResource};
