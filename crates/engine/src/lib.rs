pub mod app;

pub use app::{
    run_session, InputAction, InputSnapshot, InputSource, LoopConfig, Rect, RunSummary,
    SchedError, Scene, SceneCommand, SceneError, SceneHost, ScriptedInput, SessionScope,
    TeardownReport, TimerBank, TimerId, TrackedResource, TweenBank, TweenId, TweenLoop, Vec2,
};
