#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Intro,
    Tutorial,
    Gameplay,
    EduPanelOpen,
    Paused,
    Terminal,
}

/// The non-interrupt phase an interrupt (panel, pause) returns to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BasePhase {
    Tutorial,
    Gameplay,
}

impl BasePhase {
    fn to_phase(self) -> Phase {
        match self {
            Self::Tutorial => Phase::Tutorial,
            Self::Gameplay => Phase::Gameplay,
        }
    }
}

/// Which node's panel is open. The tutorial gate is its own variant so the
/// deferred-spawn trigger is a type, not an id comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PanelNode {
    TutorialGate,
    Lesson(usize),
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct PlayerState {
    position: Vec2,
    velocity: Vec2,
    dashing: bool,
    last_dash_at_ms: f64,
}

impl PlayerState {
    fn at_spawn(spawn: Vec2) -> Self {
        Self {
            position: spawn,
            velocity: Vec2::default(),
            dashing: false,
            // Far enough in the past that the first dash is always ready.
            last_dash_at_ms: -DASH_COOLDOWN_MS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct GameSession {
    keys_collected: u32,
    required_keys: u32,
    time_left: f32,
    score: i32,
    portals_cleared: u32,
    door_open: bool,
}

impl GameSession {
    fn new() -> Self {
        Self {
            keys_collected: 0,
            required_keys: REQUIRED_KEYS,
            time_left: SESSION_TIME_SECONDS,
            score: 0,
            portals_cleared: 0,
            door_open: false,
        }
    }

    fn has_required_keys(&self) -> bool {
        self.keys_collected >= self.required_keys
    }
}

#[derive(Debug, Clone, PartialEq)]
enum HudEvent {
    TimeSet(f32),
    KeysSet(u32),
    ScoreSet(i32),
    Toast(String),
    DashSet(f32),
    MinimapUpdate { x: f32, y: f32 },
}

/// One-way notification channel toward the presentation layer. Fire and
/// forget; the scene never reads anything back.
trait HudSink {
    fn emit(&mut self, event: HudEvent);
}

struct LogHud;

impl HudSink for LogHud {
    fn emit(&mut self, event: HudEvent) {
        debug!(event = ?event, "hud_event");
    }
}

#[derive(Debug, Clone, PartialEq)]
struct MinigameRequest {
    target_phrase: String,
    time_limit_seconds: f32,
}

/// The cipher minigame sub-activity. Launched with a phrase and a time
/// budget; the outcome comes back asynchronously through `poll_result`, never
/// as a direct return value.
trait MinigameHost {
    fn launch(&mut self, request: MinigameRequest);
    fn poll_result(&mut self) -> Option<bool>;
    fn abort(&mut self);
    fn is_active(&self) -> bool;
}

/// Headless stand-in used by the demo binary: reports success a fixed number
/// of polls after launch.
#[derive(Debug, Default)]
struct AutoSolveHost {
    polls_until_solved: Option<u32>,
}

impl MinigameHost for AutoSolveHost {
    fn launch(&mut self, request: MinigameRequest) {
        debug!(
            phrase = %request.target_phrase,
            time_limit_seconds = request.time_limit_seconds,
            "minigame_launched"
        );
        self.polls_until_solved = Some(AUTO_SOLVE_POLL_FRAMES);
    }

    fn poll_result(&mut self) -> Option<bool> {
        let remaining = self.polls_until_solved.as_mut()?;
        if *remaining > 0 {
            *remaining -= 1;
            return None;
        }
        self.polls_until_solved = None;
        Some(true)
    }

    fn abort(&mut self) {
        self.polls_until_solved = None;
    }

    fn is_active(&self) -> bool {
        self.polls_until_solved.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ResultsPayload {
    time_left: f32,
    keys_collected: u32,
    portals_cleared: u32,
    score: i32,
}

trait ResultsSink {
    fn deliver(&mut self, results: ResultsPayload);
}

struct LogResults;

impl ResultsSink for LogResults {
    fn deliver(&mut self, results: ResultsPayload) {
        info!(
            time_left = results.time_left,
            keys = results.keys_collected,
            portals = results.portals_cleared,
            score = results.score,
            "session_results"
        );
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerKind {
    DashEnd,
    LaserToggle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TweenKind {
    TutorialPulse,
    ExitPulse,
    GlitchFade,
    DroneLeg,
}

/// Everything the session scope can hold. Cancellation is dispatched on this
/// closed set at teardown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionResource {
    Timer(TimerId),
    Tween(TweenId),
    PortalSubscription,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct KeyPickup {
    position: Vec2,
    collected: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct LessonNodeSpawn {
    lesson_index: usize,
    position: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct LaserSeg {
    bounds: Rect,
    player_inside: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct DroneState {
    position: Vec2,
    leg_from: Vec2,
    leg_target_index: usize,
    leg_tween: TweenId,
    iframes_until_ms: f64,
}

/// The deferred entity batch created when the tutorial panel closes.
#[derive(Debug, Clone, PartialEq)]
struct GameplayWave {
    keys: Vec<KeyPickup>,
    nodes: Vec<LessonNodeSpawn>,
    portal_position: Vec2,
    lasers: Vec<LaserSeg>,
    lasers_active: bool,
    slow_zone: Rect,
    drone: DroneState,
}
