#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PhaseEvent {
    IntroDismissed,
    PanelOpened(PanelNode),
    PanelClosed,
    PauseToggled,
    ClockExpired,
    ExitReached,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TerminalCause {
    TimedOut,
    Completed,
}

/// Side effects the orchestrator executes after a transition. The table only
/// decides; it never touches world state itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Effect {
    AnnounceIntroHint,
    SpawnGameplayWave,
    AnnounceTutorialCleared,
    DeliverResults(TerminalCause),
}

/// The authoritative progression state: exactly one phase at a time, plus the
/// bookkeeping interrupts need to return to where they came from. Events that
/// make no sense in the current phase are silent no-ops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ProgressionState {
    phase: Phase,
    prior: BasePhase,
    open_panel: Option<PanelNode>,
}

impl ProgressionState {
    fn new() -> Self {
        Self {
            phase: Phase::Intro,
            prior: BasePhase::Tutorial,
            open_panel: None,
        }
    }

    fn phase(&self) -> Phase {
        self.phase
    }

    fn open_panel(&self) -> Option<PanelNode> {
        self.open_panel
    }

    /// Drops an open panel without running close side effects. Teardown uses
    /// this so a restart mid-panel never triggers the deferred spawn.
    fn force_close_panel(&mut self) {
        if self.phase == Phase::EduPanelOpen {
            self.open_panel = None;
            self.phase = self.prior.to_phase();
        }
    }

    fn apply(&mut self, event: PhaseEvent) -> Vec<Effect> {
        match (self.phase, event) {
            (Phase::Intro, PhaseEvent::IntroDismissed) => {
                self.phase = Phase::Tutorial;
                vec![Effect::AnnounceIntroHint]
            }
            (Phase::Tutorial, PhaseEvent::PanelOpened(node)) => {
                self.prior = BasePhase::Tutorial;
                self.open_panel = Some(node);
                self.phase = Phase::EduPanelOpen;
                Vec::new()
            }
            (Phase::Gameplay, PhaseEvent::PanelOpened(node)) => {
                self.prior = BasePhase::Gameplay;
                self.open_panel = Some(node);
                self.phase = Phase::EduPanelOpen;
                Vec::new()
            }
            (Phase::EduPanelOpen, PhaseEvent::PanelClosed) => match self.open_panel.take() {
                Some(PanelNode::TutorialGate) => {
                    self.phase = Phase::Gameplay;
                    self.prior = BasePhase::Gameplay;
                    vec![Effect::SpawnGameplayWave, Effect::AnnounceTutorialCleared]
                }
                _ => {
                    self.phase = self.prior.to_phase();
                    Vec::new()
                }
            },
            (Phase::Tutorial, PhaseEvent::PauseToggled) => {
                self.prior = BasePhase::Tutorial;
                self.phase = Phase::Paused;
                Vec::new()
            }
            (Phase::Gameplay, PhaseEvent::PauseToggled) => {
                self.prior = BasePhase::Gameplay;
                self.phase = Phase::Paused;
                Vec::new()
            }
            (Phase::Paused, PhaseEvent::PauseToggled) => {
                self.phase = self.prior.to_phase();
                Vec::new()
            }
            (Phase::Gameplay, PhaseEvent::ClockExpired) => {
                self.phase = Phase::Terminal;
                vec![Effect::DeliverResults(TerminalCause::TimedOut)]
            }
            (Phase::Gameplay, PhaseEvent::ExitReached) => {
                self.phase = Phase::Terminal;
                vec![Effect::DeliverResults(TerminalCause::Completed)]
            }
            _ => Vec::new(),
        }
    }
}
