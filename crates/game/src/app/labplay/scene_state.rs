struct LabPlayScene {
    catalog: NodeCatalog,
    hud: Box<dyn HudSink>,
    minigame: Box<dyn MinigameHost>,
    results: Box<dyn ResultsSink>,
    map: MazeMap,
    progression: ProgressionState,
    session: GameSession,
    player: PlayerState,
    now_ms: f64,
    timers: TimerBank<TimerKind>,
    tweens: TweenBank<TweenKind>,
    scope: SessionScope<SessionResource>,
    wave: Option<GameplayWave>,
    tutorial_pulse: Option<TweenId>,
    exit_pulse: Option<TweenId>,
    glitch_tween: Option<TweenId>,
    minigame_live: bool,
    pending_damp: Option<f32>,
    exit_overlapping: bool,
    results_delivered: bool,
    last_whole_second: u32,
}

impl LabPlayScene {
    fn new(
        catalog: NodeCatalog,
        hud: Box<dyn HudSink>,
        minigame: Box<dyn MinigameHost>,
        results: Box<dyn ResultsSink>,
    ) -> Self {
        let map = build_maze_map();
        let player = PlayerState::at_spawn(map.spawn);
        Self {
            catalog,
            hud,
            minigame,
            results,
            map,
            progression: ProgressionState::new(),
            session: GameSession::new(),
            player,
            now_ms: 0.0,
            timers: TimerBank::new(),
            tweens: TweenBank::new(),
            scope: SessionScope::new(),
            wave: None,
            tutorial_pulse: None,
            exit_pulse: None,
            glitch_tween: None,
            minigame_live: false,
            pending_damp: None,
            exit_overlapping: false,
            results_delivered: false,
            last_whole_second: SESSION_TIME_SECONDS.ceil() as u32,
        }
    }

    fn reset_session_state(&mut self) {
        self.progression = ProgressionState::new();
        self.session = GameSession::new();
        self.player = PlayerState::at_spawn(self.map.spawn);
        self.now_ms = 0.0;
        self.timers.clear();
        self.tweens.clear();
        self.wave = None;
        self.tutorial_pulse = None;
        self.exit_pulse = None;
        self.glitch_tween = None;
        self.minigame_live = false;
        self.pending_damp = None;
        self.exit_overlapping = false;
        self.results_delivered = false;
        self.last_whole_second = SESSION_TIME_SECONDS.ceil() as u32;
    }

    fn track_timer(&mut self, label: &'static str, id: TimerId) {
        self.scope.track(label, SessionResource::Timer(id));
    }

    fn track_tween(&mut self, label: &'static str, id: TweenId) {
        self.scope.track(label, SessionResource::Tween(id));
    }

    fn panel_content(&self, node: PanelNode) -> Option<&EduNode> {
        match node {
            PanelNode::TutorialGate => Some(&self.catalog.tutorial),
            PanelNode::Lesson(index) => self.catalog.lesson(index),
        }
    }

    fn open_panel(&mut self, node: PanelNode) {
        let effects = self.progression.apply(PhaseEvent::PanelOpened(node));
        self.apply_effects(effects);
        if let Some(content) = self.panel_content(node) {
            debug!(node_id = %content.id, title = %content.title, "edu_panel_opened");
        }
    }

    fn close_panel(&mut self) {
        if let Some(node) = self.progression.open_panel() {
            debug!(node = ?node, "edu_panel_closed");
        }
        let effects = self.progression.apply(PhaseEvent::PanelClosed);
        self.apply_effects(effects);
    }

    fn apply_effects(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::AnnounceIntroHint => {
                    self.hud.emit(HudEvent::Toast(
                        "Find the central cyan node and press E".to_string(),
                    ));
                }
                Effect::SpawnGameplayWave => self.spawn_gameplay_wave(),
                Effect::AnnounceTutorialCleared => {
                    self.hud.emit(HudEvent::Toast(
                        "Tutorial complete. The timer is now running".to_string(),
                    ));
                }
                Effect::DeliverResults(cause) => self.deliver_results(cause),
            }
        }
    }

    fn spawn_gameplay_wave(&mut self) {
        if self.wave.is_some() {
            return;
        }
        if let Some(id) = self.tutorial_pulse.take() {
            let _ = self.tweens.cancel(id);
        }

        let keys = self
            .map
            .key_positions
            .iter()
            .map(|position| KeyPickup {
                position: *position,
                collected: false,
            })
            .collect::<Vec<_>>();
        let nodes = self
            .map
            .lesson_positions
            .iter()
            .enumerate()
            .map(|(lesson_index, position)| LessonNodeSpawn {
                lesson_index,
                position: *position,
            })
            .collect::<Vec<_>>();
        let lasers = self
            .map
            .laser_bounds
            .iter()
            .map(|bounds| LaserSeg {
                bounds: *bounds,
                player_inside: false,
            })
            .collect::<Vec<_>>();

        let leg_tween = self
            .tweens
            .start(TweenKind::DroneLeg, DRONE_LEG_SECONDS, TweenLoop::Once);
        self.track_tween("drone_leg", leg_tween);
        let drone = DroneState {
            position: self.map.drone_start,
            leg_from: self.map.drone_start,
            leg_target_index: 0,
            leg_tween,
            iframes_until_ms: 0.0,
        };

        let key_count = keys.len();
        let laser_count = lasers.len();
        self.wave = Some(GameplayWave {
            keys,
            nodes,
            portal_position: self.map.portal_position,
            lasers,
            lasers_active: true,
            slow_zone: self.map.slow_zone,
            drone,
        });

        let toggle = self
            .timers
            .schedule_repeating(TimerKind::LaserToggle, LASER_TOGGLE_SECONDS);
        self.track_timer("laser_toggle", toggle);

        self.hud.emit(HudEvent::Toast(
            "Explore, collect 3 keys, and reach the cyan ring (exit)".to_string(),
        ));
        info!(keys = key_count, lasers = laser_count, "gameplay_wave_spawned");
    }

    fn advance_drone_leg(&mut self) {
        let Some(wave) = self.wave.as_mut() else {
            return;
        };
        let arrived = self.map.drone_waypoints[wave.drone.leg_target_index];
        wave.drone.position = arrived;
        wave.drone.leg_from = arrived;
        wave.drone.leg_target_index =
            (wave.drone.leg_target_index + 1) % self.map.drone_waypoints.len();

        let leg_tween = self
            .tweens
            .start(TweenKind::DroneLeg, DRONE_LEG_SECONDS, TweenLoop::Once);
        wave.drone.leg_tween = leg_tween;
        self.scope.track("drone_leg", SessionResource::Tween(leg_tween));
    }

    /// Unlocks exactly once per session, the first time the key requirement
    /// holds. The open door stays open.
    fn try_open_door(&mut self) {
        if self.session.door_open || !self.session.has_required_keys() {
            return;
        }
        self.session.door_open = true;
        self.hud.emit(HudEvent::Toast(
            "ACCESS GRANTED: head to the cyan ring (exit)".to_string(),
        ));
        if let Some(id) = self.exit_pulse.take() {
            let _ = self.tweens.cancel(id);
        }
        let pulse = self
            .tweens
            .start(TweenKind::ExitPulse, EXIT_PULSE_SECONDS, TweenLoop::PingPong);
        self.track_tween("exit_pulse", pulse);
        self.exit_pulse = Some(pulse);
        info!(keys = self.session.keys_collected, "door_opened");
    }

    fn hit_penalty(&mut self, seconds: f32, toast: &str) {
        self.session.time_left = (self.session.time_left - seconds).max(0.0);
        self.last_whole_second = self.session.time_left.ceil() as u32;
        self.hud.emit(HudEvent::TimeSet(self.session.time_left));
        self.hud.emit(HudEvent::Toast(toast.to_string()));
    }

    fn collect_key(&mut self) {
        self.session.keys_collected += 1;
        self.session.score += KEY_SCORE_BONUS;
        self.hud
            .emit(HudEvent::KeysSet(self.session.keys_collected));
        self.hud.emit(HudEvent::Toast("KEY +1".to_string()));
        self.hud.emit(HudEvent::ScoreSet(self.session.score));
    }

    fn launch_portal_minigame(&mut self) {
        if self.minigame.is_active() {
            return;
        }
        self.minigame.launch(MinigameRequest {
            target_phrase: PORTAL_PHRASE.to_string(),
            time_limit_seconds: PORTAL_TIME_LIMIT_SECONDS,
        });
        debug!("portal_minigame_launched");
    }

    fn poll_portal_result(&mut self) {
        if !self.minigame_live {
            return;
        }
        let Some(solved) = self.minigame.poll_result() else {
            return;
        };
        if solved {
            self.apply_portal_success();
        } else {
            self.apply_portal_failure();
        }
    }

    fn apply_portal_success(&mut self) {
        self.session.keys_collected += 1;
        self.session.portals_cleared += 1;
        self.session.score += PORTAL_SCORE_BONUS;
        self.hud
            .emit(HudEvent::Toast("PORTAL CLEARED +1 key".to_string()));
        self.hud
            .emit(HudEvent::KeysSet(self.session.keys_collected));
        self.hud.emit(HudEvent::ScoreSet(self.session.score));
        self.try_open_door();
    }

    fn apply_portal_failure(&mut self) {
        if let Some(id) = self.glitch_tween.take() {
            let _ = self.tweens.cancel(id);
        }
        let glitch = self
            .tweens
            .start(TweenKind::GlitchFade, GLITCH_SECONDS, TweenLoop::Once);
        self.track_tween("glitch_fade", glitch);
        self.glitch_tween = Some(glitch);
        self.hud
            .emit(HudEvent::Toast("Glitch: impaired vision 8s".to_string()));
    }

    fn deliver_results(&mut self, cause: TerminalCause) {
        if self.results_delivered {
            return;
        }
        self.results_delivered = true;
        let payload = self.results_payload();
        info!(
            cause = ?cause,
            keys = payload.keys_collected,
            portals = payload.portals_cleared,
            score = payload.score,
            "session_terminal"
        );
        self.results.deliver(payload);
    }

    fn results_payload(&self) -> ResultsPayload {
        ResultsPayload {
            time_left: self.session.time_left,
            keys_collected: self.session.keys_collected,
            portals_cleared: self.session.portals_cleared,
            score: self.session.score,
        }
    }

    fn solid_rects(&self) -> Vec<Rect> {
        let mut solids = self.map.walls.clone();
        if !self.session.door_open {
            solids.push(self.map.door);
        }
        solids
    }

    /// Releases everything the session created: every tracked disposable is
    /// cancelled (failures tolerated per entry), both banks are emptied so
    /// nothing scheduled before teardown can fire after it, the minigame
    /// sub-activity is force-stopped, and an open panel is dropped without
    /// running its close side effects.
    fn teardown_session(&mut self) {
        let timers = &mut self.timers;
        let tweens = &mut self.tweens;
        let minigame_live = &mut self.minigame_live;
        let report = self.scope.teardown_with(|_label, resource| match resource {
            SessionResource::Timer(id) => timers.cancel(*id).map_err(|error| error.to_string()),
            SessionResource::Tween(id) => tweens.cancel(*id).map_err(|error| error.to_string()),
            SessionResource::PortalSubscription => {
                *minigame_live = false;
                Ok(())
            }
        });

        self.timers.clear();
        self.tweens.clear();
        if self.minigame.is_active() {
            self.minigame.abort();
        }
        self.progression.force_close_panel();

        if report.failed > 0 {
            warn!(
                disposed = report.disposed,
                failed = report.failed,
                "session_teardown_with_failures"
            );
        } else {
            debug!(disposed = report.disposed, "session_teardown");
        }
    }
}
