impl Scene for LabPlayScene {
    fn load(&mut self) -> Result<(), SceneError> {
        self.catalog.validate().map_err(SceneError::Config)?;
        validate_maze_map(&self.map).map_err(SceneError::Config)?;

        self.reset_session_state();

        let pulse = self.tweens.start(
            TweenKind::TutorialPulse,
            TUTORIAL_PULSE_SECONDS,
            TweenLoop::PingPong,
        );
        self.track_tween("tutorial_pulse", pulse);
        self.tutorial_pulse = Some(pulse);

        self.minigame_live = true;
        self.scope
            .track("portal_subscription", SessionResource::PortalSubscription);

        self.hud.emit(HudEvent::TimeSet(self.session.time_left));
        self.hud.emit(HudEvent::KeysSet(0));
        self.hud.emit(HudEvent::ScoreSet(0));

        info!(
            phase = ?self.progression.phase(),
            time_left = self.session.time_left,
            sys = LAB_SYSTEM_ORDER_TEXT,
            "scene_loaded"
        );
        Ok(())
    }

    fn update(&mut self, fixed_dt_seconds: f32, input: &InputSnapshot) -> SceneCommand {
        match self.progression.phase() {
            Phase::Intro => {
                self.advance_schedulers(fixed_dt_seconds);
                if input.dismiss_pressed() || input.interact_pressed() {
                    let effects = self.progression.apply(PhaseEvent::IntroDismissed);
                    self.apply_effects(effects);
                }
            }
            Phase::EduPanelOpen => {
                self.advance_schedulers(fixed_dt_seconds);
                if input.interact_pressed() || input.dismiss_pressed() {
                    self.close_panel();
                }
            }
            Phase::Paused => {
                if input.pause_pressed() {
                    let effects = self.progression.apply(PhaseEvent::PauseToggled);
                    self.apply_effects(effects);
                }
            }
            Phase::Terminal => {
                if input.restart_pressed() {
                    return SceneCommand::Restart;
                }
            }
            Phase::Tutorial | Phase::Gameplay => {
                if input.pause_pressed() {
                    let effects = self.progression.apply(PhaseEvent::PauseToggled);
                    self.apply_effects(effects);
                    self.hud.emit(HudEvent::Toast("PAUSED".to_string()));
                    return SceneCommand::None;
                }
                self.run_systems_once(fixed_dt_seconds, input);
            }
        }
        SceneCommand::None
    }

    fn unload(&mut self) {
        info!(phase = ?self.progression.phase(), "scene_unload");
        self.teardown_session();
    }

    fn debug_title(&self) -> Option<String> {
        Some(format!(
            "Privacy Maze | {:?} | keys {}/{} | time {:.1}s | score {}",
            self.progression.phase(),
            self.session.keys_collected,
            self.session.required_keys,
            self.session.time_left,
            self.session.score
        ))
    }
}
