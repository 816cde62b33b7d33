#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LabSystemId {
    Interaction,
    Movement,
    Hazards,
    Scheduling,
    Clock,
    Objectives,
}

const LAB_SYSTEM_ORDER: [LabSystemId; 6] = [
    LabSystemId::Interaction,
    LabSystemId::Movement,
    LabSystemId::Hazards,
    LabSystemId::Scheduling,
    LabSystemId::Clock,
    LabSystemId::Objectives,
];

impl LabPlayScene {
    /// One simulation tick for the live phases. Each system gates itself on
    /// the current phase, so a mid-tick transition (panel opened, clock
    /// expired) short-circuits everything downstream of it.
    fn run_systems_once(&mut self, fixed_dt_seconds: f32, input: &InputSnapshot) {
        for system_id in LAB_SYSTEM_ORDER {
            match system_id {
                LabSystemId::Interaction => self.run_interaction_system(input),
                LabSystemId::Movement => self.run_movement_system(fixed_dt_seconds, input),
                LabSystemId::Hazards => self.run_hazard_system(),
                LabSystemId::Scheduling => self.advance_schedulers(fixed_dt_seconds),
                LabSystemId::Clock => self.run_clock_system(fixed_dt_seconds),
                LabSystemId::Objectives => self.run_objectives_system(),
            }
        }
    }

    fn run_interaction_system(&mut self, input: &InputSnapshot) {
        if !matches!(
            self.progression.phase(),
            Phase::Tutorial | Phase::Gameplay
        ) {
            return;
        }

        self.poll_portal_result();

        if !input.interact_pressed() {
            return;
        }
        match self.progression.phase() {
            Phase::Tutorial => {
                if within_radius(self.player.position, self.map.tutorial_node, INTERACT_RADIUS) {
                    self.open_panel(PanelNode::TutorialGate);
                }
            }
            Phase::Gameplay => {
                // Node wins over portal; never both on one press.
                if let Some(node) = self.closest_lesson_in_range() {
                    self.open_panel(node);
                } else if self.portal_in_range() {
                    self.launch_portal_minigame();
                }
            }
            _ => {}
        }
    }

    fn run_movement_system(&mut self, fixed_dt_seconds: f32, input: &InputSnapshot) {
        let phase = self.progression.phase();
        if !matches!(phase, Phase::Tutorial | Phase::Gameplay) {
            return;
        }

        if input.dash_pressed()
            && self.now_ms - self.player.last_dash_at_ms >= DASH_COOLDOWN_MS
        {
            self.player.dashing = true;
            self.player.last_dash_at_ms = self.now_ms;
            let id = self
                .timers
                .schedule_once(TimerKind::DashEnd, DASH_DURATION_SECONDS);
            self.track_timer("dash_end", id);
        }

        let mut speed = if self.player.dashing {
            DASH_SPEED
        } else {
            let mut speed = BASE_SPEED;
            if phase == Phase::Gameplay {
                if let Some(wave) = self.wave.as_ref() {
                    if wave.slow_zone.contains(self.player.position) {
                        speed *= SLOW_ZONE_MULTIPLIER;
                    }
                }
            }
            speed
        };
        if let Some(damp) = self.pending_damp.take() {
            speed *= damp;
        }

        self.player.velocity = normalized_velocity(input, speed);
        let solids = self.solid_rects();
        self.player.position = resolve_move(
            self.player.position,
            self.player.velocity,
            fixed_dt_seconds,
            PLAYER_RADIUS,
            self.map.bounds,
            &solids,
        );

        self.hud.emit(HudEvent::DashSet(self.dash_cooldown_ratio()));
        self.hud.emit(HudEvent::MinimapUpdate {
            x: self.player.position.x,
            y: self.player.position.y,
        });
    }

    fn run_hazard_system(&mut self) {
        if self.progression.phase() != Phase::Gameplay {
            return;
        }
        let player_position = self.player.position;
        let now_ms = self.now_ms;
        let mut laser_hit = false;
        let mut drone_hit = false;
        {
            let Some(wave) = self.wave.as_mut() else {
                return;
            };
            for seg in &mut wave.lasers {
                let inside = circle_rect_overlap(player_position, PLAYER_RADIUS, seg.bounds);
                if inside && !seg.player_inside && wave.lasers_active {
                    laser_hit = true;
                }
                seg.player_inside = inside;
            }

            let drone_contact = within_radius(
                player_position,
                wave.drone.position,
                DRONE_CONTACT_RADIUS + PLAYER_RADIUS,
            );
            if drone_contact && now_ms >= wave.drone.iframes_until_ms {
                wave.drone.iframes_until_ms = now_ms + DRONE_HIT_IFRAMES_MS;
                drone_hit = true;
            }
        }

        if laser_hit {
            self.hit_penalty(LASER_TIME_PENALTY_SECONDS, "LASER -6s");
            self.pending_damp = Some(LASER_VELOCITY_DAMP);
        }
        if drone_hit {
            self.hit_penalty(DRONE_TIME_PENALTY_SECONDS, "DRONE -8s");
            self.pending_damp = Some(DRONE_VELOCITY_DAMP);
        }
    }

    /// Advances the simulation clock and both banks, then dispatches on what
    /// fired. Runs in every phase except Paused and Terminal so cosmetic
    /// animation and pending one-shots keep running under overlays, while the
    /// countdown stays gated in `run_clock_system`.
    fn advance_schedulers(&mut self, fixed_dt_seconds: f32) {
        self.now_ms += f64::from(fixed_dt_seconds) * 1000.0;

        let fired = self.timers.tick(fixed_dt_seconds);
        for kind in fired {
            match kind {
                TimerKind::DashEnd => self.player.dashing = false,
                TimerKind::LaserToggle => {
                    if let Some(wave) = self.wave.as_mut() {
                        wave.lasers_active = !wave.lasers_active;
                    }
                }
            }
        }

        let completed = self.tweens.tick(fixed_dt_seconds);
        for kind in completed {
            match kind {
                TweenKind::DroneLeg => self.advance_drone_leg(),
                TweenKind::GlitchFade => self.glitch_tween = None,
                TweenKind::TutorialPulse | TweenKind::ExitPulse => {}
            }
        }

        if let Some(wave) = self.wave.as_mut() {
            if let Some(t) = self.tweens.progress(wave.drone.leg_tween) {
                let target = self.map.drone_waypoints[wave.drone.leg_target_index];
                wave.drone.position = lerp(wave.drone.leg_from, target, t);
            }
        }
    }

    fn run_clock_system(&mut self, fixed_dt_seconds: f32) {
        if self.progression.phase() != Phase::Gameplay {
            return;
        }
        self.session.time_left = (self.session.time_left - fixed_dt_seconds).max(0.0);
        let whole = self.session.time_left.ceil() as u32;
        if whole != self.last_whole_second {
            self.last_whole_second = whole;
            self.hud.emit(HudEvent::TimeSet(self.session.time_left));
        }
        if self.session.time_left <= 0.0 {
            self.hud.emit(HudEvent::Toast("Time up".to_string()));
            let effects = self.progression.apply(PhaseEvent::ClockExpired);
            self.apply_effects(effects);
        }
    }

    fn run_objectives_system(&mut self) {
        if self.progression.phase() != Phase::Gameplay {
            return;
        }
        let player_position = self.player.position;

        let mut picked = 0u32;
        if let Some(wave) = self.wave.as_mut() {
            for key in &mut wave.keys {
                if !key.collected
                    && within_radius(
                        player_position,
                        key.position,
                        KEY_PICKUP_RADIUS + PLAYER_RADIUS,
                    )
                {
                    key.collected = true;
                    picked += 1;
                }
            }
        }
        for _ in 0..picked {
            self.collect_key();
        }

        self.try_open_door();

        let at_exit = within_radius(
            player_position,
            self.map.exit_position,
            EXIT_RADIUS + PLAYER_RADIUS,
        );
        if at_exit && !self.exit_overlapping {
            if self.session.has_required_keys() {
                let effects = self.progression.apply(PhaseEvent::ExitReached);
                self.apply_effects(effects);
            } else {
                let message = format!(
                    "Need more keys ({}/{})",
                    self.session.keys_collected, self.session.required_keys
                );
                self.hud.emit(HudEvent::Toast(message));
            }
        }
        self.exit_overlapping = at_exit;
    }

    fn closest_lesson_in_range(&self) -> Option<PanelNode> {
        let wave = self.wave.as_ref()?;
        let mut best: Option<(f32, usize)> = None;
        for node in &wave.nodes {
            let dx = node.position.x - self.player.position.x;
            let dy = node.position.y - self.player.position.y;
            let distance_sq = dx * dx + dy * dy;
            if distance_sq > INTERACT_RADIUS * INTERACT_RADIUS {
                continue;
            }
            match best {
                Some((best_sq, _)) if best_sq <= distance_sq => {}
                _ => best = Some((distance_sq, node.lesson_index)),
            }
        }
        best.map(|(_, index)| PanelNode::Lesson(index))
    }

    fn portal_in_range(&self) -> bool {
        self.wave.as_ref().is_some_and(|wave| {
            within_radius(self.player.position, wave.portal_position, INTERACT_RADIUS)
        })
    }

    /// Cooldown-remaining ratio for the HUD: 1 right after a dash, 0 when
    /// the next dash is ready.
    fn dash_cooldown_ratio(&self) -> f32 {
        let elapsed = self.now_ms - self.player.last_dash_at_ms;
        let remaining = (DASH_COOLDOWN_MS - elapsed) / DASH_COOLDOWN_MS;
        remaining.clamp(0.0, 1.0) as f32
    }
}
