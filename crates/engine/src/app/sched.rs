use thiserror::Error;

const MIN_PERIOD_SECONDS: f32 = 0.001;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TweenId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SchedError {
    #[error("no active timer with id {0}")]
    UnknownTimer(u64),
    #[error("no active tween with id {0}")]
    UnknownTween(u64),
}

#[derive(Debug, Clone, Copy)]
struct TimerSlot<K> {
    id: TimerId,
    kind: K,
    remaining_seconds: f32,
    period_seconds: Option<f32>,
}

/// Frame-driven timer store. Timers carry a caller-defined kind instead of a
/// callback; `tick` returns the kinds that fired this frame in schedule
/// order, and the caller dispatches on them inside the same tick.
#[derive(Debug)]
pub struct TimerBank<K> {
    next_id: u64,
    slots: Vec<TimerSlot<K>>,
}

impl<K> Default for TimerBank<K> {
    fn default() -> Self {
        Self {
            next_id: 0,
            slots: Vec::new(),
        }
    }
}

impl<K: Copy> TimerBank<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule_once(&mut self, kind: K, delay_seconds: f32) -> TimerId {
        self.schedule(kind, delay_seconds.max(0.0), None)
    }

    pub fn schedule_repeating(&mut self, kind: K, period_seconds: f32) -> TimerId {
        let period = period_seconds.max(MIN_PERIOD_SECONDS);
        self.schedule(kind, period, Some(period))
    }

    fn schedule(&mut self, kind: K, delay_seconds: f32, period_seconds: Option<f32>) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        self.slots.push(TimerSlot {
            id,
            kind,
            remaining_seconds: delay_seconds,
            period_seconds,
        });
        id
    }

    pub fn cancel(&mut self, id: TimerId) -> Result<(), SchedError> {
        let before = self.slots.len();
        self.slots.retain(|slot| slot.id != id);
        if self.slots.len() == before {
            return Err(SchedError::UnknownTimer(id.0));
        }
        Ok(())
    }

    pub fn is_active(&self, id: TimerId) -> bool {
        self.slots.iter().any(|slot| slot.id == id)
    }

    pub fn tick(&mut self, dt_seconds: f32) -> Vec<K> {
        let mut fired = Vec::new();
        self.slots.retain_mut(|slot| {
            slot.remaining_seconds -= dt_seconds;
            if slot.remaining_seconds > 0.0 {
                return true;
            }
            match slot.period_seconds {
                Some(period) => {
                    while slot.remaining_seconds <= 0.0 {
                        fired.push(slot.kind);
                        slot.remaining_seconds += period;
                    }
                    true
                }
                None => {
                    fired.push(slot.kind);
                    false
                }
            }
        });
        fired
    }

    pub fn active_count(&self) -> usize {
        self.slots.len()
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TweenLoop {
    /// Runs to completion once, then is removed and reported by `tick`.
    Once,
    /// Oscillates 0 → 1 → 0 forever; never reported as completed.
    PingPong,
}

#[derive(Debug, Clone, Copy)]
struct TweenSlot<K> {
    id: TweenId,
    kind: K,
    elapsed_seconds: f32,
    duration_seconds: f32,
    looping: TweenLoop,
}

/// Linear animation store, same shape as `TimerBank`: data in, sampled
/// progress out. Easing is the caller's concern.
#[derive(Debug)]
pub struct TweenBank<K> {
    next_id: u64,
    slots: Vec<TweenSlot<K>>,
}

impl<K> Default for TweenBank<K> {
    fn default() -> Self {
        Self {
            next_id: 0,
            slots: Vec::new(),
        }
    }
}

impl<K: Copy> TweenBank<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, kind: K, duration_seconds: f32, looping: TweenLoop) -> TweenId {
        let id = TweenId(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        self.slots.push(TweenSlot {
            id,
            kind,
            elapsed_seconds: 0.0,
            duration_seconds: duration_seconds.max(MIN_PERIOD_SECONDS),
            looping,
        });
        id
    }

    pub fn cancel(&mut self, id: TweenId) -> Result<(), SchedError> {
        let before = self.slots.len();
        self.slots.retain(|slot| slot.id != id);
        if self.slots.len() == before {
            return Err(SchedError::UnknownTween(id.0));
        }
        Ok(())
    }

    pub fn is_active(&self, id: TweenId) -> bool {
        self.slots.iter().any(|slot| slot.id == id)
    }

    pub fn tick(&mut self, dt_seconds: f32) -> Vec<K> {
        let mut completed = Vec::new();
        self.slots.retain_mut(|slot| {
            slot.elapsed_seconds += dt_seconds;
            match slot.looping {
                TweenLoop::Once => {
                    if slot.elapsed_seconds >= slot.duration_seconds {
                        completed.push(slot.kind);
                        false
                    } else {
                        true
                    }
                }
                TweenLoop::PingPong => true,
            }
        });
        completed
    }

    /// Progress in 0..=1. `Once` tweens clamp at 1; `PingPong` tweens
    /// triangle-wave between 0 and 1 with `duration_seconds` per half cycle.
    pub fn progress(&self, id: TweenId) -> Option<f32> {
        let slot = self.slots.iter().find(|slot| slot.id == id)?;
        let t = slot.elapsed_seconds / slot.duration_seconds;
        let value = match slot.looping {
            TweenLoop::Once => t.min(1.0),
            TweenLoop::PingPong => {
                let phase = t % 2.0;
                if phase <= 1.0 {
                    phase
                } else {
                    2.0 - phase
                }
            }
        };
        Some(value)
    }

    pub fn active_count(&self) -> usize {
        self.slots.len()
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Kind {
        Blink,
        DashEnd,
    }

    #[test]
    fn one_shot_fires_once_then_is_removed() {
        let mut bank = TimerBank::new();
        bank.schedule_once(Kind::DashEnd, 0.14);

        assert!(bank.tick(0.1).is_empty());
        assert_eq!(bank.tick(0.1), vec![Kind::DashEnd]);
        assert_eq!(bank.active_count(), 0);
        assert!(bank.tick(1.0).is_empty());
    }

    #[test]
    fn repeating_timer_fires_every_period() {
        let mut bank = TimerBank::new();
        bank.schedule_repeating(Kind::Blink, 0.9);

        let mut fired = 0usize;
        for _ in 0..180 {
            fired += bank.tick(0.016).len();
        }
        // 180 * 16ms = 2.88s -> 3 periods of 0.9s.
        assert_eq!(fired, 3);
        assert_eq!(bank.active_count(), 1);
    }

    #[test]
    fn repeating_timer_catches_up_on_large_steps() {
        let mut bank = TimerBank::new();
        bank.schedule_repeating(Kind::Blink, 0.5);
        assert_eq!(bank.tick(1.6), vec![Kind::Blink, Kind::Blink, Kind::Blink]);
    }

    #[test]
    fn cancel_removes_timer_and_rejects_stale_ids() {
        let mut bank = TimerBank::new();
        let id = bank.schedule_once(Kind::DashEnd, 1.0);
        bank.cancel(id).expect("cancel live timer");
        assert_eq!(bank.cancel(id), Err(SchedError::UnknownTimer(0)));
        assert!(bank.tick(2.0).is_empty());
    }

    #[test]
    fn fired_one_shot_leaves_a_stale_handle() {
        let mut bank = TimerBank::new();
        let id = bank.schedule_once(Kind::DashEnd, 0.1);
        assert_eq!(bank.tick(0.2), vec![Kind::DashEnd]);
        assert!(!bank.is_active(id));
        assert!(bank.cancel(id).is_err());
    }

    #[test]
    fn timers_fire_in_schedule_order_within_a_tick() {
        let mut bank = TimerBank::new();
        bank.schedule_once(Kind::Blink, 0.1);
        bank.schedule_once(Kind::DashEnd, 0.1);
        assert_eq!(bank.tick(0.2), vec![Kind::Blink, Kind::DashEnd]);
    }

    #[test]
    fn clear_empties_the_bank() {
        let mut bank = TimerBank::new();
        bank.schedule_once(Kind::DashEnd, 1.0);
        bank.schedule_repeating(Kind::Blink, 1.0);
        bank.clear();
        assert_eq!(bank.active_count(), 0);
        assert!(bank.tick(5.0).is_empty());
    }

    #[test]
    fn once_tween_completes_and_is_removed() {
        let mut bank = TweenBank::new();
        let id = bank.start(Kind::Blink, 1.0, TweenLoop::Once);
        assert!(bank.tick(0.5).is_empty());
        assert_eq!(bank.progress(id), Some(0.5));
        assert_eq!(bank.tick(0.5), vec![Kind::Blink]);
        assert_eq!(bank.progress(id), None);
        assert_eq!(bank.active_count(), 0);
    }

    #[test]
    fn ping_pong_tween_oscillates_and_never_completes() {
        let mut bank = TweenBank::new();
        let id = bank.start(Kind::Blink, 1.0, TweenLoop::PingPong);

        assert!(bank.tick(0.25).is_empty());
        assert_eq!(bank.progress(id), Some(0.25));
        assert!(bank.tick(1.0).is_empty());
        let value = bank.progress(id).expect("still active");
        assert!((value - 0.75).abs() < 0.0001);
        assert!(bank.tick(10.0).is_empty());
        assert_eq!(bank.active_count(), 1);
    }

    #[test]
    fn tween_cancel_rejects_stale_ids() {
        let mut bank = TweenBank::new();
        let id = bank.start(Kind::Blink, 1.0, TweenLoop::PingPong);
        bank.cancel(id).expect("cancel live tween");
        assert_eq!(bank.cancel(id), Err(SchedError::UnknownTween(0)));
    }

    #[test]
    fn tween_progress_clamps_only_at_completion_boundary() {
        let mut bank = TweenBank::new();
        let id = bank.start(Kind::DashEnd, 2.0, TweenLoop::Once);
        bank.tick(1.0);
        assert_eq!(bank.progress(id), Some(0.5));
        bank.tick(0.5);
        assert_eq!(bank.progress(id), Some(0.75));
    }
}
