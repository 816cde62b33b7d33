#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
}

const ACTION_COUNT: usize = 4;

#[derive(Debug, Clone, Copy, Default)]
struct ActionStates {
    down: [bool; ACTION_COUNT],
}

impl ActionStates {
    fn set(&mut self, action: InputAction, is_down: bool) {
        self.down[action.index()] = is_down;
    }

    fn is_down(&self, action: InputAction) -> bool {
        self.down[action.index()]
    }
}

impl InputAction {
    const fn index(self) -> usize {
        match self {
            InputAction::MoveUp => 0,
            InputAction::MoveDown => 1,
            InputAction::MoveLeft => 2,
            InputAction::MoveRight => 3,
        }
    }
}

/// One frame of player input. Held movement keys live in `actions`; the
/// remaining fields are edge-triggered (true only on the press frame).
#[derive(Debug, Clone, Copy, Default)]
pub struct InputSnapshot {
    actions: ActionStates,
    interact_pressed: bool,
    dash_pressed: bool,
    pause_pressed: bool,
    dismiss_pressed: bool,
    restart_pressed: bool,
    quit_requested: bool,
}

impl InputSnapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_action_down(mut self, action: InputAction, is_down: bool) -> Self {
        self.actions.set(action, is_down);
        self
    }

    pub fn with_interact_pressed(mut self, interact_pressed: bool) -> Self {
        self.interact_pressed = interact_pressed;
        self
    }

    pub fn with_dash_pressed(mut self, dash_pressed: bool) -> Self {
        self.dash_pressed = dash_pressed;
        self
    }

    pub fn with_pause_pressed(mut self, pause_pressed: bool) -> Self {
        self.pause_pressed = pause_pressed;
        self
    }

    pub fn with_dismiss_pressed(mut self, dismiss_pressed: bool) -> Self {
        self.dismiss_pressed = dismiss_pressed;
        self
    }

    pub fn with_restart_pressed(mut self, restart_pressed: bool) -> Self {
        self.restart_pressed = restart_pressed;
        self
    }

    pub fn with_quit_requested(mut self, quit_requested: bool) -> Self {
        self.quit_requested = quit_requested;
        self
    }

    pub fn is_down(&self, action: InputAction) -> bool {
        self.actions.is_down(action)
    }

    pub fn interact_pressed(&self) -> bool {
        self.interact_pressed
    }

    pub fn dash_pressed(&self) -> bool {
        self.dash_pressed
    }

    pub fn pause_pressed(&self) -> bool {
        self.pause_pressed
    }

    pub fn dismiss_pressed(&self) -> bool {
        self.dismiss_pressed
    }

    pub fn restart_pressed(&self) -> bool {
        self.restart_pressed
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_snapshot_has_nothing_pressed() {
        let snapshot = InputSnapshot::empty();
        assert!(!snapshot.is_down(InputAction::MoveUp));
        assert!(!snapshot.is_down(InputAction::MoveDown));
        assert!(!snapshot.is_down(InputAction::MoveLeft));
        assert!(!snapshot.is_down(InputAction::MoveRight));
        assert!(!snapshot.interact_pressed());
        assert!(!snapshot.dash_pressed());
        assert!(!snapshot.pause_pressed());
        assert!(!snapshot.dismiss_pressed());
        assert!(!snapshot.restart_pressed());
        assert!(!snapshot.quit_requested());
    }

    #[test]
    fn builders_round_trip_each_field() {
        let snapshot = InputSnapshot::empty()
            .with_action_down(InputAction::MoveLeft, true)
            .with_interact_pressed(true)
            .with_dash_pressed(true)
            .with_pause_pressed(true)
            .with_dismiss_pressed(true)
            .with_restart_pressed(true)
            .with_quit_requested(true);

        assert!(snapshot.is_down(InputAction::MoveLeft));
        assert!(!snapshot.is_down(InputAction::MoveRight));
        assert!(snapshot.interact_pressed());
        assert!(snapshot.dash_pressed());
        assert!(snapshot.pause_pressed());
        assert!(snapshot.dismiss_pressed());
        assert!(snapshot.restart_pressed());
        assert!(snapshot.quit_requested());
    }

    #[test]
    fn action_state_can_be_cleared_again() {
        let snapshot = InputSnapshot::empty()
            .with_action_down(InputAction::MoveUp, true)
            .with_action_down(InputAction::MoveUp, false);
        assert!(!snapshot.is_down(InputAction::MoveUp));
    }
}
