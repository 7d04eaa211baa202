// Input state tracking and per-tick snapshots

use super::action::Action;
use std::collections::HashSet;

/// The immutable input view handed to entity updates.
///
/// Taken once per tick from [`InputState`]; entities read these flags
/// instead of any process-wide mutable state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub attack: bool,
}

impl InputSnapshot {
    /// True if any movement flag is set
    pub fn any_direction(&self) -> bool {
        self.up || self.down || self.left || self.right
    }
}

/// Tracks which actions are currently held and which changed this frame
#[derive(Debug, Default)]
pub struct InputState {
    /// Actions that are currently pressed
    pressed: HashSet<Action>,

    /// Actions that were just pressed this frame
    just_pressed: HashSet<Action>,

    /// Actions that were just released this frame
    just_released: HashSet<Action>,
}

impl InputState {
    /// Create a new input state
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if an action is currently pressed
    pub fn is_pressed(&self, action: Action) -> bool {
        self.pressed.contains(&action)
    }

    /// Check if an action was just pressed this frame
    pub fn just_pressed(&self, action: Action) -> bool {
        self.just_pressed.contains(&action)
    }

    /// Check if an action was just released this frame
    pub fn just_released(&self, action: Action) -> bool {
        self.just_released.contains(&action)
    }

    /// Register an action press
    pub(crate) fn press(&mut self, action: Action) {
        if self.pressed.insert(action) {
            self.just_pressed.insert(action);
        }
    }

    /// Register an action release
    pub(crate) fn release(&mut self, action: Action) {
        if self.pressed.remove(&action) {
            self.just_released.insert(action);
        }
    }

    /// Clear frame-specific state. Call once per frame after all events.
    pub(crate) fn end_frame(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
    }

    /// Reset all input state
    pub fn reset(&mut self) {
        self.pressed.clear();
        self.just_pressed.clear();
        self.just_released.clear();
    }

    /// Take an immutable snapshot of the movement and attack flags
    pub fn snapshot(&self) -> InputSnapshot {
        InputSnapshot {
            up: self.is_pressed(Action::MoveUp),
            down: self.is_pressed(Action::MoveDown),
            left: self.is_pressed(Action::MoveLeft),
            right: self.is_pressed(Action::MoveRight),
            attack: self.is_pressed(Action::Attack),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_and_release() {
        let mut state = InputState::new();
        state.press(Action::MoveLeft);
        assert!(state.is_pressed(Action::MoveLeft));
        assert!(state.just_pressed(Action::MoveLeft));

        state.release(Action::MoveLeft);
        assert!(!state.is_pressed(Action::MoveLeft));
        assert!(state.just_released(Action::MoveLeft));
    }

    #[test]
    fn test_end_frame_clears_edges() {
        let mut state = InputState::new();
        state.press(Action::Attack);
        state.end_frame();

        assert!(state.is_pressed(Action::Attack));
        assert!(!state.just_pressed(Action::Attack));
    }

    #[test]
    fn test_repeat_press_is_not_just_pressed_again() {
        let mut state = InputState::new();
        state.press(Action::MoveUp);
        state.end_frame();
        state.press(Action::MoveUp); // OS key repeat
        assert!(!state.just_pressed(Action::MoveUp));
    }

    #[test]
    fn test_snapshot_reflects_pressed() {
        let mut state = InputState::new();
        state.press(Action::MoveRight);
        state.press(Action::Attack);

        let snap = state.snapshot();
        assert!(snap.right);
        assert!(snap.attack);
        assert!(!snap.left);
        assert!(snap.any_direction());
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut state = InputState::new();
        state.press(Action::MoveDown);
        let snap = state.snapshot();

        state.release(Action::MoveDown);
        // The snapshot is a copy and does not change
        assert!(snap.down);
        assert!(!state.snapshot().down);
    }

    #[test]
    fn test_release_unpressed_action() {
        let mut state = InputState::new();
        state.release(Action::Attack);
        assert!(!state.just_released(Action::Attack));
    }
}
