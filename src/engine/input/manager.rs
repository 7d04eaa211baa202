// Input manager - translates winit events into action state

use super::action::{default_bindings, Action, InputSource};
use super::state::{InputSnapshot, InputState};
use std::collections::HashMap;
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::PhysicalKey;

/// Translates keyboard events into action state through a binding table
pub struct InputManager {
    /// Mapping from input sources to actions
    bindings: HashMap<InputSource, Action>,

    /// Current action state
    state: InputState,
}

impl InputManager {
    /// Create a new input manager with the default bindings
    pub fn new() -> Self {
        let mut bindings = HashMap::new();
        for (source, action) in default_bindings() {
            bindings.insert(source, action);
        }

        Self {
            bindings,
            state: InputState::new(),
        }
    }

    /// Process a keyboard event from winit
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        // Only physical key codes participate in bindings
        let PhysicalKey::Code(key_code) = event.physical_key else {
            return;
        };

        let Some(&action) = self.bindings.get(&InputSource::key(key_code)) else {
            return;
        };

        match event.state {
            ElementState::Pressed => {
                if !event.repeat {
                    self.state.press(action);
                }
            }
            ElementState::Released => {
                self.state.release(action);
            }
        }
    }

    /// Clear per-frame edge state. Call once per frame after all events.
    pub fn end_frame(&mut self) {
        self.state.end_frame();
    }

    /// Bind an input source to an action, replacing any existing binding
    /// for that source
    pub fn rebind(&mut self, source: InputSource, action: Action) {
        self.bindings.insert(source, action);
    }

    /// Get the action bound to a source
    pub fn action_for(&self, source: InputSource) -> Option<Action> {
        self.bindings.get(&source).copied()
    }

    /// Current action state
    pub fn state(&self) -> &InputState {
        &self.state
    }

    /// Mutable action state (tests and scripted input)
    pub fn state_mut(&mut self) -> &mut InputState {
        &mut self.state
    }

    /// Take the per-tick immutable snapshot
    pub fn snapshot(&self) -> InputSnapshot {
        self.state.snapshot()
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::keyboard::KeyCode;

    #[test]
    fn test_default_bindings_active() {
        let manager = InputManager::new();
        assert_eq!(
            manager.action_for(InputSource::key(KeyCode::KeyW)),
            Some(Action::MoveUp)
        );
        assert_eq!(
            manager.action_for(InputSource::key(KeyCode::Space)),
            Some(Action::Attack)
        );
    }

    #[test]
    fn test_rebind_replaces_source() {
        let mut manager = InputManager::new();
        manager.rebind(InputSource::key(KeyCode::KeyW), Action::Attack);
        assert_eq!(
            manager.action_for(InputSource::key(KeyCode::KeyW)),
            Some(Action::Attack)
        );
    }

    #[test]
    fn test_direct_state_manipulation() {
        let mut manager = InputManager::new();
        manager.state_mut().press(Action::MoveLeft);

        let snap = manager.snapshot();
        assert!(snap.left);
        assert!(!snap.right);
    }

    #[test]
    fn test_end_frame_keeps_held_keys() {
        let mut manager = InputManager::new();
        manager.state_mut().press(Action::MoveDown);
        manager.end_frame();

        assert!(manager.state().is_pressed(Action::MoveDown));
        assert!(!manager.state().just_pressed(Action::MoveDown));
    }
}
