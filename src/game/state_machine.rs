// Animation state machine - named states mapped to clips

use super::animation::Animation;
use super::GameError;
use crate::engine::renderer::DrawSurface;
use glam::Vec2;
use std::collections::HashMap;

/// Maps named logical states to animation clips, with exactly one state
/// active at a time.
///
/// Switching to the state that is already active is a no-op, so an input
/// held across many ticks never restarts the clip. Switching to a
/// different state does **not** reset the incoming clip's clock unless
/// `reset_on_transition` is enabled: the non-resetting behavior can show
/// a mid-strip frame for one tick after a switch, which is the intended
/// default, not a bug.
#[derive(Debug, Clone)]
pub struct AnimationStateMachine {
    /// All registered states
    states: HashMap<String, Animation>,

    /// Name of the active state; always a key of `states`
    current: String,

    /// Whether entering a different state restarts its clip
    reset_on_transition: bool,
}

impl AnimationStateMachine {
    /// Create a machine seeded with its mandatory default state
    pub fn new(initial_name: &str, initial_clip: Animation) -> Self {
        let mut states = HashMap::new();
        states.insert(initial_name.to_string(), initial_clip);

        Self {
            states,
            current: initial_name.to_string(),
            reset_on_transition: false,
        }
    }

    /// Enable clip restarts on state transitions
    pub fn with_reset_on_transition(mut self) -> Self {
        self.reset_on_transition = true;
        self
    }

    /// Register a state. An existing state with the same name is
    /// silently overwritten.
    pub fn add_state(&mut self, name: &str, clip: Animation) {
        self.states.insert(name.to_string(), clip);
    }

    /// Switch to a named state.
    ///
    /// Requesting the active state is a no-op that preserves playback.
    /// Requesting an unregistered state fails and leaves the active
    /// state unchanged.
    pub fn set_state(&mut self, name: &str) -> Result<(), GameError> {
        if name == self.current {
            return Ok(());
        }
        if !self.states.contains_key(name) {
            return Err(GameError::UnknownState(name.to_string()));
        }

        self.current = name.to_string();
        if self.reset_on_transition {
            if let Some(clip) = self.states.get_mut(name) {
                clip.reset();
            }
        }
        Ok(())
    }

    /// Name of the active state
    pub fn current_state(&self) -> &str {
        &self.current
    }

    /// The active clip
    pub fn current_clip(&self) -> &Animation {
        // The constructor seeds `current` and set_state never stores a
        // missing key, so the lookup cannot fail.
        &self.states[&self.current]
    }

    /// The active clip, mutably
    pub fn current_clip_mut(&mut self) -> &mut Animation {
        self.states
            .get_mut(&self.current)
            .expect("current state is always registered")
    }

    /// Whether a state is registered
    pub fn contains(&self, name: &str) -> bool {
        self.states.contains_key(name)
    }

    /// Number of registered states
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Always false: construction requires a default state
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Advance the active clip by `tick` and blit its current frame
    pub fn render(&mut self, tick: f32, surface: &mut dyn DrawSurface, dest: Vec2, scale: f32) {
        self.current_clip_mut().render(tick, surface, dest, scale);
    }
}
