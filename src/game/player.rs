// Player character - directional states and input-driven movement

use super::animation::Animation;
use super::entity::Entity;
use super::state_machine::AnimationStateMachine;
use super::GameError;
use crate::engine::assets::SheetHandle;
use crate::engine::input::InputSnapshot;
use glam::Vec2;
use log::warn;

/// Movement speed in pixels per second
pub const PLAYER_SPEED: f32 = 100.0;

/// Starting health
pub const PLAYER_MAX_HEALTH: i32 = 24;

// Character sheet geometry: one strip per 64px row, 32x64 frames.
const SHEET_WIDTH: u32 = 192;
const SHEET_HEIGHT: u32 = 512;
const FRAME_WIDTH: u32 = 32;
const FRAME_HEIGHT: u32 = 64;
const FRAME_DURATION: f32 = 0.10;

/// Which way the player is facing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Facing {
    Up,
    Down,
    Left,
    Right,
}

/// The player's logical states: one clip per action and direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerState {
    Idle(Facing),
    Run(Facing),
    Attack(Facing),
}

impl PlayerState {
    /// The state-machine key for this state
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle(Facing::Up) => "idle-up",
            Self::Idle(Facing::Down) => "idle-down",
            Self::Idle(Facing::Left) => "idle-left",
            Self::Idle(Facing::Right) => "idle-right",
            Self::Run(Facing::Up) => "run-up",
            Self::Run(Facing::Down) => "run-down",
            Self::Run(Facing::Left) => "run-left",
            Self::Run(Facing::Right) => "run-right",
            Self::Attack(Facing::Up) => "attack-up",
            Self::Attack(Facing::Down) => "attack-down",
            Self::Attack(Facing::Left) => "attack-left",
            Self::Attack(Facing::Right) => "attack-right",
        }
    }

    /// Every player state, for machine construction
    pub fn all() -> [PlayerState; 12] {
        use Facing::*;
        [
            Self::Idle(Up),
            Self::Idle(Down),
            Self::Idle(Left),
            Self::Idle(Right),
            Self::Run(Up),
            Self::Run(Down),
            Self::Run(Left),
            Self::Run(Right),
            Self::Attack(Up),
            Self::Attack(Down),
            Self::Attack(Left),
            Self::Attack(Right),
        ]
    }

    /// Sheet row origin and frame count for this state's strip
    fn strip(&self) -> (u32, u32) {
        match self {
            Self::Idle(Facing::Down) => (0, 2),
            Self::Idle(Facing::Left) => (64, 2),
            Self::Idle(Facing::Up) => (128, 2),
            Self::Idle(Facing::Right) => (192, 2),
            Self::Run(Facing::Down) => (256, 2),
            Self::Run(Facing::Left) => (320, 6),
            Self::Run(Facing::Up) => (384, 2),
            Self::Run(Facing::Right) => (448, 6),
            // Attack strips share rows with the run strips but read
            // further into them.
            Self::Attack(Facing::Down) => (256, 5),
            Self::Attack(Facing::Left) => (320, 4),
            Self::Attack(Facing::Up) => (384, 6),
            Self::Attack(Facing::Right) => (448, 4),
        }
    }

    /// Build this state's clip over the character sheet
    fn clip(&self, sheet: SheetHandle) -> Result<Animation, GameError> {
        let (origin_y, frames) = self.strip();
        Animation::packed(
            sheet,
            SHEET_WIDTH,
            SHEET_HEIGHT,
            0,
            origin_y,
            FRAME_WIDTH,
            FRAME_HEIGHT,
            frames,
            FRAME_DURATION,
            true,
        )
    }
}

/// Mutable player state outside the animation machine
#[derive(Debug, Clone)]
pub struct PlayerBehavior {
    pub speed: f32,
    pub health: i32,
    pub facing: Facing,
}

impl PlayerBehavior {
    pub fn new() -> Self {
        Self {
            speed: PLAYER_SPEED,
            health: PLAYER_MAX_HEALTH,
            facing: Facing::Down,
        }
    }

    /// Map this tick's input snapshot to a state request and a position
    /// delta of `speed * tick` along the pressed axes.
    ///
    /// Left/right and up/down are exclusive pairs, but one of each can be
    /// active in the same tick; the vertical request wins the animation.
    /// Attack overrides movement for the state request only. Re-requesting
    /// the active state is a no-op in the machine, so held keys never
    /// restart a clip.
    pub fn update(
        &mut self,
        tick: f32,
        input: &InputSnapshot,
        position: &mut Vec2,
        machine: &mut AnimationStateMachine,
    ) {
        let step = self.speed * tick;
        let mut requested = None;

        if input.right {
            requested = Some(PlayerState::Run(Facing::Right));
            position.x += step;
        } else if input.left {
            requested = Some(PlayerState::Run(Facing::Left));
            position.x -= step;
        }

        if input.up {
            requested = Some(PlayerState::Run(Facing::Up));
            position.y -= step;
        } else if input.down {
            requested = Some(PlayerState::Run(Facing::Down));
            position.y += step;
        }

        if let Some(PlayerState::Run(facing)) = requested {
            self.facing = facing;
        }

        if input.attack {
            requested = Some(PlayerState::Attack(self.facing));
        }

        let state = requested.unwrap_or(PlayerState::Idle(self.facing));
        if let Err(e) = machine.set_state(state.name()) {
            // Unreachable with the standard machine; degrade visibly in logs
            warn!("player state request failed: {}", e);
        }
    }
}

impl Default for PlayerBehavior {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the player's full state machine over the character sheet
pub fn player_machine(sheet: SheetHandle) -> Result<AnimationStateMachine, GameError> {
    let initial = PlayerState::Idle(Facing::Down);
    let mut machine = AnimationStateMachine::new(initial.name(), initial.clip(sheet)?);
    for state in PlayerState::all() {
        if state != initial {
            machine.add_state(state.name(), state.clip(sheet)?);
        }
    }
    Ok(machine)
}

/// Spawn the player entity at a position
pub fn spawn_player(sheet: SheetHandle, position: Vec2) -> Result<Entity, GameError> {
    let machine = player_machine(sheet)?;
    Ok(Entity::player(
        machine,
        PlayerBehavior::new(),
        position,
        Vec2::new(FRAME_WIDTH as f32, FRAME_HEIGHT as f32),
    ))
}
