// Game systems
//
// This module contains the dungeon game built on top of the engine:
// - Sprite-sheet animation playback and sheet addressing
// - The animation state machine driving the player character
// - The closed entity model (tiles, powerups, enemies, player)
// - Level assembly from a token grid
// - The registration-ordered entity world

pub mod animation;
pub mod entity;
pub mod level;
pub mod player;
pub mod state_machine;
pub mod world;

// Re-export commonly used types
pub use animation::{Animation, SheetLayout};
pub use entity::{Entity, EntitySprite, EntityTag};
pub use level::{LevelEntities, LevelGrid, SpawnCategory, SpawnTable};
pub use player::{Facing, PlayerBehavior, PlayerState};
pub use state_machine::AnimationStateMachine;
pub use world::World;

/// Animation and state machine errors
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("Unknown animation state: {0}")]
    UnknownState(String),

    #[error("Invalid sheet geometry: {0}")]
    InvalidGeometry(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_error_display() {
        let err = GameError::UnknownState("run-north".to_string());
        assert_eq!(err.to_string(), "Unknown animation state: run-north");
    }
}
