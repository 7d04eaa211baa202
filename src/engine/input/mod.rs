// Input handling system
//
// Keyboard events from winit are translated into game actions through a
// remappable binding table. Game code never reads key state directly:
// each update receives an immutable `InputSnapshot` taken once per tick,
// which keeps entity updates pure and testable.

pub mod action;
pub mod manager;
pub mod state;

// Re-export commonly used types
pub use action::{Action, InputSource};
pub use manager::InputManager;
pub use state::{InputSnapshot, InputState};
