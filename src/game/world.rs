// Entity world - registration-ordered update and draw

use super::entity::{Entity, EntityTag};
use crate::engine::input::InputSnapshot;
use crate::engine::renderer::DrawSurface;

/// Flat collection of every live entity.
///
/// Order is registration order and doubles as draw order: entities
/// added later paint over entities added earlier. Level assembly relies
/// on this to keep the floor under everything and the player on top.
#[derive(Default)]
pub struct World {
    entities: Vec<Entity>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entity; it draws above everything added before it
    pub fn add_entity(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    /// Advance every entity by one fixed tick
    pub fn update_all(&mut self, tick: f32, input: &InputSnapshot) {
        for entity in &mut self.entities {
            entity.update(tick, input);
        }
    }

    /// Draw every entity in registration order, advancing owned
    /// animation clocks by `tick`
    pub fn draw_all(&mut self, tick: f32, surface: &mut dyn DrawSurface) {
        for entity in &mut self.entities {
            entity.draw(tick, surface);
        }
    }

    /// All entities in registration order
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// The player entity, if one was registered
    pub fn player(&self) -> Option<&Entity> {
        self.entities.iter().find(|e| e.tag == EntityTag::Player)
    }

    /// The player entity, mutably
    pub fn player_mut(&mut self) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.tag == EntityTag::Player)
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
