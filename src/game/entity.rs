// Entity model - one closed type covering every object in a level

use super::animation::Animation;
use super::player::PlayerBehavior;
use super::state_machine::AnimationStateMachine;
use crate::core::math::Rect;
use crate::engine::assets::SheetHandle;
use crate::engine::input::InputSnapshot;
use crate::engine::renderer::DrawSurface;
use glam::Vec2;

/// What kind of object an entity is.
///
/// A closed tag instead of an inheritance chain: the variants differ
/// only in constant data (source rects, collision, clip geometry), so
/// there is nothing to dispatch virtually over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityTag {
    Dirt,
    Wall,
    Staircase,
    HealthPotion,
    LifeBuff,
    StrengthBuff,
    Goblin,
    Beholder,
    Player,
}

/// How an entity gets its pixels
#[derive(Debug, Clone)]
pub enum EntitySprite {
    /// A fixed sub-rectangle of a sheet (tiles, walls, idle enemies)
    Fixed { sheet: SheetHandle, source: Rect },

    /// A single looping clip (powerups)
    Clip(Animation),

    /// A full state machine (the player character)
    Machine(AnimationStateMachine),
}

/// One object in the level: position, logical size, an optional
/// collision flag, and a sprite source.
///
/// Entities are created once during level assembly and live for the
/// session; the level is static.
#[derive(Debug)]
pub struct Entity {
    pub tag: EntityTag,
    pub position: Vec2,
    pub size: Vec2,
    /// Marks the entity as blocking movement. Consumed by external
    /// collision logic; not all variants set it.
    pub collision: bool,
    pub sprite: EntitySprite,
    /// Present only on the player character
    pub behavior: Option<PlayerBehavior>,
}

impl Entity {
    /// A stationary entity drawn from a fixed sheet sub-rectangle
    pub fn fixed(
        tag: EntityTag,
        sheet: SheetHandle,
        source: Rect,
        position: Vec2,
        size: Vec2,
        collision: bool,
    ) -> Self {
        Self {
            tag,
            position,
            size,
            collision,
            sprite: EntitySprite::Fixed { sheet, source },
            behavior: None,
        }
    }

    /// An entity that plays one looping clip
    pub fn animated(tag: EntityTag, clip: Animation, position: Vec2, size: Vec2) -> Self {
        Self {
            tag,
            position,
            size,
            collision: false,
            sprite: EntitySprite::Clip(clip),
            behavior: None,
        }
    }

    /// The player character: a state machine plus behavior
    pub fn player(
        machine: AnimationStateMachine,
        behavior: PlayerBehavior,
        position: Vec2,
        size: Vec2,
    ) -> Self {
        Self {
            tag: EntityTag::Player,
            position,
            size,
            collision: false,
            sprite: EntitySprite::Machine(machine),
            behavior: Some(behavior),
        }
    }

    /// Advance logical state by one tick.
    ///
    /// Inert variants do nothing; the player maps the input snapshot to
    /// a state request and a position delta.
    pub fn update(&mut self, tick: f32, input: &InputSnapshot) {
        if let (Some(behavior), EntitySprite::Machine(machine)) =
            (&mut self.behavior, &mut self.sprite)
        {
            behavior.update(tick, input, &mut self.position, machine);
        }
    }

    /// Draw the entity, advancing any owned animation clock by `tick`.
    /// Issues exactly one blit.
    pub fn draw(&mut self, tick: f32, surface: &mut dyn DrawSurface) {
        match &mut self.sprite {
            EntitySprite::Fixed { sheet, source } => {
                let dst = Rect::new(
                    self.position.x.round() as i32,
                    self.position.y.round() as i32,
                    self.size.x.round() as u32,
                    self.size.y.round() as u32,
                );
                surface.blit(*sheet, *source, dst);
            }
            EntitySprite::Clip(clip) => {
                let scale = scale_for(clip.frame_size().0, self.size.x);
                clip.render(tick, surface, self.position, scale);
            }
            EntitySprite::Machine(machine) => {
                let scale = scale_for(machine.current_clip().frame_size().0, self.size.x);
                machine.render(tick, surface, self.position, scale);
            }
        }
    }
}

/// Uniform scale that maps a frame width onto an entity width
fn scale_for(frame_width: u32, entity_width: f32) -> f32 {
    if frame_width == 0 {
        return 1.0;
    }
    entity_width / frame_width as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::{AssetHandle, AssetId};
    use crate::engine::renderer::BlitRecorder;

    fn sheet() -> SheetHandle {
        AssetHandle::new(AssetId::from_path("map.png"))
    }

    fn wall() -> Entity {
        Entity::fixed(
            EntityTag::Wall,
            sheet(),
            Rect::new(64, 0, 64, 64),
            Vec2::new(96.0, 32.0),
            Vec2::new(32.0, 32.0),
            true,
        )
    }

    #[test]
    fn test_fixed_entity_flags() {
        let wall = wall();
        assert_eq!(wall.tag, EntityTag::Wall);
        assert!(wall.collision);
        assert!(wall.behavior.is_none());
    }

    #[test]
    fn test_inert_update_is_noop() {
        let mut wall = wall();
        let before = wall.position;
        let input = InputSnapshot {
            right: true,
            attack: true,
            ..Default::default()
        };
        wall.update(1.0, &input);
        assert_eq!(wall.position, before);
    }

    #[test]
    fn test_fixed_draw_issues_one_blit() {
        let mut wall = wall();
        let mut recorder = BlitRecorder::new();
        wall.draw(0.016, &mut recorder);

        assert_eq!(recorder.len(), 1);
        let cmd = recorder.last().unwrap();
        assert_eq!(cmd.src, Rect::new(64, 0, 64, 64));
        // Static tiles stretch their 64px source onto the 32px cell
        assert_eq!(cmd.dst, Rect::new(96, 32, 32, 32));
    }

    #[test]
    fn test_animated_draw_advances_clock() {
        let clip = Animation::row_major(sheet(), 192, 32, 32, 32, 6, 6, 0.167, true).unwrap();
        let mut potion = Entity::animated(
            EntityTag::HealthPotion,
            clip,
            Vec2::new(10.0, 20.0),
            Vec2::new(32.0, 32.0),
        );

        let mut recorder = BlitRecorder::new();
        potion.draw(0.2, &mut recorder);

        let cmd = recorder.last().unwrap();
        // 0.2s at 0.167s per frame lands on frame 1
        assert_eq!(cmd.src, Rect::new(32, 0, 32, 32));
        assert_eq!(cmd.dst, Rect::new(10, 20, 32, 32));
    }
}
