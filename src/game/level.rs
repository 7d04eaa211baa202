// Level assembly - building entities from a token grid

use super::animation::Animation;
use super::entity::{Entity, EntityTag};
use super::player::spawn_player;
use super::world::World;
use super::GameError;
use crate::core::math::Rect;
use crate::engine::assets::{AssetManager, SheetHandle};
use anyhow::Result;
use glam::Vec2;
use log::{debug, info};
use std::collections::HashMap;

/// Side of one grid cell in pixels
pub const TILE_SIZE: f32 = 32.0;

/// Which per-category list an assembled entity lands in.
///
/// Registration order (and therefore render order) is fixed:
/// floor, then stationary, then powerups, then enemies, then the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnCategory {
    Floor,
    Stationary,
    Powerup,
    Enemy,
    Player,
}

/// Builds the entities for one grid cell. A single token may yield
/// several entities (a powerup also lays its floor tile; the staircase
/// token also spawns the player above itself).
pub type SpawnFn = Box<dyn Fn(Vec2) -> Result<Vec<(SpawnCategory, Entity)>, GameError>>;

/// Token-to-spawner table consulted during assembly
#[derive(Default)]
pub struct SpawnTable {
    entries: HashMap<String, SpawnFn>,
}

impl SpawnTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a spawner for a token, replacing any existing one
    pub fn insert(&mut self, token: &str, spawner: SpawnFn) {
        self.entries.insert(token.to_string(), spawner);
    }

    /// Look up the spawner for a token
    pub fn get(&self, token: &str) -> Option<&SpawnFn> {
        self.entries.get(token)
    }

    /// Number of registered tokens
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no tokens are registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A rectangular grid of string tokens, addressed as `rows[row][col]`
#[derive(Debug, Clone)]
pub struct LevelGrid {
    rows: Vec<Vec<String>>,
}

impl LevelGrid {
    /// Build a grid from rows of tokens
    pub fn from_rows<R, T>(rows: R) -> Self
    where
        R: IntoIterator<Item = T>,
        T: IntoIterator,
        T::Item: Into<String>,
    {
        Self {
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        }
    }

    /// Number of columns (width of the first row)
    pub fn columns(&self) -> usize {
        self.rows.first().map_or(0, |row| row.len())
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    /// Token at a cell, if present
    pub fn token(&self, col: usize, row: usize) -> Option<&str> {
        self.rows.get(row)?.get(col).map(String::as_str)
    }
}

/// Entities produced by one assembly pass, grouped by category
#[derive(Default)]
pub struct LevelEntities {
    pub floor: Vec<Entity>,
    pub stationary: Vec<Entity>,
    pub powerups: Vec<Entity>,
    pub enemies: Vec<Entity>,
    pub player: Option<Entity>,
}

impl LevelEntities {
    /// Total entity count including the player
    pub fn len(&self) -> usize {
        self.floor.len()
            + self.stationary.len()
            + self.powerups.len()
            + self.enemies.len()
            + usize::from(self.player.is_some())
    }

    /// True if assembly produced nothing
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Register everything with the world in the fixed render order:
    /// floor, stationary, powerups, enemies, player.
    pub fn register_into(self, world: &mut World) {
        let count = self.len();
        for entity in self.floor {
            world.add_entity(entity);
        }
        for entity in self.stationary {
            world.add_entity(entity);
        }
        for entity in self.powerups {
            world.add_entity(entity);
        }
        for entity in self.enemies {
            world.add_entity(entity);
        }
        if let Some(player) = self.player {
            world.add_entity(player);
        }
        info!("Registered {} level entities", count);
    }
}

/// Walk the grid and build one entity set per occupied cell.
///
/// Scan order is columns outer, rows inner, matching the grid's
/// addressing; cell (col, row) lands at `(col, row) * TILE_SIZE`.
/// Tokens without a spawner are skipped.
pub fn assemble(grid: &LevelGrid, table: &SpawnTable) -> Result<LevelEntities, GameError> {
    let mut out = LevelEntities::default();

    for col in 0..grid.columns() {
        for row in 0..grid.rows() {
            let Some(token) = grid.token(col, row) else {
                continue;
            };
            let Some(spawner) = table.get(token) else {
                debug!("No spawner for token '{}' at ({}, {})", token, col, row);
                continue;
            };

            let position = Vec2::new(col as f32 * TILE_SIZE, row as f32 * TILE_SIZE);
            for (category, entity) in spawner(position)? {
                match category {
                    SpawnCategory::Floor => out.floor.push(entity),
                    SpawnCategory::Stationary => out.stationary.push(entity),
                    SpawnCategory::Powerup => out.powerups.push(entity),
                    SpawnCategory::Enemy => out.enemies.push(entity),
                    SpawnCategory::Player => out.player = Some(entity),
                }
            }
        }
    }

    Ok(out)
}

// Source-rect and clip constants for the standard entity set.
const DIRT_SRC: Rect = Rect { x: 0, y: 0, w: 64, h: 64 };
const WALL_SRC: Rect = Rect { x: 64, y: 0, w: 64, h: 64 };
const STAIRCASE_SRC: Rect = Rect { x: 32, y: 0, w: 16, h: 16 };
const GOBLIN_SRC: Rect = Rect { x: 0, y: 0, w: 32, h: 64 };
const BEHOLDER_SRC: Rect = Rect { x: 0, y: 0, w: 64, h: 64 };

fn dirt(sheet: SheetHandle, position: Vec2) -> Entity {
    Entity::fixed(
        EntityTag::Dirt,
        sheet,
        DIRT_SRC,
        position,
        Vec2::splat(TILE_SIZE),
        false,
    )
}

fn powerup_clip(
    sheet: SheetHandle,
    frames: u32,
    frame_duration: f32,
) -> Result<Animation, GameError> {
    // Powerup sheets are one 32px row, one column per frame
    Animation::row_major(sheet, frames * 32, 32, 32, 32, frames, frames, frame_duration, true)
}

/// The standard token set over the game's sheets.
///
/// Expects `map.png`, `tilesheet.png`, `potion.png`, `life.png`,
/// `strength.png`, `goblin.png`, `beholder.png`, and `main_dude.png`
/// to be loaded.
pub fn standard_spawn_table(assets: &AssetManager) -> Result<SpawnTable> {
    let map = assets.handle("map.png")?;
    let tilesheet = assets.handle("tilesheet.png")?;
    let potion = assets.handle("potion.png")?;
    let life = assets.handle("life.png")?;
    let strength = assets.handle("strength.png")?;
    let goblin = assets.handle("goblin.png")?;
    let beholder = assets.handle("beholder.png")?;
    let dude = assets.handle("main_dude.png")?;

    let mut table = SpawnTable::new();

    table.insert(
        "F",
        Box::new(move |pos| Ok(vec![(SpawnCategory::Floor, dirt(map, pos))])),
    );

    table.insert(
        "W",
        Box::new(move |pos| {
            let wall = Entity::fixed(
                EntityTag::Wall,
                map,
                WALL_SRC,
                pos,
                Vec2::splat(TILE_SIZE),
                true,
            );
            Ok(vec![(SpawnCategory::Stationary, wall)])
        }),
    );

    let staircase = move |pos: Vec2| {
        Entity::fixed(
            EntityTag::Staircase,
            tilesheet,
            STAIRCASE_SRC,
            pos,
            Vec2::splat(TILE_SIZE),
            true,
        )
    };

    // Entry staircase: also spawns the player one tile above it
    table.insert(
        "S",
        Box::new(move |pos| {
            let player_pos = Vec2::new(pos.x, pos.y - TILE_SIZE);
            Ok(vec![
                (SpawnCategory::Stationary, staircase(pos)),
                (SpawnCategory::Player, spawn_player(dude, player_pos)?),
            ])
        }),
    );

    // Exit staircase
    table.insert(
        "E",
        Box::new(move |pos| Ok(vec![(SpawnCategory::Stationary, staircase(pos))])),
    );

    let powerups: [(&str, EntityTag, SheetHandle, u32, f32); 3] = [
        ("pHealth", EntityTag::HealthPotion, potion, 6, 0.167),
        ("pLife", EntityTag::LifeBuff, life, 4, 0.25),
        ("pStrength", EntityTag::StrengthBuff, strength, 2, 0.5),
    ];
    for (token, tag, sheet, frames, duration) in powerups {
        table.insert(
            token,
            Box::new(move |pos| {
                let clip = powerup_clip(sheet, frames, duration)?;
                let entity = Entity::animated(tag, clip, pos, Vec2::splat(TILE_SIZE));
                // Powerups sit on a floor tile of their own
                Ok(vec![
                    (SpawnCategory::Floor, dirt(map, pos)),
                    (SpawnCategory::Powerup, entity),
                ])
            }),
        );
    }

    let enemies: [(&str, EntityTag, SheetHandle, Rect, Vec2); 2] = [
        (
            "eGoblin",
            EntityTag::Goblin,
            goblin,
            GOBLIN_SRC,
            Vec2::new(TILE_SIZE, TILE_SIZE * 2.0),
        ),
        (
            "eBeholder",
            EntityTag::Beholder,
            beholder,
            BEHOLDER_SRC,
            Vec2::new(TILE_SIZE * 2.0, TILE_SIZE * 2.0),
        ),
    ];
    for (token, tag, sheet, src, size) in enemies {
        table.insert(
            token,
            Box::new(move |pos| {
                let entity = Entity::fixed(tag, sheet, src, pos, size, false);
                Ok(vec![
                    (SpawnCategory::Floor, dirt(map, pos)),
                    (SpawnCategory::Enemy, entity),
                ])
            }),
        );
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::SpriteSheet;

    fn assets() -> AssetManager {
        let mut assets = AssetManager::new("assets");
        for name in [
            "map.png",
            "tilesheet.png",
            "potion.png",
            "life.png",
            "strength.png",
            "goblin.png",
            "beholder.png",
            "main_dude.png",
        ] {
            assets
                .insert_sheet(name, SpriteSheet::from_color(name, 512, 512, [0, 0, 0, 255]))
                .unwrap();
        }
        assets
    }

    fn grid() -> LevelGrid {
        LevelGrid::from_rows([
            vec!["W", "W", "W"],
            vec!["W", "F", "W"],
            vec!["W", "pHealth", "W"],
            vec!["W", "eGoblin", "W"],
            vec!["W", "S", "W"],
        ])
    }

    #[test]
    fn test_grid_dimensions() {
        let grid = grid();
        assert_eq!(grid.columns(), 3);
        assert_eq!(grid.rows(), 5);
        assert_eq!(grid.token(1, 2), Some("pHealth"));
        assert_eq!(grid.token(7, 0), None);
    }

    #[test]
    fn test_assemble_categories() {
        let assets = assets();
        let table = standard_spawn_table(&assets).unwrap();
        let level = assemble(&grid(), &table).unwrap();

        // 1 plain floor + 1 under the powerup + 1 under the enemy
        assert_eq!(level.floor.len(), 3);
        // 11 walls + 1 staircase
        assert_eq!(level.stationary.len(), 12);
        assert_eq!(level.powerups.len(), 1);
        assert_eq!(level.enemies.len(), 1);
        assert!(level.player.is_some());
    }

    #[test]
    fn test_player_spawns_above_staircase() {
        let assets = assets();
        let table = standard_spawn_table(&assets).unwrap();
        let level = assemble(&grid(), &table).unwrap();

        let player = level.player.unwrap();
        // Staircase token sits at cell (1, 4)
        assert_eq!(player.position, Vec2::new(TILE_SIZE, 3.0 * TILE_SIZE));
    }

    #[test]
    fn test_assembly_scan_is_column_major() {
        let assets = assets();
        let mut table = SpawnTable::new();
        let map = assets.handle("map.png").unwrap();
        table.insert(
            "F",
            Box::new(move |pos| Ok(vec![(SpawnCategory::Floor, dirt(map, pos))])),
        );

        // 2x2 grid of floor: columns outer, rows inner
        let grid = LevelGrid::from_rows([vec!["F", "F"], vec!["F", "F"]]);
        let level = assemble(&grid, &table).unwrap();

        let positions: Vec<Vec2> = level.floor.iter().map(|e| e.position).collect();
        assert_eq!(
            positions,
            vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(0.0, TILE_SIZE),
                Vec2::new(TILE_SIZE, 0.0),
                Vec2::new(TILE_SIZE, TILE_SIZE),
            ]
        );
    }

    #[test]
    fn test_unknown_tokens_are_skipped() {
        let assets = assets();
        let table = standard_spawn_table(&assets).unwrap();
        let grid = LevelGrid::from_rows([vec!["F", "???", "F"]]);
        let level = assemble(&grid, &table).unwrap();
        assert_eq!(level.len(), 2);
    }

    #[test]
    fn test_register_order() {
        let assets = assets();
        let table = standard_spawn_table(&assets).unwrap();
        let level = assemble(&grid(), &table).unwrap();

        let mut world = World::new();
        level.register_into(&mut world);

        let tags: Vec<EntityTag> = world.entities().iter().map(|e| e.tag).collect();
        // Floor first, player last
        assert_eq!(tags[0], EntityTag::Dirt);
        assert_eq!(*tags.last().unwrap(), EntityTag::Player);

        // No stationary tile appears before any floor tile
        let last_floor = tags.iter().rposition(|t| *t == EntityTag::Dirt).unwrap();
        let first_wall = tags.iter().position(|t| *t == EntityTag::Wall).unwrap();
        assert!(last_floor < first_wall);
    }

    #[test]
    fn test_spawn_table_requires_loaded_sheets() {
        let assets = AssetManager::new("assets");
        assert!(standard_spawn_table(&assets).is_err());
    }
}
