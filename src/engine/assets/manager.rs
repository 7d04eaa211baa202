// Central sprite-sheet manager

use super::{AssetError, AssetHandle, AssetId, AssetLoader, SheetHandle, SpriteSheet};
use anyhow::Result;
use log::info;
use std::collections::HashMap;
use std::path::Path;

/// Central asset manager for the game
///
/// Sheets are queued by name up front, loaded in one pass, and looked up
/// by handle afterwards. The manager owns every decoded sheet; the rest
/// of the game only ever holds non-owning [`SheetHandle`]s.
pub struct AssetManager {
    /// Disk loader
    loader: AssetLoader,

    /// Sheet names queued for loading
    queue: Vec<String>,

    /// Loaded sheets
    sheets: HashMap<AssetId, SpriteSheet>,

    /// Name to ID mapping
    sheet_paths: HashMap<String, AssetId>,
}

impl AssetManager {
    /// Create a new asset manager rooted at the given path
    pub fn new<P: AsRef<Path>>(asset_path: P) -> Self {
        Self {
            loader: AssetLoader::new(asset_path),
            queue: Vec::new(),
            sheets: HashMap::new(),
            sheet_paths: HashMap::new(),
        }
    }

    /// Queue a sheet for loading. Queueing the same name twice is a no-op.
    pub fn queue_sheet(&mut self, name: &str) {
        if self.sheet_paths.contains_key(name) || self.queue.iter().any(|n| n == name) {
            return;
        }
        self.queue.push(name.to_string());
    }

    /// Load every queued sheet from disk, returning the number loaded.
    ///
    /// Loading is synchronous; callers proceed once this returns instead
    /// of waiting on a completion callback.
    pub fn load_all(&mut self) -> Result<usize> {
        let queued: Vec<String> = self.queue.drain(..).collect();
        let count = queued.len();

        for name in queued {
            let bytes = self.loader.load_bytes(&name)?;
            let sheet = SpriteSheet::from_bytes(&name, &bytes)?;
            self.insert(&name, sheet)?;
        }

        info!("Loaded {} sprite sheet(s)", count);
        Ok(count)
    }

    /// Register an already-decoded sheet (procedural sheets and tests)
    pub fn insert_sheet(&mut self, name: &str, sheet: SpriteSheet) -> Result<SheetHandle> {
        self.insert(name, sheet)
    }

    fn insert(&mut self, name: &str, sheet: SpriteSheet) -> Result<SheetHandle> {
        if self.sheet_paths.contains_key(name) {
            return Err(AssetError::AlreadyLoaded(name.to_string()).into());
        }

        let id = AssetId::from_path(name);
        self.sheets.insert(id, sheet);
        self.sheet_paths.insert(name.to_string(), id);
        Ok(AssetHandle::new(id))
    }

    /// Get the handle for a loaded sheet by name
    pub fn handle(&self, name: &str) -> Result<SheetHandle> {
        self.sheet_paths
            .get(name)
            .map(|&id| AssetHandle::new(id))
            .ok_or_else(|| AssetError::NotFound(name.to_string()).into())
    }

    /// Get a sheet by handle
    pub fn sheet(&self, handle: SheetHandle) -> Option<&SpriteSheet> {
        self.sheets.get(&handle.id())
    }

    /// Number of loaded sheets
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// Get the asset loader
    pub fn loader(&self) -> &AssetLoader {
        &self.loader
    }
}
