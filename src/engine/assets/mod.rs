// Sprite-sheet asset system
//
// Provides centralized queueing, loading, and lookup of sprite sheets.
// Sheets are decoded once, held by the manager, and referenced everywhere
// else through small copyable handles.

mod handle;
mod loader;
mod manager;
mod sheet;

pub use handle::{AssetHandle, AssetId, SheetAsset, SheetHandle};
pub use loader::AssetLoader;
pub use manager::AssetManager;
pub use sheet::SpriteSheet;

/// Asset loading errors
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("Asset already loaded: {0}")]
    AlreadyLoaded(String),

    #[error("Failed to decode image {0}: {1}")]
    Decode(String, String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
