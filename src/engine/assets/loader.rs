// Sprite-sheet file loading

use super::AssetError;
use anyhow::Result;
use std::path::{Path, PathBuf};

/// Directory under the asset base path that holds sprite sheets
const SHEET_DIRECTORY: &str = "sheets";

/// Resolves sheet names to files on disk and reads their bytes
pub struct AssetLoader {
    base_path: PathBuf,
}

impl AssetLoader {
    /// Create a new asset loader with the given base path
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Get the full path for a sheet name
    pub fn resolve_path(&self, name: &str) -> PathBuf {
        self.base_path.join(SHEET_DIRECTORY).join(name)
    }

    /// Load sheet bytes from disk
    pub fn load_bytes(&self, name: &str) -> Result<Vec<u8>> {
        let path = self.resolve_path(name);

        if !path.exists() {
            return Err(AssetError::NotFound(path.to_string_lossy().to_string()).into());
        }

        Ok(std::fs::read(&path).map_err(AssetError::Io)?)
    }

    /// Check if a sheet exists on disk
    pub fn exists(&self, name: &str) -> bool {
        self.resolve_path(name).exists()
    }

    /// Get the base path
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loader_path_resolution() {
        let loader = AssetLoader::new("/game/assets");
        let path = loader.resolve_path("main_dude.png");
        assert_eq!(path.to_str().unwrap(), "/game/assets/sheets/main_dude.png");
    }

    #[test]
    fn test_loader_missing_file() {
        let loader = AssetLoader::new(".");
        assert!(!loader.exists("definitely_not_here.png"));
        assert!(loader.load_bytes("definitely_not_here.png").is_err());
    }
}
