// Decoded sprite-sheet pixel data

use super::AssetError;
use anyhow::Result;
use image::RgbaImage;

/// A decoded sprite sheet.
///
/// One sheet typically packs many animation frames in a grid; the sheet
/// itself is read-only after load and shared by every animation that
/// references it.
pub struct SpriteSheet {
    name: String,
    pixels: RgbaImage,
}

impl SpriteSheet {
    /// Decode a sheet from encoded image bytes (PNG/JPEG)
    pub fn from_bytes(name: &str, bytes: &[u8]) -> Result<Self> {
        let image = image::load_from_memory(bytes)
            .map_err(|e| AssetError::Decode(name.to_string(), e.to_string()))?;

        Ok(Self {
            name: name.to_string(),
            pixels: image.to_rgba8(),
        })
    }

    /// Create a sheet from raw RGBA pixels (procedural sheets and tests)
    pub fn from_pixels(name: &str, pixels: RgbaImage) -> Self {
        Self {
            name: name.to_string(),
            pixels,
        }
    }

    /// Create a solid-color sheet of the given size
    pub fn from_color(name: &str, width: u32, height: u32, color: [u8; 4]) -> Self {
        let pixels = RgbaImage::from_pixel(width, height, image::Rgba(color));
        Self::from_pixels(name, pixels)
    }

    /// Sheet name (the path it was loaded from)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sheet width in pixels
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Sheet height in pixels
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Raw pixel access
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }
}

impl std::fmt::Debug for SpriteSheet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpriteSheet")
            .field("name", &self.name)
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sheet_from_color() {
        let sheet = SpriteSheet::from_color("solid.png", 64, 32, [255, 0, 0, 255]);
        assert_eq!(sheet.width(), 64);
        assert_eq!(sheet.height(), 32);
        assert_eq!(sheet.pixels().get_pixel(0, 0).0, [255, 0, 0, 255]);
    }

    #[test]
    fn test_sheet_from_bad_bytes() {
        let result = SpriteSheet::from_bytes("broken.png", &[0, 1, 2, 3]);
        assert!(result.is_err());
    }
}
