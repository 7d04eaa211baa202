// Software blitter - CPU rect copy with nearest-neighbour scaling

use super::DrawSurface;
use crate::core::math::Rect;
use crate::engine::assets::{AssetManager, SheetHandle};
use image::RgbaImage;

/// A CPU-side drawing surface backed by an RGBA frame buffer.
///
/// Destination rectangles are clipped against the frame; source samples
/// that fall outside their sheet are skipped rather than faulted, so
/// malformed geometry degrades visually instead of crashing.
pub struct SoftwareSurface<'a> {
    frame: &'a mut RgbaImage,
    assets: &'a AssetManager,
}

impl<'a> SoftwareSurface<'a> {
    /// Create a surface over a frame buffer for one frame's draws
    pub fn new(frame: &'a mut RgbaImage, assets: &'a AssetManager) -> Self {
        Self { frame, assets }
    }

    /// Fill the whole frame with one color
    pub fn clear(&mut self, color: [u8; 4]) {
        for pixel in self.frame.pixels_mut() {
            pixel.0 = color;
        }
    }
}

impl DrawSurface for SoftwareSurface<'_> {
    fn blit(&mut self, sheet: SheetHandle, src: Rect, dst: Rect) {
        let Some(sheet) = self.assets.sheet(sheet) else {
            return;
        };
        if src.w == 0 || src.h == 0 || dst.w == 0 || dst.h == 0 {
            return;
        }

        let frame_rect = Rect::new(0, 0, self.frame.width(), self.frame.height());
        let Some(visible) = dst.intersection(&frame_rect) else {
            return;
        };

        for py in visible.y..visible.bottom() {
            for px in visible.x..visible.right() {
                // Nearest-neighbour sample in sheet space
                let rel_x = (px - dst.x) as i64;
                let rel_y = (py - dst.y) as i64;
                let sx = src.x as i64 + rel_x * src.w as i64 / dst.w as i64;
                let sy = src.y as i64 + rel_y * src.h as i64 / dst.h as i64;

                if sx < 0 || sy < 0 || sx >= sheet.width() as i64 || sy >= sheet.height() as i64 {
                    continue;
                }

                let sample = *sheet.pixels().get_pixel(sx as u32, sy as u32);
                // Simple alpha test: fully transparent source pixels are skipped
                if sample.0[3] == 0 {
                    continue;
                }

                self.frame.put_pixel(px as u32, py as u32, sample);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::SpriteSheet;
    use image::Rgba;

    fn checker_assets() -> (AssetManager, SheetHandle) {
        // 2x1 sheet: left pixel red, right pixel blue
        let mut pixels = RgbaImage::new(2, 1);
        pixels.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        pixels.put_pixel(1, 0, Rgba([0, 0, 255, 255]));

        let mut assets = AssetManager::new("assets");
        let handle = assets
            .insert_sheet("checker.png", SpriteSheet::from_pixels("checker.png", pixels))
            .unwrap();
        (assets, handle)
    }

    #[test]
    fn test_blit_copies_pixels() {
        let (assets, handle) = checker_assets();
        let mut frame = RgbaImage::new(4, 4);

        let mut surface = SoftwareSurface::new(&mut frame, &assets);
        surface.blit(handle, Rect::new(0, 0, 2, 1), Rect::new(1, 1, 2, 1));

        assert_eq!(frame.get_pixel(1, 1).0, [255, 0, 0, 255]);
        assert_eq!(frame.get_pixel(2, 1).0, [0, 0, 255, 255]);
        // Untouched pixel stays zeroed
        assert_eq!(frame.get_pixel(0, 0).0, [0, 0, 0, 0]);
    }

    #[test]
    fn test_blit_scales_destination() {
        let (assets, handle) = checker_assets();
        let mut frame = RgbaImage::new(4, 2);

        // 2x1 source doubled to 4x2
        let mut surface = SoftwareSurface::new(&mut frame, &assets);
        surface.blit(handle, Rect::new(0, 0, 2, 1), Rect::new(0, 0, 4, 2));

        assert_eq!(frame.get_pixel(0, 0).0, [255, 0, 0, 255]);
        assert_eq!(frame.get_pixel(1, 1).0, [255, 0, 0, 255]);
        assert_eq!(frame.get_pixel(2, 0).0, [0, 0, 255, 255]);
        assert_eq!(frame.get_pixel(3, 1).0, [0, 0, 255, 255]);
    }

    #[test]
    fn test_blit_clips_offscreen() {
        let (assets, handle) = checker_assets();
        let mut frame = RgbaImage::new(2, 2);

        let mut surface = SoftwareSurface::new(&mut frame, &assets);
        // Mostly off the left edge; must not panic
        surface.blit(handle, Rect::new(0, 0, 2, 1), Rect::new(-1, 0, 2, 1));

        assert_eq!(frame.get_pixel(0, 0).0, [0, 0, 255, 255]);
    }

    #[test]
    fn test_blit_out_of_range_source_degrades_silently() {
        let (assets, handle) = checker_assets();
        let mut frame = RgbaImage::new(2, 2);

        let mut surface = SoftwareSurface::new(&mut frame, &assets);
        // Source rect larger than the sheet: out-of-range samples skipped
        surface.blit(handle, Rect::new(0, 0, 8, 8), Rect::new(0, 0, 2, 2));

        assert_eq!(frame.get_pixel(0, 0).0, [255, 0, 0, 255]);
    }

    #[test]
    fn test_clear() {
        let (assets, _) = checker_assets();
        let mut frame = RgbaImage::new(2, 2);
        let mut surface = SoftwareSurface::new(&mut frame, &assets);
        surface.clear([7, 7, 7, 255]);
        assert_eq!(frame.get_pixel(1, 1).0, [7, 7, 7, 255]);
    }
}
