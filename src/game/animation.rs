// Sprite-sheet animation playback

use super::GameError;
use crate::core::math::Rect;
use crate::engine::assets::SheetHandle;
use crate::engine::renderer::DrawSurface;
use glam::Vec2;

/// How a clip's frames are arranged within its sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetLayout {
    /// Frames fill a fixed-width grid from the top-left of the sheet:
    /// `col = frame % columns`, `row = frame / columns`.
    RowMajor { columns: u32 },

    /// The strip starts at an arbitrary pixel offset on its first row and
    /// wraps onto full-width rows beneath it. The horizontal offset applies
    /// only on the first row; every later row starts at column zero.
    PackedOrigin { origin_x: u32, origin_y: u32 },
}

/// A single animation clip over a shared sprite sheet.
///
/// The sheet itself is owned by the asset manager and referenced here by
/// handle; the playback clock (`elapsed`) is owned exclusively by this
/// instance, so two entities playing the same strip never share timing.
#[derive(Debug, Clone)]
pub struct Animation {
    /// Non-owning reference to the backing sheet
    sheet: SheetHandle,
    /// Sheet dimensions in pixels, used for row-wrap addressing
    sheet_width: u32,
    sheet_height: u32,
    /// Size of one frame in pixels
    frame_width: u32,
    frame_height: u32,
    /// Total frames in the strip
    frame_count: u32,
    /// Seconds per frame, constant across the strip
    frame_duration: f32,
    /// Cached `frame_duration * frame_count`
    total_duration: f32,
    /// Seconds accumulated since the clip started or last looped
    elapsed: f32,
    /// Whether the clip wraps on completion or freezes on its last frame
    looping: bool,
    /// Frame arrangement within the sheet
    layout: SheetLayout,
}

impl Animation {
    /// Create a new clip, validating the sheet geometry.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        sheet: SheetHandle,
        sheet_width: u32,
        sheet_height: u32,
        frame_width: u32,
        frame_height: u32,
        frame_count: u32,
        frame_duration: f32,
        looping: bool,
        layout: SheetLayout,
    ) -> Result<Self, GameError> {
        if frame_width == 0 || frame_height == 0 {
            return Err(GameError::InvalidGeometry("zero frame size".to_string()));
        }
        if frame_count == 0 {
            return Err(GameError::InvalidGeometry("zero frame count".to_string()));
        }
        if !(frame_duration > 0.0) {
            return Err(GameError::InvalidGeometry(
                "non-positive frame duration".to_string(),
            ));
        }
        if frame_width > sheet_width || frame_height > sheet_height {
            return Err(GameError::InvalidGeometry(format!(
                "{}x{} frame does not fit a {}x{} sheet",
                frame_width, frame_height, sheet_width, sheet_height
            )));
        }
        match layout {
            SheetLayout::RowMajor { columns } => {
                if columns == 0 {
                    return Err(GameError::InvalidGeometry("zero columns".to_string()));
                }
            }
            SheetLayout::PackedOrigin { origin_x, origin_y } => {
                if origin_x >= sheet_width || origin_y >= sheet_height {
                    return Err(GameError::InvalidGeometry(format!(
                        "origin ({}, {}) outside a {}x{} sheet",
                        origin_x, origin_y, sheet_width, sheet_height
                    )));
                }
            }
        }

        Ok(Self {
            sheet,
            sheet_width,
            sheet_height,
            frame_width,
            frame_height,
            frame_count,
            frame_duration,
            total_duration: frame_duration * frame_count as f32,
            elapsed: 0.0,
            looping,
            layout,
        })
    }

    /// Row-major clip starting at the sheet's top-left
    #[allow(clippy::too_many_arguments)]
    pub fn row_major(
        sheet: SheetHandle,
        sheet_width: u32,
        sheet_height: u32,
        frame_width: u32,
        frame_height: u32,
        columns: u32,
        frame_count: u32,
        frame_duration: f32,
        looping: bool,
    ) -> Result<Self, GameError> {
        Self::new(
            sheet,
            sheet_width,
            sheet_height,
            frame_width,
            frame_height,
            frame_count,
            frame_duration,
            looping,
            SheetLayout::RowMajor { columns },
        )
    }

    /// Packed clip starting at an arbitrary pixel origin
    #[allow(clippy::too_many_arguments)]
    pub fn packed(
        sheet: SheetHandle,
        sheet_width: u32,
        sheet_height: u32,
        origin_x: u32,
        origin_y: u32,
        frame_width: u32,
        frame_height: u32,
        frame_count: u32,
        frame_duration: f32,
        looping: bool,
    ) -> Result<Self, GameError> {
        Self::new(
            sheet,
            sheet_width,
            sheet_height,
            frame_width,
            frame_height,
            frame_count,
            frame_duration,
            looping,
            SheetLayout::PackedOrigin { origin_x, origin_y },
        )
    }

    /// Advance the playback clock. Must be called exactly once per render
    /// step; calling twice double-advances.
    ///
    /// A looping clip that completes wraps by subtracting exactly one
    /// cycle, not a modulo: a tick longer than the whole clip leaves
    /// `elapsed` past the end until the next wrap catches up.
    pub fn advance(&mut self, tick: f32) {
        self.elapsed += tick;
        if self.is_complete() && self.looping {
            self.elapsed -= self.total_duration;
        }
    }

    /// Whether the clip has played through one full cycle
    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.total_duration
    }

    /// Raw frame index: `floor(elapsed / frame_duration)`, unclamped.
    /// Callers applying completion policy should use [`source_rect`],
    /// which clamps to the strip.
    ///
    /// [`source_rect`]: Animation::source_rect
    pub fn current_frame_index(&self) -> u32 {
        (self.elapsed / self.frame_duration) as u32
    }

    /// The sheet sub-rectangle for the current frame.
    ///
    /// The frame index is clamped to the last frame, so a completed
    /// non-looping clip keeps rendering its final frame.
    pub fn source_rect(&self) -> Rect {
        let frame = self.current_frame_index().min(self.frame_count - 1);

        let (sx, sy) = match self.layout {
            SheetLayout::RowMajor { columns } => {
                let col = frame % columns;
                let row = frame / columns;
                (col * self.frame_width, row * self.frame_height)
            }
            SheetLayout::PackedOrigin { origin_x, origin_y } => {
                // Closed-form replacement for the repeated-subtraction wrap:
                // the first row holds whatever fits right of the origin,
                // every later row holds floor(sheet_w / frame_w) frames.
                let first_row_capacity = (self.sheet_width - origin_x) / self.frame_width;
                if frame < first_row_capacity {
                    (origin_x + frame * self.frame_width, origin_y)
                } else {
                    let full_row_capacity = self.sheet_width / self.frame_width;
                    let rem = frame - first_row_capacity;
                    let row = 1 + rem / full_row_capacity;
                    let col = rem % full_row_capacity;
                    (col * self.frame_width, origin_y + row * self.frame_height)
                }
            }
        };

        Rect::new(sx as i32, sy as i32, self.frame_width, self.frame_height)
    }

    /// Advance by `tick`, then blit the current frame at `dest`.
    pub fn render(&mut self, tick: f32, surface: &mut dyn DrawSurface, dest: Vec2, scale: f32) {
        self.advance(tick);

        let src = self.source_rect();
        let dst = Rect::new(
            dest.x.round() as i32,
            dest.y.round() as i32,
            (self.frame_width as f32 * scale).round() as u32,
            (self.frame_height as f32 * scale).round() as u32,
        );
        surface.blit(self.sheet, src, dst);
    }

    /// Restart the clip from its first frame
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }

    /// Seconds accumulated since the clip started or last looped
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Whether the clip loops on completion
    pub fn is_looping(&self) -> bool {
        self.looping
    }

    /// Total frames in the strip
    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    /// Frame size in pixels
    pub fn frame_size(&self) -> (u32, u32) {
        (self.frame_width, self.frame_height)
    }

    /// One full cycle in seconds
    pub fn total_duration(&self) -> f32 {
        self.total_duration
    }

    /// The backing sheet handle
    pub fn sheet(&self) -> SheetHandle {
        self.sheet
    }
}
