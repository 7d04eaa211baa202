// Drawing surface abstraction

use crate::core::math::Rect;
use crate::engine::assets::SheetHandle;

/// A surface that sprites can be blitted onto.
///
/// `src` is a pixel sub-rectangle of the sheet; `dst` is where it lands
/// on the surface. The two may differ in size, in which case the copy is
/// scaled.
pub trait DrawSurface {
    fn blit(&mut self, sheet: SheetHandle, src: Rect, dst: Rect);
}

/// One recorded blit call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlitCommand {
    pub sheet: SheetHandle,
    pub src: Rect,
    pub dst: Rect,
}

/// A surface that records blit calls instead of drawing.
///
/// Used by tests to assert exactly which sheet sub-rectangle a draw call
/// selected and how many blits a frame issued.
#[derive(Debug, Default)]
pub struct BlitRecorder {
    commands: Vec<BlitCommand>,
}

impl BlitRecorder {
    /// Create a new empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded commands, in call order
    pub fn commands(&self) -> &[BlitCommand] {
        &self.commands
    }

    /// The most recent command
    pub fn last(&self) -> Option<&BlitCommand> {
        self.commands.last()
    }

    /// Number of recorded commands
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// True if nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Forget all recorded commands
    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl DrawSurface for BlitRecorder {
    fn blit(&mut self, sheet: SheetHandle, src: Rect, dst: Rect) {
        self.commands.push(BlitCommand { sheet, src, dst });
    }
}
