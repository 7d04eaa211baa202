// Rendering primitives
//
// The whole drawing interface is one primitive: copy a sub-rectangle of
// a sprite sheet onto a destination rectangle of a surface. Everything
// that draws goes through the `DrawSurface` trait, so rendering logic is
// testable against a recorder instead of real pixels.

mod software;
mod surface;

pub use software::SoftwareSurface;
pub use surface::{BlitCommand, BlitRecorder, DrawSurface};
