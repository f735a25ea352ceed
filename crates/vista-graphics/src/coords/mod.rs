//! Coordinate and geometry types shared by views and transforms.
//!
//! World space:
//! - Arbitrary units chosen by the caller
//! - Origin top-left
//! - +X right, +Y down
//!
//! Views map world space to normalized device coordinates ([-1, 1], +Y up).

mod rect;
mod vec2;
mod viewport;

pub use rect::Rect;
pub use vec2::Vec2;
pub use viewport::{PixelRect, Viewport};
