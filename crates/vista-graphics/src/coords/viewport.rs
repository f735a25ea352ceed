use super::Rect;

/// Fraction of a render target that a view maps onto.
///
/// Components are normalized: `(0, 0, 1, 1)` covers the whole target. Values
/// outside `[0, 1]` are representable and stored as given; see [`is_normalized`].
///
/// [`is_normalized`]: Viewport::is_normalized
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Viewport {
    pub rect: Rect,
}

/// Integer rectangle in physical pixels of a render target.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct PixelRect {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl Viewport {
    /// The whole render target.
    pub const FULL: Viewport = Viewport::new(0.0, 0.0, 1.0, 1.0);

    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { rect: Rect::new(x, y, w, h) }
    }

    /// True when origin and size both lie in `[0, 1]` on each axis.
    pub fn is_normalized(self) -> bool {
        let unit = |v: f32| (0.0..=1.0).contains(&v);
        unit(self.rect.origin.x)
            && unit(self.rect.origin.y)
            && unit(self.rect.size.x)
            && unit(self.rect.size.y)
    }

    /// Resolves the viewport against a target of `(width, height)` pixels.
    ///
    /// Each edge is rounded half-up, matching how render targets place a view.
    pub fn to_pixels(self, (width, height): (u32, u32)) -> PixelRect {
        let w = width as f32;
        let h = height as f32;
        let Rect { origin, size } = self.rect;

        PixelRect {
            left: (0.5 + w * origin.x) as i32,
            top: (0.5 + h * origin.y) as i32,
            width: (0.5 + w * size.x) as i32,
            height: (0.5 + h * size.y) as i32,
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::FULL
    }
}
