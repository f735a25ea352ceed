//! Conversions between target pixels and world coordinates through a view.

use crate::coords::{PixelRect, Vec2};
use crate::error::Result;
use crate::native::ViewApi;

use super::View;

impl<A: ViewApi> View<A> {
    /// Pixel rectangle this view covers on a target of `target_size` pixels.
    pub fn viewport_pixels(&self, target_size: (u32, u32)) -> PixelRect {
        self.viewport.to_pixels(target_size)
    }

    /// World coordinates under `pixel` on a target of `target_size` pixels.
    pub fn map_pixel_to_coords(&self, pixel: Vec2, target_size: (u32, u32)) -> Result<Vec2> {
        let vp = self.viewport_pixels(target_size);

        let ndc = Vec2::new(
            -1.0 + 2.0 * (pixel.x - vp.left as f32) / vp.width as f32,
            1.0 - 2.0 * (pixel.y - vp.top as f32) / vp.height as f32,
        );

        Ok(self.inverse_transform()? * ndc)
    }

    /// Target pixel that `point` lands on, truncated toward zero.
    pub fn map_coords_to_pixel(&self, point: Vec2, target_size: (u32, u32)) -> Result<(i32, i32)> {
        let ndc = self.transform()? * point;
        let vp = self.viewport_pixels(target_size);

        Ok((
            ((ndc.x + 1.0) / 2.0 * vp.width as f32 + vp.left as f32) as i32,
            ((-ndc.y + 1.0) / 2.0 * vp.height as f32 + vp.top as f32) as i32,
        ))
    }
}
