//! The native resource interface consumed by the wrappers.
//!
//! A backend implements these traits over whatever actually owns the
//! resources (a C library behind FFI, or [`SoftwareViews`] in-process).
//! Handles are opaque: the wrapper layer never inspects them, it only hands
//! them back. Backends are not required to be defensive against misuse; the
//! wrapper layer guarantees that each owned handle is destroyed exactly once.

mod software;

pub use software::{ApiStats, SoftwareViews};

use crate::coords::{Rect, Vec2, Viewport};
use crate::handle::RawHandle;

/// Lifetime entry points common to every kind of native resource.
pub trait ResourceApi {
    /// Human-readable resource kind, used in errors and logs.
    const KIND: &'static str;

    /// Duplicates the resource behind `raw`. `None` signals failure.
    fn clone_raw(&self, raw: RawHandle) -> Option<RawHandle>;

    /// Destroys the resource behind `raw`.
    ///
    /// Callers must not destroy the same live handle twice.
    fn destroy(&self, raw: RawHandle);
}

/// Native view entry points.
///
/// The convenience mutators (`move_by`, `rotate_by`, `zoom`, `reset`) have
/// default implementations in terms of the accessors for backends that lack
/// dedicated entry points.
pub trait ViewApi: ResourceApi {
    /// Creates a view covering the default 1000x1000 region.
    fn create(&self) -> Option<RawHandle>;

    /// Creates a view covering `rect`.
    fn create_from_rect(&self, rect: Rect) -> Option<RawHandle>;

    fn center(&self, raw: RawHandle) -> Vec2;
    fn set_center(&self, raw: RawHandle, center: Vec2);

    /// Full extent of the visible region.
    fn size(&self, raw: RawHandle) -> Vec2;
    fn set_size(&self, raw: RawHandle, size: Vec2);

    /// Rotation in degrees.
    fn rotation(&self, raw: RawHandle) -> f32;
    fn set_rotation(&self, raw: RawHandle, degrees: f32);

    fn viewport(&self, raw: RawHandle) -> Viewport;
    fn set_viewport(&self, raw: RawHandle, viewport: Viewport);

    fn move_by(&self, raw: RawHandle, offset: Vec2) {
        let center = self.center(raw);
        self.set_center(raw, center + offset);
    }

    fn rotate_by(&self, raw: RawHandle, degrees: f32) {
        let rotation = self.rotation(raw);
        self.set_rotation(raw, rotation + degrees);
    }

    fn zoom(&self, raw: RawHandle, factor: f32) {
        let size = self.size(raw);
        self.set_size(raw, size * factor);
    }

    /// Re-centers on `rect` with its full extent; rotation returns to zero.
    fn reset(&self, raw: RawHandle, rect: Rect) {
        self.set_center(raw, rect.center());
        self.set_size(raw, rect.size);
        self.set_rotation(raw, 0.0);
    }
}
