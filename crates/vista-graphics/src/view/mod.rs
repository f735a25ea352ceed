//! 2D camera over a native view handle.
//!
//! A [`View`] mirrors the logical state of its native view (center, size,
//! rotation, viewport). Every setter pushes the change across the native
//! boundary and updates the mirror in the same call. The world-to-NDC
//! transform and its inverse are derived lazily from center/size/rotation and
//! cached until one of those three changes; viewport changes leave them intact.
//!
//! Views are single-threaded (`!Send`, `!Sync`): the backend is shared through
//! `Rc` and the caches use `Cell`.

mod derive;
mod mapping;
mod policy;

pub use derive::derive_transform;
pub use policy::GeometryPolicy;

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use crate::coords::{Rect, Vec2, Viewport};
use crate::error::Result;
use crate::handle::{NativeHandle, Ownership, RawHandle};
use crate::native::{SoftwareViews, ViewApi};
use crate::transform::Transform;

/// Camera defining which region of the world is shown and where on the target.
pub struct View<A: ViewApi = SoftwareViews> {
    handle: NativeHandle<A>,

    center: Vec2,
    /// Full extent, not half.
    size: Vec2,
    rotation: f32,
    viewport: Viewport,

    policy: GeometryPolicy,

    /// `Some` only while valid for the current center/size/rotation.
    transform: Cell<Option<Transform>>,
    inverse_transform: Cell<Option<Transform>>,
}

impl<A: ViewApi> View<A> {
    /// View of the 1000x1000 region at the origin: center (500, 500).
    pub fn new(api: Rc<A>) -> Result<Self> {
        let handle = NativeHandle::create(api, A::create)?;
        Ok(Self::owned(handle, Rect::new(0.0, 0.0, 1000.0, 1000.0)))
    }

    /// View showing exactly `rect`.
    pub fn from_rect(api: Rc<A>, rect: Rect) -> Result<Self> {
        GeometryPolicy::Strict.check_size(rect.size)?;
        let handle = NativeHandle::create(api, |api| api.create_from_rect(rect))?;
        Ok(Self::owned(handle, rect))
    }

    /// View centered on `center` showing a region of full extent `size`.
    ///
    /// `size` is the full width/height, not the half-extent.
    pub fn from_center_size(api: Rc<A>, center: Vec2, size: Vec2) -> Result<Self> {
        Self::from_rect(api, Rect::from_center_size(center, size))
    }

    /// Wraps a native view owned elsewhere (e.g. a render target's default view).
    ///
    /// Logical state is read back from the native side. The handle is never
    /// destroyed by this wrapper. Changes made to the native view through other
    /// wrappers are not observed.
    pub fn from_handle(api: Rc<A>, raw: RawHandle) -> Self {
        Self::mirror_native(NativeHandle::external(api, raw), raw)
    }

    /// Builds the logical mirror from what the native view currently holds.
    fn mirror_native(handle: NativeHandle<A>, raw: RawHandle) -> Self {
        let api = handle.api();
        let center = api.center(raw);
        let size = api.size(raw);
        let rotation = api.rotation(raw);
        let viewport = api.viewport(raw);

        Self {
            handle,
            center,
            size,
            rotation,
            viewport,
            policy: GeometryPolicy::default(),
            transform: Cell::new(None),
            inverse_transform: Cell::new(None),
        }
    }

    fn owned(handle: NativeHandle<A>, rect: Rect) -> Self {
        Self {
            handle,
            center: rect.center(),
            size: rect.size,
            rotation: 0.0,
            viewport: Viewport::FULL,
            policy: GeometryPolicy::default(),
            transform: Cell::new(None),
            inverse_transform: Cell::new(None),
        }
    }

    /// Copies the native view into a new, owned one.
    ///
    /// The copy mirrors the cloned native state, which differs from this
    /// wrapper's mirror if another observer changed the shared view.
    pub fn try_clone(&self) -> Result<Self> {
        let handle = self.handle.try_clone()?;
        let raw = handle.raw()?;
        let mut copy = Self::mirror_native(handle, raw);
        copy.policy = self.policy;

        let same_inputs = copy.center == self.center
            && copy.size == self.size
            && copy.rotation == self.rotation;
        if same_inputs {
            copy.transform.set(self.transform.get());
            copy.inverse_transform.set(self.inverse_transform.get());
        }

        Ok(copy)
    }

    pub fn with_geometry_policy(mut self, policy: GeometryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn set_geometry_policy(&mut self, policy: GeometryPolicy) {
        self.policy = policy;
    }

    pub fn geometry_policy(&self) -> GeometryPolicy {
        self.policy
    }

    // ── handle ────────────────────────────────────────────────────────────

    pub fn raw_handle(&self) -> Result<RawHandle> {
        self.handle.raw()
    }

    pub fn ownership(&self) -> Ownership {
        self.handle.ownership()
    }

    pub fn is_owned(&self) -> bool {
        self.handle.is_owned()
    }

    pub fn is_released(&self) -> bool {
        self.handle.is_released()
    }

    /// Releases the native view now instead of on drop. Idempotent.
    ///
    /// Logical getters keep returning the last state; everything else fails
    /// with `UseAfterRelease`.
    pub fn release(&mut self) {
        self.handle.release();
        self.invalidate();
    }

    // ── logical state ─────────────────────────────────────────────────────

    pub fn center(&self) -> Vec2 {
        self.center
    }

    /// Full visible extent.
    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn half_size(&self) -> Vec2 {
        self.size / 2.0
    }

    /// Rotation in degrees, as last set (not normalized).
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    // ── mutators ──────────────────────────────────────────────────────────

    pub fn set_center(&mut self, center: Vec2) -> Result<()> {
        self.handle.with(|api, raw| api.set_center(raw, center))?;
        self.center = center;
        self.invalidate();
        Ok(())
    }

    /// Sets the full visible extent.
    pub fn set_size(&mut self, size: Vec2) -> Result<()> {
        self.policy.check_size(size)?;
        self.handle.with(|api, raw| api.set_size(raw, size))?;
        self.size = size;
        self.invalidate();
        Ok(())
    }

    pub fn set_rotation(&mut self, degrees: f32) -> Result<()> {
        self.handle.with(|api, raw| api.set_rotation(raw, degrees))?;
        self.rotation = degrees;
        self.invalidate();
        Ok(())
    }

    /// Sets the target fraction this view draws to. Transforms stay cached.
    pub fn set_viewport(&mut self, viewport: Viewport) -> Result<()> {
        self.handle.with(|api, raw| api.set_viewport(raw, viewport))?;
        self.viewport = viewport;
        Ok(())
    }

    /// Shows exactly `rect` again, with rotation back to zero.
    pub fn reset(&mut self, rect: Rect) -> Result<()> {
        self.policy.check_size(rect.size)?;
        self.handle.with(|api, raw| api.reset(raw, rect))?;
        self.center = rect.center();
        self.size = rect.size;
        self.rotation = 0.0;
        self.invalidate();
        Ok(())
    }

    /// Shifts the center by `offset`.
    pub fn move_by(&mut self, offset: Vec2) -> Result<()> {
        self.handle.with(|api, raw| api.move_by(raw, offset))?;
        self.center += offset;
        self.invalidate();
        Ok(())
    }

    /// Adds `degrees` to the current rotation.
    pub fn rotate(&mut self, degrees: f32) -> Result<()> {
        self.handle.with(|api, raw| api.rotate_by(raw, degrees))?;
        self.rotation += degrees;
        self.invalidate();
        Ok(())
    }

    /// Multiplies both extents by `factor`; `factor > 1` shows more of the world.
    pub fn zoom(&mut self, factor: f32) -> Result<()> {
        self.policy.check_zoom(factor)?;
        self.handle.with(|api, raw| api.zoom(raw, factor))?;
        self.size = self.size * factor;
        self.invalidate();
        Ok(())
    }

    // ── transforms ────────────────────────────────────────────────────────

    /// World-to-NDC transform for the current center/size/rotation.
    pub fn transform(&self) -> Result<Transform> {
        self.handle.raw()?;

        if let Some(t) = self.transform.get() {
            return Ok(t);
        }

        let t = derive_transform(self.center, self.size, self.rotation);
        log::trace!(
            "view transform recomputed: center={:?} size={:?} rotation={}",
            self.center,
            self.size,
            self.rotation
        );
        self.transform.set(Some(t));
        Ok(t)
    }

    /// NDC-to-world transform; inverse of [`View::transform`].
    pub fn inverse_transform(&self) -> Result<Transform> {
        if let Some(t) = self.inverse_transform.get() {
            self.handle.raw()?;
            return Ok(t);
        }

        let t = self.transform()?.inverse();
        self.inverse_transform.set(Some(t));
        Ok(t)
    }

    fn invalidate(&self) {
        self.transform.set(None);
        self.inverse_transform.set(None);
    }
}

impl<A: ViewApi> fmt::Debug for View<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("View")
            .field("handle", &self.handle)
            .field("center", &self.center)
            .field("size", &self.size)
            .field("rotation", &self.rotation)
            .field("viewport", &self.viewport)
            .field("policy", &self.policy)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::error::GraphicsError;
    use crate::native::ResourceApi;

    const EPS: f32 = 1e-4;

    fn api() -> Rc<SoftwareViews> {
        Rc::new(SoftwareViews::new())
    }

    fn view_at(center: Vec2, size: Vec2) -> View {
        View::from_center_size(api(), center, size).unwrap()
    }

    fn expected(view: &View) -> Transform {
        derive_transform(view.center(), view.size(), view.rotation())
    }

    // ── construction ──────────────────────────────────────────────────────

    #[test]
    fn default_view_covers_thousand_square() {
        let view = View::new(api()).unwrap();

        assert_eq!(view.center(), Vec2::new(500.0, 500.0));
        assert_eq!(view.size(), Vec2::new(1000.0, 1000.0));
        assert_eq!(view.half_size(), Vec2::new(500.0, 500.0));
        assert_eq!(view.rotation(), 0.0);
        assert_eq!(view.viewport(), Viewport::FULL);
        assert!(view.is_owned());
    }

    #[test]
    fn from_rect_centers_on_rect() {
        let view = View::from_rect(api(), Rect::new(10.0, 20.0, 100.0, 40.0)).unwrap();

        assert_eq!(view.center(), Vec2::new(60.0, 40.0));
        assert_eq!(view.size(), Vec2::new(100.0, 40.0));
    }

    #[test]
    fn from_center_size_takes_full_extent() {
        let view = view_at(Vec2::new(5.0, 5.0), Vec2::new(2.0, 2.0));

        assert_eq!(view.center(), Vec2::new(5.0, 5.0));
        assert_eq!(view.size(), Vec2::new(2.0, 2.0));
    }

    #[test]
    fn zero_size_rect_is_rejected_without_native_call() {
        let api = api();
        let err = View::from_rect(Rc::clone(&api), Rect::new(0.0, 0.0, 0.0, 10.0)).unwrap_err();

        assert!(err.is_invalid_geometry());
        assert_eq!(api.stats().created, 0);
    }

    #[test]
    fn native_state_matches_mirror() {
        let api = api();
        let mut view = View::new(Rc::clone(&api)).unwrap();
        let raw = view.raw_handle().unwrap();

        view.set_center(Vec2::new(1.0, 2.0)).unwrap();
        view.zoom(0.5).unwrap();
        view.rotate(10.0).unwrap();
        view.set_viewport(Viewport::new(0.0, 0.0, 0.5, 0.5)).unwrap();

        assert_eq!(api.center(raw), view.center());
        assert_eq!(api.size(raw), view.size());
        assert_eq!(api.rotation(raw), view.rotation());
        assert_eq!(api.viewport(raw), view.viewport());
    }

    // ── transform derivation ──────────────────────────────────────────────

    #[test]
    fn identity_case() {
        let view = view_at(Vec2::zero(), Vec2::new(2.0, 2.0));
        assert_eq!(
            view.transform().unwrap(),
            Transform::new(1.0, 0.0, 0.0, 0.0, -1.0, 0.0)
        );
    }

    #[test]
    fn translation_case() {
        let view = view_at(Vec2::new(5.0, 5.0), Vec2::new(2.0, 2.0));
        assert_eq!(
            view.transform().unwrap(),
            Transform::new(1.0, 0.0, -5.0, 0.0, -1.0, 5.0)
        );
    }

    #[test]
    fn every_mutator_invalidates() {
        let mut view = view_at(Vec2::new(3.0, 4.0), Vec2::new(10.0, 20.0));
        let before = view.transform().unwrap();

        view.set_center(Vec2::new(-1.0, 0.0)).unwrap();
        assert_eq!(view.transform().unwrap(), expected(&view));
        assert_ne!(view.transform().unwrap(), before);

        view.set_size(Vec2::new(4.0, 4.0)).unwrap();
        assert_eq!(view.transform().unwrap(), expected(&view));

        view.set_rotation(33.0).unwrap();
        assert_eq!(view.transform().unwrap(), expected(&view));

        view.move_by(Vec2::new(2.0, 2.0)).unwrap();
        assert_eq!(view.transform().unwrap(), expected(&view));

        view.rotate(12.0).unwrap();
        assert_eq!(view.transform().unwrap(), expected(&view));

        view.zoom(3.0).unwrap();
        assert_eq!(view.transform().unwrap(), expected(&view));

        view.reset(Rect::new(0.0, 0.0, 8.0, 6.0)).unwrap();
        assert_eq!(view.rotation(), 0.0);
        assert_eq!(view.transform().unwrap(), expected(&view));
    }

    #[test]
    fn rotate_then_unrotate_restores_transform() {
        let mut view = view_at(Vec2::new(120.0, -40.0), Vec2::new(300.0, 200.0));
        let before = view.transform().unwrap();

        view.rotate(73.5).unwrap();
        view.rotate(-73.5).unwrap();

        assert!(view.transform().unwrap().approx_eq(&before, EPS));
    }

    #[test]
    fn zoom_twice_equals_zoom_once() {
        let mut a = view_at(Vec2::new(7.0, 9.0), Vec2::new(64.0, 48.0));
        let mut b = a.try_clone().unwrap();

        a.zoom(2.0).unwrap();
        a.zoom(2.0).unwrap();
        b.zoom(4.0).unwrap();

        assert!(a.size().abs_diff_eq(b.size(), EPS));
        assert!(a.transform().unwrap().approx_eq(&b.transform().unwrap(), 1e-6));
    }

    #[test]
    fn inverse_transform_maps_ndc_back_to_world() {
        let mut view = view_at(Vec2::new(400.0, 300.0), Vec2::new(800.0, 600.0));
        view.rotate(20.0).unwrap();

        let world = Vec2::new(123.0, 456.0);
        let ndc = view.transform().unwrap() * world;
        let back = view.inverse_transform().unwrap() * ndc;

        assert!(back.abs_diff_eq(world, 1e-2));
    }

    // ── geometry policy ───────────────────────────────────────────────────

    #[test]
    fn strict_policy_rejects_degenerate_size_and_zoom() {
        let mut view = view_at(Vec2::zero(), Vec2::new(2.0, 2.0));
        let before = view.transform().unwrap();

        assert_eq!(
            view.set_size(Vec2::new(0.0, 2.0)),
            Err(GraphicsError::InvalidSize(Vec2::new(0.0, 2.0)))
        );
        assert_eq!(view.zoom(0.0), Err(GraphicsError::InvalidZoom(0.0)));
        assert_eq!(view.zoom(-1.0), Err(GraphicsError::InvalidZoom(-1.0)));
        assert!(view.reset(Rect::new(0.0, 0.0, -1.0, 1.0)).is_err());

        // Rejected calls leave state and cache untouched.
        assert_eq!(view.size(), Vec2::new(2.0, 2.0));
        assert_eq!(view.transform().unwrap(), before);
    }

    #[test]
    fn permissive_policy_allows_inverted_view() {
        let mut view = view_at(Vec2::zero(), Vec2::new(2.0, 2.0))
            .with_geometry_policy(GeometryPolicy::Permissive);

        view.zoom(-1.0).unwrap();

        assert_eq!(view.size(), Vec2::new(-2.0, -2.0));
        assert_eq!(
            view.transform().unwrap(),
            Transform::new(-1.0, 0.0, 0.0, 0.0, 1.0, 0.0)
        );
    }

    // ── ownership ─────────────────────────────────────────────────────────

    #[test]
    fn clone_is_independent() {
        let api = api();
        let mut a = View::new(Rc::clone(&api)).unwrap();
        let mut b = a.try_clone().unwrap();

        assert!(b.is_owned());
        assert_ne!(a.raw_handle().unwrap(), b.raw_handle().unwrap());

        b.move_by(Vec2::new(10.0, 0.0)).unwrap();
        a.rotate(45.0).unwrap();

        assert_eq!(a.center(), Vec2::new(500.0, 500.0));
        assert_eq!(b.rotation(), 0.0);
        assert_eq!(api.center(a.raw_handle().unwrap()), Vec2::new(500.0, 500.0));
        assert_eq!(api.rotation(b.raw_handle().unwrap()), 0.0);
    }

    #[test]
    fn clone_of_stale_observer_mirrors_native_copy() {
        let api = api();
        let raw = api.create_from_rect(Rect::new(0.0, 0.0, 800.0, 600.0)).unwrap();

        let first = View::from_handle(Rc::clone(&api), raw);
        first.transform().unwrap();
        let mut second = View::from_handle(Rc::clone(&api), raw);
        second.set_center(Vec2::zero()).unwrap();

        let mut copy = first.try_clone().unwrap();
        let copy_raw = copy.raw_handle().unwrap();
        assert_eq!(copy.center(), Vec2::zero());
        assert_eq!(copy.center(), api.center(copy_raw));
        assert_eq!(copy.transform().unwrap(), expected(&copy));

        copy.move_by(Vec2::new(1.0, 1.0)).unwrap();
        assert_eq!(copy.center(), Vec2::new(1.0, 1.0));
        assert_eq!(api.center(copy_raw), copy.center());

        drop(copy);
        api.destroy(raw);
    }

    #[test]
    fn clone_keeps_cached_transform_when_inputs_match() {
        let mut view = view_at(Vec2::new(3.0, 3.0), Vec2::new(6.0, 4.0))
            .with_geometry_policy(GeometryPolicy::Permissive);
        view.rotate(12.0).unwrap();
        let t = view.transform().unwrap();

        let copy = view.try_clone().unwrap();
        assert_eq!(copy.geometry_policy(), GeometryPolicy::Permissive);
        assert_eq!(copy.transform.get(), Some(t));
        assert_eq!(copy.viewport(), view.viewport());
    }

    #[test]
    fn release_is_idempotent_and_blocks_use() {
        let api = api();
        let mut view = View::new(Rc::clone(&api)).unwrap();
        view.transform().unwrap();

        view.release();
        view.release();
        drop(view);

        let stats = api.stats();
        assert_eq!(stats.destroyed, 1);
        assert_eq!(stats.rejected_destroys, 0);
        assert_eq!(api.live_count(), 0);
    }

    #[test]
    fn released_view_reports_use_after_release() {
        let mut view = View::new(api()).unwrap();
        view.transform().unwrap();
        view.inverse_transform().unwrap();
        view.release();

        let err = GraphicsError::UseAfterRelease { kind: "view" };
        assert_eq!(view.transform(), Err(err.clone()));
        assert_eq!(view.inverse_transform(), Err(err.clone()));
        assert_eq!(view.set_center(Vec2::zero()), Err(err.clone()));
        assert_eq!(view.zoom(2.0), Err(err.clone()));
        assert_eq!(view.raw_handle(), Err(err));
        assert!(view.try_clone().is_err());

        // Last logical state is still readable.
        assert_eq!(view.center(), Vec2::new(500.0, 500.0));
    }

    #[test]
    fn external_view_reads_native_state_and_never_destroys() {
        let api = api();
        let raw = api.create_from_rect(Rect::new(0.0, 0.0, 640.0, 480.0)).unwrap();
        api.set_rotation(raw, 15.0);

        let mut view = View::from_handle(Rc::clone(&api), raw);
        assert!(!view.is_owned());
        assert_eq!(view.ownership(), Ownership::External);
        assert_eq!(view.center(), Vec2::new(320.0, 240.0));
        assert_eq!(view.rotation(), 15.0);

        view.move_by(Vec2::new(1.0, 1.0)).unwrap();
        assert_eq!(api.center(raw), Vec2::new(321.0, 241.0));

        view.release();
        drop(view);

        assert!(api.is_live(raw));
        assert_eq!(api.stats().destroyed, 0);
    }

    #[test]
    fn clone_failure_surfaces_as_creation_error() {
        let api = Rc::new(SoftwareViews::with_capacity(1));
        let view = View::new(Rc::clone(&api)).unwrap();

        assert_eq!(
            view.try_clone().unwrap_err(),
            GraphicsError::ResourceCreation { kind: "view", operation: "clone" }
        );
        assert!(View::new(api).is_err());
    }

    // ── properties ────────────────────────────────────────────────────────

    #[derive(Debug, Clone)]
    enum Op {
        Center(f32, f32),
        Size(f32, f32),
        Rotation(f32),
        Move(f32, f32),
        Rotate(f32),
        Zoom(f32),
        Viewport(f32, f32, f32, f32),
        Read,
    }

    fn op() -> impl Strategy<Value = Op> {
        let coord = -1000.0f32..1000.0;
        let extent = 0.5f32..2000.0;
        let angle = -720.0f32..720.0;
        let unit = 0.0f32..1.0;
        prop_oneof![
            (coord.clone(), coord.clone()).prop_map(|(x, y)| Op::Center(x, y)),
            (extent.clone(), extent).prop_map(|(x, y)| Op::Size(x, y)),
            angle.clone().prop_map(Op::Rotation),
            (coord.clone(), coord).prop_map(|(x, y)| Op::Move(x, y)),
            angle.prop_map(Op::Rotate),
            (0.8f32..1.25).prop_map(Op::Zoom),
            (unit.clone(), unit.clone(), unit.clone(), unit)
                .prop_map(|(x, y, w, h)| Op::Viewport(x, y, w, h)),
            Just(Op::Read),
        ]
    }

    fn apply(view: &mut View, op: &Op) {
        match *op {
            Op::Center(x, y) => view.set_center(Vec2::new(x, y)).unwrap(),
            Op::Size(x, y) => view.set_size(Vec2::new(x, y)).unwrap(),
            Op::Rotation(d) => view.set_rotation(d).unwrap(),
            Op::Move(x, y) => view.move_by(Vec2::new(x, y)).unwrap(),
            Op::Rotate(d) => view.rotate(d).unwrap(),
            Op::Zoom(f) => view.zoom(f).unwrap(),
            Op::Viewport(x, y, w, h) => view.set_viewport(Viewport::new(x, y, w, h)).unwrap(),
            Op::Read => {
                view.transform().unwrap();
            }
        }
    }

    proptest! {
        #[test]
        fn cached_transform_always_matches_recomputation(ops in prop::collection::vec(op(), 1..40)) {
            let mut view = View::new(api()).unwrap();
            for op in &ops {
                apply(&mut view, op);
                prop_assert_eq!(view.transform().unwrap(), expected(&view));
                prop_assert_eq!(
                    view.inverse_transform().unwrap(),
                    expected(&view).inverse()
                );
            }
        }

        #[test]
        fn viewport_changes_never_touch_transform(
            viewports in prop::collection::vec((0.0f32..1.0, 0.0f32..1.0, 0.0f32..1.0, 0.0f32..1.0), 1..10),
            rotation in -360.0f32..360.0,
        ) {
            let mut view = view_at(Vec2::new(10.0, 20.0), Vec2::new(30.0, 40.0));
            view.set_rotation(rotation).unwrap();
            let before = view.transform().unwrap();

            for (x, y, w, h) in viewports {
                view.set_viewport(Viewport::new(x, y, w, h)).unwrap();
            }

            prop_assert_eq!(view.transform().unwrap(), before);
        }

        #[test]
        fn zoom_composes_multiplicatively(f in 0.25f32..4.0, g in 0.25f32..4.0) {
            let mut a = view_at(Vec2::new(50.0, 50.0), Vec2::new(100.0, 80.0));
            let mut b = a.try_clone().unwrap();

            a.zoom(f).unwrap();
            a.zoom(g).unwrap();
            b.zoom(f * g).unwrap();

            prop_assert!(a.size().abs_diff_eq(b.size(), 1e-3));
            prop_assert!(a.transform().unwrap().approx_eq(&b.transform().unwrap(), 1e-5));
        }
    }
}
