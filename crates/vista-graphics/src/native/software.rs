use std::cell::RefCell;
use std::collections::HashMap;

use crate::coords::{Rect, Vec2, Viewport};
use crate::handle::RawHandle;

use super::{ResourceApi, ViewApi};

/// Native-side state of one view.
#[derive(Debug, Copy, Clone, PartialEq)]
struct ViewRecord {
    center: Vec2,
    size: Vec2,
    rotation: f32,
    viewport: Viewport,
}

impl ViewRecord {
    fn from_rect(rect: Rect) -> Self {
        Self {
            center: rect.center(),
            size: rect.size,
            rotation: 0.0,
            viewport: Viewport::FULL,
        }
    }
}

impl Default for ViewRecord {
    fn default() -> Self {
        Self::from_rect(Rect::new(0.0, 0.0, 1000.0, 1000.0))
    }
}

/// Call counters kept by [`SoftwareViews`].
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct ApiStats {
    /// Successful `create` / `create_from_rect` calls.
    pub created: u64,
    /// Successful `clone_raw` calls.
    pub cloned: u64,
    /// `destroy` calls that freed a live view.
    pub destroyed: u64,
    /// `destroy` calls on a handle that was not live (double free or foreign handle).
    pub rejected_destroys: u64,
}

#[derive(Debug)]
struct Registry {
    next_id: usize,
    views: HashMap<RawHandle, ViewRecord>,
    capacity: Option<usize>,
    stats: ApiStats,
}

/// In-process native view backend.
///
/// Holds view state in a handle table. Single-threaded: shared through `Rc`
/// and mutated through `&self` like a C library behind FFI would be.
///
/// A capacity limit can be set to make creation and cloning fail, which is
/// how allocation failure in a real native library presents to the wrappers.
#[derive(Debug)]
pub struct SoftwareViews {
    registry: RefCell<Registry>,
}

impl SoftwareViews {
    pub fn new() -> Self {
        Self {
            registry: RefCell::new(Registry {
                next_id: 1,
                views: HashMap::new(),
                capacity: None,
                stats: ApiStats::default(),
            }),
        }
    }

    /// Backend that refuses to hold more than `limit` live views.
    pub fn with_capacity(limit: usize) -> Self {
        let views = Self::new();
        views.registry.borrow_mut().capacity = Some(limit);
        views
    }

    pub fn stats(&self) -> ApiStats {
        self.registry.borrow().stats
    }

    pub fn live_count(&self) -> usize {
        self.registry.borrow().views.len()
    }

    pub fn is_live(&self, raw: RawHandle) -> bool {
        self.registry.borrow().views.contains_key(&raw)
    }

    fn insert(&self, record: ViewRecord) -> Option<RawHandle> {
        let mut reg = self.registry.borrow_mut();

        if reg.capacity.is_some_and(|limit| reg.views.len() >= limit) {
            log::debug!("software views: capacity {:?} reached", reg.capacity);
            return None;
        }

        let raw = RawHandle::from_raw(reg.next_id)?;
        reg.next_id = reg.next_id.wrapping_add(1).max(1);
        reg.views.insert(raw, record);
        Some(raw)
    }

    fn read<T>(&self, raw: RawHandle, f: impl FnOnce(&ViewRecord) -> T) -> T {
        let reg = self.registry.borrow();
        match reg.views.get(&raw) {
            Some(record) => f(record),
            None => {
                log::warn!("software views: read from unknown view {raw}");
                f(&ViewRecord::default())
            }
        }
    }

    fn write(&self, raw: RawHandle, f: impl FnOnce(&mut ViewRecord)) {
        let mut reg = self.registry.borrow_mut();
        match reg.views.get_mut(&raw) {
            Some(record) => f(record),
            None => log::warn!("software views: write to unknown view {raw} ignored"),
        }
    }
}

impl Default for SoftwareViews {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceApi for SoftwareViews {
    const KIND: &'static str = "view";

    fn clone_raw(&self, raw: RawHandle) -> Option<RawHandle> {
        let record = self.registry.borrow().views.get(&raw).copied();
        let Some(record) = record else {
            log::warn!("software views: clone of unknown view {raw}");
            return None;
        };

        let copy = self.insert(record)?;
        self.registry.borrow_mut().stats.cloned += 1;
        Some(copy)
    }

    fn destroy(&self, raw: RawHandle) {
        let mut reg = self.registry.borrow_mut();
        if reg.views.remove(&raw).is_some() {
            reg.stats.destroyed += 1;
        } else {
            reg.stats.rejected_destroys += 1;
            log::warn!("software views: destroy of unknown view {raw}");
        }
    }
}

impl ViewApi for SoftwareViews {
    fn create(&self) -> Option<RawHandle> {
        let raw = self.insert(ViewRecord::default())?;
        self.registry.borrow_mut().stats.created += 1;
        Some(raw)
    }

    fn create_from_rect(&self, rect: Rect) -> Option<RawHandle> {
        let raw = self.insert(ViewRecord::from_rect(rect))?;
        self.registry.borrow_mut().stats.created += 1;
        Some(raw)
    }

    fn center(&self, raw: RawHandle) -> Vec2 {
        self.read(raw, |r| r.center)
    }

    fn set_center(&self, raw: RawHandle, center: Vec2) {
        self.write(raw, |r| r.center = center);
    }

    fn size(&self, raw: RawHandle) -> Vec2 {
        self.read(raw, |r| r.size)
    }

    fn set_size(&self, raw: RawHandle, size: Vec2) {
        self.write(raw, |r| r.size = size);
    }

    fn rotation(&self, raw: RawHandle) -> f32 {
        self.read(raw, |r| r.rotation)
    }

    fn set_rotation(&self, raw: RawHandle, degrees: f32) {
        self.write(raw, |r| r.rotation = degrees);
    }

    fn viewport(&self, raw: RawHandle) -> Viewport {
        self.read(raw, |r| r.viewport)
    }

    fn set_viewport(&self, raw: RawHandle, viewport: Viewport) {
        self.write(raw, |r| r.viewport = viewport);
    }
}
