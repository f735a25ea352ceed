//! Ownership of native resource handles.
//!
//! A [`NativeHandle`] either owns its native resource (created or cloned
//! through the backend) or observes one owned elsewhere (a handle retrieved
//! from a parent render target, for instance). Owned resources are destroyed
//! exactly once: on the first [`NativeHandle::release`] call or on drop,
//! whichever comes first. Observed resources are never destroyed here.
//!
//! Exactly one wrapper may own a given native resource. That is a caller
//! contract enforced by how handles are constructed: the only ways to obtain an
//! owned handle are `create` and `try_clone`, both of which produce a fresh
//! native resource.

mod raw;

pub use raw::RawHandle;

use std::fmt;
use std::rc::Rc;

use crate::error::{GraphicsError, Result};
use crate::native::ResourceApi;

/// Who is responsible for destroying a native resource.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Ownership {
    /// This wrapper destroys the resource on release.
    Owned,
    /// Another owner controls the lifetime; release only detaches.
    External,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum HandleState {
    Live(RawHandle),
    Released,
}

/// A native resource handle plus the backend that understands it.
pub struct NativeHandle<A: ResourceApi> {
    api: Rc<A>,
    state: HandleState,
    ownership: Ownership,
}

impl<A: ResourceApi> NativeHandle<A> {
    /// Creates an owned handle by invoking a native factory.
    ///
    /// A null result is a hard failure; no handle object is produced.
    pub fn create<F>(api: Rc<A>, factory: F) -> Result<Self>
    where
        F: FnOnce(&A) -> Option<RawHandle>,
    {
        let raw = factory(api.as_ref()).ok_or(GraphicsError::ResourceCreation {
            kind: A::KIND,
            operation: "create",
        })?;

        log::debug!("created native {} {raw}", A::KIND);

        Ok(Self {
            api,
            state: HandleState::Live(raw),
            ownership: Ownership::Owned,
        })
    }

    /// Wraps a handle whose lifetime is controlled elsewhere.
    ///
    /// The handle is not validated; it must stay alive for as long as this
    /// wrapper uses it.
    pub fn external(api: Rc<A>, raw: RawHandle) -> Self {
        log::debug!("observing external native {} {raw}", A::KIND);

        Self {
            api,
            state: HandleState::Live(raw),
            ownership: Ownership::External,
        }
    }

    /// Asks the backend for a copy of the resource.
    ///
    /// The copy is always owned, whether or not `self` is.
    pub fn try_clone(&self) -> Result<Self> {
        let source = self.raw()?;
        let raw = self
            .api
            .clone_raw(source)
            .ok_or(GraphicsError::ResourceCreation {
                kind: A::KIND,
                operation: "clone",
            })?;

        log::debug!("cloned native {} {source} -> {raw}", A::KIND);

        Ok(Self {
            api: Rc::clone(&self.api),
            state: HandleState::Live(raw),
            ownership: Ownership::Owned,
        })
    }

    /// The live handle, or `UseAfterRelease`.
    #[inline]
    pub fn raw(&self) -> Result<RawHandle> {
        match self.state {
            HandleState::Live(raw) => Ok(raw),
            HandleState::Released => Err(GraphicsError::UseAfterRelease { kind: A::KIND }),
        }
    }

    /// Runs `f` against the backend with the live handle.
    #[inline]
    pub fn with<R>(&self, f: impl FnOnce(&A, RawHandle) -> R) -> Result<R> {
        let raw = self.raw()?;
        Ok(f(self.api.as_ref(), raw))
    }

    #[inline]
    pub fn api(&self) -> &Rc<A> {
        &self.api
    }

    #[inline]
    pub fn ownership(&self) -> Ownership {
        self.ownership
    }

    #[inline]
    pub fn is_owned(&self) -> bool {
        self.ownership == Ownership::Owned
    }

    #[inline]
    pub fn is_released(&self) -> bool {
        self.state == HandleState::Released
    }

    /// Releases the handle.
    ///
    /// Owned resources are destroyed on the first call; external ones are only
    /// detached. Subsequent calls do nothing. Also runs on drop.
    pub fn release(&mut self) {
        let HandleState::Live(raw) = self.state else {
            return;
        };

        // Mark first so a panicking destructor cannot lead to a second destroy.
        self.state = HandleState::Released;

        match self.ownership {
            Ownership::Owned => {
                log::debug!("destroying native {} {raw}", A::KIND);
                self.api.destroy(raw);
            }
            Ownership::External => {
                log::debug!("detaching from external native {} {raw}", A::KIND);
            }
        }
    }
}

impl<A: ResourceApi> Drop for NativeHandle<A> {
    fn drop(&mut self) {
        self.release();
    }
}

impl<A: ResourceApi> fmt::Debug for NativeHandle<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeHandle")
            .field("kind", &A::KIND)
            .field("state", &self.state)
            .field("ownership", &self.ownership)
            .finish()
    }
}
