use core::fmt;
use core::num::NonZeroUsize;

/// Opaque identifier of a resource owned by the native library.
///
/// Never dereferenced on this side of the boundary, only passed back to
/// native entry points. `Option<RawHandle>` has the same layout as a nullable
/// native pointer, so `None` is the null handle.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct RawHandle(NonZeroUsize);

impl RawHandle {
    /// Wraps a raw native value; `0` is the null handle and yields `None`.
    #[inline]
    pub const fn from_raw(raw: usize) -> Option<Self> {
        match NonZeroUsize::new(raw) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    #[inline]
    pub const fn as_raw(self) -> usize {
        self.0.get()
    }
}

impl fmt::Debug for RawHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RawHandle({:#x})", self.0.get())
    }
}

impl fmt::Display for RawHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0.get())
    }
}
