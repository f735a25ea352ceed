//! Native view handles with deterministic ownership and cached 2D view transforms.
//!
//! - [`handle`]: owned vs. external native handles, released exactly once
//! - [`native`]: the backend interface the wrappers call into, plus an
//!   in-process implementation
//! - [`view`]: the camera wrapper and its world-to-NDC transform
//! - [`transform`]: the 2D affine value type

pub mod coords;
pub mod error;
pub mod handle;
pub mod logging;
pub mod native;
pub mod transform;
pub mod view;

pub use error::{GraphicsError, Result};
pub use handle::{NativeHandle, Ownership, RawHandle};
pub use transform::Transform;
pub use view::{GeometryPolicy, View};
