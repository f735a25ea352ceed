//! Error types for native resource wrappers.

use thiserror::Error;

use crate::coords::Vec2;

/// Errors surfaced by handle construction and view operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphicsError {
    /// The native factory or clone entry point returned a null handle.
    ///
    /// Fatal to the constructing call; no wrapper object is produced.
    #[error("failed to {operation} native {kind}")]
    ResourceCreation {
        kind: &'static str,
        operation: &'static str,
    },

    /// A view extent is zero, negative or non-finite.
    #[error("invalid view size {0:?}: extents must be finite and positive")]
    InvalidSize(Vec2),

    /// A zoom factor is zero, negative or non-finite.
    #[error("invalid zoom factor {0}: must be finite and positive")]
    InvalidZoom(f32),

    /// The wrapper's handle was already released.
    #[error("native {kind} used after release")]
    UseAfterRelease { kind: &'static str },
}

impl GraphicsError {
    /// True for the size/zoom family of errors.
    pub fn is_invalid_geometry(&self) -> bool {
        matches!(self, Self::InvalidSize(_) | Self::InvalidZoom(_))
    }
}

/// A specialized Result type for native wrapper operations.
pub type Result<T> = std::result::Result<T, GraphicsError>;
