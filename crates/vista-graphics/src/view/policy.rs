use crate::coords::Vec2;
use crate::error::{GraphicsError, Result};

/// How a view treats sizes and zoom factors that would make its transform degenerate.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum GeometryPolicy {
    /// Reject zero, negative and non-finite extents and zoom factors.
    #[default]
    Strict,
    /// Store whatever is given. Negative extents produce a mirrored view,
    /// zero extents a non-finite transform.
    Permissive,
}

impl GeometryPolicy {
    pub fn check_size(self, size: Vec2) -> Result<()> {
        match self {
            Self::Permissive => Ok(()),
            Self::Strict if size.is_positive_extent() => Ok(()),
            Self::Strict => Err(GraphicsError::InvalidSize(size)),
        }
    }

    pub fn check_zoom(self, factor: f32) -> Result<()> {
        match self {
            Self::Permissive => Ok(()),
            Self::Strict if factor.is_finite() && factor > 0.0 => Ok(()),
            Self::Strict => Err(GraphicsError::InvalidZoom(factor)),
        }
    }
}
