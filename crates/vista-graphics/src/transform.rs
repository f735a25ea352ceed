//! 2D affine transform value type.

use core::ops::Mul;

use bytemuck::{Pod, Zeroable};

use crate::coords::{Rect, Vec2};

/// 3x3 affine transform stored as its six free coefficients.
///
/// Row-major layout `[m00, m01, m02, m10, m11, m12]`; the bottom row is the
/// implicit `(0, 0, 1)`. A point maps as:
///
/// - `x' = m00·x + m01·y + m02`
/// - `y' = m10·x + m11·y + m12`
///
/// `#[repr(C)]` and `Pod` so the coefficients can be written into a uniform
/// buffer directly.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Transform {
    m: [f32; 6],
}

impl Transform {
    pub const IDENTITY: Transform = Transform::new(1.0, 0.0, 0.0, 0.0, 1.0, 0.0);

    #[inline]
    pub const fn new(m00: f32, m01: f32, m02: f32, m10: f32, m11: f32, m12: f32) -> Self {
        Self { m: [m00, m01, m02, m10, m11, m12] }
    }

    #[inline]
    pub const fn coefficients(&self) -> [f32; 6] {
        self.m
    }

    /// Full row-major 3x3 matrix.
    pub fn matrix(&self) -> [[f32; 3]; 3] {
        let [a, b, c, d, e, f] = self.m;
        [[a, b, c], [d, e, f], [0.0, 0.0, 1.0]]
    }

    /// Column-major 4x4 matrix for shader uniforms (z passes through).
    #[rustfmt::skip]
    pub fn to_gl_matrix(&self) -> [f32; 16] {
        let [a, b, c, d, e, f] = self.m;
        [
            a,   d,   0.0, 0.0,
            b,   e,   0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            c,   f,   0.0, 1.0,
        ]
    }

    #[inline]
    pub fn transform_point(&self, p: Vec2) -> Vec2 {
        let [a, b, c, d, e, f] = self.m;
        Vec2::new(a * p.x + b * p.y + c, d * p.x + e * p.y + f)
    }

    /// Axis-aligned bounds of the transformed rectangle.
    pub fn transform_rect(&self, rect: Rect) -> Rect {
        let lo = rect.min();
        let hi = rect.max();
        let corners = [
            self.transform_point(Vec2::new(lo.x, lo.y)),
            self.transform_point(Vec2::new(lo.x, hi.y)),
            self.transform_point(Vec2::new(hi.x, lo.y)),
            self.transform_point(Vec2::new(hi.x, hi.y)),
        ];
        Rect::bounding(&corners)
    }

    /// `self × other`: applies `other` first, then `self`.
    pub fn combine(&self, other: &Transform) -> Transform {
        let [a0, a1, a2, a3, a4, a5] = self.m;
        let [b0, b1, b2, b3, b4, b5] = other.m;
        Transform::new(
            a0 * b0 + a1 * b3,
            a0 * b1 + a1 * b4,
            a0 * b2 + a1 * b5 + a2,
            a3 * b0 + a4 * b3,
            a3 * b1 + a4 * b4,
            a3 * b2 + a4 * b5 + a5,
        )
    }

    #[inline]
    pub fn determinant(&self) -> f32 {
        self.m[0] * self.m[4] - self.m[1] * self.m[3]
    }

    /// Inverse transform, or identity when the matrix is singular.
    pub fn inverse(&self) -> Transform {
        let det = self.determinant();
        if det == 0.0 {
            return Transform::IDENTITY;
        }

        let [a, b, c, d, e, f] = self.m;
        Transform::new(
            e / det,
            -b / det,
            (b * f - e * c) / det,
            -d / det,
            a / det,
            (d * c - a * f) / det,
        )
    }

    /// Applies a translation after this transform.
    pub fn translated(&self, offset: Vec2) -> Transform {
        Transform::new(1.0, 0.0, offset.x, 0.0, 1.0, offset.y).combine(self)
    }

    /// Applies a rotation about the origin after this transform.
    pub fn rotated(&self, degrees: f32) -> Transform {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Transform::new(cos, -sin, 0.0, sin, cos, 0.0).combine(self)
    }

    /// Applies a rotation about `center` after this transform.
    pub fn rotated_about(&self, degrees: f32, center: Vec2) -> Transform {
        let (sin, cos) = degrees.to_radians().sin_cos();
        let tx = center.x * (1.0 - cos) + center.y * sin;
        let ty = center.y * (1.0 - cos) - center.x * sin;
        Transform::new(cos, -sin, tx, sin, cos, ty).combine(self)
    }

    /// Applies a scale about the origin after this transform.
    pub fn scaled(&self, factors: Vec2) -> Transform {
        Transform::new(factors.x, 0.0, 0.0, 0.0, factors.y, 0.0).combine(self)
    }

    /// Coefficient-wise comparison within `epsilon`.
    pub fn approx_eq(&self, other: &Transform, epsilon: f32) -> bool {
        self.m
            .iter()
            .zip(other.m.iter())
            .all(|(a, b)| (a - b).abs() <= epsilon)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Transform {
    type Output = Transform;
    #[inline]
    fn mul(self, rhs: Transform) -> Transform {
        self.combine(&rhs)
    }
}

impl Mul<Vec2> for Transform {
    type Output = Vec2;
    #[inline]
    fn mul(self, rhs: Vec2) -> Vec2 {
        self.transform_point(rhs)
    }
}
