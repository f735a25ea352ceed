use crate::coords::Vec2;
use crate::transform::Transform;

/// World-to-NDC transform of a view.
///
/// `size` is the full visible extent. The result rotates the world about
/// `center`, then maps the visible region onto `[-1, 1]` on both axes with +Y
/// flipped (world is y-down, NDC is y-up). Pure function of its inputs.
///
/// A zero extent divides by zero and yields non-finite coefficients; callers
/// reject such sizes before they get here.
pub fn derive_transform(center: Vec2, size: Vec2, rotation_degrees: f32) -> Transform {
    let (sine, cosine) = rotation_degrees.to_radians().sin_cos();
    let Vec2 { x: cx, y: cy } = center;

    // Rotation about the center.
    let tx = -cx * cosine - cy * sine + cx;
    let ty = cx * sine - cy * cosine + cy;

    // Orthographic projection.
    let a = 2.0 / size.x;
    let b = -2.0 / size.y;
    let c = -a * cx;
    let d = -b * cy;

    Transform::new(
        a * cosine,
        a * sine,
        a * tx + c,
        -b * sine,
        b * cosine,
        b * ty + d,
    )
}
