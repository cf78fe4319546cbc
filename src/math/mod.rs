pub mod rectangle;
pub mod rotated_bounds;

pub use rectangle::Rectangle;
pub use rotated_bounds::{rotated_rect_bounds, rotated_rect_bounds_into};

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Returns `true` when two points are equal within [`TOLERANCE`] on both axes.
#[must_use]
pub fn points_coincide(a: &Point2, b: &Point2) -> bool {
    (a.x - b.x).abs() < TOLERANCE && (a.y - b.y).abs() < TOLERANCE
}

/// Linear interpolation between two points.
///
/// Exact at both ends: `t = 0` yields `a` and `t = 1` yields `b`.
#[must_use]
pub fn lerp_point(a: &Point2, b: &Point2, t: f64) -> Point2 {
    let s = 1.0 - t;
    Point2::new(a.x * s + b.x * t, a.y * s + b.y * t)
}
