//! Axis-aligned bounds of a rotated display rectangle.
//!
//! The rectangle is anchored at `position - display_origin` and rotated
//! about that top-left corner. Each quadrant of the rotation angle has a
//! closed-form answer, so no corner transforms or min/max reductions are needed.
use std::f64::consts::{FRAC_PI_2, PI, TAU};

use super::{Point2, Rectangle, Vector2};

/// Returns the smallest axis-aligned rectangle covering a `size` rectangle
/// whose top-left corner sits at `position - display_origin`, rotated by
/// `rotation` radians about that corner.
#[must_use]
pub fn rotated_rect_bounds(
    position: Point2,
    display_origin: Vector2,
    size: Vector2,
    rotation: f64,
) -> Rectangle {
    let mut out = Rectangle::default();
    rotated_rect_bounds_into(&mut out, position, display_origin, size, rotation);
    out
}

/// Same as [`rotated_rect_bounds`], writing into a caller-owned rectangle.
pub fn rotated_rect_bounds_into(
    out: &mut Rectangle,
    position: Point2,
    display_origin: Vector2,
    size: Vector2,
    rotation: f64,
) {
    let corner = position - display_origin;
    let (x, y) = (corner.x, corner.y);
    let (w, h) = (size.x, size.y);
    let r = normalize_angle(rotation);

    let (sin, cos) = r.sin_cos();
    let wct = w * cos;
    let hct = h * cos;
    let wst = w * sin;
    let hst = h * sin;

    let (mut x_min, mut x_max, mut y_min, mut y_max) = (x, x, y, y);

    if r > 0.0 {
        if r < FRAC_PI_2 {
            y_max = y + hct + wst;
            x_min = x - hst;
            x_max = x + wct;
        } else {
            y_min = y + hct;
            y_max = y + wst;
            x_min = x - hst + wct;
        }
    } else if r > -FRAC_PI_2 {
        y_min = y + wst;
        y_max = y + hct;
        x_max = x + wct - hst;
    } else {
        y_min = y + wst + hct;
        x_min = x + wct;
        x_max = x - hst;
    }

    out.x = x_min;
    out.y = y_min;
    out.width = x_max - x_min;
    out.height = y_max - y_min;
}

/// Wraps an angle into `(-PI, PI]`.
fn normalize_angle(angle: f64) -> f64 {
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI {
        wrapped + TAU
    } else {
        wrapped
    }
}
