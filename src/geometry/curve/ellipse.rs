use serde::{Deserialize, Serialize};

use crate::math::{Point2, Vector2};

use super::{ArcLengthTable, CachedArcLengths, Curve, ARC_LENGTH_DIVISIONS};

/// An elliptical arc in the plane.
///
/// Defined by a center, two radii, a start and end angle, a direction and a
/// rotation of the whole ellipse about its center. Angles are in degrees.
///
/// `P(t) = center + R(rotation) * (rx * cos(a(t)), ry * sin(a(t)))`
/// where `a(t) = start + t * sweep`.
///
/// The sweep is the counter-clockwise difference between the end and start
/// angles, wrapped into `[0, 360]`. Distinct angles that wrap to zero are a
/// full turn. A clockwise arc goes the other way round, so its sweep is the
/// complementary negative angle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "EllipseData", into = "EllipseData")]
pub struct EllipseCurve {
    center: Point2,
    x_radius: f64,
    y_radius: f64,
    start_angle: f64,
    end_angle: f64,
    clockwise: bool,
    rotation: f64,
    active: bool,
    lengths: CachedArcLengths,
}

impl EllipseCurve {
    /// Creates a new elliptical arc.
    ///
    /// # Arguments
    ///
    /// * `center` - Center of the ellipse
    /// * `x_radius` - Radius along the (unrotated) x axis
    /// * `y_radius` - Radius along the (unrotated) y axis
    /// * `start_angle` - Start angle in degrees
    /// * `end_angle` - End angle in degrees
    /// * `clockwise` - Sweep direction
    /// * `rotation` - Rotation of the ellipse about its center, in degrees
    #[must_use]
    pub fn new(
        center: Point2,
        x_radius: f64,
        y_radius: f64,
        start_angle: f64,
        end_angle: f64,
        clockwise: bool,
        rotation: f64,
    ) -> Self {
        Self {
            center,
            x_radius,
            y_radius,
            start_angle,
            end_angle,
            clockwise,
            rotation,
            active: true,
            lengths: CachedArcLengths::default(),
        }
    }

    /// Returns the center of the ellipse.
    #[must_use]
    pub fn center(&self) -> &Point2 {
        &self.center
    }

    #[must_use]
    pub fn x_radius(&self) -> f64 {
        self.x_radius
    }

    #[must_use]
    pub fn y_radius(&self) -> f64 {
        self.y_radius
    }

    /// Returns the start angle in degrees.
    #[must_use]
    pub fn start_angle(&self) -> f64 {
        self.start_angle
    }

    /// Returns the end angle in degrees.
    #[must_use]
    pub fn end_angle(&self) -> f64 {
        self.end_angle
    }

    #[must_use]
    pub fn clockwise(&self) -> bool {
        self.clockwise
    }

    /// Returns the rotation in degrees.
    #[must_use]
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Moves the ellipse so it is centered on `center`, keeping its shape.
    ///
    /// Translation does not change the length, so the cached table is kept.
    pub fn set_position(&mut self, center: Point2) {
        self.center = center;
    }

    /// Translates the ellipse by `offset`.
    pub fn translate(&mut self, offset: Vector2) {
        self.center += offset;
    }

    pub fn set_radii(&mut self, x_radius: f64, y_radius: f64) {
        self.x_radius = x_radius;
        self.y_radius = y_radius;
        self.lengths.invalidate();
    }

    /// Sets the start and end angles in degrees.
    pub fn set_angles(&mut self, start_angle: f64, end_angle: f64) {
        self.start_angle = start_angle;
        self.end_angle = end_angle;
        self.lengths.invalidate();
    }

    pub fn set_clockwise(&mut self, clockwise: bool) {
        self.clockwise = clockwise;
        self.lengths.invalidate();
    }

    /// Sets the rotation in degrees. Rigid rotation keeps the cached length.
    pub fn set_rotation(&mut self, rotation: f64) {
        self.rotation = rotation;
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Returns the signed angular sweep in radians.
    #[must_use]
    pub fn sweep(&self) -> f64 {
        let mut delta = self.end_angle - self.start_angle;
        let same_angles = delta.abs() < f64::EPSILON;

        delta = delta.rem_euclid(360.0);
        if delta < f64::EPSILON {
            delta = if same_angles { 0.0 } else { 360.0 };
        }

        if self.clockwise && !same_angles {
            delta = if delta >= 360.0 { -360.0 } else { delta - 360.0 };
        }

        delta.to_radians()
    }

    fn table(&self) -> &ArcLengthTable {
        self.lengths
            .get_or_build(|| self.arc_lengths(ARC_LENGTH_DIVISIONS))
    }
}

impl Curve for EllipseCurve {
    fn point_at(&self, t: f64) -> Point2 {
        let t = t.clamp(0.0, 1.0);
        let angle = self.start_angle.to_radians() + t * self.sweep();
        let local = Vector2::new(self.x_radius * angle.cos(), self.y_radius * angle.sin());
        let (sin, cos) = self.rotation.to_radians().sin_cos();
        self.center + Vector2::new(local.x * cos - local.y * sin, local.x * sin + local.y * cos)
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn resolution(&self, divisions: usize) -> usize {
        divisions.max(1) * 2
    }

    fn length(&self) -> f64 {
        self.table().total()
    }

    fn point_at_arc_length(&self, u: f64) -> Point2 {
        self.point_at(self.table().parameter_at(u))
    }
}

/// Serialized form, angles in degrees.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EllipseData {
    x: f64,
    y: f64,
    x_radius: f64,
    y_radius: f64,
    start_angle: f64,
    end_angle: f64,
    clockwise: bool,
    #[serde(default)]
    rotation: f64,
}

impl From<EllipseData> for EllipseCurve {
    fn from(data: EllipseData) -> Self {
        Self::new(
            Point2::new(data.x, data.y),
            data.x_radius,
            data.y_radius,
            data.start_angle,
            data.end_angle,
            data.clockwise,
            data.rotation,
        )
    }
}

impl From<EllipseCurve> for EllipseData {
    fn from(curve: EllipseCurve) -> Self {
        Self {
            x: curve.center.x,
            y: curve.center.y,
            x_radius: curve.x_radius,
            y_radius: curve.y_radius,
            start_angle: curve.start_angle,
            end_angle: curve.end_angle,
            clockwise: curve.clockwise,
            rotation: curve.rotation,
        }
    }
}
