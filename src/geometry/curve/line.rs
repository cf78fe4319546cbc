use serde::{Deserialize, Serialize};

use crate::draw::StrokeTarget;
use crate::math::{lerp_point, Point2, Rectangle};

use super::Curve;

/// A straight segment between two points.
///
/// The parametric form is `P(t) = p0 + t * (p1 - p0)`, which is already
/// uniform in arc length, so raw and arc-length parameters coincide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "LineData", into = "LineData")]
pub struct LineCurve {
    p0: Point2,
    p1: Point2,
    active: bool,
}

impl LineCurve {
    /// Creates a new line from `p0` to `p1`.
    #[must_use]
    pub fn new(p0: Point2, p1: Point2) -> Self {
        Self {
            p0,
            p1,
            active: true,
        }
    }

    #[must_use]
    pub fn p0(&self) -> &Point2 {
        &self.p0
    }

    #[must_use]
    pub fn p1(&self) -> &Point2 {
        &self.p1
    }

    pub fn set_endpoints(&mut self, p0: Point2, p1: Point2) {
        self.p0 = p0;
        self.p1 = p1;
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }
}

impl Curve for LineCurve {
    fn point_at(&self, t: f64) -> Point2 {
        lerp_point(&self.p0, &self.p1, t.clamp(0.0, 1.0))
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn resolution(&self, _divisions: usize) -> usize {
        1
    }

    fn length(&self) -> f64 {
        nalgebra::distance(&self.p0, &self.p1)
    }

    fn point_at_arc_length(&self, u: f64) -> Point2 {
        self.point_at(u)
    }

    fn bounds_into(&self, out: &mut Rectangle, _accuracy: usize) {
        *out = Rectangle::from_corners(self.p0, self.p1);
    }

    fn draw(&self, target: &mut dyn StrokeTarget, _points_total: usize) {
        target.line_between(self.p0, self.p1);
    }
}

/// Serialized form: `{"points": [x0, y0, x1, y1]}`.
#[derive(Serialize, Deserialize)]
struct LineData {
    points: [f64; 4],
}

impl From<LineData> for LineCurve {
    fn from(data: LineData) -> Self {
        let [x0, y0, x1, y1] = data.points;
        Self::new(Point2::new(x0, y0), Point2::new(x1, y1))
    }
}

impl From<LineCurve> for LineData {
    fn from(line: LineCurve) -> Self {
        Self {
            points: [line.p0.x, line.p0.y, line.p1.x, line.p1.y],
        }
    }
}
