use serde::{Deserialize, Serialize};

use crate::math::Point2;

use super::{ArcLengthTable, CachedArcLengths, Curve, ARC_LENGTH_DIVISIONS};

/// A cubic Bezier segment with start `p0`, control points `p1`, `p2` and end `p3`.
///
/// `P(t) = (1-t)^3 p0 + 3(1-t)^2 t p1 + 3(1-t) t^2 p2 + t^3 p3`
///
/// Length and arc-length lookups use a chord-summed table built on first use.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "CubicBezierData", into = "CubicBezierData")]
pub struct CubicBezierCurve {
    p0: Point2,
    p1: Point2,
    p2: Point2,
    p3: Point2,
    active: bool,
    lengths: CachedArcLengths,
}

impl CubicBezierCurve {
    /// Creates a new cubic Bezier segment.
    #[must_use]
    pub fn new(p0: Point2, p1: Point2, p2: Point2, p3: Point2) -> Self {
        Self {
            p0,
            p1,
            p2,
            p3,
            active: true,
            lengths: CachedArcLengths::default(),
        }
    }

    /// Returns the four control points `[p0, p1, p2, p3]`.
    #[must_use]
    pub fn control_points(&self) -> [Point2; 4] {
        [self.p0, self.p1, self.p2, self.p3]
    }

    /// Replaces the control points and drops the cached length table.
    pub fn set_control_points(&mut self, p0: Point2, p1: Point2, p2: Point2, p3: Point2) {
        self.p0 = p0;
        self.p1 = p1;
        self.p2 = p2;
        self.p3 = p3;
        self.lengths.invalidate();
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    fn table(&self) -> &ArcLengthTable {
        self.lengths
            .get_or_build(|| self.arc_lengths(ARC_LENGTH_DIVISIONS))
    }
}

impl Curve for CubicBezierCurve {
    fn point_at(&self, t: f64) -> Point2 {
        let t = t.clamp(0.0, 1.0);
        let mt = 1.0 - t;
        let b0 = mt * mt * mt;
        let b1 = 3.0 * mt * mt * t;
        let b2 = 3.0 * mt * t * t;
        let b3 = t * t * t;
        Point2::new(
            b0 * self.p0.x + b1 * self.p1.x + b2 * self.p2.x + b3 * self.p3.x,
            b0 * self.p0.y + b1 * self.p1.y + b2 * self.p2.y + b3 * self.p3.y,
        )
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn length(&self) -> f64 {
        self.table().total()
    }

    fn point_at_arc_length(&self, u: f64) -> Point2 {
        self.point_at(self.table().parameter_at(u))
    }
}

/// Serialized form: `{"points": [x0, y0, x1, y1, x2, y2, x3, y3]}`.
#[derive(Serialize, Deserialize)]
struct CubicBezierData {
    points: [f64; 8],
}

impl From<CubicBezierData> for CubicBezierCurve {
    fn from(data: CubicBezierData) -> Self {
        let [x0, y0, x1, y1, x2, y2, x3, y3] = data.points;
        Self::new(
            Point2::new(x0, y0),
            Point2::new(x1, y1),
            Point2::new(x2, y2),
            Point2::new(x3, y3),
        )
    }
}

impl From<CubicBezierCurve> for CubicBezierData {
    fn from(curve: CubicBezierCurve) -> Self {
        let [p0, p1, p2, p3] = curve.control_points();
        Self {
            points: [p0.x, p0.y, p1.x, p1.y, p2.x, p2.y, p3.x, p3.y],
        }
    }
}
