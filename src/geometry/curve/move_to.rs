use serde::{Deserialize, Serialize};

use crate::draw::StrokeTarget;
use crate::math::{Point2, Rectangle};

use super::Curve;

/// A zero-length marker that relocates the pen of a path.
///
/// It is never active, so it contributes nothing to bounds, sampling or
/// drawing, but the next builder call on the path chains from its point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "MoveToData", into = "MoveToData")]
pub struct MoveTo {
    p0: Point2,
}

impl MoveTo {
    #[must_use]
    pub fn new(p0: Point2) -> Self {
        Self { p0 }
    }

    #[must_use]
    pub fn point(&self) -> &Point2 {
        &self.p0
    }
}

impl Curve for MoveTo {
    fn point_at(&self, _t: f64) -> Point2 {
        self.p0
    }

    fn is_active(&self) -> bool {
        false
    }

    fn resolution(&self, _divisions: usize) -> usize {
        1
    }

    fn length(&self) -> f64 {
        0.0
    }

    fn point_at_arc_length(&self, _u: f64) -> Point2 {
        self.p0
    }

    fn bounds_into(&self, out: &mut Rectangle, _accuracy: usize) {
        *out = Rectangle::from_corners(self.p0, self.p0);
    }

    fn draw(&self, _target: &mut dyn StrokeTarget, _points_total: usize) {}
}

/// Serialized form: `{"points": [x, y]}`.
#[derive(Serialize, Deserialize)]
struct MoveToData {
    points: [f64; 2],
}

impl From<MoveToData> for MoveTo {
    fn from(data: MoveToData) -> Self {
        Self::new(Point2::new(data.points[0], data.points[1]))
    }
}

impl From<MoveTo> for MoveToData {
    fn from(m: MoveTo) -> Self {
        Self {
            points: [m.p0.x, m.p0.y],
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn every_query_returns_the_point() {
        let m = MoveTo::new(Point2::new(2.0, 3.0));
        assert_eq!(m.point_at(0.0), Point2::new(2.0, 3.0));
        assert_eq!(m.point_at(1.0), Point2::new(2.0, 3.0));
        assert_eq!(m.point_at_arc_length(0.5), Point2::new(2.0, 3.0));
        assert!(m.length().abs() < f64::EPSILON);
        assert!(!m.is_active());
    }

    #[test]
    fn json_round_trip() {
        let m = MoveTo::new(Point2::new(-1.5, 8.0));
        let json = serde_json::to_value(m).unwrap();
        assert_eq!(json, serde_json::json!({ "points": [-1.5, 8.0] }));
        assert_eq!(serde_json::from_value::<MoveTo>(json).unwrap(), m);
    }
}
