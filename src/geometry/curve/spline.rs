use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, Result, SerializationError};
use crate::math::Point2;

use super::{ArcLengthTable, CachedArcLengths, Curve, ARC_LENGTH_DIVISIONS};

/// A uniform Catmull-Rom spline passing through every control point.
///
/// The whole spline is parameterized over `t` in `[0, 1]`; with `n` points,
/// span `i` covers `t` in `[i / (n-1), (i+1) / (n-1)]`. Neighbours beyond
/// either end are clamped to the first and last point.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "SplineData", into = "SplineData")]
pub struct SplineCurve {
    points: Vec<Point2>,
    active: bool,
    lengths: CachedArcLengths,
}

impl SplineCurve {
    /// Creates a spline through `points`.
    ///
    /// # Errors
    ///
    /// Returns an error if `points` is empty.
    pub fn new(points: Vec<Point2>) -> Result<Self> {
        if points.is_empty() {
            return Err(
                GeometryError::Degenerate("spline needs at least one control point".into()).into(),
            );
        }
        Ok(Self::from_non_empty(points))
    }

    /// Creates a spline starting at `start` and continuing through `rest`.
    #[must_use]
    pub fn from_start(start: Point2, rest: impl IntoIterator<Item = Point2>) -> Self {
        let points = std::iter::once(start).chain(rest).collect();
        Self::from_non_empty(points)
    }

    fn from_non_empty(points: Vec<Point2>) -> Self {
        Self {
            points,
            active: true,
            lengths: CachedArcLengths::default(),
        }
    }

    /// Returns the control points.
    #[must_use]
    pub fn control_points(&self) -> &[Point2] {
        &self.points
    }

    /// Appends a control point to the end of the spline.
    pub fn add_point(&mut self, point: Point2) {
        self.points.push(point);
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

impl Curve for SplineCurve {
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    fn point_at(&self, t: f64) -> Point2 {
        let last = self.points.len() - 1;
        let position = last as f64 * t.clamp(0.0, 1.0);
        let span = (position.floor() as usize).min(last);
        let weight = position - span as f64;

        let p0 = self.points[span.saturating_sub(1)];
        let p1 = self.points[span];
        let p2 = self.points[(span + 1).min(last)];
        let p3 = self.points[(span + 2).min(last)];

        Point2::new(
            catmull_rom(weight, p0.x, p1.x, p2.x, p3.x),
            catmull_rom(weight, p0.y, p1.y, p2.y, p3.y),
        )
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn resolution(&self, divisions: usize) -> usize {
        divisions.max(1) * self.points.len()
    }

    fn length(&self) -> f64 {
        self.table().total()
    }

    fn point_at_arc_length(&self, u: f64) -> Point2 {
        self.point_at(self.table().parameter_at(u))
    }
}

/// Evaluates one coordinate of a Catmull-Rom span between `p1` and `p2`.
fn catmull_rom(t: f64, p0: f64, p1: f64, p2: f64, p3: f64) -> f64 {
    let v0 = (p2 - p0) * 0.5;
    let v1 = (p3 - p1) * 0.5;
    let t2 = t * t;
    let t3 = t * t2;

    (2.0 * p1 - 2.0 * p2 + v0 + v1) * t3 + (-3.0 * p1 + 3.0 * p2 - 2.0 * v0 - v1) * t2 + v0 * t + p1
}

/// Serialized form: `{"points": [x0, y0, x1, y1, ...]}`.
#[derive(Serialize, Deserialize)]
struct SplineData {
    points: Vec<f64>,
}

impl TryFrom<SplineData> for SplineCurve {
    type Error = SerializationError;

    fn try_from(data: SplineData) -> std::result::Result<Self, Self::Error> {
        if data.points.is_empty() || data.points.len() % 2 != 0 {
            return Err(SerializationError::InvalidCurve(format!(
                "spline needs a non-empty, even-length coordinate list, got {} values",
                data.points.len()
            )));
        }
        let points = data
            .points
            .chunks_exact(2)
            .map(|xy| Point2::new(xy[0], xy[1]))
            .collect();
        Ok(Self::from_non_empty(points))
    }
}

impl From<SplineCurve> for SplineData {
    fn from(curve: SplineCurve) -> Self {
        Self {
            points: curve.points.iter().flat_map(|p| [p.x, p.y]).collect(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::points_coincide;
    use approx::assert_abs_diff_eq;

    fn zigzag() -> SplineCurve {
        SplineCurve::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 2.0),
            Point2::new(2.0, 0.0),
            Point2::new(3.0, 2.0),
        ])
        .unwrap()
    }

    #[test]
    fn passes_through_control_points() {
        let s = zigzag();
        for (i, p) in s.control_points().iter().enumerate() {
            let t = i as f64 / 3.0;
            assert!(points_coincide(&s.point_at(t), p), "missed point {i}");
        }
    }

    #[test]
    fn collinear_points_stay_on_the_line() {
        let s = SplineCurve::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(2.0, 2.0),
        ])
        .unwrap();
        for i in 0..=10 {
            let p = s.point_at(f64::from(i) / 10.0);
            assert_abs_diff_eq!(p.x, p.y, epsilon = 1e-12);
        }
    }

    #[test]
    fn single_point_is_stationary() {
        let s = SplineCurve::new(vec![Point2::new(4.0, 5.0)]).unwrap();
        assert_eq!(s.point_at(0.7), Point2::new(4.0, 5.0));
        assert_abs_diff_eq!(s.length(), 0.0);
    }

    #[test]
    fn empty_spline_is_rejected() {
        assert!(SplineCurve::new(Vec::new()).is_err());
    }

    #[test]
    fn from_start_prepends_anchor() {
        let s = SplineCurve::from_start(Point2::new(9.0, 9.0), [Point2::new(1.0, 1.0)]);
        assert_eq!(s.control_points()[0], Point2::new(9.0, 9.0));
        assert_eq!(s.control_points().len(), 2);
    }

    #[test]
    fn resolution_scales_with_point_count() {
        assert_eq!(zigzag().resolution(12), 48);
    }

    #[test]
    fn adding_a_point_extends_length() {
        let mut s = zigzag();
        let before = s.length();
        s.add_point(Point2::new(4.0, 0.0));
        assert!(s.length() > before);
        assert!(points_coincide(&s.end_point(), &Point2::new(4.0, 0.0)));
    }

    #[test]
    fn json_flattens_points() {
        let json = serde_json::to_value(zigzag()).unwrap();
        assert_eq!(json["points"].as_array().unwrap().len(), 8);
        let back: SplineCurve = serde_json::from_value(json).unwrap();
        assert_eq!(back.control_points(), zigzag().control_points());
    }

    #[test]
    fn odd_coordinate_count_is_rejected() {
        let json = serde_json::json!({ "points": [0.0, 1.0, 2.0] });
        assert!(serde_json::from_value::<SplineCurve>(json).is_err());
    }
}
