mod arc_length;
mod cubic_bezier;
mod ellipse;
mod line;
mod move_to;
mod spline;

pub use arc_length::ArcLengthTable;
pub use cubic_bezier::CubicBezierCurve;
pub use ellipse::EllipseCurve;
pub use line::LineCurve;
pub use move_to::MoveTo;
pub use spline::SplineCurve;

pub(crate) use arc_length::CachedArcLengths;

use serde::{Deserialize, Serialize};

use crate::draw::StrokeTarget;
use crate::math::{Point2, Rectangle, Vector2, TOLERANCE};

/// Number of parameter divisions used to build a curve's arc-length table.
pub const ARC_LENGTH_DIVISIONS: usize = 100;

/// Parameter step used for finite-difference tangents.
const TANGENT_DELTA: f64 = 1e-4;

/// Trait for parametric curve segments in the plane.
///
/// Every segment is parameterized over `t` in `[0, 1]`; `t = 0` is its start
/// point and `t = 1` its end point. Parameters outside that range are clamped.
pub trait Curve {
    /// Evaluates the segment at raw parameter `t`.
    fn point_at(&self, t: f64) -> Point2;

    /// Returns whether aggregate path queries should include this segment.
    fn is_active(&self) -> bool;

    /// Suggested number of divisions for dense sampling, given a per-segment hint.
    fn resolution(&self, divisions: usize) -> usize {
        divisions.max(1)
    }

    /// Samples the cumulative chord lengths of the segment.
    fn arc_lengths(&self, divisions: usize) -> ArcLengthTable {
        ArcLengthTable::sample(divisions, |t| self.point_at(t))
    }

    /// Returns the arc length of the segment.
    fn length(&self) -> f64 {
        self.arc_lengths(ARC_LENGTH_DIVISIONS).total()
    }

    /// Evaluates the segment at arc-length fraction `u`, so that equal steps
    /// of `u` cover equal distances.
    fn point_at_arc_length(&self, u: f64) -> Point2 {
        let t = self.arc_lengths(ARC_LENGTH_DIVISIONS).parameter_at(u);
        self.point_at(t)
    }

    fn start_point(&self) -> Point2 {
        self.point_at(0.0)
    }

    fn end_point(&self) -> Point2 {
        self.point_at(1.0)
    }

    /// Unit tangent at `t`, or the zero vector where the segment is degenerate.
    fn tangent_at(&self, t: f64) -> Vector2 {
        let t = t.clamp(0.0, 1.0);
        let t0 = (t - TANGENT_DELTA).max(0.0);
        let t1 = (t + TANGENT_DELTA).min(1.0);
        let delta = self.point_at(t1) - self.point_at(t0);
        let len = delta.norm();
        if len < TOLERANCE {
            Vector2::zeros()
        } else {
            delta / len
        }
    }

    /// Samples `divisions + 1` points at uniform parameter steps.
    #[allow(clippy::cast_precision_loss)]
    fn points(&self, divisions: usize) -> Vec<Point2> {
        let divisions = divisions.max(1);
        (0..=divisions)
            .map(|i| self.point_at(i as f64 / divisions as f64))
            .collect()
    }

    /// Samples `divisions + 1` points at uniform arc-length steps.
    #[allow(clippy::cast_precision_loss)]
    fn spaced_points(&self, divisions: usize) -> Vec<Point2> {
        let divisions = divisions.max(1);
        (0..=divisions)
            .map(|i| self.point_at_arc_length(i as f64 / divisions as f64))
            .collect()
    }

    /// Axis-aligned bounds of the segment.
    ///
    /// `accuracy` is the number of sampling steps used by segments without a
    /// closed-form box; the result is a sampled bound, not a tight one.
    fn bounds(&self, accuracy: usize) -> Rectangle {
        let mut out = Rectangle::default();
        self.bounds_into(&mut out, accuracy);
        out
    }

    /// Same as [`Curve::bounds`], writing into a caller-owned rectangle.
    fn bounds_into(&self, out: &mut Rectangle, accuracy: usize) {
        let samples = self.points(accuracy);
        let start = self.start_point();
        *out = Rectangle::from_points(&samples)
            .unwrap_or_else(|| Rectangle::from_corners(start, start));
    }

    /// Hands the sampled segment to a renderer.
    fn draw(&self, target: &mut dyn StrokeTarget, points_total: usize) {
        target.stroke_points(&self.points(points_total));
    }
}

/// A path segment: the closed set of curve kinds a [`Path`](super::Path) is built from.
///
/// Serialized with its kind in the `type` field, e.g.
/// `{"type": "LineCurve", "points": [0, 0, 10, 0]}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Segment {
    #[serde(rename = "LineCurve")]
    Line(LineCurve),
    #[serde(rename = "CubicBezierCurve")]
    CubicBezier(CubicBezierCurve),
    #[serde(rename = "EllipseCurve")]
    Ellipse(EllipseCurve),
    #[serde(rename = "SplineCurve")]
    Spline(SplineCurve),
    MoveTo(MoveTo),
}

impl Segment {
    /// Returns the serialized discriminator of this segment.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Line(_) => "LineCurve",
            Self::CubicBezier(_) => "CubicBezierCurve",
            Self::Ellipse(_) => "EllipseCurve",
            Self::Spline(_) => "SplineCurve",
            Self::MoveTo(_) => "MoveTo",
        }
    }

    /// Enables or disables the segment. `MoveTo` markers stay inactive.
    pub fn set_active(&mut self, active: bool) {
        match self {
            Self::Line(c) => c.set_active(active),
            Self::CubicBezier(c) => c.set_active(active),
            Self::Ellipse(c) => c.set_active(active),
            Self::Spline(c) => c.set_active(active),
            Self::MoveTo(_) => {}
        }
    }

    fn as_curve(&self) -> &dyn Curve {
        match self {
            Self::Line(c) => c,
            Self::CubicBezier(c) => c,
            Self::Ellipse(c) => c,
            Self::Spline(c) => c,
            Self::MoveTo(c) => c,
        }
    }
}

impl Curve for Segment {
    fn point_at(&self, t: f64) -> Point2 {
        self.as_curve().point_at(t)
    }

    fn is_active(&self) -> bool {
        self.as_curve().is_active()
    }

    fn resolution(&self, divisions: usize) -> usize {
        self.as_curve().resolution(divisions)
    }

    fn arc_lengths(&self, divisions: usize) -> ArcLengthTable {
        self.as_curve().arc_lengths(divisions)
    }

    fn length(&self) -> f64 {
        self.as_curve().length()
    }

    fn point_at_arc_length(&self, u: f64) -> Point2 {
        self.as_curve().point_at_arc_length(u)
    }

    fn start_point(&self) -> Point2 {
        self.as_curve().start_point()
    }

    fn end_point(&self) -> Point2 {
        self.as_curve().end_point()
    }

    fn tangent_at(&self, t: f64) -> Vector2 {
        self.as_curve().tangent_at(t)
    }

    fn points(&self, divisions: usize) -> Vec<Point2> {
        self.as_curve().points(divisions)
    }

    fn spaced_points(&self, divisions: usize) -> Vec<Point2> {
        self.as_curve().spaced_points(divisions)
    }

    fn bounds_into(&self, out: &mut Rectangle, accuracy: usize) {
        self.as_curve().bounds_into(out, accuracy);
    }

    fn draw(&self, target: &mut dyn StrokeTarget, points_total: usize) {
        self.as_curve().draw(target, points_total);
    }
}

impl From<LineCurve> for Segment {
    fn from(curve: LineCurve) -> Self {
        Self::Line(curve)
    }
}

impl From<CubicBezierCurve> for Segment {
    fn from(curve: CubicBezierCurve) -> Self {
        Self::CubicBezier(curve)
    }
}

impl From<EllipseCurve> for Segment {
    fn from(curve: EllipseCurve) -> Self {
        Self::Ellipse(curve)
    }
}

impl From<SplineCurve> for Segment {
    fn from(curve: SplineCurve) -> Self {
        Self::Spline(curve)
    }
}

impl From<MoveTo> for Segment {
    fn from(curve: MoveTo) -> Self {
        Self::MoveTo(curve)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::points_coincide;
    use approx::assert_abs_diff_eq;

    fn sample_segments() -> Vec<Segment> {
        vec![
            LineCurve::new(Point2::new(0.0, 0.0), Point2::new(3.0, 4.0)).into(),
            CubicBezierCurve::new(
                Point2::new(0.0, 0.0),
                Point2::new(1.0, 2.0),
                Point2::new(3.0, 2.0),
                Point2::new(4.0, 0.0),
            )
            .into(),
            EllipseCurve::new(Point2::new(1.0, 1.0), 3.0, 2.0, 0.0, 90.0, false, 0.0).into(),
            SplineCurve::new(vec![
                Point2::new(0.0, 0.0),
                Point2::new(1.0, 1.0),
                Point2::new(2.0, 0.0),
            ])
            .unwrap()
            .into(),
        ]
    }

    #[test]
    fn endpoints_match_parameter_extremes() {
        for seg in sample_segments() {
            assert!(points_coincide(&seg.start_point(), &seg.point_at(0.0)));
            assert!(points_coincide(&seg.end_point(), &seg.point_at(1.0)));
            assert!(points_coincide(&seg.point_at_arc_length(1.0), &seg.end_point()));
        }
    }

    #[test]
    fn parameters_are_clamped() {
        for seg in sample_segments() {
            assert!(points_coincide(&seg.point_at(-0.5), &seg.start_point()));
            assert!(points_coincide(&seg.point_at(1.5), &seg.end_point()));
        }
    }

    #[test]
    fn points_returns_divisions_plus_one() {
        for seg in sample_segments() {
            assert_eq!(seg.points(7).len(), 8);
            assert_eq!(seg.spaced_points(5).len(), 6);
            assert_eq!(seg.points(0).len(), 2);
        }
    }

    #[test]
    fn spaced_points_are_evenly_spaced() {
        let seg = &sample_segments()[1];
        let pts = seg.spaced_points(10);
        let step = seg.length() / 10.0;
        for pair in pts.windows(2) {
            let d = nalgebra::distance(&pair[0], &pair[1]);
            assert_abs_diff_eq!(d, step, epsilon = step * 0.05);
        }
    }

    #[test]
    fn bounds_contain_all_samples() {
        for seg in sample_segments() {
            let b = seg.bounds(64);
            for p in seg.points(64) {
                assert!(b.contains_point(&p), "{} bounds miss {p:?}", seg.type_name());
            }
        }
    }

    #[test]
    fn tangent_of_line_is_its_direction() {
        let seg = &sample_segments()[0];
        let t = seg.tangent_at(0.5);
        assert_abs_diff_eq!(t.x, 0.6, epsilon = 1e-9);
        assert_abs_diff_eq!(t.y, 0.8, epsilon = 1e-9);
    }

    #[test]
    fn move_to_ignores_set_active() {
        let mut seg: Segment = MoveTo::new(Point2::new(1.0, 1.0)).into();
        seg.set_active(true);
        assert!(!seg.is_active());

        let mut line = sample_segments().remove(0);
        line.set_active(false);
        assert!(!line.is_active());
    }

    #[test]
    fn serialized_discriminator_matches_type_name() {
        for seg in sample_segments() {
            let value = serde_json::to_value(&seg).unwrap();
            assert_eq!(value["type"], seg.type_name());
        }
    }
}
