mod document;

use std::cell::OnceCell;

use crate::draw::StrokeTarget;
use crate::geometry::curve::{
    CubicBezierCurve, Curve, EllipseCurve, LineCurve, MoveTo, Segment, SplineCurve,
};
use crate::math::{points_coincide, Point2, Rectangle};

/// Default sampling densities used by the argument-less [`Path`] queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplingParams {
    /// Sampling steps per segment when computing bounds.
    pub bounds_accuracy: usize,
    /// Number of divisions for [`Path::spaced_points`].
    pub spaced_divisions: usize,
    /// Per-segment division hint for [`Path::points`].
    pub segment_divisions: usize,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            bounds_accuracy: 16,
            spaced_divisions: 40,
            segment_divisions: 12,
        }
    }
}

/// An ordered chain of curve segments traversed as one continuous curve.
///
/// Segments are appended with the builder methods (`line_to`, `ellipse_to`,
/// ...), each starting where the previous one ended. Cumulative segment
/// lengths are cached on first use; every mutation of the segment list, and
/// every mutable borrow of a segment, drops that cache.
#[derive(Debug, Clone)]
pub struct Path {
    name: String,
    segments: Vec<Segment>,
    start_point: Point2,
    auto_close: bool,
    params: SamplingParams,
    curve_lengths: OnceCell<Vec<f64>>,
    #[cfg(test)]
    length_builds: std::cell::Cell<usize>,
}

impl Default for Path {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl Path {
    /// Creates an empty path starting at `(x, y)`.
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            name: String::new(),
            segments: Vec::new(),
            start_point: Point2::new(x, y),
            auto_close: false,
            params: SamplingParams::default(),
            curve_lengths: OnceCell::new(),
            #[cfg(test)]
            length_builds: std::cell::Cell::new(0),
        }
    }

    /// Replaces the default sampling densities.
    #[must_use]
    pub fn with_params(mut self, params: SamplingParams) -> Self {
        self.params = params;
        self
    }

    #[must_use]
    pub fn params(&self) -> &SamplingParams {
        &self.params
    }

    pub fn set_params(&mut self, params: SamplingParams) {
        self.params = params;
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Returns whether sampled point lists are closed back onto their first point.
    #[must_use]
    pub fn auto_close(&self) -> bool {
        self.auto_close
    }

    pub fn set_auto_close(&mut self, auto_close: bool) {
        self.auto_close = auto_close;
    }

    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    #[must_use]
    pub fn segment(&self, index: usize) -> Option<&Segment> {
        self.segments.get(index)
    }

    /// Mutable access to one segment. Drops the cached lengths.
    pub fn segment_mut(&mut self, index: usize) -> Option<&mut Segment> {
        self.invalidate_lengths();
        self.segments.get_mut(index)
    }

    /// Mutable access to all segments. Drops the cached lengths.
    pub fn segments_mut(&mut self) -> &mut [Segment] {
        self.invalidate_lengths();
        &mut self.segments
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    // --- Builders ---

    /// Appends a segment as-is.
    pub fn add(&mut self, segment: impl Into<Segment>) -> &mut Self {
        self.segments.push(segment.into());
        self.invalidate_lengths();
        self
    }

    /// Moves the pen to `to` without drawing.
    pub fn move_to(&mut self, to: impl Into<Point2>) -> &mut Self {
        self.add(MoveTo::new(to.into()))
    }

    /// Appends a straight line from the current end point to `to`.
    pub fn line_to(&mut self, to: impl Into<Point2>) -> &mut Self {
        let start = self.end_point();
        self.add(LineCurve::new(start, to.into()))
    }

    /// Appends a spline from the current end point through `points`.
    pub fn spline_to(&mut self, points: impl IntoIterator<Item = Point2>) -> &mut Self {
        let start = self.end_point();
        self.add(SplineCurve::from_start(start, points))
    }

    /// Appends a cubic Bezier from the current end point to `end`, shaped by
    /// `control1` and `control2`.
    pub fn cubic_bezier_to(
        &mut self,
        control1: impl Into<Point2>,
        control2: impl Into<Point2>,
        end: impl Into<Point2>,
    ) -> &mut Self {
        let start = self.end_point();
        self.add(CubicBezierCurve::new(
            start,
            control1.into(),
            control2.into(),
            end.into(),
        ))
    }

    /// Appends an elliptical arc whose start point is the current end point.
    ///
    /// Angles are in degrees. The ellipse is built around the origin and
    /// then shifted so that its start lands on the path.
    pub fn ellipse_to(
        &mut self,
        x_radius: f64,
        y_radius: f64,
        start_angle: f64,
        end_angle: f64,
        clockwise: bool,
        rotation: f64,
    ) -> &mut Self {
        let mut ellipse = EllipseCurve::new(
            Point2::origin(),
            x_radius,
            y_radius,
            start_angle,
            end_angle,
            clockwise,
            rotation,
        );
        let offset = self.end_point() - ellipse.start_point();
        ellipse.translate(offset);
        self.add(ellipse)
    }

    /// Appends a full circle starting and ending at the current end point.
    pub fn circle_to(&mut self, radius: f64, clockwise: bool, rotation: f64) -> &mut Self {
        self.ellipse_to(radius, radius, 0.0, 360.0, clockwise, rotation)
    }

    /// Closes the path with a straight line from its end back to the start
    /// of its first segment.
    ///
    /// Nothing is appended when the two already coincide, so closing an
    /// already closed path is a no-op. An empty path is left untouched.
    pub fn close_path(&mut self) -> &mut Self {
        let (Some(first), Some(last)) = (self.segments.first(), self.segments.last()) else {
            return self;
        };
        let start = first.start_point();
        let end = last.end_point();

        if !points_coincide(&start, &end) {
            tracing::debug!(?start, ?end, "closing path with a line segment");
            self.add(LineCurve::new(end, start));
        }
        self
    }

    // --- Queries ---

    #[must_use]
    pub fn start_point(&self) -> Point2 {
        self.start_point
    }

    /// Returns the end of the last segment, or the start point of an empty path.
    #[must_use]
    pub fn end_point(&self) -> Point2 {
        self.segments
            .last()
            .map_or(self.start_point, Curve::end_point)
    }

    /// Returns the cumulative length after each segment.
    pub fn curve_lengths(&self) -> &[f64] {
        self.curve_lengths.get_or_init(|| {
            #[cfg(test)]
            self.length_builds.set(self.length_builds.get() + 1);

            let mut sum = 0.0;
            let lengths: Vec<f64> = self
                .segments
                .iter()
                .map(|segment| {
                    sum += segment.length();
                    sum
                })
                .collect();
            tracing::debug!(segments = lengths.len(), total = sum, "rebuilt path length cache");
            lengths
        })
    }

    /// Drops and immediately rebuilds the cumulative length cache.
    pub fn update_arc_lengths(&mut self) {
        self.invalidate_lengths();
        self.curve_lengths();
    }

    /// Returns the total length of the path, `0` when it has no segments.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.curve_lengths().last().copied().unwrap_or(0.0)
    }

    /// Returns the point at fraction `t` of the total path length.
    ///
    /// `t` is clamped to `[0, 1]`. Returns `None` for a path without segments.
    #[must_use]
    pub fn point(&self, t: f64) -> Option<Point2> {
        let lengths = self.curve_lengths();
        let total = *lengths.last()?;
        let distance = t.clamp(0.0, 1.0) * total;

        let index = lengths.iter().position(|&cumulative| cumulative >= distance)?;
        let segment = &self.segments[index];
        let segment_length = segment.length();
        let u = if segment_length > 0.0 {
            1.0 - (lengths[index] - distance) / segment_length
        } else {
            0.0
        };

        Some(segment.point_at_arc_length(u))
    }

    /// Same as [`Path::point`], writing into a caller-owned point.
    ///
    /// Returns `false` and leaves `out` untouched when there is no point.
    pub fn point_into(&self, t: f64, out: &mut Point2) -> bool {
        match self.point(t) {
            Some(p) => {
                *out = p;
                true
            }
            None => false,
        }
    }

    /// Samples the path at uniform arc-length steps using the configured divisions.
    #[must_use]
    pub fn spaced_points(&self) -> Vec<Point2> {
        self.spaced_points_with(self.params.spaced_divisions)
    }

    /// Samples `divisions + 1` points at uniform steps of path length.
    ///
    /// With `auto_close` set, the first point is repeated at the end.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn spaced_points_with(&self, divisions: usize) -> Vec<Point2> {
        let divisions = divisions.max(1);
        let mut points: Vec<Point2> = (0..=divisions)
            .filter_map(|i| self.point(i as f64 / divisions as f64))
            .collect();

        if self.auto_close {
            if let Some(&first) = points.first() {
                points.push(first);
            }
        }
        points
    }

    /// Densely samples the active segments using the configured divisions.
    #[must_use]
    pub fn points(&self) -> Vec<Point2> {
        self.points_with(self.params.segment_divisions)
    }

    /// Densely samples every active segment at its own resolution for the
    /// `divisions` hint, dropping consecutive duplicate points.
    ///
    /// With `auto_close` set, the loop is closed if it is not already.
    #[must_use]
    pub fn points_with(&self, divisions: usize) -> Vec<Point2> {
        let mut points: Vec<Point2> = Vec::new();

        for segment in self.segments.iter().filter(|s| s.is_active()) {
            let resolution = segment.resolution(divisions);
            for point in segment.points(resolution) {
                if points.last().is_some_and(|last| points_coincide(last, &point)) {
                    continue;
                }
                points.push(point);
            }
        }

        if self.auto_close && points.len() > 1 {
            let first = points[0];
            if !points.last().is_some_and(|last| points_coincide(last, &first)) {
                points.push(first);
            }
        }
        points
    }

    /// Returns the bounds of all active segments using the configured accuracy.
    #[must_use]
    pub fn bounds(&self) -> Option<Rectangle> {
        self.bounds_with_accuracy(self.params.bounds_accuracy)
    }

    /// Returns the union of the bounds of all active segments, or `None`
    /// when no segment is active.
    #[must_use]
    pub fn bounds_with_accuracy(&self, accuracy: usize) -> Option<Rectangle> {
        let mut out = Rectangle::default();
        self.bounds_into(&mut out, accuracy).then_some(out)
    }

    /// Writes the union of the active segment bounds into `out`.
    ///
    /// When no segment is active, `out` becomes a zero-size rectangle at the
    /// start point and `false` is returned.
    pub fn bounds_into(&self, out: &mut Rectangle, accuracy: usize) -> bool {
        let accuracy = accuracy.max(1);
        let mut segment_bounds = Rectangle::default();
        let mut union: Option<Rectangle> = None;

        for segment in self.segments.iter().filter(|s| s.is_active()) {
            segment.bounds_into(&mut segment_bounds, accuracy);
            union = Some(match union {
                Some(acc) => acc.union(&segment_bounds),
                None => segment_bounds,
            });
        }

        if let Some(bounds) = union {
            *out = bounds;
            true
        } else {
            *out = Rectangle::from_corners(self.start_point, self.start_point);
            false
        }
    }

    /// Draws every active segment onto `target`.
    pub fn draw<'t, T: StrokeTarget>(&self, target: &'t mut T, points_total: usize) -> &'t mut T {
        for segment in self.segments.iter().filter(|s| s.is_active()) {
            segment.draw(&mut *target, points_total);
        }
        target
    }

    /// Removes every segment and resets the start point to the origin.
    pub fn destroy(&mut self) {
        self.segments.clear();
        self.invalidate_lengths();
        self.start_point = Point2::origin();
    }

    fn invalidate_lengths(&mut self) {
        self.curve_lengths.take();
    }
}
