//! Hand-off of sampled path geometry to an external renderer.
//!
//! Segments and paths never rasterize anything themselves; they sample
//! points and pass them to a [`StrokeTarget`].

use crate::math::Point2;

/// A surface that can stroke polylines.
pub trait StrokeTarget {
    /// Strokes a connected polyline through `points`.
    fn stroke_points(&mut self, points: &[Point2]);

    /// Strokes a single straight line.
    fn line_between(&mut self, from: Point2, to: Point2) {
        self.stroke_points(&[from, to]);
    }
}

/// A polyline approximation of a drawn segment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polyline {
    /// The ordered vertices of the polyline.
    pub points: Vec<Point2>,
}

/// A [`StrokeTarget`] that records every stroke as a [`Polyline`].
#[derive(Debug, Clone, Default)]
pub struct StrokeRecorder {
    pub strokes: Vec<Polyline>,
}

impl StrokeRecorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of recorded vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.strokes.iter().map(|s| s.points.len()).sum()
    }
}

impl StrokeTarget for StrokeRecorder {
    fn stroke_points(&mut self, points: &[Point2]) {
        self.strokes.push(Polyline {
            points: points.to_vec(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_between_records_two_points() {
        let mut rec = StrokeRecorder::new();
        rec.line_between(Point2::new(0.0, 0.0), Point2::new(1.0, 1.0));
        assert_eq!(rec.strokes.len(), 1);
        assert_eq!(rec.vertex_count(), 2);
    }
}
