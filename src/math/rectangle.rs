use super::Point2;

/// An axis-aligned rectangle described by its top-left corner and size.
///
/// `right` and `bottom` are derived from the corner and size. Bounding-box
/// queries return a fresh `Rectangle`, or write into a caller-owned one via
/// their `*_into` variants.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rectangle {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rectangle {
    /// Creates a rectangle from its top-left corner and size.
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates the rectangle spanning two opposite corners.
    #[must_use]
    pub fn from_corners(min: Point2, max: Point2) -> Self {
        let x = min.x.min(max.x);
        let y = min.y.min(max.y);
        Self {
            x,
            y,
            width: min.x.max(max.x) - x,
            height: min.y.max(max.y) - y,
        }
    }

    /// Returns the smallest rectangle containing every point, or `None` if
    /// the iterator is empty.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point2>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = *iter.next()?;
        let (mut min, mut max) = (first, first);
        for p in iter {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        Some(Self::from_corners(min, max))
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Moves the right edge, keeping `x` fixed.
    pub fn set_right(&mut self, right: f64) {
        self.width = right - self.x;
    }

    /// Moves the bottom edge, keeping `y` fixed.
    pub fn set_bottom(&mut self, bottom: f64) {
        self.height = bottom - self.y;
    }

    #[must_use]
    pub fn center(&self) -> Point2 {
        Point2::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Returns `true` if the rectangle has no area.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Returns the smallest rectangle containing both `self` and `other`.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Self {
            x,
            y,
            width: self.right().max(other.right()) - x,
            height: self.bottom().max(other.bottom()) - y,
        }
    }

    /// Returns `true` if the point lies inside or on the border.
    #[must_use]
    pub fn contains_point(&self, p: &Point2) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn from_points_spans_extremes() {
        let pts = [
            Point2::new(1.0, 5.0),
            Point2::new(-2.0, 3.0),
            Point2::new(4.0, -1.0),
        ];
        let r = Rectangle::from_points(&pts).unwrap();
        assert_relative_eq!(r.x, -2.0);
        assert_relative_eq!(r.y, -1.0);
        assert_relative_eq!(r.right(), 4.0);
        assert_relative_eq!(r.bottom(), 5.0);
    }

    #[test]
    fn from_points_empty_is_none() {
        let pts: [Point2; 0] = [];
        assert!(Rectangle::from_points(&pts).is_none());
    }

    #[test]
    fn union_covers_both() {
        let a = Rectangle::new(0.0, 0.0, 2.0, 2.0);
        let b = Rectangle::new(1.0, -3.0, 5.0, 1.0);
        let u = a.union(&b);
        assert_relative_eq!(u.x, 0.0);
        assert_relative_eq!(u.y, -3.0);
        assert_relative_eq!(u.right(), 6.0);
        assert_relative_eq!(u.bottom(), 2.0);
    }

    #[test]
    fn set_right_and_bottom_resize() {
        let mut r = Rectangle::new(1.0, 1.0, 0.0, 0.0);
        r.set_right(4.0);
        r.set_bottom(3.0);
        assert_relative_eq!(r.width, 3.0);
        assert_relative_eq!(r.height, 2.0);
        assert!(r.contains_point(&Point2::new(2.0, 2.0)));
        assert!(!r.contains_point(&Point2::new(5.0, 2.0)));
    }

    #[test]
    fn degenerate_rectangle_is_empty() {
        let r = Rectangle::from_corners(Point2::new(0.0, 1.0), Point2::new(5.0, 1.0));
        assert!(r.is_empty());
        assert_relative_eq!(r.width, 5.0);
    }
}
