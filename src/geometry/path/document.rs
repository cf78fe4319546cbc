//! JSON document form of a [`Path`].
//!
//! ```text
//! { "type": "Path", "x": 0, "y": 0, "autoClose": false, "curves": [ ... ] }
//! ```
//!
//! Each curve carries its own `type` discriminator. Curves that cannot be
//! decoded are skipped with a warning so that the rest of the path loads.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::error::{Result, SerializationError};
use crate::geometry::curve::Segment;
use crate::math::Point2;

use super::Path;

const PATH_TYPE: &str = "Path";

#[derive(Serialize)]
struct PathDocumentRef<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    x: f64,
    y: f64,
    #[serde(rename = "autoClose")]
    auto_close: bool,
    curves: &'a [Segment],
}

#[derive(Deserialize)]
struct PathDocument {
    #[serde(rename = "type")]
    kind: String,
    x: f64,
    y: f64,
    #[serde(rename = "autoClose", default)]
    auto_close: bool,
    #[serde(default)]
    curves: Vec<Value>,
}

impl Path {
    /// Serializes the path into a JSON value.
    ///
    /// # Errors
    ///
    /// Returns an error if a curve cannot be represented as JSON.
    pub fn to_json(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Serializes the path into a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if a curve cannot be represented as JSON.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Builds a path from a JSON value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not a `"Path"` document.
    pub fn from_json(value: &Value) -> Result<Self> {
        let mut path = Self::default();
        path.load_json(value)?;
        Ok(path)
    }

    /// Parses a path from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid JSON or not a `"Path"` document.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_json(&value)
    }

    /// Replaces the segments, start point and `auto_close` flag of this path
    /// with the content of a JSON document. Name and sampling params are kept.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not a `"Path"` document; the path is
    /// left unchanged in that case.
    pub fn load_json(&mut self, value: &Value) -> Result<()> {
        let document = PathDocument::deserialize(value)?;
        self.load_document(document)?;
        Ok(())
    }

    fn load_document(&mut self, document: PathDocument) -> std::result::Result<(), SerializationError> {
        if document.kind != PATH_TYPE {
            return Err(SerializationError::UnexpectedType {
                expected: PATH_TYPE,
                found: document.kind,
            });
        }

        self.segments.clear();
        self.invalidate_lengths();
        self.start_point = Point2::new(document.x, document.y);
        self.auto_close = document.auto_close;

        for (index, curve) in document.curves.into_iter().enumerate() {
            let kind = curve
                .get("type")
                .and_then(Value::as_str)
                .unwrap_or("<missing>")
                .to_owned();
            match serde_json::from_value::<Segment>(curve) {
                Ok(segment) => {
                    self.add(segment);
                }
                Err(err) => {
                    tracing::warn!(index, kind = %kind, %err, "skipping curve that could not be decoded");
                }
            }
        }
        Ok(())
    }
}

impl Serialize for Path {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        PathDocumentRef {
            kind: PATH_TYPE,
            x: self.start_point.x,
            y: self.start_point.y,
            auto_close: self.auto_close,
            curves: &self.segments,
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Path {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let document = PathDocument::deserialize(deserializer)?;
        let mut path = Self::default();
        path.load_document(document)
            .map_err(serde::de::Error::custom)?;
        Ok(path)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::CurvepathError;
    use crate::geometry::curve::Curve;
    use approx::assert_abs_diff_eq;
    use serde_json::json;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    /// A path touching every segment kind.
    fn mixed_path() -> Path {
        let mut path = Path::new(1.0, 2.0);
        path.line_to([5.0, 2.0])
            .cubic_bezier_to([6.0, 4.0], [8.0, 4.0], [9.0, 2.0])
            .ellipse_to(2.0, 1.0, 180.0, 360.0, false, 15.0)
            .spline_to([Point2::new(12.0, 5.0), Point2::new(14.0, 1.0)])
            .move_to([20.0, 20.0])
            .circle_to(3.0, true, 0.0);
        path.set_auto_close(true);
        path
    }

    fn assert_same_samples(a: &[Point2], b: &[Point2]) {
        assert_eq!(a.len(), b.len());
        for (p, q) in a.iter().zip(b) {
            assert_abs_diff_eq!(p.x, q.x, epsilon = 1e-9);
            assert_abs_diff_eq!(p.y, q.y, epsilon = 1e-9);
        }
    }

    #[test]
    fn document_shape() {
        let mut path = Path::new(0.0, 0.0);
        path.line_to([10.0, 0.0]);
        let json = path.to_json().unwrap();
        assert_eq!(
            json,
            json!({
                "type": "Path",
                "x": 0.0,
                "y": 0.0,
                "autoClose": false,
                "curves": [{ "type": "LineCurve", "points": [0.0, 0.0, 10.0, 0.0] }]
            })
        );
    }

    #[test]
    fn round_trip_preserves_every_segment_kind() {
        let path = mixed_path();
        let restored = Path::from_json(&path.to_json().unwrap()).unwrap();

        let kinds: Vec<_> = restored.segments().iter().map(Segment::type_name).collect();
        assert_eq!(
            kinds,
            [
                "LineCurve",
                "CubicBezierCurve",
                "EllipseCurve",
                "SplineCurve",
                "MoveTo",
                "EllipseCurve"
            ]
        );
        assert!(restored.auto_close());
        assert_eq!(restored.start_point(), path.start_point());
        assert_same_samples(&restored.points(), &path.points());
        assert_abs_diff_eq!(restored.length(), path.length(), epsilon = 1e-9);
    }

    #[test]
    fn round_trip_through_string() {
        let path = mixed_path();
        let text = path.to_json_string().unwrap();
        let restored = Path::from_json_str(&text).unwrap();
        assert_same_samples(&restored.spaced_points(), &path.spaced_points());
    }

    #[test]
    fn serde_impls_round_trip() {
        let path = mixed_path();
        let text = serde_json::to_string(&path).unwrap();
        let restored: Path = serde_json::from_str(&text).unwrap();
        assert_eq!(restored.len(), path.len());
        assert_same_samples(&restored.points(), &path.points());
    }

    #[test]
    fn unknown_curve_type_is_skipped() {
        init_tracing();
        let value = json!({
            "type": "Path",
            "x": 0.0,
            "y": 0.0,
            "autoClose": false,
            "curves": [
                { "type": "LineCurve", "points": [0.0, 0.0, 1.0, 0.0] },
                { "type": "QuadraticBezierCurve", "points": [1.0, 0.0, 2.0, 1.0, 3.0, 0.0] },
                { "type": "LineCurve", "points": [1.0, 0.0, 1.0, 1.0] }
            ]
        });
        let path = Path::from_json(&value).unwrap();
        assert_eq!(path.len(), 2);
        assert_abs_diff_eq!(path.length(), 2.0);
    }

    #[test]
    fn malformed_curve_is_skipped() {
        init_tracing();
        let value = json!({
            "type": "Path",
            "x": 0.0,
            "y": 0.0,
            "curves": [
                { "type": "SplineCurve", "points": [0.0, 1.0, 2.0] },
                { "points": [0.0, 0.0, 1.0, 0.0] },
                { "type": "MoveTo", "points": [3.0, 3.0] }
            ]
        });
        let path = Path::from_json(&value).unwrap();
        assert_eq!(path.len(), 1);
        assert!(!path.auto_close());
        assert_eq!(path.end_point(), Point2::new(3.0, 3.0));
    }

    #[test]
    fn wrong_document_type_is_an_error() {
        let value = json!({ "type": "Shape", "x": 0.0, "y": 0.0, "curves": [] });
        let err = Path::from_json(&value).unwrap_err();
        assert!(matches!(
            err,
            CurvepathError::Serialization(SerializationError::UnexpectedType { .. })
        ));
    }

    #[test]
    fn invalid_json_is_an_error() {
        let err = Path::from_json_str("{ not json").unwrap_err();
        assert!(matches!(
            err,
            CurvepathError::Serialization(SerializationError::Json(_))
        ));
    }

    #[test]
    fn load_json_replaces_content_in_place() {
        let mut path = mixed_path();
        path.set_name("track");
        let before = path.length();
        path.load_json(&json!({
            "type": "Path",
            "x": 5.0,
            "y": 5.0,
            "autoClose": false,
            "curves": [{ "type": "LineCurve", "points": [5.0, 5.0, 5.0, 9.0] }]
        }))
        .unwrap();
        assert_eq!(path.name(), "track");
        assert_eq!(path.len(), 1);
        assert!(path.length() < before);
        assert_abs_diff_eq!(path.length(), 4.0);
        assert_eq!(path.segments()[0].end_point(), Point2::new(5.0, 9.0));
    }

    #[test]
    fn failed_load_leaves_path_unchanged() {
        let mut path = mixed_path();
        let len = path.len();
        assert!(path.load_json(&json!({ "type": "Nope", "x": 0.0, "y": 0.0 })).is_err());
        assert_eq!(path.len(), len);
    }
}
