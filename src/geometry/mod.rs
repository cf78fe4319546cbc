pub mod curve;
pub mod path;

pub use curve::{
    ArcLengthTable, CubicBezierCurve, Curve, EllipseCurve, LineCurve, MoveTo, Segment, SplineCurve,
    ARC_LENGTH_DIVISIONS,
};
pub use path::{Path, SamplingParams};
