pub mod draw;
pub mod error;
pub mod geometry;
pub mod math;

pub use draw::{Polyline, StrokeRecorder, StrokeTarget};
pub use error::{CurvepathError, Result};
pub use geometry::{Curve, Path, Segment};
