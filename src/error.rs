use thiserror::Error;

/// Top-level error type for the curvepath crate.
#[derive(Debug, Error)]
pub enum CurvepathError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Serialization(#[from] SerializationError),
}

/// Errors related to geometric construction.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate geometry: {0}")]
    Degenerate(String),
}

/// Errors raised while reading or writing path documents.
#[derive(Debug, Error)]
pub enum SerializationError {
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a document of type {expected:?}, found {found:?}")]
    UnexpectedType {
        expected: &'static str,
        found: String,
    },

    #[error("invalid curve data: {0}")]
    InvalidCurve(String),
}

impl From<serde_json::Error> for CurvepathError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(SerializationError::Json(err))
    }
}

/// Convenience type alias for results using [`CurvepathError`].
pub type Result<T> = std::result::Result<T, CurvepathError>;
