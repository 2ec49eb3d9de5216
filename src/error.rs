use thiserror::Error;

/// Top-level error type for the scene repository.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Tessellation(#[from] TessellationError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// An ingested object is not three-dimensional.
    #[error("object {index} has dimension {dimension}, expected 3")]
    DimensionMismatch { index: usize, dimension: usize },

    /// More color overrides than objects were supplied.
    #[error("{colors} color overrides supplied for {objects} objects")]
    LengthMismatch { objects: usize, colors: usize },

    #[error("artifact derivation failed for object {index}: {reason}")]
    ArtifactDerivation { index: usize, reason: String },

    #[error("bounding box unavailable: {0}")]
    Aggregation(String),

    #[error("slot {index} is absent or out of range (len {len})")]
    Index { index: usize, len: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Errors related to geometric construction and evaluation.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("parameter {parameter} = {value} is out of range [{min}, {max}]")]
    ParameterOutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,

    #[error("invalid object data: {0}")]
    InvalidData(String),
}

/// Errors related to tessellation.
#[derive(Debug, Error)]
pub enum TessellationError {
    #[error("invalid tessellation parameters: {0}")]
    InvalidParameters(String),

    #[error("tessellation failed: {0}")]
    Failed(String),
}

/// Errors raised while decoding an input stream.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed header on line {line}: {reason}")]
    Header { line: usize, reason: String },

    #[error("unknown object type `{0}`")]
    UnknownType(String),

    #[error("malformed object body on line {line}: {reason}")]
    Body { line: usize, reason: String },

    #[error("line {line} is not valid UTF-8")]
    Encoding { line: usize },

    #[error("malformed exchange document: {0}")]
    Document(#[from] serde_json::Error),

    #[error("expected a {expected} document, found `{found}`")]
    WrongFormat { expected: &'static str, found: String },

    #[error("unsupported {format} version {version}")]
    UnsupportedVersion { format: &'static str, version: u32 },

    #[error("read failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for results using [`SceneError`].
pub type Result<T> = std::result::Result<T, SceneError>;
