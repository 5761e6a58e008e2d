use std::path::PathBuf;

use thiserror::Error;

/// Result alias for the data layer.
pub type Result<T> = std::result::Result<T, KpDataError>;

/// Failures raised while loading, validating or reshaping one example.
#[derive(Debug, Error)]
pub enum KpDataError {
    #[error("cannot read {}: {source}", path.display())]
    DataAccess {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed data in {} (line {line}): {message}", path.display())]
    MalformedData {
        path: PathBuf,
        line: u64,
        message: String,
    },

    #[error("{table} table is missing field '{field}'")]
    MissingField {
        table: &'static str,
        field: &'static str,
    },

    #[error("coordinate table has {coords} samples but solution table has {solution}")]
    ShapeMismatch { coords: usize, solution: usize },

    #[error("solution has nonzero imaginary part (imaginary parts sum to {imag_sum})")]
    ComplexSolution { imag_sum: f64 },

    #[error("cannot infer grid side: x never changes across {samples} samples")]
    GridInference { samples: usize },

    #[error("grid side {side} needs {required} samples but only {available} are present")]
    InsufficientSamples {
        side: usize,
        required: usize,
        available: usize,
    },

    #[error("grid side {side} is too large: side * side overflows")]
    GridSideOverflow { side: usize },

    #[error("grid side must be positive")]
    ZeroGridSide,
}
