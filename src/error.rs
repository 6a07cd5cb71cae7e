//! Error types for the cinerate pipeline

use thiserror::Error;

/// Result type alias for cinerate operations
pub type Result<T> = std::result::Result<T, CinerateError>;

/// Main error type for the cinerate pipeline
#[derive(Error, Debug)]
pub enum CinerateError {
    #[error("Data error: {0}")]
    DataError(String),

    #[error("Feature not found: {0}")]
    FeatureNotFound(String),

    #[error("Unknown category in column '{column}': '{value}'")]
    UnknownCategory { column: String, value: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Search error: {0}")]
    SearchError(String),

    #[error("Computation error: {0}")]
    ComputationError(String),

    #[error("Model not fitted")]
    ModelNotFitted,

    #[error("Invalid shape: expected {expected}, got {actual}")]
    ShapeError { expected: String, actual: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<polars::error::PolarsError> for CinerateError {
    fn from(err: polars::error::PolarsError) -> Self {
        CinerateError::DataError(err.to_string())
    }
}

impl From<ndarray::ShapeError> for CinerateError {
    fn from(err: ndarray::ShapeError) -> Self {
        CinerateError::ShapeError {
            expected: "conformable block shapes".to_string(),
            actual: err.to_string(),
        }
    }
}

impl From<bincode::Error> for CinerateError {
    fn from(err: bincode::Error) -> Self {
        CinerateError::SerializationError(err.to_string())
    }
}
