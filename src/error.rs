//! Error types for the Domus toolkit

use thiserror::Error;

/// Result type alias for Domus operations
pub type Result<T> = std::result::Result<T, DomusError>;

/// Main error type for the Domus toolkit
#[derive(Error, Debug)]
pub enum DomusError {
    #[error("Dataset unreadable: {path}: {reason}")]
    DatasetUnreadable { path: String, reason: String },

    #[error("No monitored feature is present in both datasets")]
    EmptyFeatureSet,

    #[error("Statistic computation failed: {0}")]
    StatisticComputation(String),

    #[error("Report write failed: {path}: {reason}")]
    ReportWrite { path: String, reason: String },

    #[error("Data error: {0}")]
    DataError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Model error: {0}")]
    ModelError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<polars::error::PolarsError> for DomusError {
    fn from(err: polars::error::PolarsError) -> Self {
        DomusError::DataError(err.to_string())
    }
}

impl From<serde_json::Error> for DomusError {
    fn from(err: serde_json::Error) -> Self {
        DomusError::SerializationError(err.to_string())
    }
}
