//! Error types for SensorHTM.

use thiserror::Error;

/// Result type for SensorHTM operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the descriptor, the point processor and the model store.
#[derive(Debug, Error)]
pub enum Error {
    /// A required key is absent from a configuration record.
    #[error("Missing field: {field}")]
    MissingField { field: String },

    /// A key is present but its value cannot be used.
    #[error("Invalid field {field}: {reason}")]
    InvalidField { field: String, reason: String },

    /// A point timestamp does not match `%Y-%m-%dT%H:%M:%S` after normalization.
    #[error("Invalid timestamp '{input}': {source}")]
    TimestampParse {
        input: String,
        #[source]
        source: chrono::ParseError,
    },

    /// A point arrived before the previously processed timestamp.
    #[error("Point out of order: {current} does not follow {previous}")]
    OutOfOrder {
        previous: chrono::NaiveDateTime,
        current: chrono::NaiveDateTime,
    },

    /// The predictive model failed.
    #[error("Model error: {0}")]
    Model(String),

    /// The anomaly-likelihood estimator failed.
    #[error("Likelihood error: {0}")]
    Likelihood(String),

    /// Storage/Database error.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Resource not found.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Resource already exists.
    #[error("Resource already exists: {0}")]
    AlreadyExists(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a missing field error.
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Create an invalid field error.
    pub fn invalid_field(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
