//! Error types for sqlweave.
//!
//! All public APIs return `WeaveResult<T>` — no panics in library code.

use thiserror::Error;

/// Unified error type for builder, metadata and persistence operations.
#[derive(Debug, Error)]
pub enum WeaveError {
    /// Entity metadata is incomplete or malformed (missing column name, bad tag, ...)
    #[error("configuration error on '{entity}.{field}': {reason}")]
    Configuration {
        entity: String,
        field: String,
        reason: String,
    },

    /// Builder used in an order it does not support
    #[error("misuse: {message}\nContext: {context}")]
    Misuse { message: String, context: String },

    /// A multi-object operation received no objects
    #[error("empty input: {0}")]
    EmptyInput(String),

    /// Column-name lookup found no matching field
    #[error("no field with column '{column}' on '{entity}'")]
    FieldNotFound { entity: String, column: String },

    /// Statement executor reported a failure
    #[error("executor error: {0}")]
    Executor(String),

    /// Persistence configuration could not be parsed
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Standard I/O error
    #[error("io error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

/// Result type alias for all sqlweave operations.
pub type WeaveResult<T> = Result<T, WeaveError>;

impl WeaveError {
    pub(crate) fn missing_column(entity: &str, field: &str) -> Self {
        WeaveError::Configuration {
            entity: entity.to_string(),
            field: field.to_string(),
            reason: "field has no column name".to_string(),
        }
    }
}

impl From<serde_json::Error> for WeaveError {
    fn from(err: serde_json::Error) -> Self {
        WeaveError::InvalidConfig(err.to_string())
    }
}
