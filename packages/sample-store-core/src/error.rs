//! Benchmark error types.

use thiserror::Error;

/// Result type for benchmark operations
pub type BenchResult<T> = Result<T, BenchError>;

/// Benchmark operation errors.
///
/// A missing record is never an error; lookups return `Option`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BenchError {
    /// A backend operation failed during a stage
    #[error("Backend '{backend}' failed during {stage}: {message}")]
    Backend {
        backend: String,
        stage: String,
        message: String,
    },

    /// A stage did not complete within the configured timeout
    #[error("Backend '{backend}' timed out during {stage} after {timeout_ms}ms")]
    StageTimeout {
        backend: String,
        stage: String,
        timeout_ms: u64,
    },

    /// No backend registered under this name
    #[error("Unknown backend '{0}'")]
    UnknownBackend(String),

    /// Configuration rejected by validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// I/O error while reading configuration
    #[error("I/O error: {0}")]
    Io(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl BenchError {
    /// Builds a `Backend` error for the given backend and stage.
    pub fn backend(
        backend: impl Into<String>,
        stage: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        BenchError::Backend {
            backend: backend.into(),
            stage: stage.into(),
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for BenchError {
    fn from(err: std::io::Error) -> Self {
        BenchError::Io(err.to_string())
    }
}

impl From<csv::Error> for BenchError {
    fn from(err: csv::Error) -> Self {
        BenchError::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for BenchError {
    fn from(err: serde_json::Error) -> Self {
        BenchError::Serialization(err.to_string())
    }
}
