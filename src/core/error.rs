//! Error types for the logger facade

use std::fmt;

pub type Result<T> = std::result::Result<T, LoggerError>;

/// One backend that failed to flush, kept for aggregated reporting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlushFailure {
    pub backend: String,
    pub message: String,
}

impl fmt::Display for FlushFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}': {}", self.backend, self.message)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Level name not present in the level table
    #[error("Invalid log level: '{name}'")]
    InvalidLevel { name: String },

    /// A configured backend could not be resolved or constructed
    #[error("Failed to resolve backend '{name}': {message}")]
    BackendResolution { name: String, message: String },

    /// A backend failed while handling an event
    #[error("Backend '{backend}' failed: {message}")]
    BackendDispatch { backend: String, message: String },

    /// One or more backends failed to flush; all of them were attempted
    #[error("{} backend(s) failed to flush, first {}", failures.len(), first_failure(failures))]
    BackendFlush { failures: Vec<FlushFailure> },

    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// File backend error with path
    #[error("File backend error for '{path}': {message}")]
    FileBackendError { path: String, message: String },

    /// Generic error
    #[error("{0}")]
    Other(String),
}

fn first_failure(failures: &[FlushFailure]) -> String {
    failures
        .first()
        .map(ToString::to_string)
        .unwrap_or_else(|| "<none>".to_string())
}

impl LoggerError {
    /// Create an invalid level error
    pub fn invalid_level(name: impl Into<String>) -> Self {
        LoggerError::InvalidLevel { name: name.into() }
    }

    /// Create a backend resolution error
    pub fn backend_resolution(name: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::BackendResolution {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create a backend dispatch error
    pub fn backend_dispatch(backend: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::BackendDispatch {
            backend: backend.into(),
            message: message.into(),
        }
    }

    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a file backend error
    pub fn file_backend(path: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::FileBackendError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LoggerError::Other(msg.into())
    }
}
