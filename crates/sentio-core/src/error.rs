//! Error types for Sentio.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    // Input errors
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unsupported language code: {0}")]
    UnsupportedLanguage(String),

    // Job errors
    #[error("Job not found: {0}")]
    JobNotFound(String),

    #[error("Job already completed: {0}")]
    JobAlreadyTerminal(String),

    // External collaborators
    #[error("Dependency failure in {service}: {message}")]
    Dependency { service: String, message: String },

    #[error("Workflow trigger failed: {0}")]
    WorkflowTrigger(String),

    // Infrastructure errors
    #[error("Database error: {0}")]
    Database(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    // Generic
    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Build a dependency failure for a named external service.
    pub fn dependency(service: impl Into<String>, message: impl ToString) -> Self {
        Error::Dependency {
            service: service.into(),
            message: message.to_string(),
        }
    }

    /// Stable machine-readable code surfaced to API callers.
    pub fn code(&self) -> &'static str {
        match self {
            Error::Validation(_) | Error::UnsupportedLanguage(_) => "VALIDATION_ERROR",
            Error::JobNotFound(_) => "NOT_FOUND",
            Error::JobAlreadyTerminal(_) => "CONFLICT",
            _ => "INTERNAL_ERROR",
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
