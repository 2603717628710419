//! Infrastructure-level errors (wraps domain errors)

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::DomainError;

/// Infrastructure errors wrap domain errors and add I/O and decode concerns.
#[derive(Error, Debug)]
pub enum InfraError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("directory not found: {0}")]
    DirectoryNotFound(PathBuf),

    #[error("file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("invalid source {path}: {reason}")]
    InvalidSource { path: PathBuf, reason: String },

    #[error("I/O error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed table {path}: {message}")]
    Decode { path: PathBuf, message: String },
}

impl InfraError {
    /// Create an I/O error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}

/// Result type for infrastructure layer operations.
pub type InfraResult<T> = Result<T, InfraError>;
