//! Domain-specific error types and error handling.

mod types;

#[cfg(test)]
mod tests;

pub use types::{ConflictError, ErrorKind, ValidationError};

use thiserror::Error;

/// Core domain errors
///
/// Every failure surfaced by the account services falls into one of four
/// classes, see [`DomainError::kind`]. Storage constraint violations are
/// translated into [`ConflictError`] by the storage adapter, never here.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error(transparent)]
    Conflict(#[from] ConflictError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    /// Shorthand for a `NotFound` error naming the missing resource
    pub fn not_found(resource: impl Into<String>) -> Self {
        DomainError::NotFound {
            resource: resource.into(),
        }
    }

    /// Shorthand for an `Internal` error carrying context
    pub fn internal(message: impl Into<String>) -> Self {
        DomainError::Internal {
            message: message.into(),
        }
    }

    /// Classify the error for callers mapping it onto a transport
    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::NotFound { .. } => ErrorKind::NotFound,
            DomainError::Conflict(_) => ErrorKind::Conflict,
            DomainError::Validation(_) => ErrorKind::Validation,
            DomainError::Internal { .. } => ErrorKind::Internal,
        }
    }

    /// Message safe to show to a client
    ///
    /// Internal errors are replaced by a generic text; their details stay in
    /// the logs.
    pub fn public_message(&self) -> String {
        match self {
            DomainError::Internal { .. } => String::from("Internal server error"),
            other => other.to_string(),
        }
    }

    /// True if this error is the given conflict
    pub fn is_conflict(&self, expected: ConflictError) -> bool {
        matches!(self, DomainError::Conflict(c) if *c == expected)
    }

    /// True if this error is the given validation failure
    pub fn is_validation(&self, expected: ValidationError) -> bool {
        matches!(self, DomainError::Validation(v) if *v == expected)
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
