//! Conflict and validation error types for account operations

use thiserror::Error;

/// Broad error classes, one per [`super::DomainError`] variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Conflict,
    Validation,
    Internal,
}

/// The request collides with existing state
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictError {
    #[error("Email already exists")]
    EmailExist,

    #[error("Username already exists")]
    UsernameExist,

    #[error("New email must differ from the current one")]
    EmailNeedDifferentiate,

    #[error("New username must differ from the current one")]
    UsernameNeedDifferentiate,

    #[error("Recovery code expired")]
    CodeExpired,

    #[error("Recovery code already issued to another account")]
    CodeExist,
}

/// The request or its credentials are not acceptable
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Password does not match")]
    NotValidPassword,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    ExpiredToken,

    #[error("Unknown notification kind")]
    UnknownKindTask,

    #[error("Malformed recovery code")]
    NotValidCode,

    #[error("Invalid page: limit must be within 1..=100 and offset non-negative")]
    InvalidPage,
}
