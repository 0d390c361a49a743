//! Unit tests for domain error types

use crate::errors::{ConflictError, DomainError, ErrorKind, ValidationError};

#[test]
fn test_kind_classification() {
    assert_eq!(DomainError::not_found("user").kind(), ErrorKind::NotFound);
    assert_eq!(DomainError::from(ConflictError::EmailExist).kind(), ErrorKind::Conflict);
    assert_eq!(DomainError::from(ConflictError::CodeExpired).kind(), ErrorKind::Conflict);
    assert_eq!(DomainError::from(ValidationError::InvalidToken).kind(), ErrorKind::Validation);
    assert_eq!(DomainError::internal("boom").kind(), ErrorKind::Internal);
}

#[test]
fn test_internal_message_is_hidden() {
    let error = DomainError::internal("Failed to connect to mysql://root:secret@db");
    assert_eq!(error.public_message(), "Internal server error");
    assert!(error.to_string().contains("mysql://"));
}

#[test]
fn test_public_message_passes_through_for_client_errors() {
    let error = DomainError::from(ConflictError::UsernameExist);
    assert_eq!(error.public_message(), "Username already exists");

    let error = DomainError::not_found("session");
    assert_eq!(error.public_message(), "Resource not found: session");
}

#[test]
fn test_variant_predicates() {
    let error = DomainError::from(ValidationError::ExpiredToken);
    assert!(error.is_validation(ValidationError::ExpiredToken));
    assert!(!error.is_validation(ValidationError::InvalidToken));
    assert!(!error.is_conflict(ConflictError::EmailExist));
}
