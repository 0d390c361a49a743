//! Translation of SQLx write errors into domain errors

use ua_core::errors::{ConflictError, DomainError};

/// Unique key on `users.email`
pub const USERS_EMAIL_KEY: &str = "users_email_key";

/// Unique key on `users.username`
pub const USERS_USERNAME_KEY: &str = "users_username_key";

/// Unique key on `recovery_codes.code`
pub const RECOVERY_CODES_CODE_KEY: &str = "recovery_codes_code_key";

/// Map a MySQL duplicate-entry message onto the conflict it represents
///
/// MySQL reports the violated key only inside the message text, e.g.
/// `Duplicate entry 'a@b.c' for key 'users.users_email_key'`.
pub fn classify_unique_violation(message: &str) -> Option<ConflictError> {
    if message.contains(USERS_EMAIL_KEY) {
        Some(ConflictError::EmailExist)
    } else if message.contains(USERS_USERNAME_KEY) {
        Some(ConflictError::UsernameExist)
    } else if message.contains(RECOVERY_CODES_CODE_KEY) {
        Some(ConflictError::CodeExist)
    } else {
        None
    }
}

/// Convert an error raised by a write into a `DomainError`
///
/// Violations of the named unique keys become conflicts; everything else is
/// internal and carries `context`.
pub fn map_write_error(err: sqlx::Error, context: &str) -> DomainError {
    if let Some(db_err) = err.as_database_error() {
        if db_err.is_unique_violation() {
            if let Some(conflict) = classify_unique_violation(db_err.message()) {
                return conflict.into();
            }
        }
    }
    map_read_error(err, context)
}

/// Convert any other SQLx error into an internal `DomainError`
pub fn map_read_error(err: sqlx::Error, context: &str) -> DomainError {
    tracing::error!(error = %err, context, "Database operation failed");
    DomainError::internal(format!("{}: {}", context, err))
}
