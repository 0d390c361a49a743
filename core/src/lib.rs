//! # User Accounts Core
//!
//! Domain layer for the user account service: entities, the error taxonomy,
//! repository contracts, the account and session services, and the worker
//! that drains the notification outbox.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::{
    AuthToken, AuthUser, Message, NewNotification, NotificationKind, NotificationTask, Origin,
    Page, RecoveryCode, Session, TokenId, User,
};
pub use errors::{ConflictError, DomainError, DomainResult, ErrorKind, ValidationError};
pub use repositories::{CodeRepository, NotificationOutbox, SessionRepository, UserRepository};
pub use services::{
    AccountServiceConfig, BcryptHasher, Clock, CodeGenerator, JwtTokenAuthority,
    NotificationWorker, NotificationWorkerConfig, Notifier, PasswordHasher, RandomCodeGenerator,
    SessionService, SystemClock, TokenAuthority, TokenAuthorityConfig, UserAccountService,
    WorkerState,
};
