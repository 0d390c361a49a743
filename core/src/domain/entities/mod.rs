//! Domain entities representing core business objects.

pub mod notification;
pub mod recovery_code;
pub mod session;
pub mod user;

// Re-export commonly used types
pub use notification::{Message, NewNotification, NotificationKind, NotificationTask};
pub use recovery_code::{RecoveryCode, CODE_ALPHABET, CODE_LENGTH, DEFAULT_CODE_LIFETIME_HOURS};
pub use session::{AuthToken, AuthUser, Session, TokenId};
pub use user::{normalize_email, Origin, Page, User, MAX_PAGE_LIMIT};
