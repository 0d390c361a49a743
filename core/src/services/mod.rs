//! Business services containing domain logic and use cases.

pub mod account;
pub mod clock;
pub mod notification;
pub mod password;
pub mod recovery_code;
pub mod session;
pub mod token;

// Re-export commonly used types
pub use account::{AccountServiceConfig, UserAccountService};
pub use clock::{Clock, SystemClock};
pub use notification::{
    NotificationWorker, NotificationWorkerConfig, Notifier, WorkerState,
};
pub use password::{BcryptHasher, PasswordHasher};
pub use recovery_code::{CodeGenerator, RandomCodeGenerator};
pub use session::SessionService;
pub use token::{
    JwtTokenAuthority, TokenAuthority, TokenAuthorityConfig, TokenIdGenerator,
    UuidTokenIdGenerator,
};
