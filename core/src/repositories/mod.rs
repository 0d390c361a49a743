//! Repository contracts the services persist through.
//!
//! Each trait is narrow and async. A storage adapter may implement several of
//! them on one type so that a mutation and its outbox row share a
//! transaction.

pub mod code;
pub mod outbox;
pub mod session;
pub mod user;

#[cfg(test)]
pub mod mock;

pub use code::CodeRepository;
pub use outbox::NotificationOutbox;
pub use session::SessionRepository;
pub use user::UserRepository;

#[cfg(test)]
pub use mock::MockStore;
