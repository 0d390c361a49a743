//! Domain layer containing the account, session and outbox entities.

pub mod entities;

// Re-export commonly used domain types
pub use entities::*;
