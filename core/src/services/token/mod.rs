//! Token authority module
//!
//! Issues and verifies the signed auth tokens handed to clients. A token only
//! carries a random [`TokenId`](crate::domain::entities::session::TokenId);
//! the user is always resolved through the session table.

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::TokenAuthorityConfig;
pub use service::{
    JwtTokenAuthority, TokenAuthority, TokenClaims, TokenIdGenerator, UuidTokenIdGenerator,
};
