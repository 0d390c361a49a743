//! Session service module
//!
//! Starts sessions on login, resolves auth tokens back to users and revokes
//! sessions on logout.

mod service;

#[cfg(test)]
mod tests;

pub use service::SessionService;
