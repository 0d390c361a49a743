//! User account service module
//!
//! Registration, login, profile changes, password recovery and account
//! deletion. Every mutation that owes the user a notification writes its
//! outbox row in the same transaction.

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::AccountServiceConfig;
pub use service::UserAccountService;
