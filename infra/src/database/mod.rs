//! Database module - MySQL implementations using SQLx
//!
//! - Connection pool management and migrations
//! - Repository implementations over a single shared pool
//! - Mapping of unique-key violations onto domain conflicts

pub mod connection;
pub mod constraint;
pub mod mysql;

pub use connection::{DatabasePool, PoolStatistics};
pub use mysql::MySqlAccountStore;
