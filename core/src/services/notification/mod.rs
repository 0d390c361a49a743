//! Notification delivery module
//!
//! A single background worker drains the transactional outbox in creation
//! order and hands each message to a [`Notifier`]. Delivery is at least
//! once: a task is only marked done after the notifier accepted it.

mod config;
mod notifier;
mod worker;

#[cfg(test)]
pub(crate) mod tests;

pub use config::NotificationWorkerConfig;
pub use notifier::Notifier;
pub use worker::{NotificationWorker, WorkerState, CHANGE_EMAIL_CONTENT, WELCOME_CONTENT};
