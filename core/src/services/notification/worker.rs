//! Outbox polling worker

use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::domain::entities::notification::{Message, NotificationKind, NotificationTask};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{CodeRepository, NotificationOutbox, UserRepository};
use crate::services::clock::Clock;

use super::config::NotificationWorkerConfig;
use super::notifier::Notifier;

/// Content of the `Welcome` message
pub const WELCOME_CONTENT: &str = "Welcome";

/// Content of the `ChangeEmail` message
pub const CHANGE_EMAIL_CONTENT: &str = "Change email successful";

/// Observable worker state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    /// Waiting for the next poll
    Idle,
    /// Querying the outbox
    Polling,
    /// Handing a task to the notifier
    Delivering { task_id: i64 },
    /// Stopped after cancellation
    Stopped,
    /// Stopped after an error
    Failed,
}

/// Sequential consumer of the notification outbox
///
/// Only one worker may run against an outbox at a time.
pub struct NotificationWorker<U, C, O>
where
    U: UserRepository,
    C: CodeRepository,
    O: NotificationOutbox,
{
    users: Arc<U>,
    codes: Arc<C>,
    outbox: Arc<O>,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
    config: NotificationWorkerConfig,
    state: watch::Sender<WorkerState>,
}

impl<U, C, O> NotificationWorker<U, C, O>
where
    U: UserRepository + 'static,
    C: CodeRepository + 'static,
    O: NotificationOutbox + 'static,
{
    /// Create a new worker
    ///
    /// # Arguments
    ///
    /// * `users` - Resolves the contact email of a task's user
    /// * `codes` - Resolves the current recovery code for `PassRecovery`
    /// * `outbox` - Source of pending tasks
    /// * `notifier` - Delivery channel
    /// * `clock` - Time source for `exec_time`
    /// * `config` - Polling configuration
    pub fn new(
        users: Arc<U>,
        codes: Arc<C>,
        outbox: Arc<O>,
        notifier: Arc<dyn Notifier>,
        clock: Arc<dyn Clock>,
        config: NotificationWorkerConfig,
    ) -> Self {
        let (state, _) = watch::channel(WorkerState::Idle);
        Self {
            users,
            codes,
            outbox,
            notifier,
            clock,
            config,
            state,
        }
    }

    /// Current state
    pub fn state(&self) -> WorkerState {
        *self.state.borrow()
    }

    /// Receiver observing every state transition
    pub fn subscribe(&self) -> watch::Receiver<WorkerState> {
        self.state.subscribe()
    }

    fn set_state(&self, state: WorkerState) {
        self.state.send_replace(state);
    }

    /// Poll the outbox once and deliver at most one task
    ///
    /// # Returns
    ///
    /// * `Ok(Some(task_id))` - A task was delivered and marked done
    /// * `Ok(None)` - Nothing pending
    /// * `Err(DomainError)` - Resolution, delivery or bookkeeping failed; the task stays pending
    pub async fn poll_once(&self) -> DomainResult<Option<i64>> {
        self.set_state(WorkerState::Polling);

        let task = match self.outbox.next_pending().await? {
            Some(task) => task,
            None => {
                self.set_state(WorkerState::Idle);
                return Ok(None);
            }
        };

        self.set_state(WorkerState::Delivering { task_id: task.id });
        let (contact, message) = self.resolve(&task).await?;

        self.notifier.notify(&contact, &message).await?;
        self.outbox.mark_done(task.id, self.clock.now()).await?;

        info!(task_id = task.id, user_id = %task.user_id, kind = %task.kind, "Notification delivered");
        self.set_state(WorkerState::Idle);
        Ok(Some(task.id))
    }

    /// Contact address and message for a task, read at delivery time
    async fn resolve(&self, task: &NotificationTask) -> DomainResult<(String, Message)> {
        let user = self
            .users
            .user_by_id(task.user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("user"))?;

        let content = match task.kind {
            NotificationKind::Welcome => WELCOME_CONTENT.to_string(),
            NotificationKind::ChangeEmail => CHANGE_EMAIL_CONTENT.to_string(),
            NotificationKind::PassRecovery => self
                .codes
                .code_by_user(user.id)
                .await?
                .ok_or_else(|| DomainError::not_found("recovery code"))?,
        };

        Ok((user.email, Message::new(task.kind, content)))
    }

    /// Drain the outbox until `shutdown` is cancelled
    ///
    /// Cancellation is observed between tasks and during the idle backoff;
    /// an in-flight delivery always finishes first.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - Stopped by cancellation
    /// * `Err(DomainError)` - The first failure; the worker does not retry
    pub async fn run(&self, shutdown: CancellationToken) -> DomainResult<()> {
        info!(
            poll_interval_ms = self.config.poll_interval.as_millis() as u64,
            "Notification worker started"
        );

        while !shutdown.is_cancelled() {
            match self.poll_once().await {
                Ok(Some(_)) => {}
                Ok(None) => {
                    debug!("Outbox drained, backing off");
                    tokio::select! {
                        _ = shutdown.cancelled() => break,
                        _ = tokio::time::sleep(self.config.poll_interval) => {}
                    }
                }
                Err(e) => {
                    error!(error = %e, "Notification worker stopped on failure");
                    self.set_state(WorkerState::Failed);
                    return Err(e);
                }
            }
        }

        self.set_state(WorkerState::Stopped);
        info!("Notification worker stopped");
        Ok(())
    }

    /// Run the worker as a background task
    pub fn spawn(self: Arc<Self>, shutdown: CancellationToken) -> JoinHandle<DomainResult<()>> {
        tokio::spawn(async move { self.run(shutdown).await })
    }
}
