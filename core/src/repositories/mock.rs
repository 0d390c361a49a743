//! In-memory store implementing every repository contract for tests
//!
//! All state sits behind one mutex, so each trait method is atomic the way a
//! database transaction would be.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::domain::entities::notification::{NewNotification, NotificationTask};
use crate::domain::entities::recovery_code::RecoveryCode;
use crate::domain::entities::session::{Session, TokenId};
use crate::domain::entities::user::{Page, User};
use crate::errors::{ConflictError, DomainError};

use super::{CodeRepository, NotificationOutbox, SessionRepository, UserRepository};

#[derive(Default)]
struct State {
    users: Vec<User>,
    sessions: Vec<Session>,
    tasks: Vec<NotificationTask>,
    codes: Vec<RecoveryCode>,
    next_task_id: i64,
    writes: usize,
}

impl State {
    fn enqueue(&mut self, notification: NewNotification) {
        self.next_task_id += 1;
        self.tasks.push(NotificationTask {
            id: self.next_task_id,
            user_id: notification.user_id,
            kind: notification.kind,
            is_done: false,
            created_at: notification.created_at,
            exec_time: None,
        });
    }

    fn user_mut(&mut self, user_id: Uuid) -> Result<&mut User, DomainError> {
        self.users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or_else(|| DomainError::not_found("user"))
    }
}

/// Mock store for testing
#[derive(Clone, Default)]
pub struct MockStore {
    state: Arc<Mutex<State>>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful mutating calls
    pub fn write_count(&self) -> usize {
        self.state.lock().unwrap().writes
    }

    pub fn tasks(&self) -> Vec<NotificationTask> {
        self.state.lock().unwrap().tasks.clone()
    }

    pub fn pending_tasks(&self) -> Vec<NotificationTask> {
        self.tasks().into_iter().filter(|t| !t.is_done).collect()
    }

    pub fn sessions(&self) -> Vec<Session> {
        self.state.lock().unwrap().sessions.clone()
    }

    pub fn codes(&self) -> Vec<RecoveryCode> {
        self.state.lock().unwrap().codes.clone()
    }

    /// Insert a user directly, bypassing uniqueness checks and the outbox
    pub fn insert_user(&self, user: User) {
        self.state.lock().unwrap().users.push(user);
    }

    /// Insert an outbox row directly
    pub fn insert_task(&self, notification: NewNotification) {
        self.state.lock().unwrap().enqueue(notification);
    }

    /// Rewrite a stored code's creation time
    pub fn backdate_code(&self, code: &str, created_at: DateTime<Utc>) {
        let mut state = self.state.lock().unwrap();
        if let Some(stored) = state.codes.iter_mut().find(|c| c.code == code) {
            stored.created_at = created_at;
        }
    }
}

#[async_trait]
impl UserRepository for MockStore {
    async fn create_user(&self, user: User, notification: NewNotification) -> Result<User, DomainError> {
        let mut state = self.state.lock().unwrap();
        if state.users.iter().any(|u| u.email == user.email) {
            return Err(ConflictError::EmailExist.into());
        }
        if state.users.iter().any(|u| u.username == user.username) {
            return Err(ConflictError::UsernameExist.into());
        }
        state.users.push(user.clone());
        state.enqueue(notification);
        state.writes += 1;
        Ok(user)
    }

    async fn update_email(
        &self,
        user_id: Uuid,
        email: &str,
        notification: NewNotification,
    ) -> Result<(), DomainError> {
        let mut state = self.state.lock().unwrap();
        if state.users.iter().any(|u| u.email == email && u.id != user_id) {
            return Err(ConflictError::EmailExist.into());
        }
        let user = state.user_mut(user_id)?;
        user.email = email.to_string();
        user.updated_at = notification.created_at;
        state.enqueue(notification);
        state.writes += 1;
        Ok(())
    }

    async fn update_username(
        &self,
        user_id: Uuid,
        username: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        let mut state = self.state.lock().unwrap();
        if state.users.iter().any(|u| u.username == username && u.id != user_id) {
            return Err(ConflictError::UsernameExist.into());
        }
        let user = state.user_mut(user_id)?;
        user.username = username.to_string();
        user.updated_at = updated_at;
        state.writes += 1;
        Ok(())
    }

    async fn update_password(
        &self,
        user_id: Uuid,
        pass_hash: &[u8],
        updated_at: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        let mut state = self.state.lock().unwrap();
        let user = state.user_mut(user_id)?;
        user.pass_hash = pass_hash.to_vec();
        user.updated_at = updated_at;
        state.codes.retain(|c| c.user_id != user_id);
        state.writes += 1;
        Ok(())
    }

    async fn delete_user(&self, user_id: Uuid) -> Result<(), DomainError> {
        let mut state = self.state.lock().unwrap();
        state.users.retain(|u| u.id != user_id);
        state.sessions.retain(|s| s.user_id != user_id);
        state.codes.retain(|c| c.user_id != user_id);
        state.tasks.retain(|t| t.user_id != user_id);
        state.writes += 1;
        Ok(())
    }

    async fn user_by_id(&self, user_id: Uuid) -> Result<Option<User>, DomainError> {
        let state = self.state.lock().unwrap();
        Ok(state.users.iter().find(|u| u.id == user_id).cloned())
    }

    async fn user_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let state = self.state.lock().unwrap();
        Ok(state.users.iter().find(|u| u.email == email).cloned())
    }

    async fn user_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let state = self.state.lock().unwrap();
        Ok(state.users.iter().find(|u| u.username == username).cloned())
    }

    async fn list_users_by_username(&self, query: &str, page: Page) -> Result<(Vec<User>, u64), DomainError> {
        let state = self.state.lock().unwrap();
        let mut matches: Vec<User> = state
            .users
            .iter()
            .filter(|u| u.username.contains(query))
            .cloned()
            .collect();
        matches.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let total = matches.len() as u64;
        let items = matches
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect();
        Ok((items, total))
    }
}

#[async_trait]
impl SessionRepository for MockStore {
    async fn save_session(&self, session: Session) -> Result<(), DomainError> {
        let mut state = self.state.lock().unwrap();
        if state.sessions.iter().any(|s| s.token_id == session.token_id) {
            return Err(DomainError::internal("duplicate token id"));
        }
        state.sessions.push(session);
        state.writes += 1;
        Ok(())
    }

    async fn session_by_token_id(&self, token_id: TokenId) -> Result<Option<Session>, DomainError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .sessions
            .iter()
            .find(|s| s.token_id == token_id && s.is_active())
            .cloned())
    }

    async fn user_by_token_id(&self, token_id: TokenId) -> Result<Option<User>, DomainError> {
        let state = self.state.lock().unwrap();
        let owner = state
            .sessions
            .iter()
            .find(|s| s.token_id == token_id && s.is_active())
            .map(|s| s.user_id);
        Ok(owner.and_then(|id| state.users.iter().find(|u| u.id == id).cloned()))
    }

    async fn revoke_session(&self, token_id: TokenId) -> Result<(), DomainError> {
        let mut state = self.state.lock().unwrap();
        for session in state.sessions.iter_mut().filter(|s| s.token_id == token_id) {
            session.is_logout = true;
        }
        state.writes += 1;
        Ok(())
    }
}

#[async_trait]
impl NotificationOutbox for MockStore {
    async fn next_pending(&self) -> Result<Option<NotificationTask>, DomainError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .tasks
            .iter()
            .filter(|t| !t.is_done)
            .min_by_key(|t| (t.created_at, t.id))
            .cloned())
    }

    async fn mark_done(&self, task_id: i64, exec_time: DateTime<Utc>) -> Result<(), DomainError> {
        let mut state = self.state.lock().unwrap();
        let task = state
            .tasks
            .iter_mut()
            .find(|t| t.id == task_id)
            .ok_or_else(|| DomainError::not_found("notification"))?;
        task.is_done = true;
        task.exec_time = Some(exec_time);
        state.writes += 1;
        Ok(())
    }
}

#[async_trait]
impl CodeRepository for MockStore {
    async fn save_code(&self, code: RecoveryCode, notification: NewNotification) -> Result<(), DomainError> {
        let mut state = self.state.lock().unwrap();
        if state.codes.iter().any(|c| c.code == code.code && c.user_id != code.user_id) {
            return Err(ConflictError::CodeExist.into());
        }
        state.codes.retain(|c| c.user_id != code.user_id);
        state.codes.push(code);
        state.enqueue(notification);
        state.writes += 1;
        Ok(())
    }

    async fn code_by_value(&self, code: &str) -> Result<Option<RecoveryCode>, DomainError> {
        let state = self.state.lock().unwrap();
        Ok(state.codes.iter().find(|c| c.code == code).cloned())
    }

    async fn code_by_user(&self, user_id: Uuid) -> Result<Option<String>, DomainError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .codes
            .iter()
            .find(|c| c.user_id == user_id)
            .map(|c| c.code.clone()))
    }
}
