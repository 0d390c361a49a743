//! MySQL implementations of the core repository traits
//!
//! A single [`MySqlAccountStore`] implements every repository so that writes
//! spanning several tables (a user and its outbox row, a recovery code and
//! its outbox row) can share one transaction.

mod code_repository_impl;
mod outbox_repository_impl;
mod session_repository_impl;
mod user_repository_impl;

use chrono::{DateTime, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::{MySql, MySqlPool, Row};
use std::net::IpAddr;
use uuid::Uuid;

use ua_core::domain::entities::{NotificationKind, NotificationTask, Origin, Session, TokenId, User};
use ua_core::errors::DomainError;

pub(crate) use outbox_repository_impl::enqueue;

/// MySQL-backed store for users, sessions, recovery codes and the outbox
#[derive(Clone)]
pub struct MySqlAccountStore {
    pool: MySqlPool,
}

impl MySqlAccountStore {
    /// Create a store over an existing pool
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub(crate) fn pool(&self) -> &MySqlPool {
        &self.pool
    }
}

/// Read one column, reporting decode failures as internal errors
fn column<'r, T>(row: &'r MySqlRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, MySql> + sqlx::Type<MySql>,
{
    row.try_get(name)
        .map_err(|e| DomainError::internal(format!("Failed to get {}: {}", name, e)))
}

fn uuid_column(row: &MySqlRow, name: &str) -> Result<Uuid, DomainError> {
    let raw: String = column(row, name)?;
    Uuid::parse_str(&raw).map_err(|e| DomainError::internal(format!("Invalid UUID in {}: {}", name, e)))
}

pub(crate) const USER_COLUMNS: &str = "id, email, username, pass_hash, created_at, updated_at";

pub(crate) fn row_to_user(row: &MySqlRow) -> Result<User, DomainError> {
    Ok(User {
        id: uuid_column(row, "id")?,
        email: column(row, "email")?,
        username: column(row, "username")?,
        pass_hash: column(row, "pass_hash")?,
        created_at: column::<DateTime<Utc>>(row, "created_at")?,
        updated_at: column::<DateTime<Utc>>(row, "updated_at")?,
    })
}

pub(crate) fn row_to_session(row: &MySqlRow) -> Result<Session, DomainError> {
    let ip: Option<String> = column(row, "ip")?;
    let ip = ip
        .map(|raw| raw.parse::<IpAddr>())
        .transpose()
        .map_err(|e| DomainError::internal(format!("Invalid ip: {}", e)))?;

    Ok(Session {
        id: uuid_column(row, "id")?,
        user_id: uuid_column(row, "user_id")?,
        token_id: TokenId(uuid_column(row, "token_id")?),
        origin: Origin::new(ip, column::<String>(row, "user_agent")?),
        is_logout: column(row, "is_logout")?,
        created_at: column::<DateTime<Utc>>(row, "created_at")?,
    })
}

pub(crate) fn row_to_task(row: &MySqlRow) -> Result<NotificationTask, DomainError> {
    let kind: String = column(row, "kind")?;

    Ok(NotificationTask {
        id: column(row, "id")?,
        user_id: uuid_column(row, "user_id")?,
        kind: kind.parse::<NotificationKind>()?,
        is_done: column(row, "is_done")?,
        created_at: column::<DateTime<Utc>>(row, "created_at")?,
        exec_time: column::<Option<DateTime<Utc>>>(row, "exec_time")?,
    })
}

/// Escape `%`, `_` and the escape character itself for a LIKE pattern
pub(crate) fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
