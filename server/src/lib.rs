//! # User Accounts Server
//!
//! Wires configuration, the MySQL store, the account services and the
//! notification worker into one process.

pub mod telemetry;

use std::sync::Arc;
use std::time::Duration as StdDuration;

use anyhow::Context;
use chrono::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use ua_core::services::{
    AccountServiceConfig, BcryptHasher, JwtTokenAuthority, NotificationWorker, NotificationWorkerConfig,
    RandomCodeGenerator, SessionService, SystemClock, TokenAuthorityConfig, UserAccountService,
};
use ua_infra::{create_notifier, DatabasePool, MySqlAccountStore};
use ua_shared::AppConfig;

pub type AccountService = UserAccountService<MySqlAccountStore, MySqlAccountStore, MySqlAccountStore>;
pub type OutboxWorker = NotificationWorker<MySqlAccountStore, MySqlAccountStore, MySqlAccountStore>;

/// A fully wired service instance
pub struct Application {
    pub config: AppConfig,
    pub pool: DatabasePool,
    pub accounts: Arc<AccountService>,
    pub worker: Arc<OutboxWorker>,
}

impl Application {
    /// Connect to the database and assemble every service
    pub async fn build(config: AppConfig) -> anyhow::Result<Self> {
        if config.auth.is_using_default_secret() {
            warn!("JWT_SECRET is not set; using the built-in development secret");
        }

        let pool = DatabasePool::new(config.database.clone())
            .await
            .context("failed to connect to the database")?;
        if config.database.run_migrations {
            pool.run_migrations().await.context("failed to apply migrations")?;
        }

        let store = Arc::new(MySqlAccountStore::new(pool.get_pool().clone()));
        let clock = Arc::new(SystemClock);

        let tokens = Arc::new(JwtTokenAuthority::new(TokenAuthorityConfig::new(
            config.auth.jwt_secret.clone(),
        )));
        let sessions = Arc::new(SessionService::new(store.clone(), tokens, clock.clone()));

        let accounts = Arc::new(UserAccountService::new(
            store.clone(),
            store.clone(),
            sessions,
            Arc::new(BcryptHasher::new(config.auth.bcrypt_cost)),
            Arc::new(RandomCodeGenerator),
            clock.clone(),
            AccountServiceConfig {
                token_ttl: Duration::seconds(config.auth.token_ttl_seconds),
                recovery_code_ttl: Duration::seconds(config.auth.recovery_code_ttl_seconds),
            },
        ));

        let notifier = create_notifier(&config.notification, config.environment.is_development())
            .context("failed to build notifier")?;
        let worker = Arc::new(NotificationWorker::new(
            store.clone(),
            store.clone(),
            store,
            notifier,
            clock,
            NotificationWorkerConfig {
                poll_interval: StdDuration::from_millis(config.notification.poll_interval_ms),
            },
        ));

        Ok(Self {
            config,
            pool,
            accounts,
            worker,
        })
    }

    /// Run the notification worker until `shutdown` fires or it fails
    ///
    /// The pool is closed in both cases; a worker failure is returned.
    pub async fn run_until_stopped(self, shutdown: CancellationToken) -> anyhow::Result<()> {
        info!(environment = %self.config.environment, "User accounts service running");

        let outcome = self.worker.clone().spawn(shutdown.clone()).await;
        shutdown.cancel();
        self.pool.close().await;

        outcome
            .context("notification worker panicked")?
            .context("notification worker stopped")?;
        Ok(())
    }
}
