//! Builders for the HTTP state from the configured persistence backend.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::{info, warn};

use feedback_backend::inbound::http::state::{HttpState, StateDependencies};
use feedback_backend::outbound::memory::InMemoryStore;
use feedback_backend::outbound::persistence::{
    DbPool, DieselFeedbackRepository, DieselFeedbackRequestRepository, DieselUserRepository,
    MigrationError, PoolConfig, PoolError, run_migrations,
};
use feedback_backend::outbound::security::{Argon2PasswordHasher, JwtTokenCodec};

use super::ServerConfig;

/// Failures while preparing the persistence backend.
#[derive(Debug, thiserror::Error)]
pub enum StateBuildError {
    #[error(transparent)]
    Migrations(#[from] MigrationError),
    #[error(transparent)]
    Pool(#[from] PoolError),
}

impl From<StateBuildError> for std::io::Error {
    fn from(error: StateBuildError) -> Self {
        std::io::Error::other(error.to_string())
    }
}

fn dependencies<U, F, R>(
    config: &ServerConfig,
    users: Arc<U>,
    feedbacks: Arc<F>,
    requests: Arc<R>,
) -> StateDependencies<U, F, R> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    StateDependencies {
        users,
        feedbacks,
        requests,
        hasher: Arc::new(Argon2PasswordHasher),
        tokens: Arc::new(JwtTokenCodec::new(
            &config.token_secret,
            config.token_ttl,
            clock.clone(),
        )),
        clock,
    }
}

/// Build the HTTP state backed by PostgreSQL when a database URL is
/// configured, otherwise by a fresh in-memory store.
///
/// Migrations run before the pool is built so every pooled connection sees
/// the current schema.
pub async fn build_http_state(
    config: &ServerConfig,
) -> Result<web::Data<HttpState>, StateBuildError> {
    let state = match config.database_url.as_deref() {
        Some(url) => {
            run_migrations(url).await?;
            let pool =
                DbPool::new(PoolConfig::new(url).with_max_size(config.pool_max_size)).await?;
            info!(max_size = config.pool_max_size, "database pool ready");
            HttpState::from_dependencies(dependencies(
                config,
                Arc::new(DieselUserRepository::new(pool.clone())),
                Arc::new(DieselFeedbackRepository::new(pool.clone())),
                Arc::new(DieselFeedbackRequestRepository::new(pool)),
            ))
        }
        None => {
            warn!("no database URL configured; using the in-memory store");
            let store = Arc::new(InMemoryStore::default());
            HttpState::from_dependencies(dependencies(
                config,
                store.clone(),
                store.clone(),
                store,
            ))
        }
    };
    Ok(web::Data::new(state))
}
