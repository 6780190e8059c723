//! Application state - shared across all handlers.

use std::sync::Arc;
use std::time::Instant;

use chronicle_core::ports::{PasswordService, PostRepository, TokenService, UserRepository};
use chronicle_infra::database::{self, PostgresPostRepository, PostgresUserRepository};
use chronicle_infra::{Argon2PasswordService, DbConn, JwtTokenService};

use crate::config::AppConfig;

/// Shared application state. Everything here is read-only after startup;
/// per-request state never leaves its handler.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub tokens: Arc<dyn TokenService>,
    pub passwords: Arc<dyn PasswordService>,
    /// Pool handle for the health check; `None` only in tests.
    pub db: Option<DbConn>,
    pub started_at: Instant,
}

impl AppState {
    /// Connect the database and wire the concrete port implementations.
    pub async fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let db = database::connect(&config.database).await?;

        let state = Self {
            users: Arc::new(PostgresUserRepository::new(db.clone())),
            posts: Arc::new(PostgresPostRepository::new(db.clone())),
            tokens: Arc::new(JwtTokenService::from_env()),
            passwords: Arc::new(Argon2PasswordService::new()),
            db: Some(db),
            started_at: Instant::now(),
        };

        tracing::info!("Application state initialized");

        Ok(state)
    }
}
