use std::sync::Arc;

use bank_auth::{AuthError, BearerGuard, CredentialAuthority, SessionRefreshProtocol, SessionStore};
use bank_db::{AccountStore, DbPool, UserStore};
use bank_worker::TaskDistributor;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`
/// and to the gRPC service.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool, used for health checks.
    pub pool: DbPool,
    pub config: Arc<ServerConfig>,
    pub users: Arc<dyn UserStore>,
    pub accounts: Arc<dyn AccountStore>,
    /// Login and renewal over the session store.
    pub sessions: SessionRefreshProtocol,
    /// Access-token guard shared by the HTTP extractor and gRPC metadata check.
    pub guard: BearerGuard,
    pub distributor: Arc<dyn TaskDistributor>,
}

impl AppState {
    /// Wire the auth components from `config.token`.
    ///
    /// Fails with [`AuthError::KeyConfiguration`] on a bad key, so a
    /// misconfigured process never starts serving.
    pub fn new(
        pool: DbPool,
        config: ServerConfig,
        users: Arc<dyn UserStore>,
        accounts: Arc<dyn AccountStore>,
        session_store: Arc<dyn SessionStore>,
        distributor: Arc<dyn TaskDistributor>,
    ) -> Result<Self, AuthError> {
        let authority = CredentialAuthority::from_config(&config.token)?;
        Ok(Self {
            pool,
            config: Arc::new(config),
            users,
            accounts,
            sessions: SessionRefreshProtocol::new(authority.clone(), session_store),
            guard: BearerGuard::new(authority),
            distributor,
        })
    }
}
