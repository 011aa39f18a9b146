//! The persisted session record and the storage contract it lives behind.

use async_trait::async_trait;
use bank_core::types::{SessionId, Timestamp};

use crate::AuthError;

/// Diagnostic capture of the client that opened a session.
///
/// Logged and stored, never used to make an authorization decision.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientContext {
    pub user_agent: Option<String>,
    pub client_ip: Option<String>,
}

/// Server-held record binding one refresh token to one principal.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    /// Equal to the id of the refresh payload issued at login.
    pub id: SessionId,
    /// Principal the refresh token was issued to.
    pub subject: String,
    /// The exact serialized refresh token handed to the client.
    pub refresh_token: String,
    pub client: ClientContext,
    /// Set only by out-of-band revocation; never cleared.
    pub is_blocked: bool,
    /// Authoritative expiry, checked on every renewal.
    pub expires_at: Timestamp,
    pub created_at: Timestamp,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("subject", &self.subject)
            .field("client", &self.client)
            .field("is_blocked", &self.is_blocked)
            .field("expires_at", &self.expires_at)
            .field("created_at", &self.created_at)
            .finish_non_exhaustive()
    }
}

/// Errors a [`SessionStore`] may report.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("session not found")]
    NotFound,

    #[error("session store failure: {0}")]
    Backend(String),
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => Self::SessionNotFound,
            StoreError::Backend(msg) => Self::Storage(msg),
        }
    }
}

/// Session persistence.
///
/// Each call is a single atomic store operation; dropping the returned future
/// abandons the call without leaving a partial write.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Insert a new session.
    async fn create(&self, session: &Session) -> Result<(), StoreError>;

    /// Fetch a session by id, [`StoreError::NotFound`] if absent.
    async fn get(&self, id: SessionId) -> Result<Session, StoreError>;

    /// Permanently block a session (administrative revocation).
    async fn block(&self, id: SessionId) -> Result<(), StoreError>;
}
