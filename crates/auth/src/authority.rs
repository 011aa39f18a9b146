use std::sync::Arc;

use chrono::Duration;

use crate::token::{AeadTokenMaker, Payload, TokenMaker};
use crate::{AuthError, TokenConfig};

/// Issues and verifies the two credential classes over a single token maker.
///
/// Access and refresh tokens share one verification path; which class a token
/// is allowed to be is decided by where it is presented (a guarded route or
/// the renewal endpoint), not by anything inside the payload.
#[derive(Clone)]
pub struct CredentialAuthority {
    maker: Arc<dyn TokenMaker>,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl CredentialAuthority {
    pub fn new(maker: Arc<dyn TokenMaker>, access_ttl: Duration, refresh_ttl: Duration) -> Self {
        Self {
            maker,
            access_ttl,
            refresh_ttl,
        }
    }

    /// Build the default AES-256-GCM authority from process configuration.
    ///
    /// # Errors
    /// [`AuthError::KeyConfiguration`] for a bad key or an out-of-range
    /// lifetime; this is a startup failure, never a per-request one.
    pub fn from_config(config: &TokenConfig) -> Result<Self, AuthError> {
        let maker = AeadTokenMaker::new(config.symmetric_key.as_bytes())?;
        Ok(Self::new(
            Arc::new(maker),
            config.access_ttl()?,
            config.refresh_ttl()?,
        ))
    }

    pub fn issue_access(&self, subject: &str) -> Result<(String, Payload), AuthError> {
        self.maker.issue(subject, self.access_ttl)
    }

    pub fn issue_refresh(&self, subject: &str) -> Result<(String, Payload), AuthError> {
        self.maker.issue(subject, self.refresh_ttl)
    }

    pub fn verify(&self, token: &str) -> Result<Payload, AuthError> {
        self.maker.verify(token)
    }

    pub fn access_ttl(&self) -> Duration {
        self.access_ttl
    }

    pub fn refresh_ttl(&self) -> Duration {
        self.refresh_ttl
    }
}

impl std::fmt::Debug for CredentialAuthority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialAuthority")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish_non_exhaustive()
    }
}
