use bank_core::types::Timestamp;
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::AuthError;

/// Claims sealed inside every access and refresh token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payload {
    /// Fresh per issuance. For refresh tokens this is also the session id.
    pub id: Uuid,
    /// Authenticated principal (username).
    pub subject: String,
    pub issued_at: Timestamp,
    pub expires_at: Timestamp,
}

impl Payload {
    pub fn new(subject: &str, ttl: Duration) -> Self {
        let issued_at = Utc::now();
        Self {
            id: Uuid::new_v4(),
            subject: subject.to_string(),
            issued_at,
            expires_at: issued_at + ttl,
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Expiry check applied after the token has authenticated.
    pub fn valid(&self) -> Result<(), AuthError> {
        if self.is_expired() {
            return Err(AuthError::ExpiredCredential);
        }
        Ok(())
    }
}
