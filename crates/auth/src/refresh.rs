//! Session opening and access-token renewal.
//!
//! A renewal walks a fixed sequence of gates; the first failure rejects the
//! request and no later gate runs:
//!
//! 1. the refresh token authenticates and is unexpired;
//! 2. the session named by the payload id exists;
//! 3. the session is not blocked, belongs to the payload subject, stores this
//!    exact token string, and has not expired;
//! 4. a new access token is issued for the session subject.
//!
//! Binding by id *and* by exact string means a second, independently valid
//! refresh token for the same subject cannot stand in for the one the session
//! was opened with.

use std::sync::Arc;

use bank_core::types::{SessionId, Timestamp};
use chrono::Utc;
use subtle::ConstantTimeEq;

use crate::session::{ClientContext, Session, SessionStore};
use crate::token::Payload;
use crate::{AuthError, CredentialAuthority};

/// Result of a successful renewal.
#[derive(Debug, Clone)]
pub struct RenewedAccess {
    pub access_token: String,
    pub access_payload: Payload,
}

impl RenewedAccess {
    pub fn access_token_expires_at(&self) -> Timestamp {
        self.access_payload.expires_at
    }
}

/// Tokens handed to a client at login.
#[derive(Debug, Clone)]
pub struct OpenedSession {
    pub session_id: SessionId,
    pub access_token: String,
    pub access_payload: Payload,
    pub refresh_token: String,
    pub refresh_payload: Payload,
}

#[derive(Clone)]
pub struct SessionRefreshProtocol {
    authority: CredentialAuthority,
    store: Arc<dyn SessionStore>,
}

impl SessionRefreshProtocol {
    pub fn new(authority: CredentialAuthority, store: Arc<dyn SessionStore>) -> Self {
        Self { authority, store }
    }

    pub fn authority(&self) -> &CredentialAuthority {
        &self.authority
    }

    /// Issue access + refresh tokens for `subject` and persist the session
    /// binding the refresh token.
    ///
    /// The session is written with a single `create` call; if the caller is
    /// cancelled before it completes, no session exists.
    pub async fn open(
        &self,
        subject: &str,
        client: ClientContext,
    ) -> Result<OpenedSession, AuthError> {
        let (access_token, access_payload) = self.authority.issue_access(subject)?;
        let (refresh_token, refresh_payload) = self.authority.issue_refresh(subject)?;

        let session = Session {
            id: refresh_payload.id,
            subject: refresh_payload.subject.clone(),
            refresh_token: refresh_token.clone(),
            client,
            is_blocked: false,
            expires_at: refresh_payload.expires_at,
            created_at: refresh_payload.issued_at,
        };

        self.store.create(&session).await.map_err(|e| {
            tracing::error!(error = %e, session_id = %session.id, "Failed to create session");
            AuthError::from(e)
        })?;

        tracing::info!(
            session_id = %session.id,
            subject = %session.subject,
            user_agent = session.client.user_agent.as_deref().unwrap_or("-"),
            client_ip = session.client.client_ip.as_deref().unwrap_or("-"),
            "Session opened"
        );

        Ok(OpenedSession {
            session_id: session.id,
            access_token,
            access_payload,
            refresh_token,
            refresh_payload,
        })
    }

    /// Exchange a refresh token for a new access token.
    pub async fn renew(&self, refresh_token: &str) -> Result<RenewedAccess, AuthError> {
        let payload = self.authority.verify(refresh_token).map_err(|e| {
            tracing::debug!(error = %e, "Refresh token rejected");
            e
        })?;

        let session = self.store.get(payload.id).await.map_err(|e| {
            let err = AuthError::from(e);
            match &err {
                AuthError::Storage(msg) => {
                    tracing::error!(error = %msg, session_id = %payload.id, "Session lookup failed")
                }
                _ => tracing::warn!(session_id = %payload.id, "Refresh for unknown session"),
            }
            err
        })?;

        check_session(&session, &payload, refresh_token, Utc::now()).map_err(|e| {
            tracing::warn!(
                session_id = %session.id,
                subject = %payload.subject,
                reason = e.error_code(),
                "Session renewal rejected"
            );
            e
        })?;

        let (access_token, access_payload) =
            self.authority.issue_access(&session.subject).map_err(|e| {
                if e.is_retryable() {
                    e
                } else {
                    AuthError::Storage(format!("access issuance failed: {e}"))
                }
            })?;

        Ok(RenewedAccess {
            access_token,
            access_payload,
        })
    }
}

impl std::fmt::Debug for SessionRefreshProtocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionRefreshProtocol")
            .field("authority", &self.authority)
            .finish_non_exhaustive()
    }
}

/// Session-level gates, in their fixed order.
///
/// `payload` must already have been authenticated from `presented`.
pub fn check_session(
    session: &Session,
    payload: &Payload,
    presented: &str,
    now: Timestamp,
) -> Result<(), AuthError> {
    if session.is_blocked {
        return Err(AuthError::SessionBlocked);
    }
    if session.subject != payload.subject {
        return Err(AuthError::SubjectMismatch);
    }
    let same_token: bool = session
        .refresh_token
        .as_bytes()
        .ct_eq(presented.as_bytes())
        .into();
    if !same_token {
        return Err(AuthError::SessionTokenMismatch);
    }
    if now > session.expires_at {
        return Err(AuthError::SessionExpired);
    }
    Ok(())
}
