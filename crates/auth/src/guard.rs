//! Bearer credential extraction shared by every transport.
//!
//! Transports differ only in where the `authorization` value lives (an HTTP
//! header, gRPC metadata). Each implements [`CredentialSource`] over its own
//! request type and hands it to [`BearerGuard::authorize`], which owns the
//! parsing and verification rules.

use bank_core::types::Timestamp;
use uuid::Uuid;

use crate::{AuthError, CredentialAuthority};

/// Header / metadata key carrying the credential.
pub const AUTHORIZATION_KEY: &str = "authorization";

/// The only accepted scheme, compared case-insensitively.
pub const AUTHORIZATION_SCHEME_BEARER: &str = "bearer";

/// Where a transport finds the raw `authorization` value.
pub trait CredentialSource {
    /// The first `authorization` value, `Ok(None)` if absent.
    ///
    /// A value that cannot be read as text is
    /// [`AuthError::MalformedHeader`].
    fn authorization(&self) -> Result<Option<&str>, AuthError>;
}

/// Verified identity attached to a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    /// Authenticated username.
    pub subject: String,
    /// Id of the access token that proved it.
    pub token_id: Uuid,
    pub expires_at: Timestamp,
}

/// Split `<scheme> <token>` and return the token.
///
/// Fields are indexed by position only after the count is known to be two.
pub fn parse_authorization(value: &str) -> Result<&str, AuthError> {
    let fields: Vec<&str> = value.split_whitespace().collect();
    if fields.len() != 2 {
        return Err(AuthError::MalformedHeader);
    }

    let (scheme, token) = (fields[0], fields[1]);
    if !scheme.eq_ignore_ascii_case(AUTHORIZATION_SCHEME_BEARER) {
        return Err(AuthError::UnsupportedScheme);
    }
    Ok(token)
}

/// Stateless access-token guard.
#[derive(Debug, Clone)]
pub struct BearerGuard {
    authority: CredentialAuthority,
}

impl BearerGuard {
    pub fn new(authority: CredentialAuthority) -> Self {
        Self { authority }
    }

    /// Extract, parse and verify the credential carried by `source`.
    ///
    /// Format failures are reported before any cryptography runs.
    pub fn authorize<S>(&self, source: &S) -> Result<Principal, AuthError>
    where
        S: CredentialSource + ?Sized,
    {
        let value = source.authorization()?.ok_or(AuthError::MissingCredential)?;
        let token = parse_authorization(value)?;
        let payload = self.authority.verify(token)?;

        Ok(Principal {
            subject: payload.subject,
            token_id: payload.id,
            expires_at: payload.expires_at,
        })
    }
}
