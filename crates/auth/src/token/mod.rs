//! Credential payloads and the schemes that seal them into opaque strings.
//!
//! - [`aead`] -- AES-256-GCM encrypted tokens (the default scheme).
//! - [`jwt`] -- HS256 signed tokens.
//!
//! Callers depend only on [`TokenMaker`], so schemes can be swapped without
//! touching the authority, the refresh protocol or the guards.

pub mod aead;
pub mod jwt;
mod payload;

use chrono::Duration;

pub use aead::AeadTokenMaker;
pub use jwt::JwtTokenMaker;
pub use payload::Payload;

use crate::AuthError;

/// Issue and verify credential tokens.
///
/// Implementations hold only immutable key material and are safe to share
/// across every in-flight request.
pub trait TokenMaker: Send + Sync {
    /// Build a fresh payload for `subject` valid for `ttl` and seal it.
    fn issue(&self, subject: &str, ttl: Duration) -> Result<(String, Payload), AuthError>;

    /// Authenticate `token` and return its payload.
    ///
    /// Fails with [`AuthError::InvalidCredential`] for any decoding or
    /// authentication failure, and with [`AuthError::ExpiredCredential`] only
    /// once the token has authenticated.
    fn verify(&self, token: &str) -> Result<Payload, AuthError>;
}
