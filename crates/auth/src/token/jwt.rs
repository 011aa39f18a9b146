//! HS256 signed tokens.
//!
//! Signature-based alternative to [`super::AeadTokenMaker`]: claims are
//! readable by anyone holding the token but cannot be forged without the
//! secret. Timestamps are carried at second precision.

use chrono::{DateTime, Duration};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Payload, TokenMaker};
use crate::AuthError;

/// Minimum HMAC secret length in bytes.
pub const MIN_SECRET_SIZE: usize = 32;

/// JWT claims embedded in every token.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    jti: Uuid,
    sub: String,
    iat: i64,
    exp: i64,
}

impl Claims {
    fn into_payload(self) -> Result<Payload, AuthError> {
        let issued_at = DateTime::from_timestamp(self.iat, 0).ok_or(AuthError::InvalidCredential)?;
        let expires_at =
            DateTime::from_timestamp(self.exp, 0).ok_or(AuthError::InvalidCredential)?;
        Ok(Payload {
            id: self.jti,
            subject: self.sub,
            issued_at,
            expires_at,
        })
    }
}

pub struct JwtTokenMaker {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtTokenMaker {
    /// # Errors
    /// [`AuthError::KeyConfiguration`] if the secret is shorter than
    /// [`MIN_SECRET_SIZE`] bytes.
    pub fn new(secret: impl AsRef<[u8]>) -> Result<Self, AuthError> {
        let secret = secret.as_ref();
        if secret.len() < MIN_SECRET_SIZE {
            return Err(AuthError::KeyConfiguration(format!(
                "signing secret must be at least {MIN_SECRET_SIZE} bytes, got {}",
                secret.len()
            )));
        }

        // Expiry is checked against the decoded payload so an expired token
        // reports ExpiredCredential rather than a signature error.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        })
    }
}

impl TokenMaker for JwtTokenMaker {
    fn issue(&self, subject: &str, ttl: Duration) -> Result<(String, Payload), AuthError> {
        let payload = Payload::new(subject, ttl);
        let claims = Claims {
            jti: payload.id,
            sub: payload.subject.clone(),
            iat: payload.issued_at.timestamp(),
            exp: payload.expires_at.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Storage(format!("credential signing failed: {e}")))?;

        // Hand back exactly what verify() will reconstruct.
        let payload = claims.into_payload()?;
        Ok((token, payload))
    }

    fn verify(&self, token: &str) -> Result<Payload, AuthError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            tracing::debug!(error = %e, "JWT verification failed");
            AuthError::InvalidCredential
        })?;

        let payload = data.claims.into_payload()?;
        payload.valid()?;
        Ok(payload)
    }
}

impl std::fmt::Debug for JwtTokenMaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtTokenMaker").finish_non_exhaustive()
    }
}
