//! AES-256-GCM sealed tokens.
//!
//! Wire format: `v1.local.` followed by base64url (no padding) of
//! `nonce (12 bytes) || ciphertext || tag (16 bytes)`. The header is bound as
//! associated data, so a token cannot be replayed under another header.

use aes_gcm::aead::{Aead, AeadCore, KeyInit, OsRng, Payload as AeadPayload};
use aes_gcm::{Aes256Gcm, Nonce};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::Duration;

use super::{Payload, TokenMaker};
use crate::AuthError;

/// Required symmetric key length in bytes (256 bits).
pub const KEY_SIZE: usize = 32;

const TOKEN_HEADER: &str = "v1.local.";
const NONCE_SIZE: usize = 12;
const TAG_SIZE: usize = 16;

/// Token maker that encrypts payloads under a pre-shared symmetric key.
///
/// Holders without the key learn nothing from a token beyond its length.
#[derive(Clone)]
pub struct AeadTokenMaker {
    cipher: Aes256Gcm,
}

impl AeadTokenMaker {
    /// Build a maker from raw key bytes.
    ///
    /// # Errors
    /// [`AuthError::KeyConfiguration`] unless the key is exactly [`KEY_SIZE`]
    /// bytes.
    pub fn new(symmetric_key: impl AsRef<[u8]>) -> Result<Self, AuthError> {
        let key = symmetric_key.as_ref();
        if key.len() != KEY_SIZE {
            return Err(AuthError::KeyConfiguration(format!(
                "symmetric key must be exactly {KEY_SIZE} bytes, got {}",
                key.len()
            )));
        }
        let cipher = Aes256Gcm::new_from_slice(key)
            .map_err(|e| AuthError::KeyConfiguration(e.to_string()))?;
        Ok(Self { cipher })
    }
}

impl TokenMaker for AeadTokenMaker {
    fn issue(&self, subject: &str, ttl: Duration) -> Result<(String, Payload), AuthError> {
        let payload = Payload::new(subject, ttl);
        let plaintext = serde_json::to_vec(&payload)
            .map_err(|e| AuthError::Storage(format!("credential encoding failed: {e}")))?;

        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let ciphertext = self
            .cipher
            .encrypt(
                &nonce,
                AeadPayload {
                    msg: &plaintext,
                    aad: TOKEN_HEADER.as_bytes(),
                },
            )
            .map_err(|_| AuthError::Storage("credential encryption failed".into()))?;

        let mut sealed = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
        sealed.extend_from_slice(&nonce);
        sealed.extend_from_slice(&ciphertext);

        Ok((
            format!("{TOKEN_HEADER}{}", URL_SAFE_NO_PAD.encode(sealed)),
            payload,
        ))
    }

    fn verify(&self, token: &str) -> Result<Payload, AuthError> {
        let body = token
            .strip_prefix(TOKEN_HEADER)
            .ok_or(AuthError::InvalidCredential)?;

        let sealed = URL_SAFE_NO_PAD
            .decode(body)
            .map_err(|_| AuthError::InvalidCredential)?;
        if sealed.len() < NONCE_SIZE + TAG_SIZE {
            return Err(AuthError::InvalidCredential);
        }

        let (nonce, ciphertext) = sealed.split_at(NONCE_SIZE);
        let plaintext = self
            .cipher
            .decrypt(
                Nonce::from_slice(nonce),
                AeadPayload {
                    msg: ciphertext,
                    aad: TOKEN_HEADER.as_bytes(),
                },
            )
            .map_err(|_| AuthError::InvalidCredential)?;

        let payload: Payload =
            serde_json::from_slice(&plaintext).map_err(|_| AuthError::InvalidCredential)?;
        payload.valid()?;
        Ok(payload)
    }
}

impl std::fmt::Debug for AeadTokenMaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AeadTokenMaker").finish_non_exhaustive()
    }
}
