use chrono::Duration;

use crate::token::aead::KEY_SIZE;
use crate::AuthError;

/// Default access token lifetime in minutes.
const DEFAULT_ACCESS_EXPIRY_MINS: i64 = 15;
/// Default refresh token lifetime in days.
const DEFAULT_REFRESH_EXPIRY_DAYS: i64 = 1;
/// Longest accepted access token lifetime: one day.
pub const MAX_ACCESS_EXPIRY_MINS: i64 = 24 * 60;
/// Longest accepted refresh token / session lifetime: one year.
pub const MAX_REFRESH_EXPIRY_DAYS: i64 = 365;

/// Token key material and lifetimes, fixed for the life of the process.
#[derive(Clone)]
pub struct TokenConfig {
    /// Pre-shared 256-bit symmetric key.
    pub symmetric_key: String,
    /// Access token lifetime in minutes (default: 15).
    pub access_token_expiry_mins: i64,
    /// Refresh token / session lifetime in days (default: 1).
    pub refresh_token_expiry_days: i64,
}

impl TokenConfig {
    /// Load token configuration from environment variables.
    ///
    /// | Env Var                     | Required | Default |
    /// |-----------------------------|----------|---------|
    /// | `TOKEN_SYMMETRIC_KEY`       | **yes**  | --      |
    /// | `ACCESS_TOKEN_EXPIRY_MINS`  | no       | `15`    |
    /// | `REFRESH_TOKEN_EXPIRY_DAYS` | no       | `1`     |
    ///
    /// # Errors
    ///
    /// [`AuthError::KeyConfiguration`] if the key is missing or not exactly
    /// 32 bytes, or if a lifetime is not a positive integer within its
    /// maximum.
    pub fn from_env() -> Result<Self, AuthError> {
        let symmetric_key = std::env::var("TOKEN_SYMMETRIC_KEY")
            .map_err(|_| AuthError::KeyConfiguration("TOKEN_SYMMETRIC_KEY must be set".into()))?;

        let config = Self {
            symmetric_key,
            access_token_expiry_mins: env_lifetime(
                "ACCESS_TOKEN_EXPIRY_MINS",
                DEFAULT_ACCESS_EXPIRY_MINS,
            )?,
            refresh_token_expiry_days: env_lifetime(
                "REFRESH_TOKEN_EXPIRY_DAYS",
                DEFAULT_REFRESH_EXPIRY_DAYS,
            )?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the key length and both lifetimes without building a cipher.
    pub fn validate(&self) -> Result<(), AuthError> {
        if self.symmetric_key.len() != KEY_SIZE {
            return Err(AuthError::KeyConfiguration(format!(
                "TOKEN_SYMMETRIC_KEY must be exactly {KEY_SIZE} bytes"
            )));
        }
        self.access_ttl()?;
        self.refresh_ttl()?;
        Ok(())
    }

    pub fn access_ttl(&self) -> Result<Duration, AuthError> {
        lifetime(
            "ACCESS_TOKEN_EXPIRY_MINS",
            self.access_token_expiry_mins,
            MAX_ACCESS_EXPIRY_MINS,
            Duration::try_minutes,
        )
    }

    pub fn refresh_ttl(&self) -> Result<Duration, AuthError> {
        lifetime(
            "REFRESH_TOKEN_EXPIRY_DAYS",
            self.refresh_token_expiry_days,
            MAX_REFRESH_EXPIRY_DAYS,
            Duration::try_days,
        )
    }
}

impl std::fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenConfig")
            .field("access_token_expiry_mins", &self.access_token_expiry_mins)
            .field("refresh_token_expiry_days", &self.refresh_token_expiry_days)
            .finish_non_exhaustive()
    }
}

fn lifetime(
    name: &str,
    value: i64,
    max: i64,
    to_duration: fn(i64) -> Option<Duration>,
) -> Result<Duration, AuthError> {
    if !(1..=max).contains(&value) {
        return Err(AuthError::KeyConfiguration(format!(
            "{name} must be between 1 and {max}"
        )));
    }
    to_duration(value)
        .ok_or_else(|| AuthError::KeyConfiguration(format!("{name} is out of range")))
}

/// Range checks happen in [`TokenConfig::validate`].
fn env_lifetime(name: &str, default: i64) -> Result<i64, AuthError> {
    let Ok(raw) = std::env::var(name) else {
        return Ok(default);
    };
    raw.trim()
        .parse::<i64>()
        .map_err(|_| AuthError::KeyConfiguration(format!("{name} must be an integer")))
}
