//! Transport-neutral failures of the user and account operations.
//!
//! HTTP and gRPC each map these onto their own status codes; credential and
//! session failures have their own type in `bank-auth`.

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// No `entity` row is keyed by `key` (a username or an account id).
    #[error("{entity} {key} does not exist")]
    NotFound { entity: &'static str, key: String },

    /// One or more request fields were rejected; the message lists them all.
    #[error("invalid request: {0}")]
    Validation(String),

    /// A uniqueness rule was violated, such as a taken username.
    #[error("{0}")]
    Conflict(String),

    /// The caller's identity could not be established or does not own the
    /// resource.
    #[error("not authorized: {0}")]
    Unauthorized(String),

    /// The caller is authenticated but may not act on another user's data.
    #[error("permission denied: {0}")]
    Forbidden(String),

    /// Infrastructure failure; the message is for logs only.
    #[error("internal failure: {0}")]
    Internal(String),
}

impl CoreError {
    pub fn not_found(entity: &'static str, key: impl ToString) -> Self {
        Self::NotFound {
            entity,
            key: key.to_string(),
        }
    }
}
