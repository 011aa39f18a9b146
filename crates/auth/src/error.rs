//! Auth errors

use thiserror::Error;

/// Every way credential issuance, verification or renewal can fail.
///
/// Cryptographic failures are deliberately coarse: tampering, a wrong key and
/// malformed input all surface as [`AuthError::InvalidCredential`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Token configuration rejected at construction time.
    #[error("invalid token configuration: {0}")]
    KeyConfiguration(String),

    /// No credential was presented.
    #[error("missing authorization credential")]
    MissingCredential,

    /// Credential present but not `<scheme> <token>`.
    #[error("invalid authorization format")]
    MalformedHeader,

    /// Scheme other than bearer.
    #[error("unsupported authorization type")]
    UnsupportedScheme,

    /// Token failed decoding or authentication.
    #[error("invalid token")]
    InvalidCredential,

    /// Token authenticated but is past its embedded expiry.
    #[error("token has expired")]
    ExpiredCredential,

    #[error("session not found")]
    SessionNotFound,

    #[error("session is blocked")]
    SessionBlocked,

    /// Refresh payload subject differs from the session's subject.
    #[error("incorrect session user")]
    SubjectMismatch,

    /// Presented refresh token is not the one bound to the session.
    #[error("mismatched session token")]
    SessionTokenMismatch,

    #[error("expired session")]
    SessionExpired,

    /// Infrastructure failure in the session store or in credential issuance.
    #[error("storage failure: {0}")]
    Storage(String),
}

impl AuthError {
    /// Only infrastructure faults are worth a caller-side retry.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Storage(_))
    }

    /// Failures raised while parsing the credential, before any crypto runs.
    pub fn is_credential_format(&self) -> bool {
        matches!(
            self,
            Self::MissingCredential | Self::MalformedHeader | Self::UnsupportedScheme
        )
    }

    /// The token itself was rejected: forged, malformed, wrong key or expired.
    /// Callers must not tell these apart in anything a client can see.
    pub fn is_verification_failure(&self) -> bool {
        matches!(self, Self::InvalidCredential | Self::ExpiredCredential)
    }

    /// Session-level rejections, distinguished internally for audit logging.
    pub fn is_session_rejection(&self) -> bool {
        matches!(
            self,
            Self::SessionNotFound
                | Self::SessionBlocked
                | Self::SubjectMismatch
                | Self::SessionTokenMismatch
                | Self::SessionExpired
        )
    }

    /// Stable error code for logs and API bodies.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::KeyConfiguration(_) => "KEY_CONFIGURATION",
            Self::MissingCredential => "MISSING_CREDENTIAL",
            Self::MalformedHeader => "MALFORMED_HEADER",
            Self::UnsupportedScheme => "UNSUPPORTED_SCHEME",
            Self::InvalidCredential => "INVALID_CREDENTIAL",
            Self::ExpiredCredential => "EXPIRED_CREDENTIAL",
            Self::SessionNotFound => "SESSION_NOT_FOUND",
            Self::SessionBlocked => "SESSION_BLOCKED",
            Self::SubjectMismatch => "SUBJECT_MISMATCH",
            Self::SessionTokenMismatch => "SESSION_TOKEN_MISMATCH",
            Self::SessionExpired => "SESSION_EXPIRED",
            Self::Storage(_) => "STORAGE_ERROR",
        }
    }
}
