use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use bank_auth::AuthError;
use bank_core::error::CoreError;
use bank_db::DbError;
use serde_json::json;

/// Application-level error type for HTTP handlers and the gRPC service.
///
/// Implements [`IntoResponse`] to produce consistent JSON error responses;
/// the gRPC layer maps it to a `tonic::Status`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `bank_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Credential or session failure from `bank_auth`.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// The only thing a client learns about a rejected token or session.
pub const UNAUTHORIZED_MESSAGE: &str = "unauthorized";

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<DbError> for AppError {
    fn from(err: DbError) -> Self {
        AppError::Core(err.into())
    }
}

impl AppError {
    /// HTTP status, stable code and client-facing message.
    ///
    /// Token verification failures and session rejections share one generic
    /// body; the specific reason is logged where the rejection happened.
    pub fn classify(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Core(core) => match core {
                CoreError::NotFound { .. } => {
                    (StatusCode::NOT_FOUND, "NOT_FOUND", core.to_string())
                }
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    internal()
                }
            },

            AppError::Auth(auth) => match auth {
                AuthError::SessionNotFound => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    "Session not found".to_string(),
                ),
                e if e.is_session_rejection() || e.is_verification_failure() => (
                    StatusCode::UNAUTHORIZED,
                    "UNAUTHORIZED",
                    UNAUTHORIZED_MESSAGE.to_string(),
                ),
                AuthError::Storage(msg) => {
                    tracing::error!(error = %msg, "Session storage error");
                    internal()
                }
                AuthError::KeyConfiguration(msg) => {
                    tracing::error!(error = %msg, "Token configuration error");
                    internal()
                }
                e => (StatusCode::UNAUTHORIZED, e.error_code(), e.to_string()),
            },

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        }
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.classify();

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
