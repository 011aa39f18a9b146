//! [`AppError`] to gRPC status mapping.

use bank_auth::AuthError;
use bank_core::error::CoreError;
use tonic::Status;

use crate::error::{AppError, UNAUTHORIZED_MESSAGE};

impl From<AppError> for Status {
    fn from(err: AppError) -> Self {
        match err {
            AppError::Core(core) => match core {
                CoreError::NotFound { .. } => Status::not_found(core.to_string()),
                CoreError::Validation(msg) => Status::invalid_argument(msg),
                CoreError::Conflict(msg) => Status::already_exists(msg),
                CoreError::Unauthorized(msg) => Status::unauthenticated(msg),
                CoreError::Forbidden(msg) => Status::permission_denied(msg),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    Status::internal("internal error")
                }
            },
            AppError::Auth(auth) => match auth {
                AuthError::SessionNotFound => Status::not_found("session not found"),
                e if e.is_session_rejection() || e.is_verification_failure() => {
                    Status::unauthenticated(UNAUTHORIZED_MESSAGE)
                }
                AuthError::Storage(msg) | AuthError::KeyConfiguration(msg) => {
                    tracing::error!(error = %msg, "Internal auth error");
                    Status::internal("internal error")
                }
                e => Status::unauthenticated(e.to_string()),
            },
            AppError::BadRequest(msg) => Status::invalid_argument(msg),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                Status::internal("internal error")
            }
        }
    }
}
