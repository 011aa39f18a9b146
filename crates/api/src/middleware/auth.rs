//! Bearer-token authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use bank_auth::guard::AUTHORIZATION_KEY;
use bank_auth::{AuthError, CredentialSource, Principal};

use crate::error::AppError;
use crate::state::AppState;

/// HTTP headers as a credential source. Only the first `Authorization`
/// value is considered.
pub struct HeaderCredentials<'a>(pub &'a HeaderMap);

impl CredentialSource for HeaderCredentials<'_> {
    fn authorization(&self) -> Result<Option<&str>, AuthError> {
        match self.0.get(AUTHORIZATION_KEY) {
            None => Ok(None),
            Some(value) => value
                .to_str()
                .map(Some)
                .map_err(|_| AuthError::MalformedHeader),
        }
    }
}

/// Authenticated principal extracted from the `Authorization` header.
///
/// Use this as an extractor parameter in any handler that requires
/// authentication; the request is rejected with 401 before the handler runs
/// otherwise.
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(username = %user.username(), "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser(pub Principal);

impl AuthUser {
    pub fn username(&self) -> &str {
        &self.0.subject
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let principal = state
            .guard
            .authorize(&HeaderCredentials(&parts.headers))
            .map_err(|e| {
                tracing::debug!(reason = e.error_code(), "Rejected bearer credential");
                AppError::Auth(e)
            })?;

        Ok(AuthUser(principal))
    }
}
