//! Handlers for the `/users` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use bank_core::types::{SessionId, Timestamp};
use bank_db::models::user::UserResponse;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::client::ClientInfo;
use crate::response::DataResponse;
use crate::service::{self, NewUser};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /users`. Missing fields fail validation.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Request body for `POST /users/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub session_id: SessionId,
    pub access_token: String,
    pub access_token_expires_at: Timestamp,
    pub refresh_token: String,
    pub refresh_token_expires_at: Timestamp,
    pub user: UserResponse,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/users
pub async fn create_user(
    State(state): State<AppState>,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<UserResponse>>)> {
    let user = service::create_user(
        &state,
        NewUser {
            username: input.username,
            full_name: input.full_name,
            email: input.email,
            password: input.password,
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse { data: user.into() }),
    ))
}

/// POST /api/v1/users/login
///
/// Authenticate with username + password and open a session.
pub async fn login_user(
    State(state): State<AppState>,
    ClientInfo(client): ClientInfo,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let outcome = service::login_user(&state, &input.username, &input.password, client).await?;
    let session = outcome.session;

    Ok(Json(LoginResponse {
        session_id: session.session_id,
        access_token: session.access_token,
        access_token_expires_at: session.access_payload.expires_at,
        refresh_token: session.refresh_token,
        refresh_token_expires_at: session.refresh_payload.expires_at,
        user: outcome.user.into(),
    }))
}

/// GET /api/v1/users/me (requires auth)
pub async fn me(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let user = service::current_user(&state, &auth_user.0).await?;
    Ok(Json(DataResponse { data: user.into() }))
}
