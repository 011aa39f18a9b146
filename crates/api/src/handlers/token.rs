//! Handlers for the `/tokens` resource.

use axum::extract::State;
use axum::Json;
use bank_core::types::Timestamp;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::service;
use crate::state::AppState;

/// Request body for `POST /tokens/renew_access`.
///
/// A missing field deserializes to empty and is rejected with 400.
#[derive(Debug, Deserialize)]
pub struct RenewAccessRequest {
    #[serde(default)]
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
pub struct RenewAccessResponse {
    pub access_token: String,
    pub access_token_expires_at: Timestamp,
}

/// POST /api/v1/tokens/renew_access
///
/// Exchange a refresh token bound to a live session for a new access token.
pub async fn renew_access(
    State(state): State<AppState>,
    Json(input): Json<RenewAccessRequest>,
) -> AppResult<Json<RenewAccessResponse>> {
    let renewed = service::renew_access(&state, &input.refresh_token).await?;

    Ok(Json(RenewAccessResponse {
        access_token_expires_at: renewed.access_token_expires_at(),
        access_token: renewed.access_token,
    }))
}
