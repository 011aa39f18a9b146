//! Handlers for the `/accounts` resource. Every route requires auth and acts
//! only on the caller's own accounts.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use bank_db::models::account::Account;
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::service;
use crate::state::AppState;

/// Request body for `POST /accounts`.
#[derive(Debug, Deserialize)]
pub struct CreateAccountRequest {
    #[serde(default)]
    pub currency: String,
}

/// Query string for `GET /accounts`. Missing values fail validation.
#[derive(Debug, Deserialize)]
pub struct ListAccountsQuery {
    #[serde(default)]
    pub page_id: i64,
    #[serde(default)]
    pub page_size: i64,
}

/// POST /api/v1/accounts
pub async fn create_account(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<CreateAccountRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Account>>)> {
    let account = service::create_account(&state, &auth_user.0, &input.currency).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: account })))
}

/// GET /api/v1/accounts/{id}
pub async fn get_account(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<i64>,
) -> AppResult<Json<DataResponse<Account>>> {
    let account = service::get_account(&state, &auth_user.0, id).await?;
    Ok(Json(DataResponse { data: account }))
}

/// GET /api/v1/accounts?page_id=1&page_size=5
pub async fn list_accounts(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(query): Query<ListAccountsQuery>,
) -> AppResult<Json<DataResponse<Vec<Account>>>> {
    let accounts =
        service::list_accounts(&state, &auth_user.0, query.page_id, query.page_size).await?;
    Ok(Json(DataResponse { data: accounts }))
}
