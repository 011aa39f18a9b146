pub mod account;
pub mod health;
pub mod token;
pub mod user;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /users                  create (public)
/// /users/login           login (public)
/// /users/me              current user (requires auth)
///
/// /tokens/renew_access   renew access token (public, refresh token in body)
///
/// /accounts              create, list own (requires auth)
/// /accounts/{id}         get own account (requires auth)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/users", user::router())
        .nest("/tokens", token::router())
        .nest("/accounts", account::router())
}
