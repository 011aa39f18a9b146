//! Route definitions for the `/users` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::user;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// POST /        -> create_user
/// POST /login   -> login_user
/// GET  /me      -> me (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(user::create_user))
        .route("/login", post(user::login_user))
        .route("/me", get(user::me))
}
