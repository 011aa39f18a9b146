//! Route definitions for the `/accounts` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::account;
use crate::state::AppState;

/// Routes mounted at `/accounts`, all requiring auth.
///
/// ```text
/// POST /       -> create_account
/// GET  /       -> list_accounts (?page_id=&page_size=)
/// GET  /{id}   -> get_account (owner only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(account::create_account).get(account::list_accounts))
        .route("/{id}", get(account::get_account))
}
