use axum::routing::post;
use axum::Router;

use crate::handlers::token;
use crate::state::AppState;

/// Routes mounted at `/tokens`.
pub fn router() -> Router<AppState> {
    Router::new().route("/renew_access", post(token::renew_access))
}
