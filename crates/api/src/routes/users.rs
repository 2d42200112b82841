//! Route definitions for the `/users` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::user;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// POST /signup   -> signup
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/signup", post(user::signup))
}
