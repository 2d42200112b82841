//! Route definitions for the `/dashboard` resource.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::{dashboard, export, project};
use crate::state::AppState;

/// Routes mounted at `/dashboard`. All require authentication.
///
/// ```text
/// GET    /                                     -> list
/// DELETE /annotations/{project_id}             -> delete
/// GET    /annotations/{project_id}/export      -> export_csv
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard::list))
        .route("/annotations/{project_id}", delete(project::delete))
        .route(
            "/annotations/{project_id}/export",
            get(export::export_csv),
        )
}
