//! Route definitions for the `/annotations` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{annotation, project};
use crate::state::AppState;

/// Routes mounted at `/annotations`. All require authentication.
///
/// ```text
/// POST /create                     -> create (multipart project ingestion)
/// GET  /{project_id}               -> get_detail
/// GET  /{project_id}/annotate      -> workset
/// POST /{project_id}/submit        -> submit
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create", post(project::create))
        .route("/{project_id}", get(project::get_detail))
        .route("/{project_id}/annotate", get(annotation::workset))
        .route("/{project_id}/submit", post(annotation::submit))
}
