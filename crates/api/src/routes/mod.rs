//! Route definitions.

pub mod annotations;
pub mod auth;
pub mod dashboard;
pub mod health;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /users/signup                                 signup (public)
/// /auth/login                                   login (public)
/// /auth/me                                      current user (requires auth)
///
/// /annotations/create                           create project (multipart)
/// /annotations/{project_id}                     project detail + rows
/// /annotations/{project_id}/annotate            annotation workset
/// /annotations/{project_id}/submit              submit one annotation
///
/// /dashboard                                    project listing
/// /dashboard/annotations/{project_id}           delete project
/// /dashboard/annotations/{project_id}/export    streamed CSV export
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Signup (public).
        .nest("/users", users::router())
        // Authentication routes (login, current user).
        .nest("/auth", auth::router())
        // Project creation, detail, workset, and submission.
        .nest("/annotations", annotations::router())
        // Dashboard listing, deletion, and export.
        .nest("/dashboard", dashboard::router())
}
