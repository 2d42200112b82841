//! Handlers for the `/dashboard` listing.

use axum::extract::State;
use axum::Json;
use chrono::NaiveDate;
use serde::Serialize;

use annotext_core::types::DbId;
use annotext_db::repositories::ProjectRepo;

use crate::error::AppResult;
use crate::lifecycle;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// One project entry in the dashboard listing.
#[derive(Debug, Serialize)]
pub struct DashboardProject {
    pub id: DbId,
    pub name: String,
    pub due_date: NaiveDate,
    pub status: String,
    pub completion: f64,
}

/// Response body for `GET /dashboard`.
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub has_projects: bool,
    pub projects: Vec<DashboardProject>,
}

/// GET /api/v1/dashboard
///
/// List the authenticated user's projects with their completion. This is a
/// side-effecting read: a project observed at 100% completion is latched to
/// `completed` here.
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DashboardResponse>> {
    let projects = ProjectRepo::list_by_owner(&state.pool, user.user_id).await?;
    if projects.is_empty() {
        return Ok(Json(DashboardResponse {
            has_projects: false,
            projects: Vec::new(),
        }));
    }

    let mut entries = Vec::with_capacity(projects.len());
    for project in projects {
        let completion = lifecycle::completion_for(&state.pool, project.id).await?;
        let status = lifecycle::refresh_status(&state.pool, &project, completion).await?;
        entries.push(DashboardProject {
            id: project.id,
            name: project.name,
            due_date: project.due_date,
            status,
            completion,
        });
    }

    Ok(Json(DashboardResponse {
        has_projects: true,
        projects: entries,
    }))
}
