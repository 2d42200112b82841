//! Handlers for the annotation workset and annotation submission.

use std::path::Path as FilePath;

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use annotext_core::error::CoreError;
use annotext_core::types::{DbId, Timestamp};
use annotext_core::{encoding, source};
use annotext_db::repositories::{AnnotationRepo, ProjectRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// One row of the annotation workset: stored annotation state joined with
/// the source text for that row index.
#[derive(Debug, Serialize)]
pub struct WorksetRow {
    pub id: DbId,
    pub row_index: i32,
    pub content: Option<String>,
    pub date: Option<Timestamp>,
    /// Source text for this row, re-read from the original file.
    pub text: String,
}

/// Response body for `GET /annotations/{project_id}/annotate`.
#[derive(Debug, Serialize)]
pub struct Workset {
    pub annotations: Vec<WorksetRow>,
}

/// Request body for `POST /annotations/{project_id}/submit`.
#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    pub annotation_id: DbId,
    pub category: String,
    pub date: Timestamp,
}

/// Response body for `POST /annotations/{project_id}/submit`.
#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub annotation_id: DbId,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/annotations/{project_id}/annotate
///
/// The annotation workset: every row of the project joined with its source
/// text, ordered by ascending row index. The source text is never stored in
/// the database, so this re-reads and re-decodes the original file on every
/// call.
pub async fn workset(
    State(state): State<AppState>,
    user: AuthUser,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<Workset>> {
    let project = ProjectRepo::find_by_id_and_owner(&state.pool, project_id, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }))?;

    // Re-decode the stored source file off the async runtime.
    let path = project.annotation_file_path.clone();
    let decoded = tokio::task::spawn_blocking(move || encoding::detect_file(FilePath::new(&path)))
        .await
        .map_err(|e| AppError::InternalError(format!("decode task failed: {e}")))??;

    let text_by_row = source::text_column_by_row(&decoded.text)?;

    let rows = AnnotationRepo::list_by_project(&state.pool, project.id).await?;
    let annotations = rows
        .into_iter()
        .map(|r| {
            // A missing index would mean the file changed after ingestion;
            // tolerated as an empty text, never a crash.
            let text = text_by_row
                .get(&(r.row_index as usize))
                .cloned()
                .unwrap_or_default();
            WorksetRow {
                id: r.id,
                row_index: r.row_index,
                content: r.content,
                date: r.validated_at,
                text,
            }
        })
        .collect();

    Ok(Json(Workset { annotations }))
}

/// POST /api/v1/annotations/{project_id}/submit
///
/// Record one row's annotation: set the chosen category and validation
/// timestamp. Last write wins; rows are never un-annotated.
pub async fn submit(
    State(state): State<AppState>,
    user: AuthUser,
    Path(project_id): Path<DbId>,
    Json(input): Json<SubmitRequest>,
) -> AppResult<Json<SubmitResponse>> {
    let project = ProjectRepo::find_by_id_and_owner(&state.pool, project_id, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }))?;

    let updated =
        AnnotationRepo::set_content(&state.pool, input.annotation_id, project.id, &input.category, input.date)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Annotation",
                id: input.annotation_id,
            }))?;

    Ok(Json(SubmitResponse {
        annotation_id: updated.id,
    }))
}
