//! Handler for the streamed CSV export of an annotated project.

use std::collections::HashMap;
use std::path::Path as FilePath;

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::Response;
use chrono::SecondsFormat;

use annotext_core::error::CoreError;
use annotext_core::source::CsvExport;
use annotext_core::types::DbId;
use annotext_core::encoding;
use annotext_db::repositories::{AnnotationRepo, ProjectRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/v1/dashboard/annotations/{project_id}/export
///
/// Re-emit the original CSV with `annotation` and `date` columns appended,
/// streamed one row per chunk. Memory stays bounded by a single row
/// regardless of file size, and a client disconnect simply drops the
/// iterator with the remaining rows unread.
pub async fn export_csv(
    State(state): State<AppState>,
    user: AuthUser,
    Path(project_id): Path<DbId>,
) -> AppResult<Response> {
    let project = ProjectRepo::find_by_id_and_owner(&state.pool, project_id, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }))?;

    // Annotation state keyed by row index; un-annotated rows are simply
    // absent and export as empty fields.
    let rows = AnnotationRepo::list_by_project(&state.pool, project.id).await?;
    let annotations: HashMap<usize, (String, String)> = rows
        .into_iter()
        .filter_map(|r| match (r.content, r.validated_at) {
            (Some(content), Some(date)) => Some((
                r.row_index as usize,
                (content, date.to_rfc3339_opts(SecondsFormat::Secs, true)),
            )),
            _ => None,
        })
        .collect();

    // Re-decode the stored source file off the async runtime.
    let path = project.annotation_file_path.clone();
    let decoded = tokio::task::spawn_blocking(move || encoding::detect_file(FilePath::new(&path)))
        .await
        .map_err(|e| AppError::InternalError(format!("decode task failed: {e}")))??;

    let export = CsvExport::new(&decoded.text, annotations)?;
    let stream = futures::stream::iter(
        export.map(|chunk| chunk.map_err(|e| std::io::Error::other(e.to_string()))),
    );

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/csv; charset=utf-8")
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=project_{}_export.csv", project.id),
        )
        .body(Body::from_stream(stream))
        .map_err(|e| AppError::InternalError(e.to_string()))
}
