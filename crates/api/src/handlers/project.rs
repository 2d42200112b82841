//! Handlers for project creation, detail, and deletion.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use serde::Serialize;

use annotext_core::error::CoreError;
use annotext_core::types::{DbId, Timestamp};
use annotext_core::{categories, encoding, project, source, stats};
use annotext_db::models::project::CreateProject;
use annotext_db::repositories::{AnnotationRepo, ProjectRepo};

use crate::error::{AppError, AppResult};
use crate::files;
use crate::lifecycle;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Response body for `POST /annotations/create`.
#[derive(Debug, Serialize)]
pub struct ProjectCreated {
    pub project_id: DbId,
}

/// One annotation row in the project detail view.
#[derive(Debug, Serialize)]
pub struct AnnotationRowView {
    pub id: DbId,
    pub row_index: i32,
    pub content: Option<String>,
    pub date: Option<Timestamp>,
}

/// Response body for `GET /annotations/{project_id}`.
#[derive(Debug, Serialize)]
pub struct ProjectDetail {
    pub id: DbId,
    pub name: String,
    pub due_date: NaiveDate,
    pub notes: Option<String>,
    pub guidelines_file_path: Option<String>,
    pub categories: Vec<String>,
    pub completion: f64,
    pub status: String,
    pub mean_annotations: Option<i32>,
    pub rows: Vec<AnnotationRowView>,
}

/// Collected multipart fields of the creation form.
#[derive(Default)]
struct CreateForm {
    name: Option<String>,
    due_date: Option<String>,
    categories: Option<String>,
    notes: Option<String>,
    annotation_file: Option<(String, Vec<u8>)>,
    guidelines_file: Option<(String, Vec<u8>)>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/annotations/create
///
/// Create a project from the uploaded CSV: persist the files, decode the
/// CSV with encoding detection, and materialize one annotation row per data
/// row (indices 1..=N in file order). The project record and its full row
/// set are written in a single transaction.
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<ProjectCreated>)> {
    let form = read_create_form(multipart).await?;

    let name = form
        .name
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("Missing required 'name' field".into()))?;
    let due_date_raw = form
        .due_date
        .ok_or_else(|| AppError::BadRequest("Missing required 'due_date' field".into()))?;
    let (file_name, file_bytes) = form
        .annotation_file
        .ok_or_else(|| AppError::BadRequest("Missing required 'annotation_file' field".into()))?;

    // Persist uploads first; a write failure aborts the whole operation.
    let annotation_file_path =
        files::save_upload(&state.config.upload_dir, &file_name, &file_bytes).await?;
    let guidelines_file_path = match &form.guidelines_file {
        Some((name, bytes)) => {
            Some(files::save_upload(&state.config.upload_dir, name, bytes).await?)
        }
        None => None,
    };

    // Validate inputs before touching the project table. Files written
    // above may be orphaned by a failure from here on; see DESIGN.md.
    let due_date = project::parse_due_date(&due_date_raw)?;
    let category_list = categories::parse_categories(form.categories.as_deref().unwrap_or(""));

    // Decode and count data rows; the row index set is fixed here.
    let decoded = encoding::detect_bytes(&file_bytes)?;
    let row_count = source::data_row_count(&decoded.text)?;

    let input = CreateProject {
        user_id: user.user_id,
        name,
        due_date,
        notes: form.notes,
        categories: category_list,
        annotation_file_path: annotation_file_path.to_string_lossy().into_owned(),
        guidelines_file_path: guidelines_file_path.map(|p| p.to_string_lossy().into_owned()),
    };
    let created = ProjectRepo::create_with_rows(&state.pool, &input, row_count as i32).await?;

    tracing::info!(
        project_id = created.id,
        rows = row_count,
        encoding = decoded.encoding,
        "project ingested"
    );
    Ok((StatusCode::CREATED, Json(ProjectCreated { project_id: created.id })))
}

/// GET /api/v1/annotations/{project_id}
///
/// Project detail: metadata, completion, status, mean annotations, and
/// every annotation row. This is a side-effecting read: observing 100%
/// completion latches the completed status, and the first completed read
/// computes the mean-annotations snapshot.
pub async fn get_detail(
    State(state): State<AppState>,
    user: AuthUser,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<ProjectDetail>> {
    let found = ProjectRepo::find_by_id_and_owner(&state.pool, project_id, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }))?;

    let rows = AnnotationRepo::list_by_project(&state.pool, found.id).await?;
    let annotated = rows.iter().filter(|r| r.content.is_some()).count() as i64;
    let completion = stats::completion_percentage(annotated, rows.len() as i64);

    let status = lifecycle::refresh_status(&state.pool, &found, completion).await?;
    let mean_annotations =
        lifecycle::ensure_mean_annotations(&state.pool, &found, &status, &rows).await?;

    let rows = rows
        .into_iter()
        .map(|r| AnnotationRowView {
            id: r.id,
            row_index: r.row_index,
            content: r.content,
            date: r.validated_at,
        })
        .collect();

    Ok(Json(ProjectDetail {
        id: found.id,
        name: found.name,
        due_date: found.due_date,
        notes: found.notes,
        guidelines_file_path: found.guidelines_file_path,
        categories: found.categories,
        completion,
        status,
        mean_annotations,
        rows,
    }))
}

/// DELETE /api/v1/dashboard/annotations/{project_id}
///
/// Remove the project's stored files, then the project itself (annotation
/// rows cascade). A file-removal failure aborts the delete.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(project_id): Path<DbId>,
) -> AppResult<StatusCode> {
    let found = ProjectRepo::find_by_id_and_owner(&state.pool, project_id, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }))?;

    files::remove_stored(&found.annotation_file_path).await?;
    if let Some(path) = &found.guidelines_file_path {
        files::remove_stored(path).await?;
    }

    ProjectRepo::delete(&state.pool, found.id, user.user_id).await?;
    tracing::info!(project_id = found.id, "project deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Drain the multipart form of `POST /annotations/create` into a [`CreateForm`].
async fn read_create_form(mut multipart: Multipart) -> AppResult<CreateForm> {
    let mut form = CreateForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "name" => form.name = Some(read_text(field).await?),
            "due_date" => form.due_date = Some(read_text(field).await?),
            "categories" => form.categories = Some(read_text(field).await?),
            "notes" => form.notes = Some(read_text(field).await?),
            "annotation_file" => {
                let filename = field.file_name().unwrap_or("annotations.csv").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                form.annotation_file = Some((filename, data.to_vec()));
            }
            "guidelines_file" => {
                let filename = field.file_name().unwrap_or("guidelines.pdf").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                form.guidelines_file = Some((filename, data.to_vec()));
            }
            _ => {} // ignore unknown fields
        }
    }

    Ok(form)
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> AppResult<String> {
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))
}
