//! Completion and lifecycle engine.
//!
//! Completion is recomputed from the row store on every listing/detail read.
//! Two derived values piggyback on those reads as *side-effecting reads*:
//!
//! - the pending -> completed status transition, latched the first time a
//!   read observes 100% completion;
//! - the mean-annotations-per-day snapshot, computed at most once after
//!   completion (guarded by the column still being NULL) and then frozen.
//!
//! Both writes are idempotent under concurrent duplicate triggering: the
//! status update is guarded on the current status, the snapshot on the NULL
//! check, so a double trigger is at most redundant.

use chrono::Utc;

use annotext_core::project::ProjectStatus;
use annotext_core::stats;
use annotext_core::types::DbId;
use annotext_db::models::annotation::AnnotationRow;
use annotext_db::models::project::Project;
use annotext_db::repositories::{AnnotationRepo, ProjectRepo};
use annotext_db::DbPool;

use crate::error::AppResult;

/// Compute a project's completion percentage from row-store aggregates.
pub async fn completion_for(pool: &DbPool, project_id: DbId) -> AppResult<f64> {
    let total = AnnotationRepo::count_total(pool, project_id).await?;
    let annotated = AnnotationRepo::count_annotated(pool, project_id).await?;
    Ok(stats::completion_percentage(annotated, total))
}

/// Latch the pending -> completed transition when completion reaches 100.
///
/// Side-effecting read: called from listing and detail paths. Returns the
/// status the caller should report. No other transition exists; completed
/// projects never revert.
pub async fn refresh_status(
    pool: &DbPool,
    project: &Project,
    completion: f64,
) -> AppResult<String> {
    if completion >= 100.0 && project.status == ProjectStatus::Pending.as_str() {
        ProjectRepo::set_status(
            pool,
            project.id,
            ProjectStatus::Pending.as_str(),
            ProjectStatus::Completed.as_str(),
        )
        .await?;
        tracing::info!(project_id = project.id, "project completed");
        return Ok(ProjectStatus::Completed.as_str().to_string());
    }
    Ok(project.status.clone())
}

/// Compute and persist the mean-annotations-per-day snapshot, at most once.
///
/// Invoked from the detail read path once a project is completed and the
/// snapshot is still null. The value is a historical snapshot of annotation
/// throughput, never recomputed afterwards. Returns the value the caller
/// should report.
pub async fn ensure_mean_annotations(
    pool: &DbPool,
    project: &Project,
    status: &str,
    rows: &[AnnotationRow],
) -> AppResult<Option<i32>> {
    if status != ProjectStatus::Completed.as_str() || project.mean_annotations.is_some() {
        return Ok(project.mean_annotations);
    }

    let annotated = rows.iter().filter(|r| r.content.is_some()).count() as i64;
    let first = rows.iter().filter_map(|r| r.validated_at).min();
    let mean = stats::mean_annotations_per_day(annotated, first, Utc::now());

    if ProjectRepo::set_mean_annotations(pool, project.id, mean).await? {
        tracing::info!(project_id = project.id, mean, "mean annotations computed");
        return Ok(Some(mean));
    }

    // A concurrent read won the latch; report its snapshot, not ours.
    let fresh = ProjectRepo::find_by_id_and_owner(pool, project.id, project.user_id).await?;
    Ok(fresh.and_then(|p| p.mean_annotations))
}
