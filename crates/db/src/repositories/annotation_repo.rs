//! Repository for the `annotations` table.

use sqlx::PgPool;

use annotext_core::types::{DbId, Timestamp};

use crate::models::annotation::AnnotationRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, row_index, content, validated_at, created_at";

/// Provides point and aggregate operations on annotation rows.
///
/// Row creation happens exclusively through
/// [`ProjectRepo::create_with_rows`](crate::repositories::ProjectRepo::create_with_rows);
/// the index set of a project is never grown or shrunk here.
pub struct AnnotationRepo;

impl AnnotationRepo {
    /// List all annotation rows of a project ordered by ascending row index.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<AnnotationRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM annotations WHERE project_id = $1 ORDER BY row_index ASC"
        );
        sqlx::query_as::<_, AnnotationRow>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Find a single annotation row by ID, scoped to its project.
    pub async fn find_by_id_and_project(
        pool: &PgPool,
        id: DbId,
        project_id: DbId,
    ) -> Result<Option<AnnotationRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM annotations WHERE id = $1 AND project_id = $2");
        sqlx::query_as::<_, AnnotationRow>(&query)
            .bind(id)
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }

    /// Set a row's annotation content and validation timestamp.
    ///
    /// Last write wins; rows are never un-annotated. Returns the updated row,
    /// or `None` if no row with the given `id` exists in the project.
    pub async fn set_content(
        pool: &PgPool,
        id: DbId,
        project_id: DbId,
        content: &str,
        validated_at: Timestamp,
    ) -> Result<Option<AnnotationRow>, sqlx::Error> {
        let query = format!(
            "UPDATE annotations SET content = $3, validated_at = $4
             WHERE id = $1 AND project_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AnnotationRow>(&query)
            .bind(id)
            .bind(project_id)
            .bind(content)
            .bind(validated_at)
            .fetch_optional(pool)
            .await
    }

    /// Count all annotation rows of a project.
    pub async fn count_total(pool: &PgPool, project_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM annotations WHERE project_id = $1")
            .bind(project_id)
            .fetch_one(pool)
            .await
    }

    /// Count the annotated rows (non-null content) of a project.
    pub async fn count_annotated(pool: &PgPool, project_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM annotations WHERE project_id = $1 AND content IS NOT NULL",
        )
        .bind(project_id)
        .fetch_one(pool)
        .await
    }
}
