//! Repository for the `projects` table.
//!
//! All point reads and listings are owner-scoped: a project is only visible
//! to queries carrying its owning `user_id`.

use sqlx::PgPool;

use annotext_core::types::DbId;

use crate::models::project::{CreateProject, Project};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, name, due_date, notes, categories, \
                        annotation_file_path, guidelines_file_path, status, \
                        mean_annotations, created_at, updated_at";

/// Provides CRUD operations for projects and their annotation row sets.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a project and its full annotation row set in one transaction.
    ///
    /// Creates one annotation row per source data row, with `row_index`
    /// running 1..=`row_count` in file order and no content yet. Either the
    /// project and all of its rows are persisted, or nothing is.
    pub async fn create_with_rows(
        pool: &PgPool,
        input: &CreateProject,
        row_count: i32,
    ) -> Result<Project, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO projects
                (user_id, name, due_date, notes, categories,
                 annotation_file_path, guidelines_file_path)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(input.user_id)
            .bind(&input.name)
            .bind(input.due_date)
            .bind(&input.notes)
            .bind(&input.categories)
            .bind(&input.annotation_file_path)
            .bind(&input.guidelines_file_path)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query(
            "INSERT INTO annotations (project_id, row_index)
             SELECT $1, idx FROM generate_series(1, $2) AS idx",
        )
        .bind(project.id)
        .bind(row_count)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(project)
    }

    /// Find a project by ID, scoped to its owner.
    ///
    /// Returns `None` both when the project does not exist and when it is
    /// owned by someone else; callers cannot distinguish the two.
    pub async fn find_by_id_and_owner(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's projects ordered by most recently created first.
    pub async fn list_by_owner(pool: &PgPool, user_id: DbId) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects WHERE user_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Set a project's lifecycle status.
    ///
    /// Guarded on the current status so concurrent duplicate triggers of the
    /// pending -> completed transition apply at most once.
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        from: &str,
        to: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE projects SET status = $3, updated_at = NOW()
             WHERE id = $1 AND status = $2",
        )
        .bind(id)
        .bind(from)
        .bind(to)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Persist the mean-annotations-per-day snapshot.
    ///
    /// Guarded on the column still being NULL: the value is computed at most
    /// once per project and never overwritten.
    pub async fn set_mean_annotations(
        pool: &PgPool,
        id: DbId,
        mean: i32,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE projects SET mean_annotations = $2, updated_at = NOW()
             WHERE id = $1 AND mean_annotations IS NULL",
        )
        .bind(id)
        .bind(mean)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a project by ID, scoped to its owner. Annotation rows cascade.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
