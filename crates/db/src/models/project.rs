//! Project entity model and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use annotext_core::types::{DbId, Timestamp};

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    /// Owning user. Immutable after creation; every read filters on it.
    pub user_id: DbId,
    pub name: String,
    pub due_date: NaiveDate,
    pub notes: Option<String>,
    pub categories: Vec<String>,
    pub annotation_file_path: String,
    pub guidelines_file_path: Option<String>,
    /// `"pending"` or `"completed"`; see `annotext_core::project::ProjectStatus`.
    pub status: String,
    /// Mean annotations per day. Null until computed once after completion,
    /// then frozen.
    pub mean_annotations: Option<i32>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new project.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub user_id: DbId,
    pub name: String,
    pub due_date: NaiveDate,
    pub notes: Option<String>,
    pub categories: Vec<String>,
    pub annotation_file_path: String,
    pub guidelines_file_path: Option<String>,
}
