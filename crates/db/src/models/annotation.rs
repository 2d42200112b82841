//! Annotation row model and DTOs.
//!
//! One row per data row of the project's source CSV, addressed by
//! `(project_id, row_index)` with a 1-based index. The index set is created
//! in full at ingestion and never resized afterwards.

use serde::Serialize;
use sqlx::FromRow;

use annotext_core::types::{DbId, Timestamp};

/// An annotation row from the `annotations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AnnotationRow {
    pub id: DbId,
    pub project_id: DbId,
    /// 1-based position within the source CSV's data rows (header excluded).
    pub row_index: i32,
    /// Chosen category label; `None` until the row is annotated.
    pub content: Option<String>,
    /// Present iff `content` is present.
    pub validated_at: Option<Timestamp>,
    pub created_at: Timestamp,
}
