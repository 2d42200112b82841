//! Project lifecycle rules and creation-input parsing.

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::CoreError;

/// Textual format accepted for project due dates.
pub const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Lifecycle status of a project.
///
/// The transition is monotonic: `Pending` -> `Completed`, never back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Pending,
    Completed,
}

impl ProjectStatus {
    /// Return the status as the lowercase string stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
        }
    }

    /// Parse a status from its stored string form.
    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            _ => Err(CoreError::Validation(format!(
                "Invalid project status '{s}'. Must be one of: pending, completed"
            ))),
        }
    }
}

/// Parse a due date in strict `YYYY-MM-DD` form.
pub fn parse_due_date(raw: &str) -> Result<NaiveDate, CoreError> {
    NaiveDate::parse_from_str(raw.trim(), DUE_DATE_FORMAT)
        .map_err(|_| CoreError::InvalidDate(format!("expected YYYY-MM-DD, got '{raw}'")))
}
