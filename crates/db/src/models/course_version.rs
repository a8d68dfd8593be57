//! Course version snapshot models.

use serde::Serialize;
use serde_json::Value;
use sqlx::FromRow;

use coursehub_core::types::{DbId, Timestamp};

/// A row from the `course_versions` table. Append-only.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CourseVersion {
    pub id: DbId,
    pub course_id: DbId,
    pub version: i32,
    pub snapshot: Value,
    pub changed_fields: Value,
    pub status_at_snapshot: String,
    pub created_by_id: DbId,
    pub created_by_name: String,
    pub created_at: Timestamp,
}

/// DTO for appending a version snapshot.
#[derive(Debug, Clone)]
pub struct CreateCourseVersion {
    pub course_id: DbId,
    /// The version number being displaced (the pre-change `courses.version`).
    pub version: i32,
    /// Full pre-change course row as JSON.
    pub snapshot: Value,
    /// Names of the fields the displacing edit changed.
    pub changed_fields: Value,
    pub status_at_snapshot: String,
    pub created_by_id: DbId,
    pub created_by_name: String,
}
