//! Course history entry models.

use serde::Serialize;
use sqlx::FromRow;

use coursehub_core::types::{DbId, Timestamp};

/// A row from the `course_history` table. Never mutated after creation.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CourseHistoryEntry {
    pub id: DbId,
    pub course_id: DbId,
    pub action: String,
    pub actor_id: DbId,
    pub actor_name: String,
    pub actor_email: String,
    pub details: String,
    pub previous_status: String,
    pub new_status: String,
    pub created_at: Timestamp,
}

/// DTO for appending a history entry.
#[derive(Debug, Clone)]
pub struct CreateHistoryEntry {
    pub course_id: DbId,
    pub action: &'static str,
    pub actor_id: DbId,
    pub actor_name: String,
    pub actor_email: String,
    pub details: String,
    pub previous_status: String,
    pub new_status: String,
}
