//! Notification entity models and DTOs.

use serde::Serialize;
use serde_json::Value;
use sqlx::FromRow;

use coursehub_core::types::{DbId, Timestamp};

/// A row from the `notifications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Notification {
    pub id: DbId,
    pub user_id: DbId,
    pub notification_type: String,
    pub title: String,
    pub message: String,
    pub course_id: Option<DbId>,
    pub course_title: Option<String>,
    pub status: Option<String>,
    pub action_link: Option<String>,
    pub metadata: Value,
    pub is_read: bool,
    pub read_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// DTO for creating a notification.
#[derive(Debug, Clone)]
pub struct CreateNotification {
    pub user_id: DbId,
    pub notification_type: &'static str,
    pub title: String,
    pub message: String,
    pub course_id: Option<DbId>,
    pub course_title: Option<String>,
    pub status: Option<String>,
    pub action_link: Option<String>,
    pub metadata: Value,
}
