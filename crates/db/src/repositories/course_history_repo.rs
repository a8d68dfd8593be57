//! Repository for the `course_history` table.
//!
//! Appends are fire-and-forget from the workflow's point of view: they run
//! after the primary course mutation commits, and a failure is logged by the
//! engine rather than propagated.

use sqlx::PgPool;

use coursehub_core::types::DbId;

use crate::models::course_history::{CourseHistoryEntry, CreateHistoryEntry};

/// Column list for `course_history` queries.
const COLUMNS: &str = "id, course_id, action, actor_id, actor_name, actor_email, \
    details, previous_status, new_status, created_at";

/// Provides append and read operations for the course history log.
pub struct CourseHistoryRepo;

impl CourseHistoryRepo {
    /// Append a history entry, returning the generated ID.
    pub async fn append(pool: &PgPool, entry: &CreateHistoryEntry) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO course_history \
                (course_id, action, actor_id, actor_name, actor_email, details, \
                 previous_status, new_status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING id",
        )
        .bind(entry.course_id)
        .bind(entry.action)
        .bind(entry.actor_id)
        .bind(&entry.actor_name)
        .bind(&entry.actor_email)
        .bind(&entry.details)
        .bind(&entry.previous_status)
        .bind(&entry.new_status)
        .fetch_one(pool)
        .await
    }

    /// List history for a course, most recent first.
    pub async fn list_for_course(
        pool: &PgPool,
        course_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<CourseHistoryEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM course_history \
             WHERE course_id = $1 \
             ORDER BY created_at DESC, id DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, CourseHistoryEntry>(&query)
            .bind(course_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count history entries for a course.
    pub async fn count_for_course(pool: &PgPool, course_id: DbId) -> Result<i64, sqlx::Error> {
        let count: Option<i64> =
            sqlx::query_scalar("SELECT COUNT(*) FROM course_history WHERE course_id = $1")
                .bind(course_id)
                .fetch_one(pool)
                .await?;
        Ok(count.unwrap_or(0))
    }
}
