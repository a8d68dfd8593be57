//! Repository for the `course_versions` table.

use sqlx::PgPool;

use coursehub_core::types::DbId;

use crate::models::course_version::CourseVersion;

/// Column list for `course_versions` queries.
const COLUMNS: &str = "id, course_id, version, snapshot, changed_fields, \
    status_at_snapshot, created_by_id, created_by_name, created_at";

/// Provides read operations for version snapshots.
///
/// Snapshots are written through
/// [`crate::repositories::CourseRepo::apply_major_edit`] so they share the
/// displacing edit's transaction.
pub struct CourseVersionRepo;

impl CourseVersionRepo {
    /// List snapshots for a course, newest version first.
    pub async fn list_for_course(
        pool: &PgPool,
        course_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<CourseVersion>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM course_versions \
             WHERE course_id = $1 \
             ORDER BY version DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, CourseVersion>(&query)
            .bind(course_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count snapshots for a course.
    pub async fn count_for_course(pool: &PgPool, course_id: DbId) -> Result<i64, sqlx::Error> {
        let count: Option<i64> =
            sqlx::query_scalar("SELECT COUNT(*) FROM course_versions WHERE course_id = $1")
                .bind(course_id)
                .fetch_one(pool)
                .await?;
        Ok(count.unwrap_or(0))
    }
}
