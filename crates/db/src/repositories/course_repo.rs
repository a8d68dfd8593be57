//! Repository for the `courses` table.
//!
//! Transition writers use compare-and-set: every status-changing UPDATE
//! carries the expected current status (and the expected version for edits)
//! in its WHERE clause and returns the updated row. `None` from a writer
//! means a concurrent writer moved the record first; callers surface that as
//! a conflict instead of overwriting.

use sqlx::PgPool;

use coursehub_core::course::{LOCK_REASON_MAJOR_EDIT, LOCK_REASON_UNDER_REVIEW};
use coursehub_core::edit::CourseEdit;
use coursehub_core::types::DbId;

use crate::models::course::{Course, CreateCourse};
use crate::models::course_version::CreateCourseVersion;

/// Column list for `courses` queries.
const COLUMNS: &str = "id, title, subtitle, description, category, subcategory, level, language, \
    pricing, objectives, syllabus, requirements, target_audience, curriculum, media_files, \
    instructor_id, instructor_name, instructor_email, \
    status, is_locked, locked_by, locked_at, lock_reason, version, is_published, published_by, \
    decision, approved_by_id, approved_by_name, approval_notes, is_featured, approved_at, \
    rejected_by_id, rejected_by_name, rejection_reason, rejected_at, \
    submitted_at, published_at, created_at, updated_at";

/// The SET fragment applying a partial content edit.
///
/// `$3..$16` are the optional content fields in [`CourseEdit`] order; absent
/// fields keep their stored value.
const EDIT_SET: &str = "title = COALESCE($3, title), \
    subtitle = COALESCE($4, subtitle), \
    description = COALESCE($5, description), \
    category = COALESCE($6, category), \
    subcategory = COALESCE($7, subcategory), \
    level = COALESCE($8, level), \
    language = COALESCE($9, language), \
    pricing = COALESCE($10, pricing), \
    objectives = COALESCE($11, objectives), \
    syllabus = COALESCE($12, syllabus), \
    requirements = COALESCE($13, requirements), \
    target_audience = COALESCE($14, target_audience), \
    curriculum = COALESCE($15, curriculum), \
    media_files = COALESCE($16, media_files), \
    version = version + 1, \
    updated_at = NOW()";

/// Provides CRUD and compare-and-set transition operations for courses.
pub struct CourseRepo;

impl CourseRepo {
    /// Create a course in `draft` status with `version = 1`.
    pub async fn create(pool: &PgPool, input: &CreateCourse) -> Result<Course, sqlx::Error> {
        let query = format!(
            "INSERT INTO courses \
                (title, subtitle, description, category, subcategory, level, language, \
                 pricing, objectives, syllabus, requirements, target_audience, curriculum, \
                 media_files, instructor_id, instructor_name, instructor_email) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(&input.title)
            .bind(&input.subtitle)
            .bind(input.description.as_deref().unwrap_or(""))
            .bind(input.category.as_deref().unwrap_or(""))
            .bind(&input.subcategory)
            .bind(input.level.as_deref().unwrap_or(""))
            .bind(input.language.as_deref().unwrap_or(""))
            .bind(input.pricing.clone().unwrap_or(serde_json::Value::Null))
            .bind(input.objectives.clone().unwrap_or_else(empty_array))
            .bind(input.syllabus.clone().unwrap_or_else(empty_array))
            .bind(input.requirements.clone().unwrap_or_else(empty_array))
            .bind(input.target_audience.clone().unwrap_or_else(empty_array))
            .bind(input.curriculum.clone().unwrap_or_else(empty_array))
            .bind(input.media_files.clone().unwrap_or_else(empty_array))
            .bind(input.instructor_id)
            .bind(&input.instructor_name)
            .bind(&input.instructor_email)
            .fetch_one(pool)
            .await
    }

    /// Find a course by its primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Course>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM courses WHERE id = $1");
        sqlx::query_as::<_, Course>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List courses, optionally filtered by instructor and/or status,
    /// most recently updated first.
    pub async fn list(
        pool: &PgPool,
        instructor_id: Option<DbId>,
        status: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Course>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM courses \
             WHERE ($1::bigint IS NULL OR instructor_id = $1) \
               AND ($2::text IS NULL OR status = $2) \
             ORDER BY updated_at DESC \
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(instructor_id)
            .bind(status)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Move a course into `pending_review`, locking it for the instructor.
    ///
    /// CAS on `status = expected_status`.
    pub async fn mark_submitted(
        pool: &PgPool,
        id: DbId,
        expected_status: &str,
        locked_by: DbId,
    ) -> Result<Option<Course>, sqlx::Error> {
        let query = format!(
            "UPDATE courses SET \
                status = 'pending_review', \
                is_locked = TRUE, \
                locked_by = $3, \
                locked_at = NOW(), \
                lock_reason = $4, \
                submitted_at = NOW(), \
                updated_at = NOW() \
             WHERE id = $1 AND status = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(id)
            .bind(expected_status)
            .bind(locked_by)
            .bind(LOCK_REASON_UNDER_REVIEW)
            .fetch_optional(pool)
            .await
    }

    /// Approve a course in `pending_review`: clears the lock, records the
    /// approval side of the decision, and clears any prior rejection.
    pub async fn record_approval(
        pool: &PgPool,
        id: DbId,
        approver_id: DbId,
        approver_name: &str,
        approval_notes: Option<&str>,
    ) -> Result<Option<Course>, sqlx::Error> {
        let query = format!(
            "UPDATE courses SET \
                status = 'approved', \
                is_locked = FALSE, locked_by = NULL, locked_at = NULL, lock_reason = NULL, \
                decision = 'approved', \
                approved_by_id = $3, \
                approved_by_name = $4, \
                approval_notes = $5, \
                is_featured = FALSE, \
                approved_at = NOW(), \
                rejected_by_id = NULL, rejected_by_name = NULL, \
                rejection_reason = NULL, rejected_at = NULL, \
                updated_at = NOW() \
             WHERE id = $1 AND status = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(id)
            .bind("pending_review")
            .bind(approver_id)
            .bind(approver_name)
            .bind(approval_notes)
            .fetch_optional(pool)
            .await
    }

    /// Send a course in `pending_review` back to the instructor: clears the
    /// lock, records the rejection side of the decision, and clears any
    /// prior approval. Used by both Reject and Request-revision.
    pub async fn record_rejection(
        pool: &PgPool,
        id: DbId,
        rejecter_id: DbId,
        rejecter_name: &str,
        rejection_reason: &str,
    ) -> Result<Option<Course>, sqlx::Error> {
        let query = format!(
            "UPDATE courses SET \
                status = 'needs_revision', \
                is_locked = FALSE, locked_by = NULL, locked_at = NULL, lock_reason = NULL, \
                decision = 'rejected', \
                rejected_by_id = $3, \
                rejected_by_name = $4, \
                rejection_reason = $5, \
                rejected_at = NOW(), \
                approved_by_id = NULL, approved_by_name = NULL, \
                approval_notes = NULL, is_featured = FALSE, approved_at = NULL, \
                updated_at = NOW() \
             WHERE id = $1 AND status = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(id)
            .bind("pending_review")
            .bind(rejecter_id)
            .bind(rejecter_name)
            .bind(rejection_reason)
            .fetch_optional(pool)
            .await
    }

    /// Publish an `approved` course.
    pub async fn mark_published(
        pool: &PgPool,
        id: DbId,
        published_by: DbId,
    ) -> Result<Option<Course>, sqlx::Error> {
        let query = format!(
            "UPDATE courses SET \
                status = 'published', \
                is_published = TRUE, \
                published_by = $3, \
                published_at = NOW(), \
                updated_at = NOW() \
             WHERE id = $1 AND status = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(id)
            .bind("approved")
            .bind(published_by)
            .fetch_optional(pool)
            .await
    }

    /// Archive a course: delists it and clears the lock.
    ///
    /// CAS on the status the caller loaded, so two concurrent archivals (or
    /// an archive racing another transition) cannot both win.
    pub async fn mark_archived(
        pool: &PgPool,
        id: DbId,
        expected_status: &str,
    ) -> Result<Option<Course>, sqlx::Error> {
        let query = format!(
            "UPDATE courses SET \
                status = 'archived', \
                is_published = FALSE, \
                is_locked = FALSE, locked_by = NULL, locked_at = NULL, lock_reason = NULL, \
                updated_at = NOW() \
             WHERE id = $1 AND status = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(id)
            .bind(expected_status)
            .fetch_optional(pool)
            .await
    }

    /// Apply a minor edit (or a major edit to a pre-approval course):
    /// partial content update plus a version bump, no status change.
    ///
    /// CAS on `version = expected_version` and `status = expected_status`.
    /// Transitions do not bump the version, so the version check alone would
    /// let an edit land on a course that was submitted or archived between
    /// the caller's read and this write.
    pub async fn apply_edit(
        pool: &PgPool,
        id: DbId,
        expected_version: i32,
        expected_status: &str,
        edit: &CourseEdit,
    ) -> Result<Option<Course>, sqlx::Error> {
        let query = format!(
            "UPDATE courses SET {EDIT_SET} \
             WHERE id = $1 AND version = $2 AND status = $17 \
             RETURNING {COLUMNS}"
        );
        bind_edit(sqlx::query_as::<_, Course>(&query).bind(id).bind(expected_version), edit)
            .bind(expected_status)
            .fetch_optional(pool)
            .await
    }

    /// Apply a major edit to an approved or published course.
    ///
    /// In one transaction: the partial content update plus version bump,
    /// the displacement into `edited_pending` (delisted, locked for
    /// re-approval), and the pre-change version snapshot. CAS on
    /// `version = expected_version` and `status = expected_status`; `None`
    /// rolls everything back.
    pub async fn apply_major_edit(
        pool: &PgPool,
        id: DbId,
        expected_version: i32,
        expected_status: &str,
        edit: &CourseEdit,
        locked_by: DbId,
        snapshot: &CreateCourseVersion,
    ) -> Result<Option<Course>, sqlx::Error> {
        let query = format!(
            "UPDATE courses SET {EDIT_SET}, \
                status = 'edited_pending', \
                is_published = FALSE, \
                is_locked = TRUE, \
                locked_by = $17, \
                locked_at = NOW(), \
                lock_reason = $18 \
             WHERE id = $1 AND version = $2 AND status = $19 \
             RETURNING {COLUMNS}"
        );

        let mut tx = pool.begin().await?;

        let updated = bind_edit(
            sqlx::query_as::<_, Course>(&query).bind(id).bind(expected_version),
            edit,
        )
        .bind(locked_by)
        .bind(LOCK_REASON_MAJOR_EDIT)
        .bind(expected_status)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(course) = updated else {
            // Lost the race; nothing was changed.
            return Ok(None);
        };

        sqlx::query(
            "INSERT INTO course_versions \
                (course_id, version, snapshot, changed_fields, status_at_snapshot, \
                 created_by_id, created_by_name) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(snapshot.course_id)
        .bind(snapshot.version)
        .bind(&snapshot.snapshot)
        .bind(&snapshot.changed_fields)
        .bind(&snapshot.status_at_snapshot)
        .bind(snapshot.created_by_id)
        .bind(&snapshot.created_by_name)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(course))
    }
}

/// Bind the fourteen optional content fields in [`EDIT_SET`] order.
fn bind_edit<'q>(
    query: sqlx::query::QueryAs<'q, sqlx::Postgres, Course, sqlx::postgres::PgArguments>,
    edit: &'q CourseEdit,
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, Course, sqlx::postgres::PgArguments> {
    query
        .bind(&edit.title)
        .bind(&edit.subtitle)
        .bind(&edit.description)
        .bind(&edit.category)
        .bind(&edit.subcategory)
        .bind(&edit.level)
        .bind(&edit.language)
        .bind(&edit.pricing)
        .bind(&edit.objectives)
        .bind(&edit.syllabus)
        .bind(&edit.requirements)
        .bind(&edit.target_audience)
        .bind(&edit.curriculum)
        .bind(&edit.media_files)
}

fn empty_array() -> serde_json::Value {
    serde_json::Value::Array(Vec::new())
}
