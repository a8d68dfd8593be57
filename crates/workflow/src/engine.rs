//! Workflow operations.
//!
//! Each function is one caller-triggered transition: load, validate, apply
//! the compare-and-set mutation, then record side effects. A `None` from a
//! repository writer after a successful load means another writer moved the
//! course between our read and our write; that surfaces as a conflict and
//! nothing is persisted.

use sqlx::PgPool;

use coursehub_core::edit::{changed_fields, determine_edit_type, CourseEdit, EditType};
use coursehub_core::error::CoreError;
use coursehub_core::history::actions;
use coursehub_core::status::CourseStatus;
use coursehub_core::types::{Actor, DbId};
use coursehub_core::workflow::{
    check_transition, ensure_can_edit, validate_submission_ready, WorkflowConfig, WorkflowOp,
};
use coursehub_db::models::course::Course;
use coursehub_db::models::course_version::CreateCourseVersion;
use coursehub_db::repositories::CourseRepo;

use crate::side_effects::{record_transition, TransitionRecord};
use crate::{WorkflowError, WorkflowResult};

/// Submit a course for review.
///
/// Instructor-only: the actor must own the course. Validates submission
/// readiness, then moves the course to `pending_review` and locks it.
/// Resubmission after a revision request or a major edit goes through here
/// too and does not touch `version`.
pub async fn submit_for_review(
    pool: &PgPool,
    config: &WorkflowConfig,
    course_id: DbId,
    actor: &Actor,
) -> WorkflowResult<Course> {
    let course = load(pool, course_id).await?;
    let current = course.status()?;

    if actor.id != course.instructor_id {
        return Err(CoreError::Forbidden(
            "Only the owning instructor may submit this course for review".to_string(),
        )
        .into());
    }
    check_transition(WorkflowOp::Submit, current)?;
    validate_submission_ready(&course.content(), config)?;

    let updated = CourseRepo::mark_submitted(pool, course_id, current.as_str(), actor.id)
        .await?
        .ok_or_else(lost_race)?;

    record_transition(
        pool,
        &updated,
        actor,
        TransitionRecord {
            action: actions::SUBMITTED,
            details: "Submitted for review".to_string(),
            previous_status: current,
            revision_requested: false,
            detail_for_copy: None,
            notify: true,
        },
    )
    .await;

    Ok(updated)
}

/// Approve a course under review.
///
/// Admin operation. Clears the lock, records the approval decision
/// (overwriting any prior rejection), and stamps `approved_at`.
pub async fn approve(
    pool: &PgPool,
    course_id: DbId,
    actor: &Actor,
    approval_notes: Option<&str>,
) -> WorkflowResult<Course> {
    let course = load(pool, course_id).await?;
    let current = course.status()?;
    check_transition(WorkflowOp::Approve, current)?;

    let updated = CourseRepo::record_approval(pool, course_id, actor.id, &actor.name, approval_notes)
        .await?
        .ok_or_else(lost_race)?;

    let details = match approval_notes.filter(|n| !n.trim().is_empty()) {
        Some(notes) => format!("Approved with notes: {notes}"),
        None => "Approved".to_string(),
    };
    record_transition(
        pool,
        &updated,
        actor,
        TransitionRecord {
            action: actions::APPROVED,
            details,
            previous_status: current,
            revision_requested: false,
            detail_for_copy: approval_notes,
            notify: true,
        },
    )
    .await;

    Ok(updated)
}

/// Reject a course under review, sending it back to the instructor.
///
/// Admin operation. Requires a reason; clears the lock and records the
/// rejection decision.
pub async fn reject(
    pool: &PgPool,
    course_id: DbId,
    actor: &Actor,
    reason: &str,
) -> WorkflowResult<Course> {
    decide_against(pool, course_id, actor, reason, false).await
}

/// Request a revision on a course under review.
///
/// Identical mechanics to [`reject`]; only the history action tag and the
/// notification copy differ.
pub async fn request_revision(
    pool: &PgPool,
    course_id: DbId,
    actor: &Actor,
    reason: &str,
) -> WorkflowResult<Course> {
    decide_against(pool, course_id, actor, reason, true).await
}

async fn decide_against(
    pool: &PgPool,
    course_id: DbId,
    actor: &Actor,
    reason: &str,
    revision_requested: bool,
) -> WorkflowResult<Course> {
    if reason.trim().is_empty() {
        return Err(CoreError::Validation(
            "A reason is required when sending a course back to the instructor".to_string(),
        )
        .into());
    }

    let course = load(pool, course_id).await?;
    let current = course.status()?;
    let op = if revision_requested {
        WorkflowOp::RequestRevision
    } else {
        WorkflowOp::Reject
    };
    check_transition(op, current)?;

    let updated = CourseRepo::record_rejection(pool, course_id, actor.id, &actor.name, reason)
        .await?
        .ok_or_else(lost_race)?;

    let (action, details) = if revision_requested {
        (actions::REVISION_REQUESTED, format!("Revision requested: {reason}"))
    } else {
        (actions::REJECTED, format!("Rejected: {reason}"))
    };
    record_transition(
        pool,
        &updated,
        actor,
        TransitionRecord {
            action,
            details,
            previous_status: current,
            revision_requested,
            detail_for_copy: Some(reason),
            notify: true,
        },
    )
    .await;

    Ok(updated)
}

/// Publish an approved course to the marketplace.
///
/// Available to an admin or the instructor; the engine trusts the caller's
/// role claim here.
pub async fn publish(pool: &PgPool, course_id: DbId, actor: &Actor) -> WorkflowResult<Course> {
    let course = load(pool, course_id).await?;
    let current = course.status()?;
    check_transition(WorkflowOp::Publish, current)?;

    let updated = CourseRepo::mark_published(pool, course_id, actor.id)
        .await?
        .ok_or_else(lost_race)?;

    record_transition(
        pool,
        &updated,
        actor,
        TransitionRecord {
            action: actions::PUBLISHED,
            details: "Published to the marketplace".to_string(),
            previous_status: current,
            revision_requested: false,
            detail_for_copy: None,
            notify: true,
        },
    )
    .await;

    Ok(updated)
}

/// Archive a course.
///
/// Allowed from any state except `archived`; delists the course and clears
/// any lock. Archival is a status, not a deletion.
pub async fn archive(pool: &PgPool, course_id: DbId, actor: &Actor) -> WorkflowResult<Course> {
    let course = load(pool, course_id).await?;
    let current = course.status()?;
    check_transition(WorkflowOp::Archive, current)?;

    let updated = CourseRepo::mark_archived(pool, course_id, current.as_str())
        .await?
        .ok_or_else(lost_race)?;

    record_transition(
        pool,
        &updated,
        actor,
        TransitionRecord {
            action: actions::ARCHIVED,
            details: "Archived".to_string(),
            previous_status: current,
            revision_requested: false,
            detail_for_copy: None,
            notify: true,
        },
    )
    .await;

    Ok(updated)
}

/// Apply an instructor edit.
///
/// Always bumps `version` by one. A MAJOR edit to an approved or published
/// course additionally snapshots the pre-change state, delists the course,
/// and locks it in `edited_pending` for re-approval; all of that commits in
/// one transaction with the content update. Minor edits, and major edits to
/// pre-approval courses, change content only.
pub async fn update_course(
    pool: &PgPool,
    config: &WorkflowConfig,
    course_id: DbId,
    actor: &Actor,
    edit: &CourseEdit,
) -> WorkflowResult<(Course, EditType)> {
    let course = load(pool, course_id).await?;
    let current = course.status()?;

    ensure_can_edit(
        actor.id,
        course.instructor_id,
        current,
        course.is_locked,
        course.lock_reason.as_deref(),
    )?;
    if edit.is_empty() {
        return Err(CoreError::Validation("Edit contains no changes".to_string()).into());
    }

    let content = course.content();
    let edit_type = determine_edit_type(edit, &content, config);
    let changed = changed_fields(edit, &content);

    let forces_review = edit_type == EditType::Major
        && matches!(current, CourseStatus::Approved | CourseStatus::Published);

    let updated = if forces_review {
        let snapshot = CreateCourseVersion {
            course_id: course.id,
            version: course.version,
            snapshot: serde_json::to_value(&course).map_err(|e| {
                CoreError::Internal(format!("Failed to serialize course snapshot: {e}"))
            })?,
            changed_fields: serde_json::json!(changed),
            status_at_snapshot: course.status.clone(),
            created_by_id: actor.id,
            created_by_name: actor.name.clone(),
        };
        CourseRepo::apply_major_edit(
            pool,
            course.id,
            course.version,
            current.as_str(),
            edit,
            actor.id,
            &snapshot,
        )
        .await?
    } else {
        CourseRepo::apply_edit(pool, course.id, course.version, current.as_str(), edit).await?
    }
    .ok_or_else(lost_race)?;

    let (action, details) = match edit_type {
        EditType::Major => (
            actions::MAJOR_EDIT,
            format!("Major edit, changed: {}", changed.join(", ")),
        ),
        EditType::Minor => (
            actions::MINOR_EDIT,
            format!("Minor edit, changed: {}", changed.join(", ")),
        ),
    };
    record_transition(
        pool,
        &updated,
        actor,
        TransitionRecord {
            action,
            details,
            previous_status: current,
            revision_requested: false,
            detail_for_copy: None,
            // Only a status change carries instructor-facing copy; a
            // status-preserving edit is recorded in history alone.
            notify: forces_review,
        },
    )
    .await;

    Ok((updated, edit_type))
}

async fn load(pool: &PgPool, course_id: DbId) -> WorkflowResult<Course> {
    CourseRepo::find_by_id(pool, course_id)
        .await?
        .ok_or_else(|| {
            WorkflowError::Core(CoreError::NotFound {
                entity: "Course",
                id: course_id,
            })
        })
}

fn lost_race() -> WorkflowError {
    WorkflowError::Core(CoreError::Conflict(
        "Course was modified concurrently; reload and retry".to_string(),
    ))
}
