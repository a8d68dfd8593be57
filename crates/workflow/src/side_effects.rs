//! Post-commit side effects: history logging and instructor notification.
//!
//! Both run after the primary course mutation has committed and are
//! best-effort: a failure here is logged at `warn` and never rolls back or
//! fails the operation. The transition is considered to have happened the
//! moment the course row was updated.

use serde_json::json;
use sqlx::PgPool;

use coursehub_core::notification::copy_for_transition;
use coursehub_core::status::CourseStatus;
use coursehub_core::types::Actor;
use coursehub_db::models::course::Course;
use coursehub_db::models::course_history::CreateHistoryEntry;
use coursehub_db::models::notification::CreateNotification;
use coursehub_db::repositories::{CourseHistoryRepo, NotificationRepo};

/// What to record about a transition that just committed.
pub(crate) struct TransitionRecord<'a> {
    pub action: &'static str,
    pub details: String,
    pub previous_status: CourseStatus,
    /// Set for the request-revision operation, which shares Reject's
    /// mechanics but gets softer notification copy.
    pub revision_requested: bool,
    /// Admin notes or rejection reason, folded into the notification copy.
    pub detail_for_copy: Option<&'a str>,
    /// Whether to notify the instructor. Status-preserving edits write
    /// history only; there is no notification copy for "nothing moved".
    pub notify: bool,
}

/// Append the history entry and create the instructor notification for a
/// committed transition.
pub(crate) async fn record_transition(
    pool: &PgPool,
    course: &Course,
    actor: &Actor,
    record: TransitionRecord<'_>,
) {
    let entry = CreateHistoryEntry {
        course_id: course.id,
        action: record.action,
        actor_id: actor.id,
        actor_name: actor.name.clone(),
        actor_email: actor.email.clone(),
        details: record.details,
        previous_status: record.previous_status.as_str().to_string(),
        new_status: course.status.clone(),
    };
    if let Err(error) = CourseHistoryRepo::append(pool, &entry).await {
        tracing::warn!(
            course_id = course.id,
            action = record.action,
            %error,
            "Failed to append course history entry after committed transition"
        );
    }

    if !record.notify {
        return;
    }

    let Ok(new_status) = course.status() else {
        // The row just came back from our own writer; an unparseable status
        // here means storage corruption, already reported by the caller.
        return;
    };
    let Some(copy) = copy_for_transition(
        new_status,
        record.revision_requested,
        &course.title,
        record.detail_for_copy,
    ) else {
        return;
    };

    let notification = CreateNotification {
        user_id: course.instructor_id,
        notification_type: copy.notification_type,
        title: copy.title,
        message: copy.message,
        course_id: Some(course.id),
        course_title: Some(course.title.clone()),
        status: Some(course.status.clone()),
        action_link: Some(format!("/instructor/courses/{}", course.id)),
        metadata: json!({ "action": record.action }),
    };
    if let Err(error) = NotificationRepo::create(pool, &notification).await {
        tracing::warn!(
            course_id = course.id,
            user_id = course.instructor_id,
            action = record.action,
            %error,
            "Failed to create notification after committed transition"
        );
    }
}
