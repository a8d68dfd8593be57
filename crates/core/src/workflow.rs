//! The approval state machine: transitions, edit gating, and submission
//! readiness.
//!
//! Everything here is a pure function of its inputs. The engine crate owns
//! the persistence and side effects; this module only answers "is this
//! operation allowed, and what does it produce".

use std::fmt;

use crate::course::CourseContent;
use crate::error::CoreError;
use crate::status::CourseStatus;
use crate::types::DbId;

/// The workflow operations that change a course's status.
///
/// Update (edit) is not listed: it changes status only indirectly, through
/// the MAJOR-edit rule in [`crate::edit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowOp {
    Submit,
    Approve,
    Reject,
    RequestRevision,
    Publish,
    Archive,
}

impl WorkflowOp {
    /// Statuses this operation may be applied from.
    pub fn valid_sources(&self) -> &'static [CourseStatus] {
        match self {
            WorkflowOp::Submit => &[
                CourseStatus::Draft,
                CourseStatus::NeedsRevision,
                CourseStatus::EditedPending,
            ],
            WorkflowOp::Approve | WorkflowOp::Reject | WorkflowOp::RequestRevision => {
                &[CourseStatus::PendingReview]
            }
            WorkflowOp::Publish => &[CourseStatus::Approved],
            WorkflowOp::Archive => &[
                CourseStatus::Draft,
                CourseStatus::PendingReview,
                CourseStatus::Approved,
                CourseStatus::NeedsRevision,
                CourseStatus::Published,
                CourseStatus::EditedPending,
            ],
        }
    }

    /// The status this operation transitions to.
    pub fn target(&self) -> CourseStatus {
        match self {
            WorkflowOp::Submit => CourseStatus::PendingReview,
            WorkflowOp::Approve => CourseStatus::Approved,
            WorkflowOp::Reject | WorkflowOp::RequestRevision => CourseStatus::NeedsRevision,
            WorkflowOp::Publish => CourseStatus::Published,
            WorkflowOp::Archive => CourseStatus::Archived,
        }
    }
}

impl fmt::Display for WorkflowOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WorkflowOp::Submit => "submit",
            WorkflowOp::Approve => "approve",
            WorkflowOp::Reject => "reject",
            WorkflowOp::RequestRevision => "request revision for",
            WorkflowOp::Publish => "publish",
            WorkflowOp::Archive => "archive",
        };
        f.write_str(name)
    }
}

/// Check that `op` may be applied to a course currently in `current`,
/// returning the destination status.
pub fn check_transition(op: WorkflowOp, current: CourseStatus) -> Result<CourseStatus, CoreError> {
    if op.valid_sources().contains(&current) {
        Ok(op.target())
    } else {
        let expected: Vec<&str> = op.valid_sources().iter().map(|s| s.as_str()).collect();
        Err(CoreError::Conflict(format!(
            "Cannot {op} a course in status '{current}'. Expected one of: {}",
            expected.join(", ")
        )))
    }
}

/// Statuses in which the owning instructor may edit the course at all.
const EDITABLE_STATUSES: &[CourseStatus] = &[
    CourseStatus::Draft,
    CourseStatus::NeedsRevision,
    CourseStatus::Approved,
    CourseStatus::Published,
    CourseStatus::EditedPending,
];

/// Whether an actor may edit a course.
///
/// False for non-owners regardless of anything else, false while the course
/// is locked, and false in `PendingReview` and `Archived`.
pub fn can_edit_course(
    actor_id: DbId,
    instructor_id: DbId,
    status: CourseStatus,
    is_locked: bool,
) -> bool {
    actor_id == instructor_id && !is_locked && EDITABLE_STATUSES.contains(&status)
}

/// Like [`can_edit_course`] but yields the reason editing is denied.
pub fn ensure_can_edit(
    actor_id: DbId,
    instructor_id: DbId,
    status: CourseStatus,
    is_locked: bool,
    lock_reason: Option<&str>,
) -> Result<(), CoreError> {
    if actor_id != instructor_id {
        return Err(CoreError::Forbidden(
            "Only the owning instructor may edit this course".to_string(),
        ));
    }
    if is_locked {
        let reason = lock_reason.unwrap_or("locked");
        return Err(CoreError::Conflict(format!(
            "Course is locked and cannot be edited: {reason}"
        )));
    }
    if !EDITABLE_STATUSES.contains(&status) {
        return Err(CoreError::Conflict(format!(
            "Course in status '{status}' cannot be edited"
        )));
    }
    Ok(())
}

/// Field lists driving submission readiness and edit classification.
///
/// The defaults reproduce the marketplace's historical behaviour; deployments
/// that add fields (thumbnail, promo video) extend the lists instead of
/// touching the classifier.
#[derive(Debug, Clone)]
pub struct WorkflowConfig {
    /// Fields that must be non-empty before a course can be submitted.
    pub required_for_submission: Vec<String>,
    /// Fields whose change classifies an edit as MAJOR.
    pub major_edit_fields: Vec<String>,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            required_for_submission: [
                "title",
                "description",
                "category",
                "level",
                "language",
                "pricing",
                "objectives",
                "syllabus",
                "requirements",
                "target_audience",
                "curriculum",
                "media_files",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            major_edit_fields: [
                "title",
                "description",
                "curriculum",
                "pricing",
                "objectives",
                "syllabus",
                "requirements",
                "target_audience",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

/// Validate that a course is complete enough to submit for review.
///
/// This is a local check: failure leaves the course untouched and records
/// nothing. The error message names every missing field so the instructor
/// can fix them in one pass.
pub fn validate_submission_ready(
    content: &CourseContent,
    config: &WorkflowConfig,
) -> Result<(), CoreError> {
    let mut missing = Vec::new();
    for field in &config.required_for_submission {
        match content.is_field_empty(field) {
            Some(true) => missing.push(field.as_str()),
            Some(false) => {}
            None => {
                return Err(CoreError::Internal(format!(
                    "Required-field list names unknown course field '{field}'"
                )))
            }
        }
    }
    if missing.is_empty() {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Course is not ready for submission. Missing or empty: {}",
            missing.join(", ")
        )))
    }
}
