//! Notification copy, keyed by the status a transition lands on.
//!
//! Every successful transition notifies the owning instructor exactly once.
//! Reject and request-revision share a destination status and are told apart
//! by the `revision_requested` flag, which only softens the copy.

use crate::status::CourseStatus;

/// Known notification type tags, stored in `notifications.notification_type`.
pub mod types {
    pub const COURSE_SUBMITTED: &str = "course_submitted";
    pub const COURSE_APPROVED: &str = "course_approved";
    pub const COURSE_REJECTED: &str = "course_rejected";
    pub const COURSE_REVISION_REQUESTED: &str = "course_revision_requested";
    pub const COURSE_PUBLISHED: &str = "course_published";
    pub const COURSE_NEEDS_REAPPROVAL: &str = "course_needs_reapproval";
    pub const COURSE_ARCHIVED: &str = "course_archived";
}

/// Rendered notification content for one transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationCopy {
    pub notification_type: &'static str,
    pub title: String,
    pub message: String,
}

/// Build the instructor-facing copy for a transition into `destination`.
///
/// `detail` carries the admin's notes (approval) or reason
/// (rejection/revision). Returns `None` for `Draft`, which no transition
/// lands on.
pub fn copy_for_transition(
    destination: CourseStatus,
    revision_requested: bool,
    course_title: &str,
    detail: Option<&str>,
) -> Option<NotificationCopy> {
    let copy = match destination {
        CourseStatus::PendingReview => NotificationCopy {
            notification_type: types::COURSE_SUBMITTED,
            title: "Course submitted for review".to_string(),
            message: format!(
                "\"{course_title}\" has been submitted and is now awaiting review. \
                 You will be notified once a decision is made."
            ),
        },
        CourseStatus::Approved => {
            let mut message =
                format!("Congratulations! \"{course_title}\" has been approved.");
            if let Some(notes) = detail.filter(|n| !n.trim().is_empty()) {
                message.push_str(&format!(" Reviewer notes: {notes}"));
            }
            message.push_str(" You can now publish it to the marketplace.");
            NotificationCopy {
                notification_type: types::COURSE_APPROVED,
                title: "Course approved".to_string(),
                message,
            }
        }
        CourseStatus::NeedsRevision => {
            let reason = detail.unwrap_or("No reason provided");
            if revision_requested {
                NotificationCopy {
                    notification_type: types::COURSE_REVISION_REQUESTED,
                    title: "Changes requested on your course".to_string(),
                    message: format!(
                        "A reviewer requested changes to \"{course_title}\": {reason}. \
                         Update the course and resubmit when ready."
                    ),
                }
            } else {
                NotificationCopy {
                    notification_type: types::COURSE_REJECTED,
                    title: "Course review outcome".to_string(),
                    message: format!(
                        "\"{course_title}\" was not approved: {reason}. \
                         You can revise and resubmit it."
                    ),
                }
            }
        }
        CourseStatus::Published => NotificationCopy {
            notification_type: types::COURSE_PUBLISHED,
            title: "Course published".to_string(),
            message: format!(
                "\"{course_title}\" is now live on the marketplace."
            ),
        },
        CourseStatus::EditedPending => NotificationCopy {
            notification_type: types::COURSE_NEEDS_REAPPROVAL,
            title: "Course requires re-approval".to_string(),
            message: format!(
                "Your major changes to \"{course_title}\" were saved. The course has been \
                 taken off the marketplace and must be resubmitted for review."
            ),
        },
        CourseStatus::Archived => NotificationCopy {
            notification_type: types::COURSE_ARCHIVED,
            title: "Course archived".to_string(),
            message: format!("\"{course_title}\" has been archived and is no longer listed."),
        },
        CourseStatus::Draft => return None,
    };
    Some(copy)
}
