//! Course lifecycle states.
//!
//! The string forms must match the values stored in the `courses.status`
//! column; they are the de facto wire format shared with the UI layer.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CoreError;

/// Where a course sits in the approval lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CourseStatus {
    /// Initial editable state, before any review has been requested.
    Draft,
    /// Submitted and awaiting an admin decision. Locked for the instructor.
    PendingReview,
    /// Accepted by an admin but not yet live.
    Approved,
    /// Sent back to the instructor with a reason; editable and resubmittable.
    NeedsRevision,
    /// Live on the marketplace.
    Published,
    /// An approved or published course displaced into re-review by a major edit.
    EditedPending,
    /// Retired. Archival is a status, never a deletion.
    Archived,
}

impl CourseStatus {
    /// The column value for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            CourseStatus::Draft => "draft",
            CourseStatus::PendingReview => "pending_review",
            CourseStatus::Approved => "approved",
            CourseStatus::NeedsRevision => "needs_revision",
            CourseStatus::Published => "published",
            CourseStatus::EditedPending => "edited_pending",
            CourseStatus::Archived => "archived",
        }
    }

    /// Parse a stored column value.
    ///
    /// An unknown value means the row was written by something outside the
    /// workflow engine, which is an internal error rather than bad input.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "draft" => Ok(CourseStatus::Draft),
            "pending_review" => Ok(CourseStatus::PendingReview),
            "approved" => Ok(CourseStatus::Approved),
            "needs_revision" => Ok(CourseStatus::NeedsRevision),
            "published" => Ok(CourseStatus::Published),
            "edited_pending" => Ok(CourseStatus::EditedPending),
            "archived" => Ok(CourseStatus::Archived),
            other => Err(CoreError::Internal(format!(
                "Unknown course status '{other}' in storage"
            ))),
        }
    }
}

impl fmt::Display for CourseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
