//! History action tags.
//!
//! One tag per state-changing action. These match the values stored in the
//! `course_history.action` column and are queried by the instructor and
//! admin dashboards; treat them as a wire format.

/// Known action tags for course history entries.
pub mod actions {
    pub const SUBMITTED: &str = "submitted";
    pub const APPROVED: &str = "approved";
    pub const REJECTED: &str = "rejected";
    pub const REVISION_REQUESTED: &str = "revision_requested";
    pub const PUBLISHED: &str = "published";
    pub const MAJOR_EDIT: &str = "major_edit";
    pub const MINOR_EDIT: &str = "minor_edit";
    pub const ARCHIVED: &str = "archived";
}

