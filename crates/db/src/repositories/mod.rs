//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod course_history_repo;
pub mod course_repo;
pub mod course_version_repo;
pub mod notification_repo;

pub use course_history_repo::CourseHistoryRepo;
pub use course_repo::CourseRepo;
pub use course_version_repo::CourseVersionRepo;
pub use notification_repo::NotificationRepo;
