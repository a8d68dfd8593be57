//! Row models and create/update DTOs.

pub mod course;
pub mod course_history;
pub mod course_version;
pub mod notification;
