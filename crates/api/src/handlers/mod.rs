pub mod course;
pub mod notification;
