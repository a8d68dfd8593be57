//! Pure domain logic for the course approval workflow.
//!
//! This crate has zero I/O and no internal dependencies, so it can be used
//! by the repository layer, the workflow engine, the API, and any future
//! worker or CLI tooling. Everything here is a plain function or value type:
//! the state machine lives in [`workflow`], edit classification in [`edit`],
//! and the notification copy table in [`notification`].

pub mod course;
pub mod edit;
pub mod error;
pub mod history;
pub mod notification;
pub mod status;
pub mod types;
pub mod workflow;
