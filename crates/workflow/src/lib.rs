//! The course approval workflow engine.
//!
//! A stateless module of async functions over the repository layer. Each
//! operation runs as one logical unit: load the course, validate against the
//! state machine in `coursehub_core`, apply the mutation with a
//! compare-and-set write, then record history and notify the instructor as
//! best-effort post-commit side effects.

pub mod engine;
mod side_effects;

pub use engine::{
    approve, archive, publish, reject, request_revision, submit_for_review, update_course,
};

use coursehub_core::error::CoreError;

/// Errors surfaced by workflow operations.
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    /// A domain-level failure: not found, precondition or permission
    /// violation, invalid input.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database failure on the primary mutation path. Side-effect
    /// failures never surface here.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Convenience alias for workflow operation results.
pub type WorkflowResult<T> = Result<T, WorkflowError>;
