use std::sync::Arc;

use coursehub_core::workflow::WorkflowConfig;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: coursehub_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Workflow rules: submission readiness and major-edit field lists.
    pub workflow: Arc<WorkflowConfig>,
}
