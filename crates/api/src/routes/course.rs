//! Route definitions for the `/courses` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::course;
use crate::state::AppState;

/// Routes mounted at `/courses`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(course::create_course).get(course::list_courses))
        .route(
            "/{id}",
            get(course::get_course).patch(course::update_course),
        )
        // Workflow transitions
        .route("/{id}/submit", post(course::submit_course))
        .route("/{id}/approve", post(course::approve_course))
        .route("/{id}/reject", post(course::reject_course))
        .route(
            "/{id}/request-revision",
            post(course::request_course_revision),
        )
        .route("/{id}/publish", post(course::publish_course))
        .route("/{id}/archive", post(course::archive_course))
        // Sub-resources
        .route("/{id}/history", get(course::course_history))
        .route("/{id}/versions", get(course::course_versions))
}
