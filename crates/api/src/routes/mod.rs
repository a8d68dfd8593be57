pub mod course;
pub mod health;
pub mod notification;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /courses                               create, list
/// /courses/{id}                          get, edit (PATCH)
/// /courses/{id}/submit                   submit for review
/// /courses/{id}/approve                  approve (admin)
/// /courses/{id}/reject                   reject (admin)
/// /courses/{id}/request-revision         request revision (admin)
/// /courses/{id}/publish                  publish
/// /courses/{id}/archive                  archive
/// /courses/{id}/history                  audit trail
/// /courses/{id}/versions                 major-edit snapshots
///
/// /notifications                         list
/// /notifications/{id}/read               mark one read
/// /notifications/read-all                mark all read
/// /notifications/unread-count            unread badge count
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/courses", course::router())
        .nest("/notifications", notification::router())
}
