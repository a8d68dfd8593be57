//! Handlers for the `/courses` resource.
//!
//! Workflow transitions carry the acting user in the request body; the API
//! trusts the caller-supplied actor context.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use coursehub_core::edit::CourseEdit;
use coursehub_core::error::CoreError;
use coursehub_core::status::CourseStatus;
use coursehub_core::types::{Actor, DbId};
use coursehub_db::models::course::CreateCourse;
use coursehub_db::repositories::{CourseHistoryRepo, CourseRepo, CourseVersionRepo};
use coursehub_workflow as workflow;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query / payload types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /courses`.
#[derive(Debug, Deserialize)]
pub struct CourseListQuery {
    /// Restrict to one instructor's courses.
    pub instructor_id: Option<DbId>,
    /// Restrict to one workflow status.
    pub status: Option<String>,
    /// Maximum number of results. Defaults to 50, capped at 100.
    pub limit: Option<i64>,
    /// Number of results to skip. Defaults to 0.
    pub offset: Option<i64>,
}

/// Query parameters for paged sub-resource listings.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Request body for transitions that need only the acting user.
#[derive(Debug, Deserialize)]
pub struct ActorPayload {
    pub actor: Actor,
}

/// Request body for `POST /courses/{id}/approve`.
#[derive(Debug, Deserialize)]
pub struct ApprovePayload {
    pub actor: Actor,
    pub approval_notes: Option<String>,
}

/// Request body for reject and request-revision.
#[derive(Debug, Deserialize)]
pub struct DecisionPayload {
    pub actor: Actor,
    pub reason: String,
}

/// Request body for `PATCH /courses/{id}`.
#[derive(Debug, Deserialize)]
pub struct UpdatePayload {
    pub actor: Actor,
    pub changes: CourseEdit,
}

/// Maximum page size for listings.
const MAX_LIMIT: i64 = 100;

/// Default page size for listings.
const DEFAULT_LIMIT: i64 = 50;

fn page(limit: Option<i64>, offset: Option<i64>) -> (i64, i64) {
    (
        limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT),
        offset.unwrap_or(0).max(0),
    )
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

/// POST /api/v1/courses
///
/// Create a new draft course (version 1) for the supplied instructor.
pub async fn create_course(
    State(state): State<AppState>,
    Json(input): Json<CreateCourse>,
) -> AppResult<impl IntoResponse> {
    if input.title.trim().is_empty() {
        return Err(AppError::BadRequest("Course title is required".to_string()));
    }
    if input.instructor_name.trim().is_empty() || input.instructor_email.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Instructor name and email are required".to_string(),
        ));
    }

    let course = CourseRepo::create(&state.pool, &input).await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "data": course })),
    ))
}

/// GET /api/v1/courses/{id}
pub async fn get_course(
    State(state): State<AppState>,
    Path(course_id): Path<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    let course = CourseRepo::find_by_id(&state.pool, course_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Course",
            id: course_id,
        })?;

    Ok(Json(serde_json::json!({ "data": course })))
}

/// GET /api/v1/courses
///
/// List courses, optionally filtered by instructor and/or status.
pub async fn list_courses(
    State(state): State<AppState>,
    Query(params): Query<CourseListQuery>,
) -> AppResult<Json<serde_json::Value>> {
    let (limit, offset) = page(params.limit, params.offset);

    // Reject unknown status filters up front instead of silently matching
    // nothing.
    let status = match params.status.as_deref() {
        Some(raw) => Some(
            CourseStatus::parse(raw)
                .map_err(|_| AppError::BadRequest(format!("Unknown course status '{raw}'")))?,
        ),
        None => None,
    };

    let courses = CourseRepo::list(
        &state.pool,
        params.instructor_id,
        status.map(|s| s.as_str()),
        limit,
        offset,
    )
    .await?;

    Ok(Json(serde_json::json!({ "data": courses })))
}

// ---------------------------------------------------------------------------
// Workflow transitions
// ---------------------------------------------------------------------------

/// POST /api/v1/courses/{id}/submit
pub async fn submit_course(
    State(state): State<AppState>,
    Path(course_id): Path<DbId>,
    Json(payload): Json<ActorPayload>,
) -> AppResult<Json<serde_json::Value>> {
    let course =
        workflow::submit_for_review(&state.pool, &state.workflow, course_id, &payload.actor)
            .await?;
    Ok(Json(serde_json::json!({ "data": course })))
}

/// POST /api/v1/courses/{id}/approve
pub async fn approve_course(
    State(state): State<AppState>,
    Path(course_id): Path<DbId>,
    Json(payload): Json<ApprovePayload>,
) -> AppResult<Json<serde_json::Value>> {
    let course = workflow::approve(
        &state.pool,
        course_id,
        &payload.actor,
        payload.approval_notes.as_deref(),
    )
    .await?;
    Ok(Json(serde_json::json!({ "data": course })))
}

/// POST /api/v1/courses/{id}/reject
pub async fn reject_course(
    State(state): State<AppState>,
    Path(course_id): Path<DbId>,
    Json(payload): Json<DecisionPayload>,
) -> AppResult<Json<serde_json::Value>> {
    let course = workflow::reject(&state.pool, course_id, &payload.actor, &payload.reason).await?;
    Ok(Json(serde_json::json!({ "data": course })))
}

/// POST /api/v1/courses/{id}/request-revision
pub async fn request_course_revision(
    State(state): State<AppState>,
    Path(course_id): Path<DbId>,
    Json(payload): Json<DecisionPayload>,
) -> AppResult<Json<serde_json::Value>> {
    let course =
        workflow::request_revision(&state.pool, course_id, &payload.actor, &payload.reason)
            .await?;
    Ok(Json(serde_json::json!({ "data": course })))
}

/// POST /api/v1/courses/{id}/publish
pub async fn publish_course(
    State(state): State<AppState>,
    Path(course_id): Path<DbId>,
    Json(payload): Json<ActorPayload>,
) -> AppResult<Json<serde_json::Value>> {
    let course = workflow::publish(&state.pool, course_id, &payload.actor).await?;
    Ok(Json(serde_json::json!({ "data": course })))
}

/// POST /api/v1/courses/{id}/archive
pub async fn archive_course(
    State(state): State<AppState>,
    Path(course_id): Path<DbId>,
    Json(payload): Json<ActorPayload>,
) -> AppResult<Json<serde_json::Value>> {
    let course = workflow::archive(&state.pool, course_id, &payload.actor).await?;
    Ok(Json(serde_json::json!({ "data": course })))
}

/// PATCH /api/v1/courses/{id}
///
/// Apply an instructor edit. The response carries the updated course and
/// whether the edit was classified as major or minor.
pub async fn update_course(
    State(state): State<AppState>,
    Path(course_id): Path<DbId>,
    Json(payload): Json<UpdatePayload>,
) -> AppResult<Json<serde_json::Value>> {
    let (course, edit_type) = workflow::update_course(
        &state.pool,
        &state.workflow,
        course_id,
        &payload.actor,
        &payload.changes,
    )
    .await?;

    Ok(Json(serde_json::json!({
        "data": course,
        "edit_type": edit_type,
    })))
}

// ---------------------------------------------------------------------------
// Sub-resources
// ---------------------------------------------------------------------------

/// GET /api/v1/courses/{id}/history
///
/// The course's audit trail, newest first.
pub async fn course_history(
    State(state): State<AppState>,
    Path(course_id): Path<DbId>,
    Query(params): Query<PageQuery>,
) -> AppResult<Json<serde_json::Value>> {
    ensure_course_exists(&state, course_id).await?;
    let (limit, offset) = page(params.limit, params.offset);

    let entries = CourseHistoryRepo::list_for_course(&state.pool, course_id, limit, offset).await?;
    let total = CourseHistoryRepo::count_for_course(&state.pool, course_id).await?;

    Ok(Json(serde_json::json!({
        "data": entries,
        "total": total,
    })))
}

/// GET /api/v1/courses/{id}/versions
///
/// Pre-change snapshots written by major edits, newest first.
pub async fn course_versions(
    State(state): State<AppState>,
    Path(course_id): Path<DbId>,
    Query(params): Query<PageQuery>,
) -> AppResult<Json<serde_json::Value>> {
    ensure_course_exists(&state, course_id).await?;
    let (limit, offset) = page(params.limit, params.offset);

    let versions = CourseVersionRepo::list_for_course(&state.pool, course_id, limit, offset).await?;
    let total = CourseVersionRepo::count_for_course(&state.pool, course_id).await?;

    Ok(Json(serde_json::json!({
        "data": versions,
        "total": total,
    })))
}

async fn ensure_course_exists(state: &AppState, course_id: DbId) -> AppResult<()> {
    CourseRepo::find_by_id(&state.pool, course_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Course",
            id: course_id,
        })?;
    Ok(())
}
